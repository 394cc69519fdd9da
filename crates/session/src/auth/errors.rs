//! User-facing error messages

use fastadmin_http::{ClientError, ErrorDetail};

/// Shown for validation failures and as the summary of error toasts
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong";

/// Message to show for a failed request.
///
/// The backend's scalar `detail` wins. Field-level validation lists are not
/// rendered here and collapse to [`GENERIC_ERROR_MESSAGE`]. Anything else
/// falls back to the error's own text.
pub fn error_detail(error: &ClientError) -> String {
    match error.detail() {
        Some(ErrorDetail::Message(message)) if !message.is_empty() => message,
        Some(ErrorDetail::List(_)) => GENERIC_ERROR_MESSAGE.to_string(),
        _ => error.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_detail_is_used_verbatim() {
        let err = ClientError::BadRequest(r#"{"detail":"Incorrect email or password"}"#.into());
        assert_eq!(error_detail(&err), "Incorrect email or password");
    }

    #[test]
    fn list_detail_collapses() {
        let err = ClientError::Validation(
            r#"{"detail":[{"loc":["body","email"],"msg":"value is not a valid email address"}]}"#
                .into(),
        );
        assert_eq!(error_detail(&err), GENERIC_ERROR_MESSAGE);

        let bare_list = ClientError::Validation(r#"[{"msg":"x"}]"#.into());
        assert_eq!(error_detail(&bare_list), GENERIC_ERROR_MESSAGE);
    }

    #[test]
    fn other_shapes_fall_back_to_the_error_text() {
        let err = ClientError::ServerError {
            status: 502,
            message: "<html>Bad Gateway</html>".into(),
        };
        assert_eq!(error_detail(&err), "Server error 502: <html>Bad Gateway</html>");

        let empty = ClientError::BadRequest(r#"{"detail":""}"#.into());
        assert_eq!(error_detail(&empty), empty.to_string());

        let object = ClientError::NotFound(r#"{"detail":{"code":7}}"#.into());
        assert_eq!(error_detail(&object), object.to_string());
    }
}

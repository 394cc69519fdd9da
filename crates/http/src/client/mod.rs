//! fastadmin HTTP client

pub mod error;
pub mod items;
pub mod login;
pub mod typed;
pub mod users;

pub use error::ClientError;
pub use typed::{AuthenticatedAdminClient, PublicAdminClient, TypedClientBuilder};

/// Path prefix of every backend endpoint
pub const API_V1: &str = "/api/v1";

/// Decode a response, turning non-success statuses into [`ClientError`]
pub(crate) async fn handle_response<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    let status = response.status();

    if status.is_success() {
        Ok(response.json().await?)
    } else {
        let message = response.text().await.unwrap_or_else(|_| status.to_string());
        tracing::debug!(status = status.as_u16(), "API request failed");
        Err(ClientError::from_status(status, message))
    }
}

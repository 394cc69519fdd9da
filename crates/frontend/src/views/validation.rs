//! Client-side form rules

pub const EMAIL_REQUIRED: &str = "Email is required.";
pub const EMAIL_INVALID: &str = "Must be a valid email address.";
pub const PASSWORD_REQUIRED: &str = "Password is required.";
pub const PASSWORD_TOO_SHORT: &str = "Password must be at least 8 characters";
pub const PASSWORDS_DIFFER: &str = "Passwords don't match";
pub const FULL_NAME_TOO_SHORT: &str = "Full name must be at least 3 characters.";
pub const TITLE_REQUIRED: &str = "Title is required.";

const MIN_PASSWORD_LEN: usize = 8;
const MIN_FULL_NAME_LEN: usize = 3;

pub fn email(value: &str) -> Option<&'static str> {
    let value = value.trim();
    if value.is_empty() {
        return Some(EMAIL_REQUIRED);
    }
    let valid = value.split_once('@').is_some_and(|(local, domain)| {
        !local.is_empty()
            && !domain.contains('@')
            && domain
                .split_once('.')
                .is_some_and(|(host, tld)| !host.is_empty() && tld.len() >= 2)
    });
    (!valid).then_some(EMAIL_INVALID)
}

pub fn password(value: &str) -> Option<&'static str> {
    if value.is_empty() {
        Some(PASSWORD_REQUIRED)
    } else if value.chars().count() < MIN_PASSWORD_LEN {
        Some(PASSWORD_TOO_SHORT)
    } else {
        None
    }
}

pub fn confirm_password(password: &str, confirmation: &str) -> Option<&'static str> {
    (password != confirmation).then_some(PASSWORDS_DIFFER)
}

/// Optional, but at least three characters when given
pub fn full_name(value: &str) -> Option<&'static str> {
    let value = value.trim();
    (!value.is_empty() && value.chars().count() < MIN_FULL_NAME_LEN).then_some(FULL_NAME_TOO_SHORT)
}

pub fn title(value: &str) -> Option<&'static str> {
    value.trim().is_empty().then_some(TITLE_REQUIRED)
}

/// `None` for blank input
pub fn optional(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn email_rules() {
        assert_eq!(email(""), Some(EMAIL_REQUIRED));
        assert_eq!(email("invalid-email"), Some(EMAIL_INVALID));
        assert_eq!(email("a@b"), Some(EMAIL_INVALID));
        assert_eq!(email("jane@example.com"), None);
    }

    #[wasm_bindgen_test]
    fn password_rules() {
        assert_eq!(password(""), Some(PASSWORD_REQUIRED));
        assert_eq!(password("short"), Some(PASSWORD_TOO_SHORT));
        assert_eq!(password("changethis"), None);
        assert_eq!(confirm_password("changethis", "changethat"), Some(PASSWORDS_DIFFER));
    }

    #[wasm_bindgen_test]
    fn full_name_is_optional() {
        assert_eq!(full_name(""), None);
        assert_eq!(full_name("ab"), Some(FULL_NAME_TOO_SHORT));
        assert_eq!(full_name("Jane"), None);
        assert_eq!(optional("  "), None);
    }
}

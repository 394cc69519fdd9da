//! Build-time configuration for the browser bundle
//!
//! The browser has no process environment, so the `FASTADMIN_*` variables
//! the native loader reads are baked in when the bundle is compiled and fed
//! through the same loader. `VITE_API_URL` is accepted for the API URL.
//! Without an API URL the page's own origin is used.

use fastadmin_core::config::DEFAULT_API_URL;
use fastadmin_core::{AppConfig, ErrorContext};

const API_URL: Option<&str> = match option_env!("FASTADMIN_API_URL") {
    Some(url) => Some(url),
    None => option_env!("VITE_API_URL"),
};

const BUILD_VARS: [(&str, Option<&str>); 4] = [
    ("FASTADMIN_LOG_LEVEL", option_env!("FASTADMIN_LOG_LEVEL")),
    (
        "FASTADMIN_QUERY__STALE_TIME_SECS",
        option_env!("FASTADMIN_QUERY__STALE_TIME_SECS"),
    ),
    (
        "FASTADMIN_QUERY__GC_TIME_SECS",
        option_env!("FASTADMIN_QUERY__GC_TIME_SECS"),
    ),
    (
        "FASTADMIN_QUERY__MAX_RETRIES",
        option_env!("FASTADMIN_QUERY__MAX_RETRIES"),
    ),
];

/// Resolve and validate the configuration
pub fn load() -> Result<AppConfig, String> {
    let api_url = API_URL.map_or_else(page_origin, str::to_string);
    let vars = BUILD_VARS
        .iter()
        .filter_map(|(name, value)| value.map(|value| (*name, value.to_string())))
        .chain([("FASTADMIN_API_URL", api_url)]);
    AppConfig::from_vars(vars).with_context_str("Invalid build-time configuration")
}

fn page_origin() -> String {
    web_sys::window()
        .and_then(|window| window.location().origin().ok())
        .unwrap_or_else(|| DEFAULT_API_URL.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn falls_back_to_a_valid_url() {
        let config = load().unwrap();
        assert!(config.base_url().starts_with("http"));
        assert!(!config.base_url().ends_with('/'));
    }
}

//! Type-safe API clients that enforce authentication requirements at compile time

use super::{API_V1, ClientError, handle_response};
use reqwest::{Client, ClientBuilder, header};
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
const USER_AGENT: &str = concat!("fastadmin-client/", env!("CARGO_PKG_VERSION"));

/// Client for public endpoints that don't require authentication
#[derive(Clone, Debug)]
pub struct PublicAdminClient {
    client: Client,
    base_url: String,
}

/// Client for endpoints that require a bearer token
#[derive(Clone, Debug)]
pub struct AuthenticatedAdminClient {
    client: Client,
    base_url: String,
    token: String,
}

fn build_http_client(timeout: Option<Duration>) -> Result<Client, ClientError> {
    #[cfg(not(target_arch = "wasm32"))]
    let client = {
        let mut builder = ClientBuilder::new().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()?
    };

    // The browser sets its own user agent and has no per-client timeout.
    #[cfg(target_arch = "wasm32")]
    let client = {
        let _ = timeout;
        ClientBuilder::new().build()?
    };

    Ok(client)
}

fn api_url(base_url: &str, path: &str) -> String {
    format!("{base_url}{API_V1}{path}")
}

/// `path` followed by `segment` as one percent-encoded path segment
fn api_url_with_segment(
    base_url: &str,
    path: &str,
    segment: &str,
) -> Result<reqwest::Url, ClientError> {
    let mut url = reqwest::Url::parse(&api_url(base_url, path))
        .map_err(|e| ClientError::Configuration(format!("Invalid API URL: {e}")))?;
    url.path_segments_mut()
        .map_err(|()| ClientError::Configuration("API URL cannot have a path".into()))?
        .pop_if_empty()
        .push(segment);
    Ok(url)
}

impl PublicAdminClient {
    /// Create a new public client
    pub fn new(base_url: impl Into<String>) -> Result<Self, ClientError> {
        Self::new_with_timeout(base_url, None)
    }

    fn new_with_timeout(
        base_url: impl Into<String>,
        timeout: Option<Duration>,
    ) -> Result<Self, ClientError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = build_http_client(timeout)?;
        Ok(Self { client, base_url })
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder for an `/api/v1` path without authentication
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client.request(method, api_url(&self.base_url, path))
    }

    /// Create a request for `path` with a caller-supplied trailing segment,
    /// such as an email address, encoded so it cannot alter the route
    pub fn request_with_segment(
        &self,
        method: reqwest::Method,
        path: &str,
        segment: &str,
    ) -> Result<reqwest::RequestBuilder, ClientError> {
        let url = api_url_with_segment(&self.base_url, path, segment)?;
        Ok(self.client.request(method, url))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        handle_response(request.send().await?).await
    }

    /// Attach a bearer token, producing an authenticated client
    pub fn authenticate(self, token: impl Into<String>) -> AuthenticatedAdminClient {
        AuthenticatedAdminClient {
            client: self.client,
            base_url: self.base_url,
            token: token.into(),
        }
    }

    /// Authenticated view sharing this client's connection pool
    pub fn with_token(&self, token: impl Into<String>) -> AuthenticatedAdminClient {
        self.clone().authenticate(token)
    }
}

impl AuthenticatedAdminClient {
    /// Create a new authenticated client
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self, ClientError> {
        Ok(PublicAdminClient::new(base_url)?.authenticate(token))
    }

    /// Get the base URL
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a request builder with the bearer token attached
    pub fn request(&self, method: reqwest::Method, path: &str) -> reqwest::RequestBuilder {
        self.client
            .request(method, api_url(&self.base_url, path))
            .header(header::AUTHORIZATION, format!("Bearer {}", self.token))
    }

    /// Execute a request and handle common errors
    pub async fn execute<T: serde::de::DeserializeOwned>(
        &self,
        request: reqwest::RequestBuilder,
    ) -> Result<T, ClientError> {
        handle_response(request.send().await?).await
    }

    /// Create a public client (useful for calling public endpoints)
    pub fn to_public(&self) -> PublicAdminClient {
        PublicAdminClient {
            client: self.client.clone(),
            base_url: self.base_url.clone(),
        }
    }
}

/// Type-safe builder that creates the appropriate client type
#[derive(Debug, Default)]
pub struct TypedClientBuilder {
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl TypedClientBuilder {
    /// Create a new builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Set the request timeout
    #[cfg(not(target_arch = "wasm32"))]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Build a public client
    pub fn build_public(self) -> Result<PublicAdminClient, ClientError> {
        let base_url = self
            .base_url
            .ok_or_else(|| ClientError::Configuration("base_url is required".into()))?;

        PublicAdminClient::new_with_timeout(base_url, self.timeout)
    }

    /// Build an authenticated client
    pub fn build_authenticated(
        self,
        token: impl Into<String>,
    ) -> Result<AuthenticatedAdminClient, ClientError> {
        Ok(self.build_public()?.authenticate(token))
    }
}

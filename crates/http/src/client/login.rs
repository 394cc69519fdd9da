//! Login, registration and password recovery endpoints

use super::{
    error::ClientError,
    typed::{AuthenticatedAdminClient, PublicAdminClient},
};
use crate::types::{LoginForm, Message, NewPassword, Token, UserPublic, UserRegister};
use reqwest::Method;

/// Endpoints callable without a token
impl PublicAdminClient {
    /// Exchange username/password for an access token (form-encoded OAuth2 password flow)
    pub async fn login_access_token(&self, form: &LoginForm) -> Result<Token, ClientError> {
        let req = self.request(Method::POST, "/login/access-token").form(form);
        self.execute(req).await
    }

    /// Self-service sign up
    pub async fn register_user(&self, body: &UserRegister) -> Result<UserPublic, ClientError> {
        let req = self.request(Method::POST, "/users/signup").json(body);
        self.execute(req).await
    }

    /// Send a password recovery email
    pub async fn recover_password(&self, email: &str) -> Result<Message, ClientError> {
        let req = self.request_with_segment(Method::POST, "/password-recovery", email)?;
        self.execute(req).await
    }

    /// Set a new password using a recovery token
    pub async fn reset_password(&self, body: &NewPassword) -> Result<Message, ClientError> {
        let req = self.request(Method::POST, "/reset-password/").json(body);
        self.execute(req).await
    }
}

impl AuthenticatedAdminClient {
    /// Check that the token is accepted and return its owner
    pub async fn test_token(&self) -> Result<UserPublic, ClientError> {
        let req = self.request(Method::POST, "/login/test-token");
        self.execute(req).await
    }
}

//! Backend operations used by the coordinator

use crate::token::TokenStore;
use async_trait::async_trait;
use fastadmin_http::types::{
    ItemCreate, ItemPublic, ItemUpdate, ItemsPublic, LoginForm, Message, NewPassword, Paging,
    Token, UpdatePassword, UserCreate, UserPublic, UserRegister, UserUpdate, UserUpdateMe,
    UsersPublic,
};
use fastadmin_http::{AuthenticatedAdminClient, ClientError, PublicAdminClient};
use uuid::Uuid;

/// The backend as seen by the session layer.
///
/// Authenticated calls use whatever token is current at call time.
#[async_trait(?Send)]
pub trait SessionApi {
    async fn login(&self, form: &LoginForm) -> Result<Token, ClientError>;
    async fn register(&self, body: &UserRegister) -> Result<UserPublic, ClientError>;
    async fn recover_password(&self, email: &str) -> Result<Message, ClientError>;
    async fn reset_password(&self, body: &NewPassword) -> Result<Message, ClientError>;

    async fn current_user(&self) -> Result<UserPublic, ClientError>;
    async fn update_me(&self, body: &UserUpdateMe) -> Result<UserPublic, ClientError>;
    async fn update_password(&self, body: &UpdatePassword) -> Result<Message, ClientError>;
    async fn delete_me(&self) -> Result<Message, ClientError>;

    async fn list_users(&self, paging: Paging) -> Result<UsersPublic, ClientError>;
    async fn create_user(&self, body: &UserCreate) -> Result<UserPublic, ClientError>;
    async fn update_user(&self, id: Uuid, body: &UserUpdate) -> Result<UserPublic, ClientError>;
    async fn delete_user(&self, id: Uuid) -> Result<Message, ClientError>;

    async fn list_items(&self, paging: Paging) -> Result<ItemsPublic, ClientError>;
    async fn create_item(&self, body: &ItemCreate) -> Result<ItemPublic, ClientError>;
    async fn update_item(&self, id: Uuid, body: &ItemUpdate) -> Result<ItemPublic, ClientError>;
    async fn delete_item(&self, id: Uuid) -> Result<Message, ClientError>;
}

/// [`SessionApi`] over the typed HTTP client
#[derive(Clone, Debug)]
pub struct HttpSessionApi {
    client: PublicAdminClient,
    tokens: TokenStore,
}

impl HttpSessionApi {
    pub const fn new(client: PublicAdminClient, tokens: TokenStore) -> Self {
        Self { client, tokens }
    }

    fn authenticated(&self) -> Result<AuthenticatedAdminClient, ClientError> {
        self.tokens
            .get()
            .map(|token| self.client.with_token(token))
            .ok_or_else(|| ClientError::Configuration("Not authenticated".to_string()))
    }
}

#[async_trait(?Send)]
impl SessionApi for HttpSessionApi {
    async fn login(&self, form: &LoginForm) -> Result<Token, ClientError> {
        self.client.login_access_token(form).await
    }

    async fn register(&self, body: &UserRegister) -> Result<UserPublic, ClientError> {
        self.client.register_user(body).await
    }

    async fn recover_password(&self, email: &str) -> Result<Message, ClientError> {
        self.client.recover_password(email).await
    }

    async fn reset_password(&self, body: &NewPassword) -> Result<Message, ClientError> {
        self.client.reset_password(body).await
    }

    async fn current_user(&self) -> Result<UserPublic, ClientError> {
        self.authenticated()?.read_user_me().await
    }

    async fn update_me(&self, body: &UserUpdateMe) -> Result<UserPublic, ClientError> {
        self.authenticated()?.update_user_me(body).await
    }

    async fn update_password(&self, body: &UpdatePassword) -> Result<Message, ClientError> {
        self.authenticated()?.update_password_me(body).await
    }

    async fn delete_me(&self) -> Result<Message, ClientError> {
        self.authenticated()?.delete_user_me().await
    }

    async fn list_users(&self, paging: Paging) -> Result<UsersPublic, ClientError> {
        self.authenticated()?.list_users(paging).await
    }

    async fn create_user(&self, body: &UserCreate) -> Result<UserPublic, ClientError> {
        self.authenticated()?.create_user(body).await
    }

    async fn update_user(&self, id: Uuid, body: &UserUpdate) -> Result<UserPublic, ClientError> {
        self.authenticated()?.update_user(id, body).await
    }

    async fn delete_user(&self, id: Uuid) -> Result<Message, ClientError> {
        self.authenticated()?.delete_user(id).await
    }

    async fn list_items(&self, paging: Paging) -> Result<ItemsPublic, ClientError> {
        self.authenticated()?.list_items(paging).await
    }

    async fn create_item(&self, body: &ItemCreate) -> Result<ItemPublic, ClientError> {
        self.authenticated()?.create_item(body).await
    }

    async fn update_item(&self, id: Uuid, body: &ItemUpdate) -> Result<ItemPublic, ClientError> {
        self.authenticated()?.update_item(id, body).await
    }

    async fn delete_item(&self, id: Uuid) -> Result<Message, ClientError> {
        self.authenticated()?.delete_item(id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::FallbackStorage;

    #[tokio::test]
    async fn authenticated_calls_need_a_token() {
        let api = HttpSessionApi::new(
            PublicAdminClient::new("http://127.0.0.1:9").unwrap(),
            TokenStore::new(FallbackStorage::memory_only()),
        );

        let err = api.current_user().await.unwrap_err();
        assert!(matches!(err, ClientError::Configuration(_)));
    }
}

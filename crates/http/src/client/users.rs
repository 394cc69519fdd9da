//! User endpoints (current user and admin management)

use super::{error::ClientError, typed::AuthenticatedAdminClient};
use crate::types::{
    Message, Paging, UpdatePassword, UserCreate, UserPublic, UserUpdate, UserUpdateMe, UsersPublic,
};
use reqwest::Method;
use uuid::Uuid;

impl AuthenticatedAdminClient {
    /// Profile of the token's owner
    pub async fn read_user_me(&self) -> Result<UserPublic, ClientError> {
        let req = self.request(Method::GET, "/users/me");
        self.execute(req).await
    }

    /// Update own name/email
    pub async fn update_user_me(&self, body: &UserUpdateMe) -> Result<UserPublic, ClientError> {
        let req = self.request(Method::PATCH, "/users/me").json(body);
        self.execute(req).await
    }

    /// Change own password
    pub async fn update_password_me(&self, body: &UpdatePassword) -> Result<Message, ClientError> {
        let req = self.request(Method::PATCH, "/users/me/password").json(body);
        self.execute(req).await
    }

    /// Delete own account
    pub async fn delete_user_me(&self) -> Result<Message, ClientError> {
        let req = self.request(Method::DELETE, "/users/me");
        self.execute(req).await
    }

    /// List users (superuser only)
    pub async fn list_users(&self, paging: Paging) -> Result<UsersPublic, ClientError> {
        let req = self
            .request(Method::GET, "/users/")
            .query(&[("skip", paging.skip), ("limit", paging.limit)]);
        self.execute(req).await
    }

    /// Create a user (superuser only)
    pub async fn create_user(&self, body: &UserCreate) -> Result<UserPublic, ClientError> {
        let req = self.request(Method::POST, "/users/").json(body);
        self.execute(req).await
    }

    /// Read a user by id
    pub async fn read_user(&self, id: Uuid) -> Result<UserPublic, ClientError> {
        let req = self.request(Method::GET, &format!("/users/{id}"));
        self.execute(req).await
    }

    /// Update a user (superuser only)
    pub async fn update_user(&self, id: Uuid, body: &UserUpdate) -> Result<UserPublic, ClientError> {
        let req = self.request(Method::PATCH, &format!("/users/{id}")).json(body);
        self.execute(req).await
    }

    /// Delete a user (superuser only)
    pub async fn delete_user(&self, id: Uuid) -> Result<Message, ClientError> {
        let req = self.request(Method::DELETE, &format!("/users/{id}"));
        self.execute(req).await
    }
}

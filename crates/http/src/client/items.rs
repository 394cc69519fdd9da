//! Item endpoints

use super::{error::ClientError, typed::AuthenticatedAdminClient};
use crate::types::{ItemCreate, ItemPublic, ItemUpdate, ItemsPublic, Message, Paging};
use reqwest::Method;
use uuid::Uuid;

impl AuthenticatedAdminClient {
    /// List items visible to the current user
    pub async fn list_items(&self, paging: Paging) -> Result<ItemsPublic, ClientError> {
        let req = self
            .request(Method::GET, "/items/")
            .query(&[("skip", paging.skip), ("limit", paging.limit)]);
        self.execute(req).await
    }

    pub async fn create_item(&self, body: &ItemCreate) -> Result<ItemPublic, ClientError> {
        let req = self.request(Method::POST, "/items/").json(body);
        self.execute(req).await
    }

    pub async fn read_item(&self, id: Uuid) -> Result<ItemPublic, ClientError> {
        let req = self.request(Method::GET, &format!("/items/{id}"));
        self.execute(req).await
    }

    pub async fn update_item(&self, id: Uuid, body: &ItemUpdate) -> Result<ItemPublic, ClientError> {
        let req = self.request(Method::PUT, &format!("/items/{id}")).json(body);
        self.execute(req).await
    }

    pub async fn delete_item(&self, id: Uuid) -> Result<Message, ClientError> {
        let req = self.request(Method::DELETE, &format!("/items/{id}"));
        self.execute(req).await
    }
}

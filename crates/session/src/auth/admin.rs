//! User and item management

use super::coordinator::SessionCoordinator;
use super::mutation::Mutation;
use crate::events::AppEvent;
use crate::notify::Toast;
use crate::query::QueryKey;
use fastadmin_http::ClientError;
use fastadmin_http::types::{
    ItemCreate, ItemPublic, ItemUpdate, ItemsPublic, Paging, UserCreate, UserPublic, UserUpdate,
    UsersPublic,
};
use std::rc::Rc;
use uuid::Uuid;

impl SessionCoordinator {
    /// One page of users (superusers only). `Ok(None)` while logged out.
    ///
    /// A 403 here means "not an admin", not a bad token, so it does not end
    /// the session.
    pub async fn users(&self, paging: Paging) -> Result<Option<UsersPublic>, ClientError> {
        let api = self.api();
        self.gated_query(&QueryKey::users_page(paging), move || {
            let api = Rc::clone(&api);
            async move { api.list_users(paging).await }
        })
        .await
    }

    pub async fn create_user(&self, body: UserCreate) -> Option<UserPublic> {
        let api = self.api();
        self.mutate(
            Mutation::SaveUser,
            api.create_user(&body),
            Toast::success("Success!", "User created successfully."),
            &[AppEvent::UsersChanged],
        )
        .await
    }

    pub async fn update_user(&self, id: Uuid, body: UserUpdate) -> Option<UserPublic> {
        let api = self.api();
        let updated = self
            .mutate(
                Mutation::SaveUser,
                api.update_user(id, &body),
                Toast::success("Success!", "User updated successfully."),
                &[AppEvent::UsersChanged],
            )
            .await;
        // Admins can edit themselves from the user table.
        if updated
            .as_ref()
            .zip(self.user())
            .is_some_and(|(user, me)| user.id == me.id)
        {
            self.publish(AppEvent::ProfileChanged);
        }
        updated
    }

    /// Delete a user; their items go with them
    pub async fn delete_user(&self, id: Uuid) -> bool {
        let api = self.api();
        self.mutate(
            Mutation::DeleteUser,
            api.delete_user(id),
            Toast::success("Success", "The user was deleted successfully."),
            &[AppEvent::UsersChanged, AppEvent::ItemsChanged],
        )
        .await
        .is_some()
    }

    /// One page of items visible to the user. `Ok(None)` while logged out.
    pub async fn items(&self, paging: Paging) -> Result<Option<ItemsPublic>, ClientError> {
        let api = self.api();
        self.gated_query(&QueryKey::items_page(paging), move || {
            let api = Rc::clone(&api);
            async move { api.list_items(paging).await }
        })
        .await
    }

    pub async fn create_item(&self, body: ItemCreate) -> Option<ItemPublic> {
        let api = self.api();
        self.mutate(
            Mutation::SaveItem,
            api.create_item(&body),
            Toast::success("Success!", "Item created successfully."),
            &[AppEvent::ItemsChanged],
        )
        .await
    }

    pub async fn update_item(&self, id: Uuid, body: ItemUpdate) -> Option<ItemPublic> {
        let api = self.api();
        self.mutate(
            Mutation::SaveItem,
            api.update_item(id, &body),
            Toast::success("Success!", "Item updated successfully."),
            &[AppEvent::ItemsChanged],
        )
        .await
    }

    pub async fn delete_item(&self, id: Uuid) -> bool {
        let api = self.api();
        self.mutate(
            Mutation::DeleteItem,
            api.delete_item(id),
            Toast::success("Success", "The item was deleted successfully."),
            &[AppEvent::ItemsChanged],
        )
        .await
        .is_some()
    }
}

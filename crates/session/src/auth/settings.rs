//! Self-service account operations

use super::coordinator::SessionCoordinator;
use super::errors::GENERIC_ERROR_MESSAGE;
use super::mutation::Mutation;
use crate::events::AppEvent;
use crate::navigation::Route;
use crate::notify::Toast;
use fastadmin_http::types::{Message, NewPassword, UpdatePassword, UserPublic, UserUpdateMe};

pub const SAME_PASSWORD_MESSAGE: &str = "New password cannot be the same as the current one";

impl SessionCoordinator {
    pub async fn update_profile(&self, body: UserUpdateMe) -> Option<UserPublic> {
        let api = self.api();
        self.mutate(
            Mutation::UpdateProfile,
            api.update_me(&body),
            Toast::success("Success!", "User updated successfully"),
            &[AppEvent::ProfileChanged],
        )
        .await
    }

    /// Change the password. Reusing the current one is refused without a
    /// request.
    pub async fn update_password(&self, body: UpdatePassword) -> bool {
        if body.current_password == body.new_password {
            self.notify(Toast::error(GENERIC_ERROR_MESSAGE, SAME_PASSWORD_MESSAGE));
            return false;
        }
        let api = self.api();
        self.mutate(
            Mutation::UpdatePassword,
            api.update_password(&body),
            Toast::success("Success!", "Password updated successfully."),
            &[],
        )
        .await
        .is_some()
    }

    /// Delete the logged-in account and end the session
    pub async fn delete_account(&self) -> bool {
        let api = self.api();
        let deleted = self
            .mutate(
                Mutation::DeleteAccount,
                api.delete_me(),
                Toast::success("Success", "Your account has been successfully deleted"),
                &[],
            )
            .await
            .is_some();
        if deleted {
            self.logout();
        }
        deleted
    }

    /// Ask for a password-recovery email
    pub async fn recover_password(&self, email: &str) -> Option<Message> {
        let api = self.api();
        self.mutate(
            Mutation::RecoverPassword,
            api.recover_password(email),
            Toast::success("Email sent.", "Password recovery email sent successfully."),
            &[],
        )
        .await
    }

    /// Set a new password from a recovery token, then go to login
    pub async fn reset_password(&self, body: NewPassword) -> bool {
        let api = self.api();
        let reset = self
            .mutate(
                Mutation::ResetPassword,
                api.reset_password(&body),
                Toast::success("Success!", "Password updated successfully."),
                &[],
            )
            .await
            .is_some();
        if reset {
            self.push_route(Route::Login);
        }
        reset
    }
}

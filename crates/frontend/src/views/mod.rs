//! Pages rendered by the router

mod admin;
mod dashboard;
mod items;
mod login;
mod not_found;
mod recover_password;
mod reset_password;
mod settings;
mod signup;
mod validation;

pub use admin::AdminPage;
pub use dashboard::Dashboard;
pub use items::ItemsPage;
pub use login::LoginPage;
pub use not_found::NotFoundPage;
pub use recover_password::RecoverPasswordPage;
pub use reset_password::ResetPasswordPage;
pub use settings::SettingsPage;
pub use signup::SignupPage;

//! Reusable UI components

pub mod form;
pub mod navbar;
pub mod spinner;
pub mod theme_toggle;
pub mod toasts;

pub use form::{Checkbox, TextField};
pub use navbar::Navbar;
pub use spinner::LoadingSpinner;
pub use theme_toggle::ThemeToggle;
pub use toasts::ToastStack;

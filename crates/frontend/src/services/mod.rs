//! Browser implementations of the session's outbound ports

pub mod navigator;
pub mod toasts;

pub use navigator::BrowserNavigator;
pub use toasts::ToastSink;

//! Custom hooks for the application

pub mod use_display;
pub mod use_query;

pub use use_display::use_display;
pub use use_query::{QueryState, use_session_query};

//! fastadmin core types and utilities

pub mod config;
pub mod error;
pub mod logging;

pub use config::{AppConfig, QueryConfig, ValidateConfig};
pub use error::{CoreError, CoreResult, ErrorContext};

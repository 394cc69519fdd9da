//! Authentication session and the mutations that hang off it

mod admin;
mod coordinator;
mod errors;
mod mutation;
mod settings;

pub use coordinator::{SessionCoordinator, SessionCoordinatorBuilder};
pub use errors::{GENERIC_ERROR_MESSAGE, error_detail};
pub use mutation::Mutation;
pub use settings::SAME_PASSWORD_MESSAGE;

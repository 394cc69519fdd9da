//! Query cache, keys and retry policy

mod cache;
mod key;
mod retry;

pub use cache::{QueryClient, QueryStatus};
pub use key::QueryKey;
pub use retry::{RetryPolicy, retry_with_policy};

//! Session and query-cache coordination for the fastadmin frontend
//!
//! Everything in this crate is headless: storage, navigation and
//! notifications are traits, so the same coordinator runs in the browser
//! (see `fastadmin-frontend`) and in native tests.
//!
//! The model is single-threaded. Shared state lives behind `Rc`/`RefCell`,
//! observers run synchronously inside the operation that triggers them, and
//! futures are `!Send`.

pub mod api;
pub mod auth;
pub mod clock;
pub mod display;
pub mod events;
pub mod gate;
pub mod navigation;
pub mod notify;
pub mod query;
pub mod storage;
pub mod testing;
pub mod theme;
pub mod token;

pub use api::{HttpSessionApi, SessionApi};
pub use auth::{GENERIC_ERROR_MESSAGE, Mutation, SessionCoordinator, SessionCoordinatorBuilder, error_detail};
pub use clock::{Clock, ManualClock, SystemClock};
pub use display::{Breakpoint, Display, DisplayOptions, MobileBreakpoint, Platform, Thresholds};
pub use events::{AppEvent, EventBus, Listeners, Subscription};
pub use gate::SessionGate;
pub use navigation::{GuardDecision, Navigator, Route, RouteGuard};
pub use notify::{Notifier, Severity, Toast};
pub use query::{QueryClient, QueryKey, QueryStatus, RetryPolicy};
pub use storage::{FallbackStorage, KeyValueStorage, MemoryStorage, StorageError};
pub use theme::{COLOR_MODE_KEY, ColorMode, ThemeStore};
pub use token::{ACCESS_TOKEN_KEY, TokenStore};

pub mod cycle;
pub mod event;
pub mod provider;
pub mod record;

pub use cycle::run_cycle;
pub use event::FetchEvent;
pub use provider::{FetchError, FetchProvider};
pub use record::{FetchResult, Record};

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

//! Time utilities
//!
//! - **[`timer`]**: cancellable one-shot timers
//! - **[`debounce`]**: coalesce bursts of calls into one trailing call
//!
//! ## Usage
//!
//! ```no_run
//! use std::time::Duration;
//!
//! use seller_console_common::time::Debouncer;
//!
//! #[tokio::main]
//! async fn main() {
//!     let search = Debouncer::new(Duration::from_millis(300), |query: String| {
//!         println!("searching for {query}");
//!     });
//!     search.call("a".to_string());
//!     search.call("ac".to_string()); // only this one fires
//! }
//! ```

pub mod debounce;
pub mod timer;

// Re-export commonly used items
pub use debounce::Debouncer;
pub use timer::{after, TimerHandle};

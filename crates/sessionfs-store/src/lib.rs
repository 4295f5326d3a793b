//! File-based session storage for sessionfs.
//!
//! Each session is one file directly under the save directory, named after
//! the key prefix and the session ID. The body is the raw payload:
//!
//! ```text
//! {save_path}/
//! ├── session:abc123
//! ├── session:f00dcafe
//! └── ...
//! ```
//!
//! The [`SessionHandler`] contract reports outcomes as `bool` / `Option`
//! only. Read, write and destroy timings go to an injected
//! [`MetricsCollector`](sessionfs_monitor::MetricsCollector).

mod error;
mod file_store;
mod handler;

pub use error::SessionStoreError;
pub use file_store::{FileSessionStore, KEY_PREFIX};
pub use handler::SessionHandler;

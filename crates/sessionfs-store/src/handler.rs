//! Session handler contract.

use async_trait::async_trait;
use std::path::Path;

/// Storage contract consumed by a host session lifecycle.
///
/// Every call completes its I/O before returning. Failures are reported only
/// through the return value: `false` means the call did not take effect and
/// `None` from [`read`](Self::read) means there is no data for the session.
#[async_trait]
pub trait SessionHandler: Send + Sync {
    /// Prepare storage under `save_path` for the named session cookie.
    async fn open(&self, save_path: &Path, session_name: &str) -> bool;

    /// Release per-request resources.
    async fn close(&self) -> bool;

    /// Load the stored payload, or `None` for a cold session.
    async fn read(&self, session_id: &str) -> Option<Vec<u8>>;

    /// Replace the stored payload.
    async fn write(&self, session_id: &str, data: &[u8]) -> bool;

    /// Remove the stored payload.
    async fn destroy(&self, session_id: &str) -> bool;

    /// Remove every session last modified more than `max_lifetime` seconds ago.
    async fn gc(&self, max_lifetime: i64) -> bool;
}

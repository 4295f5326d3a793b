//! File-per-session store.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use parking_lot::RwLock;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Instant, SystemTime};
use tokio::fs;
use tracing::{debug, info, warn};

use sessionfs_monitor::{
    MetricsCollector, METRIC_SESSION_DELETE_TIME, METRIC_SESSION_READ_TIME,
    METRIC_SESSION_WRITE_TIME,
};

use crate::error::SessionStoreError;
use crate::handler::SessionHandler;

/// Prefix of every session file name.
pub const KEY_PREFIX: &str = "session:";

/// Session store keeping one file per session under a save directory.
///
/// The store holds no session state of its own. Concurrent writers to the
/// same session ID race on the file; the last write the filesystem applies
/// wins.
pub struct FileSessionStore {
    /// Active save directory, replaced on every `open`.
    save_path: RwLock<PathBuf>,
    /// Session lifetime in seconds. Informational only; gc takes its own.
    lifetime: u64,
    metrics: Arc<dyn MetricsCollector>,
}

impl FileSessionStore {
    /// Create a store rooted at `save_path`.
    ///
    /// Nothing touches the filesystem until the first operation; the
    /// directory is created by [`SessionHandler::open`].
    pub fn new(
        save_path: impl Into<PathBuf>,
        lifetime: u64,
        metrics: Arc<dyn MetricsCollector>,
    ) -> Self {
        Self {
            save_path: RwLock::new(save_path.into()),
            lifetime,
            metrics,
        }
    }

    /// Current save directory.
    pub fn save_path(&self) -> PathBuf {
        self.save_path.read().clone()
    }

    /// Lifetime passed at construction, in seconds.
    pub fn lifetime(&self) -> u64 {
        self.lifetime
    }

    /// File backing `session_id`.
    pub fn session_path(&self, session_id: &str) -> PathBuf {
        self.save_path
            .read()
            .join(format!("{}{}", KEY_PREFIX, session_id))
    }

    /// Delete every session file whose modification time plus
    /// `max_lifetime` seconds lies in the past.
    ///
    /// Returns the number of files removed. A missing save directory holds
    /// no sessions and sweeps nothing.
    pub async fn sweep_expired(&self, max_lifetime: i64) -> Result<usize, SessionStoreError> {
        let save_path = self.save_path();

        let mut entries = match fs::read_dir(&save_path).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let now = Utc::now();
        let mut removed = 0;

        while let Some(entry) = entries.next_entry().await? {
            let file_name = entry.file_name();
            let Some(name) = file_name.to_str() else {
                continue;
            };
            if !name.starts_with(KEY_PREFIX) {
                continue;
            }

            let modified = match entry.metadata().await.and_then(|m| {
                if m.is_file() {
                    m.modified().map(Some)
                } else {
                    Ok(None)
                }
            }) {
                Ok(Some(modified)) => modified,
                Ok(None) => continue,
                Err(e) => {
                    debug!("Skipping {:?} during gc: {}", entry.path(), e);
                    continue;
                }
            };

            if !is_expired(modified, max_lifetime, now) {
                continue;
            }

            // Another request may have destroyed it since the listing.
            let path = entry.path();
            if !fs::try_exists(&path).await.unwrap_or(false) {
                continue;
            }

            match fs::remove_file(&path).await {
                Ok(()) => removed += 1,
                Err(e) if e.kind() == ErrorKind::NotFound => {}
                Err(e) => warn!("Failed to remove expired session file {:?}: {}", path, e),
            }
        }

        if removed > 0 {
            info!("Garbage collected {} expired session(s) from {:?}", removed, save_path);
        }

        Ok(removed)
    }

    /// Create the save directory (mode 0775) when it is missing.
    async fn ensure_save_dir(&self) -> Result<(), SessionStoreError> {
        let path = self.save_path();

        if fs::metadata(&path).await.map(|m| m.is_dir()).unwrap_or(false) {
            return Ok(());
        }

        let mut builder = fs::DirBuilder::new();
        builder.recursive(true);
        #[cfg(unix)]
        builder.mode(0o775);

        builder
            .create(&path)
            .await
            .map_err(|e| SessionStoreError::CreateDirFailed {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        info!("Created session save directory: {:?}", path);
        Ok(())
    }

    async fn write_session(&self, session_id: &str, data: &[u8]) -> Result<usize, SessionStoreError> {
        if data.is_empty() {
            return Err(SessionStoreError::EmptyPayload(session_id.to_string()));
        }

        let path = self.session_path(session_id);
        let started = Instant::now();
        let result = fs::write(&path, data).await;
        self.record(METRIC_SESSION_WRITE_TIME, started);
        result?;

        debug!("Wrote {} bytes for session '{}'", data.len(), session_id);
        Ok(data.len())
    }

    async fn remove_session(&self, session_id: &str) -> Result<(), SessionStoreError> {
        let path = self.session_path(session_id);
        if !fs::try_exists(&path).await.unwrap_or(false) {
            return Err(SessionStoreError::NotFound(session_id.to_string()));
        }

        let started = Instant::now();
        if let Err(e) = fs::remove_file(&path).await {
            warn!("Failed to remove session file {:?}: {}", path, e);
        }
        self.record(METRIC_SESSION_DELETE_TIME, started);

        debug!("Destroyed session '{}'", session_id);
        Ok(())
    }

    fn record(&self, metric: &str, started: Instant) {
        self.metrics
            .add_custom_metric(metric, started.elapsed().as_secs_f64());
    }
}

/// Whether a file modified at `modified` has outlived `max_lifetime` seconds.
fn is_expired(modified: SystemTime, max_lifetime: i64, now: DateTime<Utc>) -> bool {
    let modified: DateTime<Utc> = modified.into();
    match Duration::try_seconds(max_lifetime).and_then(|d| modified.checked_add_signed(d)) {
        Some(expires_at) => expires_at < now,
        // Out of range: only a hugely negative lifetime expires everything.
        None => max_lifetime < 0,
    }
}

#[async_trait]
impl SessionHandler for FileSessionStore {
    async fn open(&self, save_path: &Path, session_name: &str) -> bool {
        *self.save_path.write() = save_path.to_path_buf();

        if let Err(e) = self.ensure_save_dir().await {
            warn!("{}", e);
        }

        debug!("Opened session store '{}' at {:?}", session_name, save_path);
        true
    }

    async fn close(&self) -> bool {
        true
    }

    async fn read(&self, session_id: &str) -> Option<Vec<u8>> {
        let started = Instant::now();
        let path = self.session_path(session_id);

        if !fs::try_exists(&path).await.unwrap_or(false) {
            debug!("No stored data for session '{}'", session_id);
            return None;
        }

        let content = fs::read(&path).await;
        self.record(METRIC_SESSION_READ_TIME, started);

        match content {
            Ok(content) => Some(content),
            Err(e) => {
                warn!("Failed to read session file {:?}: {}", path, e);
                None
            }
        }
    }

    async fn write(&self, session_id: &str, data: &[u8]) -> bool {
        match self.write_session(session_id, data).await {
            Ok(written) => written > 0,
            Err(e @ SessionStoreError::EmptyPayload(_)) => {
                debug!("{}", e);
                false
            }
            Err(e) => {
                warn!("Failed to write session '{}': {}", session_id, e);
                false
            }
        }
    }

    async fn destroy(&self, session_id: &str) -> bool {
        match self.remove_session(session_id).await {
            Ok(()) => true,
            Err(e) => {
                debug!("{}", e);
                false
            }
        }
    }

    async fn gc(&self, max_lifetime: i64) -> bool {
        if let Err(e) = self.sweep_expired(max_lifetime).await {
            warn!("Session garbage collection stopped early: {}", e);
        }
        true
    }
}

#[cfg(test)]
#[path = "file_store_tests.rs"]
mod tests;

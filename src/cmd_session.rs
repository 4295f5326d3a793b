//! Session command handlers.

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tracing::info;

use sessionfs_config::Config;
use sessionfs_store::{FileSessionStore, SessionHandler};

use crate::cli::Commands;

/// Session name passed to `open`; the file store ignores it.
const SESSION_NAME: &str = "SESSIONFS";

/// Run one command inside an open/close pair.
///
/// Returns the handler's verdict: `false` for a read miss or a rejected
/// write or destroy.
pub(crate) async fn run(
    store: &FileSessionStore,
    config: &Config,
    command: Commands,
) -> Result<bool, Box<dyn std::error::Error>> {
    let save_path = store.save_path();
    store.open(&save_path, SESSION_NAME).await;

    let outcome = match command {
        Commands::Read { session_id } => match store.read(&session_id).await {
            Some(data) => {
                let mut stdout = tokio::io::stdout();
                stdout.write_all(&data).await?;
                stdout.flush().await?;
                true
            }
            None => {
                info!("No data for session '{}'", session_id);
                false
            }
        },
        Commands::Write { session_id, data } => {
            let payload = match data {
                Some(data) => data.into_bytes(),
                None => {
                    let mut buf = Vec::new();
                    tokio::io::stdin().read_to_end(&mut buf).await?;
                    buf
                }
            };
            let written = store.write(&session_id, &payload).await;
            if !written {
                info!("Session '{}' was not written", session_id);
            }
            written
        }
        Commands::Destroy { session_id } => {
            let destroyed = store.destroy(&session_id).await;
            if !destroyed {
                info!("Session '{}' does not exist", session_id);
            }
            destroyed
        }
        Commands::Gc { max_lifetime } => {
            let max_lifetime = max_lifetime
                .unwrap_or_else(|| i64::try_from(config.session.gc_max_lifetime).unwrap_or(i64::MAX));
            let removed = store.sweep_expired(max_lifetime).await?;
            println!("{}", removed);
            true
        }
    };

    store.close().await;
    Ok(outcome)
}

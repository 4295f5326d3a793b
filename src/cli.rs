//! CLI definitions for sessionfs.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sessionfs CLI.
#[derive(Parser)]
#[command(name = "sessionfs")]
#[command(about = "File-per-session backing store")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path (default: ~/.sessionfs/config.toml if present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Save directory, overriding session.save_path
    #[arg(short, long, global = true, env = "SESSIONFS_SAVE_PATH")]
    pub save_path: Option<PathBuf>,

    /// Print collected timings in Prometheus format to stderr when done
    #[arg(long, global = true)]
    pub print_metrics: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Print a session's payload to stdout
    Read {
        /// Session ID
        session_id: String,
    },

    /// Store a session's payload
    Write {
        /// Session ID
        session_id: String,

        /// Payload (read from stdin when omitted)
        data: Option<String>,
    },

    /// Delete a session
    Destroy {
        /// Session ID
        session_id: String,
    },

    /// Delete sessions not modified within the max lifetime
    Gc {
        /// Max lifetime in seconds (default: session.gc_max_lifetime)
        #[arg(long, allow_negative_numbers = true)]
        max_lifetime: Option<i64>,
    },
}

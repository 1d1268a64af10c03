//! Error types
//!
//! Every variant is fatal and local to startup or shutdown. Per-request
//! conditions are never errors; they are dispatch outcomes.

use std::io;
use std::net::SocketAddr;
use std::path::PathBuf;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {0}")]
    Config(#[from] config::ConfigError),

    #[error("{op}() failed for {}: {source}", path.display())]
    Io {
        path: PathBuf,
        op: &'static str,
        #[source]
        source: io::Error,
    },

    #[error("Failed to read {expected} bytes from {} (got {actual})", path.display())]
    TruncatedRead {
        path: PathBuf,
        expected: u64,
        actual: u64,
    },

    #[error("failed to start server on {addr}: {source}")]
    ServerStart {
        addr: SocketAddr,
        #[source]
        source: io::Error,
    },

    #[error("failed to wait for a shutdown signal: {0}")]
    SignalWait(#[source] io::Error),

    #[error("failed to build async runtime: {0}")]
    Runtime(#[source] io::Error),
}

impl Error {
    /// Process exit status for this error. Code 2 is left to clap usage errors.
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Config(_) => 3,
            Self::Io { .. } => 4,
            Self::TruncatedRead { .. } => 5,
            Self::ServerStart { .. } => 6,
            Self::SignalWait(_) => 7,
            Self::Runtime(_) => 8,
        }
    }

    /// Underlying OS error kind, if the failure came from the OS.
    pub fn io_kind(&self) -> Option<io::ErrorKind> {
        match self {
            Self::Io { source, .. }
            | Self::ServerStart { source, .. }
            | Self::SignalWait(source)
            | Self::Runtime(source) => Some(source.kind()),
            Self::Config(_) | Self::TruncatedRead { .. } => None,
        }
    }
}

//! Error types for the session layer.

use std::path::PathBuf;

use fieldwar_protocol::ProtocolError;
use fieldwar_transport::TransportError;

/// Errors that can occur while reading or writing persisted session data.
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    /// Reading, writing, or renaming the state file failed.
    #[error("storage I/O on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The state file exists but isn't a JSON object of strings.
    #[error("corrupt state file {path}: {source}")]
    Corrupt {
        path: PathBuf,
        #[source]
        source: ProtocolError,
    },

    /// The entries couldn't be serialized for writing.
    #[error("failed to encode state for {path}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: ProtocolError,
    },

    /// No per-user data directory could be determined for this platform.
    #[error("no data directory available for the state file")]
    NoDataDir,
}

/// Errors returned by session actions.
///
/// A failed `verify_token` is deliberately absent: that failure is
/// absorbed by logging the player out.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// The remote call failed. State is unchanged.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The remote call succeeded but persisting the result failed.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The action needs a token and the session has none.
    #[error("not logged in")]
    NotLoggedIn,

    /// A configuration value couldn't be parsed.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The session actor has stopped, so the command can't be delivered.
    #[error("session actor is unavailable")]
    Unavailable,
}

//! Unified error type for the Fieldwar client.

use fieldwar_protocol::ProtocolError;
use fieldwar_session::{SessionError, StorageError};
use fieldwar_transport::TransportError;

/// Top-level error that wraps every layer's error.
///
/// Applications built on the `fieldwar` crate can return this one type
/// from `main` and use `?` on calls into any layer: each variant has a
/// generated `From` impl.
#[derive(Debug, thiserror::Error)]
pub enum FieldwarError {
    /// Building or reading a request/response body failed.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),

    /// The HTTP exchange failed or the server rejected it.
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A session action failed (not logged in, actor stopped, ...).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// The local state file couldn't be read or written.
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// The logging subscriber couldn't be installed.
    #[error("failed to initialize logging: {0}")]
    Logging(String),
}

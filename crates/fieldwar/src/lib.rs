//! # Fieldwar
//!
//! Client library for Fieldwar, a multiplayer game where players claim
//! fields on a shared map of one million cells.
//!
//! The server speaks two APIs, REST and GraphQL. This crate keeps one
//! login session, lets the player pick which API every action goes
//! through, and remembers both the token and the choice across restarts.
//!
//! ## Layers
//!
//! ```text
//! fieldwar            ← this crate: re-exports, FieldwarError, logging
//! fieldwar-session    ← SessionStore, SessionHandle, storage
//! fieldwar-transport  ← RestTransport, GraphQlTransport, PublicApi
//! fieldwar-protocol   ← Mode, Token, FieldId, request/response bodies
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use fieldwar::prelude::*;
//!
//! # async fn run() -> Result<(), FieldwarError> {
//! let mut store = SessionStore::<JsonFileStore>::builder()
//!     .base_url("http://127.0.0.1:8971")
//!     .open(JsonFileStore::open_default()?)?;
//!
//! // A token from last time counts only once the server confirms it.
//! store.verify_token().await;
//! if !store.is_logged_in() {
//!     store.login("alice", "hunter2").await?;
//! }
//!
//! store.set_mode(Mode::Graphql)?;
//! store.conquer(FieldId(42)).await?;
//! # Ok(())
//! # }
//! ```

mod error;
pub mod logging;

pub use error::FieldwarError;

pub use fieldwar_protocol as protocol;
pub use fieldwar_session as session;
pub use fieldwar_transport as transport;

/// The types most applications need, in one import.
pub mod prelude {
    pub use crate::FieldwarError;
    pub use fieldwar_protocol::{FIELD_COUNT, FieldId, Mode, Score, Token, User};
    pub use fieldwar_session::{
        ClientConfig, JsonFileStore, KeyValueStore, MemoryStore, SessionError,
        SessionHandle, SessionSnapshot, SessionStore,
    };
    pub use fieldwar_transport::{PublicApi, TransportError};
}

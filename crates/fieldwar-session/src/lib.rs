//! Session management for Fieldwar clients.
//!
//! This crate owns everything the client remembers between actions:
//!
//! 1. **State**: the token, the username, the active [`Mode`]
//!    ([`SessionStore`])
//! 2. **Persistence**: restoring and saving token and mode through a
//!    [`KeyValueStore`] ([`MemoryStore`], [`JsonFileStore`])
//! 3. **Coordination**: a single-writer actor ([`SessionHandle`]) for
//!    callers that share one session across tasks
//!
//! # How it fits in the stack
//!
//! ```text
//! UI / CLI (above)          ← calls actions, renders SessionSnapshot
//!     ↕
//! Session (this crate)      ← state + persistence + mode selection
//!     ↕
//! Transport (below)         ← REST or GraphQL over HTTP
//! ```
//!
//! [`Mode`]: fieldwar_protocol::Mode

mod actor;
mod config;
mod error;
pub mod storage;
mod store;

pub use actor::SessionHandle;
pub use config::{ClientConfig, SessionSnapshot};
pub use error::{SessionError, StorageError};
pub use storage::{JsonFileStore, KeyValueStore, MemoryStore};
pub use store::{SessionStore, SessionStoreBuilder};

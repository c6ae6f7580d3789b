//! Wire protocol for Fieldwar.
//!
//! This crate defines what the client and the game server say to each
//! other, independent of how the bytes get there:
//!
//! - **Types** ([`Mode`], [`Token`], [`FieldId`], [`Credentials`], and the
//!   REST response bodies) in the server's exact JSON casing.
//! - **GraphQL** ([`GraphQlRequest`], [`GraphQlResponse`]): parameterized
//!   mutation documents and the standard response envelope.
//! - **JSON helpers** ([`json`]): encode/decode with direction-tagged errors.
//! - **Errors** ([`ProtocolError`]).
//!
//! ```text
//! Session (state) → Transport (HTTP) → Protocol (bodies) → server
//! ```

mod error;
mod graphql;
pub mod json;
mod types;

pub use error::ProtocolError;
pub use graphql::{
    CONQUER_MUTATION, ConquerVariables, GraphQlError, GraphQlRequest,
    GraphQlResponse, IgnoredData, LOGIN_MUTATION, LoginData,
    REGISTER_MUTATION,
};
pub use types::{
    ConqueredFieldsResponse, Credentials, ErrorBody, FIELD_COUNT, Field,
    FieldId, GameMap, MeResponse, Mode, Owner, Score, ScoreboardResponse,
    Token, TokenResponse, User, UserListResponse,
};

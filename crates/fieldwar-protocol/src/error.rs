//! Error types for the protocol layer.
//!
//! Each Fieldwar crate defines its own error enum. A `ProtocolError`
//! always means the problem is in the shape of the data (bad JSON, an
//! unknown mode name, a GraphQL payload missing its field), never in the
//! network or in local storage.

/// Errors that can occur while encoding or decoding API payloads.
#[derive(Debug, thiserror::Error)]
pub enum ProtocolError {
    /// Serialization failed (turning a Rust value into a request body).
    #[error("encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Deserialization failed (turning a response body into a Rust value).
    ///
    /// Common causes: the server answered with HTML instead of JSON, a
    /// required field is missing, or a field has the wrong type.
    #[error("decode failed: {0}")]
    Decode(#[source] serde_json::Error),

    /// A mode name that is neither `restful` nor `graphql`.
    ///
    /// The store can only ever hold a recognized mode, so this error is
    /// raised at parse time instead of surfacing later as a silent no-op.
    #[error("unknown API mode: {0:?}")]
    UnknownMode(String),

    /// A GraphQL response carried neither errors nor the expected field.
    #[error("GraphQL response has no data for `{0}`")]
    MissingData(&'static str),
}

use fieldwar_protocol::ProtocolError;

/// Errors that can occur while talking to the game API.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// The base URL isn't an `http://` or `https://` URL.
    #[error("invalid base URL: {0:?}")]
    InvalidBaseUrl(String),

    /// The request never got a response (DNS, connect, TLS, body read).
    #[error("request failed: {0}")]
    Request(#[source] reqwest::Error),

    /// The server didn't answer within the configured timeout.
    #[error("request timed out")]
    Timeout,

    /// The server rejected the credentials or the token (HTTP 401).
    #[error("unauthorized: {0}")]
    Unauthorized(String),

    /// Any other non-2xx status, with the server's `error` message.
    #[error("server returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The GraphQL endpoint answered with a non-empty `errors` array.
    #[error("GraphQL errors: {}", .0.join("; "))]
    GraphQl(Vec<String>),

    /// The response body didn't have the expected shape.
    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

impl From<reqwest::Error> for TransportError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            TransportError::Timeout
        } else {
            TransportError::Request(err)
        }
    }
}

impl TransportError {
    /// `true` when the server says the credential itself is bad, as
    /// opposed to the request failing for some other reason.
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, TransportError::Unauthorized(_))
    }
}

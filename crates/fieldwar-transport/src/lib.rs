//! Transport layer for Fieldwar.
//!
//! Provides the [`Transport`] trait: the four session actions (login,
//! register, conquer, verify) that every API style must support. Two
//! implementations exist, [`RestTransport`] and [`GraphQlTransport`], and
//! [`ApiTransport`] picks one of them from a [`Mode`].
//!
//! Because `ApiTransport` is a closed enum, "which API do we call?" is a
//! `match` the compiler checks for exhaustiveness. There is no way to end
//! up with a mode that no transport handles.
//!
//! Read-only game data (scoreboard, map) lives in [`PublicApi`].

#![allow(async_fn_in_trait)]

mod error;
mod graphql;
mod http;
mod public;
mod rest;

pub use error::TransportError;
pub use graphql::GraphQlTransport;
pub use http::HttpApi;
pub use public::PublicApi;
pub use rest::RestTransport;

use fieldwar_protocol::{Credentials, FieldId, Mode, Token};

/// Credential header read by the REST routes and by `GET /me`.
pub const REST_TOKEN_HEADER: &str = "X-API-TOKEN";

/// Credential header read by the GraphQL endpoint.
pub const GRAPHQL_TOKEN_HEADER: &str = "X-Api-Token";

/// One API style's implementation of the session actions.
pub trait Transport: Send + Sync {
    /// The mode this transport implements.
    fn mode(&self) -> Mode;

    /// Exchanges credentials for a session token.
    async fn login(&self, credentials: &Credentials) -> Result<Token, TransportError>;

    /// Creates an account. The server's reply carries nothing useful.
    async fn register(&self, credentials: &Credentials) -> Result<(), TransportError>;

    /// Claims `field` for the player owning `token`.
    async fn conquer(&self, token: &Token, field: FieldId) -> Result<(), TransportError>;

    /// Asks the server who `token` belongs to and returns the username.
    async fn verify(&self, token: &Token) -> Result<String, TransportError>;
}

/// The transport for the currently selected mode.
#[derive(Debug, Clone)]
pub enum ApiTransport {
    Rest(RestTransport),
    Graphql(GraphQlTransport),
}

impl ApiTransport {
    /// Builds the transport matching `mode` on top of `http`.
    pub fn for_mode(mode: Mode, http: HttpApi) -> Self {
        match mode {
            Mode::Restful => ApiTransport::Rest(RestTransport::new(http)),
            Mode::Graphql => ApiTransport::Graphql(GraphQlTransport::new(http)),
        }
    }

    /// The shared HTTP client, for building a sibling transport.
    pub fn http(&self) -> &HttpApi {
        match self {
            ApiTransport::Rest(t) => t.http(),
            ApiTransport::Graphql(t) => t.http(),
        }
    }
}

impl Transport for ApiTransport {
    fn mode(&self) -> Mode {
        match self {
            ApiTransport::Rest(t) => t.mode(),
            ApiTransport::Graphql(t) => t.mode(),
        }
    }

    async fn login(&self, credentials: &Credentials) -> Result<Token, TransportError> {
        match self {
            ApiTransport::Rest(t) => t.login(credentials).await,
            ApiTransport::Graphql(t) => t.login(credentials).await,
        }
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), TransportError> {
        match self {
            ApiTransport::Rest(t) => t.register(credentials).await,
            ApiTransport::Graphql(t) => t.register(credentials).await,
        }
    }

    async fn conquer(&self, token: &Token, field: FieldId) -> Result<(), TransportError> {
        match self {
            ApiTransport::Rest(t) => t.conquer(token, field).await,
            ApiTransport::Graphql(t) => t.conquer(token, field).await,
        }
    }

    async fn verify(&self, token: &Token) -> Result<String, TransportError> {
        match self {
            ApiTransport::Rest(t) => t.verify(token).await,
            ApiTransport::Graphql(t) => t.verify(token).await,
        }
    }
}

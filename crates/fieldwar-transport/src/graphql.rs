//! GraphQL transport: parameterized mutations posted to `/graphql`.

use fieldwar_protocol::{
    Credentials, FieldId, GraphQlRequest, GraphQlResponse, IgnoredData,
    LoginData, Mode, Token, json,
};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{GRAPHQL_TOKEN_HEADER, HttpApi, Transport, TransportError};

const GRAPHQL_PATH: &str = "/graphql";

/// Talks to the single `/graphql` endpoint.
///
/// The server reads the conquer token from `X-Api-Token`, not from the
/// REST spelling. The identity check still goes through `GET /me`, which
/// is shared by every mode.
#[derive(Debug, Clone)]
pub struct GraphQlTransport {
    http: HttpApi,
}

impl GraphQlTransport {
    pub fn new(http: HttpApi) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpApi {
        &self.http
    }

    /// Posts one operation and unwraps its `data`.
    ///
    /// A non-empty `errors` array wins over any partial `data`.
    async fn execute<V, T>(
        &self,
        request: &GraphQlRequest<V>,
        token: Option<&Token>,
    ) -> Result<T, TransportError>
    where
        V: Serialize,
        T: DeserializeOwned,
    {
        let auth = token.map(|t| (GRAPHQL_TOKEN_HEADER, t));
        let body = self.http.post_json(GRAPHQL_PATH, request, auth).await?;
        let response: GraphQlResponse<T> = json::decode(&body)?;
        if !response.errors.is_empty() {
            return Err(TransportError::GraphQl(response.error_messages()));
        }
        Ok(response.take_data(request.operation_name)?)
    }
}

impl Transport for GraphQlTransport {
    fn mode(&self) -> Mode {
        Mode::Graphql
    }

    async fn login(&self, credentials: &Credentials) -> Result<Token, TransportError> {
        let data: LoginData = self
            .execute(&GraphQlRequest::login(credentials), None)
            .await?;
        Ok(data.login)
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), TransportError> {
        let _: IgnoredData = self
            .execute(&GraphQlRequest::register(credentials), None)
            .await?;
        Ok(())
    }

    async fn conquer(&self, token: &Token, field: FieldId) -> Result<(), TransportError> {
        let _: IgnoredData = self
            .execute(&GraphQlRequest::conquer(field), Some(token))
            .await?;
        Ok(())
    }

    async fn verify(&self, token: &Token) -> Result<String, TransportError> {
        self.http.who_am_i(token).await
    }
}

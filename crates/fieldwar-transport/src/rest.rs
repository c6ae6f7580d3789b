//! REST transport: JSON bodies on routes under `/api/v1`.

use fieldwar_protocol::{Credentials, FieldId, Mode, Token, TokenResponse, json};

use crate::{HttpApi, REST_TOKEN_HEADER, Transport, TransportError};

/// Talks to the `/api/v1` routes.
///
/// | action   | request                                   |
/// |----------|-------------------------------------------|
/// | login    | `POST /api/v1/login` `{username,password}` |
/// | register | `POST /api/v1/register` same body         |
/// | conquer  | `POST /api/v1/conquer/{id}` `{}` + token  |
/// | verify   | `GET /me` + token                         |
#[derive(Debug, Clone)]
pub struct RestTransport {
    http: HttpApi,
}

impl RestTransport {
    pub fn new(http: HttpApi) -> Self {
        Self { http }
    }

    pub fn http(&self) -> &HttpApi {
        &self.http
    }
}

impl Transport for RestTransport {
    fn mode(&self) -> Mode {
        Mode::Restful
    }

    async fn login(&self, credentials: &Credentials) -> Result<Token, TransportError> {
        let body = self
            .http
            .post_json("/api/v1/login", credentials, None)
            .await?;
        let response: TokenResponse = json::decode(&body)?;
        Ok(response.token)
    }

    async fn register(&self, credentials: &Credentials) -> Result<(), TransportError> {
        self.http
            .post_json("/api/v1/register", credentials, None)
            .await?;
        Ok(())
    }

    async fn conquer(&self, token: &Token, field: FieldId) -> Result<(), TransportError> {
        let path = format!("/api/v1/conquer/{}", field.0);
        self.http
            .post_json(
                &path,
                &serde_json::json!({}),
                Some((REST_TOKEN_HEADER, token)),
            )
            .await?;
        Ok(())
    }

    async fn verify(&self, token: &Token) -> Result<String, TransportError> {
        self.http.who_am_i(token).await
    }
}

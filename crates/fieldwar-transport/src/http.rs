//! Shared HTTP plumbing: one `reqwest::Client`, one base URL.
//!
//! Both transports and the public API go through [`HttpApi`], so status
//! handling, timeouts, and request logging behave the same everywhere.

use std::time::Duration;

use fieldwar_protocol::{ErrorBody, MeResponse, Token, json};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::{REST_TOKEN_HEADER, TransportError};

/// A configured HTTP client bound to the game server's base URL.
///
/// Cheap to clone: `reqwest::Client` is reference-counted internally, so
/// switching transports reuses the same connection pool.
#[derive(Debug, Clone)]
pub struct HttpApi {
    client: reqwest::Client,
    base_url: String,
}

impl HttpApi {
    /// Builds a client for `base_url` with a per-request timeout.
    ///
    /// A trailing `/` on the base URL is ignored.
    ///
    /// # Errors
    /// [`TransportError::InvalidBaseUrl`] unless the URL starts with
    /// `http://` or `https://`.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, TransportError> {
        let base_url = base_url.trim_end_matches('/');
        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(TransportError::InvalidBaseUrl(base_url.to_string()));
        }
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Starts a request to `path` (which must begin with `/`).
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        tracing::debug!(%method, path, "sending request");
        self.client.request(method, format!("{}{}", self.base_url, path))
    }

    /// Sends a request and returns the raw body of a 2xx response.
    ///
    /// 401 becomes [`TransportError::Unauthorized`]; any other non-2xx
    /// status becomes [`TransportError::Status`] carrying the server's
    /// `{"error": ...}` message (or the raw body if it isn't JSON).
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Vec<u8>, TransportError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.bytes().await?;

        if status.is_success() {
            return Ok(body.to_vec());
        }

        let message = json::decode::<ErrorBody>(&body)
            .map(|b| b.error)
            .unwrap_or_else(|_| String::from_utf8_lossy(&body).into_owned());
        tracing::debug!(status = status.as_u16(), %message, "request rejected");

        if status == StatusCode::UNAUTHORIZED {
            Err(TransportError::Unauthorized(message))
        } else {
            Err(TransportError::Status {
                status: status.as_u16(),
                message,
            })
        }
    }

    /// `GET path`, decoding the JSON response.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&Token>,
    ) -> Result<T, TransportError> {
        let mut request = self.request(Method::GET, path);
        if let Some(token) = token {
            request = request.header(REST_TOKEN_HEADER, token.as_str());
        }
        let body = self.send(request).await?;
        Ok(json::decode(&body)?)
    }

    /// `POST path` with a JSON body, returning the raw response body.
    pub(crate) async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        auth: Option<(&'static str, &Token)>,
    ) -> Result<Vec<u8>, TransportError> {
        let mut request = self.request(Method::POST, path).json(body);
        if let Some((header, token)) = auth {
            request = request.header(header, token.as_str());
        }
        self.send(request).await
    }

    /// The "who am I" check shared by every mode: `GET /me`.
    pub(crate) async fn who_am_i(&self, token: &Token) -> Result<String, TransportError> {
        let me: MeResponse = self.get_json("/me", Some(token)).await?;
        Ok(me.username)
    }
}

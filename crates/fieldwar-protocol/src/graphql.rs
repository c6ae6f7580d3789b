//! GraphQL request and response envelopes.
//!
//! Every operation is a fixed document with `$variables`. User input only
//! ever travels in the `variables` object, so a username containing `"`
//! or `}` can't change the shape of the mutation.
//!
//! ```text
//! POST /graphql
//! {
//!   "query": "mutation Login($username: String!, $password: String!) { ... }",
//!   "operationName": "Login",
//!   "variables": { "username": "alice", "password": "..." }
//! }
//! ```

use serde::de::IgnoredAny;
use serde::{Deserialize, Serialize};

use crate::{Credentials, FieldId, ProtocolError, Token};

/// Login mutation. Resolves to the session token.
pub const LOGIN_MUTATION: &str = "mutation Login($username: String!, $password: String!) { login(username: $username, password: $password) }";

/// Register mutation. The result value is not used.
pub const REGISTER_MUTATION: &str = "mutation Register($username: String!, $password: String!) { register(username: $username, password: $password) }";

/// Conquer mutation. Needs the token in the `X-Api-Token` header.
pub const CONQUER_MUTATION: &str =
    "mutation Conquer($fieldId: Int!) { conquerField(FieldID: $fieldId) }";

/// A GraphQL operation ready to be posted as JSON.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphQlRequest<V> {
    pub query: &'static str,
    pub operation_name: &'static str,
    pub variables: V,
}

/// Variables for [`CONQUER_MUTATION`].
#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConquerVariables {
    pub field_id: FieldId,
}

impl<'a> GraphQlRequest<&'a Credentials> {
    pub fn login(credentials: &'a Credentials) -> Self {
        Self {
            query: LOGIN_MUTATION,
            operation_name: "Login",
            variables: credentials,
        }
    }

    pub fn register(credentials: &'a Credentials) -> Self {
        Self {
            query: REGISTER_MUTATION,
            operation_name: "Register",
            variables: credentials,
        }
    }
}

impl GraphQlRequest<ConquerVariables> {
    pub fn conquer(field_id: FieldId) -> Self {
        Self {
            query: CONQUER_MUTATION,
            operation_name: "Conquer",
            variables: ConquerVariables { field_id },
        }
    }
}

/// One entry of a GraphQL `errors` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct GraphQlError {
    pub message: String,
}

/// The standard GraphQL response envelope.
///
/// `data` and `errors` may both be present (partial success). The client
/// treats any error as a failure of the whole operation.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphQlResponse<T> {
    pub data: Option<T>,
    #[serde(default)]
    pub errors: Vec<GraphQlError>,
}

impl<T> GraphQlResponse<T> {
    /// The `message` of every reported error, in order.
    pub fn error_messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// Takes the `data` payload, or reports which operation lacked one.
    pub fn take_data(self, operation: &'static str) -> Result<T, ProtocolError> {
        self.data.ok_or(ProtocolError::MissingData(operation))
    }
}

/// `data` of the login mutation: `{"login": "<token>"}`.
#[derive(Debug, Clone, Deserialize)]
pub struct LoginData {
    pub login: Token,
}

/// `data` of a mutation whose result the client ignores.
pub type IgnoredData = IgnoredAny;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_login_request_passes_credentials_as_variables() {
        let creds = Credentials::new("al\"ice", "p}w");
        let body = serde_json::to_value(GraphQlRequest::login(&creds)).unwrap();

        assert_eq!(body["operationName"], "Login");
        assert_eq!(body["variables"]["username"], "al\"ice");
        assert_eq!(body["variables"]["password"], "p}w");
        // The query document is constant: input never lands in it.
        assert_eq!(body["query"], LOGIN_MUTATION);
    }

    #[test]
    fn test_register_request_uses_register_document() {
        let creds = Credentials::new("u", "p");
        let body =
            serde_json::to_value(GraphQlRequest::register(&creds)).unwrap();
        assert_eq!(body["query"], REGISTER_MUTATION);
        assert_eq!(body["operationName"], "Register");
    }

    #[test]
    fn test_conquer_request_sends_field_id_as_int() {
        let body =
            serde_json::to_value(GraphQlRequest::conquer(FieldId(5))).unwrap();
        assert_eq!(body["variables"], serde_json::json!({ "fieldId": 5 }));
        assert!(CONQUER_MUTATION.contains("conquerField(FieldID: $fieldId)"));
    }

    #[test]
    fn test_response_login_data_extracts_token() {
        let resp: GraphQlResponse<LoginData> =
            serde_json::from_str(r#"{"data": {"login": "T"}}"#).unwrap();
        assert!(resp.errors.is_empty());
        let data = resp.take_data("login").unwrap();
        assert_eq!(data.login.as_str(), "T");
    }

    #[test]
    fn test_response_errors_collected() {
        let resp: GraphQlResponse<LoginData> = serde_json::from_str(
            r#"{"data": null, "errors": [{"message": "invalid credentials", "path": ["login"]}]}"#,
        )
        .unwrap();
        assert_eq!(resp.error_messages(), vec!["invalid credentials"]);
    }

    #[test]
    fn test_response_take_data_missing_returns_error() {
        let resp: GraphQlResponse<LoginData> =
            serde_json::from_str("{}").unwrap();
        assert!(matches!(
            resp.take_data("login"),
            Err(ProtocolError::MissingData("login"))
        ));
    }

    #[test]
    fn test_response_ignored_data_accepts_any_shape() {
        let resp: GraphQlResponse<IgnoredData> =
            serde_json::from_str(r#"{"data": {"conquerField": true}}"#).unwrap();
        assert!(resp.data.is_some());
    }
}

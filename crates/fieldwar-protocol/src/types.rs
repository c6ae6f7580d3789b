//! Core types exchanged with the Fieldwar game API.
//!
//! Everything in this module either travels on the wire (request and
//! response bodies) or names something the wire talks about (a mode, a
//! token, a field). The serde attributes pin down the exact JSON shapes
//! the game server speaks, including its mixed casing (`fieldID`,
//! `scoreList`, `conquerType`).

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ProtocolError;

/// Number of fields on the game map. Field ids run from 1 to this value.
pub const FIELD_COUNT: u32 = 1_000_000;

// ---------------------------------------------------------------------------
// Mode
// ---------------------------------------------------------------------------

/// Which API style backs the session actions.
///
/// The persisted spelling (`"restful"` / `"graphql"`) is the same one the
/// server uses to tag conquests, so a `Mode` round-trips through local
/// storage and through the scoreboard's per-type history unchanged.
///
/// The set of modes is closed: there is no "unknown" variant. Text that
/// isn't one of the two spellings fails in [`FromStr`] with
/// [`ProtocolError::UnknownMode`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// JSON over plain HTTP routes under `/api/v1`.
    #[default]
    Restful,

    /// Mutations posted to the single `/graphql` endpoint.
    Graphql,
}

impl Mode {
    /// Every recognized mode, in display order.
    pub const ALL: [Mode; 2] = [Mode::Restful, Mode::Graphql];

    /// The persisted spelling of this mode.
    pub const fn as_str(self) -> &'static str {
        match self {
            Mode::Restful => "restful",
            Mode::Graphql => "graphql",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "restful" => Ok(Mode::Restful),
            "graphql" => Ok(Mode::Graphql),
            other => Err(ProtocolError::UnknownMode(other.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// Identity types
// ---------------------------------------------------------------------------

/// An opaque session credential issued by the server on login.
///
/// The `Debug` impl never prints the secret, so a `Token` can sit inside
/// structs that get logged with `{:?}` without leaking it.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Token(String);

impl Token {
    /// Wraps a raw token string.
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// The raw token, for putting into a request header.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the token and returns the raw string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Token(..)")
    }
}

/// Identifies one field on the game map (the target of a conquer).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FieldId(pub u32);

impl fmt::Display for FieldId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F-{}", self.0)
    }
}

// ---------------------------------------------------------------------------
// Auth bodies
// ---------------------------------------------------------------------------

/// Username and password, as sent to login and register.
///
/// Serializes to `{"username": ..., "password": ...}`, which is both the
/// REST request body and the GraphQL variables object.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"..")
            .finish()
    }
}

/// REST login response: `{"token": "..."}`.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub token: Token,
}

/// "Who am I" response from `GET /me`.
///
/// Only `username` is required. Anything else the server adds is ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct MeResponse {
    pub username: String,
}

/// Error body the REST handlers send with non-2xx statuses.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

// ---------------------------------------------------------------------------
// Public game data
// ---------------------------------------------------------------------------

/// A registered player as listed by `GET /api/v1/userlist`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: u64,
    pub username: String,
}

/// One claim on a field: who holds it, and through which API style.
///
/// `conquer_type` stays a string because the server also knows styles
/// this client doesn't speak (`webservice`, `grpc`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Owner {
    pub conquer_type: String,
    pub owner: String,
}

/// A field on the map and everyone currently holding it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Field {
    #[serde(rename = "fieldID")]
    pub field_id: FieldId,
    #[serde(default)]
    pub conquerer: Vec<Owner>,
}

/// The current state of the game map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameMap {
    #[serde(default)]
    pub fields: Vec<Field>,
}

/// A scoreboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Score {
    pub username: String,
    pub conquer_field_count: u64,
    /// Lifetime conquests keyed by API style (`restful`, `graphql`, ...).
    #[serde(default)]
    pub conquer_history_count: std::collections::BTreeMap<String, u64>,
}

/// `GET /scoreboard` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScoreboardResponse {
    #[serde(default)]
    pub score_list: Vec<Score>,
}

/// `GET /api/v1/userlist` body.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserListResponse {
    #[serde(default)]
    pub user_list: Vec<User>,
}

/// `GET /api/v1/me` body: the fields this player holds under REST.
#[derive(Debug, Clone, Deserialize)]
pub struct ConqueredFieldsResponse {
    #[serde(default)]
    pub fields: Vec<FieldId>,
}

#[cfg(test)]
mod tests {
    use super::*;

    // =====================================================================
    // Mode
    // =====================================================================

    #[test]
    fn test_mode_default_is_restful() {
        assert_eq!(Mode::default(), Mode::Restful);
    }

    #[test]
    fn test_mode_from_str_accepts_persisted_spellings() {
        assert_eq!("restful".parse::<Mode>().unwrap(), Mode::Restful);
        assert_eq!("graphql".parse::<Mode>().unwrap(), Mode::Graphql);
    }

    #[test]
    fn test_mode_from_str_unknown_returns_error() {
        let result = "bogus".parse::<Mode>();
        assert!(
            matches!(result, Err(ProtocolError::UnknownMode(ref s)) if s == "bogus"),
            "got {result:?}"
        );
    }

    #[test]
    fn test_mode_from_str_is_case_sensitive() {
        // The stored value is written by `as_str`, so anything else is
        // foreign data.
        assert!("GraphQL".parse::<Mode>().is_err());
    }

    #[test]
    fn test_mode_display_matches_serde() {
        for mode in Mode::ALL {
            let json = serde_json::to_string(&mode).unwrap();
            assert_eq!(json, format!("\"{mode}\""));
        }
    }

    // =====================================================================
    // Token / Credentials
    // =====================================================================

    #[test]
    fn test_token_debug_is_redacted() {
        let token = Token::new("s3cret");
        assert_eq!(format!("{token:?}"), "Token(..)");
        assert_eq!(token.as_str(), "s3cret");
    }

    #[test]
    fn test_token_serializes_as_plain_string() {
        let json = serde_json::to_string(&Token::new("abc")).unwrap();
        assert_eq!(json, "\"abc\"");
    }

    #[test]
    fn test_credentials_serialize_as_rest_body() {
        let body = serde_json::to_value(Credentials::new("u", "p")).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "username": "u", "password": "p" })
        );
    }

    #[test]
    fn test_credentials_debug_hides_password() {
        let text = format!("{:?}", Credentials::new("alice", "hunter2"));
        assert!(text.contains("alice"));
        assert!(!text.contains("hunter2"));
    }

    // =====================================================================
    // Public game data
    // =====================================================================

    #[test]
    fn test_field_id_display() {
        assert_eq!(FieldId(5).to_string(), "F-5");
    }

    #[test]
    fn test_field_reads_server_casing() {
        let json = r#"{"fieldID": 12, "conquerer": [
            {"conquerType": "restful", "owner": "alice"}
        ]}"#;
        let field: Field = serde_json::from_str(json).unwrap();
        assert_eq!(field.field_id, FieldId(12));
        assert_eq!(field.conquerer[0].conquer_type, "restful");
        assert_eq!(field.conquerer[0].owner, "alice");
    }

    #[test]
    fn test_scoreboard_reads_history_by_type() {
        let json = r#"{"scoreList": [{
            "username": "bob",
            "conquerFieldCount": 3,
            "conquerHistoryCount": {"restful": 2, "graphql": 1}
        }]}"#;
        let board: ScoreboardResponse = serde_json::from_str(json).unwrap();
        let row = &board.score_list[0];
        assert_eq!(row.username, "bob");
        assert_eq!(row.conquer_field_count, 3);
        assert_eq!(row.conquer_history_count["graphql"], 1);
    }

    #[test]
    fn test_me_response_ignores_extra_fields() {
        let me: MeResponse =
            serde_json::from_str(r#"{"username": "u", "fields": [1, 2]}"#)
                .unwrap();
        assert_eq!(me.username, "u");
    }

    #[test]
    fn test_me_response_without_username_fails() {
        let result = serde_json::from_str::<MeResponse>(r#"{"fields": []}"#);
        assert!(result.is_err());
    }
}

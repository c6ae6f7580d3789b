//! Client configuration and the published session snapshot.

use std::time::Duration;

use fieldwar_protocol::Mode;

use crate::SessionError;

// ---------------------------------------------------------------------------
// ClientConfig
// ---------------------------------------------------------------------------

/// Where the game server lives and how to talk to it.
///
/// Start from `ClientConfig::default()` and override only what you need,
/// or read everything from the environment with [`ClientConfig::from_env`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme, host, and port of the game server. No trailing path.
    ///
    /// Default: `http://127.0.0.1:8971` (the server's listen port).
    pub base_url: String,

    /// Upper bound on any single request, connect to last byte.
    ///
    /// Default: 10 seconds.
    pub request_timeout: Duration,

    /// Mode used when nothing has been persisted yet.
    ///
    /// Default: [`Mode::Restful`].
    pub default_mode: Mode,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_url: "http://127.0.0.1:8971".to_string(),
            request_timeout: Duration::from_secs(10),
            default_mode: Mode::Restful,
        }
    }
}

impl ClientConfig {
    /// Reads `FIELDWAR_BASE_URL`, `FIELDWAR_TIMEOUT_SECS`, and
    /// `FIELDWAR_MODE`, keeping the default for any that is unset.
    ///
    /// # Errors
    /// [`SessionError::InvalidConfig`] if a variable is set but unparsable.
    pub fn from_env() -> Result<Self, SessionError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, SessionError> {
        let mut config = Self::default();

        if let Some(url) = lookup("FIELDWAR_BASE_URL") {
            config.base_url = url;
        }
        if let Some(secs) = lookup("FIELDWAR_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                SessionError::InvalidConfig(format!(
                    "FIELDWAR_TIMEOUT_SECS must be a whole number, got {secs:?}"
                ))
            })?;
            config.request_timeout = Duration::from_secs(secs);
        }
        if let Some(mode) = lookup("FIELDWAR_MODE") {
            config.default_mode = mode
                .trim()
                .parse()
                .map_err(|e| SessionError::InvalidConfig(format!("FIELDWAR_MODE: {e}")))?;
        }

        Ok(config)
    }
}

// ---------------------------------------------------------------------------
// SessionSnapshot
// ---------------------------------------------------------------------------

/// What a UI needs to render the session, without the secret.
///
/// Published by the session actor after every command that changes it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionSnapshot {
    pub mode: Mode,
    pub username: Option<String>,
    pub has_token: bool,
}

impl SessionSnapshot {
    /// Same rule as the store: a token and a known username.
    pub fn is_logged_in(&self) -> bool {
        self.has_token && self.username.is_some()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup_from(
        pairs: &[(&str, &str)],
    ) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_from_lookup_empty_env_uses_defaults() {
        let config = ClientConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(config, ClientConfig::default());
    }

    #[test]
    fn test_from_lookup_reads_all_variables() {
        let config = ClientConfig::from_lookup(lookup_from(&[
            ("FIELDWAR_BASE_URL", "https://war.example"),
            ("FIELDWAR_TIMEOUT_SECS", "3"),
            ("FIELDWAR_MODE", "graphql"),
        ]))
        .unwrap();

        assert_eq!(config.base_url, "https://war.example");
        assert_eq!(config.request_timeout, Duration::from_secs(3));
        assert_eq!(config.default_mode, Mode::Graphql);
    }

    #[test]
    fn test_from_lookup_bad_timeout_returns_error() {
        let result = ClientConfig::from_lookup(lookup_from(&[(
            "FIELDWAR_TIMEOUT_SECS",
            "soon",
        )]));
        assert!(matches!(result, Err(SessionError::InvalidConfig(_))));
    }

    #[test]
    fn test_from_lookup_unknown_mode_returns_error() {
        let result =
            ClientConfig::from_lookup(lookup_from(&[("FIELDWAR_MODE", "grpc")]));
        assert!(
            matches!(result, Err(SessionError::InvalidConfig(ref m)) if m.contains("grpc")),
            "got {result:?}"
        );
    }

    #[test]
    fn test_snapshot_logged_in_needs_token_and_username() {
        let mut snap = SessionSnapshot {
            mode: Mode::Restful,
            username: None,
            has_token: true,
        };
        assert!(!snap.is_logged_in());

        snap.username = Some("u".into());
        assert!(snap.is_logged_in());

        snap.has_token = false;
        assert!(!snap.is_logged_in());
    }
}

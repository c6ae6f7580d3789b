//! The session store: who is logged in, through which API, and keeping
//! local storage in step with that.
//!
//! `SessionStore` is a plain owned value. Mutating actions take
//! `&mut self`, so the borrow checker already rules out two logins
//! racing each other on the same store. When several tasks need to act
//! on one session, hand the store to [`SessionHandle::spawn`] and share
//! the handle instead.
//!
//! [`SessionHandle::spawn`]: crate::SessionHandle::spawn

use std::time::Duration;

use fieldwar_protocol::{Credentials, FieldId, Mode, Token, User};
use fieldwar_transport::{ApiTransport, HttpApi, PublicApi, Transport};

use crate::storage::{KeyValueStore, MODE_KEY, TOKEN_KEY};
use crate::{ClientConfig, SessionError, SessionSnapshot};

/// The client's login state, bound to one transport and one storage.
///
/// ## State
///
/// ```text
/// token     username   is_logged_in
/// None      None       false          fresh install / logged out
/// Some      None       false          token restored, not verified yet
/// Some      Some       true           after login or verify_token
/// ```
///
/// `username` is never set without `token`: every path that sets it
/// either sets both or requires a token first.
pub struct SessionStore<S: KeyValueStore> {
    storage: S,
    transport: ApiTransport,
    public: PublicApi,
    token: Option<Token>,
    username: Option<String>,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Starts building a store with [`ClientConfig::default`].
    pub fn builder() -> SessionStoreBuilder {
        SessionStoreBuilder::new()
    }

    /// Opens the store, restoring `token` and `mode` from `storage`.
    ///
    /// A missing mode falls back to `config.default_mode`. A stored mode
    /// this client doesn't recognize is logged and also falls back, so
    /// a hand-edited state file can't brick the client.
    ///
    /// # Errors
    /// - [`SessionError::Transport`] if `config.base_url` is invalid.
    /// - [`SessionError::Storage`] if storage can't be read.
    pub fn open(config: &ClientConfig, storage: S) -> Result<Self, SessionError> {
        let http = HttpApi::new(&config.base_url, config.request_timeout)?;

        let mode = match storage.get(MODE_KEY)? {
            Some(stored) => stored.parse().unwrap_or_else(|err| {
                tracing::warn!(error = %err, "ignoring stored mode");
                config.default_mode
            }),
            None => config.default_mode,
        };
        let token = storage.get(TOKEN_KEY)?.map(Token::new);

        tracing::info!(
            %mode,
            base_url = http.base_url(),
            restored_token = token.is_some(),
            "session store opened"
        );

        Ok(Self {
            storage,
            transport: ApiTransport::for_mode(mode, http.clone()),
            public: PublicApi::new(http),
            token,
            username: None,
        })
    }

    // -- Accessors --------------------------------------------------------

    /// The mode whose transport backs every action.
    pub fn mode(&self) -> Mode {
        self.transport.mode()
    }

    pub fn token(&self) -> Option<&Token> {
        self.token.as_ref()
    }

    pub fn username(&self) -> Option<&str> {
        self.username.as_deref()
    }

    /// `true` only when both a token and a username are held.
    pub fn is_logged_in(&self) -> bool {
        self.token.is_some() && self.username.is_some()
    }

    /// The secret-free view published to observers.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            mode: self.mode(),
            username: self.username.clone(),
            has_token: self.token.is_some(),
        }
    }

    /// Read-only game data that needs no session.
    pub fn public(&self) -> &PublicApi {
        &self.public
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    // -- Actions ----------------------------------------------------------

    /// Checks the held token with the server.
    ///
    /// Without a token this does nothing (no request is made). If the
    /// server confirms the token, `username` is filled in. On any failure
    /// (rejected, unreachable, malformed reply) the session is cleared in
    /// memory and the persisted token is removed. Nothing is returned:
    /// callers look at [`is_logged_in`](Self::is_logged_in) afterwards.
    pub async fn verify_token(&mut self) {
        let Some(token) = self.token.as_ref() else {
            return;
        };

        match self.transport.verify(token).await {
            Ok(username) => {
                tracing::info!(%username, "token verified");
                self.username = Some(username);
            }
            Err(err) => {
                tracing::warn!(error = %err, "token verification failed, clearing session");
                self.clear_session();
            }
        }
    }

    /// Logs in through the active transport and persists the new token.
    ///
    /// On any error nothing changes, in memory or in storage. The token
    /// is written to storage before the in-memory session is updated.
    pub async fn login(&mut self, username: &str, password: &str) -> Result<(), SessionError> {
        let credentials = Credentials::new(username, password);
        let token = self.transport.login(&credentials).await?;

        self.storage.set(TOKEN_KEY, token.as_str())?;
        self.token = Some(token);
        self.username = Some(credentials.username);
        tracing::info!(username, mode = %self.mode(), "logged in");
        Ok(())
    }

    /// Creates an account. Does not log in.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), SessionError> {
        let credentials = Credentials::new(username, password);
        self.transport.register(&credentials).await?;
        tracing::info!(username, mode = %self.mode(), "registered");
        Ok(())
    }

    /// Claims `field` for the logged-in player.
    ///
    /// # Errors
    /// [`SessionError::NotLoggedIn`] without a token (no request is
    /// made); otherwise whatever the transport reports.
    pub async fn conquer(&self, field: FieldId) -> Result<(), SessionError> {
        let token = self.token.as_ref().ok_or(SessionError::NotLoggedIn)?;
        self.transport.conquer(token, field).await?;
        tracing::debug!(%field, mode = %self.mode(), "field conquered");
        Ok(())
    }

    /// Persists the choice, then switches the transport.
    ///
    /// If persisting fails the active mode stays as it was. The session
    /// itself (token, username) is untouched either way.
    pub fn set_mode(&mut self, mode: Mode) -> Result<(), SessionError> {
        self.storage.set(MODE_KEY, mode.as_str())?;
        if mode != self.mode() {
            let http = self.transport.http().clone();
            self.transport = ApiTransport::for_mode(mode, http);
            tracing::info!(%mode, "mode changed");
        }
        Ok(())
    }

    /// Forgets the session locally. The server isn't told.
    ///
    /// The persisted token goes first; if that fails the session is kept,
    /// so memory never claims a logout the file doesn't reflect.
    pub fn logout(&mut self) -> Result<(), SessionError> {
        self.storage.remove(TOKEN_KEY)?;
        self.token = None;
        self.username = None;
        tracing::info!("logged out");
        Ok(())
    }

    /// All registered players. Needs a token.
    pub async fn user_list(&self) -> Result<Vec<User>, SessionError> {
        let token = self.token.as_ref().ok_or(SessionError::NotLoggedIn)?;
        Ok(self.public.user_list(token).await?)
    }

    /// Fields this player holds through the REST API. Needs a token.
    pub async fn conquered_fields(&self) -> Result<Vec<FieldId>, SessionError> {
        let token = self.token.as_ref().ok_or(SessionError::NotLoggedIn)?;
        Ok(self.public.conquered_fields(token).await?)
    }

    /// Drops token and username, and the persisted token. Storage
    /// failures are logged, not returned: this runs on paths that
    /// have no error channel.
    fn clear_session(&mut self) {
        self.token = None;
        self.username = None;
        if let Err(err) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %err, "failed to remove persisted token");
        }
    }
}

// ---------------------------------------------------------------------------
// Builder
// ---------------------------------------------------------------------------

/// Builder for [`SessionStore`].
///
/// ```rust,no_run
/// use fieldwar_session::{MemoryStore, SessionStore};
///
/// # fn main() -> Result<(), fieldwar_session::SessionError> {
/// let store = SessionStore::<MemoryStore>::builder()
///     .base_url("http://127.0.0.1:8971")
///     .open(MemoryStore::new())?;
/// assert!(!store.is_logged_in());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct SessionStoreBuilder {
    config: ClientConfig,
}

impl SessionStoreBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ClientConfig) -> Self {
        self.config = config;
        self
    }

    pub fn base_url(mut self, url: &str) -> Self {
        self.config.base_url = url.to_string();
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// Mode to use when storage has none.
    pub fn default_mode(mut self, mode: Mode) -> Self {
        self.config.default_mode = mode;
        self
    }

    /// Opens the store on `storage`. See [`SessionStore::open`].
    pub fn open<S: KeyValueStore>(self, storage: S) -> Result<SessionStore<S>, SessionError> {
        SessionStore::open(&self.config, storage)
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the parts of `SessionStore` that don't touch the
    //! network. Request/response behavior is covered in
    //! `tests/session_store.rs` against a mock server.

    use super::*;
    use crate::MemoryStore;

    // -- Helpers ----------------------------------------------------------

    /// A store whose base URL nothing listens on. Fine for tests that
    /// must not make requests.
    fn store_with(storage: MemoryStore) -> SessionStore<MemoryStore> {
        SessionStore::<MemoryStore>::builder()
            .base_url("http://127.0.0.1:9")
            .open(storage)
            .expect("open should succeed")
    }

    // =====================================================================
    // open()
    // =====================================================================

    #[test]
    fn test_open_empty_storage_defaults_to_restful_logged_out() {
        let store = store_with(MemoryStore::new());

        assert_eq!(store.mode(), Mode::Restful);
        assert!(store.token().is_none());
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_open_restores_token_and_mode() {
        let store = store_with(MemoryStore::with_entries([
            (TOKEN_KEY, "T"),
            (MODE_KEY, "graphql"),
        ]));

        assert_eq!(store.mode(), Mode::Graphql);
        assert_eq!(store.token(), Some(&Token::new("T")));
        // The username isn't persisted, so a restored token alone
        // doesn't count as logged in until verified.
        assert!(!store.is_logged_in());
    }

    #[test]
    fn test_open_unknown_stored_mode_falls_back_to_default() {
        let store = SessionStore::<MemoryStore>::builder()
            .base_url("http://127.0.0.1:9")
            .default_mode(Mode::Graphql)
            .open(MemoryStore::with_entries([(MODE_KEY, "bogus")]))
            .unwrap();

        assert_eq!(store.mode(), Mode::Graphql);
    }

    #[test]
    fn test_open_invalid_base_url_returns_error() {
        let result = SessionStore::<MemoryStore>::builder()
            .base_url("ftp://nope")
            .open(MemoryStore::new());

        assert!(matches!(result, Err(SessionError::Transport(_))));
    }

    // =====================================================================
    // set_mode()
    // =====================================================================

    #[test]
    fn test_set_mode_switches_transport_and_persists() {
        let mut store = store_with(MemoryStore::new());

        store.set_mode(Mode::Graphql).unwrap();

        assert_eq!(store.mode(), Mode::Graphql);
        assert_eq!(
            store.storage().get(MODE_KEY).unwrap().as_deref(),
            Some("graphql")
        );
    }

    #[test]
    fn test_set_mode_keeps_token() {
        let mut store = store_with(MemoryStore::with_entries([(TOKEN_KEY, "T")]));

        store.set_mode(Mode::Graphql).unwrap();
        store.set_mode(Mode::Restful).unwrap();

        assert_eq!(store.token(), Some(&Token::new("T")));
        assert_eq!(
            store.storage().get(MODE_KEY).unwrap().as_deref(),
            Some("restful")
        );
    }

    #[test]
    fn test_set_mode_same_mode_still_persists() {
        let mut store = store_with(MemoryStore::new());

        store.set_mode(Mode::Restful).unwrap();

        assert_eq!(
            store.storage().get(MODE_KEY).unwrap().as_deref(),
            Some("restful")
        );
    }

    // =====================================================================
    // Actions that must not reach the network
    // =====================================================================

    #[tokio::test]
    async fn test_verify_token_without_token_is_noop() {
        let mut store = store_with(MemoryStore::new());

        store.verify_token().await;

        assert!(store.token().is_none());
        assert!(store.username().is_none());
    }

    #[tokio::test]
    async fn test_conquer_without_token_returns_not_logged_in() {
        let store = store_with(MemoryStore::new());

        let result = store.conquer(FieldId(5)).await;

        assert!(matches!(result, Err(SessionError::NotLoggedIn)));
    }

    #[tokio::test]
    async fn test_user_list_without_token_returns_not_logged_in() {
        let store = store_with(MemoryStore::new());

        assert!(matches!(
            store.user_list().await,
            Err(SessionError::NotLoggedIn)
        ));
        assert!(matches!(
            store.conquered_fields().await,
            Err(SessionError::NotLoggedIn)
        ));
    }

    // =====================================================================
    // logout()
    // =====================================================================

    #[test]
    fn test_logout_clears_memory_and_storage_but_keeps_mode() {
        let mut store = store_with(MemoryStore::with_entries([
            (TOKEN_KEY, "T"),
            (MODE_KEY, "graphql"),
        ]));

        store.logout().unwrap();

        assert!(store.token().is_none());
        assert!(!store.is_logged_in());
        assert_eq!(store.storage().get(TOKEN_KEY).unwrap(), None);
        assert_eq!(store.mode(), Mode::Graphql);
    }

    #[test]
    fn test_snapshot_never_contains_token_text() {
        let store = store_with(MemoryStore::with_entries([(TOKEN_KEY, "s3cret")]));

        let snap = store.snapshot();

        assert!(snap.has_token);
        assert!(!format!("{snap:?}").contains("s3cret"));
    }
}

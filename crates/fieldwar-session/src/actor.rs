//! Session actor: one Tokio task owns the [`SessionStore`], everyone
//! else talks to it through a [`SessionHandle`].
//!
//! Commands travel over a bounded mpsc channel and are handled one at a
//! time, in the order they were sent. That makes the store's single
//! writer explicit: two logins fired back to back resolve in submission
//! order, never in whichever order their responses happen to arrive.
//!
//! Observers that only need to redraw (a status bar, a menu) subscribe
//! to a `watch` channel of [`SessionSnapshot`]s instead of polling.

use fieldwar_protocol::{FieldId, Mode, User};
use fieldwar_transport::PublicApi;
use tokio::sync::{mpsc, oneshot, watch};

use crate::storage::KeyValueStore;
use crate::{SessionError, SessionSnapshot, SessionStore};

/// Command channel capacity. Senders wait when it's full.
const DEFAULT_CHANNEL_SIZE: usize = 32;

type Reply<T> = oneshot::Sender<Result<T, SessionError>>;

/// Commands sent to the session actor. Each carries its reply channel.
enum SessionCommand {
    Login {
        username: String,
        password: String,
        reply: Reply<()>,
    },
    Register {
        username: String,
        password: String,
        reply: Reply<()>,
    },
    Conquer {
        field: FieldId,
        reply: Reply<()>,
    },
    VerifyToken {
        reply: oneshot::Sender<SessionSnapshot>,
    },
    SetMode {
        mode: Mode,
        reply: Reply<()>,
    },
    Logout {
        reply: Reply<()>,
    },
    UserList {
        reply: Reply<Vec<User>>,
    },
    ConqueredFields {
        reply: Reply<Vec<FieldId>>,
    },
    Shutdown,
}

/// Handle to a running session actor.
///
/// Cheap to clone: every clone feeds the same actor, so a whole UI can
/// share one session without sharing `&mut` access to it.
#[derive(Clone)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionCommand>,
    snapshots: watch::Receiver<SessionSnapshot>,
    public: PublicApi,
}

impl SessionHandle {
    /// Moves `store` into a new actor task and returns a handle to it.
    ///
    /// Must be called from inside a Tokio runtime.
    pub fn spawn<S: KeyValueStore>(store: SessionStore<S>) -> Self {
        let (tx, rx) = mpsc::channel(DEFAULT_CHANNEL_SIZE);
        let (snapshot_tx, snapshot_rx) = watch::channel(store.snapshot());
        let public = store.public().clone();

        let actor = SessionActor {
            store,
            receiver: rx,
            snapshots: snapshot_tx,
        };
        tokio::spawn(actor.run());

        Self {
            sender: tx,
            snapshots: snapshot_rx,
            public,
        }
    }

    /// Sends a command and waits for the actor's reply.
    async fn request<T>(
        &self,
        make: impl FnOnce(oneshot::Sender<T>) -> SessionCommand,
    ) -> Result<T, SessionError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.sender
            .send(make(reply_tx))
            .await
            .map_err(|_| SessionError::Unavailable)?;
        reply_rx.await.map_err(|_| SessionError::Unavailable)
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Login {
            username: username.to_string(),
            password: password.to_string(),
            reply,
        })
        .await?
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Register {
            username: username.to_string(),
            password: password.to_string(),
            reply,
        })
        .await?
    }

    pub async fn conquer(&self, field: FieldId) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Conquer { field, reply })
            .await?
    }

    /// Verifies the held token and returns the resulting snapshot.
    ///
    /// Verification failures are absorbed by the store (the session is
    /// cleared); the only error here is a stopped actor.
    pub async fn verify_token(&self) -> Result<SessionSnapshot, SessionError> {
        self.request(|reply| SessionCommand::VerifyToken { reply })
            .await
    }

    pub async fn set_mode(&self, mode: Mode) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::SetMode { mode, reply })
            .await?
    }

    pub async fn logout(&self) -> Result<(), SessionError> {
        self.request(|reply| SessionCommand::Logout { reply }).await?
    }

    pub async fn user_list(&self) -> Result<Vec<User>, SessionError> {
        self.request(|reply| SessionCommand::UserList { reply })
            .await?
    }

    pub async fn conquered_fields(&self) -> Result<Vec<FieldId>, SessionError> {
        self.request(|reply| SessionCommand::ConqueredFields { reply })
            .await?
    }

    /// The latest published state.
    pub fn snapshot(&self) -> SessionSnapshot {
        self.snapshots.borrow().clone()
    }

    /// A receiver that wakes whenever the session state changes.
    pub fn subscribe(&self) -> watch::Receiver<SessionSnapshot> {
        self.snapshots.clone()
    }

    /// Read-only game data. Doesn't go through the actor.
    pub fn public(&self) -> &PublicApi {
        &self.public
    }

    /// Asks the actor to stop after the commands already queued.
    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.sender
            .send(SessionCommand::Shutdown)
            .await
            .map_err(|_| SessionError::Unavailable)
    }
}

/// The task-side half: owns the store and applies commands in order.
struct SessionActor<S: KeyValueStore> {
    store: SessionStore<S>,
    receiver: mpsc::Receiver<SessionCommand>,
    snapshots: watch::Sender<SessionSnapshot>,
}

impl<S: KeyValueStore> SessionActor<S> {
    async fn run(mut self) {
        tracing::debug!("session actor started");

        while let Some(cmd) = self.receiver.recv().await {
            match cmd {
                SessionCommand::Login {
                    username,
                    password,
                    reply,
                } => {
                    let result = self.store.login(&username, &password).await;
                    self.publish();
                    let _ = reply.send(result);
                }
                SessionCommand::Register {
                    username,
                    password,
                    reply,
                } => {
                    let result = self.store.register(&username, &password).await;
                    let _ = reply.send(result);
                }
                SessionCommand::Conquer { field, reply } => {
                    let result = self.store.conquer(field).await;
                    let _ = reply.send(result);
                }
                SessionCommand::VerifyToken { reply } => {
                    self.store.verify_token().await;
                    self.publish();
                    let _ = reply.send(self.store.snapshot());
                }
                SessionCommand::SetMode { mode, reply } => {
                    let result = self.store.set_mode(mode);
                    self.publish();
                    let _ = reply.send(result);
                }
                SessionCommand::Logout { reply } => {
                    let result = self.store.logout();
                    self.publish();
                    let _ = reply.send(result);
                }
                SessionCommand::UserList { reply } => {
                    let _ = reply.send(self.store.user_list().await);
                }
                SessionCommand::ConqueredFields { reply } => {
                    let _ = reply.send(self.store.conquered_fields().await);
                }
                SessionCommand::Shutdown => break,
            }
        }

        tracing::debug!("session actor stopped");
    }

    /// Publishes the store's snapshot if it differs from the last one.
    fn publish(&self) {
        let next = self.store.snapshot();
        self.snapshots.send_if_modified(|current| {
            if *current == next {
                false
            } else {
                *current = next;
                true
            }
        });
    }
}

//! Session persistence.
//!
//! The store is the single owner of the persisted token/role/userId triple.
//! Both the session client and the asset loader read it through the
//! `SessionStore` trait so tests can substitute an in-memory double.

use crate::session::{Role, Session};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::{PoisonError, RwLock};
use tracing::{debug, warn};

/// Shared persistent session state.
///
/// Store operations are best-effort: persistence failures are logged, never
/// propagated, so a broken session file degrades to an anonymous client
/// rather than breaking every page.
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current session, or `None` when anonymous.
    async fn get(&self) -> Option<Session>;

    /// Replaces the stored session. All three fields are written together.
    async fn set(&self, session: &Session);

    /// Removes the stored session entirely.
    async fn clear(&self);

    /// Swaps the bearer token of the stored session, keeping role and user
    /// id. No-op when no session is stored.
    async fn update_token(&self, token: &str) {
        if let Some(mut session) = self.get().await {
            session.token = token.to_owned();
            self.set(&session).await;
        }
    }
}

/// In-memory store for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    inner: RwLock<Option<Session>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor for a store that already holds a session.
    pub fn with_session(session: Session) -> Self {
        MemorySessionStore {
            inner: RwLock::new(Some(session)),
        }
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn get(&self) -> Option<Session> {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    async fn set(&self, session: &Session) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = Some(session.clone());
    }

    async fn clear(&self) {
        *self.inner.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

/// On-disk JSON layout. Field names match the browser-storage keys the
/// backend contract was written against.
#[derive(Debug, Serialize, Deserialize)]
struct StoredSession {
    token: String,
    #[serde(rename = "userRole")]
    user_role: String,
    #[serde(rename = "userId")]
    user_id: String,
}

impl StoredSession {
    fn from_session(session: &Session) -> Self {
        StoredSession {
            token: session.token.clone(),
            user_role: session.role.code().to_string(),
            user_id: session.user_id.to_string(),
        }
    }

    fn into_session(self) -> Option<Session> {
        let user_id = match self.user_id.parse::<i64>() {
            Ok(id) => id,
            Err(_) => {
                warn!("Stored session has a malformed userId, discarding it");
                return None;
            }
        };
        Some(Session {
            token: self.token,
            role: Role::from_code(&self.user_role),
            user_id,
        })
    }
}

/// File-backed store persisting the session across client restarts.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
}

impl FileSessionStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileSessionStore { path: path.into() }
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn get(&self) -> Option<Session> {
        let raw = match tokio::fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) => {
                debug!("No session file at {}: {}", self.path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<StoredSession>(&raw) {
            Ok(stored) => stored.into_session(),
            Err(e) => {
                warn!("Session file {} is corrupt: {}", self.path.display(), e);
                None
            }
        }
    }

    async fn set(&self, session: &Session) {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                if let Err(e) = tokio::fs::create_dir_all(parent).await {
                    warn!("Failed to create session directory: {}", e);
                    return;
                }
            }
        }
        let stored = StoredSession::from_session(session);
        let raw = match serde_json::to_string_pretty(&stored) {
            Ok(raw) => raw,
            Err(e) => {
                warn!("Failed to serialize session: {}", e);
                return;
            }
        };
        if let Err(e) = tokio::fs::write(&self.path, raw).await {
            warn!("Failed to persist session to {}: {}", self.path.display(), e);
        }
    }

    async fn clear(&self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {}
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
            Err(e) => warn!("Failed to remove session file: {}", e),
        }
    }
}

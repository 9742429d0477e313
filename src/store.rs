//! In-memory session store
//!
//! Shared mutable state for the whole process, constructed once at startup
//! and injected into every handler. The lock is only ever held across the
//! synchronous map mutation, never across an await point, so appends to the
//! same session serialize in arrival order while requests touching other
//! sessions are unaffected.
//!
//! Sessions are never evicted; history grows until the process restarts.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::{Message, Role};

/// A conversation context: an append-only ordered message history
#[derive(Debug, Clone)]
pub struct Session {
    pub id: String,
    pub messages: Vec<Message>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    fn new(id: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<String, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an empty session under a freshly generated identifier
    pub async fn create(&self) -> String {
        let id = Uuid::new_v4().to_string();
        let mut sessions = self.inner.write().await;
        sessions.insert(id.clone(), Session::new(id.clone()));
        id
    }

    /// Resolve a caller-supplied session id. A missing or empty id yields a
    /// fresh session; a supplied id is adopted as-is and materializes on the
    /// first append (upsert policy, see DESIGN.md).
    pub async fn resolve(&self, session_id: Option<String>) -> String {
        match session_id {
            Some(id) if !id.is_empty() => id,
            _ => self.create().await,
        }
    }

    /// Ordered history for a session, or `None` if the id is unknown
    pub async fn history(&self, session_id: &str) -> Option<Vec<Message>> {
        let sessions = self.inner.read().await;
        sessions.get(session_id).map(|s| s.messages.clone())
    }

    /// Append a turn to a session, creating the session under the given id
    /// on first use. Returns the created message.
    pub async fn append(
        &self,
        session_id: &str,
        role: Role,
        content: impl Into<String>,
    ) -> Message {
        let message = Message {
            id: Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            created_at: Utc::now(),
        };
        let mut sessions = self.inner.write().await;
        let session = sessions
            .entry(session_id.to_string())
            .or_insert_with(|| Session::new(session_id.to_string()));
        session.messages.push(message.clone());
        session.updated_at = message.created_at;
        message
    }
}

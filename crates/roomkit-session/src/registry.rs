//! The client registry: tracks every session in one room by id.
//!
//! # Concurrency note
//!
//! `ClientRegistry` is NOT thread-safe by itself — it is a plain
//! `HashMap` owned by one room and wrapped in a mutex at the room layer.
//! Keeping it simple here avoids hidden locking overhead.

use std::collections::HashMap;
use std::time::Instant;

use roomkit_protocol::SessionId;

use crate::{ClientSession, SessionError, SessionSender, SessionState};

/// Tracks the active sessions of one room, keyed by session id.
///
/// ## Lifecycle
///
/// ```text
/// insert() ──→ [Connected] ──mark_pending()──→ [PendingReconnect]
///                  ↑                                  │
///                  └────── mark_connected() ──────────┘
///                                                     │
///                          remove() ←─────────────────┘ (window expired)
/// ```
#[derive(Debug, Default)]
pub struct ClientRegistry {
    sessions: HashMap<SessionId, ClientSession>,
}

impl ClientRegistry {
    /// Creates a new, empty registry.
    pub fn new() -> Self {
        Self {
            sessions: HashMap::new(),
        }
    }

    /// Registers a freshly connected session.
    ///
    /// # Errors
    /// Returns [`SessionError::AlreadyRegistered`] if a session with
    /// this id is already present in any state.
    pub fn insert(&mut self, session: ClientSession) -> Result<(), SessionError> {
        if self.sessions.contains_key(&session.session_id) {
            return Err(SessionError::AlreadyRegistered(session.session_id));
        }
        tracing::debug!(session = %session.session_id, "session registered");
        self.sessions.insert(session.session_id.clone(), session);
        Ok(())
    }

    /// Looks up a session by id.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if no session exists for this
    /// id — the client never joined or has already left.
    pub fn get(&self, session_id: &SessionId) -> Result<&ClientSession, SessionError> {
        self.sessions
            .get(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))
    }

    /// Marks a connected session as waiting for reconnection.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the session is absent.
    pub fn mark_pending(&mut self, session_id: &SessionId) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))?;
        session.state = SessionState::PendingReconnect {
            since: Instant::now(),
        };
        Ok(())
    }

    /// Marks a pending session as connected again, replacing its
    /// outbound channel with the one from the new connection.
    ///
    /// # Errors
    /// Returns [`SessionError::NotFound`] if the session is absent.
    pub fn mark_connected(
        &mut self,
        session_id: &SessionId,
        sender: SessionSender,
    ) -> Result<(), SessionError> {
        let session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| SessionError::NotFound(session_id.clone()))?;
        session.state = SessionState::Connected;
        session.replace_sender(sender);
        Ok(())
    }

    /// Removes a session, in whatever state. Returns it if it existed.
    pub fn remove(&mut self, session_id: &SessionId) -> Option<ClientSession> {
        let removed = self.sessions.remove(session_id);
        if removed.is_some() {
            tracing::debug!(session = %session_id, "session removed");
        }
        removed
    }

    /// Number of currently connected sessions. Pending-reconnect
    /// sessions do not count — this is what decides last-client
    /// transitions.
    pub fn connected_count(&self) -> usize {
        self.sessions.values().filter(|s| s.is_connected()).count()
    }

    /// Total number of tracked sessions, connected or pending.
    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    /// Returns `true` if no sessions are tracked.
    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }

    /// Iterates over the currently connected sessions.
    pub fn connected(&self) -> impl Iterator<Item = &ClientSession> {
        self.sessions.values().filter(|s| s.is_connected())
    }
}

// =========================================================================
// Tests
// =========================================================================

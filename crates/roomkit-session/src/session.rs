//! Session types: the data structures that represent one client's
//! connection to a room.

use std::time::Instant;

use roomkit_protocol::{Outbound, SessionId};
use tokio::sync::mpsc;

use crate::SessionError;

/// Channel sender for delivering outbound events to a session's
/// transport handler.
pub type SessionSender = mpsc::UnboundedSender<Outbound>;

// ---------------------------------------------------------------------------
// SessionState
// ---------------------------------------------------------------------------

/// The liveness state of a client session.
///
/// ```text
///   Connected ──(ungraceful leave)──→ PendingReconnect
///       ↑                                    │
///       └──────────(rejoin)──────────────────┘
/// ```
///
/// There is no `Left` variant: a departed session is removed from the
/// registry outright. If an id is absent, the client has left.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// The client is connected and can receive outbound events.
    Connected,

    /// The client dropped ungracefully and a reconnection window is
    /// open. `since` records when the window started, for diagnostics.
    PendingReconnect {
        /// When the client disconnected.
        since: Instant,
    },
}

// ---------------------------------------------------------------------------
// ClientSession
// ---------------------------------------------------------------------------

/// One client's session within a room.
///
/// Owned exclusively by the room that accepted it — a session is never
/// shared across rooms, and its id is never reused.
#[derive(Debug)]
pub struct ClientSession {
    /// The session's unique id.
    pub session_id: SessionId,

    /// Current liveness state.
    pub state: SessionState,

    /// Outbound channel to the client's transport handler. Replaced with
    /// a fresh sender when the client rejoins after a disconnect.
    sender: SessionSender,
}

impl ClientSession {
    /// Creates a new connected session with the given outbound channel.
    pub fn new(session_id: SessionId, sender: SessionSender) -> Self {
        Self {
            session_id,
            state: SessionState::Connected,
            sender,
        }
    }

    /// Returns `true` if the session is currently connected.
    pub fn is_connected(&self) -> bool {
        matches!(self.state, SessionState::Connected)
    }

    /// Delivers an outbound event to this session.
    ///
    /// # Errors
    /// Returns [`SessionError::SendFailed`] if the transport side has
    /// dropped its receiver.
    pub fn send(&self, event: Outbound) -> Result<(), SessionError> {
        self.sender
            .send(event)
            .map_err(|_| SessionError::SendFailed(self.session_id.clone()))
    }

    pub(crate) fn replace_sender(&mut self, sender: SessionSender) {
        self.sender = sender;
    }
}

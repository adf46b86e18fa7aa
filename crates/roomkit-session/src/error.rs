//! Error types for the session layer.

use roomkit_protocol::SessionId;

/// Errors that can occur while tracking client sessions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// No session exists for the given id — it never joined, already
    /// left, or its reconnection window expired.
    #[error("session {0} not found")]
    NotFound(SessionId),

    /// A session with this id is already registered. Session ids are
    /// unique per connection attempt, so this indicates a duplicate join.
    #[error("session {0} already registered")]
    AlreadyRegistered(SessionId),

    /// The outbound channel for this session is gone — the transport
    /// side dropped its receiver.
    #[error("failed to deliver to session {0}: connection closed")]
    SendFailed(SessionId),
}

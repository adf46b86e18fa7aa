//! Unified error type for the room lifecycle.

use roomkit_handler::HandlerFault;
use roomkit_protocol::SessionId;
use roomkit_session::SessionError;

/// Errors that can occur during room lifecycle operations.
///
/// Wraps the sub-crate errors with `#[from]`, so `?` converts them
/// automatically.
#[derive(Debug, thiserror::Error)]
pub enum RoomError {
    /// A room-create request is missing a required field. Fatal to the
    /// create attempt; no room state is retained.
    #[error("invalid create request: {0}")]
    InvalidRequest(&'static str),

    /// A lifecycle event arrived before `create` completed, so no
    /// handler is attached yet.
    #[error("room handler not initialized")]
    NotCreated,

    /// A session-level error (not found, duplicate, delivery failure).
    #[error(transparent)]
    Session(#[from] SessionError),

    /// A game-logic handler callback failed.
    #[error(transparent)]
    Handler(#[from] HandlerFault),

    /// The reconnection grace period elapsed without a rejoin. Routed
    /// into the shared cleanup path, never surfaced to external callers.
    #[error("reconnection window expired for session {0}")]
    ReconnectionExpired(SessionId),

    /// A second leave arrived for a session that already has an open
    /// reconnection window. Unsupported input — windows never overlap
    /// for the same session id.
    #[error("reconnection already pending for session {0}")]
    ReconnectionPending(SessionId),
}

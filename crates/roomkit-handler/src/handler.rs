//! The `RoomHandler` trait — the extension point for game developers.
//!
//! The lifecycle driver calls these methods at the right time; the
//! developer just writes game rules. Every method has a no-op-safe
//! default, so a handler only overrides what it cares about.

use async_trait::async_trait;
use roomkit_protocol::{JoinPayload, SessionId};

use crate::HandlerError;

/// Default patch rate in state broadcasts per second.
pub const DEFAULT_PATCH_RATE: f64 = 20.0;

/// Default — and hard maximum — number of clients per room.
pub const DEFAULT_MAX_PLAYERS: usize = 200;

/// The callback contract a game-logic handler implements.
///
/// One handler instance is created per room at create-time and owned
/// exclusively by that room. Methods take `&self`: a handler that
/// mutates state manages its own interior mutability, because callbacks
/// for different sessions may be in flight concurrently (a reconnection
/// wait for session A must not block events for session B).
#[async_trait]
pub trait RoomHandler: Send + Sync + 'static {
    /// Called once while the room is being created. The room is not
    /// joinable until this completes. An error aborts room creation.
    async fn create(&self) -> Result<(), HandlerError> {
        Ok(())
    }

    /// State broadcast rate in messages per second.
    ///
    /// Read exactly once, after `create` completes; never re-read.
    /// Non-positive values fall back to [`DEFAULT_PATCH_RATE`].
    fn patch_rate(&self) -> f64 {
        DEFAULT_PATCH_RATE
    }

    /// Maximum clients this room accepts.
    ///
    /// Read exactly once, after `create` completes; never re-read.
    /// Capped at [`DEFAULT_MAX_PLAYERS`], and 0 falls back to the cap.
    fn max_players(&self) -> usize {
        DEFAULT_MAX_PLAYERS
    }

    /// Called once per accepted client. An error rejects that client's
    /// connection.
    async fn join(&self, _payload: JoinPayload) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called immediately before each periodic state broadcast.
    async fn before_patch(&self) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called when a client drops ungracefully while other clients
    /// remain. Returns the reconnection grace period in milliseconds;
    /// 0 means reconnection is not permitted and the client is treated
    /// as departed.
    async fn disconnect(&self, _session_id: &SessionId) -> Result<u64, HandlerError> {
        Ok(0)
    }

    /// Terminal cleanup for any leave outcome: graceful leave, refused
    /// reconnection, or an expired grace period.
    async fn leave(&self, _session_id: &SessionId) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called when a disconnected client rejoins within its grace
    /// period. `leave` is not called in that case.
    async fn reconnect(&self, _session_id: &SessionId) -> Result<(), HandlerError> {
        Ok(())
    }

    /// Called once when the room is disposed.
    async fn shutdown(&self) -> Result<(), HandlerError> {
        Ok(())
    }
}

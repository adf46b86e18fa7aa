//! The handler bridge: the surface the lifecycle driver actually calls.
//!
//! The bridge wraps the opaque handler and fixes two policies in one
//! place:
//!
//! - every fault is labeled with the callback that raised it
//!   ([`HandlerFault`]);
//! - callbacks that have a caller to report to (`create`, `join`,
//!   `disconnect`, `reconnect`) propagate their faults, while terminal
//!   best-effort callbacks (`leave`, `before_patch`, `shutdown`) log
//!   and swallow them — there is nobody left to reject.

use std::sync::Arc;

use roomkit_protocol::{JoinPayload, SessionId};

use crate::{HandlerFault, RoomHandler};

/// Adapter between the lifecycle driver and a room's handler.
///
/// Cheap to clone — it is an `Arc` wrapper.
#[derive(Clone)]
pub struct HandlerBridge {
    inner: Arc<dyn RoomHandler>,
}

impl HandlerBridge {
    /// Wraps a resolved handler.
    pub fn new(inner: Arc<dyn RoomHandler>) -> Self {
        Self { inner }
    }

    /// Invokes the handler's `create` callback.
    pub async fn create(&self) -> Result<(), HandlerFault> {
        self.inner
            .create()
            .await
            .map_err(|e| HandlerFault::new("create", e))
    }

    /// The handler's requested patch rate, uncoerced.
    pub fn patch_rate(&self) -> f64 {
        self.inner.patch_rate()
    }

    /// The handler's requested client limit, uncapped.
    pub fn max_players(&self) -> usize {
        self.inner.max_players()
    }

    /// Invokes `join`; the caller must reject the client on error.
    pub async fn join(&self, payload: JoinPayload) -> Result<(), HandlerFault> {
        self.inner
            .join(payload)
            .await
            .map_err(|e| HandlerFault::new("join", e))
    }

    /// Invokes `before_patch`. Faults are logged, never propagated —
    /// the periodic broadcast must go on.
    pub async fn before_patch(&self) {
        if let Err(e) = self.inner.before_patch().await {
            tracing::error!(callback = "before_patch", error = %e, "handler fault");
        }
    }

    /// Invokes `disconnect` and returns the reconnection grace period in
    /// milliseconds (0 = reconnection not permitted).
    pub async fn disconnect(&self, session_id: &SessionId) -> Result<u64, HandlerFault> {
        self.inner
            .disconnect(session_id)
            .await
            .map_err(|e| HandlerFault::new("disconnect", e))
    }

    /// Invokes `leave`. Faults are logged, never propagated — this is
    /// the terminal cleanup path.
    pub async fn leave(&self, session_id: &SessionId) {
        if let Err(e) = self.inner.leave(session_id).await {
            tracing::error!(
                callback = "leave",
                session = %session_id,
                error = %e,
                "handler fault"
            );
        }
    }

    /// Invokes `reconnect`; an error routes the session into the shared
    /// cleanup path.
    pub async fn reconnect(&self, session_id: &SessionId) -> Result<(), HandlerFault> {
        self.inner
            .reconnect(session_id)
            .await
            .map_err(|e| HandlerFault::new("reconnect", e))
    }

    /// Invokes `shutdown`. Faults are logged, never propagated — the
    /// room is tearing down.
    pub async fn shutdown(&self) {
        if let Err(e) = self.inner.shutdown().await {
            tracing::error!(callback = "shutdown", error = %e, "handler fault");
        }
    }
}

//! Message routing: directed and broadcast delivery to connected
//! clients.

use std::collections::HashSet;
use std::sync::Arc;

use roomkit_protocol::{Outbound, SessionId};
use roomkit_session::ClientRegistry;
use serde_json::Value;
use tokio::sync::Mutex;

use crate::RoomError;

/// Delivers messages to the connected sessions of one room.
///
/// Shares the client registry with the [`RoomDriver`](crate::RoomDriver)
/// that created it. Cheap to clone.
#[derive(Clone)]
pub struct MessageRouter {
    registry: Arc<Mutex<ClientRegistry>>,
}

impl MessageRouter {
    pub(crate) fn new(registry: Arc<Mutex<ClientRegistry>>) -> Self {
        Self { registry }
    }

    /// Sends a message to one session.
    ///
    /// # Errors
    /// - [`SessionError::NotFound`](roomkit_session::SessionError) if the
    ///   session is unknown, departed, or waiting out a reconnection
    ///   window (nothing is listening on its channel).
    /// - [`SessionError::SendFailed`](roomkit_session::SessionError) if
    ///   the transport dropped the channel; logged and re-raised so the
    ///   caller can react, e.g. treat the client as left.
    pub async fn send_to_session(
        &self,
        kind: &str,
        payload: Value,
        session_id: &SessionId,
    ) -> Result<(), RoomError> {
        let registry = self.registry.lock().await;
        let session = registry.get(session_id)?;
        if !session.is_connected() {
            return Err(roomkit_session::SessionError::NotFound(session_id.clone()).into());
        }
        session
            .send(Outbound::Message {
                kind: kind.to_string(),
                payload,
            })
            .map_err(|e| {
                tracing::error!(session = %session_id, error = %e, "error sending message");
                e
            })?;
        Ok(())
    }

    /// Broadcasts a message to every connected session except those in
    /// `except`.
    ///
    /// Excluded ids that no longer resolve (the client already left) are
    /// silently dropped. Delivery to each recipient is independent: a
    /// dead channel is logged and skipped, never blocking the rest.
    /// Returns the number of sessions the message was delivered to.
    pub async fn broadcast(&self, kind: &str, payload: Value, except: &[SessionId]) -> usize {
        // Resolve the exclusion list against live sessions only.
        let registry = self.registry.lock().await;
        let excluded: HashSet<&SessionId> = except
            .iter()
            .filter(|id| registry.get(id).is_ok())
            .collect();

        let mut delivered = 0;
        for session in registry.connected() {
            if excluded.contains(&session.session_id) {
                continue;
            }
            let event = Outbound::Message {
                kind: kind.to_string(),
                payload: payload.clone(),
            };
            match session.send(event) {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::warn!(
                        session = %session.session_id,
                        error = %e,
                        "broadcast recipient unreachable, skipping"
                    );
                }
            }
        }
        delivered
    }
}

//! The room lifecycle driver: the state machine behind one room.
//!
//! The host framework delivers lifecycle events — create, client join,
//! client leave, periodic patch tick, dispose — and the driver updates
//! the client registry, invokes the handler callbacks through the
//! bridge, and calls back into the host. Events are handled to
//! completion or to their first suspension point; the registry and the
//! window table sit behind mutexes whose locks are never held across a
//! handler await or a reconnection wait, so a wait for session A never
//! blocks events for session B.
//!
//! Per room: `uninitialized → creating → active → disposing → disposed`,
//! with the room discarded on create failure. Per client session:
//! `connected → pending-reconnect → {connected | left}` on an ungraceful
//! leave, or straight to `left` on a graceful or last-client leave.

use std::fmt;
use std::sync::Arc;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use roomkit_handler::{HandlerBridge, HandlerFault, HandlerResolver};
use roomkit_protocol::{
    CreateOptions, DEBUG_USER_ID, JoinOptions, JoinPayload, Outbound, RoomMetadata, SessionId,
    short_id,
};
use roomkit_session::{ClientRegistry, ClientSession, SessionSender};
use serde_json::Value;
use tokio::sync::Mutex;

use crate::reconnect::ReconnectTable;
use crate::{MessageRouter, RoomConfig, RoomError, RoomHost};

/// Room identity fixed at create-time.
#[derive(Debug)]
struct RoomIdentity {
    game_id: String,
    client_room_id: String,
    game_data: Value,
}

/// The lifecycle driver for one logical game room.
///
/// Owns the client registry, the reconnection windows, and (after a
/// successful create) the handler bridge. One driver per room; nothing
/// is shared across rooms.
pub struct RoomDriver {
    config: RoomConfig,
    host: Arc<dyn RoomHost>,
    resolver: Arc<HandlerResolver>,
    /// Short random id used only to correlate log lines of this
    /// instance. Not an identity.
    instance_id: String,
    identity: OnceLock<RoomIdentity>,
    bridge: OnceLock<HandlerBridge>,
    registry: Arc<Mutex<ClientRegistry>>,
    windows: Mutex<ReconnectTable>,
    disposed: AtomicBool,
    router: MessageRouter,
}

impl RoomDriver {
    /// Creates a driver for a not-yet-created room.
    ///
    /// The room becomes usable once [`create`](Self::create) succeeds.
    pub fn new(
        config: RoomConfig,
        resolver: Arc<HandlerResolver>,
        host: Arc<dyn RoomHost>,
    ) -> Arc<Self> {
        let registry = Arc::new(Mutex::new(ClientRegistry::new()));
        let router = MessageRouter::new(Arc::clone(&registry));
        Arc::new(Self {
            config: config.validated(),
            host,
            resolver,
            instance_id: short_id(),
            identity: OnceLock::new(),
            bridge: OnceLock::new(),
            registry,
            windows: Mutex::new(ReconnectTable::new()),
            disposed: AtomicBool::new(false),
            router,
        })
    }

    // -- Lifecycle events ---------------------------------------------------

    /// Handles the room-create request.
    ///
    /// Validates the options, resolves and creates the handler, then
    /// applies the handler's patch rate and client limit and publishes
    /// the room metadata through the host.
    ///
    /// # Errors
    /// - [`RoomError::InvalidRequest`] when `game_id` is missing or
    ///   empty; no room state is retained.
    /// - [`RoomError::Handler`] when handler resolution or its `create`
    ///   callback fails. Either way the failure is logged, re-thrown,
    ///   and the host is expected to discard the driver.
    pub async fn create(&self, options: CreateOptions) -> Result<(), RoomError> {
        match self.create_inner(options).await {
            Ok(()) => Ok(()),
            Err(e) => {
                tracing::error!(room = %self.instance_id, error = %e, "error creating room");
                Err(e)
            }
        }
    }

    async fn create_inner(&self, options: CreateOptions) -> Result<(), RoomError> {
        let game_id = match options.game_id {
            Some(id) if !id.is_empty() => id,
            _ => return Err(RoomError::InvalidRequest("gameId is required")),
        };
        let identity = RoomIdentity {
            game_id,
            client_room_id: options.client_room_id.unwrap_or_default(),
            game_data: options.game_data,
        };
        if self.identity.set(identity).is_err() {
            return Err(RoomError::InvalidRequest("room already created"));
        }
        let identity = self.identity.get().expect("just set");

        // Process-lifetime fault observability; idempotent.
        crate::fault::install_process_hooks();

        let handler = self
            .resolver
            .resolve(&identity.game_data)
            .map_err(|e| HandlerFault::new("resolve", e))?;
        let bridge = HandlerBridge::new(handler);

        tracing::info!(
            game = %identity.game_id,
            room = %self.instance_id,
            "creating room"
        );
        bridge.create().await?;

        if self.is_disposed() {
            tracing::warn!(
                room = %self.instance_id,
                "room disposed while create was in flight, aborting setup"
            );
            return Ok(());
        }

        // Read once; immutable from here on.
        let patch_rate =
            effective_patch_rate(bridge.patch_rate(), self.config.default_patch_rate);
        let max_clients =
            effective_max_clients(bridge.max_players(), self.config.max_clients_cap);
        let _ = self.bridge.set(bridge);

        self.host
            .set_patch_interval(Duration::from_secs_f64(1.0 / patch_rate));
        self.host.set_max_clients(max_clients);
        self.host.set_metadata(RoomMetadata {
            game_id: identity.game_id.clone(),
            client_room_id: identity.client_room_id.clone(),
            name: options.game_name.unwrap_or_else(|| "-".to_string()),
        });
        Ok(())
    }

    /// Notifies the handler that a periodic state broadcast is about to
    /// go out. Handler faults are logged, never raised — the broadcast
    /// proceeds regardless.
    pub async fn before_patch(&self) {
        if let Ok(bridge) = self.bridge() {
            bridge.before_patch().await;
        }
    }

    /// Handles a client join (or a rejoin within a reconnection window).
    ///
    /// A join whose `userId` is the debug sentinel registers no session
    /// and invokes no handler callback. A rejoin cancels the open window
    /// and restores the session without re-invoking `join`.
    ///
    /// # Errors
    /// Propagates handler `join` faults — the host must reject the
    /// client. The just-registered session is removed first, so a
    /// rejected join leaves no residue.
    pub async fn join(
        &self,
        session_id: SessionId,
        sender: SessionSender,
        options: JoinOptions,
        auth: Value,
    ) -> Result<(), RoomError> {
        // Health checks probe with a reserved user id; no side effects.
        if options.user_id.as_deref() == Some(DEBUG_USER_ID) {
            return Ok(());
        }

        if self.windows.lock().await.resolve(&session_id) {
            self.registry
                .lock()
                .await
                .mark_connected(&session_id, sender)?;
            tracing::info!(
                session = %session_id,
                room = %self.instance_id,
                "session rejoined within grace window"
            );
            return Ok(());
        }

        tracing::info!(
            session = %session_id,
            game = self.game_id().unwrap_or("-"),
            room = %self.instance_id,
            "client connected"
        );

        self.registry
            .lock()
            .await
            .insert(ClientSession::new(session_id.clone(), sender))?;

        let payload = JoinPayload {
            id: session_id.clone(),
            auth,
            options,
        };
        match self.bridge()?.join(payload).await {
            Ok(()) => Ok(()),
            Err(fault) => {
                // The host rejects the connection; forget the session.
                self.registry.lock().await.remove(&session_id);
                Err(fault.into())
            }
        }
    }

    /// Handles a client leave.
    ///
    /// Graceful leaves (`consented`) and last-client leaves go straight
    /// to cleanup. An ungraceful leave with other clients present asks
    /// the handler for a reconnection grace period and waits it out:
    /// a rejoin within the window restores the session (`reconnect`
    /// fires, no cleanup), anything else — expiry, a refused window, a
    /// handler fault — falls through to cleanup. Cleanup itself never
    /// fails: the handler's `leave` fires, and if no connected clients
    /// remain the room disconnection is initiated.
    ///
    /// # Errors
    /// [`RoomError::ReconnectionPending`] when a leave arrives for a
    /// session that already has an open window. That input is not part
    /// of the protocol; no second window is opened and no cleanup runs.
    pub async fn leave(&self, session_id: &SessionId, consented: bool) -> Result<(), RoomError> {
        if self.windows.lock().await.is_open(session_id) {
            return Err(RoomError::ReconnectionPending(session_id.clone()));
        }

        tracing::info!(
            session = %session_id,
            consented,
            room = %self.instance_id,
            "client disconnected"
        );

        if !consented {
            match self.await_reconnection(session_id).await {
                Ok(true) => return Ok(()),
                Ok(false) => {}
                Err(e) => {
                    tracing::info!(
                        session = %session_id,
                        error = %e,
                        "reconnection not completed"
                    );
                }
            }
        }

        self.finalize_leave(session_id).await;
        Ok(())
    }

    /// Waits for the session to rejoin within the handler-granted grace
    /// period.
    ///
    /// `Ok(true)` — the client is back, no cleanup must run.
    /// `Ok(false)` — no window was opened (last client, refused, or the
    /// session is unknown). `Err` — the window expired or a handler
    /// callback failed. Both of the latter fall through to cleanup.
    async fn await_reconnection(&self, session_id: &SessionId) -> Result<bool, RoomError> {
        {
            let mut registry = self.registry.lock().await;
            if registry.mark_pending(session_id).is_err() {
                return Ok(false);
            }
            if registry.connected_count() == 0 {
                // Last connected client just dropped; the room is about
                // to go empty, so there is nothing to wait for.
                return Ok(false);
            }
        }

        let timeout_ms = self.bridge()?.disconnect(session_id).await?;
        if timeout_ms == 0 {
            tracing::warn!(session = %session_id, "handler permits no reconnection");
            return Ok(false);
        }

        let rx = self.windows.lock().await.open(session_id.clone())?;
        tracing::info!(
            session = %session_id,
            timeout_secs = timeout_ms as f64 / 1000.0,
            "client disconnected, waiting for reconnection"
        );

        let outcome = tokio::time::timeout(Duration::from_millis(timeout_ms), rx).await;
        self.windows.lock().await.close(session_id);

        match outcome {
            Ok(Ok(())) => {
                if self.is_disposed() {
                    return Ok(true);
                }
                tracing::info!(session = %session_id, "client reconnected");
                self.bridge()?.reconnect(session_id).await?;
                Ok(true)
            }
            // Elapsed, or the window was torn down under us.
            _ => Err(RoomError::ReconnectionExpired(session_id.clone())),
        }
    }

    /// The shared cleanup path, terminal for every leave outcome. Never
    /// raises: handler faults are swallowed by the bridge, and an
    /// unknown session just means there is nothing left to remove.
    async fn finalize_leave(&self, session_id: &SessionId) {
        if let Ok(bridge) = self.bridge() {
            bridge.leave(session_id).await;
        }

        let remaining = {
            let mut registry = self.registry.lock().await;
            registry.remove(session_id);
            registry.connected_count()
        };

        if remaining == 0 {
            tracing::info!(room = %self.instance_id, "no more connections, closing room");
            self.host.initiate_disconnect();
        }
    }

    /// Logs an exception the host framework caught in one of the room's
    /// callbacks. Observability only — room state is untouched and no
    /// recovery is attempted.
    pub fn uncaught_exception(&self, error: &dyn fmt::Display, method_name: &str) {
        tracing::error!(
            room = %self.instance_id,
            callback = method_name,
            error = %error,
            "uncaught exception"
        );
    }

    /// Disposes the room. Idempotent: only the first call runs the
    /// handler's `shutdown` (faults logged, the teardown proceeds).
    /// A singleton room additionally asks the host to terminate the
    /// process.
    pub async fn dispose(&self) {
        if self.disposed.swap(true, Ordering::SeqCst) {
            return;
        }

        tracing::info!(room = %self.instance_id, "room disposed");

        if let Some(bridge) = self.bridge.get() {
            bridge.shutdown().await;
        }

        if self.config.singleton {
            tracing::info!(
                room = %self.instance_id,
                "singleton room disposed, terminating process"
            );
            self.host.terminate_process();
        }
    }

    // -- Client operations --------------------------------------------------

    /// Forcibly disconnects one client with the given close code.
    ///
    /// A missing session is logged and ignored — the client is already
    /// gone, which is the outcome being asked for.
    pub async fn disconnect_client(&self, session_id: &SessionId, reason: u32) {
        let registry = self.registry.lock().await;
        match registry.get(session_id) {
            Ok(session) => {
                if let Err(e) = session.send(Outbound::Kick { reason }) {
                    tracing::error!(
                        session = %session_id,
                        error = %e,
                        "failed to deliver kick"
                    );
                }
            }
            Err(_) => {
                tracing::error!(session = %session_id, "connection not found");
            }
        }
    }

    // -- Accessors ----------------------------------------------------------

    /// The message router for this room's sessions.
    pub fn router(&self) -> &MessageRouter {
        &self.router
    }

    /// Diagnostic instance id, for log correlation.
    pub fn instance_id(&self) -> &str {
        &self.instance_id
    }

    /// The logical game id, once the room is created.
    pub fn game_id(&self) -> Option<&str> {
        self.identity.get().map(|i| i.game_id.as_str())
    }

    /// The opaque client-side room id, once the room is created.
    pub fn client_room_id(&self) -> Option<&str> {
        self.identity.get().map(|i| i.client_room_id.as_str())
    }

    /// Returns `true` once [`dispose`](Self::dispose) has run.
    pub fn is_disposed(&self) -> bool {
        self.disposed.load(Ordering::SeqCst)
    }

    /// Number of currently connected sessions.
    pub async fn connected_count(&self) -> usize {
        self.registry.lock().await.connected_count()
    }

    fn bridge(&self) -> Result<&HandlerBridge, RoomError> {
        self.bridge.get().ok_or(RoomError::NotCreated)
    }
}

/// The patch rate actually applied: the handler's request when it is a
/// positive number, the configured fallback otherwise.
fn effective_patch_rate(requested: f64, fallback: f64) -> f64 {
    if requested.is_finite() && requested > 0.0 {
        requested
    } else {
        fallback
    }
}

/// The client limit actually applied: the handler's request capped at
/// the configured maximum, with 0 meaning "no preference".
fn effective_max_clients(requested: usize, cap: usize) -> usize {
    if requested == 0 { cap } else { requested.min(cap) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_patch_rate_accepts_positive() {
        assert_eq!(effective_patch_rate(30.0, 20.0), 30.0);
        assert_eq!(effective_patch_rate(0.5, 20.0), 0.5);
    }

    #[test]
    fn test_effective_patch_rate_coerces_bad_values() {
        assert_eq!(effective_patch_rate(0.0, 20.0), 20.0);
        assert_eq!(effective_patch_rate(-5.0, 20.0), 20.0);
        assert_eq!(effective_patch_rate(f64::NAN, 20.0), 20.0);
        assert_eq!(effective_patch_rate(f64::INFINITY, 20.0), 20.0);
    }

    #[test]
    fn test_effective_max_clients_caps_and_defaults() {
        assert_eq!(effective_max_clients(50, 200), 50);
        assert_eq!(effective_max_clients(500, 200), 200);
        assert_eq!(effective_max_clients(0, 200), 200);
        assert_eq!(effective_max_clients(200, 200), 200);
    }
}

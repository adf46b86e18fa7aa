//! A minimal room: every joined client gets its messages echoed back.
//!
//! There is no network here — the demo plays the host framework's part
//! itself, driving one room through a full lifecycle: create, two joins,
//! a directed echo, a broadcast, an ungraceful drop with a rejoin inside
//! the grace window, and finally dispose.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use roomkit::prelude::*;
use serde_json::{Value, json};
use tokio::sync::mpsc;

// ---------------------------------------------------------------------------
// Game logic
// ---------------------------------------------------------------------------

struct EchoHandler;

#[async_trait]
impl RoomHandler for EchoHandler {
    async fn create(&self) -> Result<(), HandlerError> {
        tracing::info!("echo room ready");
        Ok(())
    }

    fn max_players(&self) -> usize {
        8
    }

    async fn join(&self, payload: JoinPayload) -> Result<(), HandlerError> {
        tracing::info!(session = %payload.id, "player joined the echo room");
        Ok(())
    }

    async fn disconnect(&self, session_id: &SessionId) -> Result<u64, HandlerError> {
        tracing::info!(session = %session_id, "granting a 2s reconnection window");
        Ok(2_000)
    }

    async fn reconnect(&self, session_id: &SessionId) -> Result<(), HandlerError> {
        tracing::info!(session = %session_id, "welcome back");
        Ok(())
    }

    async fn leave(&self, session_id: &SessionId) -> Result<(), HandlerError> {
        tracing::info!(session = %session_id, "player left for good");
        Ok(())
    }

    async fn shutdown(&self) -> Result<(), HandlerError> {
        tracing::info!("echo room shutting down");
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Host binding
// ---------------------------------------------------------------------------

/// A host that just logs what the room asks of it.
struct LoggingHost;

impl RoomHost for LoggingHost {
    fn set_metadata(&self, metadata: RoomMetadata) {
        tracing::info!(game = %metadata.game_id, name = %metadata.name, "metadata published");
    }

    fn set_patch_interval(&self, interval: Duration) {
        tracing::info!(?interval, "patch interval set");
    }

    fn set_max_clients(&self, max_clients: usize) {
        tracing::info!(max_clients, "client limit set");
    }

    fn initiate_disconnect(&self) {
        tracing::info!("room is empty, host would tear it down now");
    }

    fn terminate_process(&self) {
        tracing::info!("host would exit the process now");
    }
}

// ---------------------------------------------------------------------------
// Demo driver
// ---------------------------------------------------------------------------

/// Spawns a task that prints everything pushed to one client's channel,
/// standing in for the transport.
fn attach_printer(name: &'static str, mut rx: mpsc::UnboundedReceiver<Outbound>) {
    tokio::spawn(async move {
        while let Some(event) = rx.recv().await {
            match event {
                Outbound::Message { kind, payload } => {
                    tracing::info!(client = name, kind, %payload, "received")
                }
                Outbound::Kick { reason } => {
                    tracing::info!(client = name, reason, "kicked");
                    break;
                }
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let mut resolver = HandlerResolver::new();
    resolver.register(
        "echo",
        Arc::new(|_: &Value| -> Result<Arc<dyn RoomHandler>, HandlerError> {
            Ok(Arc::new(EchoHandler))
        }),
    );

    let driver = RoomDriver::new(
        RoomConfig::default(),
        Arc::new(resolver),
        Arc::new(LoggingHost),
    );

    driver
        .create(CreateOptions {
            game_id: Some("echo".to_string()),
            game_name: Some("Echo Chamber".to_string()),
            game_data: json!({ "handler": "echo" }),
            ..CreateOptions::default()
        })
        .await?;

    // Two clients join.
    let alice = SessionId::from("alice");
    let bob = SessionId::from("bob");
    let (tx_a, rx_a) = mpsc::unbounded_channel();
    let (tx_b, rx_b) = mpsc::unbounded_channel();
    attach_printer("alice", rx_a);
    attach_printer("bob", rx_b);
    driver
        .join(alice.clone(), tx_a, JoinOptions::default(), Value::Null)
        .await?;
    driver
        .join(bob.clone(), tx_b, JoinOptions::default(), Value::Null)
        .await?;

    // Echo a message back to its sender, then tell everyone else.
    let router = driver.router();
    router
        .send_to_session("echo", json!({ "text": "hello alice" }), &alice)
        .await?;
    let delivered = router
        .broadcast("chat", json!({ "text": "alice said something" }), &[alice.clone()])
        .await;
    tracing::info!(delivered, "broadcast done");

    // Bob's connection drops; he comes back inside the grace window.
    let leave = {
        let driver = driver.clone();
        let bob = bob.clone();
        tokio::spawn(async move { driver.leave(&bob, false).await })
    };
    tokio::time::sleep(Duration::from_millis(300)).await;
    let (tx_b2, rx_b2) = mpsc::unbounded_channel();
    attach_printer("bob", rx_b2);
    driver
        .join(bob.clone(), tx_b2, JoinOptions::default(), Value::Null)
        .await?;
    leave.await??;

    // Everyone leaves for real, then the room is disposed.
    driver.leave(&alice, true).await?;
    driver.leave(&bob, true).await?;
    driver.dispose().await;

    // Let the printer tasks drain.
    tokio::time::sleep(Duration::from_millis(50)).await;
    Ok(())
}

//! # Roomkit
//!
//! Per-room multiplayer session lifecycle management.
//!
//! Roomkit owns the hardest part of a game-room server: the lifecycle
//! state machine of a single room instance, the connection state of each
//! participating client, and the reconnection grace-period protocol that
//! keeps a room alive across transient disconnects. Everything else —
//! transport, state-patch encoding, game rules — lives behind traits.
//!
//! # Key types
//!
//! - [`RoomDriver`] — the lifecycle state machine; the host framework
//!   delivers create/join/leave/dispose events to it.
//! - [`MessageRouter`] — directed and broadcast delivery to connected
//!   clients.
//! - [`RoomHost`] — the operations Roomkit calls back into the host
//!   framework with (metadata, patch rate, room disconnection).
//! - [`RoomHandler`](roomkit_handler::RoomHandler) — the seven-callback
//!   game-logic contract (re-exported from `roomkit-handler`).
//!
//! # Lifecycle
//!
//! ```text
//! create(options) ──→ active ──→ dispose()
//!                       │
//!          join/leave/rejoin per client, before_patch per tick
//! ```

mod config;
mod driver;
mod error;
mod fault;
mod host;
mod reconnect;
mod router;

pub use config::RoomConfig;
pub use driver::RoomDriver;
pub use error::RoomError;
pub use fault::install_process_hooks;
pub use host::RoomHost;
pub use router::MessageRouter;

/// Convenience re-exports for host processes embedding Roomkit.
pub mod prelude {
    pub use crate::{MessageRouter, RoomConfig, RoomDriver, RoomError, RoomHost};
    pub use roomkit_handler::{
        DefaultHandler, HandlerBridge, HandlerError, HandlerFactory, HandlerFault,
        HandlerResolver, RoomHandler,
    };
    pub use roomkit_protocol::{
        CreateOptions, JoinOptions, JoinPayload, Outbound, RoomMetadata, SessionId,
    };
    pub use roomkit_session::{ClientRegistry, ClientSession, SessionError, SessionSender};
}

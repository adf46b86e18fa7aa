//! Client session tracking for Roomkit.
//!
//! This crate owns the per-room record of who is connected:
//!
//! 1. **Sessions** ([`ClientSession`]) — one per accepted connection,
//!    carrying the outbound channel back to the transport.
//! 2. **States** ([`SessionState`]) — connected, or waiting out a
//!    reconnection grace period.
//! 3. **The registry** ([`ClientRegistry`]) — lookup by session id,
//!    connected counts, state transitions.
//!
//! # How it fits in the stack
//!
//! ```text
//! Room layer (above)  ← drives state transitions on join/leave/rejoin
//!     ↕
//! Session layer (this crate)  ← records connection state per session id
//!     ↕
//! Protocol layer (below)  ← provides SessionId, Outbound
//! ```

mod error;
mod registry;
mod session;

pub use error::SessionError;
pub use registry::ClientRegistry;
pub use session::{ClientSession, SessionSender, SessionState};

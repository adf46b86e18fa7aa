//! The game-logic handler contract for Roomkit.
//!
//! Roomkit does not implement game rules — that is the handler's job.
//! This crate defines the seam between the two:
//!
//! - [`RoomHandler`] — the seven-callback trait a game implements
//!   (`create`, `join`, `before_patch`, `disconnect`, `leave`,
//!   `reconnect`, `shutdown`), plus the `patch_rate` / `max_players`
//!   properties read once after create.
//! - [`DefaultHandler`] — the no-op fallback used when no concrete
//!   handler resolves from the room's game data.
//! - [`HandlerResolver`] / [`HandlerFactory`] — an explicit registry of
//!   factories keyed by game data, replacing dynamic lookup.
//! - [`HandlerBridge`] — the adapter the lifecycle driver calls. It
//!   labels faults with the callback that raised them and applies the
//!   fault policy: callbacks with a caller to report to propagate,
//!   terminal best-effort callbacks log and swallow.

mod bridge;
mod default;
mod error;
mod handler;
mod resolver;

pub use bridge::HandlerBridge;
pub use default::DefaultHandler;
pub use error::{HandlerError, HandlerFault};
pub use handler::{DEFAULT_MAX_PLAYERS, DEFAULT_PATCH_RATE, RoomHandler};
pub use resolver::{HandlerFactory, HandlerResolver};

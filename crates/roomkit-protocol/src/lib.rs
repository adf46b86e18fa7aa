//! Shared types for Roomkit.
//!
//! This crate is the vocabulary the other layers speak:
//!
//! - **Identity** ([`SessionId`]) — who a connection is.
//! - **Outbound events** ([`Outbound`]) — what a room pushes to a client.
//! - **Lifecycle options** ([`CreateOptions`], [`JoinOptions`],
//!   [`JoinPayload`]) — what the host framework hands the room on
//!   create/join.
//! - **Metadata** ([`RoomMetadata`]) — what the room publishes back to
//!   the host for discovery.
//!
//! It knows nothing about connections, handlers, or rooms — it only
//! defines the data that flows between them. Wire encoding of state
//! patches is the host framework's concern, not ours.

mod types;

pub use types::{
    CreateOptions, DEBUG_USER_ID, DEFAULT_KICK_REASON, JoinOptions,
    JoinPayload, Outbound, RoomMetadata, SessionId, short_id,
};

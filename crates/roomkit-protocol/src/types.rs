//! Identity, option, and outbound-event types shared across the workspace.

use std::fmt;

use rand::Rng;
use serde::{Deserialize, Serialize};
use serde_json::Value;

// ---------------------------------------------------------------------------
// Identity
// ---------------------------------------------------------------------------

/// A unique identifier for one client's connection attempt within a room.
///
/// Opaque string assigned by the host framework when the connection is
/// accepted. A session id is never reused across rooms — every connection
/// attempt gets a fresh one, and a session belongs to exactly one room
/// for its lifetime.
///
/// `#[serde(transparent)]` serializes this as the bare string, not as a
/// wrapper object.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(pub String);

impl SessionId {
    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for SessionId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for SessionId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// Reserved `userId` value used by health checks. A join carrying this id
/// must register no session and invoke no handler callback.
pub const DEBUG_USER_ID: &str = "debug";

/// Default close code when a client is forcibly disconnected.
pub const DEFAULT_KICK_REASON: u32 = 4000;

// ---------------------------------------------------------------------------
// Outbound events
// ---------------------------------------------------------------------------

/// An event pushed from the room to one client's connection handler.
///
/// Each connected session owns an unbounded channel of these; the
/// transport side drains it and puts the events on the wire however it
/// likes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Outbound {
    /// An application message, identified by a type tag.
    Message {
        /// Message type tag (routing key on the client).
        kind: String,
        /// Arbitrary JSON payload.
        payload: Value,
    },
    /// The room is forcibly closing this connection.
    Kick {
        /// Close code forwarded to the transport.
        reason: u32,
    },
}

// ---------------------------------------------------------------------------
// Lifecycle options
// ---------------------------------------------------------------------------

/// Options carried by a room-create request.
///
/// Field names are camelCase on the wire to match the host framework's
/// JSON conventions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CreateOptions {
    /// The logical game this room hosts. Required — a create request
    /// without it is invalid.
    pub game_id: Option<String>,
    /// Opaque client-side room identifier. Defaults to empty.
    pub client_room_id: Option<String>,
    /// Arbitrary payload forwarded to handler resolution.
    pub game_data: Value,
    /// Display name published in the room metadata. Defaults to `"-"`.
    pub game_name: Option<String>,
}

/// Options carried by a client-join request.
///
/// Only `userId` is interpreted by the core (debug sentinel); everything
/// else is preserved verbatim for the handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct JoinOptions {
    /// Client-supplied user identity, if any.
    pub user_id: Option<String>,
    /// All remaining join options, untouched.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// The payload handed to the handler's `join` callback: the client's
/// join options plus the auth token and the session id the framework
/// assigned.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JoinPayload {
    /// The session id of the joining client.
    pub id: SessionId,
    /// Auth token as validated by the host framework.
    pub auth: Value,
    /// The client's join options.
    pub options: JoinOptions,
}

// ---------------------------------------------------------------------------
// Metadata
// ---------------------------------------------------------------------------

/// Room metadata published to the host framework after a successful
/// create, used for discovery and diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomMetadata {
    /// The logical game id.
    pub game_id: String,
    /// Opaque client-side room id (may be empty).
    pub client_room_id: String,
    /// Display name, `"-"` when the create request carried none.
    pub name: String,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Generates a 5-character lowercase base-36 id.
///
/// Used for the room's diagnostic instance id — short enough to grep in
/// logs, random enough to tell two instances of the same game apart. Not
/// a security token.
pub fn short_id() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    (0..5)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_short_id_length_and_charset() {
        for _ in 0..32 {
            let id = short_id();
            assert_eq!(id.len(), 5);
            assert!(id.chars().all(|c| c.is_ascii_lowercase() || c.is_ascii_digit()));
        }
    }

    #[test]
    fn test_session_id_serializes_transparent() {
        let id = SessionId::from("abc42");
        assert_eq!(serde_json::to_value(&id).unwrap(), json!("abc42"));
    }

    #[test]
    fn test_create_options_camel_case_and_defaults() {
        let opts: CreateOptions = serde_json::from_value(json!({
            "gameId": "g1",
            "gameData": { "handler": "chess" },
        }))
        .unwrap();

        assert_eq!(opts.game_id.as_deref(), Some("g1"));
        assert_eq!(opts.client_room_id, None);
        assert_eq!(opts.game_data["handler"], "chess");
        assert_eq!(opts.game_name, None);
    }

    #[test]
    fn test_join_options_preserve_unknown_fields() {
        let opts: JoinOptions = serde_json::from_value(json!({
            "userId": "u1",
            "skin": "red",
            "team": 2,
        }))
        .unwrap();

        assert_eq!(opts.user_id.as_deref(), Some("u1"));
        assert_eq!(opts.extra["skin"], "red");
        assert_eq!(opts.extra["team"], 2);
    }

    #[test]
    fn test_join_payload_round_trips_id_field() {
        let payload = JoinPayload {
            id: SessionId::from("s1"),
            auth: json!({ "token": "t" }),
            options: JoinOptions::default(),
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["id"], "s1");
        assert_eq!(v["auth"]["token"], "t");
    }
}

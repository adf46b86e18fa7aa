//! The fallback handler used when no game-specific handler resolves.

use crate::RoomHandler;

/// A handler that accepts everything and does nothing.
///
/// Used when the room's game data names no registered handler. Every
/// callback is the trait default: joins succeed, `disconnect` returns 0
/// (no reconnection window), and the default patch rate and player cap
/// apply.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultHandler;

impl RoomHandler for DefaultHandler {}

#[cfg(test)]
mod tests {
    use super::*;
    use roomkit_protocol::{JoinOptions, JoinPayload, SessionId};

    #[tokio::test]
    async fn test_default_handler_accepts_full_lifecycle() {
        let handler = DefaultHandler;
        let sid = SessionId::from("s1");

        handler.create().await.unwrap();
        handler
            .join(JoinPayload {
                id: sid.clone(),
                auth: serde_json::Value::Null,
                options: JoinOptions::default(),
            })
            .await
            .unwrap();
        handler.before_patch().await.unwrap();
        assert_eq!(
            handler.disconnect(&sid).await.unwrap(),
            0,
            "default handler permits no reconnection"
        );
        handler.leave(&sid).await.unwrap();
        handler.shutdown().await.unwrap();
    }

    #[tokio::test]
    async fn test_default_handler_reports_default_limits() {
        let handler = DefaultHandler;
        assert_eq!(handler.patch_rate(), crate::DEFAULT_PATCH_RATE);
        assert_eq!(handler.max_players(), crate::DEFAULT_MAX_PLAYERS);
    }
}

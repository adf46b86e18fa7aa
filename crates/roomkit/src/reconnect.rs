//! Reconnection windows: the grace period between an ungraceful
//! disconnect and either a rejoin or expiry.
//!
//! Each open window is a `oneshot` channel keyed by session id. The
//! leave path holds the receiver and awaits it under a timeout; the
//! rejoin path fires the sender. At most one window may be open per
//! session id at a time.

use std::collections::HashMap;

use roomkit_protocol::SessionId;
use tokio::sync::oneshot;

use crate::RoomError;

/// The open reconnection windows of one room.
///
/// Not thread-safe by itself — owned by the room and wrapped in a mutex
/// at the driver layer, same as the client registry.
#[derive(Debug, Default)]
pub struct ReconnectTable {
    windows: HashMap<SessionId, oneshot::Sender<()>>,
}

impl ReconnectTable {
    /// Creates an empty table.
    pub fn new() -> Self {
        Self {
            windows: HashMap::new(),
        }
    }

    /// Opens a window for the given session and returns the receiver the
    /// leave path will await.
    ///
    /// # Errors
    /// Returns [`RoomError::ReconnectionPending`] if a window is already
    /// open for this session — overlapping windows are not a supported
    /// input.
    pub fn open(&mut self, session_id: SessionId) -> Result<oneshot::Receiver<()>, RoomError> {
        if self.windows.contains_key(&session_id) {
            return Err(RoomError::ReconnectionPending(session_id));
        }
        let (tx, rx) = oneshot::channel();
        self.windows.insert(session_id, tx);
        Ok(rx)
    }

    /// Resolves the window for a rejoining session.
    ///
    /// Returns `true` if an open window existed and its waiter was
    /// notified. `false` means there was no window, or the waiter
    /// already gave up (expiry raced the rejoin) — either way the caller
    /// must treat this as a fresh join, not a rejoin.
    pub fn resolve(&mut self, session_id: &SessionId) -> bool {
        match self.windows.remove(session_id) {
            Some(tx) => tx.send(()).is_ok(),
            None => false,
        }
    }

    /// Closes the window without notifying, if it is still open. Called
    /// by the leave path once the wait is over, whatever the outcome.
    pub fn close(&mut self, session_id: &SessionId) {
        self.windows.remove(session_id);
    }

    /// Returns `true` if a window is open for this session.
    pub fn is_open(&self, session_id: &SessionId) -> bool {
        self.windows.contains_key(session_id)
    }

    /// Number of open windows.
    pub fn len(&self) -> usize {
        self.windows.len()
    }

    /// Returns `true` if no windows are open.
    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sid(s: &str) -> SessionId {
        SessionId::from(s)
    }

    #[test]
    fn test_open_twice_returns_reconnection_pending() {
        let mut table = ReconnectTable::new();
        let _rx = table.open(sid("a")).unwrap();

        let result = table.open(sid("a"));

        assert!(matches!(
            result,
            Err(RoomError::ReconnectionPending(id)) if id == sid("a")
        ));
    }

    #[tokio::test]
    async fn test_resolve_notifies_waiter() {
        let mut table = ReconnectTable::new();
        let rx = table.open(sid("a")).unwrap();

        assert!(table.resolve(&sid("a")));
        assert!(!table.is_open(&sid("a")));
        rx.await.expect("waiter should be notified");
    }

    #[test]
    fn test_resolve_without_window_returns_false() {
        let mut table = ReconnectTable::new();
        assert!(!table.resolve(&sid("ghost")));
    }

    #[test]
    fn test_resolve_after_waiter_dropped_returns_false() {
        // Expiry raced the rejoin: the receiver is gone but the entry
        // has not been closed yet.
        let mut table = ReconnectTable::new();
        let rx = table.open(sid("a")).unwrap();
        drop(rx);

        assert!(!table.resolve(&sid("a")));
    }

    #[test]
    fn test_close_allows_reopening() {
        let mut table = ReconnectTable::new();
        let _rx = table.open(sid("a")).unwrap();
        table.close(&sid("a"));

        assert!(table.open(sid("a")).is_ok());
        assert_eq!(table.len(), 1);
    }
}

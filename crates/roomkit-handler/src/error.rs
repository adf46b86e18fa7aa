//! Error types for the handler layer.

/// An error raised by a game-logic handler callback.
///
/// Handlers are opaque to the core — their failures are carried as
/// either a plain message or a boxed source error.
#[derive(Debug, thiserror::Error)]
pub enum HandlerError {
    /// A failure described by the handler itself.
    #[error("{0}")]
    Message(String),

    /// An underlying error the handler chose to surface.
    #[error(transparent)]
    Other(Box<dyn std::error::Error + Send + Sync>),
}

impl HandlerError {
    /// Creates a message error.
    pub fn msg(message: impl Into<String>) -> Self {
        Self::Message(message.into())
    }
}

impl From<String> for HandlerError {
    fn from(message: String) -> Self {
        Self::Message(message)
    }
}

impl From<&str> for HandlerError {
    fn from(message: &str) -> Self {
        Self::Message(message.to_string())
    }
}

/// A handler fault labeled with the callback that raised it.
///
/// Produced by [`HandlerBridge`](crate::HandlerBridge) so the driver and
/// the logs always know *which* callback failed.
#[derive(Debug, thiserror::Error)]
#[error("handler callback `{callback}` failed: {source}")]
pub struct HandlerFault {
    callback: &'static str,
    #[source]
    source: HandlerError,
}

impl HandlerFault {
    /// Labels a handler error with the callback (or resolution step)
    /// that raised it.
    pub fn new(callback: &'static str, source: HandlerError) -> Self {
        Self { callback, source }
    }

    /// The name of the callback that raised the fault.
    pub fn callback(&self) -> &'static str {
        self.callback
    }
}

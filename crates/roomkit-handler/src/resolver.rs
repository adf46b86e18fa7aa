//! Handler resolution: mapping a room's game data to a concrete handler.
//!
//! The original design looked handlers up dynamically from the game
//! payload. Here the mapping is an explicit registry: the host process
//! registers a [`HandlerFactory`] per handler key at startup, and the
//! room resolves `game_data["handler"]` against it when created. No
//! match — or no key at all — falls back to [`DefaultHandler`].

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::Value;

use crate::{DefaultHandler, HandlerError, RoomHandler};

/// The game-data field naming the handler to instantiate.
const HANDLER_KEY: &str = "handler";

/// Builds a [`RoomHandler`] instance for a new room.
///
/// Implemented by the host process for each game it serves. The blanket
/// impl below lets a plain closure act as a factory.
pub trait HandlerFactory: Send + Sync + 'static {
    /// Instantiates a handler for a room created with the given game
    /// data. An error here aborts room creation.
    fn instantiate(&self, game_data: &Value) -> Result<Arc<dyn RoomHandler>, HandlerError>;
}

impl<F> HandlerFactory for F
where
    F: Fn(&Value) -> Result<Arc<dyn RoomHandler>, HandlerError> + Send + Sync + 'static,
{
    fn instantiate(&self, game_data: &Value) -> Result<Arc<dyn RoomHandler>, HandlerError> {
        self(game_data)
    }
}

/// Registry of handler factories, keyed by the `handler` field of a
/// room's game data.
#[derive(Default)]
pub struct HandlerResolver {
    factories: HashMap<String, Arc<dyn HandlerFactory>>,
}

impl HandlerResolver {
    /// Creates an empty resolver. Every room it resolves gets the
    /// default handler until factories are registered.
    pub fn new() -> Self {
        Self {
            factories: HashMap::new(),
        }
    }

    /// Registers a factory under the given handler key, replacing any
    /// previous registration for that key.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        factory: Arc<dyn HandlerFactory>,
    ) -> &mut Self {
        self.factories.insert(key.into(), factory);
        self
    }

    /// Resolves the handler for a room created with `game_data`.
    ///
    /// Falls back to [`DefaultHandler`] when the game data names no
    /// registered factory.
    ///
    /// # Errors
    /// Propagates the factory's error if instantiation fails.
    pub fn resolve(&self, game_data: &Value) -> Result<Arc<dyn RoomHandler>, HandlerError> {
        let key = game_data.get(HANDLER_KEY).and_then(Value::as_str);
        match key.and_then(|k| self.factories.get(k)) {
            Some(factory) => {
                tracing::info!(handler = key, "room handler resolved");
                factory.instantiate(game_data)
            }
            None => {
                tracing::info!("no room handler registered, using default");
                Ok(Arc::new(DefaultHandler))
            }
        }
    }
}

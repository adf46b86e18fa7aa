//! Room configuration.

use serde::{Deserialize, Serialize};

use roomkit_handler::{DEFAULT_MAX_PLAYERS, DEFAULT_PATCH_RATE};

/// Configuration for one room instance.
///
/// These are deployment decisions, not game decisions — the handler
/// controls its own patch rate and player limit within the bounds set
/// here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoomConfig {
    /// When `true`, disposing this room terminates the hosting process
    /// (via [`RoomHost::terminate_process`](crate::RoomHost)). For
    /// deployments that dedicate one process per room. Default: `false` —
    /// room cleanup and process supervision stay separate unless a
    /// deployment explicitly couples them.
    pub singleton: bool,

    /// Patch rate applied when the handler reports a non-positive one,
    /// in broadcasts per second.
    pub default_patch_rate: f64,

    /// Hard upper bound on clients per room. The handler's
    /// `max_players` is capped here, and 0 falls back to the cap.
    pub max_clients_cap: usize,
}

impl Default for RoomConfig {
    fn default() -> Self {
        Self {
            singleton: false,
            default_patch_rate: DEFAULT_PATCH_RATE,
            max_clients_cap: DEFAULT_MAX_PLAYERS,
        }
    }
}

impl RoomConfig {
    /// Clamp and fix any out-of-range values so the config is safe to use.
    ///
    /// Called by [`RoomDriver::new`](crate::RoomDriver::new). Rules:
    /// - non-positive or non-finite `default_patch_rate` falls back to
    ///   the built-in default;
    /// - `max_clients_cap` of 0 falls back to the built-in cap.
    pub fn validated(mut self) -> Self {
        if !(self.default_patch_rate.is_finite() && self.default_patch_rate > 0.0) {
            tracing::warn!(
                rate = self.default_patch_rate,
                fallback = DEFAULT_PATCH_RATE,
                "default_patch_rate is not a positive number — using fallback"
            );
            self.default_patch_rate = DEFAULT_PATCH_RATE;
        }
        if self.max_clients_cap == 0 {
            tracing::warn!(
                fallback = DEFAULT_MAX_PLAYERS,
                "max_clients_cap of 0 — using fallback"
            );
            self.max_clients_cap = DEFAULT_MAX_PLAYERS;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_handler_defaults() {
        let config = RoomConfig::default();
        assert!(!config.singleton);
        assert_eq!(config.default_patch_rate, DEFAULT_PATCH_RATE);
        assert_eq!(config.max_clients_cap, DEFAULT_MAX_PLAYERS);
    }

    #[test]
    fn test_validated_fixes_non_positive_patch_rate() {
        let config = RoomConfig {
            default_patch_rate: 0.0,
            ..RoomConfig::default()
        }
        .validated();
        assert_eq!(config.default_patch_rate, DEFAULT_PATCH_RATE);

        let config = RoomConfig {
            default_patch_rate: f64::NAN,
            ..RoomConfig::default()
        }
        .validated();
        assert_eq!(config.default_patch_rate, DEFAULT_PATCH_RATE);
    }

    #[test]
    fn test_validated_fixes_zero_client_cap() {
        let config = RoomConfig {
            max_clients_cap: 0,
            ..RoomConfig::default()
        }
        .validated();
        assert_eq!(config.max_clients_cap, DEFAULT_MAX_PLAYERS);
    }

    #[test]
    fn test_validated_keeps_sane_values() {
        let config = RoomConfig {
            singleton: true,
            default_patch_rate: 30.0,
            max_clients_cap: 64,
        }
        .validated();
        assert!(config.singleton);
        assert_eq!(config.default_patch_rate, 30.0);
        assert_eq!(config.max_clients_cap, 64);
    }
}

//! Link configuration
//!
//! Protocol timing constants that differ between hardware profiles. The
//! firmware bakes a validated copy in at build time from `link.toml`.

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default idle window before the link is reported disconnected
pub const DEFAULT_IDLE_TIMEOUT_MS: u32 = 2000;

/// Default minimum spacing between control records
pub const DEFAULT_CONTROL_REFRESH_MS: u32 = 25;

/// Configuration validation errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ConfigError {
    /// Idle timeout must be at least 1 ms
    ZeroIdleTimeout,
    /// Control refresh interval must be at least 1 ms
    ZeroControlRefresh,
    /// Control records would be sent less often than the host times out
    RefreshExceedsTimeout,
}

/// Link timing configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct LinkConfig {
    /// No accepted frame for longer than this marks the link idle (ms)
    pub idle_timeout_ms: u32,
    /// Minimum spacing between control records (ms)
    pub control_refresh_ms: u32,
}

impl Default for LinkConfig {
    fn default() -> Self {
        Self {
            idle_timeout_ms: DEFAULT_IDLE_TIMEOUT_MS,
            control_refresh_ms: DEFAULT_CONTROL_REFRESH_MS,
        }
    }
}

impl LinkConfig {
    /// Check the configuration for values the link cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.idle_timeout_ms == 0 {
            return Err(ConfigError::ZeroIdleTimeout);
        }
        if self.control_refresh_ms == 0 {
            return Err(ConfigError::ZeroControlRefresh);
        }
        if self.control_refresh_ms >= self.idle_timeout_ms {
            return Err(ConfigError::RefreshExceedsTimeout);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = LinkConfig::default();
        assert_eq!(config.idle_timeout_ms, 2000);
        assert_eq!(config.control_refresh_ms, 25);
        assert_eq!(config.validate(), Ok(()));
    }

    #[test]
    fn test_zero_values_rejected() {
        let config = LinkConfig {
            idle_timeout_ms: 0,
            ..LinkConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroIdleTimeout));

        let config = LinkConfig {
            control_refresh_ms: 0,
            ..LinkConfig::default()
        };
        assert_eq!(config.validate(), Err(ConfigError::ZeroControlRefresh));
    }

    #[test]
    fn test_refresh_must_beat_timeout() {
        let config = LinkConfig {
            idle_timeout_ms: 100,
            control_refresh_ms: 100,
        };
        assert_eq!(config.validate(), Err(ConfigError::RefreshExceedsTimeout));
    }
}

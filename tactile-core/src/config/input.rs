//! Input timing configuration

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default minimum interval between processed dispatch cycles
pub const DEFAULT_RATE_LIMIT_MS: u32 = 200;

/// Dispatcher configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct InputConfig {
    /// Minimum time between processed cycles (ms), bypassed during a long press
    pub rate_limit_ms: u32,
}

impl Default for InputConfig {
    fn default() -> Self {
        Self {
            rate_limit_ms: DEFAULT_RATE_LIMIT_MS,
        }
    }
}

impl InputConfig {
    /// Configuration with a custom rate limit
    pub const fn with_rate_limit(rate_limit_ms: u32) -> Self {
        Self { rate_limit_ms }
    }
}

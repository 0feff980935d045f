//! Link clock backed by the embassy time driver

use embassy_time::Instant;
use ksplink_hal::Clock;

/// Milliseconds since boot, truncated to the link's 32-bit clock
///
/// Truncation is fine: the session only ever looks at wrapping differences.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbassyClock;

impl Clock for EmbassyClock {
    fn now_ms(&self) -> u32 {
        Instant::now().as_millis() as u32
    }
}

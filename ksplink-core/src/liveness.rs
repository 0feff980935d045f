//! Link liveness monitor
//!
//! Derives the "connected" flag from the timing of accepted frames. Only a
//! checksum-valid frame counts as a sign of life; rejected and partial
//! frames never refresh the timer.

use ksplink_hal::elapsed_ms;

/// Change of the connected flag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LinkTransition {
    /// First accepted frame after start-up or after an idle timeout
    Connected,
    /// No accepted frame within the idle timeout
    Lost,
}

/// Tracks the last accepted frame and the connected flag
#[derive(Debug, Clone)]
pub struct LivenessMonitor {
    idle_timeout_ms: u32,
    /// Last accepted frame, or the last time the idle timer fired
    last_success_ms: u32,
    connected: bool,
}

impl LivenessMonitor {
    /// Create a monitor; the link starts out disconnected at time 0
    pub const fn new(idle_timeout_ms: u32) -> Self {
        Self {
            idle_timeout_ms,
            last_success_ms: 0,
            connected: false,
        }
    }

    /// Record the outcome of one receive step taken at `now_ms`
    ///
    /// Returns the transition, if the connected flag changed.
    pub fn observe(&mut self, now_ms: u32, accepted: bool) -> Option<LinkTransition> {
        let was_connected = self.connected;

        if accepted {
            self.last_success_ms = now_ms;
            self.connected = true;
        } else if elapsed_ms(now_ms, self.last_success_ms) > self.idle_timeout_ms {
            // Restart the window so the timeout fires once per window, not every poll
            self.last_success_ms = now_ms;
            self.connected = false;
        }

        match (was_connected, self.connected) {
            (false, true) => Some(LinkTransition::Connected),
            (true, false) => Some(LinkTransition::Lost),
            _ => None,
        }
    }

    /// Whether a frame was accepted within the idle timeout
    pub fn is_connected(&self) -> bool {
        self.connected
    }

    /// Time of the last accepted frame (or idle timer restart)
    pub fn last_success_ms(&self) -> u32 {
        self.last_success_ms
    }

    /// Milliseconds since the last accepted frame (or idle timer restart)
    pub fn silence_ms(&self, now_ms: u32) -> u32 {
        elapsed_ms(now_ms, self.last_success_ms)
    }

    /// Configured idle timeout
    pub fn idle_timeout_ms(&self) -> u32 {
        self.idle_timeout_ms
    }
}

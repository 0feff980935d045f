//! Monotonic time source
//!
//! Timestamps are milliseconds in a `u32` that wraps roughly every 49.7
//! days, like a microcontroller's millisecond tick. Use [`elapsed_ms`] for
//! differences so the wrap is harmless.

/// Monotonic millisecond clock
pub trait Clock {
    /// Current time in milliseconds
    fn now_ms(&self) -> u32;
}

impl<C: Clock + ?Sized> Clock for &C {
    fn now_ms(&self) -> u32 {
        (**self).now_ms()
    }
}

/// Milliseconds elapsed from `since` to `now`, tolerant of counter wrap
#[inline]
pub fn elapsed_ms(now: u32, since: u32) -> u32 {
    now.wrapping_sub(since)
}

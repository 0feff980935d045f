//! Board-agnostic link logic for the KSP Link device
//!
//! This crate contains everything above the wire format that does not
//! depend on a specific board:
//!
//! - Link configuration (idle timeout, control refresh rate)
//! - Liveness monitoring (the "connected" flag)
//! - The session: handshake answers, telemetry snapshot, control record

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod config;
pub mod liveness;
pub mod session;

#[cfg(test)]
mod testing;

pub use config::{ConfigError, LinkConfig};
pub use liveness::{LinkTransition, LivenessMonitor};
pub use session::{LinkStats, Session, SessionEvent};

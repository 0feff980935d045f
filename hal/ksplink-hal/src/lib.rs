//! KSP Link Hardware Abstraction Layer
//!
//! This crate defines the transport seams the link protocol runs on. The
//! protocol itself never touches a peripheral: it asks a [`SerialRx`] how
//! many bytes are buffered, pulls them one at a time, hands whole frames to
//! a [`SerialTx`], and reads time from a [`Clock`].
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │  Firmware (ksplink-firmware)            │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ksplink-core  (session, liveness)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  ksplink-hal (this crate - traits)      │
//! └─────────────────────────────────────────┘
//!                     │
//!                     ▼
//! ┌─────────────────────────────────────────┐
//! │  any embedded-io UART  (IoSerial)       │
//! └─────────────────────────────────────────┘
//! ```
//!
//! # Traits
//!
//! - [`serial::SerialRx`], [`serial::SerialTx`] - Non-blocking byte transport
//! - [`clock::Clock`] - Monotonic millisecond time source

#![no_std]
#![deny(unsafe_code)]

pub mod clock;
pub mod io;
pub mod serial;

// Re-export key traits at crate root for convenience
pub use clock::{elapsed_ms, Clock};
pub use io::IoSerial;
pub use serial::{SerialPort, SerialRx, SerialTx, UartConfig};

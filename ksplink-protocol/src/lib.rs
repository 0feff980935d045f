//! KSP Link Serial Protocol
//!
//! This crate defines the binary protocol spoken between the flight
//! simulator plugin (host) and a controller board (device). The host streams
//! vessel telemetry, the device answers a capability handshake and streams
//! pilot control inputs back.
//!
//! # Protocol Overview
//!
//! Every record travels in the same envelope:
//! ```text
//! ┌──────┬──────┬────────┬─────┬──────────────┬──────────┐
//! │ 0xBE │ 0xEF │ LENGTH │ TAG │ RECORD BODY  │ CHECKSUM │
//! │ 1B   │ 1B   │ 1B     │ 1B  │ LENGTH-1 B   │ 1B       │
//! └──────┴──────┴────────┴─────┴──────────────┴──────────┘
//! ```
//!
//! LENGTH counts the tag plus the body. The checksum is the XOR of LENGTH
//! and every payload byte. Each tag has exactly one fixed record size; a
//! frame whose LENGTH disagrees with its tag is dropped unread.

#![cfg_attr(not(test), no_std)]
#![deny(unsafe_code)]

pub mod fields;
pub mod frame;
pub mod receiver;
pub mod records;

mod wire;

pub use fields::{
    ActionGroup, ActionGroups, ControlGroups, ControlMode, MainControl, MainControls,
    NavballMode, NavballSasMode, SasMode,
};
pub use frame::{
    checksum, encode_record, send_record, Frame, FrameError, SendError, FRAME_OVERHEAD,
    MAX_FRAME_SIZE, MAX_PAYLOAD_SIZE, SYNC,
};
pub use receiver::{FrameReceiver, ReceiveStatus};
pub use records::{ControlPacket, HandshakePacket, Record, VesselData, WireRecord};

//! Frame encoding for the KSP Link protocol.
//!
//! Frame format:
//! - SYNC (2 bytes): 0xBE 0xEF
//! - LENGTH (1 byte): payload length, tag included (1-255)
//! - PAYLOAD (LENGTH bytes): tag byte followed by the record body
//! - CHECKSUM (1 byte): XOR of LENGTH and all PAYLOAD bytes

use heapless::Vec;
use ksplink_hal::SerialTx;

use crate::records::WireRecord;

/// Frame synchronization bytes
pub const SYNC: [u8; 2] = [0xBE, 0xEF];

/// Maximum payload size in bytes (the length field is one byte)
pub const MAX_PAYLOAD_SIZE: usize = u8::MAX as usize;

/// Bytes a frame adds around its payload (SYNC + LENGTH + CHECKSUM)
pub const FRAME_OVERHEAD: usize = 2 + 1 + 1;

/// Maximum complete frame size
pub const MAX_FRAME_SIZE: usize = FRAME_OVERHEAD + MAX_PAYLOAD_SIZE;

/// Errors that can occur during frame parsing or encoding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum FrameError {
    /// Declared length differs from the fixed size of the tag's record.
    /// `expected` is `None` when the tag is not a known record.
    LengthMismatch {
        tag: u8,
        declared: u8,
        expected: Option<u8>,
    },
    /// Checksum byte did not match the received length and payload
    ChecksumMismatch { expected: u8, actual: u8 },
    /// Payload exceeds maximum allowed size
    PayloadTooLarge,
    /// Payload is missing its tag byte
    EmptyPayload,
    /// Buffer too small for encoding
    BufferTooSmall,
}

/// Error from sending a record over a transport
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum SendError<E> {
    /// The record could not be framed
    Encode(FrameError),
    /// The transport refused the frame
    Transport(E),
}

impl<E> From<FrameError> for SendError<E> {
    fn from(e: FrameError) -> Self {
        SendError::Encode(e)
    }
}

/// Checksum over the length byte and payload
pub fn checksum(length: u8, payload: &[u8]) -> u8 {
    payload.iter().fold(length, |acc, &byte| acc ^ byte)
}

/// A frame around an arbitrary tag-prefixed payload
///
/// Part of the public API for raw payloads: tags this crate has no record
/// for, or bytes that deliberately break a record's layout (bench tools,
/// host simulators). The length and checksum are always computed from the
/// payload, but nothing checks that the length matches the tag, so a
/// receiver may reject what this produces. Known records should go through
/// [`encode_record`] / [`send_record`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    /// Tag byte followed by the record body
    payload: Vec<u8, MAX_PAYLOAD_SIZE>,
}

impl Frame {
    /// Create a new frame from a tag-prefixed payload
    pub fn new(payload: &[u8]) -> Result<Self, FrameError> {
        if payload.is_empty() {
            return Err(FrameError::EmptyPayload);
        }

        let mut payload_vec = Vec::new();
        payload_vec
            .extend_from_slice(payload)
            .map_err(|_| FrameError::PayloadTooLarge)?;

        Ok(Self {
            payload: payload_vec,
        })
    }

    /// Frame a record
    pub fn from_record<R: WireRecord>(record: &R) -> Result<Self, FrameError> {
        let mut buffer = [0u8; MAX_PAYLOAD_SIZE];
        let len = record.encode(&mut buffer)?;
        Self::new(&buffer[..len])
    }

    /// Tag byte (first payload byte)
    pub fn tag(&self) -> u8 {
        self.payload[0]
    }

    /// Tag-prefixed payload
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Value of the LENGTH field
    pub fn length(&self) -> u8 {
        self.payload.len() as u8
    }

    /// Value of the CHECKSUM byte
    pub fn checksum(&self) -> u8 {
        checksum(self.length(), &self.payload)
    }

    /// Number of bytes [`Frame::encode`] writes
    pub fn encoded_len(&self) -> usize {
        FRAME_OVERHEAD + self.payload.len()
    }

    /// Encode this frame into a byte buffer
    ///
    /// Returns the number of bytes written
    pub fn encode(&self, buffer: &mut [u8]) -> Result<usize, FrameError> {
        let frame_len = self.encoded_len();
        if buffer.len() < frame_len {
            return Err(FrameError::BufferTooSmall);
        }

        let end = 3 + self.payload.len();
        buffer[..2].copy_from_slice(&SYNC);
        buffer[2] = self.length();
        buffer[3..end].copy_from_slice(&self.payload);
        buffer[end] = self.checksum();

        Ok(frame_len)
    }

    /// Encode this frame into a heapless Vec
    pub fn encode_to_vec(&self) -> Result<Vec<u8, MAX_FRAME_SIZE>, FrameError> {
        let mut buffer = [0u8; MAX_FRAME_SIZE];
        let len = self.encode(&mut buffer)?;
        let mut vec = Vec::new();
        vec.extend_from_slice(&buffer[..len])
            .map_err(|_| FrameError::BufferTooSmall)?;
        Ok(vec)
    }
}

/// Encode a record straight into a complete frame
///
/// Returns the number of bytes written
pub fn encode_record<R: WireRecord>(record: &R, buffer: &mut [u8]) -> Result<usize, FrameError> {
    if R::SIZE > MAX_PAYLOAD_SIZE {
        return Err(FrameError::PayloadTooLarge);
    }
    let frame_len = FRAME_OVERHEAD + R::SIZE;
    if buffer.len() < frame_len {
        return Err(FrameError::BufferTooSmall);
    }

    let length = R::SIZE as u8;
    let end = 3 + R::SIZE;
    buffer[..2].copy_from_slice(&SYNC);
    buffer[2] = length;
    record.encode(&mut buffer[3..end])?;
    buffer[end] = checksum(length, &buffer[3..end]);

    Ok(frame_len)
}

/// Frame a record and hand it to the transport in a single write
pub fn send_record<T, R>(tx: &mut T, record: &R) -> Result<usize, SendError<T::Error>>
where
    T: SerialTx + ?Sized,
    R: WireRecord,
{
    let mut buffer = [0u8; MAX_FRAME_SIZE];
    let len = encode_record(record, &mut buffer)?;
    tx.write_bytes(&buffer[..len])
        .map_err(SendError::Transport)?;
    Ok(len)
}

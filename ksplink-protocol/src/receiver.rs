//! Resumable frame receiver
//!
//! The receiver is fed from a non-blocking [`SerialRx`]. A single UART
//! interrupt rarely delivers a whole frame, so all parse progress lives in
//! [`FrameReceiver`] and survives between calls to [`FrameReceiver::poll`].
//!
//! ```text
//!  SeekingSync ──0xBE──▶ SeekingSecondSync ──0xEF──▶ WaitingForLength
//!       ▲                    │ 0xBE: stay                  │
//!       │◀──── other ────────┘                             ▼
//!       │                                            WaitingForTag
//!       │◀──── LengthMismatch (tag/length disagree) ───────┤
//!       │                                                  ▼
//!       │                                           ReadingPayload
//!       │                                                  │
//!       │◀──── ChecksumMismatch / Accepted ──── WaitingForChecksum
//! ```

use heapless::Vec;
use ksplink_hal::SerialRx;

use crate::frame::{checksum, FrameError, MAX_PAYLOAD_SIZE, SYNC};
use crate::records::Record;

/// Outcome of one [`FrameReceiver::poll`]
// Accepted carries the decoded record by value; nothing to box it into.
#[allow(clippy::large_enum_variant)]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ReceiveStatus {
    /// Nothing new arrived, or only noise outside any frame
    NoData,
    /// A frame is partly buffered; poll again later
    Incomplete,
    /// A checksum-valid frame was decoded
    Accepted(Record),
    /// A frame was discarded; the receiver is scanning for sync again
    Rejected(FrameError),
}

impl ReceiveStatus {
    /// Returns true for [`ReceiveStatus::Accepted`]
    pub fn is_accepted(&self) -> bool {
        matches!(self, ReceiveStatus::Accepted(_))
    }
}

/// State machine for parsing incoming frames
#[derive(Debug, Clone)]
pub struct FrameReceiver {
    state: ParseState,
    /// Tag byte followed by the body received so far
    buffer: Vec<u8, MAX_PAYLOAD_SIZE>,
    expected_length: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ParseState {
    /// Waiting for the first sync byte
    SeekingSync,
    /// Got 0xBE, waiting for 0xEF
    SeekingSecondSync,
    /// Got both sync bytes, waiting for LENGTH
    WaitingForLength,
    /// Got LENGTH, waiting for TAG
    WaitingForTag,
    /// Reading payload bytes
    ReadingPayload,
    /// Waiting for CHECKSUM
    WaitingForChecksum,
}

impl Default for FrameReceiver {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameReceiver {
    /// Create a new frame receiver
    pub const fn new() -> Self {
        Self {
            state: ParseState::SeekingSync,
            buffer: Vec::new(),
            expected_length: 0,
        }
    }

    /// Reset the receiver state
    pub fn reset(&mut self) {
        self.state = ParseState::SeekingSync;
        self.buffer.clear();
        self.expected_length = 0;
    }

    /// Returns true while part of a frame (or a lone first sync byte) is
    /// held between polls
    pub fn in_frame(&self) -> bool {
        self.state != ParseState::SeekingSync
    }

    /// Drain available bytes until one frame completes
    ///
    /// Never blocks. Stops right after the first accepted or rejected
    /// frame, leaving any following bytes in the source for the next call.
    pub fn poll<R: SerialRx + ?Sized>(&mut self, rx: &mut R) -> ReceiveStatus {
        while rx.bytes_available() > 0 {
            let Some(byte) = rx.read_byte() else {
                break;
            };

            match self.feed(byte) {
                Ok(Some(record)) => return ReceiveStatus::Accepted(record),
                Ok(None) => {}
                Err(e) => return ReceiveStatus::Rejected(e),
            }
        }

        if self.in_frame() {
            ReceiveStatus::Incomplete
        } else {
            ReceiveStatus::NoData
        }
    }

    /// Feed a single byte to the receiver
    ///
    /// Returns `Ok(Some(record))` when a complete valid frame is decoded,
    /// `Ok(None)` when more bytes are needed, or `Err` when the frame in
    /// progress was discarded.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Record>, FrameError> {
        match self.state {
            ParseState::SeekingSync => {
                if byte == SYNC[0] {
                    self.state = ParseState::SeekingSecondSync;
                }
                Ok(None)
            }
            ParseState::SeekingSecondSync => {
                self.state = match byte {
                    b if b == SYNC[1] => ParseState::WaitingForLength,
                    // A repeated first sync byte may itself start the real pair
                    b if b == SYNC[0] => ParseState::SeekingSecondSync,
                    _ => ParseState::SeekingSync,
                };
                Ok(None)
            }
            ParseState::WaitingForLength => {
                self.expected_length = byte;
                self.state = ParseState::WaitingForTag;
                Ok(None)
            }
            ParseState::WaitingForTag => {
                let declared = self.expected_length;
                let expected = Record::expected_len(byte);
                if expected != Some(declared) {
                    self.reset();
                    return Err(FrameError::LengthMismatch {
                        tag: byte,
                        declared,
                        expected,
                    });
                }

                self.buffer.clear();
                // Capacity is MAX_PAYLOAD_SIZE and declared <= MAX_PAYLOAD_SIZE
                let _ = self.buffer.push(byte);
                self.state = if self.buffer.len() == declared as usize {
                    ParseState::WaitingForChecksum
                } else {
                    ParseState::ReadingPayload
                };
                Ok(None)
            }
            ParseState::ReadingPayload => {
                let _ = self.buffer.push(byte);
                if self.buffer.len() == self.expected_length as usize {
                    self.state = ParseState::WaitingForChecksum;
                }
                Ok(None)
            }
            ParseState::WaitingForChecksum => {
                let expected = checksum(self.expected_length, &self.buffer);
                if byte != expected {
                    self.reset();
                    return Err(FrameError::ChecksumMismatch {
                        expected,
                        actual: byte,
                    });
                }

                let tag = self.buffer[0];
                let declared = self.expected_length;
                let record = Record::decode(&self.buffer);
                self.reset();
                record.map(Some).ok_or(FrameError::LengthMismatch {
                    tag,
                    declared,
                    expected: Record::expected_len(tag),
                })
            }
        }
    }
}

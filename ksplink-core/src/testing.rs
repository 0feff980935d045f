//! Deterministic transport and clock for session tests

use std::cell::Cell;
use std::collections::VecDeque;
use std::vec::Vec;

use ksplink_hal::{Clock, SerialRx, SerialTx};

/// In-memory serial port: tests push incoming bytes, inspect outgoing ones
#[derive(Debug, Default)]
pub struct ScriptedPort {
    pub incoming: VecDeque<u8>,
    pub outgoing: Vec<u8>,
    pub refuse_writes: bool,
    pub writes: usize,
}

impl ScriptedPort {
    pub fn push(&mut self, bytes: &[u8]) {
        self.incoming.extend(bytes.iter().copied());
    }

    /// Take everything written so far
    pub fn take_outgoing(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.outgoing)
    }
}

impl SerialRx for ScriptedPort {
    fn bytes_available(&mut self) -> usize {
        self.incoming.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        self.incoming.pop_front()
    }
}

impl SerialTx for ScriptedPort {
    type Error = ();

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), ()> {
        if self.refuse_writes {
            return Err(());
        }
        self.writes += 1;
        self.outgoing.extend_from_slice(data);
        Ok(())
    }
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Cell<u32>,
}

impl ManualClock {
    pub fn at(now: u32) -> Self {
        Self {
            now: Cell::new(now),
        }
    }

    pub fn advance(&self, ms: u32) {
        self.now.set(self.now.get().wrapping_add(ms));
    }

    pub fn set(&self, now: u32) {
        self.now.set(now);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u32 {
        self.now.get()
    }
}

//! Adapter from `embedded-io` streams to the link transport traits
//!
//! Chip HALs expose buffered UARTs through the blocking `embedded-io`
//! traits. [`IoSerial`] turns such a stream into a [`SerialRx`] /
//! [`SerialTx`] pair, using `ReadReady` so reads never block.

use embedded_io::{Read, ReadReady, Write};

use crate::serial::{SerialRx, SerialTx};

/// Non-blocking view of an `embedded-io` stream
pub struct IoSerial<T> {
    inner: T,
    rx_errors: u32,
}

impl<T> IoSerial<T> {
    /// Wrap a stream
    pub fn new(inner: T) -> Self {
        Self {
            inner,
            rx_errors: 0,
        }
    }

    /// Number of receive-side errors swallowed so far
    pub fn rx_errors(&self) -> u32 {
        self.rx_errors
    }

    /// Borrow the wrapped stream
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Mutably borrow the wrapped stream
    pub fn inner_mut(&mut self) -> &mut T {
        &mut self.inner
    }

    /// Unwrap the stream
    pub fn into_inner(self) -> T {
        self.inner
    }
}

impl<T: Read + ReadReady> SerialRx for IoSerial<T> {
    /// `ReadReady` only says whether something is pending, so this reports
    /// `1` or `0`. The receiver polls again after every byte.
    fn bytes_available(&mut self) -> usize {
        match self.inner.read_ready() {
            Ok(ready) => usize::from(ready),
            Err(_e) => {
                self.rx_errors = self.rx_errors.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("read_ready failed: {:?}", defmt::Debug2Format(&_e));
                0
            }
        }
    }

    fn read_byte(&mut self) -> Option<u8> {
        let mut buf = [0u8; 1];
        match self.inner.read(&mut buf) {
            Ok(1) => Some(buf[0]),
            Ok(_) => None,
            Err(_e) => {
                self.rx_errors = self.rx_errors.wrapping_add(1);
                #[cfg(feature = "defmt")]
                defmt::warn!("UART read error: {:?}", defmt::Debug2Format(&_e));
                None
            }
        }
    }
}

impl<T: Write> SerialTx for IoSerial<T> {
    type Error = T::Error;

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.inner.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.inner.flush()
    }
}

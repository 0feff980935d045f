//! Serial transport abstractions
//!
//! The receive side is strictly non-blocking: callers check
//! [`SerialRx::bytes_available`] before every [`SerialRx::read_byte`].
//! The transmit side accepts a whole frame per call.

/// Serial receiver
///
/// Polled, never awaited. Implementations must return immediately.
pub trait SerialRx {
    /// Number of bytes that can be read right now without blocking
    ///
    /// Implementations that cannot count their buffer may report a lower
    /// bound (for example `1` whenever anything is pending).
    fn bytes_available(&mut self) -> usize;

    /// Read one buffered byte
    ///
    /// Only called after `bytes_available()` reported data. Returns `None`
    /// if the byte could not be delivered after all (line error, overrun).
    fn read_byte(&mut self) -> Option<u8>;
}

/// Serial transmitter
pub trait SerialTx {
    /// Error type for transmit operations
    type Error;

    /// Write a complete buffer
    ///
    /// Either the whole buffer is accepted or an error is returned; the
    /// link never retries a partial frame.
    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

/// Combined serial interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait SerialPort: SerialTx + SerialRx {}

// Blanket implementation
impl<T: SerialTx + SerialRx> SerialPort for T {}

impl<T: SerialRx + ?Sized> SerialRx for &mut T {
    fn bytes_available(&mut self) -> usize {
        (**self).bytes_available()
    }

    fn read_byte(&mut self) -> Option<u8> {
        (**self).read_byte()
    }
}

/// A byte slice is a receive buffer that drains as it is read
impl SerialRx for &[u8] {
    fn bytes_available(&mut self) -> usize {
        self.len()
    }

    fn read_byte(&mut self) -> Option<u8> {
        let (&first, rest) = self.split_first()?;
        *self = rest;
        Some(first)
    }
}

impl<T: SerialTx + ?Sized> SerialTx for &mut T {
    type Error = T::Error;

    fn write_bytes(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        (**self).flush()
    }
}

/// UART configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct UartConfig {
    /// Baud rate in bits per second
    pub baudrate: u32,
    /// Number of data bits (typically 8)
    pub data_bits: DataBits,
    /// Parity mode
    pub parity: Parity,
    /// Number of stop bits
    pub stop_bits: StopBits,
}

impl Default for UartConfig {
    /// 38400 8N1, the rate the simulator plugin opens the port with
    fn default() -> Self {
        Self {
            baudrate: 38400,
            data_bits: DataBits::Eight,
            parity: Parity::None,
            stop_bits: StopBits::One,
        }
    }
}

impl UartConfig {
    /// Approximate time on the wire for `bytes` bytes, in microseconds
    ///
    /// One start bit, the data bits, an optional parity bit and the stop
    /// bits per byte.
    pub fn transfer_time_us(&self, bytes: usize) -> u32 {
        let bits_per_byte = 1
            + self.data_bits.count()
            + u32::from(self.parity != Parity::None)
            + self.stop_bits.count();
        let total_bits = bits_per_byte.saturating_mul(bytes as u32);
        ((total_bits as u64 * 1_000_000) / self.baudrate.max(1) as u64) as u32
    }
}

/// Number of data bits per frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DataBits {
    Seven,
    Eight,
}

impl DataBits {
    fn count(self) -> u32 {
        match self {
            DataBits::Seven => 7,
            DataBits::Eight => 8,
        }
    }
}

/// Parity mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Parity {
    None,
    Even,
    Odd,
}

/// Number of stop bits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StopBits {
    One,
    Two,
}

impl StopBits {
    fn count(self) -> u32 {
        match self {
            StopBits::One => 1,
            StopBits::Two => 2,
        }
    }
}

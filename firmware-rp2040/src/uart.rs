//! Blocking byte stream for the ranging sensor UART.
//!
//! Wraps a [`BufferedUart`] so it satisfies [`ConfigurableUart`]. Reads only
//! ever happen after `read_ready()`, so the blocking `read` of the buffered
//! driver returns immediately.
//!
//! # Pins
//!
//! Uses UART0:
//! - GPIO 0: TX (to sensor RX)
//! - GPIO 1: RX (from sensor TX)

use embassy_rp::uart::{BufferedUart, Error as UartError};
use embedded_io::{ErrorKind, ErrorType, Read, ReadReady, Write};
use sensor_core::ConfigurableUart;

/// Error from the sensor UART.
#[derive(Debug, Clone, Copy, PartialEq, Eq, defmt::Format)]
pub enum SonarUartError {
    Uart(UartError),
    /// The buffered driver cannot change baud rate once running.
    UnsupportedBaudRate(u32),
}

impl embedded_io::Error for SonarUartError {
    fn kind(&self) -> ErrorKind {
        match self {
            Self::Uart(e) => e.kind(),
            Self::UnsupportedBaudRate(_) => ErrorKind::Unsupported,
        }
    }
}

impl From<UartError> for SonarUartError {
    fn from(e: UartError) -> Self {
        SonarUartError::Uart(e)
    }
}

/// UART0 set up at a fixed baud rate.
pub struct SonarUart {
    uart: BufferedUart,
    baud_rate: u32,
}

impl SonarUart {
    /// `baud_rate` must be the rate `uart` was configured with.
    #[must_use]
    pub fn new(uart: BufferedUart, baud_rate: u32) -> Self {
        Self { uart, baud_rate }
    }
}

impl ErrorType for SonarUart {
    type Error = SonarUartError;
}

impl Read for SonarUart {
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        Ok(self.uart.read(buf)?)
    }
}

impl ReadReady for SonarUart {
    fn read_ready(&mut self) -> Result<bool, Self::Error> {
        Ok(self.uart.read_ready()?)
    }
}

impl Write for SonarUart {
    fn write(&mut self, buf: &[u8]) -> Result<usize, Self::Error> {
        Ok(self.uart.write(buf)?)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        Ok(self.uart.flush()?)
    }
}

impl ConfigurableUart for SonarUart {
    /// Accepts only the rate set at construction.
    fn set_baud_rate(&mut self, baud_rate: u32) -> Result<(), Self::Error> {
        if baud_rate == self.baud_rate {
            Ok(())
        } else {
            Err(SonarUartError::UnsupportedBaudRate(baud_rate))
        }
    }
}

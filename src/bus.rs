//! Byte-level register access on a two-wire bus.
//!
//! [`I2cLink`] is the raw handle to one target device (address already bound),
//! [`BusTransport`] is the register-level contract the sensor drivers use, and
//! [`I2CBus`] turns the former into the latter while checking transfer lengths.

pub mod i2c;
#[cfg(test)]
pub mod mock;

use crate::errors::{BusError, BusResult};

/// Byte counts moved by each phase of a combined write-then-read transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Transfer {
    pub written: usize,
    pub read: usize,
}

/// Raw byte exchange with one fixed device on the bus.
///
/// Implementations report how many bytes actually moved; deciding whether a
/// short transfer is an error is left to [`I2CBus`].
pub trait I2cLink {
    type Error: std::fmt::Display;

    /// Plain write transaction. Returns the number of bytes the device accepted.
    fn write(&mut self, bytes: &[u8]) -> Result<usize, Self::Error>;

    /// Write `tx`, then read into `rx` after a repeated start (no stop in between).
    fn write_read(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<Transfer, Self::Error>;
}

/// Register-level access to one device.
///
/// Each call is exactly one bus transaction; nothing is buffered or retried.
pub trait BusTransport {
    /// Send `[register, value]`.
    fn write_register(&mut self, register: u8, value: u8) -> BusResult<()>;

    /// Fill `buf` with consecutive registers starting at `register`.
    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> BusResult<()>;
}

impl<T: BusTransport + ?Sized> BusTransport for &mut T {
    fn write_register(&mut self, register: u8, value: u8) -> BusResult<()> {
        (**self).write_register(register, value)
    }

    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> BusResult<()> {
        (**self).read_registers(register, buf)
    }
}

/// I2C bus implementation over any [`I2cLink`]
pub struct I2CBus<L> {
    link: L,
}

impl<L: I2cLink> I2CBus<L> {
    pub fn new(link: L) -> Self {
        Self { link }
    }

    pub fn link(&self) -> &L {
        &self.link
    }

    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Give the handle back to the caller
    pub fn into_inner(self) -> L {
        self.link
    }
}

impl<L: I2cLink> BusTransport for I2CBus<L> {
    fn write_register(&mut self, register: u8, value: u8) -> BusResult<()> {
        let frame = [register, value];
        let accepted = self
            .link
            .write(&frame)
            .map_err(|e| BusError::WriteFailed {
                register,
                reason: e.to_string(),
            })?;

        if accepted < frame.len() {
            return Err(BusError::WriteFailed {
                register,
                reason: format!("device accepted {} of {} byte(s)", accepted, frame.len()),
            });
        }
        Ok(())
    }

    fn read_registers(&mut self, register: u8, buf: &mut [u8]) -> BusResult<()> {
        let transfer = self
            .link
            .write_read(&[register], buf)
            .map_err(|e| BusError::AddressWriteFailed {
                register,
                reason: e.to_string(),
            })?;

        if transfer.written < 1 {
            return Err(BusError::AddressWriteFailed {
                register,
                reason: "register address not acknowledged".to_string(),
            });
        }
        if transfer.read < buf.len() {
            return Err(BusError::ReadFailed {
                register,
                expected: buf.len(),
                actual: transfer.read,
            });
        }
        Ok(())
    }
}

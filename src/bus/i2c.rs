#[cfg(target_os = "linux")]
use i2cdev::core::{I2CMessage, I2CTransfer};
#[cfg(target_os = "linux")]
use i2cdev::linux::{LinuxI2CDevice, LinuxI2CError, LinuxI2CMessage};
use tracing::debug;

use super::{I2cLink, Transfer};
use crate::errors::{BusError, BusResult};

/// `/dev/i2c-N` character device bound to one target address
#[cfg(target_os = "linux")]
pub struct LinuxI2cLink {
    device: LinuxI2CDevice,
    path: String,
}

#[cfg(not(target_os = "linux"))]
pub struct LinuxI2cLink {
    path: String,
}

impl LinuxI2cLink {
    /// Bus path, e.g. `/dev/i2c-1`
    pub fn path(&self) -> &str {
        &self.path
    }
}

#[cfg(target_os = "linux")]
impl LinuxI2cLink {
    /// Open the bus and bind `address` as the target for every transaction
    pub fn open(path: &str, address: u8) -> BusResult<Self> {
        let device = LinuxI2CDevice::new(path, u16::from(address)).map_err(|e| BusError::Open {
            path: path.to_string(),
            reason: e.to_string(),
        })?;
        debug!("[i2c] opened {} for device {:#04x}", path, address);
        Ok(Self {
            device,
            path: path.to_string(),
        })
    }
}

// I2C_RDWR reports how many messages completed, so a partially executed
// transfer shows up as zero bytes for the phases that never ran.
#[cfg(target_os = "linux")]
impl I2cLink for LinuxI2cLink {
    type Error = LinuxI2CError;

    fn write(&mut self, bytes: &[u8]) -> Result<usize, LinuxI2CError> {
        let mut msgs = [LinuxI2CMessage::write(bytes)];
        let completed = self.device.transfer(&mut msgs)?;
        Ok(if completed >= 1 { bytes.len() } else { 0 })
    }

    fn write_read(&mut self, tx: &[u8], rx: &mut [u8]) -> Result<Transfer, LinuxI2CError> {
        let tx_len = tx.len();
        let rx_len = rx.len();
        let mut msgs = [LinuxI2CMessage::write(tx), LinuxI2CMessage::read(rx)];
        let completed = self.device.transfer(&mut msgs)?;
        Ok(Transfer {
            written: if completed >= 1 { tx_len } else { 0 },
            read: if completed >= 2 { rx_len } else { 0 },
        })
    }
}

#[cfg(not(target_os = "linux"))]
impl LinuxI2cLink {
    pub fn open(path: &str, _address: u8) -> BusResult<Self> {
        debug!("[i2c] refusing to open {} on a non-Linux host", path);
        Err(BusError::Unsupported(format!(
            "cannot open '{}'; I2C is only supported on Linux",
            path
        )))
    }
}

#[cfg(not(target_os = "linux"))]
impl I2cLink for LinuxI2cLink {
    type Error = BusError;

    fn write(&mut self, _bytes: &[u8]) -> Result<usize, BusError> {
        Err(BusError::Unsupported("I2C is only supported on Linux".to_string()))
    }

    fn write_read(&mut self, _tx: &[u8], _rx: &mut [u8]) -> Result<Transfer, BusError> {
        Err(BusError::Unsupported("I2C is only supported on Linux".to_string()))
    }
}

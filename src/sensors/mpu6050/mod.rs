//! InvenSense MPU-6050 6-axis IMU over I2C.
//!
//! Lifecycle is `Uninitialized -> Configured -> Sampling`. Only a successful
//! [`Mpu6050::initialize`] leaves `Uninitialized`; reading before that is a
//! caller bug and returns [`DriverError::NotInitialized`] without touching the bus.

pub mod config;
pub mod convert;
pub mod registers;

use std::fmt;
use std::thread;

use tracing::{debug, info, warn};

pub use self::config::{AccelRange, GyroRange, Mpu6050Config};
pub use self::convert::{
    convert_acceleration, convert_angular_velocity, DEG_TO_RAD, STANDARD_GRAVITY,
};
pub use self::registers::{Register, TARGET_ADDRESS};

use self::registers::{
    AXIS_BLOCK_LEN, PWR_MGMT_1_WAKE, TEMP_OFFSET, TEMP_SENSITIVITY, WHO_AM_I_VALUE,
};
use crate::bus::BusTransport;
use crate::errors::{DriverError, DriverResult};
use crate::sensors::{RawAxisTriple, SensorSample};

/// One write of the initialization sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitStep {
    /// Clear the sleep bit in PWR_MGMT_1
    WakeUp,
    /// Write ACCEL_CONFIG
    AccelRange,
    /// Write GYRO_CONFIG
    GyroRange,
}

impl InitStep {
    /// 1-based position in the sequence
    pub fn number(self) -> u8 {
        match self {
            InitStep::WakeUp => 1,
            InitStep::AccelRange => 2,
            InitStep::GyroRange => 3,
        }
    }
}

impl fmt::Display for InitStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            InitStep::WakeUp => "wake up",
            InitStep::AccelRange => "accelerometer range",
            InitStep::GyroRange => "gyroscope range",
        };
        write!(f, "{} ({})", self.number(), name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DriverState {
    Uninitialized,
    Configured,
    Sampling,
}

pub struct Mpu6050<B> {
    bus: B,
    config: Mpu6050Config,
    state: DriverState,
}

impl<B: BusTransport> Mpu6050<B> {
    /// Take ownership of an opened bus. No bus traffic happens here.
    pub fn new(bus: B, config: Mpu6050Config) -> Self {
        Self {
            bus,
            config,
            state: DriverState::Uninitialized,
        }
    }

    pub fn with_defaults(bus: B) -> Self {
        Self::new(bus, Mpu6050Config::default())
    }

    pub fn state(&self) -> DriverState {
        self.state
    }

    pub fn config(&self) -> &Mpu6050Config {
        &self.config
    }

    pub fn accel_range(&self) -> AccelRange {
        self.config.accel_range
    }

    pub fn gyro_range(&self) -> GyroRange {
        self.config.gyro_range
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }

    pub fn bus_mut(&mut self) -> &mut B {
        &mut self.bus
    }

    /// Hand the bus back, ending this driver
    pub fn release(self) -> B {
        self.bus
    }

    /// Read WHO_AM_I and check it against the MPU-6050 identity.
    ///
    /// Allowed in any state; useful to catch a wrong target address before
    /// configuring anything.
    pub fn identify(&mut self) -> DriverResult<u8> {
        let mut who_am_i = [0u8; 1];
        self.bus.read_registers(Register::WhoAmI.addr(), &mut who_am_i)?;

        if who_am_i[0] != WHO_AM_I_VALUE {
            return Err(DriverError::WrongDevice {
                expected: WHO_AM_I_VALUE,
                actual: who_am_i[0],
            });
        }
        debug!("[mpu6050] WHO_AM_I = {:#04x}", who_am_i[0]);
        Ok(who_am_i[0])
    }

    /// Wake the device and program both full-scale ranges.
    ///
    /// Aborts on the first failed write. Any failure leaves the driver
    /// `Uninitialized`; re-run the whole sequence to recover.
    pub fn initialize(&mut self) -> DriverResult<()> {
        self.state = DriverState::Uninitialized;

        for (step, register, value) in self.init_sequence() {
            if let Err(source) = self.bus.write_register(register.addr(), value) {
                warn!("[mpu6050] init step {} failed: {}", step, source);
                return Err(DriverError::ConfigWriteFailed { step, source });
            }
            thread::sleep(self.config.settle);
        }

        self.state = DriverState::Configured;
        info!(
            "[mpu6050] configured: accel {}, gyro {}",
            self.config.accel_range, self.config.gyro_range
        );
        Ok(())
    }

    fn init_sequence(&self) -> [(InitStep, Register, u8); 3] {
        [
            (InitStep::WakeUp, Register::PwrMgmt1, PWR_MGMT_1_WAKE),
            (
                InitStep::AccelRange,
                Register::AccelConfig,
                self.config.accel_range.register_value(),
            ),
            (
                InitStep::GyroRange,
                Register::GyroConfig,
                self.config.gyro_range.register_value(),
            ),
        ]
    }

    /// Raw accelerometer counts from one 6-byte read at ACCEL_XOUT_H
    pub fn read_acceleration(&mut self) -> DriverResult<RawAxisTriple> {
        self.ensure_configured()?;
        self.read_axes(Register::AccelXoutH)
    }

    /// Raw gyroscope counts from one 6-byte read at GYRO_XOUT_H
    pub fn read_angular_velocity(&mut self) -> DriverResult<RawAxisTriple> {
        self.ensure_configured()?;
        self.read_axes(Register::GyroXoutH)
    }

    /// Die temperature in °C
    pub fn read_temperature(&mut self) -> DriverResult<f64> {
        self.ensure_configured()?;
        let mut buf = [0u8; 2];
        self.bus.read_registers(Register::TempOutH.addr(), &mut buf)?;
        let raw = i16::from_be_bytes(buf);
        Ok(f64::from(raw) / TEMP_SENSITIVITY + TEMP_OFFSET)
    }

    /// Read both axis groups and convert them to m/s² and rad/s.
    pub fn sample(&mut self) -> DriverResult<SensorSample> {
        let accel = self.read_acceleration()?;
        let gyro = self.read_angular_velocity()?;
        self.state = DriverState::Sampling;

        Ok(SensorSample {
            linear_acceleration: convert_acceleration(accel, self.config.accel_range),
            angular_velocity: convert_angular_velocity(gyro, self.config.gyro_range),
        })
    }

    fn read_axes(&mut self, register: Register) -> DriverResult<RawAxisTriple> {
        let mut block = [0u8; AXIS_BLOCK_LEN];
        self.bus.read_registers(register.addr(), &mut block)?;
        Ok(RawAxisTriple::from_be_block(&block))
    }

    fn ensure_configured(&self) -> DriverResult<()> {
        match self.state {
            DriverState::Uninitialized => Err(DriverError::NotInitialized),
            DriverState::Configured | DriverState::Sampling => Ok(()),
        }
    }
}

//! MPU-6050 register map (MPU-6000/MPU-6050 Register Map rev 4.2).

/// Device I2C address with AD0 tied low
pub const TARGET_ADDRESS: u8 = 0x68;

/// Device I2C address with AD0 tied high
pub const TARGET_ADDRESS_ALT: u8 = 0x69;

/// Registers the driver touches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Register {
    /// Gyroscope full-scale range, bits 4:3
    GyroConfig = 0x1B,
    /// Accelerometer full-scale range, bits 4:3
    AccelConfig = 0x1C,
    /// First of 6 accelerometer output bytes (X high)
    AccelXoutH = 0x3B,
    /// Temperature output, 2 bytes
    TempOutH = 0x41,
    /// First of 6 gyroscope output bytes (X high)
    GyroXoutH = 0x43,
    /// Power management 1 (sleep bit 6, clock select 2:0)
    PwrMgmt1 = 0x6B,
    WhoAmI = 0x75,
}

impl Register {
    pub const fn addr(self) -> u8 {
        self as u8
    }
}

pub const WHO_AM_I_VALUE: u8 = 0x68;

/// Sleep cleared, internal 8 MHz oscillator
pub const PWR_MGMT_1_WAKE: u8 = 0x00;
pub const PWR_MGMT_1_SLEEP: u8 = 1 << 6;

/// FS_SEL / AFS_SEL position inside GYRO_CONFIG / ACCEL_CONFIG
pub const FS_SEL_SHIFT: u8 = 3;

/// XH XL YH YL ZH ZL
pub const AXIS_BLOCK_LEN: usize = 6;

pub const ACCEL_SENSITIVITY_2G: f64 = 16384.0;
pub const ACCEL_SENSITIVITY_4G: f64 = 8192.0;
pub const ACCEL_SENSITIVITY_8G: f64 = 4096.0;
pub const ACCEL_SENSITIVITY_16G: f64 = 2048.0;

pub const GYRO_SENSITIVITY_250DPS: f64 = 131.0;
pub const GYRO_SENSITIVITY_500DPS: f64 = 65.5;
pub const GYRO_SENSITIVITY_1000DPS: f64 = 32.8;
pub const GYRO_SENSITIVITY_2000DPS: f64 = 16.4;

/// LSB/°C
pub const TEMP_SENSITIVITY: f64 = 340.0;
/// °C at raw 0
pub const TEMP_OFFSET: f64 = 36.53;

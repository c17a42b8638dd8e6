//! Full-scale range selection and driver settings.

use std::fmt;
use std::time::Duration;

use serde::Deserialize;

use super::registers::{self, FS_SEL_SHIFT};

/// Accelerometer full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum AccelRange {
    /// ±2 g
    #[serde(rename = "2g")]
    G2,
    /// ±4 g
    #[serde(rename = "4g")]
    G4,
    /// ±8 g
    #[serde(rename = "8g")]
    G8,
    /// ±16 g
    #[default]
    #[serde(rename = "16g")]
    G16,
}

impl AccelRange {
    /// AFS_SEL field value (0..=3)
    pub fn fs_sel(self) -> u8 {
        match self {
            AccelRange::G2 => 0,
            AccelRange::G4 => 1,
            AccelRange::G8 => 2,
            AccelRange::G16 => 3,
        }
    }

    /// Value written to ACCEL_CONFIG
    pub fn register_value(self) -> u8 {
        self.fs_sel() << FS_SEL_SHIFT
    }

    /// LSB per g
    pub fn sensitivity(self) -> f64 {
        match self {
            AccelRange::G2 => registers::ACCEL_SENSITIVITY_2G,
            AccelRange::G4 => registers::ACCEL_SENSITIVITY_4G,
            AccelRange::G8 => registers::ACCEL_SENSITIVITY_8G,
            AccelRange::G16 => registers::ACCEL_SENSITIVITY_16G,
        }
    }
}

impl fmt::Display for AccelRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let g = match self {
            AccelRange::G2 => 2,
            AccelRange::G4 => 4,
            AccelRange::G8 => 8,
            AccelRange::G16 => 16,
        };
        write!(f, "±{}g", g)
    }
}

/// Gyroscope full-scale range
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
pub enum GyroRange {
    /// ±250 °/s
    #[default]
    #[serde(rename = "250dps")]
    Dps250,
    /// ±500 °/s
    #[serde(rename = "500dps")]
    Dps500,
    /// ±1000 °/s
    #[serde(rename = "1000dps")]
    Dps1000,
    /// ±2000 °/s
    #[serde(rename = "2000dps")]
    Dps2000,
}

impl GyroRange {
    /// FS_SEL field value (0..=3)
    pub fn fs_sel(self) -> u8 {
        match self {
            GyroRange::Dps250 => 0,
            GyroRange::Dps500 => 1,
            GyroRange::Dps1000 => 2,
            GyroRange::Dps2000 => 3,
        }
    }

    /// Value written to GYRO_CONFIG
    pub fn register_value(self) -> u8 {
        self.fs_sel() << FS_SEL_SHIFT
    }

    /// LSB per °/s
    pub fn sensitivity(self) -> f64 {
        match self {
            GyroRange::Dps250 => registers::GYRO_SENSITIVITY_250DPS,
            GyroRange::Dps500 => registers::GYRO_SENSITIVITY_500DPS,
            GyroRange::Dps1000 => registers::GYRO_SENSITIVITY_1000DPS,
            GyroRange::Dps2000 => registers::GYRO_SENSITIVITY_2000DPS,
        }
    }
}

impl fmt::Display for GyroRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dps = match self {
            GyroRange::Dps250 => 250,
            GyroRange::Dps500 => 500,
            GyroRange::Dps1000 => 1000,
            GyroRange::Dps2000 => 2000,
        };
        write!(f, "±{}°/s", dps)
    }
}

/// Driver settings, fixed for the driver's lifetime
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Mpu6050Config {
    pub accel_range: AccelRange,
    pub gyro_range: GyroRange,
    /// Pause after each configuration write
    pub settle: Duration,
}

impl Default for Mpu6050Config {
    fn default() -> Self {
        Self {
            accel_range: AccelRange::G16,
            gyro_range: GyroRange::Dps250,
            settle: Duration::from_micros(500),
        }
    }
}

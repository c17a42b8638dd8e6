use serde::Deserialize;
use std::fs;
use std::time::Duration;

use crate::errors::{ConfigError, ConfigResult};
use crate::sensors::mpu6050::registers::{TARGET_ADDRESS, TARGET_ADDRESS_ALT};
use crate::sensors::mpu6050::{AccelRange, GyroRange, Mpu6050Config};

/// Root configuration, one `[bus]`, `[sensor]` and `[output]` table
#[derive(Debug, Deserialize)]
pub struct HubConfig {
    pub bus: BusSection,
    #[serde(default)]
    pub sensor: SensorSection,
    #[serde(default)]
    pub output: OutputSection,
}

#[derive(Debug, Deserialize)]
pub struct BusSection {
    /// Character device, e.g. `/dev/i2c-1`
    pub path: String,
    #[serde(default = "default_address")]
    pub address: u8,
}

fn default_address() -> u8 {
    TARGET_ADDRESS
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SensorSection {
    pub id: String,
    pub frame_id: String,
    pub accel_range: AccelRange,
    pub gyro_range: GyroRange,
    pub rate_hz: u32,
    pub settle_us: u64,
    /// Whole-sequence initialize() attempts before giving up
    pub init_attempts: u32,
    /// Failed samples in a row before the device is re-initialized
    pub max_consecutive_failures: u32,
}

impl Default for SensorSection {
    fn default() -> Self {
        Self {
            id: "imu0".to_string(),
            frame_id: "imu_link".to_string(),
            accel_range: AccelRange::G16,
            gyro_range: GyroRange::Dps250,
            rate_hz: 2,
            settle_us: 500,
            init_attempts: 3,
            max_consecutive_failures: 5,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputKind {
    #[default]
    Json,
    Log,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    pub sink: OutputKind,
}

impl HubConfig {
    pub fn driver_config(&self) -> Mpu6050Config {
        Mpu6050Config {
            accel_range: self.sensor.accel_range,
            gyro_range: self.sensor.gyro_range,
            settle: Duration::from_micros(self.sensor.settle_us),
        }
    }

    pub fn sample_period(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.sensor.rate_hz))
    }

    fn validate(&self) -> ConfigResult<()> {
        if self.bus.address != TARGET_ADDRESS && self.bus.address != TARGET_ADDRESS_ALT {
            return Err(ConfigError::InvalidValue {
                field: "bus.address".to_string(),
                reason: format!(
                    "{:#04x} is not an MPU-6050 address (expected {:#04x} or {:#04x})",
                    self.bus.address, TARGET_ADDRESS, TARGET_ADDRESS_ALT
                ),
            });
        }
        if self.sensor.rate_hz == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sensor.rate_hz".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        if self.sensor.init_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                field: "sensor.init_attempts".to_string(),
                reason: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Parse and validate TOML text
pub fn parse_hub_config(content: &str) -> ConfigResult<HubConfig> {
    let parsed: HubConfig = toml::from_str(content)?;
    parsed.validate()?;
    Ok(parsed)
}

/// Loads config from TOML file
pub fn load_hub_config(path: &str) -> ConfigResult<HubConfig> {
    let content = fs::read_to_string(path).map_err(|source| ConfigError::LoadError {
        path: path.to_string(),
        source,
    })?;
    parse_hub_config(&content)
}

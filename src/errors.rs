use thiserror::Error;

use crate::sensors::mpu6050::InitStep;

/// Transport-level failures on the two-wire bus
#[derive(Error, Debug)]
pub enum BusError {
    #[error("failed to open bus '{path}': {reason}")]
    Open { path: String, reason: String },

    #[error("write to register {register:#04x} failed: {reason}")]
    WriteFailed { register: u8, reason: String },

    #[error("register select {register:#04x} failed: {reason}")]
    AddressWriteFailed { register: u8, reason: String },

    #[error("read from register {register:#04x} returned {actual} of {expected} byte(s)")]
    ReadFailed {
        register: u8,
        expected: usize,
        actual: usize,
    },

    #[error("I2C is not supported on this platform: {0}")]
    Unsupported(String),
}

/// Errors raised by the sensor driver
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("sensor used before a successful initialize()")]
    NotInitialized,

    #[error("configuration step {step} failed: {source}")]
    ConfigWriteFailed {
        step: InitStep,
        #[source]
        source: BusError,
    },

    #[error("bus error: {0}")]
    Bus(#[from] BusError),

    #[error("wrong device identity: expected {expected:#04x}, got {actual:#04x}")]
    WrongDevice { expected: u8, actual: u8 },
}

/// Configuration-related errors
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to load configuration from '{path}': {source}")]
    LoadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid configuration format: {0}")]
    FormatError(#[from] toml::de::Error),

    #[error("Invalid configuration value for '{field}': {reason}")]
    InvalidValue { field: String, reason: String },
}

/// Failures while handing a sample to a consumer
#[derive(Error, Debug)]
pub enum SinkError {
    #[error("sink write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("sample encoding failed: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("sink is closed")]
    Closed,
}

/// Result type aliases for convenience
pub type BusResult<T> = Result<T, BusError>;
pub type DriverResult<T> = Result<T, DriverError>;
pub type ConfigResult<T> = Result<T, ConfigError>;
pub type SinkResult<T> = Result<T, SinkError>;

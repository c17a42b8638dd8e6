//! Raw count to SI unit conversion.

use std::f64::consts::PI;

use super::config::{AccelRange, GyroRange};
use crate::sensors::RawAxisTriple;

/// Standard gravity (m/s²)
pub const STANDARD_GRAVITY: f64 = 9.80665;

/// Degrees to radians
pub const DEG_TO_RAD: f64 = PI / 180.0;

/// Accelerometer counts to m/s²
pub fn convert_acceleration(raw: RawAxisTriple, range: AccelRange) -> [f64; 3] {
    let scale = STANDARD_GRAVITY / range.sensitivity();
    raw.to_array().map(|count| f64::from(count) * scale)
}

/// Gyroscope counts to rad/s
pub fn convert_angular_velocity(raw: RawAxisTriple, range: GyroRange) -> [f64; 3] {
    let scale = DEG_TO_RAD / range.sensitivity();
    raw.to_array().map(|count| f64::from(count) * scale)
}

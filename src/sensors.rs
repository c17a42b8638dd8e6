use serde::{Deserialize, Serialize};

pub mod mpu6050;

/// Three signed 16-bit axis readings taken from one register block
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RawAxisTriple {
    pub x: i16,
    pub y: i16,
    pub z: i16,
}

impl RawAxisTriple {
    pub const fn new(x: i16, y: i16, z: i16) -> Self {
        Self { x, y, z }
    }

    /// Decode a 6-byte big-endian block laid out as `XH XL YH YL ZH ZL`.
    ///
    /// Bytes arrive as `u8`, so each pair is `(high << 8) | low` reinterpreted
    /// as two's complement, with no dependence on host `char` signedness.
    pub fn from_be_block(block: &[u8; 6]) -> Self {
        Self {
            x: i16::from_be_bytes([block[0], block[1]]),
            y: i16::from_be_bytes([block[2], block[3]]),
            z: i16::from_be_bytes([block[4], block[5]]),
        }
    }

    pub fn to_array(self) -> [i16; 3] {
        [self.x, self.y, self.z]
    }
}

/// One unit-converted inertial reading.
///
/// Both halves come from reads issued within the same `sample()` call.
#[derive(Debug, Default, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SensorSample {
    /// Linear acceleration (m/s²)
    pub linear_acceleration: [f64; 3],
    /// Angular velocity (rad/s)
    pub angular_velocity: [f64; 3],
}

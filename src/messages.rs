use serde::{Deserialize, Serialize};

use crate::sensors::SensorSample;

/// Header metadata attached to every published sample
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct Header {
    /// Sensor identifier (e.g., "imu0")
    pub sensor_id: String,
    /// Reference frame identifier
    pub frame_id: String,
    /// Sequence number for message ordering
    pub seq: u64,
    /// UTC timestamp in nanoseconds
    pub t_utc_ns: u64,
    /// Message schema version for evolution
    pub schema_v: u16,
}

impl Header {
    /// Create a new header stamped with the current wall-clock time
    pub fn new(sensor_id: String, frame_id: String, seq: u64) -> Self {
        use std::time::{SystemTime, UNIX_EPOCH};

        let t_utc_ns = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_nanos() as u64;

        Self {
            sensor_id,
            frame_id,
            seq,
            t_utc_ns,
            schema_v: 1,
        }
    }
}

/// IMU sample (accelerometer + gyroscope) as published to consumers
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct ImuMessage {
    pub h: Header,
    /// Acceleration X-axis (m/s²)
    pub ax: f64,
    /// Acceleration Y-axis (m/s²)
    pub ay: f64,
    /// Acceleration Z-axis (m/s²)
    pub az: f64,
    /// Angular velocity X-axis (rad/s)
    pub gx: f64,
    /// Angular velocity Y-axis (rad/s)
    pub gy: f64,
    /// Angular velocity Z-axis (rad/s)
    pub gz: f64,
}

impl ImuMessage {
    pub fn from_sample(h: Header, sample: &SensorSample) -> Self {
        let [ax, ay, az] = sample.linear_acceleration;
        let [gx, gy, gz] = sample.angular_velocity;
        Self {
            h,
            ax,
            ay,
            az,
            gx,
            gy,
            gz,
        }
    }

    /// Single-line JSON
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

//! Consumers of converted samples.
//!
//! The driver never publishes anything itself; whoever calls `sample()` hands
//! the result to a [`Sink`].

use std::io::Write;

use tracing::info;

use crate::errors::SinkResult;
use crate::messages::{Header, ImuMessage};
use crate::sensors::SensorSample;

pub trait Sink {
    fn accept(&mut self, sample: &SensorSample) -> SinkResult<()>;
}

impl<F> Sink for F
where
    F: FnMut(&SensorSample) -> SinkResult<()>,
{
    fn accept(&mut self, sample: &SensorSample) -> SinkResult<()> {
        self(sample)
    }
}

/// Writes each sample to the tracing log
pub struct LogSink {
    sensor_id: String,
}

impl LogSink {
    pub fn new(sensor_id: impl Into<String>) -> Self {
        Self {
            sensor_id: sensor_id.into(),
        }
    }
}

impl Sink for LogSink {
    fn accept(&mut self, sample: &SensorSample) -> SinkResult<()> {
        let [ax, ay, az] = sample.linear_acceleration;
        let [gx, gy, gz] = sample.angular_velocity;
        info!(
            "[{}] accel=({:.4}, {:.4}, {:.4}) m/s² gyro=({:.5}, {:.5}, {:.5}) rad/s",
            self.sensor_id, ax, ay, az, gx, gy, gz
        );
        Ok(())
    }
}

/// Newline-delimited JSON [`ImuMessage`]s on any writer
pub struct JsonLinesSink<W> {
    writer: W,
    sensor_id: String,
    frame_id: String,
    seq: u64,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(writer: W, sensor_id: impl Into<String>, frame_id: impl Into<String>) -> Self {
        Self {
            writer,
            sensor_id: sensor_id.into(),
            frame_id: frame_id.into(),
            seq: 0,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> Sink for JsonLinesSink<W> {
    fn accept(&mut self, sample: &SensorSample) -> SinkResult<()> {
        self.seq += 1;
        let header = Header::new(self.sensor_id.clone(), self.frame_id.clone(), self.seq);
        let msg = ImuMessage::from_sample(header, sample);

        serde_json::to_writer(&mut self.writer, &msg)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

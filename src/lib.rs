// Public modules
pub mod bus;
pub mod config;
pub mod errors;
pub mod messages;
pub mod scheduler;
pub mod sensors;
pub mod sink;

// Re-export commonly used types
pub use bus::{BusTransport, I2CBus, I2cLink};
pub use config::{load_hub_config, HubConfig};
pub use errors::{BusError, ConfigError, DriverError, SinkError};
pub use sensors::mpu6050::{AccelRange, GyroRange, Mpu6050, Mpu6050Config};
pub use sensors::{RawAxisTriple, SensorSample};
pub use sink::Sink;

use std::io;
use std::time::Duration;

use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

use crate::bus::i2c::LinuxI2cLink;
use crate::config::OutputKind;
use crate::scheduler::{initialize_with_retry, publish, spawn_sampler, SamplerPolicy};
use crate::sink::{JsonLinesSink, LogSink};

/// Samples buffered between the sampling thread and the publisher
const CHANNEL_DEPTH: usize = 16;

/// Pause between whole-sequence initialize() attempts
const INIT_BACKOFF: Duration = Duration::from_millis(100);

/// Initialize tracing with default configuration
pub fn init_tracing() {
    // Logs go to stderr so stdout stays clean for the JSON sink
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into()))
        .with_writer(io::stderr)
        .init();
}

/// Open the bus, bring the sensor up and publish samples until Ctrl-C
pub async fn run_sensor_hub(config: HubConfig) -> Result<(), Box<dyn std::error::Error>> {
    info!("[IMU SensorHub] starting up...");

    let link = LinuxI2cLink::open(&config.bus.path, config.bus.address)?;
    info!(
        "[bus] {} opened, target {:#04x}",
        link.path(),
        config.bus.address
    );

    let mut driver = Mpu6050::new(I2CBus::new(link), config.driver_config());
    driver.identify()?;
    initialize_with_retry(&mut driver, config.sensor.init_attempts, INIT_BACKOFF)?;

    let (tx, rx) = mpsc::channel(CHANNEL_DEPTH);
    let policy = SamplerPolicy {
        period: config.sample_period(),
        max_consecutive_failures: config.sensor.max_consecutive_failures,
    };
    let sampler = spawn_sampler(driver, policy, tx);

    let sensor_id = config.sensor.id.clone();
    let mut publisher = match config.output.sink {
        OutputKind::Json => tokio::spawn(publish(
            rx,
            JsonLinesSink::new(io::stdout(), sensor_id, config.sensor.frame_id.clone()),
        )),
        OutputKind::Log => tokio::spawn(publish(rx, LogSink::new(sensor_id))),
    };
    info!("[main] Ready to publish sensor data");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("[main] shutdown requested");
            // dropping the receiver stops the sampling thread
            publisher.abort();
        }
        result = &mut publisher => {
            if let Err(e) = result {
                error!("[main] publisher task failed: {}", e);
            }
        }
    }

    match sampler.await {
        Ok(driver) => {
            drop(driver.release());
            info!("[bus] released");
        }
        Err(e) => warn!("[main] sampling thread ended abnormally: {}", e),
    }
    Ok(())
}

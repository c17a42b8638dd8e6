//! Sampling cadence and hand-off to consumers.
//!
//! Bus access blocks, so the driver lives on its own blocking thread and
//! pushes samples through a bounded channel to an async publishing task.

use std::thread;
use std::time::{Duration, Instant};

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::bus::BusTransport;
use crate::errors::DriverResult;
use crate::sensors::mpu6050::Mpu6050;
use crate::sensors::SensorSample;
use crate::sink::Sink;

/// How the sampling thread paces itself and reacts to failures
#[derive(Debug, Clone, Copy)]
pub struct SamplerPolicy {
    pub period: Duration,
    /// Failed samples in a row before re-running initialize()
    pub max_consecutive_failures: u32,
}

/// Run the whole initialization sequence up to `attempts` times.
pub fn initialize_with_retry<B: BusTransport>(
    driver: &mut Mpu6050<B>,
    attempts: u32,
    backoff: Duration,
) -> DriverResult<()> {
    let mut attempt = 1;
    loop {
        match driver.initialize() {
            Ok(()) => return Ok(()),
            Err(e) if attempt < attempts => {
                warn!(
                    "[scheduler] initialize attempt {}/{} failed: {}",
                    attempt, attempts, e
                );
                attempt += 1;
                thread::sleep(backoff);
            }
            Err(e) => return Err(e),
        }
    }
}

/// Start the dedicated sampling thread.
///
/// The thread stops once the receiving side of `tx` is gone and gives the
/// driver back through the join handle.
pub fn spawn_sampler<B>(
    mut driver: Mpu6050<B>,
    policy: SamplerPolicy,
    tx: mpsc::Sender<SensorSample>,
) -> JoinHandle<Mpu6050<B>>
where
    B: BusTransport + Send + 'static,
{
    tokio::task::spawn_blocking(move || {
        info!("[scheduler] sampling every {:?}", policy.period);
        let mut consecutive_failures = 0u32;
        let mut next_tick = Instant::now();

        while !tx.is_closed() {
            match driver.sample() {
                Ok(sample) => {
                    consecutive_failures = 0;
                    if tx.blocking_send(sample).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    consecutive_failures += 1;
                    warn!(
                        "[scheduler] sample failed ({} in a row): {}",
                        consecutive_failures, e
                    );
                    if consecutive_failures >= policy.max_consecutive_failures {
                        warn!("[scheduler] re-initializing sensor");
                        match driver.initialize() {
                            Ok(()) => consecutive_failures = 0,
                            Err(e) => warn!("[scheduler] re-initialize failed: {}", e),
                        }
                    }
                }
            }

            next_tick += policy.period;
            let now = Instant::now();
            if next_tick > now {
                thread::sleep(next_tick - now);
            } else {
                // overran the period; don't try to catch up
                next_tick = now;
            }
        }

        info!("[scheduler] consumer gone, sampling stopped");
        driver
    })
}

/// Drain samples into `sink` until every sender is dropped.
///
/// Returns how many samples the sink accepted.
pub async fn publish<S: Sink>(mut rx: mpsc::Receiver<SensorSample>, mut sink: S) -> u64 {
    let mut published = 0u64;
    while let Some(sample) = rx.recv().await {
        match sink.accept(&sample) {
            Ok(()) => published += 1,
            Err(e) => warn!("[scheduler] failed to publish: {}", e),
        }
    }
    debug!("[scheduler] publisher finished after {} sample(s)", published);
    published
}

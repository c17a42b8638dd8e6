use imu_sensorhub::{init_tracing, load_hub_config, run_sensor_hub};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // RUST_LOG=debug for verbose, RUST_LOG=info for normal, RUST_LOG=warn for production
    init_tracing();

    // Load configuration from CONFIG_PATH or default
    let config_path = std::env::var("CONFIG_PATH").unwrap_or_else(|_| "config".to_string());
    let hub_config_path = format!("{}/hub.toml", config_path);
    let config = load_hub_config(&hub_config_path)?;
    tracing::info!("[config] loaded {}", hub_config_path);

    run_sensor_hub(config).await
}

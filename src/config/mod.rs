pub mod hub_config;

pub use hub_config::{load_hub_config, HubConfig, OutputKind};

//! Configuration: TOML file plus `PAIGE_` environment overrides.

mod loader;
mod types;

pub use loader::{load_config, load_config_from_str, ConfigError};
pub use types::{Config, DatabaseConfig, MediaTypeConfig, SearchConfig};

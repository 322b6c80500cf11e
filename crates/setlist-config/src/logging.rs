use serde::{Deserialize, Serialize};

use crate::{CONFIG_BACKEND, ConfigBackend, ConfigError};

/// Sección `[log]`: nivel por defecto cuando `RUST_LOG` no está definido.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct LogConfig {
  #[serde(default = "default_level")]
  pub level: String,
}

fn default_level() -> String {
  "info".to_string()
}

impl Default for LogConfig {
  fn default() -> Self {
    LogConfig { level: default_level() }
  }
}

impl LogConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("log")?;
    CONFIG_BACKEND.save_section("log", &cfg)?;
    Ok(cfg)
  }
}

use serde::{Deserialize, Serialize};
use setlist_config::{CONFIG_BACKEND, ConfigBackend, ConfigError, PATHS};
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct StorageConfig {
  pub db_path: PathBuf,
  pub journal_mode: Option<String>,

  /// Pausa entre escrituras en operaciones masivas (resincronizar todos los Sets).
  #[serde(default = "default_write_interval_ms")]
  pub write_interval_ms: u64,
}

fn default_write_interval_ms() -> u64 {
  250
}

impl Default for StorageConfig {
  fn default() -> Self {
    StorageConfig {
      db_path: PATHS.db_file(),
      journal_mode: Some("WAL".to_string()),
      write_interval_ms: default_write_interval_ms(),
    }
  }
}

impl StorageConfig {
  pub fn load() -> Result<Self, ConfigError> {
    let cfg = CONFIG_BACKEND.load_section_with_default("storage")?;
    CONFIG_BACKEND.save_section("storage", &cfg)?;
    Ok(cfg)
  }

  pub fn save(&self) -> Result<(), ConfigError> {
    CONFIG_BACKEND.save_section("storage", self)
  }

  pub fn write_interval(&self) -> Duration {
    Duration::from_millis(self.write_interval_ms)
  }
}

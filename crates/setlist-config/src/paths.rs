use std::path::{Path, PathBuf};

use directories::ProjectDirs;

use crate::error::ConfigError;

/// Variable que fuerza el modo portable: config y datos bajo una sola carpeta.
pub const BASE_DIR_VAR: &str = "SETLIST_BASE_DIR";

/// Dónde viven `setlist.toml` y la base de datos de Sets.
#[derive(Debug, Clone, PartialEq)]
pub struct SetlistPaths {
  pub config_dir: PathBuf,
  pub data_dir: PathBuf,
}

impl SetlistPaths {
  /// Resuelve las rutas desde el entorno y crea los directorios.
  pub fn new() -> Result<Self, ConfigError> {
    let base = std::env::var_os(BASE_DIR_VAR).filter(|v| !v.is_empty()).map(PathBuf::from);
    let paths = match base {
      Some(base) => Self::portable(&base),
      None => Self::platform()?,
    };
    paths.ensure_dirs()?;
    Ok(paths)
  }

  pub fn portable(base: &Path) -> Self {
    Self { config_dir: base.join("config"), data_dir: base.join("data") }
  }

  fn platform() -> Result<Self, ConfigError> {
    let dirs = ProjectDirs::from("com", "setlist", "setlist").ok_or(ConfigError::NoHome)?;
    Ok(Self { config_dir: dirs.config_dir().to_path_buf(), data_dir: dirs.data_dir().to_path_buf() })
  }

  pub fn ensure_dirs(&self) -> Result<(), ConfigError> {
    std::fs::create_dir_all(&self.config_dir)?;
    std::fs::create_dir_all(&self.data_dir)?;
    Ok(())
  }

  pub fn config_file(&self) -> PathBuf {
    self.config_dir.join("setlist.toml")
  }

  /// Base de datos SQLite por defecto del catálogo y los Sets.
  pub fn db_file(&self) -> PathBuf {
    self.data_dir.join("setlist.db")
  }
}

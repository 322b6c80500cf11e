use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
  #[error("io error: {0}")]
  Io(#[from] std::io::Error),
  #[error("toml error: {0}")]
  Toml(#[from] toml::de::Error),
  #[error("no home directory to place setlist.toml in")]
  NoHome,
  #[error("invalid config: {0}")]
  Invalid(String),
}

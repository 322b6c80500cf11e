mod backend;
mod error;
mod io;
mod logging;
mod paths;

pub use backend::{ConfigBackend, TomlConfigBackend};
pub use error::ConfigError;
pub use io::atomic_write_str;
pub use logging::LogConfig;
pub use paths::{BASE_DIR_VAR, SetlistPaths};

use once_cell::sync::Lazy;

// rutas resueltas una vez por proceso; SETLIST_BASE_DIR se lee al primer acceso
pub static PATHS: Lazy<SetlistPaths> = Lazy::new(|| SetlistPaths::new().expect("failed to resolve setlist directories"));

pub static CONFIG_BACKEND: Lazy<TomlConfigBackend> = Lazy::new(|| TomlConfigBackend::new(PATHS.config_file()));

use crate::io::atomic_write_str;
use crate::error::ConfigError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

// toml_edit para escribir preservando comentarios del usuario
use toml_edit::{DocumentMut, Item};

pub trait ConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError>;
  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError>;
}

/// Backend sobre un único archivo TOML con una sección por componente
/// (`[storage]`, `[log]`…).
pub struct TomlConfigBackend {
  path: PathBuf,
}

impl TomlConfigBackend {
  pub fn new(path: PathBuf) -> Self {
    Self { path }
  }

  pub fn path(&self) -> &Path {
    &self.path
  }

  /// Como `load_section`, pero si falta el archivo o la sección devuelve
  /// `T::default()`.
  pub fn load_section_with_default<T>(&self, section: &str) -> Result<T, ConfigError>
  where
    T: DeserializeOwned + Default,
  {
    let Some(table) = self.read_table()? else {
      return Ok(T::default());
    };

    let Some(value) = table.get(section) else {
      return Ok(T::default());
    };

    decode_section(section, value)
  }

  fn read_table(&self) -> Result<Option<toml::Table>, ConfigError> {
    let content = match fs::read_to_string(&self.path) {
      Ok(c) => c,
      Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
      Err(e) => return Err(e.into()),
    };
    Ok(Some(toml::from_str(&content)?))
  }
}

fn decode_section<T: DeserializeOwned>(section: &str, value: &toml::Value) -> Result<T, ConfigError> {
  value.clone().try_into().map_err(|e| ConfigError::Invalid(format!("decode section [{section}]: {e}")))
}

impl ConfigBackend for TomlConfigBackend {
  fn load_section<T: DeserializeOwned>(&self, section: &str) -> Result<T, ConfigError> {
    let content = fs::read_to_string(&self.path)?;
    let table: toml::Table = toml::from_str(&content)?;

    let value = table
      .get(section)
      .ok_or_else(|| ConfigError::Invalid(format!("missing section [{section}] in {:?}", self.path)))?;

    decode_section(section, value)
  }

  fn save_section<T: Serialize>(&self, section: &str, value: &T) -> Result<(), ConfigError> {
    // 1) Leer config actual como DocumentMut o crear doc vacío si no existe.
    let mut doc: DocumentMut = match fs::read_to_string(&self.path) {
      Ok(content) => content
        .parse::<DocumentMut>()
        .map_err(|e| ConfigError::Invalid(format!("parse toml_edit doc: {e}")))?,
      Err(e) if e.kind() == ErrorKind::NotFound => DocumentMut::new(),
      Err(e) => return Err(e.into()),
    };

    // 2) Serializar la sección con `toml` (serde) y re-parsearla como tabla.
    let section_str = toml::to_string(value)
      .map_err(|e| ConfigError::Invalid(format!("encode section [{section}]: {e}")))?;

    let section_item: Item = section_str
      .parse::<DocumentMut>()
      .map_err(|e| ConfigError::Invalid(format!("parse section as doc: {e}")))?
      .into_item();

    // 3) Reemplazar sólo esta sección; el resto del documento queda intacto.
    doc[section] = section_item;

    atomic_write_str(&self.path, &doc.to_string())?;

    Ok(())
  }
}

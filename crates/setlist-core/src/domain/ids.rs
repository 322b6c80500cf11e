use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Identificador estable de una canción del catálogo.
///
/// El catálogo es externo, así que el formato no se impone: se guarda la
/// cadena tal cual llega (UUID, slug, id numérico serializado…).
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SongId(String);

impl SongId {
  pub fn new(id: impl Into<String>) -> Self {
    SongId(id.into())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for SongId {
  fn from(s: &str) -> Self {
    SongId(s.to_string())
  }
}

impl From<String> for SongId {
  fn from(s: String) -> Self {
    SongId(s)
  }
}

impl fmt::Display for SongId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identificador de un Set.
///
/// Los Sets creados aquí reciben un UUID v4, pero los que vienen de la
/// persistencia pueden traer cualquier cadena, por eso se guarda como `String`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SetId(String);

impl SetId {
  /// Genera un nuevo identificador único.
  pub fn generate() -> Self {
    SetId(Uuid::new_v4().to_string())
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl From<&str> for SetId {
  fn from(s: &str) -> Self {
    SetId(s.to_string())
  }
}

impl From<String> for SetId {
  fn from(s: String) -> Self {
    SetId(s)
  }
}

impl From<Uuid> for SetId {
  fn from(u: Uuid) -> Self {
    SetId(u.to_string())
  }
}

impl fmt::Display for SetId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

/// Identificador de un bloque de medley dentro de una vista organizada.
///
/// Se deriva del nombre del medley y de la posición donde empieza el tramo,
/// así dos tramos separados con el mismo nombre siguen siendo direccionables
/// por separado.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockId(String);

impl BlockId {
  pub fn for_run(medley: &str, start: usize) -> Self {
    BlockId(format!("medley-{medley}-{start}"))
  }

  pub fn as_str(&self) -> &str {
    &self.0
  }
}

impl fmt::Display for BlockId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(&self.0)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_generated_set_ids_are_unique() {
    assert_ne!(SetId::generate(), SetId::generate());
  }

  #[test]
  fn test_block_id_depends_on_start() {
    assert_ne!(BlockId::for_run("Summer", 0), BlockId::for_run("Summer", 4));
    assert_eq!(BlockId::for_run("Summer", 2).as_str(), "medley-Summer-2");
  }

  #[test]
  fn test_song_id_serializes_as_plain_string() {
    let json = serde_json::to_string(&SongId::from("abc")).unwrap();
    assert_eq!(json, "\"abc\"");
  }
}

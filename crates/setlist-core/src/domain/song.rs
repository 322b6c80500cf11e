use std::collections::BTreeSet;
use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::duration;
use crate::domain::ids::SongId;

/// La Canción (Song) tal como la expone el catálogo.
///
/// Desde el punto de vista del motor es inmutable: los Sets guardan copias
/// (snapshots) de estos registros y las refrescan desde el catálogo al cargar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Song {
  /// Identificador estable dentro del catálogo.
  pub id: SongId,
  pub title: String,
  #[serde(default)]
  pub artist: String,
  /// Tonalidad (etiqueta libre: `"Am"`, `"F#"`…).
  #[serde(default)]
  pub key: String,
  /// Duración en texto `MM:SS`. Puede faltar.
  #[serde(default)]
  pub duration: Option<String>,
  pub language: Language,
  pub vocalist: Vocalist,
  /// Variante de bajo usada en la canción.
  #[serde(default)]
  pub bass_guitar: String,
  /// Variante de guitarra usada en la canción.
  #[serde(default)]
  pub guitar: String,
  #[serde(default)]
  pub backing_track: bool,
  /// Nombre del medley al que pertenece. Vacío o ausente = no forma parte de ninguno.
  #[serde(default)]
  pub medley: Option<String>,
  /// Orden (1..n) dentro de su medley.
  #[serde(default)]
  pub medley_position: Option<u32>,
  #[serde(default)]
  pub tags: BTreeSet<String>,
  #[serde(default)]
  pub notes: String,
}

impl Song {
  /// Etiqueta de medley normalizada: `None` si falta o está vacía.
  pub fn medley_label(&self) -> Option<&str> {
    self.medley.as_deref().filter(|m| !m.is_empty())
  }

  /// Duración en minutos fraccionarios; `0.0` si falta o no se puede leer.
  pub fn minutes(&self) -> f64 {
    duration::parse_duration(self.duration.as_deref())
  }

  /// `true` si la canción trae una duración que se pudo interpretar.
  ///
  /// Sirve para distinguir "sin duración" de una duración real de cero.
  pub fn has_known_duration(&self) -> bool {
    self.duration.as_deref().is_some_and(duration::is_parseable)
  }
}

/// Idioma en el que se canta la canción.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
  #[serde(alias = "English")]
  English,
  #[serde(alias = "Danish")]
  Danish,
}

impl Language {
  pub const ALL: [Language; 2] = [Language::English, Language::Danish];
}

impl fmt::Display for Language {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    match self {
      Language::English => write!(f, "english"),
      Language::Danish => write!(f, "danish"),
    }
  }
}

/// Error producido cuando una cadena no puede convertirse en [`Language`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid language: {input}")]
pub struct LanguageParseError {
  pub input: String,
}

impl FromStr for Language {
  type Err = LanguageParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "english" | "en" => Ok(Language::English),
      "danish" | "da" | "dansk" => Ok(Language::Danish),
      _ => Err(LanguageParseError { input: s.to_string() }),
    }
  }
}

/// Quién canta la voz principal.
///
/// `Both` es un dueto: en las estadísticas su tiempo se reparte a medias entre
/// los dos vocalistas y además se contabiliza aparte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Vocalist {
  #[serde(alias = "rikke")]
  Rikke,
  #[serde(alias = "lorentz")]
  Lorentz,
  #[serde(alias = "both")]
  Both,
}

impl fmt::Display for Vocalist {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      Vocalist::Rikke => "Rikke",
      Vocalist::Lorentz => "Lorentz",
      Vocalist::Both => "Both",
    };
    write!(f, "{text}")
  }
}

/// Error producido cuando una cadena no puede convertirse en [`Vocalist`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid vocalist: {input}")]
pub struct VocalistParseError {
  pub input: String,
}

impl FromStr for Vocalist {
  type Err = VocalistParseError;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s.trim().to_lowercase().as_str() {
      "rikke" => Ok(Vocalist::Rikke),
      "lorentz" => Ok(Vocalist::Lorentz),
      "both" => Ok(Vocalist::Both),
      _ => Err(VocalistParseError { input: s.to_string() }),
    }
  }
}

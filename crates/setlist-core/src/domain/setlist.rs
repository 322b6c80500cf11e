use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::editing::EditError;
use crate::domain::ids::{SetId, SongId};
use crate::domain::song::Song;

/// Un Set: lista ordenada de canciones preparada para un bloque de actuación.
///
/// Guarda snapshots completos de las canciones (no sólo ids). Los snapshots
/// pueden quedar desfasados respecto al catálogo; se refrescan con
/// [`Setlist::refreshed_from`] al cargar, pero nunca se consideran la fuente
/// de verdad.
///
/// Invariante: no hay dos entradas con el mismo `id` de canción. Las
/// operaciones de [`crate::domain::editing`] son las que la garantizan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setlist {
  pub id: SetId,
  pub name: String,
  /// Orden plano de almacenamiento. Los bloques de medley se derivan de aquí.
  #[serde(default)]
  pub songs: Vec<Song>,
  pub created_at: DateTime<Utc>,
  #[serde(default)]
  pub created_by: String,
  #[serde(default)]
  pub metadata: BTreeMap<String, serde_json::Value>,
}

impl Setlist {
  /// Crea un Set vacío. El nombre se recorta y no puede quedar vacío.
  pub fn new(name: &str, created_by: impl Into<String>) -> Result<Self, EditError> {
    Ok(Self {
      id: SetId::generate(),
      name: validate_name(name)?,
      songs: Vec::new(),
      created_at: Utc::now(),
      created_by: created_by.into(),
      metadata: BTreeMap::new(),
    })
  }

  /// Devuelve una copia con el nombre cambiado.
  pub fn renamed(&self, name: &str) -> Result<Self, EditError> {
    Ok(Self { name: validate_name(name)?, ..self.clone() })
  }

  pub fn contains(&self, id: &SongId) -> bool {
    self.songs.iter().any(|s| &s.id == id)
  }

  pub fn position_of(&self, id: &SongId) -> Option<usize> {
    self.songs.iter().position(|s| &s.id == id)
  }

  pub fn len(&self) -> usize {
    self.songs.len()
  }

  pub fn is_empty(&self) -> bool {
    self.songs.is_empty()
  }

  /// Copia del Set con el mismo orden pero con cada snapshot sustituido por
  /// el registro actual del catálogo.
  ///
  /// Las canciones que ya no existen en el catálogo se conservan tal cual.
  pub fn refreshed_from(&self, catalog: &[Song]) -> Self {
    let by_id: HashMap<&SongId, &Song> = catalog.iter().map(|s| (&s.id, s)).collect();

    let songs = self
      .songs
      .iter()
      .map(|snapshot| by_id.get(&snapshot.id).map_or_else(|| snapshot.clone(), |live| (*live).clone()))
      .collect();

    Self { songs, ..self.clone() }
  }

  /// Ids con más de una aparición. Vacío en cualquier Set bien formado.
  pub fn duplicate_ids(&self) -> Vec<SongId> {
    let mut seen = HashMap::new();
    for song in &self.songs {
      *seen.entry(&song.id).or_insert(0usize) += 1;
    }
    let mut dups: Vec<SongId> = seen.into_iter().filter(|(_, n)| *n > 1).map(|(id, _)| id.clone()).collect();
    dups.sort();
    dups
  }
}

fn validate_name(name: &str) -> Result<String, EditError> {
  let trimmed = name.trim();
  if trimmed.is_empty() {
    return Err(EditError::EmptyName);
  }
  Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::song;

  #[test]
  fn test_new_set_is_empty_and_trimmed() {
    let set = Setlist::new("  Set 1 ", "lorentz").unwrap();
    assert_eq!(set.name, "Set 1");
    assert!(set.is_empty());
    assert_eq!(set.created_by, "lorentz");
  }

  #[test]
  fn test_empty_name_is_rejected() {
    assert_eq!(Setlist::new("   ", "x").unwrap_err(), EditError::EmptyName);

    let set = Setlist::new("Encore", "x").unwrap();
    assert_eq!(set.renamed("").unwrap_err(), EditError::EmptyName);
    assert_eq!(set.renamed("Encore 2").unwrap().name, "Encore 2");
  }

  #[test]
  fn test_refresh_replaces_known_snapshots_and_keeps_stale_ones() {
    let mut set = Setlist::new("Main", "x").unwrap();
    set.songs = vec![song("a").duration("3:00").build(), song("gone").build(), song("b").build()];

    let catalog = vec![song("b").title("B (live)").build(), song("a").duration("3:30").build()];
    let refreshed = set.refreshed_from(&catalog);

    let ids: Vec<&str> = refreshed.songs.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["a", "gone", "b"]);
    assert_eq!(refreshed.songs[0].duration.as_deref(), Some("3:30"));
    assert_eq!(refreshed.songs[2].title, "B (live)");
    assert_eq!(refreshed.songs[1], set.songs[1]);
  }

  #[test]
  fn test_serializes_with_camel_case_fields() {
    let set = Setlist::new("Main", "rikke").unwrap();
    let value = serde_json::to_value(&set).unwrap();
    assert!(value.get("createdAt").is_some());
    assert!(value.get("createdBy").is_some());
    assert_eq!(value["songs"], serde_json::json!([]));
  }

  #[test]
  fn test_duplicate_ids() {
    let mut set = Setlist::new("Main", "x").unwrap();
    set.songs = vec![song("a").build(), song("b").build(), song("a").build()];
    assert_eq!(set.duplicate_ids(), vec![SongId::from("a")]);
  }
}

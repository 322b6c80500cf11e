//! Consultas sobre el catálogo completo para alimentar el editor de Sets:
//! medleys disponibles y canciones que todavía se pueden añadir.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::setlist::Setlist;
use crate::domain::song::Song;

/// Un medley del catálogo con sus canciones ordenadas por `medley_position`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedleyGroup {
  pub name: String,
  pub songs: Vec<Song>,
}

/// Agrupa todas las canciones del catálogo con etiqueta de medley no vacía.
///
/// Los grupos salen ordenados por nombre. Dentro de cada grupo se ordena por
/// posición; una posición ausente cuenta como `0` y los empates conservan el
/// orden del catálogo.
pub fn catalog_medleys(catalog: &[Song]) -> Vec<MedleyGroup> {
  let mut groups: BTreeMap<&str, Vec<Song>> = BTreeMap::new();

  for song in catalog {
    if let Some(label) = song.medley_label() {
      groups.entry(label).or_default().push(song.clone());
    }
  }

  groups
    .into_iter()
    .map(|(name, mut songs)| {
      songs.sort_by_key(|s| s.medley_position.unwrap_or(0));
      MedleyGroup { name: name.to_string(), songs }
    })
    .collect()
}

/// Medleys con al menos una canción que aún no está en `set`.
pub fn available_medleys(catalog: &[Song], set: &Setlist) -> Vec<MedleyGroup> {
  catalog_medleys(catalog).into_iter().filter(|group| group.songs.iter().any(|s| !set.contains(&s.id))).collect()
}

/// Busca un medley del catálogo por nombre exacto.
pub fn find_medley(catalog: &[Song], name: &str) -> Option<MedleyGroup> {
  catalog_medleys(catalog).into_iter().find(|group| group.name == name)
}

/// Canciones del catálogo que no están en `set` y casan con `query`
/// (título, artista o etiqueta; sin distinguir mayúsculas). Una búsqueda
/// vacía devuelve todas.
pub fn available_songs<'a>(catalog: &'a [Song], set: &Setlist, query: &str) -> Vec<&'a Song> {
  let needle = query.trim().to_lowercase();

  catalog
    .iter()
    .filter(|song| !set.contains(&song.id))
    .filter(|song| {
      needle.is_empty()
        || song.title.to_lowercase().contains(&needle)
        || song.artist.to_lowercase().contains(&needle)
        || song.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    })
    .collect()
}

//! Vista organizada de un Set: agrupa tramos contiguos del mismo medley en
//! bloques atómicos y permite volver al orden plano de almacenamiento.
//!
//! Se cumple siempre `flatten(&organize_by_medleys(s)) == s`.

use std::slice;

use serde::{Deserialize, Serialize};

use crate::domain::ids::BlockId;
use crate::domain::song::Song;

/// Entrada de la vista organizada. No se persiste: se recalcula desde la
/// lista plana cada vez que hace falta.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum OrganizedEntry {
  /// Canción suelta, fuera de cualquier medley.
  Single { song: Song },
  /// Tramo contiguo y maximal de canciones con la misma etiqueta de medley.
  Medley(MedleyBlock),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MedleyBlock {
  pub id: BlockId,
  pub name: String,
  /// Nunca vacío. Conserva el orden plano del Set.
  pub songs: Vec<Song>,
}

impl OrganizedEntry {
  /// Canciones que cubre la entrada, en orden.
  pub fn songs(&self) -> &[Song] {
    match self {
      OrganizedEntry::Single { song } => slice::from_ref(song),
      OrganizedEntry::Medley(block) => &block.songs,
    }
  }

  pub fn len(&self) -> usize {
    self.songs().len()
  }

  pub fn is_medley(&self) -> bool {
    matches!(self, OrganizedEntry::Medley(_))
  }
}

/// Agrupa la lista plana en entradas.
///
/// Cada tramo maximal de canciones contiguas con la misma etiqueta no vacía
/// se convierte en un [`MedleyBlock`], incluso si el tramo tiene una sola
/// canción. Dos tramos separados con el mismo nombre producen dos bloques
/// distintos.
pub fn organize_by_medleys(songs: &[Song]) -> Vec<OrganizedEntry> {
  let mut entries = Vec::new();
  let mut start = 0;

  while start < songs.len() {
    let Some(label) = songs[start].medley_label() else {
      entries.push(OrganizedEntry::Single { song: songs[start].clone() });
      start += 1;
      continue;
    };

    let mut end = start + 1;
    while end < songs.len() && songs[end].medley_label() == Some(label) {
      end += 1;
    }

    entries.push(OrganizedEntry::Medley(MedleyBlock {
      id: BlockId::for_run(label, start),
      name: label.to_string(),
      songs: songs[start..end].to_vec(),
    }));
    start = end;
  }

  entries
}

/// Inversa de [`organize_by_medleys`]: concatena las canciones de cada entrada.
pub fn flatten(entries: &[OrganizedEntry]) -> Vec<Song> {
  entries.iter().flat_map(|e| e.songs().iter().cloned()).collect()
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_support::{ids, song};

  fn sample() -> Vec<Song> {
    vec![
      song("a").medley("X", 1).build(),
      song("b").medley("X", 2).build(),
      song("c").build(),
      song("d").medley("Y", 1).build(),
      song("e").build(),
      song("f").medley("X", 3).build(),
      song("g").medley("X", 4).build(),
    ]
  }

  #[test]
  fn test_groups_contiguous_runs() {
    let entries = organize_by_medleys(&sample());

    assert_eq!(entries.len(), 5);
    match &entries[0] {
      OrganizedEntry::Medley(block) => {
        assert_eq!(block.name, "X");
        assert_eq!(ids(&block.songs), ["a", "b"]);
      }
      other => panic!("expected medley block, got {other:?}"),
    }
    assert!(matches!(&entries[1], OrganizedEntry::Single { song } if song.id.as_str() == "c"));
  }

  #[test]
  fn test_single_song_medley_is_still_a_block() {
    let entries = organize_by_medleys(&sample());
    assert!(entries[2].is_medley());
    assert_eq!(entries[2].len(), 1);
  }

  #[test]
  fn test_separated_runs_with_same_name_are_independent_blocks() {
    let entries = organize_by_medleys(&sample());

    let (OrganizedEntry::Medley(first), OrganizedEntry::Medley(second)) = (&entries[0], &entries[4]) else {
      panic!("expected two medley blocks");
    };
    assert_eq!(first.name, second.name);
    assert_ne!(first.id, second.id);
    assert_eq!(ids(&second.songs), ["f", "g"]);
  }

  #[test]
  fn test_round_trip_is_identity() {
    let songs = sample();
    assert_eq!(flatten(&organize_by_medleys(&songs)), songs);
    assert!(organize_by_medleys(&[]).is_empty());
  }

  #[test]
  fn test_adjacent_songs_share_block_iff_same_label() {
    let songs = sample();
    let entries = organize_by_medleys(&songs);

    let mut owner = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
      owner.extend(std::iter::repeat_n(i, entry.len()));
    }

    for i in 1..songs.len() {
      let same_label = songs[i - 1].medley_label().is_some() && songs[i - 1].medley_label() == songs[i].medley_label();
      assert_eq!(owner[i - 1] == owner[i], same_label, "pair {}", i);
    }
  }
}

//! Operaciones de edición de un Set.
//!
//! Todas son puras: reciben el Set actual y devuelven uno nuevo, sin tocar el
//! original. Persistir el resultado es trabajo de quien llama
//! ([`crate::services::SetService`]).
//!
//! Los errores se dividen en dos clases (ver [`EditError::is_rejection`]):
//! rechazos que el usuario debe ver, y no-ops que simplemente dejan el Set
//! como estaba.

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::ids::SongId;
use crate::domain::medley::{OrganizedEntry, flatten, organize_by_medleys};
use crate::domain::setlist::Setlist;
use crate::domain::song::Song;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
  #[error("set name cannot be empty")]
  EmptyName,

  #[error("\"{title}\" is already in the set")]
  DuplicateSong { id: SongId, title: String },

  #[error("song {0} is not in the set")]
  UnknownSong(SongId),

  #[error("no entry at position {0}")]
  NoSuchEntry(usize),

  #[error("entry {index} cannot move {direction}")]
  AtBoundary { index: usize, direction: Direction },

  #[error("every song of the medley is already in the set")]
  NothingToAdd,
}

impl EditError {
  /// `true` para errores de validación que se muestran al usuario.
  /// El resto son no-ops silenciosos.
  pub fn is_rejection(&self) -> bool {
    matches!(self, EditError::EmptyName | EditError::DuplicateSong { .. })
  }
}

/// Hacia dónde mover una entrada de la vista organizada.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
  Top,
  Up,
  Down,
  Bottom,
}

impl fmt::Display for Direction {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    let text = match self {
      Direction::Top => "top",
      Direction::Up => "up",
      Direction::Down => "down",
      Direction::Bottom => "bottom",
    };
    write!(f, "{text}")
  }
}

/// Resultado de añadir un medley: algunas canciones pueden haberse saltado
/// porque ya estaban en el Set.
#[derive(Debug, Clone, PartialEq)]
pub struct MedleyAddition {
  pub set: Setlist,
  pub added: Vec<SongId>,
  pub skipped: Vec<SongId>,
}

/// Añade una canción al final. Rechaza duplicados.
pub fn add_song(set: &Setlist, song: Song) -> Result<Setlist, EditError> {
  if set.contains(&song.id) {
    return Err(EditError::DuplicateSong { id: song.id, title: song.title });
  }

  let mut next = set.clone();
  next.songs.push(song);
  Ok(next)
}

/// Añade al final, en bloque, las canciones de un medley que aún no estén.
///
/// `medley_songs` debe venir ya ordenado por `medley_position`. Las que ya
/// están en el Set se saltan sin error; sólo si no queda ninguna por añadir
/// se devuelve [`EditError::NothingToAdd`].
pub fn add_medley(set: &Setlist, medley_songs: &[Song]) -> Result<MedleyAddition, EditError> {
  let mut next = set.clone();
  let mut added = Vec::new();
  let mut skipped = Vec::new();

  for song in medley_songs {
    if next.contains(&song.id) {
      skipped.push(song.id.clone());
    } else {
      added.push(song.id.clone());
      next.songs.push(song.clone());
    }
  }

  if added.is_empty() {
    return Err(EditError::NothingToAdd);
  }

  Ok(MedleyAddition { set: next, added, skipped })
}

/// Quita una única canción por id. Si era la única de su bloque, el bloque
/// desaparece con ella.
pub fn remove_song(set: &Setlist, id: &SongId) -> Result<Setlist, EditError> {
  let index = set.position_of(id).ok_or_else(|| EditError::UnknownSong(id.clone()))?;

  let mut next = set.clone();
  next.songs.remove(index);
  Ok(next)
}

/// Quita la entrada `index` de la vista organizada con todas sus canciones.
///
/// Funciona igual si la entrada es una canción suelta.
pub fn remove_block(set: &Setlist, index: usize) -> Result<Setlist, EditError> {
  let mut entries = organize_by_medleys(&set.songs);
  if index >= entries.len() {
    return Err(EditError::NoSuchEntry(index));
  }
  entries.remove(index);

  Ok(Setlist { songs: flatten(&entries), ..set.clone() })
}

/// Posición destino de mover la entrada `index` en una lista de `len` entradas.
///
/// `None` si `index` está fuera de rango o la entrada ya está en el límite.
pub fn move_target(len: usize, index: usize, direction: Direction) -> Option<usize> {
  if index >= len {
    return None;
  }

  let target = match direction {
    Direction::Top => 0,
    Direction::Up => index.saturating_sub(1),
    Direction::Down => (index + 1).min(len - 1),
    Direction::Bottom => len - 1,
  };

  (target != index).then_some(target)
}

/// Mueve una entrada completa (canción o bloque) dentro de la vista
/// organizada. En el límite, o con un índice inválido, devuelve la lista sin
/// cambios.
pub fn move_entry_in(entries: &[OrganizedEntry], index: usize, direction: Direction) -> Vec<OrganizedEntry> {
  let mut moved = entries.to_vec();
  if let Some(target) = move_target(entries.len(), index, direction) {
    let entry = moved.remove(index);
    moved.insert(target, entry);
  }
  moved
}

/// Mueve la entrada `index` del Set y devuelve el Set re-aplanado.
///
/// Un bloque de medley se mueve entero; nunca se parte.
pub fn move_entry(set: &Setlist, index: usize, direction: Direction) -> Result<Setlist, EditError> {
  let entries = organize_by_medleys(&set.songs);
  if index >= entries.len() {
    return Err(EditError::NoSuchEntry(index));
  }
  if move_target(entries.len(), index, direction).is_none() {
    return Err(EditError::AtBoundary { index, direction });
  }

  let moved = move_entry_in(&entries, index, direction);
  Ok(Setlist { songs: flatten(&moved), ..set.clone() })
}

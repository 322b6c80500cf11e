use serde::{Deserialize, Serialize};

use crate::domain::ids::SongId;
use crate::domain::setlist::Setlist;
use crate::domain::song::Song;

/// Cambios de instrumento entre dos canciones consecutivas. Es un aviso para
/// los músicos, nunca bloquea nada.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentChange {
  pub bass_changed: bool,
  pub guitar_changed: bool,
}

impl InstrumentChange {
  pub fn any(&self) -> bool {
    self.bass_changed || self.guitar_changed
  }
}

pub fn detect_change(previous: &Song, current: &Song) -> InstrumentChange {
  InstrumentChange { bass_changed: previous.bass_guitar != current.bass_guitar, guitar_changed: previous.guitar != current.guitar }
}

/// Aviso entre la canción en `index - 1` y la de `index`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangeWarning {
  /// Posición de la canción que requiere el cambio dentro de la secuencia revisada.
  pub index: usize,
  pub from: SongId,
  pub to: SongId,
  pub change: InstrumentChange,
}

/// Todos los pares consecutivos con algún cambio de bajo o guitarra.
pub fn change_warnings(songs: &[Song]) -> Vec<ChangeWarning> {
  warnings_over(songs.iter())
}

/// Igual que [`change_warnings`] pero sobre varios Sets tocados seguidos
/// (un bolo): el último tema de un Set se compara con el primero del siguiente.
/// Los índices son posiciones en la secuencia concatenada.
pub fn gig_change_warnings(sets: &[Setlist]) -> Vec<ChangeWarning> {
  warnings_over(sets.iter().flat_map(|set| set.songs.iter()))
}

fn warnings_over<'a>(songs: impl Iterator<Item = &'a Song>) -> Vec<ChangeWarning> {
  let mut warnings = Vec::new();
  let mut previous: Option<&Song> = None;

  for (index, current) in songs.enumerate() {
    if let Some(prev) = previous {
      let change = detect_change(prev, current);
      if change.any() {
        warnings.push(ChangeWarning { index, from: prev.id.clone(), to: current.id.clone(), change });
      }
    }
    previous = Some(current);
  }

  warnings
}

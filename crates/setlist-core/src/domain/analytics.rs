use serde::{Deserialize, Serialize};

use crate::domain::ids::SongId;
use crate::domain::song::{Language, Song, Vocalist};

/// Valor por idioma.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageSplit<T> {
  pub english: T,
  pub danish: T,
}

impl<T: Copy> LanguageSplit<T> {
  pub fn get(&self, language: Language) -> T {
    match language {
      Language::English => self.english,
      Language::Danish => self.danish,
    }
  }
}

/// Valor por vocalista. `both` es el cubo propio de los duetos y no se resta
/// de `rikke` ni de `lorentz`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct VocalistSplit<T> {
  pub rikke: T,
  pub lorentz: T,
  pub both: T,
}

/// Estadísticas derivadas de una lista de canciones (un Set entero o
/// cualquier subconjunto).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SetMix {
  pub song_count: usize,
  /// Canciones sin duración interpretable; cuentan como 0 minutos.
  pub unknown_durations: usize,
  pub total_minutes: f64,
  /// Porcentajes enteros sobre la duración total.
  pub language_share: LanguageSplit<u32>,
  pub vocalist_share: VocalistSplit<u32>,
  pub per_language_minutes: LanguageSplit<f64>,
  pub per_vocalist_minutes: VocalistSplit<f64>,
}

/// Calcula duración total y reparto por idioma y vocalista.
///
/// Un dueto (`Both`) aporta la mitad de su duración a cada vocalista y la
/// duración completa a `both`. Con una lista vacía, o sin duraciones
/// conocidas, todo vale cero.
pub fn compute_mix(songs: &[Song]) -> SetMix {
  let mut mix = SetMix { song_count: songs.len(), ..SetMix::default() };

  for song in songs {
    if !song.has_known_duration() {
      mix.unknown_durations += 1;
    }
    let minutes = song.minutes();
    mix.total_minutes += minutes;

    match song.language {
      Language::English => mix.per_language_minutes.english += minutes,
      Language::Danish => mix.per_language_minutes.danish += minutes,
    }

    let per_vocalist = &mut mix.per_vocalist_minutes;
    match song.vocalist {
      Vocalist::Rikke => per_vocalist.rikke += minutes,
      Vocalist::Lorentz => per_vocalist.lorentz += minutes,
      Vocalist::Both => {
        per_vocalist.rikke += minutes / 2.0;
        per_vocalist.lorentz += minutes / 2.0;
        per_vocalist.both += minutes;
      }
    }
  }

  let total = mix.total_minutes;
  mix.language_share = LanguageSplit {
    english: percent(mix.per_language_minutes.english, total),
    danish: percent(mix.per_language_minutes.danish, total),
  };
  mix.vocalist_share = VocalistSplit {
    rikke: percent(mix.per_vocalist_minutes.rikke, total),
    lorentz: percent(mix.per_vocalist_minutes.lorentz, total),
    both: percent(mix.per_vocalist_minutes.both, total),
  };

  mix
}

fn percent(part: f64, total: f64) -> u32 {
  if total <= 0.0 {
    return 0;
  }
  (part / total * 100.0).round() as u32
}

/// Duración de una canción concreta, para desgloses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SongDuration {
  pub id: SongId,
  pub title: String,
  pub minutes: f64,
  /// `false` cuando la duración falta o no se pudo leer (se muestra "sin definir").
  pub known: bool,
}

pub fn duration_breakdown(songs: &[Song]) -> Vec<SongDuration> {
  songs
    .iter()
    .map(|s| SongDuration { id: s.id.clone(), title: s.title.clone(), minutes: s.minutes(), known: s.has_known_duration() })
    .collect()
}

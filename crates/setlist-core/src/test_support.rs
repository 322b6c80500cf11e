//! Utilidades compartidas por los tests: constructor de canciones y dobles en
//! memoria de los puertos.

use std::collections::BTreeSet;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::ids::{SetId, SongId};
use crate::domain::setlist::Setlist;
use crate::domain::song::{Language, Song, Vocalist};
use crate::ports::{EditNotifier, RepoError, SetRepository, SongCatalog};

pub struct SongBuilder {
  song: Song,
}

pub fn song(id: &str) -> SongBuilder {
  SongBuilder {
    song: Song {
      id: SongId::from(id),
      title: format!("Song {id}"),
      artist: String::new(),
      key: String::new(),
      duration: None,
      language: Language::English,
      vocalist: Vocalist::Rikke,
      bass_guitar: String::new(),
      guitar: String::new(),
      backing_track: false,
      medley: None,
      medley_position: None,
      tags: BTreeSet::new(),
      notes: String::new(),
    },
  }
}

impl SongBuilder {
  pub fn title(mut self, title: &str) -> Self {
    self.song.title = title.to_string();
    self
  }

  pub fn artist(mut self, artist: &str) -> Self {
    self.song.artist = artist.to_string();
    self
  }

  pub fn duration(mut self, duration: &str) -> Self {
    self.song.duration = Some(duration.to_string());
    self
  }

  pub fn language(mut self, language: Language) -> Self {
    self.song.language = language;
    self
  }

  pub fn vocalist(mut self, vocalist: Vocalist) -> Self {
    self.song.vocalist = vocalist;
    self
  }

  pub fn bass(mut self, bass: &str) -> Self {
    self.song.bass_guitar = bass.to_string();
    self
  }

  pub fn guitar(mut self, guitar: &str) -> Self {
    self.song.guitar = guitar.to_string();
    self
  }

  pub fn medley(mut self, name: &str, position: u32) -> Self {
    self.song.medley = Some(name.to_string());
    self.song.medley_position = Some(position);
    self
  }

  pub fn tag(mut self, tag: &str) -> Self {
    self.song.tags.insert(tag.to_string());
    self
  }

  pub fn build(self) -> Song {
    self.song
  }
}

pub fn ids(songs: &[Song]) -> Vec<&str> {
  songs.iter().map(|s| s.id.as_str()).collect()
}

pub fn set_with(songs: Vec<Song>) -> Setlist {
  let mut set = Setlist::new("Test set", "tests").expect("valid name");
  set.songs = songs;
  set
}

/// Catálogo fijo en memoria.
pub struct MemoryCatalog {
  pub songs: Vec<Song>,
}

#[async_trait]
impl SongCatalog for MemoryCatalog {
  async fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    Ok(self.songs.clone())
  }
}

/// Repositorio en memoria que puede simular fallos de escritura.
#[derive(Default)]
pub struct MemoryRepository {
  pub sets: Mutex<Vec<Setlist>>,
  pub writes: Mutex<usize>,
  pub fail_writes: bool,
}

impl MemoryRepository {
  pub fn failing() -> Self {
    Self { fail_writes: true, ..Self::default() }
  }

  pub fn with_sets(sets: Vec<Setlist>) -> Self {
    Self { sets: Mutex::new(sets), ..Self::default() }
  }

  pub fn stored(&self, id: &SetId) -> Option<Setlist> {
    self.sets.lock().unwrap().iter().find(|s| &s.id == id).cloned()
  }

  pub fn write_count(&self) -> usize {
    *self.writes.lock().unwrap()
  }

  fn check_writable(&self) -> Result<(), RepoError> {
    if self.fail_writes {
      return Err(RepoError::Storage("connection refused".to_string()));
    }
    Ok(())
  }
}

#[async_trait]
impl SetRepository for MemoryRepository {
  async fn list_sets(&self) -> Result<Vec<Setlist>, RepoError> {
    Ok(self.sets.lock().unwrap().clone())
  }

  async fn find_set(&self, id: &SetId) -> Result<Option<Setlist>, RepoError> {
    Ok(self.stored(id))
  }

  async fn create_set(&self, set: &Setlist) -> Result<(), RepoError> {
    self.check_writable()?;
    let mut sets = self.sets.lock().unwrap();
    if sets.iter().any(|s| s.id == set.id) {
      return Err(RepoError::Storage(format!("set {} already exists", set.id)));
    }
    sets.push(set.clone());
    *self.writes.lock().unwrap() += 1;
    Ok(())
  }

  async fn save_set(&self, set: &Setlist) -> Result<(), RepoError> {
    self.check_writable()?;
    let mut sets = self.sets.lock().unwrap();
    let existing = sets.iter_mut().find(|s| s.id == set.id).ok_or(RepoError::NotFound)?;
    *existing = set.clone();
    *self.writes.lock().unwrap() += 1;
    Ok(())
  }

  async fn delete_set(&self, id: &SetId) -> Result<(), RepoError> {
    let mut sets = self.sets.lock().unwrap();
    let before = sets.len();
    sets.retain(|s| &s.id != id);
    if sets.len() == before { Err(RepoError::NotFound) } else { Ok(()) }
  }
}

/// Notificador que acumula los mensajes recibidos.
#[derive(Default)]
pub struct RecordingNotifier {
  pub rejections: Mutex<Vec<String>>,
  pub failures: Mutex<Vec<String>>,
}

#[async_trait]
impl EditNotifier for RecordingNotifier {
  async fn rejected(&self, message: &str) {
    self.rejections.lock().unwrap().push(message.to_string());
  }

  async fn persist_failed(&self, set_id: &SetId, error: &str) {
    self.failures.lock().unwrap().push(format!("{set_id}: {error}"));
  }
}

use crate::schema::sets;
use crate::schema::songs;

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use diesel::prelude::*;
use setlist_core::domain::{Language, SetId, Setlist, Song, SongId, Vocalist};
use setlist_core::ports::RepoError;

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = songs)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SongRow {
  pub id: String,
  pub title: String,
  pub artist: String,
  pub musical_key: String,
  pub duration: Option<String>,
  pub language: String,
  pub vocalist: String,
  pub bass_guitar: String,
  pub guitar: String,
  pub backing_track: bool,
  pub medley: Option<String>,
  pub medley_position: Option<i32>,
  pub tags: String,
  pub notes: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = songs)]
pub struct NewSongRow {
  pub id: String,
  pub title: String,
  pub artist: String,
  pub musical_key: String,
  pub duration: Option<String>,
  pub language: String,
  pub vocalist: String,
  pub bass_guitar: String,
  pub guitar: String,
  pub backing_track: bool,
  pub medley: Option<String>,
  pub medley_position: Option<i32>,
  pub tags: String,
  pub notes: String,
}

#[derive(Debug, Queryable, Selectable)]
#[diesel(table_name = sets)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct SetRow {
  pub id: String,
  pub name: String,
  pub songs: String,
  pub created_at: String,
  pub created_by: String,
  pub metadata: String,
  pub updated_at: String,
}

#[derive(Debug, Insertable, AsChangeset)]
#[diesel(table_name = sets)]
pub struct NewSetRow {
  pub id: String,
  pub name: String,
  pub songs: String,
  pub created_at: String,
  pub created_by: String,
  pub metadata: String,
  pub updated_at: String,
}

fn corrupt(what: &str, id: &str, err: impl std::fmt::Display) -> RepoError {
  RepoError::Storage(format!("corrupt {what} in row {id}: {err}"))
}

pub fn song_to_new_row(song: &Song) -> Result<NewSongRow, RepoError> {
  let tags = serde_json::to_string(&song.tags).map_err(|e| RepoError::Storage(e.to_string()))?;

  Ok(NewSongRow {
    id: song.id.to_string(),
    title: song.title.clone(),
    artist: song.artist.clone(),
    musical_key: song.key.clone(),
    duration: song.duration.clone(),
    language: song.language.to_string(),
    vocalist: song.vocalist.to_string(),
    bass_guitar: song.bass_guitar.clone(),
    guitar: song.guitar.clone(),
    backing_track: song.backing_track,
    medley: song.medley.clone(),
    medley_position: song.medley_position.and_then(|p| i32::try_from(p).ok()),
    tags,
    notes: song.notes.clone(),
  })
}

pub fn row_to_song(row: SongRow) -> Result<Song, RepoError> {
  let language: Language = row.language.parse().map_err(|e| corrupt("language", &row.id, e))?;
  let vocalist: Vocalist = row.vocalist.parse().map_err(|e| corrupt("vocalist", &row.id, e))?;
  let tags: BTreeSet<String> = serde_json::from_str(&row.tags).map_err(|e| corrupt("tags", &row.id, e))?;

  Ok(Song {
    id: SongId::from(row.id),
    title: row.title,
    artist: row.artist,
    key: row.musical_key,
    duration: row.duration,
    language,
    vocalist,
    bass_guitar: row.bass_guitar,
    guitar: row.guitar,
    backing_track: row.backing_track,
    medley: row.medley,
    // una posición negativa es un dato roto: se trata como ausente
    medley_position: row.medley_position.and_then(|p| u32::try_from(p).ok()),
    tags,
    notes: row.notes,
  })
}

pub fn set_to_new_row(set: &Setlist) -> Result<NewSetRow, RepoError> {
  let songs = serde_json::to_string(&set.songs).map_err(|e| RepoError::Storage(e.to_string()))?;
  let metadata = serde_json::to_string(&set.metadata).map_err(|e| RepoError::Storage(e.to_string()))?;

  Ok(NewSetRow {
    id: set.id.to_string(),
    name: set.name.clone(),
    songs,
    created_at: set.created_at.to_rfc3339(),
    created_by: set.created_by.clone(),
    metadata,
    updated_at: Utc::now().to_rfc3339(),
  })
}

pub fn row_to_set(row: SetRow) -> Result<Setlist, RepoError> {
  let songs = serde_json::from_str(&row.songs).map_err(|e| corrupt("songs", &row.id, e))?;
  let metadata = serde_json::from_str(&row.metadata).map_err(|e| corrupt("metadata", &row.id, e))?;
  let created_at = DateTime::parse_from_rfc3339(&row.created_at)
    .map_err(|e| corrupt("created_at", &row.id, e))?
    .with_timezone(&Utc);

  Ok(Setlist { id: SetId::from(row.id), name: row.name, songs, created_at, created_by: row.created_by, metadata })
}

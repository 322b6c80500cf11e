pub mod config;
pub mod models;
pub mod schema;

use async_trait::async_trait;
use diesel::connection::SimpleConnection;
use diesel::prelude::*;
use diesel::r2d2::{ConnectionManager, CustomizeConnection, Pool};
use diesel::sqlite::SqliteConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{debug, info};

use setlist_core::domain::{SetId, Setlist, Song};
use setlist_core::errors::CoreError;
use setlist_core::ports::{RepoError, SetRepository, SongCatalog};

pub use crate::config::StorageConfig;
use crate::models::{SetRow, SongRow, row_to_set, row_to_song, set_to_new_row, song_to_new_row};

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

const JOURNAL_MODES: &[&str] = &["DELETE", "TRUNCATE", "PERSIST", "MEMORY", "WAL", "OFF"];

type SqlitePool = Pool<ConnectionManager<SqliteConnection>>;

#[derive(Debug)]
struct ConnectionSetup;

impl CustomizeConnection<SqliteConnection, diesel::r2d2::Error> for ConnectionSetup {
  fn on_acquire(&self, conn: &mut SqliteConnection) -> Result<(), diesel::r2d2::Error> {
    conn.batch_execute("PRAGMA busy_timeout = 5000;").map_err(diesel::r2d2::Error::QueryError)
  }
}

/// Adapter SQLite para el catálogo y los Sets.
///
/// Los Sets se guardan como una fila con la lista plana de snapshots en JSON;
/// cada escritura reemplaza la fila entera (la última escritura gana). Guardar
/// un Set borrado no lo vuelve a crear.
#[derive(Clone)]
pub struct SqliteSetStore {
  pool: SqlitePool,
}

impl SqliteSetStore {
  /// Abre (o crea) la base de datos y aplica las migraciones pendientes.
  pub fn new(database_url: &str, journal_mode: Option<&str>) -> Result<Self, CoreError> {
    let manager = ConnectionManager::<SqliteConnection>::new(database_url);
    let pool = Pool::builder()
      .connection_customizer(Box::new(ConnectionSetup))
      .build(manager)
      .map_err(|e| CoreError::Repository(e.to_string()))?;

    let mut conn = pool.get().map_err(|e| CoreError::Repository(e.to_string()))?;

    if let Some(mode) = journal_mode {
      let mode = mode.to_uppercase();
      if !JOURNAL_MODES.contains(&mode.as_str()) {
        return Err(CoreError::Repository(format!("unsupported journal mode: {mode}")));
      }
      conn
        .batch_execute(&format!("PRAGMA journal_mode = {mode};"))
        .map_err(|e| CoreError::Repository(e.to_string()))?;
    }

    let applied = conn.run_pending_migrations(MIGRATIONS).map_err(|e| CoreError::Repository(e.to_string()))?;
    if !applied.is_empty() {
      info!(count = applied.len(), "database migrations applied");
    }

    Ok(Self { pool })
  }

  /// Abre la base de datos indicada en la sección `[storage]`.
  pub fn new_from_config() -> Result<Self, CoreError> {
    let cfg = StorageConfig::load().map_err(|e| CoreError::Repository(e.to_string()))?;
    Self::from_config(&cfg)
  }

  pub fn from_config(cfg: &StorageConfig) -> Result<Self, CoreError> {
    let url = cfg.db_path.to_string_lossy();
    info!(db = %url, "opening set store");
    Self::new(&url, cfg.journal_mode.as_deref())
  }

  /// Inserta o actualiza una canción del catálogo.
  ///
  /// La edición del catálogo pertenece a otras pantallas; esto existe para
  /// poblarlo (importaciones, pruebas).
  pub async fn upsert_song(&self, song: &Song) -> Result<(), RepoError> {
    let row = song_to_new_row(song)?;

    self
      .with_conn(move |conn| {
        use crate::schema::songs::dsl::*;

        diesel::insert_into(songs)
          .values(&row)
          .on_conflict(id)
          .do_update()
          .set(&row)
          .execute(conn)
          .map_err(storage_error)?;
        Ok(())
      })
      .await
  }

  /// Ejecuta `f` con una conexión del pool en un hilo bloqueante de Tokio.
  async fn with_conn<T, F>(&self, f: F) -> Result<T, RepoError>
  where
    T: Send + 'static,
    F: FnOnce(&mut SqliteConnection) -> Result<T, RepoError> + Send + 'static,
  {
    let pool = self.pool.clone();

    tokio::task::spawn_blocking(move || {
      let mut conn = pool.get().map_err(|e| RepoError::Storage(e.to_string()))?;
      f(&mut conn)
    })
    .await
    .map_err(|e| RepoError::Storage(format!("blocking task failed: {e}")))?
  }
}

fn storage_error(err: diesel::result::Error) -> RepoError {
  match err {
    diesel::result::Error::NotFound => RepoError::NotFound,
    other => RepoError::Storage(other.to_string()),
  }
}

#[async_trait]
impl SongCatalog for SqliteSetStore {
  async fn list_songs(&self) -> Result<Vec<Song>, RepoError> {
    self
      .with_conn(|conn| {
        use crate::schema::songs::dsl::*;

        let rows = songs
          .order((title.asc(), id.asc()))
          .select(SongRow::as_select())
          .load::<SongRow>(conn)
          .map_err(storage_error)?;

        rows.into_iter().map(row_to_song).collect()
      })
      .await
  }
}

#[async_trait]
impl SetRepository for SqliteSetStore {
  async fn list_sets(&self) -> Result<Vec<Setlist>, RepoError> {
    self
      .with_conn(|conn| {
        use crate::schema::sets::dsl::*;

        let rows =
          sets.order((created_at.asc(), id.asc())).select(SetRow::as_select()).load::<SetRow>(conn).map_err(storage_error)?;

        rows.into_iter().map(row_to_set).collect()
      })
      .await
  }

  async fn find_set(&self, set_id: &SetId) -> Result<Option<Setlist>, RepoError> {
    let key = set_id.to_string();

    self
      .with_conn(move |conn| {
        use crate::schema::sets::dsl::*;

        let row = sets
          .filter(id.eq(key))
          .select(SetRow::as_select())
          .first::<SetRow>(conn)
          .optional()
          .map_err(storage_error)?;

        row.map(row_to_set).transpose()
      })
      .await
  }

  async fn create_set(&self, set: &Setlist) -> Result<(), RepoError> {
    let row = set_to_new_row(set)?;

    self
      .with_conn(move |conn| {
        use crate::schema::sets::dsl::*;

        diesel::insert_into(sets).values(&row).execute(conn).map_err(storage_error)?;
        Ok(())
      })
      .await
  }

  async fn save_set(&self, set: &Setlist) -> Result<(), RepoError> {
    let row = set_to_new_row(set)?;
    debug!(set_id = %set.id, songs = set.len(), "saving set");

    self
      .with_conn(move |conn| {
        use crate::schema::sets::dsl::*;

        let updated = diesel::update(sets.filter(id.eq(&row.id))).set(&row).execute(conn).map_err(storage_error)?;
        if updated == 0 { Err(RepoError::NotFound) } else { Ok(()) }
      })
      .await
  }

  async fn delete_set(&self, set_id: &SetId) -> Result<(), RepoError> {
    let key = set_id.to_string();

    self
      .with_conn(move |conn| {
        use crate::schema::sets::dsl::*;

        let deleted = diesel::delete(sets.filter(id.eq(key))).execute(conn).map_err(storage_error)?;
        if deleted == 0 { Err(RepoError::NotFound) } else { Ok(()) }
      })
      .await
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use setlist_core::domain::{Direction, Language, Vocalist};
  use setlist_core::ports::LogNotifier;
  use setlist_core::services::{SetEdit, SetService};
  use std::collections::BTreeSet;
  use tempfile::{TempDir, tempdir};

  fn open_store() -> (TempDir, SqliteSetStore) {
    let dir = tempdir().unwrap();
    let url = dir.path().join("test.db");
    let store = SqliteSetStore::new(url.to_str().unwrap(), Some("wal")).unwrap();
    (dir, store)
  }

  fn song(id: &str, medley: Option<(&str, u32)>) -> Song {
    Song {
      id: id.into(),
      title: format!("Title {id}"),
      artist: "Band".into(),
      key: "Am".into(),
      duration: Some("3:30".into()),
      language: Language::Danish,
      vocalist: Vocalist::Both,
      bass_guitar: "P".into(),
      guitar: "Tele".into(),
      backing_track: true,
      medley: medley.map(|(name, _)| name.to_string()),
      medley_position: medley.map(|(_, pos)| pos),
      tags: BTreeSet::from(["party".to_string()]),
      notes: String::new(),
    }
  }

  #[tokio::test]
  async fn test_catalog_round_trip() {
    let (_dir, store) = open_store();
    let original = song("s1", Some(("Mix", 2)));

    store.upsert_song(&original).await.unwrap();
    store.upsert_song(&Song { title: "Renamed".into(), ..original.clone() }).await.unwrap();

    let loaded = store.list_songs().await.unwrap();
    assert_eq!(loaded.len(), 1);
    assert_eq!(loaded[0], Song { title: "Renamed".into(), ..original });
  }

  #[tokio::test]
  async fn test_set_crud() {
    let (_dir, store) = open_store();
    let mut set = Setlist::new("Set 1", "rikke").unwrap();
    set.metadata.insert("venue".into(), serde_json::json!("Vega"));

    store.create_set(&set).await.unwrap();
    assert!(store.create_set(&set).await.is_err());

    set.songs.push(song("s1", None));
    store.save_set(&set).await.unwrap();

    assert_eq!(store.find_set(&set.id).await.unwrap(), Some(set.clone()));
    assert_eq!(store.list_sets().await.unwrap(), vec![set.clone()]);

    store.delete_set(&set.id).await.unwrap();
    assert!(matches!(store.delete_set(&set.id).await, Err(RepoError::NotFound)));
    assert_eq!(store.find_set(&set.id).await.unwrap(), None);
  }

  #[tokio::test]
  async fn test_service_over_sqlite() {
    let (_dir, store) = open_store();
    for s in [song("a", Some(("Mix", 1))), song("b", Some(("Mix", 2))), song("c", None)] {
      store.upsert_song(&s).await.unwrap();
    }
    let svc = SetService::new(store.clone(), store.clone(), LogNotifier);

    let set = svc.create_set("Main", "lorentz").await.unwrap();
    let set = svc.apply(&set, SetEdit::AddSong { song_id: "c".into() }).await.unwrap();
    let set = svc.apply(&set, SetEdit::AddMedley { name: "Mix".into() }).await.unwrap();
    svc.apply(&set, SetEdit::Move { index: 1, direction: Direction::Top }).await.unwrap();

    let stored = store.find_set(&set.id).await.unwrap().unwrap();
    let order: Vec<&str> = stored.songs.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(order, ["a", "b", "c"]);
  }

  #[tokio::test]
  async fn test_save_does_not_recreate_deleted_set() {
    let (_dir, store) = open_store();
    let set = Setlist::new("Gone", "x").unwrap();

    assert!(matches!(store.save_set(&set).await, Err(RepoError::NotFound)));

    store.create_set(&set).await.unwrap();
    store.delete_set(&set.id).await.unwrap();
    assert!(matches!(store.save_set(&set).await, Err(RepoError::NotFound)));
    assert!(store.list_sets().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn test_service_edit_after_delete_writes_nothing() {
    let (_dir, store) = open_store();
    store.upsert_song(&song("a", None)).await.unwrap();
    let svc = SetService::new(store.clone(), store.clone(), LogNotifier);

    let set = svc.create_set("Main", "rikke").await.unwrap();
    svc.delete_set(&set.id).await.unwrap();

    let after = svc.apply(&set, SetEdit::AddSong { song_id: "a".into() }).await.unwrap();
    assert_eq!(after, set);
    assert_eq!(store.find_set(&set.id).await.unwrap(), None);
  }

  #[test]
  fn test_rejects_unknown_journal_mode() {
    let dir = tempdir().unwrap();
    let url = dir.path().join("x.db");
    assert!(SqliteSetStore::new(url.to_str().unwrap(), Some("fast; DROP TABLE sets")).is_err());
  }
}

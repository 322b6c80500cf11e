use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::domain::catalog::find_medley;
use crate::domain::editing::{self, Direction, EditError};
use crate::domain::ids::{SetId, SongId};
use crate::domain::setlist::Setlist;
use crate::domain::song::Song;
use crate::errors::CoreError;
use crate::ports::{EditNotifier, RepoError, SetRepository, SongCatalog};

/// Edición que la UI pide aplicar sobre un Set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase", rename_all_fields = "camelCase")]
pub enum SetEdit {
  AddSong { song_id: SongId },
  AddMedley { name: String },
  RemoveSong { song_id: SongId },
  /// Índice en la vista organizada (bloques + canciones sueltas).
  RemoveBlock { index: usize },
  Move { index: usize, direction: Direction },
}

/// Servicio de edición de Sets.
///
/// No guarda estado propio: cada operación recibe el Set actual y devuelve
/// el nuevo valor. La escritura es optimista: si falla, se avisa por el
/// notificador y el valor nuevo se devuelve igualmente (no hay rollback; la
/// copia local diverge hasta recargar).
pub struct SetService<C, R, N>
where
  C: SongCatalog,
  R: SetRepository,
  N: EditNotifier,
{
  catalog: C,
  repo: R,
  notifier: N,
}

impl<C, R, N> SetService<C, R, N>
where
  C: SongCatalog,
  R: SetRepository,
  N: EditNotifier,
{
  pub fn new(catalog: C, repo: R, notifier: N) -> Self {
    Self { catalog, repo, notifier }
  }

  // -------- QUERY (read) --------

  pub async fn catalog(&self) -> Result<Vec<Song>, CoreError> {
    Ok(self.catalog.list_songs().await?)
  }

  /// Todos los Sets, con los snapshots refrescados desde el catálogo.
  pub async fn load_sets(&self) -> Result<Vec<Setlist>, CoreError> {
    let catalog = self.catalog.list_songs().await?;
    let sets = self.repo.list_sets().await?;
    Ok(sets.iter().map(|s| s.refreshed_from(&catalog)).collect())
  }

  pub async fn get_set(&self, id: &SetId) -> Result<Option<Setlist>, CoreError> {
    let Some(set) = self.repo.find_set(id).await? else {
      return Ok(None);
    };
    let catalog = self.catalog.list_songs().await?;
    Ok(Some(set.refreshed_from(&catalog)))
  }

  // -------- COMMAND (write) --------

  pub async fn create_set(&self, name: &str, created_by: &str) -> Result<Setlist, CoreError> {
    let set = match Setlist::new(name, created_by) {
      Ok(set) => set,
      Err(e) => return Err(self.reject(e).await),
    };

    if let Err(e) = self.repo.create_set(&set).await {
      self.report_write_failure(&set.id, &e).await;
    } else {
      info!(set_id = %set.id, name = %set.name, "set created");
    }
    Ok(set)
  }

  pub async fn rename_set(&self, set: &Setlist, name: &str) -> Result<Setlist, CoreError> {
    let renamed = match set.renamed(name) {
      Ok(renamed) => renamed,
      Err(e) => return Err(self.reject(e).await),
    };
    if renamed.name != set.name && !self.persist(&renamed).await {
      return Ok(set.clone());
    }
    Ok(renamed)
  }

  /// Borra un Set. Borrar uno que ya no existe no es un error.
  pub async fn delete_set(&self, id: &SetId) -> Result<(), CoreError> {
    match self.repo.delete_set(id).await {
      Ok(()) => {
        info!(set_id = %id, "set deleted");
        Ok(())
      }
      Err(RepoError::NotFound) => {
        debug!(set_id = %id, "delete of unknown set ignored");
        Ok(())
      }
      Err(e) => {
        self.report_write_failure(id, &e).await;
        Err(e.into())
      }
    }
  }

  /// Aplica una edición y persiste el resultado.
  ///
  /// - Rechazo de validación: se notifica y se devuelve `CoreError::Rejected`.
  /// - No-op (id desconocido, entrada en el límite, Set borrado…): devuelve
  ///   el Set sin cambios y no escribe nada.
  /// - Éxito: escribe el Set completo y devuelve el nuevo valor aunque la
  ///   escritura falle.
  pub async fn apply(&self, set: &Setlist, edit: SetEdit) -> Result<Setlist, CoreError> {
    let result = match &edit {
      SetEdit::AddSong { song_id } => {
        // el duplicado se rechaza aunque la canción ya no esté en el catálogo
        if let Some(existing) = set.songs.iter().find(|s| &s.id == song_id) {
          editing::add_song(set, existing.clone())
        } else {
          let catalog = self.catalog.list_songs().await?;
          match catalog.into_iter().find(|s| &s.id == song_id) {
            Some(song) => editing::add_song(set, song),
            None => {
              debug!(set_id = %set.id, %song_id, "song not in catalog, nothing added");
              return Ok(set.clone());
            }
          }
        }
      }
      SetEdit::AddMedley { name } => {
        let catalog = self.catalog.list_songs().await?;
        match find_medley(&catalog, name) {
          Some(group) => editing::add_medley(set, &group.songs).map(|outcome| {
            if !outcome.skipped.is_empty() {
              debug!(medley = %name, skipped = outcome.skipped.len(), "medley songs already in set were skipped");
            }
            outcome.set
          }),
          None => {
            debug!(set_id = %set.id, medley = %name, "medley not in catalog, nothing added");
            return Ok(set.clone());
          }
        }
      }
      SetEdit::RemoveSong { song_id } => editing::remove_song(set, song_id),
      SetEdit::RemoveBlock { index } => editing::remove_block(set, *index),
      SetEdit::Move { index, direction } => editing::move_entry(set, *index, *direction),
    };

    match result {
      Ok(next) => {
        if !self.persist(&next).await {
          return Ok(set.clone());
        }
        debug!(set_id = %set.id, ?edit, songs = next.len(), "edit applied");
        Ok(next)
      }
      Err(e) if e.is_rejection() => Err(self.reject(e).await),
      Err(e) => {
        debug!(set_id = %set.id, ?edit, "edit had no effect: {e}");
        Ok(set.clone())
      }
    }
  }

  /// Refresca todos los Sets desde el catálogo y guarda los que cambiaron,
  /// uno a uno, esperando `interval` entre escrituras para no saturar el
  /// almacenamiento.
  ///
  /// Devuelve cuántos Sets se escribieron con éxito.
  pub async fn refresh_all_sets(&self, interval: Duration) -> Result<usize, CoreError> {
    let catalog = self.catalog.list_songs().await?;
    let sets = self.repo.list_sets().await?;

    let mut written = 0;
    let mut first = true;

    for set in sets {
      let refreshed = set.refreshed_from(&catalog);
      if refreshed == set {
        continue;
      }

      if !first {
        tokio::time::sleep(interval).await;
      }
      first = false;

      match self.repo.save_set(&refreshed).await {
        Ok(()) => written += 1,
        Err(RepoError::NotFound) => debug!(set_id = %refreshed.id, "set deleted during refresh, skipped"),
        Err(e) => self.report_write_failure(&refreshed.id, &e).await,
      }
    }

    info!(written, "set snapshots refreshed from catalog");
    Ok(written)
  }

  /// Guarda el Set completo. Devuelve `false` si el Set ya no existe (nada
  /// que escribir); un fallo de escritura se notifica y cuenta como guardado
  /// desde el punto de vista local.
  async fn persist(&self, set: &Setlist) -> bool {
    match self.repo.save_set(set).await {
      Ok(()) => true,
      Err(RepoError::NotFound) => {
        debug!(set_id = %set.id, "set no longer exists, edit dropped");
        false
      }
      Err(e) => {
        self.report_write_failure(&set.id, &e).await;
        true
      }
    }
  }

  async fn report_write_failure(&self, set_id: &SetId, err: &RepoError) {
    warn!(%set_id, "write failed: {err}");
    self.notifier.persist_failed(set_id, &err.to_string()).await;
  }

  async fn reject(&self, err: EditError) -> CoreError {
    self.notifier.rejected(&err.to_string()).await;
    CoreError::Rejected(err)
  }
}

use async_trait::async_trait;

use crate::domain::song::Song;
use crate::ports::RepoError;

/// Port de lectura del catálogo de canciones.
///
/// El catálogo vive fuera del motor (se edita en otras pantallas); aquí sólo
/// se lee una instantánea completa.
#[async_trait]
pub trait SongCatalog: Send + Sync {
  async fn list_songs(&self) -> Result<Vec<Song>, RepoError>;
}

use async_trait::async_trait;

use crate::domain::ids::SetId;
use crate::domain::setlist::Setlist;

#[derive(Debug, thiserror::Error)]
pub enum RepoError {
  #[error("entity not found")]
  NotFound,
  #[error("storage error: {0}")]
  Storage(String),
}

/// Port de persistencia de Sets.
///
/// `save_set` siempre recibe el Set completo (no hay parches parciales) y
/// sobrescribe lo que hubiera: la última escritura gana, sin control de
/// versiones. Sólo actualiza: si el Set no existe devuelve
/// [`RepoError::NotFound`] y no lo crea; `create_set` es la única inserción.
#[async_trait]
pub trait SetRepository: Send + Sync {
  async fn list_sets(&self) -> Result<Vec<Setlist>, RepoError>;
  async fn find_set(&self, id: &SetId) -> Result<Option<Setlist>, RepoError>;

  async fn create_set(&self, set: &Setlist) -> Result<(), RepoError>;
  async fn save_set(&self, set: &Setlist) -> Result<(), RepoError>;
  async fn delete_set(&self, id: &SetId) -> Result<(), RepoError>;
}

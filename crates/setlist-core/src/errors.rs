// crates/setlist-core/src/errors.rs
use thiserror::Error;

use crate::domain::editing::EditError;
use crate::ports::RepoError;

/// Error genérico del núcleo.
///
/// Las capas superiores (UI, CLI, etc.) deberían mapear este error a
/// mensajes de usuario o logs.
#[derive(Debug, Error)]
pub enum CoreError {
  /// Validación que el usuario debe ver (nombre vacío, canción duplicada…).
  #[error("{0}")]
  Rejected(EditError),

  #[error("repository error: {0}")]
  Repository(String),

  #[error("not found")]
  NotFound,
}

impl From<RepoError> for CoreError {
  fn from(err: RepoError) -> Self {
    match err {
      RepoError::NotFound => CoreError::NotFound,
      RepoError::Storage(msg) => CoreError::Repository(msg),
    }
  }
}

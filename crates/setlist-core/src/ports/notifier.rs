use async_trait::async_trait;
use tracing::{info, warn};

use crate::domain::ids::SetId;

// La UI implementará esto para mostrar avisos al usuario.
#[async_trait]
pub trait EditNotifier: Send + Sync {
  /// Una edición fue rechazada por validación; no hubo cambios.
  async fn rejected(&self, message: &str);
  /// La escritura falló. El estado local ya se actualizó y no se revierte.
  async fn persist_failed(&self, set_id: &SetId, error: &str);
}

/// Notificador que sólo deja constancia en el log.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogNotifier;

#[async_trait]
impl EditNotifier for LogNotifier {
  async fn rejected(&self, message: &str) {
    info!("edit rejected: {message}");
  }

  async fn persist_failed(&self, set_id: &SetId, error: &str) {
    warn!(%set_id, "set not saved, local copy diverges until reload: {error}");
  }
}

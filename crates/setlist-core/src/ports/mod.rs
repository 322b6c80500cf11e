pub mod catalog;
pub mod notifier;
pub mod set_repository;

pub use catalog::SongCatalog;
pub use notifier::{EditNotifier, LogNotifier};
pub use set_repository::{RepoError, SetRepository};

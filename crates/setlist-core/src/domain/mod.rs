pub mod analytics;
pub mod catalog;
pub mod duration;
pub mod editing;
pub mod ids;
pub mod instruments;
pub mod medley;
pub mod setlist;
pub mod song;

pub use editing::{Direction, EditError};
pub use ids::{BlockId, SetId, SongId};
pub use medley::{MedleyBlock, OrganizedEntry, flatten, organize_by_medleys};
pub use setlist::Setlist;
pub use song::{Language, Song, Vocalist};

use std::collections::BTreeSet;

use setlist_config::LogConfig;
use setlist_core::domain::analytics::compute_mix;
use setlist_core::domain::duration::format_minutes;
use setlist_core::domain::instruments::change_warnings;
use setlist_core::domain::{Direction, Language, OrganizedEntry, Song, Vocalist, organize_by_medleys};
use setlist_core::ports::LogNotifier;
use setlist_core::services::{SetEdit, SetService};
use setlist_storage::{SqliteSetStore, StorageConfig};
use tracing_subscriber::EnvFilter;

fn song(id: &str, title: &str, duration: &str, vocalist: Vocalist, guitar: &str, medley: Option<(&str, u32)>) -> Song {
  Song {
    id: id.into(),
    title: title.to_string(),
    artist: "Smoke Test".to_string(),
    key: "C".to_string(),
    duration: Some(duration.to_string()),
    language: if id.starts_with("dk") { Language::Danish } else { Language::English },
    vocalist,
    bass_guitar: "P-bass".to_string(),
    guitar: guitar.to_string(),
    backing_track: false,
    medley: medley.map(|(name, _)| name.to_string()),
    medley_position: medley.map(|(_, pos)| pos),
    tags: BTreeSet::new(),
    notes: String::new(),
  }
}

#[tokio::main]
async fn main() {
  let log = LogConfig::load().unwrap_or_default();
  tracing_subscriber::fmt()
    .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level)))
    .init();

  let cfg = StorageConfig::load().expect("failed to load [storage] config");
  let store = SqliteSetStore::from_config(&cfg).expect("failed to open database");

  let catalog = [
    song("en-1", "Opener", "3:45", Vocalist::Lorentz, "Tele", None),
    song("dk-1", "Sommer I", "2:10", Vocalist::Rikke, "Strat", Some(("Sommer", 1))),
    song("dk-2", "Sommer II", "2:40", Vocalist::Both, "Strat", Some(("Sommer", 2))),
    song("en-2", "Closer", "4:06", Vocalist::Rikke, "Tele", None),
  ];
  for s in &catalog {
    store.upsert_song(s).await.expect("failed to seed catalog");
  }

  let svc = SetService::new(store.clone(), store.clone(), LogNotifier);

  let mut set = svc.create_set("Smoke set", "smoke").await.expect("failed to create set");
  for edit in [
    SetEdit::AddSong { song_id: "en-1".into() },
    SetEdit::AddSong { song_id: "en-2".into() },
    SetEdit::AddMedley { name: "Sommer".into() },
    SetEdit::Move { index: 2, direction: Direction::Up },
    SetEdit::AddSong { song_id: "en-1".into() },
  ] {
    match svc.apply(&set, edit).await {
      Ok(next) => set = next,
      Err(e) => println!("rejected: {e}"),
    }
  }

  println!("Set \"{}\" ({}):", set.name, set.id);
  for (i, entry) in organize_by_medleys(&set.songs).iter().enumerate() {
    match entry {
      OrganizedEntry::Single { song } => println!("  {i}. {}", song.title),
      OrganizedEntry::Medley(block) => {
        let titles: Vec<&str> = block.songs.iter().map(|s| s.title.as_str()).collect();
        println!("  {i}. [{}] {}", block.name, titles.join(" / "));
      }
    }
  }

  let mix = compute_mix(&set.songs);
  println!(
    "Total {} | english {}% danish {}% | Rikke {}% Lorentz {}% (duets {}%)",
    format_minutes(mix.total_minutes),
    mix.language_share.english,
    mix.language_share.danish,
    mix.vocalist_share.rikke,
    mix.vocalist_share.lorentz,
    mix.vocalist_share.both,
  );

  for w in change_warnings(&set.songs) {
    println!("  change before #{}: {} -> {} {:?}", w.index, w.from, w.to, w.change);
  }

  let written = svc.refresh_all_sets(cfg.write_interval()).await.expect("failed to refresh sets");
  println!("Refreshed {written} set(s)");

  svc.delete_set(&set.id).await.expect("failed to delete smoke set");
}

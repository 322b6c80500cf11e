use std::fs;
use std::io::{self, Write};
use std::path::Path;

/// Escribe `contents` en un temporal junto a `path` y lo renombra encima, de
/// modo que un lector nunca vea el archivo a medio escribir.
pub fn atomic_write_str(path: &Path, contents: &str) -> io::Result<()> {
  let tmp_path = path.with_extension("tmp");

  {
    let mut tmp_file = fs::File::create(&tmp_path)?;
    tmp_file.write_all(contents.as_bytes())?;
    tmp_file.sync_all()?;
  }

  fs::rename(&tmp_path, path)?;
  Ok(())
}

#[cfg(test)]
mod tests {
  use super::*;
  use tempfile::tempdir;

  #[test]
  fn test_atomic_write_replaces_contents() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("setlist.toml");

    atomic_write_str(&path, "a = 1\n").unwrap();
    atomic_write_str(&path, "a = 2\n").unwrap();

    assert_eq!(fs::read_to_string(&path).unwrap(), "a = 2\n");
    assert!(!path.with_extension("tmp").exists());
  }
}

//! Document snapshot adapter.
//!
//! Maps an ordered block sequence to a JSON snapshot file and back. The
//! storage format is opaque to the engine; outer services that keep
//! documents elsewhere provide their own adapter and never touch this one.
//!
//! Writes follow the build-then-commit discipline: content goes to a temp
//! file that is synced and renamed into place, so a crash or failure never
//! leaves a partial document where a complete one used to be.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use crate::error::{RestructureError, Result};
use crate::types::Block;

/// Load a block sequence from a JSON snapshot file.
///
/// # Errors
/// [`RestructureError::Storage`] when the file cannot be opened,
/// [`RestructureError::Json`] when its content is not a valid snapshot.
pub fn load_document(path: &Path) -> Result<Vec<Block>> {
    let file = File::open(path).map_err(|source| RestructureError::Storage {
        path: path.to_path_buf(),
        source,
    })?;
    let blocks = serde_json::from_reader(BufReader::new(file))?;
    Ok(blocks)
}

/// Persist a block sequence as a JSON snapshot file.
///
/// # Errors
/// [`RestructureError::Json`] when serialization fails,
/// [`RestructureError::Storage`] when writing or renaming fails. On error
/// any previously stored file at `path` is left untouched.
pub fn save_document(blocks: &[Block], path: &Path) -> Result<()> {
    let content = serde_json::to_string_pretty(blocks)?;
    write_atomic(path, &content)
}

/// Write `content` to `path` atomically: temp file, sync, rename.
pub(crate) fn write_atomic(path: &Path, content: &str) -> Result<()> {
    let storage_err = |source: std::io::Error| RestructureError::Storage {
        path: path.to_path_buf(),
        source,
    };

    let file_name = path
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("document");
    let temp_path = path.with_file_name(format!(".{file_name}.tmp"));

    {
        let file = File::create(&temp_path).map_err(storage_err)?;
        let mut writer = BufWriter::new(file);
        writer.write_all(content.as_bytes()).map_err(storage_err)?;
        writer.flush().map_err(storage_err)?;
        // Ensure data is flushed to disk before the rename
        writer
            .into_inner()
            .map_err(|e| storage_err(e.into_error()))?
            .sync_all()
            .map_err(storage_err)?;
    }

    // On Windows, rename fails if the destination already exists
    #[cfg(target_os = "windows")]
    if path.exists() {
        fs::remove_file(path).map_err(storage_err)?;
    }

    fs::rename(&temp_path, path).map_err(storage_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::tempdir;

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");

        let blocks = vec![
            Block::paragraph("BAB I PENDAHULUAN"),
            Block::paragraph("1.1 Latar Belakang"),
        ];

        save_document(&blocks, &path).unwrap();
        let loaded = load_document(&path).unwrap();
        assert_eq!(loaded, blocks);
    }

    #[test]
    fn test_save_replaces_existing_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");

        save_document(&[Block::paragraph("old")], &path).unwrap();
        save_document(&[Block::paragraph("new")], &path).unwrap();

        let loaded = load_document(&path).unwrap();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].text(), "new");
    }

    #[test]
    fn test_no_temp_file_left_behind() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("doc.json");

        save_document(&[Block::paragraph("x")], &path).unwrap();

        let entries: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(entries, vec!["doc.json"]);
    }

    #[test]
    fn test_load_missing_file_is_storage_error() {
        let dir = tempdir().unwrap();
        let err = load_document(&dir.path().join("missing.json")).unwrap_err();
        assert!(matches!(err, RestructureError::Storage { .. }));
        assert!(err.to_string().contains("missing.json"));
    }

    #[test]
    fn test_load_invalid_json_is_serialization_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{not json").unwrap();

        let err = load_document(&path).unwrap_err();
        assert!(matches!(err, RestructureError::Json(_)));
    }
}

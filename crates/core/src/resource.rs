//! File-like resources: the I/O primitives every store is built on.
//!
//! Each persisted resource (context, logs, checklist, stores, vendor specs)
//! is an independently addressed file. Writes either append a block and sync
//! it, or replace the whole file through a temp-file-then-rename so a reader
//! never observes a truncated document.

use crate::error::StoreError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tracing::{debug, warn};

/// Read a resource, mapping "not found" to `None`.
pub async fn read_optional(path: &Path) -> Result<Option<String>, StoreError> {
    match tokio::fs::read_to_string(path).await {
        Ok(content) => Ok(Some(content)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(StoreError::io(path, e)),
    }
}

/// Read a resource that must exist.
pub async fn read_required(path: &Path) -> Result<String, StoreError> {
    read_optional(path).await?.ok_or_else(|| StoreError::Missing {
        path: path.to_path_buf(),
    })
}

/// Replace the resource's content atomically. On failure the temp file is
/// removed and the previous content is left in place.
pub async fn write_atomic(path: &Path, content: &str) -> Result<(), StoreError> {
    ensure_parent(path).await?;

    let tmp = temp_sibling(path);
    if let Err(e) = write_then_rename(&tmp, path, content).await {
        if let Err(cleanup) = tokio::fs::remove_file(&tmp).await {
            if cleanup.kind() != ErrorKind::NotFound {
                warn!(path = %tmp.display(), error = %cleanup, "Failed to remove temp file");
            }
        }
        return Err(e);
    }

    debug!(path = %path.display(), bytes = content.len(), "Resource written");
    Ok(())
}

async fn write_then_rename(tmp: &Path, path: &Path, content: &str) -> Result<(), StoreError> {
    let mut file = tokio::fs::File::create(tmp)
        .await
        .map_err(|e| StoreError::io(tmp, e))?;
    file.write_all(content.as_bytes())
        .await
        .map_err(|e| StoreError::io(tmp, e))?;
    file.sync_all().await.map_err(|e| StoreError::io(tmp, e))?;
    drop(file);

    tokio::fs::rename(tmp, path)
        .await
        .map_err(|e| StoreError::io(path, e))
}

/// Append a block to the end of the resource, creating it if needed.
/// Returns once the data has been synced to disk.
pub async fn append(path: &Path, block: &str) -> Result<(), StoreError> {
    ensure_parent(path).await?;

    let mut file = tokio::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .await
        .map_err(|e| StoreError::io(path, e))?;
    file.write_all(block.as_bytes())
        .await
        .map_err(|e| StoreError::io(path, e))?;
    file.sync_data().await.map_err(|e| StoreError::io(path, e))?;

    debug!(path = %path.display(), bytes = block.len(), "Resource appended");
    Ok(())
}

/// Load a YAML document. `Ok(None)` when the resource does not exist.
pub async fn load_yaml<T: DeserializeOwned>(path: &Path) -> Result<Option<T>, StoreError> {
    let Some(content) = read_optional(path).await? else {
        return Ok(None);
    };
    // An empty file is treated like a missing one.
    if content.trim().is_empty() {
        return Ok(None);
    }
    serde_yaml::from_str(&content)
        .map(Some)
        .map_err(|e| StoreError::corrupt(path, e))
}

/// Serialize a value as YAML and write it atomically.
pub async fn save_yaml<T: Serialize>(path: &Path, value: &T) -> Result<(), StoreError> {
    let content = serde_yaml::to_string(value).map_err(|e| StoreError::Io {
        path: path.to_path_buf(),
        reason: format!("Failed to serialize: {e}"),
    })?;
    write_atomic(path, &content).await
}

async fn ensure_parent(path: &Path) -> Result<(), StoreError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        tokio::fs::create_dir_all(parent)
            .await
            .map_err(|e| StoreError::io(parent, e))?;
    }
    Ok(())
}

fn temp_sibling(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "resource".into());
    path.with_file_name(format!(".{name}.tmp"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[tokio::test]
    async fn missing_resource_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("absent.md");
        assert!(read_optional(&path).await.unwrap().is_none());

        let err = read_required(&path).await.unwrap_err();
        assert!(err.is_missing());
    }

    #[tokio::test]
    async fn atomic_write_replaces_content_and_leaves_no_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("doc.yaml");

        write_atomic(&path, "first").await.unwrap();
        write_atomic(&path, "second").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "second");
        let leftovers: Vec<_> = std::fs::read_dir(path.parent().unwrap())
            .unwrap()
            .filter_map(|e| e.ok())
            .filter(|e| e.file_name().to_string_lossy().ends_with(".tmp"))
            .collect();
        assert!(leftovers.is_empty());
    }

    #[tokio::test]
    async fn failed_rename_removes_temp_file() {
        let dir = tempfile::tempdir().unwrap();
        // A non-empty directory where the file should go makes the rename fail.
        let path = dir.path().join("doc.yaml");
        std::fs::create_dir(&path).unwrap();
        std::fs::write(path.join("inside"), "keep").unwrap();

        assert!(write_atomic(&path, "content").await.is_err());

        assert!(!temp_sibling(&path).exists());
        assert_eq!(std::fs::read_to_string(path.join("inside")).unwrap(), "keep");
    }

    #[tokio::test]
    async fn append_accumulates_blocks() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.md");

        append(&path, "one\n").await.unwrap();
        append(&path, "two\n").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "one\ntwo\n");
    }

    #[tokio::test]
    async fn corrupt_yaml_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.yaml");
        std::fs::write(&path, "key: [unclosed").unwrap();

        let err = load_yaml::<BTreeMap<String, String>>(&path)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::Corrupt { .. }));
    }

    #[tokio::test]
    async fn yaml_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("map.yaml");
        let mut map = BTreeMap::new();
        map.insert("react".to_string(), "18.2".to_string());

        save_yaml(&path, &map).await.unwrap();
        let loaded: BTreeMap<String, String> = load_yaml(&path).await.unwrap().unwrap();
        assert_eq!(loaded, map);
    }
}

//! Recursive package copy and removal

use crate::error::{Error, Result};
use std::path::Path;
use tokio::fs;
use walkdir::WalkDir;

/// Copy a package source tree into the destination directory
///
/// Creates missing destination directories and silently overwrites existing
/// files (re-add semantics). Returns the number of files copied. Any I/O
/// failure aborts the copy; files written before the failure are left in
/// place.
pub async fn materialize(source: &Path, dest: &Path) -> Result<u64> {
    if !source.exists() {
        return Err(Error::SourceMissing(source.to_path_buf()));
    }

    fs::create_dir_all(dest)
        .await
        .map_err(|e| Error::io(format!("failed to create {}", dest.display()), e))?;

    let mut copied = 0u64;

    for entry in WalkDir::new(source) {
        let entry = entry.map_err(|e| {
            let io = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("walk error"));
            Error::io(format!("failed to read {}", source.display()), io)
        })?;

        let relative = entry
            .path()
            .strip_prefix(source)
            .expect("walkdir yields paths under its root");
        if relative.as_os_str().is_empty() {
            continue;
        }
        let target = dest.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)
                .await
                .map_err(|e| Error::io(format!("failed to create {}", target.display()), e))?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent).await.map_err(|e| {
                    Error::io(format!("failed to create {}", parent.display()), e)
                })?;
            }
            fs::copy(entry.path(), &target).await.map_err(|e| {
                Error::io(
                    format!(
                        "failed to copy {} to {}",
                        entry.path().display(),
                        target.display()
                    ),
                    e,
                )
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Delete a previously materialized package tree
///
/// Returns `Ok(false)` without touching anything when the destination does
/// not exist; removal of an absent package is informational, not an error.
pub async fn remove(dest: &Path) -> Result<bool> {
    if !dest.exists() {
        return Ok(false);
    }

    fs::remove_dir_all(dest)
        .await
        .map_err(|e| Error::io(format!("failed to remove {}", dest.display()), e))?;

    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn write(path: &PathBuf, content: &str) {
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content).unwrap();
    }

    #[tokio::test]
    async fn test_materialize_copies_tree() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src");
        let dest = dir.path().join("dest");
        write(&source.join("index.svelte"), "<h1>hi</h1>");
        write(&source.join("nested/helper.ts"), "export {};");

        let copied = materialize(&source, &dest).await.unwrap();

        assert_eq!(copied, 2);
        assert_eq!(
            std::fs::read_to_string(dest.join("index.svelte")).unwrap(),
            "<h1>hi</h1>"
        );
        assert!(dest.join("nested/helper.ts").exists());
    }

    #[tokio::test]
    async fn test_materialize_overwrites_existing() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("src");
        let dest = dir.path().join("dest");
        write(&source.join("index.svelte"), "new");
        write(&dest.join("index.svelte"), "old");

        materialize(&source, &dest).await.unwrap();

        assert_eq!(
            std::fs::read_to_string(dest.join("index.svelte")).unwrap(),
            "new"
        );
    }

    #[tokio::test]
    async fn test_materialize_missing_source() {
        let dir = tempfile::tempdir().unwrap();
        let err = materialize(&dir.path().join("nope"), &dir.path().join("dest"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::SourceMissing(_)));
    }

    #[tokio::test]
    async fn test_remove_existing_tree() {
        let dir = tempfile::tempdir().unwrap();
        let dest = dir.path().join("dest");
        write(&dest.join("nested/file.txt"), "x");

        assert!(remove(&dest).await.unwrap());
        assert!(!dest.exists());
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let dir = tempfile::tempdir().unwrap();
        assert!(!remove(&dir.path().join("missing")).await.unwrap());
    }
}

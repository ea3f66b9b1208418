//! Local filesystem lister backed by `tokio::fs`.

use std::fs::FileType;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tracing::debug;

use super::{DirEntry, DirectoryLister, EntryKind};
use crate::core::errors::{HelloworldError, Result};

/// Lists real directories.
///
/// Symbolic links are followed: a link to a directory is reported as a
/// directory and will be descended into. Broken links, sockets, FIFOs and
/// device nodes are left out of the listing. Names that are not valid UTF-8
/// are converted lossily.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsLister;

impl FsLister {
    /// Create a filesystem lister
    pub fn new() -> Self {
        Self
    }
}

fn classify(file_type: FileType) -> Option<EntryKind> {
    if file_type.is_dir() {
        Some(EntryKind::Directory)
    } else if file_type.is_file() {
        Some(EntryKind::File)
    } else {
        None
    }
}

#[async_trait]
impl DirectoryLister for FsLister {
    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        let mut reader = tokio::fs::read_dir(path)
            .await
            .map_err(|e| HelloworldError::listing(path, e))?;

        let mut entries = Vec::new();
        while let Some(entry) = reader
            .next_entry()
            .await
            .map_err(|e| HelloworldError::listing(path, e))?
        {
            let file_type = entry
                .file_type()
                .await
                .map_err(|e| HelloworldError::listing(path, e))?;

            let kind = if file_type.is_symlink() {
                match tokio::fs::metadata(entry.path()).await {
                    Ok(metadata) => classify(metadata.file_type()),
                    Err(err) => {
                        debug!(path = %entry.path().display(), error = %err, "skipping broken link");
                        None
                    }
                }
            } else {
                classify(file_type)
            };

            match kind {
                Some(kind) => entries.push(DirEntry {
                    name: entry.file_name().to_string_lossy().into_owned(),
                    kind,
                }),
                None => debug!(path = %entry.path().display(), "skipping special file"),
            }
        }

        Ok(entries)
    }

    async fn identity(&self, path: &Path) -> Result<Option<PathBuf>> {
        tokio::fs::canonicalize(path)
            .await
            .map(Some)
            .map_err(|e| HelloworldError::listing(path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn lists_files_and_directories() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("a.txt"), "a").unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let mut entries = FsLister.list_dir(dir.path()).await.unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![DirEntry::file("a.txt"), DirEntry::directory("sub")]
        );
    }

    #[tokio::test]
    async fn missing_directory_is_listing_failure() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("gone");

        let err = FsLister.list_dir(&missing).await.unwrap_err();
        match err {
            HelloworldError::Listing { path, source } => {
                assert_eq!(path, missing);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected listing failure, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn symlinks_are_followed_and_broken_ones_skipped() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("real")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("real"), dir.path().join("alias")).unwrap();
        std::os::unix::fs::symlink(dir.path().join("nothing"), dir.path().join("dangling")).unwrap();

        let mut entries = FsLister.list_dir(dir.path()).await.unwrap();
        entries.sort_by(|a, b| a.name.cmp(&b.name));
        assert_eq!(
            entries,
            vec![DirEntry::directory("alias"), DirEntry::directory("real")]
        );
    }

    #[tokio::test]
    async fn identity_is_canonical() {
        let dir = tempdir().unwrap();
        std::fs::create_dir(dir.path().join("sub")).unwrap();

        let via_dots = dir.path().join("sub").join("..").join("sub");
        let a = FsLister.identity(&via_dots).await.unwrap();
        let b = FsLister.identity(&dir.path().join("sub")).await.unwrap();
        assert_eq!(a, b);
    }
}

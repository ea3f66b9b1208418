//! Recursive file enumeration over a pluggable directory-listing capability.
//!
//! The enumerator asks a [`DirectoryLister`] for the immediate entries of a
//! directory, keeps the files, and descends into every subdirectory. All
//! subdirectories of one directory are listed concurrently and joined before
//! the directory's own result is returned (fan-out / fan-in).
//!
//! ```text
//! root ── list ──┬── files of root ───────────────────────────┐
//!                ├── sub_a ── list ── files of sub_a ... ─────┤ concat
//!                └── sub_b ── list ── files of sub_b ... ─────┘
//! ```
//!
//! A listing failure anywhere aborts the whole enumeration; no partial result
//! is returned. Without [`EnumerationOptions::detect_cycles`] a directory
//! graph containing a link back to an ancestor recurses forever.

mod fs;
pub mod memory;

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use futures::future::{self, BoxFuture, FutureExt};
use tokio::sync::{Semaphore, SemaphorePermit};
use tracing::{debug, warn};

use crate::core::errors::{HelloworldError, Result};

pub use fs::FsLister;
pub use memory::MemoryLister;

/// Kind of a directory entry as reported by the listing capability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EntryKind {
    /// A regular file
    File,
    /// A directory that can be listed in turn
    Directory,
}

/// One item of a directory listing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DirEntry {
    /// Entry name relative to the listed directory
    pub name: String,
    /// File or directory
    pub kind: EntryKind,
}

impl DirEntry {
    /// A file entry named `name`
    pub fn file(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::File,
        }
    }

    /// A directory entry named `name`
    pub fn directory(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: EntryKind::Directory,
        }
    }

    /// Whether the entry is a directory
    pub fn is_dir(&self) -> bool {
        self.kind == EntryKind::Directory
    }
}

/// Host capability that lists the immediate contents of a directory.
///
/// Implementations must report failures as [`HelloworldError::Listing`] so the
/// enumerator can surface them unchanged.
#[async_trait]
pub trait DirectoryLister: Send + Sync {
    /// List the entries of `path`.
    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>>;

    /// Canonical identity of the directory at `path`, used by the cycle guard.
    ///
    /// Listers that cannot tell two paths apart return `None`, which disables
    /// cycle detection for them.
    async fn identity(&self, _path: &Path) -> Result<Option<PathBuf>> {
        Ok(None)
    }
}

#[async_trait]
impl<L> DirectoryLister for Arc<L>
where
    L: DirectoryLister + ?Sized,
{
    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        (**self).list_dir(path).await
    }

    async fn identity(&self, path: &Path) -> Result<Option<PathBuf>> {
        (**self).identity(path).await
    }
}

/// Tuning knobs for [`Enumerator`].
///
/// The default is unbounded fan-out with no cycle guard.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnumerationOptions {
    /// Maximum number of lister calls in flight at once, counting both
    /// `list_dir` and the `identity` lookups made by the cycle guard
    pub max_concurrency: Option<usize>,
    /// Skip directories whose identity is already on the ancestor chain
    pub detect_cycles: bool,
}

impl EnumerationOptions {
    /// Limit the number of concurrent listings
    pub fn with_max_concurrency(mut self, limit: usize) -> Self {
        self.max_concurrency = Some(limit);
        self
    }

    /// Enable the ancestor cycle guard
    pub fn with_cycle_detection(mut self) -> Self {
        self.detect_cycles = true;
        self
    }
}

/// Enumerate every file under `dir`, descending into all subdirectories.
///
/// Files of a directory come before the files of its subdirectories. Any
/// listing failure is returned as-is and no partial result is produced.
pub async fn enumerate_files<L>(dir: &Path, lister: &L) -> Result<Vec<PathBuf>>
where
    L: DirectoryLister + ?Sized,
{
    Enumerator::new(lister, EnumerationOptions::default())
        .enumerate(dir)
        .await
}

/// Recursive enumerator with optional concurrency bound and cycle guard.
pub struct Enumerator<'a, L: ?Sized> {
    lister: &'a L,
    options: EnumerationOptions,
    permits: Option<Semaphore>,
}

impl<'a, L> Enumerator<'a, L>
where
    L: DirectoryLister + ?Sized,
{
    /// Create an enumerator borrowing `lister`.
    ///
    /// A `max_concurrency` of zero is treated as one.
    pub fn new(lister: &'a L, options: EnumerationOptions) -> Self {
        let permits = options
            .max_concurrency
            .map(|limit| Semaphore::new(limit.max(1)));
        Self {
            lister,
            options,
            permits,
        }
    }

    /// Options this enumerator was built with
    pub fn options(&self) -> EnumerationOptions {
        self.options
    }

    /// Enumerate every file reachable from `dir`.
    pub async fn enumerate(&self, dir: impl AsRef<Path>) -> Result<Vec<PathBuf>> {
        let root = dir.as_ref().to_path_buf();
        let files = self.walk(root.clone(), HashSet::new()).await?;
        debug!(root = %root.display(), files = files.len(), "enumeration finished");
        Ok(files)
    }

    fn walk<'b>(
        &'b self,
        dir: PathBuf,
        mut ancestors: HashSet<PathBuf>,
    ) -> BoxFuture<'b, Result<Vec<PathBuf>>> {
        async move {
            if self.options.detect_cycles {
                if let Some(identity) = self.identify(&dir).await? {
                    if !ancestors.insert(identity) {
                        warn!(dir = %dir.display(), "skipping directory that links back to an ancestor");
                        return Ok(Vec::new());
                    }
                }
            }

            let entries = self.list(&dir).await?;

            let mut files = Vec::new();
            let mut subdirs = Vec::new();
            for entry in entries {
                let path = dir.join(&entry.name);
                match entry.kind {
                    EntryKind::File => files.push(path),
                    EntryKind::Directory => subdirs.push(path),
                }
            }
            debug!(
                dir = %dir.display(),
                files = files.len(),
                subdirs = subdirs.len(),
                "listed directory"
            );

            let nested = future::try_join_all(
                subdirs
                    .into_iter()
                    .map(|subdir| self.walk(subdir, ancestors.clone())),
            )
            .await?;

            files.extend(nested.into_iter().flatten());
            Ok(files)
        }
        .boxed()
    }

    /// One listing call. Permits are held only for the duration of a single
    /// lister call so that the recursive join never waits on a permit held by
    /// an ancestor.
    async fn list(&self, dir: &Path) -> Result<Vec<DirEntry>> {
        let _permit = self.permit().await?;
        self.lister.list_dir(dir).await
    }

    async fn identify(&self, dir: &Path) -> Result<Option<PathBuf>> {
        let _permit = self.permit().await?;
        self.lister.identity(dir).await
    }

    async fn permit(&self) -> Result<Option<SemaphorePermit<'_>>> {
        match &self.permits {
            Some(permits) => permits
                .acquire()
                .await
                .map(Some)
                .map_err(|_| HelloworldError::internal("enumeration permits closed")),
            None => Ok(None),
        }
    }
}

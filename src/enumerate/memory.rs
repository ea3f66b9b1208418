//! In-memory directory tree implementing [`DirectoryLister`].
//!
//! Used to drive the enumerator deterministically: entries keep insertion
//! order, individual directories can be made to fail, directory links can be
//! created (including links back to an ancestor), and every listing call is
//! counted together with the peak number of calls in flight.

use std::collections::{HashMap, HashSet};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use super::{DirEntry, DirectoryLister};
use crate::core::errors::{HelloworldError, Result};

/// In-memory directory tree.
#[derive(Debug, Default)]
pub struct MemoryLister {
    dirs: HashMap<PathBuf, Vec<DirEntry>>,
    links: HashMap<PathBuf, PathBuf>,
    failures: HashSet<PathBuf>,
    latency: Option<Duration>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    peak_in_flight: AtomicUsize,
}

impl MemoryLister {
    /// An empty tree
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a directory (and its missing parents)
    pub fn with_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.ensure_dir(path.as_ref());
        self
    }

    /// Add a file (and its missing parent directories)
    pub fn with_file(mut self, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            self.ensure_dir(parent);
            self.push_entry(parent, DirEntry::file(name.to_string_lossy()));
        }
        self
    }

    /// Add a directory entry at `path` that resolves to `target`
    pub fn with_link(mut self, path: impl AsRef<Path>, target: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            self.ensure_dir(parent);
            self.push_entry(parent, DirEntry::directory(name.to_string_lossy()));
            self.links
                .insert(path.to_path_buf(), target.as_ref().to_path_buf());
        }
        self
    }

    /// Make every listing of `path` fail with a permission error
    pub fn fail_on(mut self, path: impl AsRef<Path>) -> Self {
        self.failures.insert(path.as_ref().to_path_buf());
        self
    }

    /// Delay every listing by `latency`
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = Some(latency);
        self
    }

    /// Number of `list_dir` calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Highest number of `list_dir` and `identity` calls that were running
    /// at once
    pub fn peak_in_flight(&self) -> usize {
        self.peak_in_flight.load(Ordering::SeqCst)
    }

    /// Mark one call as running, then wait out the configured latency.
    async fn enter(&self) {
        let running = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.peak_in_flight.fetch_max(running, Ordering::SeqCst);

        if let Some(latency) = self.latency {
            tokio::time::sleep(latency).await;
        }
    }

    fn ensure_dir(&mut self, path: &Path) {
        if path.as_os_str().is_empty() || self.dirs.contains_key(path) {
            return;
        }
        self.dirs.insert(path.to_path_buf(), Vec::new());

        if let (Some(parent), Some(name)) = (path.parent(), path.file_name()) {
            if !parent.as_os_str().is_empty() {
                self.ensure_dir(parent);
                self.push_entry(parent, DirEntry::directory(name.to_string_lossy()));
            }
        }
    }

    fn push_entry(&mut self, dir: &Path, entry: DirEntry) {
        let entries = self.dirs.entry(dir.to_path_buf()).or_default();
        if !entries.contains(&entry) {
            entries.push(entry);
        }
    }

    /// Follow links component by component.
    fn resolve(&self, path: &Path) -> PathBuf {
        let mut resolved = PathBuf::new();
        for component in path.components() {
            resolved.push(component);
            let mut hops = 0;
            while let Some(target) = self.links.get(&resolved) {
                resolved = target.clone();
                hops += 1;
                if hops > self.links.len() {
                    break;
                }
            }
        }
        resolved
    }
}

#[async_trait]
impl DirectoryLister for MemoryLister {
    async fn list_dir(&self, path: &Path) -> Result<Vec<DirEntry>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.enter().await;

        let result = if self.failures.contains(path) {
            Err(HelloworldError::listing(
                path,
                io::Error::new(io::ErrorKind::PermissionDenied, "permission denied"),
            ))
        } else {
            self.dirs.get(&self.resolve(path)).cloned().ok_or_else(|| {
                HelloworldError::listing(
                    path,
                    io::Error::new(io::ErrorKind::NotFound, "no such directory"),
                )
            })
        };

        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        result
    }

    async fn identity(&self, path: &Path) -> Result<Option<PathBuf>> {
        self.enter().await;
        let identity = self.resolve(path);
        self.in_flight.fetch_sub(1, Ordering::SeqCst);
        Ok(Some(identity))
    }
}

//! # helloworld-rs: editor commands over an explicit host model
//!
//! The command set of a small editor extension (word count, line count,
//! open-document switching, text replacement, recursive file listing, an
//! HTTP call, a webview panel and a tree view) written against an explicit
//! host model instead of ambient editor globals.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────────┐
//! │                 helloworld CLI (acts as host)              │
//! ├───────────────────────────────────────────────────────────┤
//! │  Commands          │  Host model        │  Core           │
//! │ • text / documents │ • HostContext      │ • Errors        │
//! │ • files / tree     │ • TextDocument     │ • Config        │
//! │ • http / panel     │ • HostUi           │                 │
//! ├───────────────────────────────────────────────────────────┤
//! │   Enumerator (fan-out / fan-in) over DirectoryLister       │
//! └───────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use helloworld_rs::enumerate::{enumerate_files, FsLister};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let files = enumerate_files(Path::new("./src"), &FsLister::new()).await?;
//!     println!("{} files", files.len());
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(unsafe_code)]
#![allow(clippy::module_name_repetitions)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Core errors and configuration
pub mod core {
    //! Error types and configuration.

    pub mod config;
    pub mod errors;
}

pub mod commands;
pub mod enumerate;
pub mod host;

// Re-export primary types for convenience
pub use commands::{dispatch, execute, CommandId, Services};
pub use core::config::HelloworldConfig;
pub use core::errors::{HelloworldError, Result, ResultExt};
pub use enumerate::{enumerate_files, DirEntry, DirectoryLister, EntryKind, Enumerator, FsLister};
pub use host::{HostContext, HostUi, TextDocument};

/// Library version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

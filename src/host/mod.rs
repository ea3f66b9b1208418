//! Explicit model of the host editor.
//!
//! Commands never reach for ambient editor state: the active document,
//! open documents and workspace folders arrive as a [`HostContext`], and all
//! user interaction goes through a [`HostUi`].

pub mod context;
pub mod document;
pub mod ui;

pub use context::HostContext;
pub use document::TextDocument;
pub use ui::{HostUi, RecordingUi, UiEvent};

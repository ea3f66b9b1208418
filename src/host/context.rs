//! Explicit editor state handed to every command.

use std::path::PathBuf;

use super::document::TextDocument;

/// Workspace folders, open documents and the active editor.
#[derive(Debug, Clone, Default)]
pub struct HostContext {
    workspace_folders: Vec<PathBuf>,
    documents: Vec<TextDocument>,
    active: Option<usize>,
}

impl HostContext {
    /// An empty host: no folders, no documents
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a workspace folder
    pub fn with_workspace_folder(mut self, folder: impl Into<PathBuf>) -> Self {
        self.workspace_folders.push(folder.into());
        self
    }

    /// Open a document; the first document opened becomes active
    pub fn with_document(mut self, document: TextDocument) -> Self {
        self.open_document(document);
        self
    }

    /// Workspace folders in the order they were added
    pub fn workspace_folders(&self) -> &[PathBuf] {
        &self.workspace_folders
    }

    /// All open documents
    pub fn documents(&self) -> &[TextDocument] {
        &self.documents
    }

    /// Open a document, or focus it if the same uri is already open.
    ///
    /// Returns the index of the document.
    pub fn open_document(&mut self, document: TextDocument) -> usize {
        if let Some(index) = self.documents.iter().position(|d| d.uri == document.uri) {
            return index;
        }
        self.documents.push(document);
        let index = self.documents.len() - 1;
        if self.active.is_none() {
            self.active = Some(index);
        }
        index
    }

    /// Make the document at `index` active; out-of-range indexes are ignored
    pub fn set_active(&mut self, index: usize) -> bool {
        if index < self.documents.len() {
            self.active = Some(index);
            true
        } else {
            false
        }
    }

    /// The document in the active editor
    pub fn active_document(&self) -> Option<&TextDocument> {
        self.active.and_then(|index| self.documents.get(index))
    }

    /// Mutable access to the document in the active editor
    pub fn active_document_mut(&mut self) -> Option<&mut TextDocument> {
        self.active.and_then(move |index| self.documents.get_mut(index))
    }
}

//! Text documents as the host editor exposes them.

use std::path::{Path, PathBuf};

use crate::core::errors::{Result, ResultExt};

/// An open text document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextDocument {
    /// Location of the document
    pub uri: PathBuf,
    /// Full document text
    text: String,
    /// Whether the text differs from what was loaded
    dirty: bool,
}

impl TextDocument {
    /// Create a document from in-memory text
    pub fn new(uri: impl Into<PathBuf>, text: impl Into<String>) -> Self {
        Self {
            uri: uri.into(),
            text: text.into(),
            dirty: false,
        }
    }

    /// Load a document from disk
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to open document {}", path.display()))?;
        Ok(Self::new(path, text))
    }

    /// Write the current text back to `uri`
    pub async fn save(&mut self) -> Result<()> {
        tokio::fs::write(&self.uri, &self.text)
            .await
            .with_context(|| format!("Failed to save document {}", self.uri.display()))?;
        self.dirty = false;
        Ok(())
    }

    /// The whole text
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the whole text
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.dirty = true;
    }

    /// Whether there are unsaved edits
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Number of lines; an empty document still has one line.
    pub fn line_count(&self) -> usize {
        self.text.matches('\n').count() + 1
    }

    /// Last path component, or the full uri when it has none
    pub fn file_name(&self) -> String {
        self.uri
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.uri.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn line_count_matches_editor_convention() {
        assert_eq!(TextDocument::new("a", "").line_count(), 1);
        assert_eq!(TextDocument::new("a", "one").line_count(), 1);
        assert_eq!(TextDocument::new("a", "a\nb\n").line_count(), 3);
        assert_eq!(TextDocument::new("a", "a\r\nb").line_count(), 2);
    }

    #[test]
    fn file_name_is_last_component() {
        let doc = TextDocument::new("/work/src/main.rs", "");
        assert_eq!(doc.file_name(), "main.rs");
    }

    #[tokio::test]
    async fn open_failure_names_the_document() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("absent.txt");

        let err = TextDocument::open(&missing).await.unwrap_err();

        assert!(matches!(err, crate::core::errors::HelloworldError::Io { .. }));
        assert!(err.to_string().contains("Failed to open document"));
        assert!(err.to_string().contains("absent.txt"));
    }

    #[tokio::test]
    async fn open_edit_save() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, "old").unwrap();

        let mut doc = TextDocument::open(&path).await.unwrap();
        assert!(!doc.is_dirty());
        doc.set_text("new");
        assert!(doc.is_dirty());
        doc.save().await.unwrap();

        assert!(!doc.is_dirty());
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
    }
}

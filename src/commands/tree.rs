//! Tree view over the workspace folders.

use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::files::NO_WORKSPACE_FOLDER;
use super::Services;
use crate::core::errors::Result;
use crate::enumerate::{DirectoryLister, EntryKind};
use crate::host::{HostContext, HostUi};

/// Title of the workspace tree view.
pub const TREE_VIEW_TITLE: &str = "Workspace Files";

/// Whether a tree node can be expanded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollapsibleState {
    /// Leaf node
    None,
    /// Expandable node, initially folded
    Collapsed,
}

/// One node of the tree view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeItem {
    /// Text shown for the node
    pub label: String,
    /// Path the node stands for
    pub path: PathBuf,
    /// File or directory
    pub kind: EntryKind,
    /// Expandability
    pub collapsible: CollapsibleState,
}

impl TreeItem {
    fn directory(label: String, path: PathBuf) -> Self {
        Self {
            label,
            path,
            kind: EntryKind::Directory,
            collapsible: CollapsibleState::Collapsed,
        }
    }

    fn file(label: String, path: PathBuf) -> Self {
        Self {
            label,
            path,
            kind: EntryKind::File,
            collapsible: CollapsibleState::None,
        }
    }
}

/// Lazily expanded tree of workspace folders, one listing per expansion.
pub struct FileTreeProvider<'a, L: ?Sized> {
    lister: &'a L,
    folders: Vec<PathBuf>,
}

impl<'a, L> FileTreeProvider<'a, L>
where
    L: DirectoryLister + ?Sized,
{
    /// Provider for `folders`
    pub fn new(lister: &'a L, folders: &[PathBuf]) -> Self {
        Self {
            lister,
            folders: folders.to_vec(),
        }
    }

    /// One collapsed node per workspace folder
    pub fn roots(&self) -> Vec<TreeItem> {
        self.folders
            .iter()
            .map(|folder| {
                let label = folder
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned())
                    .unwrap_or_else(|| folder.display().to_string());
                TreeItem::directory(label, folder.clone())
            })
            .collect()
    }

    /// Children of `item`: directories first, then files, each sorted by name.
    pub async fn children(&self, item: &TreeItem) -> Result<Vec<TreeItem>> {
        if item.kind == EntryKind::File {
            return Ok(Vec::new());
        }

        let mut entries = self.lister.list_dir(&item.path).await?;
        entries.sort_by(|a, b| b.is_dir().cmp(&a.is_dir()).then_with(|| a.name.cmp(&b.name)));

        Ok(entries
            .into_iter()
            .map(|entry| {
                let path = item.path.join(&entry.name);
                match entry.kind {
                    EntryKind::Directory => TreeItem::directory(entry.name, path),
                    EntryKind::File => TreeItem::file(entry.name, path),
                }
            })
            .collect())
    }

    /// Expand the tree depth-first down to `max_depth` levels below the
    /// roots and return one indented line per visible node.
    pub async fn render(&self, max_depth: usize) -> Result<Vec<String>> {
        let mut lines = Vec::new();
        let mut stack: Vec<(TreeItem, usize)> =
            self.roots().into_iter().rev().map(|item| (item, 0)).collect();

        while let Some((item, depth)) = stack.pop() {
            let suffix = if item.kind == EntryKind::Directory { "/" } else { "" };
            lines.push(format!("{}{}{}", "  ".repeat(depth), item.label, suffix));

            if item.collapsible == CollapsibleState::Collapsed && depth < max_depth {
                let children = self.children(&item).await?;
                stack.extend(children.into_iter().rev().map(|child| (child, depth + 1)));
            }
        }
        Ok(lines)
    }
}

/// `helloworld.showTree`
pub async fn show_tree_command(
    ctx: &HostContext,
    ui: &dyn HostUi,
    services: &Services,
) -> Result<Vec<String>> {
    if ctx.workspace_folders().is_empty() {
        ui.show_error_message(NO_WORKSPACE_FOLDER).await;
        return Ok(Vec::new());
    }

    let lister = services.lister();
    let provider = FileTreeProvider::new(Arc::as_ref(lister), ctx.workspace_folders());
    let lines = provider.render(services.config().tree.max_depth).await?;

    info!(nodes = lines.len(), "rendered tree view");
    ui.show_tree(TREE_VIEW_TITLE, &lines).await;
    Ok(lines)
}

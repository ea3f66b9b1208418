//! Recursive listing of workspace files.

use std::path::PathBuf;
use std::sync::Arc;

use futures::future;
use tracing::info;

use super::Services;
use crate::core::errors::Result;
use crate::enumerate::Enumerator;
use crate::host::{HostContext, HostUi, TextDocument};

/// Message shown when a command needs a workspace folder and there is none.
pub const NO_WORKSPACE_FOLDER: &str = "No workspace folder is open";

/// Enumerate every file of every workspace folder.
///
/// Folders are enumerated concurrently; results keep folder order. The first
/// listing failure aborts the whole call.
pub async fn list_workspace_files(ctx: &HostContext, services: &Services) -> Result<Vec<PathBuf>> {
    let lister = services.lister();
    let enumerator = Enumerator::new(Arc::as_ref(lister), services.config().enumeration.to_options());

    let per_folder = future::try_join_all(
        ctx.workspace_folders()
            .iter()
            .map(|folder| enumerator.enumerate(folder)),
    )
    .await?;

    Ok(per_folder.into_iter().flatten().collect())
}

/// `helloworld.listFiles`: list every workspace file and open the one picked.
pub async fn list_files_command(
    ctx: &mut HostContext,
    ui: &dyn HostUi,
    services: &Services,
) -> Result<()> {
    if ctx.workspace_folders().is_empty() {
        ui.show_error_message(NO_WORKSPACE_FOLDER).await;
        return Ok(());
    }

    let files = list_workspace_files(ctx, services).await?;
    info!(
        folders = ctx.workspace_folders().len(),
        files = files.len(),
        "listed workspace files"
    );
    ui.show_information_message(&format!("Found {} file(s)", files.len()))
        .await;
    if files.is_empty() {
        return Ok(());
    }

    let labels: Vec<String> = files.iter().map(|p| p.display().to_string()).collect();
    let Some(choice) = ui.show_quick_pick(&labels, "Select a file to open").await else {
        return Ok(());
    };

    if let Some(index) = labels.iter().position(|label| *label == choice) {
        let document = TextDocument::open(&files[index]).await?;
        let opened = ctx.open_document(document);
        ctx.set_active(opened);
        ui.show_information_message(&format!("Opened {choice}")).await;
    }
    Ok(())
}

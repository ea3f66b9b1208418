//! Listing and switching between open documents.

use tracing::info;

use crate::core::errors::Result;
use crate::host::{HostContext, HostUi};

/// Message shown when no documents are open.
pub const NO_DOCUMENTS_OPEN: &str = "No documents are open";

/// Labels offered in the quick pick, one per open document.
pub fn document_labels(ctx: &HostContext) -> Vec<String> {
    ctx.documents()
        .iter()
        .map(|document| document.uri.display().to_string())
        .collect()
}

/// `helloworld.listOpenDocuments`: pick an open document and make it active.
pub async fn list_open_documents_command(ctx: &mut HostContext, ui: &dyn HostUi) -> Result<()> {
    let labels = document_labels(ctx);
    if labels.is_empty() {
        ui.show_information_message(NO_DOCUMENTS_OPEN).await;
        return Ok(());
    }

    let Some(choice) = ui
        .show_quick_pick(&labels, "Select a document to focus")
        .await
    else {
        return Ok(());
    };

    if let Some(index) = labels.iter().position(|label| *label == choice) {
        ctx.set_active(index);
        let name = ctx.documents()[index].file_name();
        info!(document = %choice, "focused document");
        ui.show_information_message(&format!("Switched to {name}"))
            .await;
    }
    Ok(())
}

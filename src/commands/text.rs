//! Word count, line count and text replacement on the active document.

use tracing::info;

use crate::core::errors::{HelloworldError, Result};
use crate::host::{HostContext, HostUi};

/// Message shown when a command needs an active editor and there is none.
pub const NO_DOCUMENT_OPEN: &str = "No document is open";

fn is_word_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

/// Count maximal runs of `[A-Za-z0-9_]`.
pub fn count_words(text: &str) -> usize {
    let mut count = 0;
    let mut in_word = false;
    for c in text.chars() {
        if is_word_char(c) {
            if !in_word {
                count += 1;
            }
            in_word = true;
        } else {
            in_word = false;
        }
    }
    count
}

/// Outcome of [`replace_all`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Replacement {
    /// Text after replacement
    pub text: String,
    /// Number of occurrences replaced
    pub count: usize,
}

/// Replace every non-overlapping occurrence of `find`, scanning left to right.
pub fn replace_all(text: &str, find: &str, replacement: &str) -> Result<Replacement> {
    if find.is_empty() {
        return Err(HelloworldError::validation_field(
            "search text must not be empty",
            "find",
        ));
    }

    let count = text.matches(find).count();
    Ok(Replacement {
        text: text.replace(find, replacement),
        count,
    })
}

/// `helloworld.countWords`
pub async fn count_words_command(ctx: &HostContext, ui: &dyn HostUi) -> Result<()> {
    let Some(document) = ctx.active_document() else {
        ui.show_information_message(NO_DOCUMENT_OPEN).await;
        return Ok(());
    };

    let words = count_words(document.text());
    info!(document = %document.uri.display(), words, "counted words");
    ui.show_information_message(&format!("Word Count: {words}"))
        .await;
    Ok(())
}

/// `helloworld.countLines`
pub async fn count_lines_command(ctx: &HostContext, ui: &dyn HostUi) -> Result<()> {
    let Some(document) = ctx.active_document() else {
        ui.show_information_message(NO_DOCUMENT_OPEN).await;
        return Ok(());
    };

    let lines = document.line_count();
    info!(document = %document.uri.display(), lines, "counted lines");
    ui.show_information_message(&format!("Line Count: {lines}"))
        .await;
    Ok(())
}

/// `helloworld.replaceText`: ask for a search string and its replacement,
/// then replace every occurrence in the active document.
///
/// Dismissing either prompt cancels the command without touching the text.
pub async fn replace_text_command(ctx: &mut HostContext, ui: &dyn HostUi) -> Result<()> {
    if ctx.active_document().is_none() {
        ui.show_information_message(NO_DOCUMENT_OPEN).await;
        return Ok(());
    }

    let Some(find) = ui.show_input_box("Text to replace").await else {
        return Ok(());
    };
    if find.is_empty() {
        return Ok(());
    }
    let Some(replacement) = ui.show_input_box("Replace with").await else {
        return Ok(());
    };

    let Some(document) = ctx.active_document_mut() else {
        return Ok(());
    };
    let outcome = replace_all(document.text(), &find, &replacement)?;
    if outcome.count > 0 {
        document.set_text(outcome.text);
    }

    info!(document = %document.uri.display(), replaced = outcome.count, "replaced text");
    ui.show_information_message(&format!("Replaced {} occurrence(s)", outcome.count))
        .await;
    Ok(())
}

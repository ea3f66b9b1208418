//! Command execution for the `helloworld` binary.
//!
//! Subcommands either call the library directly and print plain results
//! (suitable for scripting), or, for `run`, go through the same dispatcher an
//! editor would use.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use owo_colors::OwoColorize;
use tracing::info;

use helloworld_rs::commands::files::list_workspace_files;
use helloworld_rs::commands::http::http_request_command;
use helloworld_rs::commands::panel::Panel;
use helloworld_rs::commands::text::{count_words, replace_all};
use helloworld_rs::commands::tree::FileTreeProvider;
use helloworld_rs::{execute, CommandId, HelloworldConfig, HostContext, Services, TextDocument};

use crate::cli::args::{
    DocumentArgs, HttpArgs, InitConfigArgs, ListDocumentsArgs, ListFilesArgs, PanelArgs,
    ReplaceArgs, RunArgs, TreeArgs, ValidateConfigArgs,
};
use crate::cli::config_layer::{build_layered_config, CliOverrides};
use crate::cli::console_ui::ConsoleUi;

async fn open_documents(files: &[PathBuf]) -> anyhow::Result<HostContext> {
    let mut ctx = HostContext::new();
    for file in files {
        ctx.open_document(TextDocument::open(file).await?);
    }
    Ok(ctx)
}

/// Print the word count of a document
pub async fn count_words_command(args: DocumentArgs) -> anyhow::Result<()> {
    let document = TextDocument::open(&args.file).await?;
    println!("Word Count: {}", count_words(document.text()));
    Ok(())
}

/// Print the line count of a document
pub async fn count_lines_command(args: DocumentArgs) -> anyhow::Result<()> {
    let document = TextDocument::open(&args.file).await?;
    println!("Line Count: {}", document.line_count());
    Ok(())
}

/// List open documents, marking the active one
pub async fn list_documents_command(args: ListDocumentsArgs) -> anyhow::Result<()> {
    let mut ctx = open_documents(&args.files).await?;
    let services = Services::new(HelloworldConfig::default())?;
    let ui = ConsoleUi::new(args.pick.into_iter().collect(), Vec::new());

    execute(CommandId::ListOpenDocuments.as_str(), &mut ctx, &ui, &services).await?;

    let active = ctx.active_document().map(|d| d.uri.clone());
    for document in ctx.documents() {
        let marker = if Some(&document.uri) == active.as_ref() { "*" } else { " " };
        println!("{} {}", marker, document.uri.display());
    }
    Ok(())
}

/// Replace text in a document, optionally saving it
pub async fn replace_command(args: ReplaceArgs) -> anyhow::Result<()> {
    let mut document = TextDocument::open(&args.file).await?;
    let outcome = replace_all(document.text(), &args.find, &args.replacement)?;

    if outcome.count > 0 {
        document.set_text(outcome.text);
    }
    if args.write && document.is_dirty() {
        document.save().await?;
        info!(file = %args.file.display(), "saved document");
    } else if !args.write {
        print!("{}", document.text());
    }
    eprintln!("Replaced {} occurrence(s)", outcome.count);
    Ok(())
}

/// Print every file below the given folders
pub async fn list_files_command(
    args: ListFilesArgs,
    config_path: Option<&Path>,
) -> anyhow::Result<()> {
    let config = build_layered_config(config_path, CliOverrides::from_enumeration(&args.enumeration))?;
    let services = Services::new(config)?;
    let ctx = args
        .folders
        .iter()
        .fold(HostContext::new(), |ctx, folder| ctx.with_workspace_folder(folder));

    let files = list_workspace_files(&ctx, &services).await?;
    info!(files = files.len(), "enumeration complete");

    if args.json {
        println!("{}", serde_json::to_string_pretty(&files)?);
    } else {
        for file in &files {
            println!("{}", file.display());
        }
    }
    Ok(())
}

/// Fetch a URL
pub async fn http_command(args: HttpArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let overrides = CliOverrides {
        http_url: args.url,
        ..CliOverrides::default()
    };
    let config = build_layered_config(config_path, overrides)?;
    let services = Services::new(config)?;

    let summary = http_request_command(&ConsoleUi::non_interactive(), &services).await?;
    if !summary.is_success() {
        eprintln!(
            "{} server answered with status {}",
            "warning:".yellow().bold(),
            summary.status
        );
    }
    Ok(())
}

/// Render the panel, or deliver one message and print the reply
pub async fn panel_command(args: PanelArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = build_layered_config(config_path, CliOverrides::default())?;
    let services = Services::new(config)?;
    let panel = Panel::new(&services)?;

    match args.message {
        Some(raw) => {
            let ctx = args
                .workspace
                .iter()
                .fold(HostContext::new(), |ctx, folder| ctx.with_workspace_folder(folder));
            let ui = ConsoleUi::non_interactive();
            if let Some(reply) = panel.handle_json(&raw, &ctx, &ui, &services).await {
                println!("{}", serde_json::to_string(&reply)?);
            }
        }
        None => {
            let html = panel.render_html()?;
            match args.html_out {
                Some(path) => {
                    tokio::fs::write(&path, html).await?;
                    println!("Panel written to {}", path.display());
                }
                None => println!("{html}"),
            }
        }
    }
    Ok(())
}

/// Print the workspace tree
pub async fn tree_command(args: TreeArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let overrides = CliOverrides {
        tree_max_depth: args.max_depth,
        ..CliOverrides::default()
    };
    let config = build_layered_config(config_path, overrides)?;
    let services = Services::new(config)?;

    let lister = services.lister();
    let provider = FileTreeProvider::new(Arc::as_ref(lister), &args.folders);
    for line in provider.render(services.config().tree.max_depth).await? {
        println!("{line}");
    }
    Ok(())
}

/// Run a command by id with a host built from the arguments
pub async fn run_command(args: RunArgs, config_path: Option<&Path>) -> anyhow::Result<()> {
    let config = build_layered_config(config_path, CliOverrides::from_enumeration(&args.enumeration))?;
    let services = Services::new(config)?;

    let mut ctx = open_documents(&args.files).await?;
    for folder in &args.workspace {
        ctx = ctx.with_workspace_folder(folder);
    }
    let ui = ConsoleUi::new(args.picks, args.inputs);

    execute(&args.id, &mut ctx, &ui, &services).await?;

    if args.write {
        if let Some(document) = ctx.active_document_mut() {
            if document.is_dirty() {
                document.save().await?;
                info!(file = %document.uri.display(), "saved document");
            }
        }
    }
    Ok(())
}

/// Print registered command ids
pub async fn list_commands() -> anyhow::Result<()> {
    for id in CommandId::ALL {
        println!("{:<32} {}", id.as_str().cyan(), id.title());
    }
    Ok(())
}

/// Print default configuration in YAML format
pub async fn print_default_config() -> anyhow::Result<()> {
    println!("{}", "# Default helloworld configuration".dimmed());
    println!("{}", "# Save this as .helloworld.yml and customize as needed".dimmed());
    println!();

    let yaml_output = serde_yaml::to_string(&HelloworldConfig::default())?;
    println!("{}", yaml_output);
    Ok(())
}

/// Initialize a configuration file with defaults
pub async fn init_config(args: InitConfigArgs) -> anyhow::Result<()> {
    if args.output.exists() && !args.force {
        return Err(anyhow::anyhow!(
            "Configuration file already exists: {}. Use --force to overwrite or choose a different name with --output",
            args.output.display()
        ));
    }

    HelloworldConfig::default().to_yaml_file(&args.output)?;
    println!(
        "{} {}",
        "✅ Configuration saved to:".bright_green().bold(),
        args.output.display().to_string().cyan()
    );
    Ok(())
}

/// Validate a configuration file and summarize it
pub async fn validate_config(args: ValidateConfigArgs) -> anyhow::Result<()> {
    let config = HelloworldConfig::from_yaml_file(&args.file)
        .map_err(|e| anyhow::anyhow!("Failed to load {}: {}", args.file.display(), e))?;
    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    println!("{}", "✅ Configuration is valid".bright_green().bold());
    let concurrency = config
        .enumeration
        .max_concurrency
        .map_or_else(|| "unbounded".to_string(), |limit| limit.to_string());
    println!("  enumeration.max_concurrency: {}", concurrency);
    println!("  enumeration.detect_cycles:   {}", config.enumeration.detect_cycles);
    println!("  http.url:                    {}", config.http.url);
    println!("  tree.max_depth:              {}", config.tree.max_depth);
    Ok(())
}

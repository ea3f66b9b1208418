//! helloworld CLI - editor extension commands from the terminal
//!
//! The binary stands in for the host editor: it opens documents, lists
//! workspace folders and answers prompts, then runs the same commands an
//! editor would.

use clap::Parser;

mod cli;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing/logging
    let log_level = if cli.verbose {
        tracing::Level::DEBUG
    } else {
        tracing::Level::INFO
    };

    tracing_subscriber::fmt()
        .with_max_level(log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let config_path = cli.config.as_deref();

    match cli.command {
        Commands::CountWords(args) => cli::count_words_command(args).await?,
        Commands::CountLines(args) => cli::count_lines_command(args).await?,
        Commands::ListDocuments(args) => cli::list_documents_command(args).await?,
        Commands::Replace(args) => cli::replace_command(args).await?,
        Commands::ListFiles(args) => cli::list_files_command(args, config_path).await?,
        Commands::Http(args) => cli::http_command(args, config_path).await?,
        Commands::Panel(args) => cli::panel_command(args, config_path).await?,
        Commands::Tree(args) => cli::tree_command(args, config_path).await?,
        Commands::Run(args) => cli::run_command(args, config_path).await?,
        Commands::ListCommands => cli::list_commands().await?,
        Commands::PrintDefaultConfig => cli::print_default_config().await?,
        Commands::InitConfig(args) => cli::init_config(args).await?,
        Commands::ValidateConfig(args) => cli::validate_config(args).await?,
    }

    Ok(())
}

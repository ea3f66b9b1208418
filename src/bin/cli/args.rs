//! CLI Argument Structures
//!
//! All command-line definitions for the `helloworld` binary. The binary plays
//! the part of the host editor: files given on the command line are the open
//! documents (the first one is active) and folders are workspace folders.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Editor commands from the terminal
#[derive(Parser)]
#[command(name = "helloworld")]
#[command(version = VERSION)]
#[command(about = "Editor commands from the terminal: counts, replacement, file listing, panels and trees")]
#[command(long_about = "
Run the commands of the helloworld editor extension against local files.

Common Usage:

  # Count words and lines of a document
  helloworld count-words README.md
  helloworld count-lines README.md

  # List every file below a folder
  helloworld list-files ./src --max-concurrency 8

  # Replace text in place
  helloworld replace notes.txt --find foo --with bar --write

  # Run any command by id, answering prompts up front
  helloworld run helloworld.replaceText --file notes.txt --input foo --input bar
")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging for debugging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file (defaults to .helloworld.yml when present)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Count the words of a document
    #[command(name = "count-words")]
    CountWords(DocumentArgs),

    /// Count the lines of a document
    #[command(name = "count-lines")]
    CountLines(DocumentArgs),

    /// List open documents and optionally focus one
    #[command(name = "list-documents")]
    ListDocuments(ListDocumentsArgs),

    /// Replace every occurrence of a string in a document
    Replace(ReplaceArgs),

    /// Recursively list every file below the given folders
    #[command(name = "list-files")]
    ListFiles(ListFilesArgs),

    /// Fetch a URL and report status and body preview
    Http(HttpArgs),

    /// Render the panel or feed it a message
    Panel(PanelArgs),

    /// Render the workspace tree view
    Tree(TreeArgs),

    /// Run a command by its id (e.g. helloworld.countWords)
    Run(RunArgs),

    /// List the registered command ids
    #[command(name = "list-commands")]
    ListCommands,

    /// Print default configuration in YAML format
    #[command(name = "print-default-config")]
    PrintDefaultConfig,

    /// Initialize a configuration file with defaults
    #[command(name = "init-config")]
    InitConfig(InitConfigArgs),

    /// Validate a configuration file
    #[command(name = "validate-config")]
    ValidateConfig(ValidateConfigArgs),
}

/// A single document
#[derive(Args)]
pub struct DocumentArgs {
    /// Document to open
    pub file: PathBuf,
}

#[derive(Args)]
pub struct ListDocumentsArgs {
    /// Documents to open; the first one starts active
    #[arg(required = true)]
    pub files: Vec<PathBuf>,

    /// Focus the document with this label instead of prompting
    #[arg(long)]
    pub pick: Option<String>,
}

#[derive(Args)]
pub struct ReplaceArgs {
    /// Document to edit
    pub file: PathBuf,

    /// Text to search for
    #[arg(long)]
    pub find: String,

    /// Replacement text
    #[arg(long = "with", default_value = "")]
    pub replacement: String,

    /// Save the edited document back to disk
    #[arg(long)]
    pub write: bool,
}

/// Enumeration tuning shared by commands that walk folders
#[derive(Args, Default)]
pub struct EnumerationArgs {
    /// Maximum number of directory listings in flight
    #[arg(long)]
    pub max_concurrency: Option<usize>,

    /// Skip directories that link back to an ancestor
    #[arg(long)]
    pub detect_cycles: bool,
}

#[derive(Args)]
pub struct ListFilesArgs {
    /// Workspace folders to enumerate
    #[arg(default_value = ".")]
    pub folders: Vec<PathBuf>,

    #[command(flatten)]
    pub enumeration: EnumerationArgs,

    /// Print the file list as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct HttpArgs {
    /// URL to fetch (defaults to the configured one)
    pub url: Option<String>,
}

#[derive(Args)]
pub struct PanelArgs {
    /// JSON message to deliver to the panel, e.g. '{"command":"ping"}'
    #[arg(long)]
    pub message: Option<String>,

    /// Workspace folders visible to the panel
    #[arg(long = "workspace")]
    pub workspace: Vec<PathBuf>,

    /// Write the rendered HTML here instead of stdout
    #[arg(long)]
    pub html_out: Option<PathBuf>,
}

#[derive(Args)]
pub struct TreeArgs {
    /// Workspace folders to show
    #[arg(default_value = ".")]
    pub folders: Vec<PathBuf>,

    /// Deepest level to expand
    #[arg(long)]
    pub max_depth: Option<usize>,
}

#[derive(Args)]
pub struct RunArgs {
    /// Command id
    pub id: String,

    /// Documents to open; the first one starts active
    #[arg(long = "file")]
    pub files: Vec<PathBuf>,

    /// Workspace folders
    #[arg(long = "workspace")]
    pub workspace: Vec<PathBuf>,

    /// Answers for quick picks, in order
    #[arg(long = "pick")]
    pub picks: Vec<String>,

    /// Answers for input boxes, in order
    #[arg(long = "input")]
    pub inputs: Vec<String>,

    /// Save edited documents back to disk
    #[arg(long)]
    pub write: bool,

    #[command(flatten)]
    pub enumeration: EnumerationArgs,
}

#[derive(Args)]
pub struct InitConfigArgs {
    /// Output configuration file name
    #[arg(short, long, default_value = ".helloworld.yml")]
    pub output: PathBuf,

    /// Overwrite existing configuration file
    #[arg(short, long)]
    pub force: bool,
}

#[derive(Args)]
pub struct ValidateConfigArgs {
    /// Configuration file to validate
    pub file: PathBuf,
}

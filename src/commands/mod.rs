//! Editor commands and their dispatcher.
//!
//! Each command is a short async function over an explicit [`HostContext`],
//! a [`HostUi`] and the shared [`Services`]. [`dispatch`] runs a command by
//! id and, when it fails, shows the error through the UI before returning it.

pub mod documents;
pub mod files;
pub mod http;
pub mod panel;
pub mod text;
pub mod tree;

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use tracing::{error, info};

use crate::core::config::HelloworldConfig;
use crate::core::errors::{HelloworldError, Result};
use crate::enumerate::{DirectoryLister, FsLister};
use crate::host::{HostContext, HostUi};

use self::http::{HttpFetcher, ReqwestFetcher};

/// Registered command ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CommandId {
    /// `helloworld.countWords`
    CountWords,
    /// `helloworld.countLines`
    CountLines,
    /// `helloworld.listOpenDocuments`
    ListOpenDocuments,
    /// `helloworld.replaceText`
    ReplaceText,
    /// `helloworld.listFiles`
    ListFiles,
    /// `helloworld.httpRequest`
    HttpRequest,
    /// `helloworld.showPanel`
    ShowPanel,
    /// `helloworld.showTree`
    ShowTree,
}

impl CommandId {
    /// Every command, in registration order
    pub const ALL: [CommandId; 8] = [
        CommandId::CountWords,
        CommandId::CountLines,
        CommandId::ListOpenDocuments,
        CommandId::ReplaceText,
        CommandId::ListFiles,
        CommandId::HttpRequest,
        CommandId::ShowPanel,
        CommandId::ShowTree,
    ];

    /// The command's string id
    pub const fn as_str(self) -> &'static str {
        match self {
            CommandId::CountWords => "helloworld.countWords",
            CommandId::CountLines => "helloworld.countLines",
            CommandId::ListOpenDocuments => "helloworld.listOpenDocuments",
            CommandId::ReplaceText => "helloworld.replaceText",
            CommandId::ListFiles => "helloworld.listFiles",
            CommandId::HttpRequest => "helloworld.httpRequest",
            CommandId::ShowPanel => "helloworld.showPanel",
            CommandId::ShowTree => "helloworld.showTree",
        }
    }

    /// Human-readable title
    pub const fn title(self) -> &'static str {
        match self {
            CommandId::CountWords => "Count Words",
            CommandId::CountLines => "Count Lines",
            CommandId::ListOpenDocuments => "List Open Documents",
            CommandId::ReplaceText => "Replace Text",
            CommandId::ListFiles => "List Workspace Files",
            CommandId::HttpRequest => "Make HTTP Request",
            CommandId::ShowPanel => "Show Panel",
            CommandId::ShowTree => "Show File Tree",
        }
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for CommandId {
    type Err = HelloworldError;

    fn from_str(s: &str) -> Result<Self> {
        CommandId::ALL
            .into_iter()
            .find(|id| id.as_str() == s)
            .ok_or_else(|| HelloworldError::unknown_command(s))
    }
}

/// Shared services commands draw on.
#[derive(Clone)]
pub struct Services {
    config: HelloworldConfig,
    lister: Arc<dyn DirectoryLister>,
    http: Arc<dyn HttpFetcher>,
}

impl Services {
    /// Real filesystem lister and HTTP client built from `config`
    pub fn new(config: HelloworldConfig) -> Result<Self> {
        let http = Arc::new(ReqwestFetcher::new(&config.http)?);
        Ok(Self {
            config,
            lister: Arc::new(FsLister::new()),
            http,
        })
    }

    /// Replace the directory-listing capability
    pub fn with_lister(mut self, lister: Arc<dyn DirectoryLister>) -> Self {
        self.lister = lister;
        self
    }

    /// Replace the HTTP fetcher
    pub fn with_http(mut self, http: Arc<dyn HttpFetcher>) -> Self {
        self.http = http;
        self
    }

    /// Active configuration
    pub fn config(&self) -> &HelloworldConfig {
        &self.config
    }

    /// Directory-listing capability
    pub fn lister(&self) -> &Arc<dyn DirectoryLister> {
        &self.lister
    }

    /// HTTP fetcher
    pub fn http(&self) -> &Arc<dyn HttpFetcher> {
        &self.http
    }
}

impl fmt::Debug for Services {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Services")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Run the command `id`.
///
/// Failures are shown with [`HostUi::show_error_message`] and then returned.
pub async fn dispatch(
    id: CommandId,
    ctx: &mut HostContext,
    ui: &dyn HostUi,
    services: &Services,
) -> Result<()> {
    info!(command = %id, "executing command");

    let result = match id {
        CommandId::CountWords => text::count_words_command(ctx, ui).await,
        CommandId::CountLines => text::count_lines_command(ctx, ui).await,
        CommandId::ListOpenDocuments => documents::list_open_documents_command(ctx, ui).await,
        CommandId::ReplaceText => text::replace_text_command(ctx, ui).await,
        CommandId::ListFiles => files::list_files_command(ctx, ui, services).await,
        CommandId::HttpRequest => http::http_request_command(ui, services).await.map(|_| ()),
        CommandId::ShowPanel => panel::show_panel_command(ui, services).await,
        CommandId::ShowTree => tree::show_tree_command(ctx, ui, services).await.map(|_| ()),
    };

    if let Err(err) = &result {
        error!(command = %id, error = %err, "command failed");
        ui.show_error_message(&err.to_string()).await;
    }
    result
}

/// Run a command by its string id.
pub async fn execute(
    id: &str,
    ctx: &mut HostContext,
    ui: &dyn HostUi,
    services: &Services,
) -> Result<()> {
    match id.parse::<CommandId>() {
        Ok(id) => dispatch(id, ctx, ui, services).await,
        Err(err) => {
            ui.show_error_message(&err.to_string()).await;
            Err(err)
        }
    }
}

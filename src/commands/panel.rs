//! The custom webview panel and its typed message protocol.
//!
//! The webview posts [`PanelMessage`]s tagged by `command`; the host answers
//! with [`HostMessage`]s tagged by `type`. Anything that does not parse is
//! answered with [`HostMessage::Error`] instead of being dropped.

use std::path::PathBuf;

use handlebars::Handlebars;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use super::files::{list_workspace_files, NO_WORKSPACE_FOLDER};
use super::text::count_words;
use super::Services;
use crate::core::errors::Result;
use crate::host::{HostContext, HostUi};

const PANEL_TEMPLATE_NAME: &str = "panel";

const PANEL_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8">
  <meta name="viewport" content="width=device-width, initial-scale=1.0">
  <title>{{title}}</title>
</head>
<body>
  <h1>{{title}}</h1>
  <textarea id="input" rows="6" cols="60"></textarea>
  <div class="actions">
{{#each commands}}
    <button data-command="{{this}}">{{this}}</button>
{{/each}}
  </div>
  <pre id="output"></pre>
  <script>
    const host = acquireVsCodeApi();
    document.querySelectorAll('button[data-command]').forEach((button) => {
      button.addEventListener('click', () => {
        const text = document.getElementById('input').value;
        host.postMessage({ command: button.dataset.command, text });
      });
    });
    window.addEventListener('message', (event) => {
      document.getElementById('output').textContent = JSON.stringify(event.data, null, 2);
    });
  </script>
</body>
</html>
"#;

/// Messages posted by the webview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "command", rename_all = "camelCase")]
pub enum PanelMessage {
    /// Show `text` as a notification
    Alert {
        /// Notification text
        text: String,
    },
    /// Count the words of `text`
    CountWords {
        /// Text to count
        text: String,
    },
    /// List the files of the first workspace folder
    ListFiles,
    /// Liveness check
    Ping,
}

impl PanelMessage {
    /// Command names accepted from the webview
    pub const COMMANDS: [&'static str; 4] = ["alert", "countWords", "listFiles", "ping"];
}

/// Messages posted back to the webview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum HostMessage {
    /// Result of [`PanelMessage::CountWords`]
    WordCount {
        /// Number of words
        count: usize,
    },
    /// Result of [`PanelMessage::ListFiles`]
    Files {
        /// Files found
        paths: Vec<PathBuf>,
    },
    /// Reply to [`PanelMessage::Ping`]
    Pong,
    /// The request could not be served
    Error {
        /// What went wrong
        message: String,
    },
}

/// Webview panel: renders its HTML and serves messages from the page.
pub struct Panel {
    title: String,
    handlebars: Handlebars<'static>,
}

impl Panel {
    /// Create a panel titled from the configuration
    pub fn new(services: &Services) -> Result<Self> {
        let mut handlebars = Handlebars::new();
        handlebars.register_template_string(PANEL_TEMPLATE_NAME, PANEL_TEMPLATE)?;
        Ok(Self {
            title: services.config().panel.title.clone(),
            handlebars,
        })
    }

    /// Panel title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Render the panel page
    pub fn render_html(&self) -> Result<String> {
        let data = json!({
            "title": self.title,
            "commands": PanelMessage::COMMANDS,
        });
        Ok(self.handlebars.render(PANEL_TEMPLATE_NAME, &data)?)
    }

    /// Serve one message. `None` means the message needs no reply.
    pub async fn handle(
        &self,
        message: PanelMessage,
        ctx: &HostContext,
        ui: &dyn HostUi,
        services: &Services,
    ) -> Option<HostMessage> {
        debug!(?message, "panel message");
        match message {
            PanelMessage::Alert { text } => {
                ui.show_information_message(&text).await;
                None
            }
            PanelMessage::CountWords { text } => Some(HostMessage::WordCount {
                count: count_words(&text),
            }),
            PanelMessage::ListFiles => {
                let Some(folder) = ctx.workspace_folders().first() else {
                    return Some(HostMessage::Error {
                        message: NO_WORKSPACE_FOLDER.to_string(),
                    });
                };
                let scoped = HostContext::new().with_workspace_folder(folder.clone());
                match list_workspace_files(&scoped, services).await {
                    Ok(paths) => Some(HostMessage::Files { paths }),
                    Err(err) => Some(HostMessage::Error {
                        message: err.to_string(),
                    }),
                }
            }
            PanelMessage::Ping => Some(HostMessage::Pong),
        }
    }

    /// Parse and serve a raw JSON message from the page.
    pub async fn handle_json(
        &self,
        raw: &str,
        ctx: &HostContext,
        ui: &dyn HostUi,
        services: &Services,
    ) -> Option<HostMessage> {
        match serde_json::from_str::<PanelMessage>(raw) {
            Ok(message) => self.handle(message, ctx, ui, services).await,
            Err(err) => {
                warn!(error = %err, "rejected panel message");
                Some(HostMessage::Error {
                    message: format!("invalid message: {err}"),
                })
            }
        }
    }
}

/// `helloworld.showPanel`
pub async fn show_panel_command(ui: &dyn HostUi, services: &Services) -> Result<()> {
    let panel = Panel::new(services)?;
    let html = panel.render_html()?;
    ui.show_panel(panel.title(), &html).await;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::core::config::HelloworldConfig;
    use crate::enumerate::MemoryLister;
    use crate::host::{RecordingUi, UiEvent};

    fn services() -> Services {
        Services::new(HelloworldConfig::default())
            .unwrap()
            .with_lister(Arc::new(
                MemoryLister::new()
                    .with_file("ws/a.txt")
                    .with_file("ws/src/b.rs"),
            ))
    }

    #[test]
    fn messages_use_tagged_json() {
        let message: PanelMessage =
            serde_json::from_str(r#"{"command":"countWords","text":"a b"}"#).unwrap();
        assert_eq!(message, PanelMessage::CountWords { text: "a b".into() });

        let reply = serde_json::to_value(HostMessage::WordCount { count: 2 }).unwrap();
        assert_eq!(reply, json!({"type": "wordCount", "count": 2}));

        let pong = serde_json::to_value(HostMessage::Pong).unwrap();
        assert_eq!(pong, json!({"type": "pong"}));
    }

    #[test]
    fn html_contains_title_and_buttons() {
        let panel = Panel::new(&services()).unwrap();
        let html = panel.render_html().unwrap();

        assert!(html.contains("<h1>Hello World Panel</h1>"));
        for command in PanelMessage::COMMANDS {
            assert!(html.contains(&format!("data-command=\"{command}\"")));
        }
    }

    #[test]
    fn title_is_html_escaped() {
        let mut config = HelloworldConfig::default();
        config.panel.title = "<b>x</b>".to_string();
        let services = Services::new(config).unwrap();

        let html = Panel::new(&services).unwrap().render_html().unwrap();
        assert!(html.contains("&lt;b&gt;x&lt;/b&gt;"));
    }

    #[tokio::test]
    async fn count_words_round_trip() {
        let services = services();
        let panel = Panel::new(&services).unwrap();
        let ui = RecordingUi::new();

        let reply = panel
            .handle_json(
                r#"{"command":"countWords","text":"one two three"}"#,
                &HostContext::new(),
                &ui,
                &services,
            )
            .await;
        assert_eq!(reply, Some(HostMessage::WordCount { count: 3 }));
    }

    #[tokio::test]
    async fn alert_shows_notification_without_reply() {
        let services = services();
        let panel = Panel::new(&services).unwrap();
        let ui = RecordingUi::new();

        let reply = panel
            .handle(
                PanelMessage::Alert { text: "hey".into() },
                &HostContext::new(),
                &ui,
                &services,
            )
            .await;
        assert!(reply.is_none());
        assert_eq!(ui.events(), vec![UiEvent::Information("hey".into())]);
    }

    #[tokio::test]
    async fn list_files_uses_first_workspace_folder() {
        let services = services();
        let panel = Panel::new(&services).unwrap();
        let ctx = HostContext::new().with_workspace_folder("ws");

        let reply = panel
            .handle(PanelMessage::ListFiles, &ctx, &RecordingUi::new(), &services)
            .await;
        assert_eq!(
            reply,
            Some(HostMessage::Files {
                paths: vec![PathBuf::from("ws/a.txt"), PathBuf::from("ws/src/b.rs")]
            })
        );
    }

    #[tokio::test]
    async fn list_files_without_workspace_replies_error() {
        let services = services();
        let panel = Panel::new(&services).unwrap();

        let reply = panel
            .handle(
                PanelMessage::ListFiles,
                &HostContext::new(),
                &RecordingUi::new(),
                &services,
            )
            .await;
        assert_eq!(
            reply,
            Some(HostMessage::Error {
                message: NO_WORKSPACE_FOLDER.to_string()
            })
        );
    }

    #[tokio::test]
    async fn malformed_json_replies_error() {
        let services = services();
        let panel = Panel::new(&services).unwrap();

        for raw in ["not json", r#"{"command":"explode"}"#, r#"{"text":"x"}"#] {
            let reply = panel
                .handle_json(raw, &HostContext::new(), &RecordingUi::new(), &services)
                .await;
            assert!(matches!(reply, Some(HostMessage::Error { .. })), "{raw}");
        }
    }

    #[tokio::test]
    async fn show_panel_hands_html_to_ui() {
        let services = services();
        let ui = RecordingUi::new();

        show_panel_command(&ui, &services).await.unwrap();
        assert!(matches!(
            &ui.events()[0],
            UiEvent::Panel { title, html } if title == "Hello World Panel" && html.contains("<html")
        ));
    }
}

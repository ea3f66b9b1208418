//! User-facing host services: messages, quick picks, input boxes, panels and
//! tree views.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

/// UI surface of the host editor.
#[async_trait]
pub trait HostUi: Send + Sync {
    /// Show an informational notification
    async fn show_information_message(&self, message: &str);

    /// Show an error notification
    async fn show_error_message(&self, message: &str);

    /// Let the user pick one of `items`; `None` when dismissed
    async fn show_quick_pick(&self, items: &[String], placeholder: &str) -> Option<String>;

    /// Ask the user for a line of text; `None` when dismissed
    async fn show_input_box(&self, prompt: &str) -> Option<String>;

    /// Reveal a webview panel with the given HTML
    async fn show_panel(&self, title: &str, html: &str);

    /// Reveal a tree view, one pre-rendered line per visible node
    async fn show_tree(&self, title: &str, lines: &[String]);
}

/// Everything a [`RecordingUi`] was asked to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    /// `show_information_message`
    Information(String),
    /// `show_error_message`
    Error(String),
    /// `show_quick_pick`
    QuickPick {
        /// Offered items
        items: Vec<String>,
        /// Placeholder text
        placeholder: String,
    },
    /// `show_input_box`
    InputBox {
        /// Prompt text
        prompt: String,
    },
    /// `show_panel`
    Panel {
        /// Panel title
        title: String,
        /// Rendered HTML
        html: String,
    },
    /// `show_tree`
    Tree {
        /// View title
        title: String,
        /// Rendered lines
        lines: Vec<String>,
    },
}

/// Scripted UI that records every call.
///
/// Quick-pick and input-box answers are consumed in order; once a queue is
/// empty the prompt behaves as if the user dismissed it.
#[derive(Debug, Default)]
pub struct RecordingUi {
    events: Mutex<Vec<UiEvent>>,
    picks: Mutex<VecDeque<Option<String>>>,
    inputs: Mutex<VecDeque<Option<String>>>,
}

impl RecordingUi {
    /// A UI with no scripted answers
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the answer to the next quick pick
    pub fn with_pick(self, answer: Option<&str>) -> Self {
        self.picks.lock().push_back(answer.map(str::to_string));
        self
    }

    /// Queue the answer to the next input box
    pub fn with_input(self, answer: Option<&str>) -> Self {
        self.inputs.lock().push_back(answer.map(str::to_string));
        self
    }

    /// Snapshot of the recorded events
    pub fn events(&self) -> Vec<UiEvent> {
        self.events.lock().clone()
    }

    /// Information messages only
    pub fn information_messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                UiEvent::Information(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    /// Error messages only
    pub fn error_messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .filter_map(|event| match event {
                UiEvent::Error(message) => Some(message.clone()),
                _ => None,
            })
            .collect()
    }

    fn record(&self, event: UiEvent) {
        self.events.lock().push(event);
    }
}

#[async_trait]
impl HostUi for RecordingUi {
    async fn show_information_message(&self, message: &str) {
        self.record(UiEvent::Information(message.to_string()));
    }

    async fn show_error_message(&self, message: &str) {
        self.record(UiEvent::Error(message.to_string()));
    }

    async fn show_quick_pick(&self, items: &[String], placeholder: &str) -> Option<String> {
        self.record(UiEvent::QuickPick {
            items: items.to_vec(),
            placeholder: placeholder.to_string(),
        });
        self.picks.lock().pop_front().flatten()
    }

    async fn show_input_box(&self, prompt: &str) -> Option<String> {
        self.record(UiEvent::InputBox {
            prompt: prompt.to_string(),
        });
        self.inputs.lock().pop_front().flatten()
    }

    async fn show_panel(&self, title: &str, html: &str) {
        self.record(UiEvent::Panel {
            title: title.to_string(),
            html: html.to_string(),
        });
    }

    async fn show_tree(&self, title: &str, lines: &[String]) {
        self.record(UiEvent::Tree {
            title: title.to_string(),
            lines: lines.to_vec(),
        });
    }
}

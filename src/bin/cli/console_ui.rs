//! Terminal implementation of the host UI.
//!
//! Notifications go to stdout. Quick picks and input boxes are answered from
//! values given on the command line first; once those run out, an interactive
//! terminal gets a `dialoguer` prompt and anything else counts as dismissed.

use std::collections::VecDeque;

use async_trait::async_trait;
use console::Term;
use dialoguer::{theme::ColorfulTheme, Input, Select};
use owo_colors::OwoColorize;
use parking_lot::Mutex;

use helloworld_rs::HostUi;

pub struct ConsoleUi {
    picks: Mutex<VecDeque<String>>,
    inputs: Mutex<VecDeque<String>>,
    interactive: bool,
}

impl ConsoleUi {
    pub fn new(picks: Vec<String>, inputs: Vec<String>) -> Self {
        Self {
            picks: Mutex::new(picks.into()),
            inputs: Mutex::new(inputs.into()),
            interactive: Term::stdout().is_term() && Term::stderr().is_term(),
        }
    }

    /// A UI that never prompts
    pub fn non_interactive() -> Self {
        Self {
            picks: Mutex::new(VecDeque::new()),
            inputs: Mutex::new(VecDeque::new()),
            interactive: false,
        }
    }
}

#[async_trait]
impl HostUi for ConsoleUi {
    async fn show_information_message(&self, message: &str) {
        println!("{} {}", "ℹ".bright_blue().bold(), message);
    }

    async fn show_error_message(&self, message: &str) {
        eprintln!("{} {}", "✖".bright_red().bold(), message);
    }

    async fn show_quick_pick(&self, items: &[String], placeholder: &str) -> Option<String> {
        let scripted = self.picks.lock().pop_front();
        if scripted.is_some() {
            return scripted;
        }
        if !self.interactive || items.is_empty() {
            return None;
        }

        let items = items.to_vec();
        let placeholder = placeholder.to_string();
        tokio::task::spawn_blocking(move || {
            Select::with_theme(&ColorfulTheme::default())
                .with_prompt(placeholder)
                .items(&items)
                .default(0)
                .interact_opt()
                .ok()
                .flatten()
                .map(|index| items[index].clone())
        })
        .await
        .ok()
        .flatten()
    }

    async fn show_input_box(&self, prompt: &str) -> Option<String> {
        let scripted = self.inputs.lock().pop_front();
        if scripted.is_some() {
            return scripted;
        }
        if !self.interactive {
            return None;
        }

        let prompt = prompt.to_string();
        tokio::task::spawn_blocking(move || {
            Input::<String>::with_theme(&ColorfulTheme::default())
                .with_prompt(prompt)
                .allow_empty(true)
                .interact_text()
                .ok()
        })
        .await
        .ok()
        .flatten()
    }

    async fn show_panel(&self, title: &str, html: &str) {
        println!("{} {}", "▣".bright_cyan().bold(), title.bold());
        println!("{html}");
    }

    async fn show_tree(&self, title: &str, lines: &[String]) {
        println!("{}", title.bold().underline());
        for line in lines {
            println!("{line}");
        }
    }
}

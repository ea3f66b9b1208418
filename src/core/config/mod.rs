//! Configuration types and management for helloworld-rs.
//!
//! Configuration is plain serde data loaded from YAML. Every section has
//! defaults so a partial file (or no file at all) is valid.

pub mod validation;

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::core::errors::{Result, ResultExt};
use crate::enumerate::EnumerationOptions;

pub use validation::{
    validate_bounded_usize, validate_http_url, validate_non_empty, validate_positive_u64,
    validate_positive_usize,
};

/// Main configuration for the helloworld commands
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct HelloworldConfig {
    /// Recursive file enumeration settings
    #[serde(default)]
    pub enumeration: EnumerationConfig,

    /// HTTP request command settings
    #[serde(default)]
    pub http: HttpConfig,

    /// Custom panel settings
    #[serde(default)]
    pub panel: PanelConfig,

    /// Tree view settings
    #[serde(default)]
    pub tree: TreeConfig,
}

/// Configuration construction and I/O methods for [`HelloworldConfig`].
impl HelloworldConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;

        serde_yaml::from_str(&content)
            .with_context(|| format!("Invalid configuration in {}", path.display()))
    }

    /// Save configuration to a YAML file
    pub fn to_yaml_file(&self, path: impl Into<PathBuf>) -> Result<()> {
        let path = path.into();
        let content = serde_yaml::to_string(self)?;
        std::fs::write(&path, content)
            .with_context(|| format!("Failed to write config file {}", path.display()))
    }

    /// Validate every section
    pub fn validate(&self) -> Result<()> {
        self.enumeration.validate()?;
        self.http.validate()?;
        self.panel.validate()?;
        self.tree.validate()?;
        Ok(())
    }
}

/// Recursive file enumeration configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct EnumerationConfig {
    /// Maximum number of directory listings in flight; `None` is unbounded
    #[serde(default)]
    pub max_concurrency: Option<usize>,

    /// Skip directories that link back to one of their ancestors
    #[serde(default)]
    pub detect_cycles: bool,
}

impl EnumerationConfig {
    /// Validate enumeration settings
    pub fn validate(&self) -> Result<()> {
        if let Some(limit) = self.max_concurrency {
            validate_positive_usize(limit, "enumeration.max_concurrency")?;
        }
        Ok(())
    }

    /// Options understood by [`crate::enumerate::Enumerator`]
    pub fn to_options(&self) -> EnumerationOptions {
        EnumerationOptions {
            max_concurrency: self.max_concurrency,
            detect_cycles: self.detect_cycles,
        }
    }
}

/// HTTP request command configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HttpConfig {
    /// URL requested by the HTTP command
    #[serde(default = "HttpConfig::default_url")]
    pub url: String,

    /// Request timeout
    #[serde(default = "HttpConfig::default_timeout_seconds")]
    pub timeout_seconds: u64,

    /// User agent sent with the request
    #[serde(default = "HttpConfig::default_user_agent")]
    pub user_agent: String,

    /// Number of body characters shown in the result message
    #[serde(default = "HttpConfig::default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            url: Self::default_url(),
            timeout_seconds: Self::default_timeout_seconds(),
            user_agent: Self::default_user_agent(),
            preview_chars: Self::default_preview_chars(),
        }
    }
}

/// Default value providers for [`HttpConfig`].
impl HttpConfig {
    fn default_url() -> String {
        "https://jsonplaceholder.typicode.com/todos/1".to_string()
    }

    const fn default_timeout_seconds() -> u64 {
        10
    }

    fn default_user_agent() -> String {
        format!("helloworld/{}", env!("CARGO_PKG_VERSION"))
    }

    const fn default_preview_chars() -> usize {
        200
    }

    /// Validate HTTP settings
    pub fn validate(&self) -> Result<()> {
        validate_http_url(&self.url, "http.url")?;
        validate_positive_u64(self.timeout_seconds, "http.timeout_seconds")?;
        validate_non_empty(&self.user_agent, "http.user_agent")?;
        Ok(())
    }
}

/// Custom panel configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PanelConfig {
    /// Title shown in the panel tab and heading
    #[serde(default = "PanelConfig::default_title")]
    pub title: String,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            title: Self::default_title(),
        }
    }
}

impl PanelConfig {
    fn default_title() -> String {
        "Hello World Panel".to_string()
    }

    /// Validate panel settings
    pub fn validate(&self) -> Result<()> {
        validate_non_empty(&self.title, "panel.title")
    }
}

/// Tree view configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TreeConfig {
    /// Deepest level expanded when the tree is rendered
    #[serde(default = "TreeConfig::default_max_depth")]
    pub max_depth: usize,
}

impl Default for TreeConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::default_max_depth(),
        }
    }
}

impl TreeConfig {
    const fn default_max_depth() -> usize {
        3
    }

    /// Validate tree settings
    pub fn validate(&self) -> Result<()> {
        validate_bounded_usize(self.max_depth, 1, 64, "tree.max_depth")
    }
}

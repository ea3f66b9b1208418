//! Configuration Layer Management
//!
//! Defaults, then the YAML file (explicit `--config` or an implicit
//! `.helloworld.yml` / `.helloworld.yaml`), then CLI overrides. The merged
//! result is validated before any command runs.

use std::path::{Path, PathBuf};

use helloworld_rs::HelloworldConfig;

use crate::cli::args::EnumerationArgs;

/// Trait for merging configuration layers
pub trait ConfigMerge<T> {
    /// Merge another layer into this one, with the other taking priority
    fn merge_with(&mut self, other: T);
}

/// Values set on the command line; `None` leaves the lower layer alone.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub max_concurrency: Option<usize>,
    pub detect_cycles: Option<bool>,
    pub http_url: Option<String>,
    pub tree_max_depth: Option<usize>,
}

impl CliOverrides {
    /// Overrides carried by the shared enumeration flags
    pub fn from_enumeration(args: &EnumerationArgs) -> Self {
        Self {
            max_concurrency: args.max_concurrency,
            detect_cycles: args.detect_cycles.then_some(true),
            ..Self::default()
        }
    }
}

impl ConfigMerge<CliOverrides> for HelloworldConfig {
    fn merge_with(&mut self, other: CliOverrides) {
        if let Some(limit) = other.max_concurrency {
            self.enumeration.max_concurrency = Some(limit);
        }
        if let Some(detect) = other.detect_cycles {
            self.enumeration.detect_cycles = detect;
        }
        if let Some(url) = other.http_url {
            self.http.url = url;
        }
        if let Some(depth) = other.tree_max_depth {
            self.tree.max_depth = depth;
        }
    }
}

fn implicit_config_path() -> Option<PathBuf> {
    [".helloworld.yml", ".helloworld.yaml"]
        .iter()
        .map(PathBuf::from)
        .find(|p| p.exists())
}

/// Build the effective configuration.
pub fn build_layered_config(
    explicit: Option<&Path>,
    overrides: CliOverrides,
) -> anyhow::Result<HelloworldConfig> {
    let mut config = HelloworldConfig::default();

    let implicit = if explicit.is_none() {
        implicit_config_path()
    } else {
        None
    };

    if let Some(path) = explicit.or(implicit.as_deref()) {
        config = HelloworldConfig::from_yaml_file(path).map_err(|e| {
            anyhow::anyhow!("Failed to load configuration from {}: {}", path.display(), e)
        })?;
        tracing::debug!(path = %path.display(), "loaded configuration file");
    }

    config.merge_with(overrides);

    config
        .validate()
        .map_err(|e| anyhow::anyhow!("Configuration validation failed: {}", e))?;

    Ok(config)
}

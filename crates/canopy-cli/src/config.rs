//! Configuration and token persistence for the canopy CLI.
//!
//! Settings live in `<config-dir>/canopy/config.toml`; the bearer token and
//! its expiry live next to them in `token.toml`. The token record is the
//! only state that survives between runs — staged edits never do.

use std::path::{Path, PathBuf};

use anyhow::Context;
use canopy_explorer::{ExplorerConfig, DEFAULT_BRANCH};
use canopy_remote::TokenRecord;
use serde::{Deserialize, Serialize};

/// CLI settings, mirroring the explorer's host parameters plus the
/// instance base URL.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL of the GitLab instance.
    pub base_url: String,
    /// OAuth application identifier.
    pub app_id: String,
    /// OAuth redirect target.
    pub redirect_url: String,
    /// Remote project identifier: numeric id or namespaced path.
    pub repository_path: String,
    /// Root of the browsed subtree.
    pub root_path: String,
    /// Branch commits are submitted to.
    pub branch: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            base_url: "https://gitlab.com".to_string(),
            app_id: String::new(),
            redirect_url: String::new(),
            repository_path: String::new(),
            root_path: String::new(),
            branch: DEFAULT_BRANCH.to_string(),
        }
    }
}

impl CliConfig {
    /// The explorer-facing slice of this configuration.
    pub fn explorer_config(&self) -> ExplorerConfig {
        ExplorerConfig {
            app_id: self.app_id.clone(),
            redirect_url: self.redirect_url.clone(),
            repository_path: self.repository_path.clone(),
            root_path: self.root_path.clone(),
            branch: self.branch.clone(),
        }
    }
}

/// `<config-dir>/canopy/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("canopy").join("config.toml"))
}

/// `<config-dir>/canopy/token.toml`.
pub fn token_path() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join("canopy").join("token.toml"))
}

/// Load CLI settings. A missing file yields the defaults.
pub fn load(path: Option<&Path>) -> anyhow::Result<CliConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) => p,
            None => return Ok(CliConfig::default()),
        },
    };
    if !path.exists() {
        return Ok(CliConfig::default());
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    toml::from_str(&contents).with_context(|| format!("invalid config at {}", path.display()))
}

/// Persist a token record, creating the config directory if needed.
/// Returns the path written.
pub fn save_token(record: &TokenRecord, path: Option<&Path>) -> anyhow::Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => token_path().context("could not determine config directory")?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display()))?;
    }
    let contents = toml::to_string_pretty(record).context("failed to encode token record")?;
    std::fs::write(&path, contents)
        .with_context(|| format!("failed to write {}", path.display()))?;
    Ok(path)
}

/// Load the persisted token record, if one exists.
pub fn load_token(path: Option<&Path>) -> anyhow::Result<Option<TokenRecord>> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match token_path() {
            Some(p) => p,
            None => return Ok(None),
        },
    };
    if !path.exists() {
        return Ok(None);
    }
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let record =
        toml::from_str(&contents).with_context(|| format!("invalid token at {}", path.display()))?;
    Ok(Some(record))
}

//! Engine configuration loaded from `edutrack.toml`.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::registry::{DEFAULT_TOPIC, DEFAULT_TOPIC_PREFIX};
use crate::roster::MAX_STUDENT_NAME_LENGTH;

/// Top-level edutrack configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdutrackConfig {
    /// Topics a new class starts with.
    #[serde(default = "default_initial_topics")]
    pub initial_topics: Vec<String>,
    /// Prefix for generated topic names ("Topic" gives "Topic 2", ...).
    #[serde(default = "default_topic_prefix")]
    pub topic_prefix: String,
    /// Longest accepted student name, in characters.
    #[serde(default = "default_max_name_length")]
    pub max_student_name_length: usize,
    /// Reject renaming a topic to the empty string.
    #[serde(default)]
    pub reject_empty_topic_names: bool,
    /// Default tracing filter level.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_initial_topics() -> Vec<String> {
    vec![DEFAULT_TOPIC.to_string()]
}
fn default_topic_prefix() -> String {
    DEFAULT_TOPIC_PREFIX.to_string()
}
fn default_max_name_length() -> usize {
    MAX_STUDENT_NAME_LENGTH
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Default for EdutrackConfig {
    fn default() -> Self {
        Self {
            initial_topics: default_initial_topics(),
            topic_prefix: default_topic_prefix(),
            max_student_name_length: default_max_name_length(),
            reject_empty_topic_names: false,
            log_level: default_log_level(),
        }
    }
}

impl EdutrackConfig {
    /// Parse a config from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: EdutrackConfig = toml::from_str(content).context("failed to parse config")?;
        config.check()?;
        Ok(config)
    }

    fn check(&self) -> Result<()> {
        if self.initial_topics.is_empty() {
            anyhow::bail!("initial_topics must name at least one topic");
        }
        if self.max_student_name_length == 0 {
            anyhow::bail!("max_student_name_length must be at least 1");
        }
        Ok(())
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `edutrack.toml` in the current directory
/// 2. `~/.config/edutrack/config.toml`
///
/// Environment variable override: `EDUTRACK_MAX_NAME_LENGTH`.
pub fn load_config() -> Result<EdutrackConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<EdutrackConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("edutrack.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|dir| dir.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            EdutrackConfig::from_toml_str(&content)
                .with_context(|| format!("invalid config: {}", path.display()))?
        }
        None => EdutrackConfig::default(),
    };

    if let Ok(raw) = std::env::var("EDUTRACK_MAX_NAME_LENGTH") {
        config.max_student_name_length = raw
            .trim()
            .parse()
            .with_context(|| format!("EDUTRACK_MAX_NAME_LENGTH is not a number: {raw}"))?;
        config.check()?;
    }

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("edutrack"))
}

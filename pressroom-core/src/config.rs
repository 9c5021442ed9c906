//! Configuration parsing and management.

use crate::repository::DEFAULT_RECENT_COUNT;
use crate::source::{BundledSource, ContentSource, DirectorySource, DEFAULT_EXTENSION};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the pressroom.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default = "default_recent_count")]
    pub recent_count: usize,

    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub contact: Option<ContactConfig>,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,

    // Internal: content directory given on the command line
    #[serde(skip)]
    content_override: Option<PathBuf>,
}

fn default_recent_count() -> usize {
    DEFAULT_RECENT_COUNT
}

impl Default for Config {
    fn default() -> Self {
        Self {
            content: ContentConfig::default(),
            recent_count: default_recent_count(),
            server: ServerConfig::default(),
            contact: None,
            config_path: None,
            content_override: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// Directory of article documents; bundled articles when absent
    #[serde(default)]
    pub dir: Option<PathBuf>,

    #[serde(default = "default_extension")]
    pub extension: String,

    #[serde(default)]
    pub ignore_patterns: Vec<String>,
}

fn default_extension() -> String {
    DEFAULT_EXTENSION.to_string()
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
            ignore_patterns: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_port")]
    pub port: u16,
}

fn default_port() -> u16 {
    8000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: default_port(),
        }
    }
}

/// Identifiers for the transactional email service behind the contact form
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactConfig {
    pub service_id: String,
    pub template_id: String,
    pub public_key: String,
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = serde_yaml::from_str(&contents)?;

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Load the file when it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::debug!("No config at {:?}, using defaults", path);
            Ok(Self::default())
        }
    }

    /// Read articles from `dir` instead of the configured location.
    /// The path is used as given, not resolved against the config file.
    pub fn override_content_dir(&mut self, dir: impl Into<PathBuf>) {
        self.content_override = Some(dir.into());
    }

    /// Content directory resolved relative to the config file
    pub fn content_dir(&self) -> Option<PathBuf> {
        if let Some(dir) = &self.content_override {
            return Some(dir.clone());
        }
        self.content.dir.as_ref().map(|p| self.resolve_path(p))
    }

    /// Build the content source this configuration describes
    pub fn content_source(&self) -> Box<dyn ContentSource> {
        match self.content_dir() {
            Some(dir) => Box::new(
                DirectorySource::new(dir)
                    .with_extension(&self.content.extension)
                    .with_ignore_patterns(&self.content.ignore_patterns),
            ),
            None => Box::new(BundledSource::new().with_extension(&self.content.extension)),
        }
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(parent) = self.config_path.as_ref().and_then(|p| p.parent()) {
            parent.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

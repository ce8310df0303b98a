//! Runtime configuration loaded from TOML.
//!
//! ```toml
//! [server]
//! bind = "0.0.0.0"
//! port = 8000
//!
//! [nlp]
//! lexicon_path = "lexicon.toml"
//!
//! [limits]
//! max_nodes = 5
//!
//! [[categories]]
//! name = "Skills"
//! keywords = ["python", "java"]
//! ```
//!
//! Every field is optional. `[[categories]]`, when present, replaces the
//! built-in table entirely.

use std::path::{Path, PathBuf};

use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::hierarchy::{CategoryTable, HierarchyExtractor, Limits};

/// Environment variable overriding `server.bind`.
pub const BIND_ENV: &str = "MINDMAPIFY_BIND";
/// Environment variable overriding `server.port`.
pub const PORT_ENV: &str = "MINDMAPIFY_PORT";

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("failed to read config: {path}")]
    #[diagnostic(
        code(mindmapify::config::read),
        help("Check that the config file exists and is readable.")
    )]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write config: {path}")]
    #[diagnostic(
        code(mindmapify::config::write),
        help("Check that the target directory is writable.")
    )]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {path}: {message}")]
    #[diagnostic(
        code(mindmapify::config::parse),
        help("The config file must be valid TOML. Run `mindmapify config` to print a working example.")
    )]
    Parse { path: String, message: String },

    #[error("invalid config value for {field}: {message}")]
    #[diagnostic(
        code(mindmapify::config::invalid),
        help("Fix the value in the config file or the corresponding environment variable.")
    )]
    Invalid { field: String, message: String },
}

pub type ConfigResult<T> = std::result::Result<T, ConfigError>;

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind")]
    pub bind: String,
    #[serde(default = "default_port")]
    pub port: u16,
    /// Request body limit, covering PDF uploads.
    #[serde(default = "default_max_upload_bytes")]
    pub max_upload_bytes: usize,
}

fn default_bind() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8000
}
fn default_max_upload_bytes() -> usize {
    16 * 1024 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
            port: default_port(),
            max_upload_bytes: default_max_upload_bytes(),
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}

/// Language model settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NlpConfig {
    /// Supplementary lexicon TOML. When set and present, the large model tier
    /// is loaded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lexicon_path: Option<PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MindMapConfig {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub nlp: NlpConfig,
    #[serde(default)]
    pub limits: Limits,
    #[serde(default)]
    pub categories: CategoryTable,
}

impl MindMapConfig {
    /// Load from a TOML file and validate it.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        let config = Self::from_toml(&content).map_err(|e| match e {
            ConfigError::Parse { message, .. } => ConfigError::Parse {
                path: path.display().to_string(),
                message,
            },
            other => other,
        })?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate TOML text.
    pub fn from_toml(content: &str) -> ConfigResult<Self> {
        let config: Self = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: "(inline)".into(),
            message: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load `path` if given, otherwise defaults.
    pub fn load_or_default(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Save to a TOML file, creating parent directories.
    pub fn save(&self, path: &Path) -> ConfigResult<()> {
        let content = self.to_toml()?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| ConfigError::Write {
                path: parent.display().to_string(),
                source: e,
            })?;
        }
        std::fs::write(path, content).map_err(|e| ConfigError::Write {
            path: path.display().to_string(),
            source: e,
        })
    }

    pub fn to_toml(&self) -> ConfigResult<String> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse {
            path: "(serialize)".into(),
            message: e.to_string(),
        })
    }

    /// Reject values that would make every extraction empty.
    pub fn validate(&self) -> ConfigResult<()> {
        let limits = [
            ("limits.max_nodes", self.limits.max_nodes),
            ("limits.max_children", self.limits.max_children),
            ("limits.max_grandchildren", self.limits.max_grandchildren),
        ];
        for (field, value) in limits {
            if value == 0 {
                return Err(ConfigError::Invalid {
                    field: field.into(),
                    message: "must be at least 1".into(),
                });
            }
        }
        if self.server.max_upload_bytes == 0 {
            return Err(ConfigError::Invalid {
                field: "server.max_upload_bytes".into(),
                message: "must be at least 1".into(),
            });
        }
        for (i, category) in self.categories.iter().enumerate() {
            if category.name.trim().is_empty() {
                return Err(ConfigError::Invalid {
                    field: format!("categories[{i}].name"),
                    message: "must not be empty".into(),
                });
            }
            if category.keywords.iter().any(|k| k.is_empty()) {
                return Err(ConfigError::Invalid {
                    field: format!("categories[{i}].keywords"),
                    message: "an empty keyword would match every parent".into(),
                });
            }
        }
        Ok(())
    }

    /// Override the listener from `MINDMAPIFY_BIND` / `MINDMAPIFY_PORT`.
    pub fn apply_env(&mut self) -> ConfigResult<()> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// [`apply_env`](Self::apply_env) with an explicit variable lookup.
    pub fn apply_env_from(&mut self, lookup: impl Fn(&str) -> Option<String>) -> ConfigResult<()> {
        if let Some(bind) = lookup(BIND_ENV) {
            self.server.bind = bind;
        }
        if let Some(port) = lookup(PORT_ENV) {
            self.server.port = port.trim().parse().map_err(|_| ConfigError::Invalid {
                field: PORT_ENV.into(),
                message: format!("\"{port}\" is not a port number"),
            })?;
        }
        Ok(())
    }

    /// Hierarchy extractor for this category table and limits.
    pub fn extractor(&self) -> HierarchyExtractor {
        HierarchyExtractor::new(self.categories.clone(), self.limits)
    }
}

//! Configuration management for autocommit
//!
//! Supports feature-specific configuration sections:
//! - [filter] - which changed files are picked up
//! - [publish] - where commits are pushed
//! - [log] - logging verbosity and optional log file

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Current configuration version
pub const CURRENT_CONFIG_VERSION: &str = "1";

/// Supported configuration versions
pub const SUPPORTED_CONFIG_VERSIONS: &[&str] = &["1"];

/// File name of the per-repository config
pub const REPO_CONFIG_FILE: &str = ".autocommit.toml";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Root configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Configuration version for tracking schema changes
    #[serde(default = "default_config_version")]
    pub version: String,

    #[serde(default)]
    pub filter: Option<FilterConfig>,

    #[serde(default)]
    pub publish: Option<PublishConfig>,

    #[serde(default)]
    pub log: Option<LogConfig>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: default_config_version(),
            filter: None,
            publish: None,
            log: None,
        }
    }
}

/// Which changed files get committed
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterConfig {
    /// Suffix a path must end with, including the dot
    #[serde(default = "default_extension")]
    pub extension: String,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            extension: default_extension(),
        }
    }
}

/// Push target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PublishConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    #[serde(default = "default_branch")]
    pub branch: String,
}

impl Default for PublishConfig {
    fn default() -> Self {
        Self {
            remote: default_remote(),
            branch: default_branch(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogConfig {
    /// Level directive, e.g. "warn" or "autocommit_git=debug"
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Also write logs to this file when set
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            file: None,
        }
    }
}

fn default_config_version() -> String {
    CURRENT_CONFIG_VERSION.to_string()
}

fn default_extension() -> String {
    ".py".to_string()
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_branch() -> String {
    "main".to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Config {
    /// Check if the configuration version is supported
    pub fn is_version_supported(&self) -> bool {
        SUPPORTED_CONFIG_VERSIONS.contains(&self.version.as_str())
    }

    /// Get a warning message for unsupported versions
    pub fn version_warning(&self) -> Option<String> {
        if self.is_version_supported() {
            return None;
        }
        Some(format!(
            "Warning: Configuration version '{}' is not supported. Supported versions: {}. Using defaults where needed.",
            self.version,
            SUPPORTED_CONFIG_VERSIONS.join(", ")
        ))
    }

    /// Load configuration from file
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let mut config: Config = toml::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        // Logging is not up yet while config is being read
        if let Some(warning) = config.version_warning() {
            eprintln!("{}", warning);
        }

        if config.version.is_empty() {
            config.version = CURRENT_CONFIG_VERSION.to_string();
        }

        Ok(config)
    }

    /// Get the default config directory path
    pub fn get_config_dir() -> Option<PathBuf> {
        dirs::home_dir().map(|h| h.join(".config").join("autocommit"))
    }

    /// Load configuration with priority:
    /// 1. Defaults
    /// 2. Global config (~/.config/autocommit/config.toml)
    /// 3. Repo config (.autocommit.toml in `repo_dir`)
    ///
    /// Files that exist but cannot be loaded are reported and skipped.
    pub fn load(repo_dir: &Path) -> Self {
        let global = Self::get_config_dir().map(|dir| dir.join("config.toml"));
        Self::load_layers(global.as_deref(), repo_dir)
    }

    fn load_layers(global: Option<&Path>, repo_dir: &Path) -> Self {
        let mut config = Self::default();

        let repo_config = repo_dir.join(REPO_CONFIG_FILE);
        for path in global.into_iter().chain(std::iter::once(repo_config.as_path())) {
            if !path.exists() {
                continue;
            }
            match Self::load_from_file(path) {
                Ok(loaded) => config = config.merge(loaded),
                Err(e) => eprintln!("Warning: {}", e),
            }
        }

        config
    }

    /// Merge another config into this one (other takes precedence)
    pub fn merge(mut self, other: Config) -> Self {
        if !other.version.is_empty() {
            self.version = other.version;
        }
        if other.filter.is_some() {
            self.filter = other.filter;
        }
        if other.publish.is_some() {
            self.publish = other.publish;
        }
        if other.log.is_some() {
            self.log = other.log;
        }
        self
    }

    pub fn filter(&self) -> FilterConfig {
        self.filter.clone().unwrap_or_default()
    }

    pub fn publish(&self) -> PublishConfig {
        self.publish.clone().unwrap_or_default()
    }

    pub fn log(&self) -> LogConfig {
        self.log.clone().unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.version, "1");
        assert!(config.filter.is_none());
        assert!(config.publish.is_none());
        assert!(config.log.is_none());

        assert_eq!(config.filter().extension, ".py");
        assert_eq!(config.publish().remote, "origin");
        assert_eq!(config.publish().branch, "main");
        assert_eq!(config.log().level, "warn");
        assert!(config.log().file.is_none());
    }

    #[test]
    fn test_config_version_validation() {
        let config = Config::default();
        assert!(config.is_version_supported());
        assert!(config.version_warning().is_none());

        let unsupported_config = Config {
            version: "999".to_string(),
            ..Config::default()
        };
        assert!(!unsupported_config.is_version_supported());
        assert!(unsupported_config.version_warning().is_some());
    }

    #[test]
    fn test_parse_config_with_sections() {
        let toml_str = r#"
version = "1"

[filter]
extension = ".rs"

[publish]
branch = "develop"

[log]
level = "debug"
file = "/tmp/autocommit.log"
"#;

        let config: Config = toml::from_str(toml_str).unwrap();
        assert!(config.is_version_supported());
        assert_eq!(config.filter().extension, ".rs");

        // Missing fields inside a present section fall back to defaults
        let publish = config.publish();
        assert_eq!(publish.remote, "origin");
        assert_eq!(publish.branch, "develop");

        let log = config.log();
        assert_eq!(log.level, "debug");
        assert_eq!(log.file, Some(PathBuf::from("/tmp/autocommit.log")));
    }

    #[test]
    fn test_merge_other_takes_precedence() {
        let base: Config = toml::from_str(
            r#"
[filter]
extension = ".rs"

[publish]
remote = "upstream"
"#,
        )
        .unwrap();
        let other: Config = toml::from_str(
            r#"
[publish]
remote = "fork"
branch = "trunk"
"#,
        )
        .unwrap();

        let merged = base.merge(other);
        assert_eq!(merged.filter().extension, ".rs");
        assert_eq!(merged.publish().remote, "fork");
        assert_eq!(merged.publish().branch, "trunk");
    }

    #[test]
    fn test_load_from_file_errors() {
        let dir = tempfile::tempdir().unwrap();

        let missing = dir.path().join("missing.toml");
        assert!(matches!(
            Config::load_from_file(&missing),
            Err(ConfigError::Io { .. })
        ));

        let broken = dir.path().join("broken.toml");
        fs::write(&broken, "[publish\nremote = ").unwrap();
        assert!(matches!(
            Config::load_from_file(&broken),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn test_load_layers_repo_overrides_global() {
        let home = tempfile::tempdir().unwrap();
        let repo = tempfile::tempdir().unwrap();

        let global = home.path().join("config.toml");
        fs::write(
            &global,
            "[publish]\nremote = \"upstream\"\n\n[filter]\nextension = \".rs\"\n",
        )
        .unwrap();
        fs::write(
            repo.path().join(REPO_CONFIG_FILE),
            "[publish]\nremote = \"origin\"\nbranch = \"dev\"\n",
        )
        .unwrap();

        let config = Config::load_layers(Some(&global), repo.path());
        assert_eq!(config.filter().extension, ".rs");
        assert_eq!(config.publish().remote, "origin");
        assert_eq!(config.publish().branch, "dev");
    }

    #[test]
    fn test_load_layers_skips_broken_files() {
        let repo = tempfile::tempdir().unwrap();
        fs::write(repo.path().join(REPO_CONFIG_FILE), "not = [valid").unwrap();

        let config = Config::load_layers(None, repo.path());
        assert!(config.publish.is_none());
        assert_eq!(config.publish().branch, "main");
    }
}

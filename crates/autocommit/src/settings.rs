//! Final run settings: config layers plus command-line overrides

use crate::cli::Cli;
use autocommit_core::{Config, ConfigError, LogConfig};
use autocommit_git::{ChangeFilter, PublishTarget};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub repo_dir: PathBuf,
    pub filter: ChangeFilter,
    pub target: PublishTarget,
    pub log: LogConfig,
    pub dry_run: bool,
}

impl Settings {
    /// Implicit config files are best effort; an explicit `--config` must load.
    pub fn load(cli: Cli) -> Result<Self, ConfigError> {
        let repo_dir = cli.repo.clone().unwrap_or_else(|| PathBuf::from("."));
        let mut config = Config::load(&repo_dir);
        if let Some(path) = &cli.config {
            config = config.merge(Config::load_from_file(path)?);
        }
        Ok(Self::resolve(cli, config))
    }

    pub fn resolve(cli: Cli, config: Config) -> Self {
        let filter = config.filter();
        let publish = config.publish();
        let mut log = config.log();
        if let Some(level) = cli.log_level {
            log.level = level;
        }

        Self {
            repo_dir: cli.repo.unwrap_or_else(|| PathBuf::from(".")),
            filter: ChangeFilter::new(cli.extension.unwrap_or(filter.extension)),
            target: PublishTarget {
                remote: cli.remote.unwrap_or(publish.remote),
                branch: cli.branch.unwrap_or(publish.branch),
            },
            log,
            dry_run: cli.dry_run,
        }
    }
}

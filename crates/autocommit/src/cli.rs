use clap::Parser;
use std::path::PathBuf;

/// Stage, commit and push changed files of one extension.
///
/// With no arguments, picks up modified, added and untracked `.py` files
/// and pushes them to `origin main`.
#[derive(Debug, Parser)]
#[command(name = "autocommit", version)]
pub struct Cli {
    /// Specify configuration file path
    #[arg(long, env = "AUTOCOMMIT_CONFIG")]
    pub config: Option<PathBuf>,

    /// Run as if started in this directory
    #[arg(short = 'C', long, env = "AUTOCOMMIT_REPO")]
    pub repo: Option<PathBuf>,

    /// Remote to push to
    #[arg(long, env = "AUTOCOMMIT_REMOTE")]
    pub remote: Option<String>,

    /// Branch to push
    #[arg(long, env = "AUTOCOMMIT_BRANCH")]
    pub branch: Option<String>,

    /// Only commit paths ending with this suffix
    #[arg(long, env = "AUTOCOMMIT_EXTENSION")]
    pub extension: Option<String>,

    /// Log level
    #[arg(long, env = "AUTOCOMMIT_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Show what would be staged, committed and pushed without doing it
    #[arg(long)]
    pub dry_run: bool,
}

//! Tracing setup shared by the autocommit binaries

use std::path::Path;
use thiserror::Error;
use tracing_appender::rolling::{InitError, RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Error, Debug)]
pub enum LogError {
    #[error("Invalid log level '{level}': {source}")]
    Filter {
        level: String,
        #[source]
        source: tracing_subscriber::filter::ParseError,
    },

    #[error("Invalid log file path: {0}")]
    FilePath(String),

    #[error("Failed to open log file: {0}")]
    File(#[from] InitError),

    #[error("Failed to install subscriber: {0}")]
    Install(#[from] tracing_subscriber::util::TryInitError),
}

/// `RUST_LOG` wins over the configured level when set.
pub fn build_filter(level: &str) -> Result<EnvFilter, LogError> {
    if let Ok(filter) = EnvFilter::try_from_default_env() {
        return Ok(filter);
    }
    EnvFilter::try_new(level).map_err(|source| LogError::Filter {
        level: level.to_string(),
        source,
    })
}

/// Install the global subscriber: compact stderr output, plus an
/// append-only log file when `file` is given.
pub fn init(level: &str, file: Option<&Path>) -> Result<(), LogError> {
    let filter = build_filter(level)?;

    let stderr_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    let file_layer = match file {
        Some(path) => Some(
            fmt::layer()
                .with_writer(file_appender(path)?)
                .with_ansi(false),
        ),
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}

fn file_appender(path: &Path) -> Result<RollingFileAppender, LogError> {
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| LogError::FilePath(path.display().to_string()))?;
    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    Ok(RollingFileAppender::builder()
        .rotation(Rotation::NEVER)
        .filename_prefix(file_name)
        .build(parent)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_appender_creates_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autocommit.log");
        assert!(file_appender(&path).is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_file_appender_rejects_dir_path() {
        assert!(matches!(
            file_appender(Path::new("/")),
            Err(LogError::FilePath(_))
        ));
    }
}

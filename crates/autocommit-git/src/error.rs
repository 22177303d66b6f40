use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum GitError {
    #[error("Failed to execute {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    #[error("Error running {command}:\n{}", .stderr.trim_end())]
    Failed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },
}

impl GitError {
    /// The rendered command line that failed
    pub fn command(&self) -> &str {
        match self {
            GitError::Spawn { command, .. } | GitError::Failed { command, .. } => command,
        }
    }
}

pub type GitResult<T> = Result<T, GitError>;

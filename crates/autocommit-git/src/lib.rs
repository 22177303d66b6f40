//! Working-tree change collection and commit publishing
//!
//! This crate drives the `git` command line: it reads porcelain status,
//! picks out changed files of one extension, then stages, commits and
//! pushes them. Failures are returned as values; callers decide how to
//! report them.

mod collector;
mod error;
mod publisher;
mod runner;
mod status;

pub use collector::{
    collect_changed_files, filter_changes, status_invocation, ChangeFilter, ACCEPTED_STATUSES,
    DEFAULT_EXTENSION,
};
pub use error::{GitError, GitResult};
pub use publisher::{
    commit_message, PublishReport, PublishTarget, Publisher, Step, StepOutcome,
    COMMIT_TIMESTAMP_FORMAT, NO_CHANGES_NOTICE,
};
pub use runner::{CommandOutput, CommandRunner, Invocation, SystemRunner};
pub use status::{parse_porcelain, parse_status_line, StatusEntry};

//! Collects changed paths worth committing from the working tree

use crate::error::GitResult;
use crate::runner::{CommandRunner, Invocation};
use crate::status::{parse_porcelain, StatusEntry};

/// Status codes that get committed: modified, added and untracked.
pub const ACCEPTED_STATUSES: &[&str] = &["M", "A", "??"];

pub const DEFAULT_EXTENSION: &str = ".py";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeFilter {
    extension: String,
}

impl ChangeFilter {
    pub fn new(extension: impl Into<String>) -> Self {
        Self {
            extension: extension.into(),
        }
    }

    pub fn extension(&self) -> &str {
        &self.extension
    }

    pub fn matches(&self, entry: &StatusEntry) -> bool {
        entry.path.ends_with(&self.extension) && ACCEPTED_STATUSES.contains(&entry.status())
    }
}

impl Default for ChangeFilter {
    fn default() -> Self {
        Self::new(DEFAULT_EXTENSION)
    }
}

pub fn status_invocation() -> Invocation {
    Invocation::git(["status", "--porcelain"])
}

/// Paths from porcelain output that pass `filter`, in output order
pub fn filter_changes(porcelain: &str, filter: &ChangeFilter) -> Vec<String> {
    parse_porcelain(porcelain)
        .into_iter()
        .filter(|entry| filter.matches(entry))
        .map(|entry| entry.path)
        .collect()
}

/// Query the working tree once and return the matching paths.
pub fn collect_changed_files<R: CommandRunner + ?Sized>(
    runner: &R,
    filter: &ChangeFilter,
) -> GitResult<Vec<String>> {
    let output = runner.run(&status_invocation())?;
    let changed = filter_changes(&output.stdout, filter);
    tracing::info!(
        count = changed.len(),
        extension = filter.extension(),
        "collected changed files"
    );
    Ok(changed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_example() {
        let porcelain = "M  foo.py\n?? bar.txt\nA  baz.py\nD  old.py\n";
        assert_eq!(
            filter_changes(porcelain, &ChangeFilter::default()),
            vec!["foo.py", "baz.py"]
        );
    }

    #[test]
    fn test_filter_statuses_and_suffixes() {
        let porcelain = [
            " M src/a.py",
            "M  b.pyc",
            "?? c.py",
            " D d.py",
            "MM e.py",
            "AM f.py",
            "R  g.py -> h.py",
            "?? notes.md",
            "A  pkg/__init__.py",
        ]
        .join("\n");

        assert_eq!(
            filter_changes(&porcelain, &ChangeFilter::default()),
            vec!["src/a.py", "c.py", "pkg/__init__.py"]
        );
    }

    #[test]
    fn test_custom_extension() {
        let porcelain = "?? main.rs\n M lib.py\n";
        assert_eq!(
            filter_changes(porcelain, &ChangeFilter::new(".rs")),
            vec!["main.rs"]
        );
    }

    #[test]
    fn test_empty_output() {
        assert!(filter_changes("", &ChangeFilter::default()).is_empty());
    }
}

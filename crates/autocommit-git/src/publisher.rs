//! Stage, commit and push a set of changed paths
//!
//! Steps always run in add -> commit -> push order. A failing step is
//! recorded and the next one still runs; nothing is rolled back. The run
//! assumes nothing else touches the repository until it finishes.

use crate::error::GitError;
use crate::runner::{CommandRunner, Invocation};
use chrono::{DateTime, Local};

pub const COMMIT_TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
pub const NO_CHANGES_NOTICE: &str = "✅ No Python files have changed.";

pub fn commit_message(now: DateTime<Local>) -> String {
    format!(
        "Auto-commit Python file updates ({})",
        now.format(COMMIT_TIMESTAMP_FORMAT)
    )
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishTarget {
    pub remote: String,
    pub branch: String,
}

impl Default for PublishTarget {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
            branch: "main".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Stage,
    Commit,
    Push,
}

impl Step {
    pub fn as_str(&self) -> &'static str {
        match self {
            Step::Stage => "stage",
            Step::Commit => "commit",
            Step::Push => "push",
        }
    }
}

#[derive(Debug)]
pub struct StepOutcome {
    pub step: Step,
    pub invocation: Invocation,
    pub result: Result<(), GitError>,
}

#[derive(Debug)]
pub enum PublishReport {
    NoChanges,
    DryRun {
        paths: Vec<String>,
        message: String,
        planned: Vec<Invocation>,
    },
    Published {
        paths: Vec<String>,
        message: String,
        steps: Vec<StepOutcome>,
    },
}

impl PublishReport {
    pub fn failed_steps(&self) -> usize {
        match self {
            PublishReport::Published { steps, .. } => {
                steps.iter().filter(|s| s.result.is_err()).count()
            }
            _ => 0,
        }
    }

    /// Summary lines for this run. Step diagnostics are reported as each
    /// step finishes, see [`Publisher::publish_with`].
    pub fn render(&self) -> Vec<String> {
        match self {
            PublishReport::NoChanges => vec![NO_CHANGES_NOTICE.to_string()],
            PublishReport::DryRun { planned, .. } => {
                let mut lines = vec!["Dry run - would run:".to_string()];
                lines.extend(planned.iter().map(|inv| format!("  {}", inv)));
                lines
            }
            PublishReport::Published { paths, steps, .. } => {
                let mut lines = vec![format!(
                    "✅ Committed and pushed {} file(s): {:?}",
                    paths.len(),
                    paths
                )];
                let failed = self.failed_steps();
                if failed > 0 {
                    lines.push(format!("⚠️ {} of {} step(s) reported errors", failed, steps.len()));
                }
                lines
            }
        }
    }
}

pub struct Publisher<'a, R: CommandRunner + ?Sized> {
    runner: &'a R,
    target: PublishTarget,
    dry_run: bool,
}

impl<'a, R: CommandRunner + ?Sized> Publisher<'a, R> {
    pub fn new(runner: &'a R, target: PublishTarget) -> Self {
        Self {
            runner,
            target,
            dry_run: false,
        }
    }

    pub fn dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// The three invocations for `paths`, in execution order
    pub fn plan(&self, paths: &[String], message: &str) -> [(Step, Invocation); 3] {
        let add_args = ["add", "--"]
            .into_iter()
            .map(str::to_string)
            .chain(paths.iter().cloned());
        [
            (Step::Stage, Invocation::git(add_args)),
            (Step::Commit, Invocation::git(["commit", "-m", message])),
            (
                Step::Push,
                Invocation::git([
                    "push",
                    self.target.remote.as_str(),
                    self.target.branch.as_str(),
                ]),
            ),
        ]
    }

    pub fn publish(&self, paths: &[String]) -> PublishReport {
        self.publish_at(paths, Local::now())
    }

    pub fn publish_at(&self, paths: &[String], now: DateTime<Local>) -> PublishReport {
        self.publish_with(paths, now, |_| {})
    }

    /// Like [`publish_at`](Self::publish_at), calling `on_step` right after
    /// each step returns and before the next one starts.
    pub fn publish_with(
        &self,
        paths: &[String],
        now: DateTime<Local>,
        mut on_step: impl FnMut(&StepOutcome),
    ) -> PublishReport {
        if paths.is_empty() {
            return PublishReport::NoChanges;
        }

        let message = commit_message(now);
        let plan = self.plan(paths, &message);

        if self.dry_run {
            return PublishReport::DryRun {
                paths: paths.to_vec(),
                message,
                planned: plan.into_iter().map(|(_, inv)| inv).collect(),
            };
        }

        let steps = plan
            .into_iter()
            .map(|(step, invocation)| {
                let result = self.runner.run(&invocation).map(|_| ());
                if let Err(e) = &result {
                    tracing::warn!(step = step.as_str(), error = %e, "step failed, continuing");
                } else {
                    tracing::info!(step = step.as_str(), "step done");
                }
                let outcome = StepOutcome {
                    step,
                    invocation,
                    result,
                };
                on_step(&outcome);
                outcome
            })
            .collect();

        PublishReport::Published {
            paths: paths.to_vec(),
            message,
            steps,
        }
    }
}

mod cli;
mod settings;

use anyhow::{Context, Result};
use autocommit_core::logging;
use autocommit_git::{collect_changed_files, CommandRunner, Publisher, SystemRunner};
use chrono::Local;
use clap::Parser;
use cli::Cli;
use settings::Settings;
use std::io::{self, Write};
use std::process::ExitCode;

pub const CHECKING_NOTICE: &str = "🔍 Checking for changed Python files...";
pub const STATUS_FAILED_NOTICE: &str = "⚠️ Could not read working-tree status; nothing committed.";

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

/// Only setup problems surface as errors here.
fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli)?;
    logging::init(&settings.log.level, settings.log.file.as_deref())
        .context("failed to initialise logging")?;

    tracing::debug!(
        repo = %settings.repo_dir.display(),
        remote = %settings.target.remote,
        branch = %settings.target.branch,
        extension = settings.filter.extension(),
        dry_run = settings.dry_run,
        "resolved settings"
    );

    let runner = SystemRunner::in_dir(&settings.repo_dir);
    check_and_publish(&runner, &settings, &mut io::stdout().lock())?;
    Ok(())
}

/// Collect, then publish, writing console lines to `out` as they happen.
///
/// Git failures are written out and the run still completes; the only
/// error is failing to write to `out`.
fn check_and_publish<R, W>(runner: &R, settings: &Settings, out: &mut W) -> io::Result<()>
where
    R: CommandRunner + ?Sized,
    W: Write,
{
    writeln!(out, "{}", CHECKING_NOTICE)?;

    let changed = match collect_changed_files(runner, &settings.filter) {
        Ok(changed) => changed,
        Err(e) => {
            tracing::warn!(error = %e, "status query failed");
            writeln!(out, "{}", e)?;
            writeln!(out, "{}", STATUS_FAILED_NOTICE)?;
            return Ok(());
        }
    };

    let mut written = Ok(());
    let report = Publisher::new(runner, settings.target.clone())
        .dry_run(settings.dry_run)
        .publish_with(&changed, Local::now(), |outcome| {
            if let Err(e) = &outcome.result {
                if written.is_ok() {
                    written = writeln!(out, "{}", e);
                }
            }
        });
    written?;

    for line in report.render() {
        writeln!(out, "{}", line)?;
    }
    Ok(())
}

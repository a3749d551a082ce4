//! Fix command - Migrate `@readonly` phpdoc annotations to native readonly properties.
//!
//! Every scanned PHP file runs through the configured fixers. Changed regions
//! are printed as a preview; use `--apply` to write them back (default is
//! dry-run mode).

use std::io;

use anyhow::Result;

use super::{
    super::{
        args::FixCommand,
        exit_status::ExitStatus,
        report::{self, FixSummary},
    },
    context::FixContext,
};
use crate::runner::{FixReport, fix_files, fixers_from_config};

pub fn fix(cmd: FixCommand) -> Result<ExitStatus> {
    let args = &cmd.args;
    let ctx = FixContext::new(&cmd.paths, &args.common)?;
    let apply = args.apply;

    let fixers = fixers_from_config(&ctx.config);

    let mut changed: Vec<FixReport> = Vec::new();
    let mut errors: Vec<anyhow::Error> = Vec::new();
    for result in fix_files(&fixers, &ctx.files) {
        match result {
            Ok(file_report) if file_report.is_changed() => changed.push(file_report),
            Ok(_) => {}
            Err(err) => errors.push(err),
        }
    }

    if apply {
        changed.retain(|file_report| match file_report.write() {
            Ok(()) => true,
            Err(err) => {
                errors.push(err);
                false
            }
        });
    }

    let mut stdout = io::stdout().lock();
    report::print_changes_to(&changed, &ctx.root_dir, &mut stdout);
    report::print_errors_to(&errors, &mut io::stderr().lock());
    report::print_fix_summary_to(
        &FixSummary {
            files_checked: ctx.files.len(),
            files_changed: changed.len(),
            error_count: errors.len(),
            apply,
        },
        &mut stdout,
    );

    Ok(ExitStatus::from_fix_outcome(
        changed.len(),
        errors.len(),
        apply,
    ))
}

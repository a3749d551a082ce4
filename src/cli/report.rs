//! Report formatting and printing utilities.
//!
//! Changes are shown cargo-style: a clickable `--> path:line` header followed
//! by the removed (`-`) and added (`+`) lines of the changed region.

use std::{io::Write, path::Path};

use colored::Colorize;
use unicode_width::UnicodeWidthStr;

use crate::fixer::FixerDefinition;
use crate::runner::{FixReport, Hunk};

/// Success mark for consistent output formatting.
pub const SUCCESS_MARK: &str = "\u{2713}"; // ✓

/// Failure mark for consistent output formatting.
pub const FAILURE_MARK: &str = "\u{2718}"; // ✘

/// Outcome counters of a `fix` run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FixSummary {
    pub files_checked: usize,
    pub files_changed: usize,
    pub error_count: usize,
    pub apply: bool,
}

/// Print the changed region of every report, with paths relative to `root`.
pub fn print_changes_to<W: Write>(reports: &[FixReport], root: &Path, writer: &mut W) {
    for report in reports {
        if let Some(hunk) = report.hunk() {
            print_hunk(&relative_path(&report.path, root), &hunk, writer);
        }
    }
}

pub fn relative_path(path: &str, root: &Path) -> String {
    Path::new(path)
        .strip_prefix(root)
        .map(|p| p.to_string_lossy().into_owned())
        .unwrap_or_else(|_| path.to_string())
}

fn print_hunk<W: Write>(path: &str, hunk: &Hunk, writer: &mut W) {
    let last_line = hunk.line + hunk.removed.len().saturating_sub(1);
    let width = last_line.to_string().len();

    let _ = writeln!(writer, "{} {}:{}", "-->".blue(), path, hunk.line);
    let _ = writeln!(writer, "{:>width$} {}", "", "|".blue(), width = width);

    for (offset, line) in hunk.removed.iter().enumerate() {
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            (hunk.line + offset).to_string().blue(),
            "-".red(),
            line.red(),
            width = width
        );
    }
    for line in &hunk.added {
        let _ = writeln!(
            writer,
            "{:>width$} {} {}",
            "",
            "+".green(),
            line.green(),
            width = width
        );
    }
    let _ = writeln!(writer);
}

/// Print one line per file that could not be processed.
pub fn print_errors_to<W: Write>(errors: &[anyhow::Error], writer: &mut W) {
    for error in errors {
        let _ = writeln!(writer, "{} {:#}", "error:".bold().red(), error);
    }
}

pub fn print_fix_summary_to<W: Write>(summary: &FixSummary, writer: &mut W) {
    let files = |n: usize| if n == 1 { "file" } else { "files" };

    if summary.files_changed == 0 {
        if summary.error_count == 0 {
            let _ = writeln!(
                writer,
                "{} {}",
                SUCCESS_MARK.green(),
                format!(
                    "Checked {} PHP {} - nothing to fix",
                    summary.files_checked,
                    files(summary.files_checked)
                )
                .green()
            );
        }
    } else if summary.apply {
        let _ = writeln!(
            writer,
            "{} {} {} (checked {} {}).",
            "Fixed".green().bold(),
            summary.files_changed,
            files(summary.files_changed),
            summary.files_checked,
            files(summary.files_checked)
        );
    } else {
        let _ = writeln!(
            writer,
            "{} {} {} (checked {} {}).",
            "Would fix".yellow().bold(),
            summary.files_changed,
            files(summary.files_changed),
            summary.files_checked,
            files(summary.files_checked)
        );
        let _ = writeln!(writer, "Run with {} to write these changes.", "--apply".cyan());
    }

    if summary.error_count > 0 {
        let _ = writeln!(
            writer,
            "{} {} {} could not be processed",
            FAILURE_MARK.red(),
            summary.error_count,
            files(summary.error_count)
        );
    }
}

/// Print a fixer's metadata and each sample next to its fixed form.
pub fn print_definition_to<W: Write>(
    name: &str,
    definition: &FixerDefinition,
    fixed_samples: &[String],
    writer: &mut W,
) {
    let _ = writeln!(writer, "{}", name.bold());
    let _ = writeln!(writer, "{}", definition.summary);

    for (index, (sample, fixed)) in definition.samples.iter().zip(fixed_samples).enumerate() {
        let rule_width = sample
            .code
            .lines()
            .chain(fixed.lines())
            .map(UnicodeWidthStr::width)
            .max()
            .unwrap_or(0);
        let rule = "-".repeat(rule_width);

        let _ = writeln!(writer);
        let _ = writeln!(writer, "{}", format!("Example #{}", index + 1).cyan());
        let _ = writeln!(writer, "{}", rule.dimmed());
        let _ = write!(writer, "{}", sample.code);
        let _ = writeln!(writer, "{}", rule.dimmed());
        let _ = write!(writer, "{}", fixed);
        let _ = writeln!(writer, "{}", rule.dimmed());
    }
}

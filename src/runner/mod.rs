//! Driver loop: find PHP files, run fixers over them, report what changed.
//!
//! Files are independent, so they are processed in parallel; each single
//! file is fixed sequentially by every candidate fixer in turn.

mod file_scanner;

use std::{fs, path::Path};

use anyhow::{Context, Result};
use rayon::prelude::*;
use tracing::debug;

use crate::{
    config::Config,
    fixer::{Fixer, ReadonlyPropertyFixer},
    tokenizer::Tokens,
};

pub use file_scanner::{ScanResult, scan_files};

/// All fixers enabled by the configuration.
pub fn fixers_from_config(config: &Config) -> Vec<Box<dyn Fixer>> {
    let readonly_property: Box<dyn Fixer> = Box::new(ReadonlyPropertyFixer::new(
        config.readonly_property_options(),
    ));
    vec![readonly_property]
}

/// Runs every candidate fixer over `source` and returns the fixed text.
pub fn fix_source(fixers: &[Box<dyn Fixer>], path: &Path, source: &str) -> Result<String> {
    let mut tokens = Tokens::from_source(source)
        .with_context(|| format!("Failed to tokenize {}", path.display()))?;

    for fixer in fixers {
        if !fixer.is_candidate(&tokens) {
            debug!(fixer = fixer.name(), file = %path.display(), "not a candidate");
            continue;
        }
        fixer
            .apply_fix(path, &mut tokens)
            .with_context(|| format!("{} failed on {}", fixer.name(), path.display()))?;
    }

    Ok(tokens.to_source())
}

/// Outcome of fixing one file.
#[derive(Debug, Clone)]
pub struct FixReport {
    pub path: String,
    pub original: String,
    pub fixed: String,
}

/// The changed region of a file: lines removed from the original and the
/// lines replacing them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hunk {
    /// 1-based line number of the first changed line.
    pub line: usize,
    pub removed: Vec<String>,
    pub added: Vec<String>,
}

impl FixReport {
    pub fn is_changed(&self) -> bool {
        self.original != self.fixed
    }

    /// Single hunk spanning the first to the last changed line.
    pub fn hunk(&self) -> Option<Hunk> {
        if !self.is_changed() {
            return None;
        }

        let before: Vec<&str> = self.original.lines().collect();
        let after: Vec<&str> = self.fixed.lines().collect();

        let prefix = before
            .iter()
            .zip(&after)
            .take_while(|(a, b)| a == b)
            .count();
        let max_suffix = before.len().min(after.len()) - prefix;
        let suffix = before
            .iter()
            .rev()
            .zip(after.iter().rev())
            .take(max_suffix)
            .take_while(|(a, b)| a == b)
            .count();

        let to_owned =
            |lines: &[&str]| -> Vec<String> { lines.iter().map(|l| l.to_string()).collect() };
        Some(Hunk {
            line: prefix + 1,
            removed: to_owned(&before[prefix..before.len() - suffix]),
            added: to_owned(&after[prefix..after.len() - suffix]),
        })
    }

    /// Writes the fixed content back to disk.
    pub fn write(&self) -> Result<()> {
        fs::write(&self.path, &self.fixed)
            .with_context(|| format!("Failed to write file: {}", self.path))
    }
}

pub fn fix_file(fixers: &[Box<dyn Fixer>], path: &str) -> Result<FixReport> {
    let original =
        fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))?;
    let fixed = fix_source(fixers, Path::new(path), &original)?;

    Ok(FixReport {
        path: path.to_string(),
        original,
        fixed,
    })
}

/// Fixes all files in parallel. Results keep the input order; a failing
/// file never stops the others.
pub fn fix_files(fixers: &[Box<dyn Fixer>], files: &[String]) -> Vec<Result<FixReport>> {
    files
        .par_iter()
        .map(|path| fix_file(fixers, path))
        .collect()
}

//! Fixers: self-contained source-to-source transformations over [`Tokens`].
//!
//! A driver asks each fixer whether a file is worth looking at
//! ([`Fixer::is_candidate`]) and only then lets it rewrite the token stream
//! in place ([`Fixer::apply_fix`]).
//!
//! ## Fixers
//!
//! - [`ReadonlyPropertyFixer`]: migrate `@readonly` phpdoc to native `readonly`

mod php_version;
mod readonly_property;

use std::path::Path;

use thiserror::Error;

use crate::{docblock::DocBlockError, tokenizer::Tokens};

pub use php_version::{ParsePhpVersionError, PhpVersion};
pub use readonly_property::{ReadonlyPropertyFixer, ReadonlyPropertyOptions};

/// Failures a fixer passes on to the driver unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FixError {
    #[error("malformed doc comment: {0}")]
    DocBlock(#[from] DocBlockError),
}

/// Before/after example shown in documentation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeSample {
    pub code: &'static str,
}

impl CodeSample {
    pub const fn new(code: &'static str) -> Self {
        Self { code }
    }
}

/// Declarative metadata describing a fixer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FixerDefinition {
    pub summary: &'static str,
    pub samples: Vec<CodeSample>,
}

pub trait Fixer: Send + Sync {
    /// Stable snake_case name.
    fn name(&self) -> &'static str;

    fn definition(&self) -> FixerDefinition;

    /// Cheap, side-effect free pre-check run once per file.
    fn is_candidate(&self, tokens: &Tokens) -> bool;

    /// Rewrites `tokens` in place. Only called when [`Fixer::is_candidate`]
    /// returned `true`. `file` is informational.
    fn apply_fix(&self, file: &Path, tokens: &mut Tokens) -> Result<(), FixError>;
}

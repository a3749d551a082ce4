//! CLI argument definitions using clap.
//!
//! ## Commands
//!
//! - `fix`: Migrate `@readonly` annotations (dry-run unless `--apply`)
//! - `describe`: Show what each fixer does, with before/after samples
//! - `init`: Initialize a `.rofixrc.json` configuration file

use std::path::PathBuf;

use clap::{Args, CommandFactory, Parser, Subcommand};

use crate::fixer::PhpVersion;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Arguments {
    #[command(subcommand)]
    pub command: Option<Command>,
}

impl Arguments {
    /// Check if a command was provided, otherwise print help and return None.
    pub fn with_command_or_help(self) -> Option<Self> {
        if self.command.is_none() {
            Self::command().print_help().ok();
            None
        } else {
            Some(self)
        }
    }

    /// Get the verbose flag from the command's common args.
    pub fn verbose(&self) -> bool {
        match &self.command {
            Some(Command::Fix(cmd)) => cmd.args.common.verbose,
            Some(Command::Describe) | Some(Command::Init) | None => false,
        }
    }
}

/// Common arguments shared by commands that read PHP sources.
#[derive(Debug, Clone, Default, Args)]
pub struct CommonArgs {
    /// Project root directory (default: current directory)
    #[arg(long)]
    pub source_root: Option<PathBuf>,

    /// Target PHP version, e.g. 8.1 (overrides config file)
    #[arg(long, env = "ROFIX_PHP_VERSION")]
    pub php_version: Option<PhpVersion>,

    /// Only remove the annotations, without adding the native readonly modifier
    #[arg(long)]
    pub no_insert_modifier: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Parser)]
pub struct FixArgs {
    #[command(flatten)]
    pub common: CommonArgs,

    /// Actually write the fixed files (default is dry-run)
    #[arg(long)]
    pub apply: bool,
}

#[derive(Debug, Args)]
pub struct FixCommand {
    /// Files or directories to fix (default: `includes` from the config file)
    #[arg(value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    #[command(flatten)]
    pub args: FixArgs,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Migrate @readonly phpdoc annotations to native readonly properties
    Fix(FixCommand),
    /// Describe the fixer and show its code samples
    Describe,
    /// Initialize a new .rofixrc.json configuration file
    Init,
}

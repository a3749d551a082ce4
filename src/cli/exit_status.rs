use std::process::ExitCode;

/// Exit status for CLI commands.
///
/// - `Success` (0): nothing to fix, or all fixes were written
/// - `Failure` (1): dry-run found files that would change
/// - `Error` (2): a file could not be processed, or the command failed
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ExitStatus {
    Success,
    Failure,
    Error,
}

impl ExitStatus {
    /// Status of a `fix` run. Errors win over pending changes.
    pub fn from_fix_outcome(changed_files: usize, error_count: usize, apply: bool) -> Self {
        if error_count > 0 {
            Self::Error
        } else if changed_files > 0 && !apply {
            Self::Failure
        } else {
            Self::Success
        }
    }
}

impl From<ExitStatus> for ExitCode {
    fn from(status: ExitStatus) -> Self {
        match status {
            ExitStatus::Success => ExitCode::from(0),
            ExitStatus::Failure => ExitCode::from(1),
            ExitStatus::Error => ExitCode::from(2),
        }
    }
}

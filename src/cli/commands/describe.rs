//! Describe command - Print each fixer's summary and its samples before and after fixing.

use std::{io, path::Path};

use anyhow::Result;

use super::super::{exit_status::ExitStatus, report};
use crate::{config::Config, runner};

pub fn describe() -> Result<ExitStatus> {
    let fixers = runner::fixers_from_config(&Config::default());
    let mut stdout = io::stdout().lock();

    for fixer in &fixers {
        let definition = fixer.definition();
        let fixed_samples = definition
            .samples
            .iter()
            .map(|sample| {
                runner::fix_source(
                    std::slice::from_ref(fixer),
                    Path::new("sample.php"),
                    sample.code,
                )
            })
            .collect::<Result<Vec<_>>>()?;

        report::print_definition_to(fixer.name(), &definition, &fixed_samples, &mut stdout);
    }

    Ok(ExitStatus::Success)
}

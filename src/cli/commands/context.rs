use std::{
    env,
    path::{Path, PathBuf},
};

use anyhow::{Context, Result};
use tracing::{debug, info, warn};

use super::super::args::CommonArgs;
use crate::{
    config::{CONFIG_FILE_NAME, Config, load_config},
    runner::scan_files,
};

/// Configuration and the PHP files to process, resolved from command line args.
pub struct FixContext {
    pub config: Config,
    pub root_dir: PathBuf,
    pub files: Vec<String>,
}

impl FixContext {
    /// Load the config for the source root, apply CLI overrides and scan files.
    ///
    /// Explicit `paths` replace the configured `includes`; they are resolved
    /// against the working directory, not the source root.
    pub fn new(paths: &[PathBuf], args: &CommonArgs) -> Result<Self> {
        let cwd = env::current_dir().context("Failed to read the current directory")?;
        let root_dir = match &args.source_root {
            Some(root) => cwd.join(root),
            None => cwd.clone(),
        };

        let config_result = load_config(&root_dir)?;

        if !config_result.from_file {
            info!(
                config = CONFIG_FILE_NAME,
                "no config file found, using default configuration"
            );
        }

        let mut config = config_result.config;
        if let Some(version) = args.php_version {
            config.php_version = version;
        }
        if args.no_insert_modifier {
            config.insert_modifier = false;
        }

        let includes = if paths.is_empty() {
            config.includes.clone()
        } else {
            paths.iter().map(|p| absolute(&cwd, p)).collect()
        };

        let scan_result = scan_files(&root_dir, &includes, &config.ignores);

        if scan_result.skipped_count > 0 {
            warn!(
                skipped = scan_result.skipped_count,
                "paths skipped due to access errors"
            );
        }

        debug!(
            root = %root_dir.display(),
            php_version = %config.php_version,
            insert_modifier = config.insert_modifier,
            files = scan_result.files.len(),
            "resolved fix context"
        );

        Ok(Self {
            config,
            root_dir,
            files: scan_result.files.into_iter().collect(),
        })
    }
}

fn absolute(cwd: &Path, path: &Path) -> String {
    cwd.join(path).to_string_lossy().into_owned()
}

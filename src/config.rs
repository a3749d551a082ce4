use std::{
    fs,
    path::{Path, PathBuf},
};

use anyhow::{Context, Ok, Result, bail};
use glob::Pattern;
use serde::{Deserialize, Serialize};

use crate::fixer::{PhpVersion, ReadonlyPropertyOptions};

pub const CONFIG_FILE_NAME: &str = ".rofixrc.json";

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_includes")]
    pub includes: Vec<String>,
    #[serde(default = "default_ignores")]
    pub ignores: Vec<String>,
    #[serde(default)]
    pub php_version: PhpVersion,
    #[serde(default = "default_insert_modifier")]
    pub insert_modifier: bool,
    #[serde(default = "default_annotations")]
    pub annotations: Vec<String>,
}

fn default_includes() -> Vec<String> {
    vec!["src".to_string()]
}

fn default_ignores() -> Vec<String> {
    vec!["vendor".to_string()]
}

fn default_insert_modifier() -> bool {
    true
}

fn default_annotations() -> Vec<String> {
    vec!["readonly".to_string()]
}

impl Default for Config {
    fn default() -> Self {
        Self {
            includes: default_includes(),
            ignores: default_ignores(),
            php_version: PhpVersion::default(),
            insert_modifier: default_insert_modifier(),
            annotations: default_annotations(),
        }
    }
}

impl Config {
    /// Validate configuration values.
    ///
    /// Returns an error if any glob pattern is invalid or no annotation tag
    /// is configured.
    pub fn validate(&self) -> Result<()> {
        for pattern in &self.ignores {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'ignores': \"{}\"", pattern)
                })?;
            }
        }

        for pattern in &self.includes {
            if pattern.contains('*') || pattern.contains('?') {
                Pattern::new(pattern).with_context(|| {
                    format!("Invalid glob pattern in 'includes': \"{}\"", pattern)
                })?;
            }
        }

        if self.annotations.iter().all(|tag| tag.trim().is_empty()) {
            bail!("'annotations' must name at least one tag");
        }

        Ok(())
    }

    pub fn readonly_property_options(&self) -> ReadonlyPropertyOptions {
        ReadonlyPropertyOptions {
            php_version: self.php_version,
            insert_modifier: self.insert_modifier,
            annotations: self
                .annotations
                .iter()
                .map(|tag| tag.trim().trim_start_matches('@').to_string())
                .filter(|tag| !tag.is_empty())
                .collect(),
        }
    }
}

pub fn default_config_json() -> Result<String> {
    let config = Config::default();
    serde_json::to_string_pretty(&config).context("Failed to generate default config.")
}

pub fn find_config_file(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_FILE_NAME);
        if config_path.exists() {
            return Some(config_path);
        }
        if current.join(".git").exists() {
            return None;
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Result of loading configuration.
pub struct ConfigLoadResult {
    pub config: Config,
    /// True if config was loaded from a file, false if using defaults.
    pub from_file: bool,
}

pub fn load_config(start_dir: &Path) -> Result<ConfigLoadResult> {
    match find_config_file(start_dir) {
        Some(path) => {
            let content = fs::read_to_string(&path)
                .with_context(|| format!("Failed to read config file: {:?}", path))?;
            let config: Config = serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse config file: {:?}", path))?;
            config.validate()?;
            Ok(ConfigLoadResult {
                config,
                from_file: true,
            })
        }
        None => Ok(ConfigLoadResult {
            config: Config::default(),
            from_file: false,
        }),
    }
}

#[cfg(test)]
mod tests {
    use crate::config::*;
    use std::fs::File;
    use tempfile::tempdir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.includes, vec!["src"]);
        assert_eq!(config.ignores, vec!["vendor"]);
        assert_eq!(config.php_version, PhpVersion::PHP_8_1);
        assert!(config.insert_modifier);
        assert_eq!(config.annotations, vec!["readonly"]);
    }

    #[test]
    fn test_parse_config() {
        let json = r#"{
              "includes": ["lib/**"],
              "ignores": ["**/Fixtures/**"],
              "phpVersion": "8.3",
              "insertModifier": false,
              "annotations": ["readonly", "psalm-readonly"]
          }"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.includes, vec!["lib/**"]);
        assert_eq!(config.ignores, vec!["**/Fixtures/**"]);
        assert_eq!(config.php_version, PhpVersion::new(8, 3));
        assert!(!config.insert_modifier);
        assert_eq!(config.annotations, vec!["readonly", "psalm-readonly"]);
    }

    #[test]
    fn test_partial_config() {
        let json = r#"{ "phpVersion": "8.0" }"#;
        let config: Config = serde_json::from_str(json).unwrap();

        assert_eq!(config.php_version, PhpVersion::new(8, 0));
        assert_eq!(config.includes, default_includes());
        assert_eq!(config.annotations, default_annotations());
    }

    #[test]
    fn test_invalid_php_version() {
        let json = r#"{ "phpVersion": "latest" }"#;
        let result: Result<Config, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_find_config_file() {
        let dir = tempdir().unwrap();
        let sub_dir = dir.path().join("src").join("Entity");
        fs::create_dir_all(&sub_dir).unwrap();

        let config_path = dir.path().join(CONFIG_FILE_NAME);
        File::create(&config_path).unwrap();

        let found = find_config_file(&sub_dir);
        assert!(found.is_some());
        assert_eq!(found.unwrap(), config_path);
    }

    #[test]
    fn test_find_config_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let found = find_config_file(dir.path());
        assert!(found.is_none());
    }

    #[test]
    fn test_load_config_from_file() {
        let dir = tempdir().unwrap();
        let config_path = dir.path().join(CONFIG_FILE_NAME);

        fs::write(&config_path, r#"{ "ignores": ["**/cache/**"] }"#).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(result.from_file);
        assert_eq!(result.config.ignores, vec!["**/cache/**"]);
    }

    #[test]
    fn test_load_config_default_when_not_found() {
        let dir = tempdir().unwrap();
        fs::create_dir(dir.path().join(".git")).unwrap();

        let result = load_config(dir.path()).unwrap();
        assert!(!result.from_file);
        assert_eq!(result.config.includes, default_includes());
    }

    #[test]
    fn test_validate_invalid_ignore_pattern() {
        let config = Config {
            ignores: vec!["**/[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("ignores"));
    }

    #[test]
    fn test_validate_invalid_include_pattern() {
        let config = Config {
            includes: vec!["src/**/[invalid".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("includes"));
    }

    #[test]
    fn test_validate_empty_annotations() {
        let config = Config {
            annotations: vec![" ".to_string()],
            ..Default::default()
        };
        let result = config.validate();
        assert!(result.is_err());
        assert!(result.unwrap_err().to_string().contains("annotations"));
    }

    #[test]
    fn test_load_config_with_invalid_pattern_fails() {
        let dir = tempdir().unwrap();
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            r#"{ "includes": ["[invalid*"] }"#,
        )
        .unwrap();

        assert!(load_config(dir.path()).is_err());
    }

    #[test]
    fn test_readonly_property_options() {
        let config = Config {
            annotations: vec!["@readonly".to_string(), "".to_string()],
            insert_modifier: false,
            ..Default::default()
        };
        let options = config.readonly_property_options();
        assert_eq!(options.annotations, vec!["readonly"]);
        assert!(!options.insert_modifier);
        assert_eq!(options.php_version, PhpVersion::PHP_8_1);
    }

    #[test]
    fn test_serialization_uses_camel_case() {
        let json = default_config_json().unwrap();
        assert!(json.contains("\"phpVersion\": \"8.1\""));
        assert!(json.contains("insertModifier"));
    }
}

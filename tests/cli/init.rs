use anyhow::{Context, Result};
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(stdout(&output), "✓ Created .rofixrc.json\n");

    let content = test.read_file(".rofixrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["includes"], serde_json::json!(["src"]));
    assert_eq!(parsed["ignores"], serde_json::json!(["vendor"]));
    assert_eq!(parsed["phpVersion"], "8.1");
    assert_eq!(parsed["insertModifier"], true);
    assert_eq!(parsed["annotations"], serde_json::json!(["readonly"]));

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".rofixrc.json", "{}")?;

    let output = test.command().arg("init").output()?;
    assert_eq!(output.status.code(), Some(1));
    assert!(stderr(&output).contains(".rofixrc.json already exists"));
    assert_eq!(test.read_file(".rofixrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file(
        "src/Point.php",
        "<?php\nfinal class Point\n{\n    public int $x;\n}\n",
    )?;

    let output = test.fix_command().output()?;
    assert!(
        output.status.success(),
        "Fix command should work with initialized config. stderr: {}",
        stderr(&output)
    );

    Ok(())
}

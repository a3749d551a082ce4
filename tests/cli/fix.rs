use anyhow::Result;
use pretty_assertions::assert_eq;

use crate::{CliTest, stderr, stdout};

const ENTITY: &str = r#"<?php
class Foo {
    /**
     * @readonly
     */
    public string $bar;
}
"#;

const ENTITY_FIXED: &str = r#"<?php
class Foo {
    public readonly string $bar;
}
"#;

#[test]
fn test_fix_dry_run() -> Result<()> {
    let test = CliTest::with_file("src/Foo.php", ENTITY)?;

    let output = test.fix_command().output()?;

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        stdout(&output),
        r#"--> src/Foo.php:3
  |
3 -     /**
4 -      * @readonly
5 -      */
6 -     public string $bar;
  +     public readonly string $bar;

Would fix 1 file (checked 1 file).
Run with --apply to write these changes.
"#
    );
    assert_eq!(test.read_file("src/Foo.php")?, ENTITY);
    Ok(())
}

#[test]
fn test_fix_apply() -> Result<()> {
    let test = CliTest::with_file("src/Foo.php", ENTITY)?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).ends_with("Fixed 1 file (checked 1 file).\n"));
    assert_eq!(test.read_file("src/Foo.php")?, ENTITY_FIXED);

    // Second run has nothing left to do.
    let output = test.fix_command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "✓ Checked 1 PHP file - nothing to fix\n"
    );
    Ok(())
}

#[test]
fn test_fix_keeps_other_annotations() -> Result<()> {
    let test = CliTest::with_file(
        "src/User.php",
        r#"<?php
final class User
{
    /**
     * @readonly
     * @var non-empty-string
     */
    public string $email;
}
"#,
    )?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/User.php")?,
        r#"<?php
final class User
{
    /**
     * @var non-empty-string
     */
    public readonly string $email;
}
"#
    );
    Ok(())
}

#[test]
fn test_fix_without_inserting_modifier() -> Result<()> {
    let test = CliTest::with_file("src/Foo.php", ENTITY)?;

    let output = test
        .fix_command()
        .args(["--apply", "--no-insert-modifier"])
        .output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        test.read_file("src/Foo.php")?,
        "<?php\nclass Foo {\n    public string $bar;\n}\n"
    );
    Ok(())
}

#[test]
fn test_fix_skips_old_php_versions() -> Result<()> {
    let test = CliTest::with_file("src/Foo.php", ENTITY)?;

    let output = test.fix_command().args(["--php-version", "8.0"]).output()?;
    assert_eq!(output.status.code(), Some(0));

    let output = test
        .fix_command()
        .env("ROFIX_PHP_VERSION", "7.4")
        .output()?;
    assert_eq!(output.status.code(), Some(0));

    assert_eq!(test.read_file("src/Foo.php")?, ENTITY);
    Ok(())
}

#[test]
fn test_fix_explicit_paths_replace_includes() -> Result<()> {
    let test = CliTest::with_file("src/Foo.php", ENTITY)?;
    test.write_file("lib/Foo.php", ENTITY)?;

    let output = test.fix_command().args(["lib", "--apply"]).output()?;

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(test.read_file("lib/Foo.php")?, ENTITY_FIXED);
    assert_eq!(test.read_file("src/Foo.php")?, ENTITY);
    Ok(())
}

#[test]
fn test_fix_uses_config_file() -> Result<()> {
    let test = CliTest::with_file(
        ".rofixrc.json",
        r#"{
            "includes": [],
            "annotations": ["@immutable"]
        }"#,
    )?;
    test.write_file(
        "app/Money.php",
        "<?php\nclass Money {\n    /** @immutable */\n    public int $amount;\n}\n",
    )?;
    test.write_file("vendor/acme/Lib.php", ENTITY)?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(0), "stderr: {}", stderr(&output));
    assert_eq!(
        test.read_file("app/Money.php")?,
        "<?php\nclass Money {\n    public readonly int $amount;\n}\n"
    );
    assert_eq!(test.read_file("vendor/acme/Lib.php")?, ENTITY);
    Ok(())
}

#[test]
fn test_fix_source_root() -> Result<()> {
    let test = CliTest::with_file("project/src/Foo.php", ENTITY)?;

    let output = test
        .fix_command()
        .args(["--source-root", "project"])
        .output()?;

    assert_eq!(output.status.code(), Some(1));
    assert!(stdout(&output).starts_with("--> src/Foo.php:3\n"));
    Ok(())
}

#[test]
fn test_fix_reports_broken_files() -> Result<()> {
    let test = CliTest::with_file("src/Foo.php", ENTITY)?;
    test.write_file("src/Broken.php", "<?php\n$name = 'unterminated;\n")?;

    let output = test.fix_command().arg("--apply").output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Broken.php"));
    assert!(stdout(&output).contains("✘ 1 file could not be processed"));
    // Other files are still fixed.
    assert_eq!(test.read_file("src/Foo.php")?, ENTITY_FIXED);
    Ok(())
}

#[test]
fn test_fix_invalid_config() -> Result<()> {
    let test = CliTest::with_file(".rofixrc.json", r#"{"phpVersion": "next"}"#)?;

    let output = test.fix_command().output()?;

    assert_eq!(output.status.code(), Some(2));
    assert!(stderr(&output).contains("Failed to parse config file"));
    Ok(())
}

#[test]
fn test_fix_verbose_logs_default_config_to_stderr() -> Result<()> {
    let test = CliTest::with_file("src/Foo.php", ENTITY_FIXED)?;

    let output = test.fix_command().arg("-v").output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stderr(&output).contains("no config file found, using default configuration"));
    assert_eq!(stdout(&output), "✓ Checked 1 PHP file - nothing to fix\n");

    let output = test.fix_command().output()?;
    assert_eq!(stderr(&output), "");
    Ok(())
}

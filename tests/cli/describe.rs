use anyhow::Result;

use crate::{CliTest, stdout};

#[test]
fn test_describe_shows_samples_and_their_fixed_form() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().arg("describe").output()?;
    assert_eq!(output.status.code(), Some(0));

    let out = stdout(&output);
    assert!(out.starts_with("readonly_property_declaration\n"));
    assert!(out.contains(
        "Replace readonly signature from docblock to property declaration (PHP 8.1)."
    ));
    assert!(out.contains("Example #1"));
    assert!(out.contains("Example #2"));
    assert!(out.contains("@readonly"));
    assert!(out.contains("public readonly string $bar;"));

    Ok(())
}

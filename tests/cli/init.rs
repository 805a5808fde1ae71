use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"));

    let content = test.read_file(".locscanrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(parsed["scopeAttribute"], "lang");
    assert_eq!(parsed["tagPolicy"]["delegateDepth"], 1);
    assert!(parsed.get("markupExtensions").is_some());
    assert!(content.contains("\n  \""), "Config should use 2-space indentation");

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".locscanrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"));
    assert_eq!(test.read_file(".locscanrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;
    test.command().arg("init").output()?;
    test.write_file("www/index.html", "<h1>Welcome</h1>")?;

    let output = test.extract_command().output()?;
    assert!(
        output.status.success(),
        "extract should work with the initialized config. stderr: {}",
        stderr(&output)
    );
    assert!(stdout(&output).contains("text: \"Welcome\""));

    Ok(())
}

use anyhow::{Context, Result};
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::CliTest;

/// Validates config file structure and default values.
fn assert_config_content(content: &str) -> Result<()> {
    let parsed: Value = serde_json::from_str(content).context("Config should be valid JSON")?;

    for section in ["css", "keys", "hardcoded", "disable", "changes"] {
        assert!(
            parsed.get(section).is_some(),
            "Config should have '{}' section",
            section
        );
    }
    assert_eq!(parsed["ignoreTestFiles"], Value::Bool(true));
    assert_eq!(parsed["keys"]["localesRoot"], "public/locales");
    assert_eq!(parsed["keys"]["primaryLocale"], "en");
    assert_eq!(parsed["changes"]["maxFiles"], 20);

    assert!(
        content.contains("\n  \""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.command().arg("init"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Created .gatecheckrc.json

    ----- stderr -----
    "#);

    assert!(test.root().join(".gatecheckrc.json").exists());
    let content = test.read_file(".gatecheckrc.json")?;
    assert_config_content(&content)?;

    Ok(())
}

#[test]
fn test_init_fails_if_exists() -> Result<()> {
    let test = CliTest::with_file(".gatecheckrc.json", "{}")?;

    assert_cmd_snapshot!(test.command().arg("init"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: .gatecheckrc.json already exists
    "#);
    assert_eq!(test.read_file(".gatecheckrc.json")?, "{}");

    Ok(())
}

#[test]
fn test_init_config_is_immediately_usable() -> Result<()> {
    let test = CliTest::new()?;

    test.command().arg("init").output()?;
    test.write_file("src/app.ts", "export const app = 1;\n")?;

    let output = test.subcommand("disable").output()?;
    assert!(
        output.status.success(),
        "disable should work with the initialized config. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(String::from_utf8_lossy(&output.stderr).contains("Usage: gatecheck"));

    Ok(())
}

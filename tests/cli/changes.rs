use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_changes_within_limits() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.subcommand("changes").args(["--files", "src/a.ts", "./src/a.ts", "src/b.ts"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 2 changed files - no issues found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_changes_too_many_files() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.subcommand("changes").args([
        "--files",
        "a.ts",
        "b.ts",
        "c.ts",
        "--max-files",
        "2",
    ]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "3 files changed"  too-many-files
      = note: the limit is 2 files per change
      = hint: Split the change into smaller pull requests.


    ✘ 1 problem

    ----- stderr -----
    "#);

    // 0 disables the limit
    assert_cmd_snapshot!(test.subcommand("changes").args([
        "--files",
        "a.ts",
        "b.ts",
        "c.ts",
        "--max_files",
        "0",
    ]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 3 changed files - no issues found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_changes_max_files_from_env() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test
        .subcommand("changes")
        .env("GATECHECK_MAX_FILES", "1")
        .args(["--files", "a.ts", "b.ts"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "2 files changed"  too-many-files
      = note: the limit is 1 files per change
      = hint: Split the change into smaller pull requests.


    ✘ 1 problem

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_changes_sensitive_files() -> Result<()> {
    let test = CliTest::with_file(
        "changed.txt",
        ".github/workflows/ci.yml\nsrc/App.tsx\n\npackage.json\n",
    )?;
    test.write_file(
        "sensitive.txt",
        "# CI configuration\n^\\.github/\n\n# dependencies\n(^|/)package\\.json$\n",
    )?;

    assert_cmd_snapshot!(test.subcommand("changes").args([
        "--files-from",
        "changed.txt",
        "--sensitive-files",
        "sensitive.txt",
    ]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: ".github/workflows/ci.yml"  sensitive-file
      --> .github/workflows/ci.yml
      = note: matches sensitive pattern `^\.github/`

    error: "package.json"  sensitive-file
      --> package.json
      = note: matches sensitive pattern `(^|/)package\.json$`


    ✘ 2 problems in 2 files

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_changes_config_patterns() -> Result<()> {
    let test = CliTest::with_file(
        ".gatecheckrc.json",
        r#"{ "changes": { "maxFiles": 5, "sensitivePatterns": ["^migrations/"] } }"#,
    )?;

    assert_cmd_snapshot!(test
        .subcommand("changes")
        .args(["--files", "migrations/001.sql", "src/db.ts"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "migrations/001.sql"  sensitive-file
      --> migrations/001.sql
      = note: matches sensitive pattern `^migrations/`


    ✘ 1 problem in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_changes_errors() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.subcommand("changes"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: At least one of --files or --files_from must be provided
    "#);

    insta::with_settings!({filters => vec![(r"(?s)regex parse error:.*", "[REGEX ERROR]")]}, {
        assert_cmd_snapshot!(test.subcommand("changes").args([
            "--files",
            "a.ts",
            "--sensitive_patterns",
            "[",
        ]), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Invalid sensitive pattern: "[": [REGEX ERROR]
        "#);
    });

    assert_cmd_snapshot!(test.subcommand("changes").args(["--files-from", "missing.txt"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Failed to read missing.txt: No such file or directory (os error 2)
    "#);

    Ok(())
}

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;

use crate::CliTest;

const APP: &str = r#"import './App.css';
// color: #123456
export function App() {
  return <div style={{ color: '#ff0000' }}>Hi</div>;
}
"#;

const CLEAN: &str = r#"export function Clean() {
  return <div className="box">Hi</div>;
}
"#;

#[test]
fn test_css_reports_violations() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    assert_cmd_snapshot!(test.subcommand("css").args(["--directories", "src"]), @r##"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "style={{"  inline_style_object
      --> src/App.tsx:4:15
      |
    4 |   return <div style={{ color: '#ff0000' }}>Hi</div>;
      |               ^
      = note: Inline style object found.
      = hint: Move styles to CSS file and use className instead.

    error: "#ff0000"  hex_color
      --> src/App.tsx:4:32
      |
    4 |   return <div style={{ color: '#ff0000' }}>Hi</div>;
      |                                ^
      = note: Hex color code found.
      = hint: Use CSS variables from stylesheet instead.


    ✘ 2 problems in 1 file

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_css_object_entries() -> Result<()> {
    let test = CliTest::with_file(
        "src/box.ts",
        "const box = { width: '100px', backgroundColor: 'rgb(0, 0, 0)' };\n",
    )?;

    assert_cmd_snapshot!(test.subcommand("css").args(["--files", "src/box.ts"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: ": '100px'"  pixel_value
      --> src/box.ts:1:20
      |
    1 | const box = { width: '100px', backgroundColor: 'rgb(0, 0, 0)' };
      |                    ^
      = note: Direct size value assignment found.
      = hint: Move styles to CSS file and use className instead.

    error: "backgroundColor:"  camelcase_css_property
      --> src/box.ts:1:31
      |
    1 | const box = { width: '100px', backgroundColor: 'rgb(0, 0, 0)' };
      |                               ^
      = note: Camelcase CSS property found.
      = hint: Move styles to CSS file and use className instead.

    error: "rgb(0, 0, 0)"  rgb_color
      --> src/box.ts:1:49
      |
    1 | const box = { width: '100px', backgroundColor: 'rgb(0, 0, 0)' };
      |                                                 ^
      = note: RGB/RGBA color code found.
      = hint: Use CSS variables from stylesheet instead.


    ✘ 3 problems in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_css_clean_project() -> Result<()> {
    let test = CliTest::with_file("src/Clean.tsx", CLEAN)?;
    test.write_file(
        "src/Link.tsx",
        "<a href=\"#ffffff\">top</a>;\nconst bg = 'url(#ff0000)';\n",
    )?;

    assert_cmd_snapshot!(test.subcommand("css").args(["--directories", "src"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 2 source files - no embedded CSS found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_css_requires_targets() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    assert_cmd_snapshot!(test.subcommand("css"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: At least one of --directories or --files must be provided
    "#);

    Ok(())
}

#[test]
fn test_css_nonexistent_directory_is_an_error() -> Result<()> {
    let test = CliTest::new()?;

    assert_cmd_snapshot!(test.subcommand("css").args(["--directories", "nope"]), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Invalid path: nope. Must be an existing file or directory.
    "#);

    Ok(())
}

#[test]
fn test_css_missing_file_is_a_warning() -> Result<()> {
    let test = CliTest::with_file("src/Clean.tsx", CLEAN)?;

    assert_cmd_snapshot!(test.subcommand("css").args([
        "--files",
        "src/Clean.tsx",
        "src/Gone.tsx",
    ]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no embedded CSS found

    ----- stderr -----
    warning: File not found: src/Gone.tsx
    "#);

    Ok(())
}

#[test]
fn test_css_exclusions() -> Result<()> {
    let test = CliTest::with_file("src/Clean.tsx", CLEAN)?;
    test.write_file("src/legacy/deep/Old.tsx", APP)?;
    test.write_file("src/Skip.tsx", APP)?;
    test.write_file("src/App.test.tsx", APP)?;

    assert_cmd_snapshot!(test.subcommand("css").args([
        "--directories",
        "src",
        "--exclude_directories",
        "src/legacy",
        "--exclude-files",
        "src/Skip.tsx",
    ]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no embedded CSS found

    ----- stderr -----
    "#);

    // Explicit files bypass directory exclusions but not file exclusions.
    assert_cmd_snapshot!(test.subcommand("css").args([
        "--files",
        "src/legacy/deep/Old.tsx",
        "src/Skip.tsx",
        "--exclude_directories",
        "src/legacy",
        "--exclude_files",
        "src/Skip.tsx",
    ]), @r##"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "#ff0000"  hex_color
      --> src/legacy/deep/Old.tsx:4:32
      |
    4 |   return <div style={{ color: '#ff0000' }}>Hi</div>;
      |                                ^
      = note: Hex color code found.
      = hint: Use CSS variables from stylesheet instead.


    ✘ 1 problem in 1 file

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_css_config_ignores() -> Result<()> {
    let test = CliTest::with_file("src/Clean.tsx", CLEAN)?;
    test.write_file("src/generated/deep/App.tsx", APP)?;
    test.write_file("src/legacy/Old.tsx", APP)?;
    test.write_file(
        ".gatecheckrc.json",
        r#"{ "ignores": ["src/generated/**", "src/legacy"] }"#,
    )?;

    assert_cmd_snapshot!(test.subcommand("css").args(["--directories", "src"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no embedded CSS found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_css_allowed_patterns() -> Result<()> {
    let test = CliTest::with_file(
        "src/theme.ts",
        "const theme = { primary: '#ff0000', border: '#000' };\n",
    )?;

    assert_cmd_snapshot!(test.subcommand("css").args([
        "--files",
        "src/theme.ts",
        "--allowed_css_patterns",
        "^#ff0000$",
    ]), @r##"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "#000"  hex_color
      --> src/theme.ts:1:46
      |
    1 | const theme = { primary: '#ff0000', border: '#000' };
      |                                              ^
      = note: Hex color code found.
      = hint: Use CSS variables from stylesheet instead.


    ✘ 1 problem in 1 file

    ----- stderr -----
    "##);

    insta::with_settings!({filters => vec![(r"(?s)regex parse error:.*", "[REGEX ERROR]")]}, {
        assert_cmd_snapshot!(test.subcommand("css").args([
            "--files",
            "src/theme.ts",
            "--allowed-css-patterns",
            "(",
        ]), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Invalid allowed CSS pattern: "(": [REGEX ERROR]
        "#);
    });

    Ok(())
}

#[test]
fn test_css_uses_config_directories() -> Result<()> {
    let test = CliTest::with_file("web/App.tsx", APP)?;
    test.write_file(
        ".gatecheckrc.json",
        r#"{ "css": { "directories": ["web"], "allowedCssPatterns": ["^style"] } }"#,
    )?;

    assert_cmd_snapshot!(test.subcommand("css"), @r##"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "#ff0000"  hex_color
      --> web/App.tsx:4:32
      |
    4 |   return <div style={{ color: '#ff0000' }}>Hi</div>;
      |                                ^
      = note: Hex color code found.
      = hint: Use CSS variables from stylesheet instead.


    ✘ 1 problem in 1 file

    ----- stderr -----
    "##);

    Ok(())
}

#[test]
fn test_css_invalid_config_file() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;
    test.write_file(".gatecheckrc.json", "")?;

    insta::with_settings!({filters => test.filters()}, {
        assert_cmd_snapshot!(test.subcommand("css").args(["--directories", "src"]), @r#"
        success: false
        exit_code: 2
        ----- stdout -----

        ----- stderr -----
        Error: Failed to parse config file: "[TEMP]/.gatecheckrc.json": EOF while parsing a value at line 1 column 0
        "#);
    });

    Ok(())
}

#[test]
fn test_css_output_is_deterministic() -> Result<()> {
    let test = CliTest::with_file("src/b/App.tsx", APP)?;
    test.write_file("src/a/App.tsx", APP)?;
    test.write_file(
        "src/c.ts",
        "const box = { width: '100px', backgroundColor: 'rgb(0, 0, 0)' };\n",
    )?;

    let first = test.subcommand("css").args(["--directories", "src"]).output()?;
    let second = test.subcommand("css").args(["--directories", "src"]).output()?;
    assert_eq!(first.stdout, second.stdout);

    let stdout = String::from_utf8_lossy(&first.stdout);
    let a = stdout.find("src/a/App.tsx:4:15").unwrap();
    let b = stdout.find("src/b/App.tsx:4:15").unwrap();
    let c = stdout.find("src/c.ts:1:20").unwrap();
    assert!(a < b && b < c, "stdout: {}", stdout);

    Ok(())
}

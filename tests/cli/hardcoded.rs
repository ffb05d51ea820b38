use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

const APP: &str = r#"export const App = () => (
  <div>
    <h1>Welcome back</h1>
    <input placeholder="Search" />
    <p>{t('home.intro')}</p>
  </div>
);
"#;

#[test]
fn test_hardcoded_reports_text_and_attributes() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    assert_cmd_snapshot!(test.subcommand("hardcoded"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Welcome back"  hardcoded
      --> src/App.tsx:3:9
      |
    3 |     <h1>Welcome back</h1>
      |         ^
      = note: hardcoded JSX text
      = hint: Wrap the text with t() and add it to the locale files.

    error: "Search"  hardcoded
      --> src/App.tsx:4:25
      |
    4 |     <input placeholder="Search" />
      |                         ^
      = note: hardcoded `placeholder` attribute
      = hint: Wrap the text with t() and add it to the locale files.


    ✘ 2 problems in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_hardcoded_template_literal() -> Result<()> {
    let test = CliTest::with_file(
        "src/Greeting.tsx",
        r#"export function Greeting({ name }) {
  return <p>{`Hello ${name}`}</p>;
}
"#,
    )?;

    assert_cmd_snapshot!(test.subcommand("hardcoded"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Hello ${name}"  hardcoded
      --> src/Greeting.tsx:2:15
      |
    2 |   return <p>{`Hello ${name}`}</p>;
      |               ^
      = note: hardcoded template literal
      = hint: Wrap the text with t() and add it to the locale files.


    ✘ 1 problem in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_hardcoded_diff_restricts_lines() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;
    test.write_file(
        "changes.diff",
        r#"diff --git a/src/App.tsx b/src/App.tsx
--- a/src/App.tsx
+++ b/src/App.tsx
@@ -3,1 +3,2 @@
     <h1>Welcome back</h1>
+    <input placeholder="Search" />
"#,
    )?;

    assert_cmd_snapshot!(test.subcommand("hardcoded").args(["--diff", "changes.diff"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "Search"  hardcoded
      --> src/App.tsx:4:25
      |
    4 |     <input placeholder="Search" />
      |                         ^
      = note: hardcoded `placeholder` attribute
      = hint: Wrap the text with t() and add it to the locale files.


    ✘ 1 problem in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_hardcoded_diff_counts_only_touched_files() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;
    test.write_file("src/Other.tsx", "export const other = 1;\nexport const more = 2;\n")?;
    test.write_file(
        "changes.diff",
        r#"diff --git a/src/Other.tsx b/src/Other.tsx
--- a/src/Other.tsx
+++ b/src/Other.tsx
@@ -1,0 +2 @@
+export const more = 2;
"#,
    )?;

    assert_cmd_snapshot!(test.subcommand("hardcoded").args(["--diff", "changes.diff"]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no hardcoded text found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_hardcoded_diff_sources_conflict() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", APP)?;

    let output = test
        .subcommand("hardcoded")
        .args(["--staged", "--base", "main", "--head", "HEAD"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    let output = test
        .subcommand("hardcoded")
        .args(["--base", "main"])
        .output()?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}

#[test]
fn test_hardcoded_ignore_comments_and_config() -> Result<()> {
    let test = CliTest::with_file(
        "src/App.tsx",
        r#"export const App = () => (
  <div>
    <h1>Welcome back</h1>
    {/* i18n-ignore-next-line */}
    <input placeholder="Search" />
  </div>
);
"#,
    )?;
    test.write_file(
        ".gatecheckrc.json",
        r#"{ "hardcoded": { "ignoreTexts": ["Welcome back"] } }"#,
    )?;

    assert_cmd_snapshot!(test.subcommand("hardcoded"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no hardcoded text found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_hardcoded_skips_test_files() -> Result<()> {
    let test = CliTest::with_file("src/App.test.tsx", APP)?;
    test.write_file("src/__tests__/Page.tsx", APP)?;
    test.write_file("src/ok.ts", "export const ok = 1;\n")?;

    assert_cmd_snapshot!(test.subcommand("hardcoded"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no hardcoded text found

    ----- stderr -----
    "#);

    Ok(())
}

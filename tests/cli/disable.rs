use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

#[test]
fn test_disable_reports_directives_and_modifiers() -> Result<()> {
    let test = CliTest::with_file(
        "src/utils.ts",
        "const a = 1; // eslint-disable-line\n// @ts-ignore\nexport const b: number = 'x';\n",
    )?;
    test.write_file(
        "src/__tests__/utils.test.ts",
        "describe('utils', () => {\n  it.only('works', () => {});\n  // it.skip('commented', () => {});\n});\n",
    )?;

    assert_cmd_snapshot!(test.subcommand("disable"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "it.only"  focused_test
      --> src/__tests__/utils.test.ts:2:3
      |
    2 |   it.only('works', () => {});
      |   ^
      = note: Test is focused; other tests will not run.
      = hint: Remove the test modifier.

    error: "eslint-disable-line"  eslint_disable
      --> src/utils.ts:1:17
      |
    1 | const a = 1; // eslint-disable-line
      |                 ^
      = note: ESLint rule disabled.
      = hint: Fix the underlying issue instead of suppressing it.

    error: "@ts-ignore"  ts_directive
      --> src/utils.ts:2:4
      |
    2 | // @ts-ignore
      |    ^
      = note: TypeScript checking suppressed.
      = hint: Fix the underlying issue instead of suppressing it.


    ✘ 3 problems in 2 files

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_disable_check_subset() -> Result<()> {
    let test = CliTest::with_file(
        "src/utils.ts",
        "// eslint-disable-next-line\nxit('pending', () => {});\n",
    )?;

    assert_cmd_snapshot!(test.subcommand("disable").args(["--checks", "skip"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "xit"  skipped_test
      --> src/utils.ts:2:1
      |
    2 | xit('pending', () => {});
      | ^
      = note: Test is skipped.
      = hint: Remove the test modifier.


    ✘ 1 problem in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_disable_clean() -> Result<()> {
    let test = CliTest::with_file("src/utils.ts", "export const fixit = () => 1;\n")?;

    assert_cmd_snapshot!(test.subcommand("disable"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file - no disable statements found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_disable_invalid_check_is_a_usage_error() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.subcommand("disable").args(["--checks", "nope"]).output()?;
    assert_eq!(output.status.code(), Some(2));

    Ok(())
}

use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;

use crate::CliTest;

fn project() -> Result<CliTest> {
    let test = CliTest::with_file(
        "public/locales/en/common.json",
        "{\n  \"a\": {\n    \"b\": \"hello\",\n    \"c\": \"world\"\n  },\n  \"items_one\": \"{{count}} item\",\n  \"items_other\": \"{{count}} items\"\n}\n",
    )?;
    test.write_file("public/locales/fr/common.json", r#"{"a": {"b": "bonjour"}}"#)?;
    Ok(test)
}

#[test]
fn test_keys_all_present() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/App.tsx",
        "const { t } = useTranslation('common');\nt('a.b');\nt('items', { count });\n",
    )?;

    assert_cmd_snapshot!(test.subcommand("keys"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file, 1 locale file - no missing keys found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_keys_missing_key() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/App.tsx",
        "const { t } = useTranslation('common');\nt('a.b');\nt('a.d');\n",
    )?;

    assert_cmd_snapshot!(test.subcommand("keys"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "a.d"  missing-key
      --> src/App.tsx:3:1
      |
    3 | t('a.d');
      | ^
      = note: not found in namespace "common"
      = hint: Add the key to the locale file or fix the typo.


    ✘ 1 problem in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_keys_prefix_and_trans_component() -> Result<()> {
    let test = project()?;
    test.write_file(
        "src/Home.tsx",
        r#"const { t } = useTranslation('common', { keyPrefix: 'a' });
export const Home = () => (
  <>
    <h1>{t('b')}</h1>
    <Trans i18nKey="a.x" />
  </>
);
"#,
    )?;

    assert_cmd_snapshot!(test.subcommand("keys").args(["--files", "src/Home.tsx"]), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "a.x"  missing-key
      --> src/Home.tsx:5:21
      |
    5 |     <Trans i18nKey="a.x" />
      |                     ^
      = note: not found in any namespace
      = hint: Add the key to the locale file or fix the typo.


    ✘ 1 problem in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_keys_compare_locales() -> Result<()> {
    let test = project()?;
    test.write_file("src/App.tsx", "t('a.b');\n")?;

    assert_cmd_snapshot!(test.subcommand("keys").arg("--compare-locales"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "a.c"  missing-translation
      --> public/locales/en/common.json:4:5
      |
    4 |     "c": "world"
      |     ^
      = note: missing in fr (common.json)

    error: "items_one"  missing-translation
      --> public/locales/en/common.json:6:3
      |
    6 |   "items_one": "{{count}} item",
      |   ^
      = note: missing in fr (common.json)

    error: "items_other"  missing-translation
      --> public/locales/en/common.json:7:3
      |
    7 |   "items_other": "{{count}} items"
      |   ^
      = note: missing in fr (common.json)


    ✘ 3 problems in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_keys_compare_locales_missing_namespace_file() -> Result<()> {
    let test = CliTest::with_file("public/locales/en/errors.json", r#"{"notFound": "Not found"}"#)?;
    test.write_file("public/locales/fr/common.json", "{}")?;
    test.write_file("src/App.tsx", "export const app = 1;\n")?;

    assert_cmd_snapshot!(test.subcommand("keys").arg("--compare_locales"), @r#"
    success: false
    exit_code: 1
    ----- stdout -----
    error: "notFound"  missing-translation
      --> public/locales/en/errors.json:1:2
      |
    1 | {"notFound": "Not found"}
      |  ^
      = note: missing in fr (errors.json)


    ✘ 1 problem in 1 file

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_keys_custom_locale_root() -> Result<()> {
    let test = CliTest::with_file("i18n/de/app.json", r#"{"title": "Titel"}"#)?;
    test.write_file("src/App.tsx", "t('title');\n")?;

    assert_cmd_snapshot!(test.subcommand("keys").args([
        "--locales_root",
        "i18n",
        "--primary-locale",
        "de",
    ]), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file, 1 locale file - no missing keys found

    ----- stderr -----
    "#);

    Ok(())
}

#[test]
fn test_keys_missing_locale_directory() -> Result<()> {
    let test = CliTest::with_file("src/App.tsx", "t('a');\n")?;

    assert_cmd_snapshot!(test.subcommand("keys"), @r#"
    success: false
    exit_code: 2
    ----- stdout -----

    ----- stderr -----
    Error: Locale directory not found: public/locales/en
    "#);

    Ok(())
}

#[test]
fn test_keys_verbose_reports_dynamic_keys() -> Result<()> {
    let test = project()?;
    test.write_file("src/App.tsx", "t(`a.${name}`);\n")?;

    assert_cmd_snapshot!(test.subcommand("keys").arg("-v"), @r#"
    success: true
    exit_code: 0
    ----- stdout -----
    ✓ Checked 1 source file, 1 locale file - no missing keys found

    ----- stderr -----
    No config file found, using defaults
    Collected 1 file(s)
    skip: src/App.tsx:1:1 dynamic key `a.${name}` cannot be checked
    Checked 0 key(s) against locale "en"
    "#);

    Ok(())
}

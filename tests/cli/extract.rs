use anyhow::Result;
use insta_cmd::assert_cmd_snapshot;
use pretty_assertions::assert_eq;
use serde_json::Value;

use crate::{CliTest, stderr, stdout};

const STRINGS_JS: &str = r#"/* Resource strings */
foo({
    "greeting": "Hello", // shown on the home page
    'code': "skipped",
    "octal": "foo\101bar"
});
"#;

const INDEX_PHP: &str = r#"<?php $title = "Home"; ?>
<div>
    <!-- main heading -->
    <h1>Welcome</h1>
    <p lang="">&copy; 2024 ACME</p>
    <img src="logo.png" alt="Company logo" title="Home" />
    <ul>
        <li><a lang="en" href="/docs">Read the docs</a></li>
    </ul>
</div>
"#;

#[test]
fn test_extract_literal_table() -> Result<()> {
    let test = CliTest::with_file("locale/strings.js", STRINGS_JS)?;

    assert_cmd_snapshot!(test.extract_command());

    Ok(())
}

#[test]
fn test_extract_markup_page() -> Result<()> {
    let test = CliTest::with_file("www/index.php", INDEX_PHP)?;

    assert_cmd_snapshot!(test.extract_command());

    Ok(())
}

#[test]
fn test_extract_empty_project() -> Result<()> {
    let test = CliTest::with_file("README.md", "# nothing to extract")?;

    assert_cmd_snapshot!(test.extract_command());

    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let test = CliTest::with_file("www/index.php", INDEX_PHP)?;

    let output = test.extract_command().arg("--format").arg("json").output()?;
    assert_eq!(output.status.code(), Some(0));

    let report: Value = serde_json::from_str(&stdout(&output))?;
    let records = report["records"].as_array().unwrap();
    let rows: Vec<(&str, &str)> = records
        .iter()
        .map(|r| {
            (
                r["kind"]["type"].as_str().unwrap(),
                r["value"].as_str().unwrap(),
            )
        })
        .collect();
    assert_eq!(
        rows,
        vec![
            ("serverString", "Home"),
            ("textNode", "Welcome"),
            ("attribute", "Company logo"),
            ("attribute", "Home"),
            ("textNode", "Read the docs"),
        ]
    );
    assert_eq!(records[1]["hint"], "main heading");
    assert_eq!(records[1]["location"]["filePath"], "www/index.php");
    assert_eq!(records[1]["location"]["line"], 4);
    assert_eq!(records[2]["kind"]["name"], "alt");
    assert!(records[1].get("key").is_none());
    assert_eq!(report["errors"], Value::Array(Vec::new()));
    assert_eq!(report["summary"]["filesProcessed"], 1);
    assert_eq!(report["summary"]["recordCount"], 5);

    Ok(())
}

#[test]
fn test_parse_failure_does_not_stop_other_files() -> Result<()> {
    let test = CliTest::with_file("a.html", "<h2>Fine</h2>")?;
    test.write_file("b.html", "<div>\n<span>oops</div>")?;
    test.write_file("c.go", "var m = map[string]string{\"k\": \"v\"}")?;

    assert_cmd_snapshot!(test.extract_command());

    Ok(())
}

#[test]
fn test_scope_attribute_override() -> Result<()> {
    let test = CliTest::with_file(
        "page.html",
        r#"<p data-l10n="">Hidden</p><p>Shown</p><span data-l10n="yes">Marked</span>"#,
    )?;

    assert_cmd_snapshot!(
        test.extract_command()
            .arg("--scope-attribute")
            .arg("data-l10n")
    );

    Ok(())
}

#[test]
fn test_config_file_controls_scan() -> Result<()> {
    let test = CliTest::with_file(
        ".locscanrc.json",
        r#"{
            "ignores": ["**/vendor/**"],
            "markupExtensions": ["tpl"],
            "tagPolicy": { "defaultOn": ["td"] }
        }"#,
    )?;
    test.write_file(
        "views/table.tpl",
        "<table><tr><td>Cell</td></tr></table><h1>Off</h1>",
    )?;
    test.write_file("views/ignored.html", "<h1>Not scanned</h1>")?;
    test.write_file("vendor/lib.tpl", "<td>Vendored</td>")?;

    assert_cmd_snapshot!(test.extract_command());

    Ok(())
}

#[test]
fn test_source_root_argument() -> Result<()> {
    let test = CliTest::with_file("site/index.html", "<h3>Nested</h3>")?;

    let output = test
        .extract_command()
        .arg("--source-root")
        .arg(test.root().join("site"))
        .output()?;
    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        stdout(&output),
        "text: \"Nested\"\n  --> index.html:1\n\n✓ Extracted 1 record from 1 file\n"
    );

    Ok(())
}

#[test]
fn test_invalid_config_is_an_error() -> Result<()> {
    let test = CliTest::with_file(".locscanrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let output = test.extract_command().output()?;
    assert_eq!(output.status.code(), Some(2));
    assert!(stdout(&output).is_empty());
    assert!(stderr(&output).contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_no_command_prints_help() -> Result<()> {
    let test = CliTest::new()?;

    let output = test.command().output()?;
    assert_eq!(output.status.code(), Some(0));
    assert!(stdout(&output).contains("extract"));
    assert!(stdout(&output).contains("init"));

    Ok(())
}

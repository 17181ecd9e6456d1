use anyhow::Result;
use insta::assert_snapshot;

use crate::{CliTest, run};

#[test]
fn test_clean_bundles() -> Result<()> {
    let test = CliTest::with_bundle("messages", "greeting = Hello %s\ncount = %d items")?;
    test.write_bundle("com.example.errors", "errors.notFound = Not found: %s")?;

    let out = run(&mut test.check_command())?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_snapshot!(out.stdout, @"✓ Checked 2 bundles, 3 entries - no issues found");

    Ok(())
}

#[test]
fn test_pattern_syntax_error() -> Result<()> {
    let test = CliTest::with_bundle("messages", "greeting = Hello {0}\nbroken = Hello {0")?;

    let out = run(test.check_command().args(["--format-style", "pattern"]))?;

    assert_eq!(out.code, Some(1));
    assert_snapshot!(out.stdout, @r#"
    error: "broken"  pattern-syntax
      --> ./src/main/resources/messages.properties:2
      = note: unmatched braces in the pattern (argument opened at offset 6) ("Hello {0")
      = hint: quote literal braces with single quotes, e.g. '{'

    ✘ 1 problem (1 error, 0 warnings)
    "#);

    Ok(())
}

#[test]
fn test_conversion_style_accepts_braces() -> Result<()> {
    let test = CliTest::with_bundle("messages", "broken = Hello {0")?;

    let out = run(&mut test.check_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("no issues found"));

    Ok(())
}

#[test]
fn test_format_style_from_config() -> Result<()> {
    let test = CliTest::with_bundle("messages", "bad = {name}")?;
    test.write_file(".bundlegenrc.json", r#"{ "formatStyle": "pattern" }"#)?;

    let out = run(&mut test.check_command())?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("can't parse argument number: \"name\""));

    // CLI flag wins over the config file
    let out = run(test.check_command().args(["--format-style", "conversion"]))?;
    assert_eq!(out.code, Some(0));

    Ok(())
}

#[test]
fn test_key_warnings_do_not_fail() -> Result<()> {
    let test = CliTest::with_bundle("messages", "= orphan\nmenu..open = Open\nok = fine")?;

    let out = run(&mut test.check_command())?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("warning: \"entry has an empty key\"  empty-key"));
    assert!(out.stdout.contains("warning: \"menu..open\"  empty-segment"));
    assert!(out.stdout.contains("--> ./src/main/resources/messages.properties:2"));
    assert!(out.stdout.contains("2 problems (0 errors, 2 warnings)"));

    Ok(())
}

#[test]
fn test_named_bundles_only() -> Result<()> {
    let test = CliTest::with_bundle("messages", "ok = {0}")?;
    test.write_bundle("other", "bad = {0")?;

    let out = run(
        test.check_command()
            .args(["messages", "--format-style", "pattern"]),
    )?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("Checked 1 bundle, 1 entry"));

    Ok(())
}

#[test]
fn test_missing_named_bundle() -> Result<()> {
    let test = CliTest::with_bundle("messages", "ok = %s")?;

    let out = run(test.check_command().arg("com.example.missing"))?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("parse-error"));
    assert!(
        out.stdout
            .contains("--> ./src/main/resources/com/example/missing.properties")
    );
    assert!(out.stderr.contains("1 bundle(s) could not be parsed"));

    Ok(())
}

#[test]
fn test_malformed_bundle_reports_line() -> Result<()> {
    let test = CliTest::with_bundle("messages", "ok = 1\nbad = \\u00G1")?;

    let out = run(test.check_command().arg("-v"))?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("Invalid value on line 2"));
    // Verbose mode prints details instead of the summary warning
    assert!(!out.stderr.contains("could not be parsed"));
    assert!(out.stderr.contains("Note: No .bundlegenrc.json found"));

    Ok(())
}

#[test]
fn test_missing_source_root() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(&mut test.check_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Error: Source root does not exist"));

    Ok(())
}

#[test]
fn test_source_root_override() -> Result<()> {
    let test = CliTest::new()?;
    test.write_file("i18n/app/labels.properties", "title = %s")?;

    let out = run(test.check_command().args(["--source-root", "i18n"]))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("Checked 1 bundle, 1 entry"));

    Ok(())
}

#[test]
fn test_config_ignores() -> Result<()> {
    let test = CliTest::with_bundle("messages", "ok = {0}")?;
    test.write_bundle("generated.cache", "bad = {0")?;
    test.write_file(
        ".bundlegenrc.json",
        r#"{
         "ignores": ["generated/**"],
         "formatStyle": "pattern"
     }"#,
    )?;

    let out = run(&mut test.check_command())?;

    assert_eq!(out.code, Some(0), "stdout: {}", out.stdout);
    assert!(out.stdout.contains("Checked 1 bundle"));

    Ok(())
}

#[test]
fn test_invalid_config() -> Result<()> {
    let test = CliTest::with_bundle("messages", "ok = 1")?;
    test.write_file(".bundlegenrc.json", r#"{ "ignores": ["[invalid"] }"#)?;

    let out = run(&mut test.check_command())?;

    assert_eq!(out.code, Some(2));
    assert!(out.stderr.contains("Invalid glob pattern in 'ignores'"));

    Ok(())
}

#[test]
fn test_latin1_encoding() -> Result<()> {
    let test = CliTest::new()?;
    let path = test
        .root()
        .join("src/main/resources/messages.properties");
    std::fs::create_dir_all(path.parent().unwrap())?;
    std::fs::write(&path, b"caf\xe9 = {0")?;

    let out = run(test.check_command().args(["--encoding", "iso-8859-1"]))?;
    assert_eq!(out.code, Some(0));

    let out = run(&mut test.check_command())?;
    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("not valid UTF-8"));

    Ok(())
}

#[test]
fn test_help() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command().arg("--help"))?;

    assert_eq!(out.code, Some(0));
    for command in ["check", "tree", "init"] {
        assert!(out.stdout.contains(command), "missing {}", command);
    }

    Ok(())
}

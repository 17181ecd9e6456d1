use anyhow::{Context, Result};
use serde_json::{Value, json};

use crate::{CliTest, run};

#[test]
fn test_init_creates_config() -> Result<()> {
    let test = CliTest::new()?;

    let out = run(test.command().arg("init"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(out.stdout.contains("✓ Created .bundlegenrc.json"));

    let content = test.read_file(".bundlegenrc.json")?;
    let parsed: Value = serde_json::from_str(&content).context("Config should be valid JSON")?;
    assert_eq!(
        parsed,
        json!({
            "sourceRoot": "./src/main/resources",
            "ignores": [],
            "formatStyle": "conversion",
            "encoding": "utf-8"
        })
    );
    assert!(
        content.contains("\n  \"sourceRoot\""),
        "Config should use 2-space indentation"
    );

    Ok(())
}

#[test]
fn test_init_refuses_to_overwrite() -> Result<()> {
    let test = CliTest::new()?;
    let existing = r#"{ "formatStyle": "pattern" }"#;
    test.write_file(".bundlegenrc.json", existing)?;

    let out = run(test.command().arg("init"))?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.is_empty());
    assert!(
        out.stderr
            .contains("Error: .bundlegenrc.json already exists")
    );
    assert_eq!(test.read_file(".bundlegenrc.json")?, existing);

    Ok(())
}

#[test]
fn test_init_config_is_usable() -> Result<()> {
    let test = CliTest::with_bundle("messages", "greeting = Hello %s")?;

    let out = run(test.command().arg("init"))?;
    assert_eq!(out.code, Some(0));

    let out = run(test.check_command().arg("-v"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert!(!out.stderr.contains("No .bundlegenrc.json found"));
    assert!(out.stdout.contains("Checked 1 bundle, 1 entry"));

    Ok(())
}

use anyhow::Result;
use insta::assert_snapshot;
use serde_json::{Value, json};

use crate::{CliTest, run};

#[test]
fn test_tree_text() -> Result<()> {
    let test = CliTest::new()?;
    test.write_bundle(
        "com.example.messages",
        "title = Welcome %s\nbutton.ok = OK\nbutton.cancel = Cancel",
    )?;

    let out = run(&mut test.tree_command("com.example.messages"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    assert_snapshot!(out.stdout, @r#"
    com.example.messages  ./src/main/resources/com/example/messages.properties
    ├── title(any)    "Welcome %s"
    └── button
        ├── ok()      "OK"
        └── cancel()  "Cancel"
    "#);

    Ok(())
}

#[test]
fn test_tree_reports_failed_leaves() -> Result<()> {
    let test = CliTest::with_bundle("messages", "ok = {0,number}\nbad = {0")?;

    let out = run(test.tree_command("messages").args(["--format-style", "pattern"]))?;

    assert_eq!(out.code, Some(1));
    assert!(out.stdout.contains("├── ok(any)"));
    assert!(out.stdout.contains("└── bad"));
    assert!(out.stdout.contains("✘ unmatched braces in the pattern"));
    assert!(out.stdout.contains("error: \"bad\"  pattern-syntax"));

    Ok(())
}

#[test]
fn test_tree_json() -> Result<()> {
    let test = CliTest::with_bundle("messages", "user.name = %s\nuser.age = %d years")?;

    let out = run(test.tree_command("messages").arg("--json"))?;

    assert_eq!(out.code, Some(0), "stderr: {}", out.stderr);
    let output: Value = serde_json::from_str(&out.stdout)?;

    assert_eq!(output["bundle"], "messages");
    assert_eq!(
        output["file"],
        "./src/main/resources/messages.properties"
    );

    let user = &output["tree"]["children"][0];
    assert_eq!(user["name"], "user");
    assert_eq!(user["leaf"], false);
    assert_eq!(user["children"][1]["path"], "user.age");
    assert_eq!(user["children"][1]["value"], "%d years");

    assert_eq!(
        output["signatures"],
        json!([
            { "path": "user.name", "arguments": [["universal"]], "preferredKinds": ["universal"] },
            { "path": "user.age", "arguments": [["integer"]], "preferredKinds": ["integer"] },
        ])
    );

    Ok(())
}

#[test]
fn test_tree_missing_bundle() -> Result<()> {
    let test = CliTest::with_bundle("messages", "ok = 1")?;

    let out = run(&mut test.tree_command("com.example.missing"))?;

    assert_eq!(out.code, Some(2));
    assert!(out.stdout.is_empty());
    assert!(out.stderr.contains("Error: Failed to read bundle file"));

    Ok(())
}

#[test]
fn test_tree_empty_bundle() -> Result<()> {
    let test = CliTest::with_bundle("messages", "# only comments\n! and more")?;

    let out = run(&mut test.tree_command("messages"))?;

    assert_eq!(out.code, Some(0));
    assert!(out.stdout.contains("(no entries)"));

    Ok(())
}

use crate::common::command::{hello_workspace_dir, lcsdiff_diff};
use crate::common::stdout_of;
use assert_fs::TempDir;
use rstest::rstest;
use serde_json::{Value, json};

#[rstest]
fn show_json_diff(hello_workspace_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let actual_output = lcsdiff_diff(hello_workspace_dir.path(), &["--format", "json"])
        .assert()
        .success();
    let actual: Value = serde_json::from_str(&stdout_of(&actual_output)?)?;

    let expected = json!({
        "quitEarly": false,
        "changes": [{
            "originalStartLineNumber": 2,
            "originalEndLineNumber": 2,
            "modifiedStartLineNumber": 2,
            "modifiedEndLineNumber": 2,
            "charChanges": [{
                "originalStartLineNumber": 2,
                "originalStartColumn": 16,
                "originalEndLineNumber": 2,
                "originalEndColumn": 17,
                "modifiedStartLineNumber": 2,
                "modifiedStartColumn": 16,
                "modifiedEndLineNumber": 2,
                "modifiedEndColumn": 17
            }]
        }]
    });

    pretty_assertions::assert_eq!(actual, expected);

    Ok(())
}

#[rstest]
fn json_omits_char_changes_when_disabled(
    hello_workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let actual_output = lcsdiff_diff(
        hello_workspace_dir.path(),
        &["--format", "json", "--no-char-changes"],
    )
    .assert()
    .success();
    let actual: Value = serde_json::from_str(&stdout_of(&actual_output)?)?;

    assert!(actual["changes"][0].get("charChanges").is_none());

    Ok(())
}

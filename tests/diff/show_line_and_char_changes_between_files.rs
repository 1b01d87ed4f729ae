use crate::common::command::{hello_workspace_dir, lcsdiff_diff};
use crate::common::stdout_of;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn show_line_and_char_changes_between_files(
    hello_workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let expected_output = "@@ -2,1 +2,1 @@\n-    println!(\"hello\");\n+    println!(\"hullo\");\n~ 2:16-2:17 => 2:16-2:17\n";

    let actual_output = lcsdiff_diff(hello_workspace_dir.path(), &[]).assert().success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, expected_output);

    Ok(())
}

#[rstest]
fn show_only_line_changes_when_char_changes_are_disabled(
    hello_workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let expected_output = "@@ -2,1 +2,1 @@\n-    println!(\"hello\");\n+    println!(\"hullo\");\n";

    let actual_output = lcsdiff_diff(hello_workspace_dir.path(), &["--no-char-changes"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, expected_output);

    Ok(())
}

use crate::common::command::{lcsdiff_diff, workspace_dir, write_pair};
use crate::common::stdout_of;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn show_timed_out_note(workspace_dir: TempDir) -> Result<(), Box<dyn std::error::Error>> {
    let original = (0..20000).map(|i| format!("line {i}\n")).collect::<String>();
    write_pair(workspace_dir.path(), &original, "line 0\nother\nline 19999\n");

    let actual_output = lcsdiff_diff(workspace_dir.path(), &["--max-computation-time", "1"])
        .assert()
        .success();
    let stdout = stdout_of(&actual_output)?;

    assert!(stdout.starts_with("@@ -2,"));
    assert!(stdout.ends_with("(diff computation timed out; result is approximate)\n"));

    Ok(())
}

use crate::common::command::{lcsdiff_diff, workspace_dir, write_pair};
use crate::common::file::{FileSpec, write_file};
use crate::common::stdout_of;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
fn trailing_whitespace_is_ignored_by_default(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_pair(workspace_dir.path(), "foo\nbar\n", "foo\nbar \n");

    let actual_output = lcsdiff_diff(workspace_dir.path(), &[]).assert().success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, "");

    Ok(())
}

#[rstest]
fn trailing_whitespace_is_reported_when_kept(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_pair(workspace_dir.path(), "foo\nbar\n", "foo\nbar \n");
    let expected_output = "@@ -2,1 +2,1 @@\n-bar\n+bar \n~ 2:4-2:4 => 2:4-2:5\n";

    let actual_output = lcsdiff_diff(workspace_dir.path(), &["--keep-trim-whitespace"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, expected_output);

    Ok(())
}

#[rstest]
fn config_file_can_make_whitespace_significant(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    write_pair(workspace_dir.path(), "foo\nbar\n", "foo\nbar \n");
    write_file(FileSpec::new(
        workspace_dir.path().join("options.json"),
        r#"{ "ignoreTrimWhitespace": false, "computeCharChanges": false }"#.to_string(),
    ));

    let actual_output = lcsdiff_diff(workspace_dir.path(), &["--config", "options.json"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, "@@ -2,1 +2,1 @@\n-bar\n+bar \n");

    Ok(())
}

use crate::common::command::{run_lcsdiff_command, workspace_dir};
use crate::common::file::{FileSpec, write_file, write_generated_lines};
use crate::common::stdout_of;
use assert_fs::TempDir;
use fake::Fake;
use rstest::rstest;

#[rstest]
fn file_compared_with_itself_has_no_changes(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let lines_count = (1..=50).fake::<usize>();
    write_generated_lines(workspace_dir.path(), "a.txt", lines_count);

    let actual_output = run_lcsdiff_command(workspace_dir.path(), &["diff", "a.txt", "a.txt"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, "");

    Ok(())
}

#[rstest]
fn appended_line_is_reported_as_insertion(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let lines_count = (1..=50).fake::<usize>();
    let original = write_generated_lines(workspace_dir.path(), "a.txt", lines_count);
    write_file(FileSpec::new(
        workspace_dir.path().join("b.txt"),
        format!("{}\nappended", original.content),
    ));

    let expected_output = format!(
        "@@ -{lines_count},0 +{},1 @@\n+appended\n",
        lines_count + 1
    );
    let actual_output = run_lcsdiff_command(workspace_dir.path(), &["diff", "a.txt", "b.txt"])
        .assert()
        .success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, expected_output);

    Ok(())
}

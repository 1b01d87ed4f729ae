use crate::common::command::{lcsdiff_diff, workspace_dir, write_pair};
use crate::common::stdout_of;
use assert_fs::TempDir;
use rstest::rstest;

#[rstest]
#[case::insertion("a\nb\n", "a\nx\ny\nb\n", "@@ -1,0 +2,2 @@\n+x\n+y\n")]
#[case::deletion("a\nb\nc\n", "a\nc\n", "@@ -2,1 +1,0 @@\n-b\n")]
#[case::empty_original("", "a\nb", "@@ -1,1 +1,2 @@\n-\n+a\n+b\n")]
#[case::empty_modified("a\nb", "", "@@ -1,2 +1,1 @@\n-a\n-b\n+\n")]
#[case::identical("same\ntext\n", "same\ntext\n", "")]
#[case::both_empty("", "", "")]
fn show_inserted_and_deleted_lines(
    workspace_dir: TempDir,
    #[case] original: &str,
    #[case] modified: &str,
    #[case] expected_output: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    write_pair(workspace_dir.path(), original, modified);

    let actual_output = lcsdiff_diff(workspace_dir.path(), &[]).assert().success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, expected_output);

    Ok(())
}

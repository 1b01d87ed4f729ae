use crate::common::command::{run_lcsdiff_command, workspace_dir};
use crate::common::stdout_of;
use assert_fs::TempDir;
use predicates::prelude::predicate;
use rstest::rstest;

#[rstest]
#[case::two_substitutions("abcdef", "aXcYef", "1,1 -> 1,1\n3,1 -> 3,1\n")]
#[case::insertion_into_empty("", "abc", "0,0 -> 0,3\n")]
#[case::trailing_deletion("abcd", "ab", "2,2 -> 2,0\n")]
#[case::identical("same", "same", "")]
fn show_char_changes_between_strings(
    workspace_dir: TempDir,
    #[case] original: &str,
    #[case] modified: &str,
    #[case] expected_output: &str,
) -> Result<(), Box<dyn std::error::Error>> {
    let actual_output = run_lcsdiff_command(workspace_dir.path(), &["chars", original, modified])
        .assert()
        .success();

    pretty_assertions::assert_eq!(stdout_of(&actual_output)?, expected_output);

    Ok(())
}

#[rstest]
fn pretty_diff_moves_repeated_insertion_to_the_end(
    workspace_dir: TempDir,
) -> Result<(), Box<dyn std::error::Error>> {
    let pretty = run_lcsdiff_command(workspace_dir.path(), &["chars", "aa", "aaa"])
        .assert()
        .success();
    pretty_assertions::assert_eq!(stdout_of(&pretty)?, "2,0 -> 2,1\n");

    // without prettifying, the insertion may sit at any of the three positions
    run_lcsdiff_command(workspace_dir.path(), &["chars", "aa", "aaa", "--no-pretty"])
        .assert()
        .success()
        .stdout(predicate::str::is_match(r"^([0-2]),0 -> ([0-2]),1\n$")?);

    Ok(())
}

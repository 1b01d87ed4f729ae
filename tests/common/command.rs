use crate::common::file::{FileSpec, write_file};
use crate::common::redirect_temp_dir;
use assert_cmd::Command;
use assert_fs::TempDir;
use rstest::fixture;
use std::path::Path;

#[fixture]
pub fn workspace_dir() -> TempDir {
    redirect_temp_dir();
    TempDir::new().expect("Failed to create temp dir")
}

#[fixture]
pub fn hello_original() -> String {
    "fn main() {\n    println!(\"hello\");\n}\n".to_string()
}

#[fixture]
pub fn hello_modified() -> String {
    "fn main() {\n    println!(\"hullo\");\n}\n".to_string()
}

/// A workspace holding `a.txt` and `b.txt` with the hello program before and after an edit.
#[fixture]
pub fn hello_workspace_dir(
    workspace_dir: TempDir,
    hello_original: String,
    hello_modified: String,
) -> TempDir {
    write_pair(workspace_dir.path(), &hello_original, &hello_modified);
    workspace_dir
}

pub fn write_pair(dir: &Path, original: &str, modified: &str) {
    write_file(FileSpec::new(dir.join("a.txt"), original.to_string()));
    write_file(FileSpec::new(dir.join("b.txt"), modified.to_string()));
}

pub fn run_lcsdiff_command(dir: &Path, args: &[&str]) -> Command {
    let mut cmd = Command::cargo_bin("lcsdiff").expect("Failed to find lcsdiff binary");
    cmd.envs(vec![("NO_PAGER", "1"), ("NO_COLOR", "1")]);
    cmd.current_dir(dir);
    for arg in args {
        cmd.arg(arg);
    }
    cmd
}

pub fn lcsdiff_diff(dir: &Path, extra_args: &[&str]) -> Command {
    let mut args = vec!["diff", "a.txt", "b.txt"];
    args.extend_from_slice(extra_args);
    run_lcsdiff_command(dir, &args)
}

#![allow(dead_code)]

pub mod command;
pub mod file;

const TMPDIR: &str = "../playground";

pub fn redirect_temp_dir() {
    unsafe {
        std::env::set_var("TMPDIR", TMPDIR);
    }

    // Ensure the TMPDIR exists
    if !std::path::Path::new(TMPDIR).exists() {
        std::fs::create_dir_all(TMPDIR).expect("Failed to create TMPDIR");
    }
}

/// Read a command's stdout as text.
pub fn stdout_of(assert: &assert_cmd::assert::Assert) -> Result<String, Box<dyn std::error::Error>> {
    Ok(String::from_utf8(assert.get_output().stdout.clone())?)
}

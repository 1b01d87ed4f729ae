//! Command implementations
//!
//! Each command is an `impl Session` block writing its report to the session writer:
//!
//! - `diff`: Line diff of two files, with character changes
//! - `chars`: Character diff of two strings

pub mod chars;
pub mod diff;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

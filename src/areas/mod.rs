//! Runtime context of the command line tool
//!
//! - `session`: Output writer and diff options shared by the commands
//! - `workspace`: Reading input files and config from disk

pub mod session;
pub mod workspace;

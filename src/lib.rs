//! Longest-common-subsequence text diffing
//!
//! - `artifacts`: the O(ND) sequence diff engine and the line/char diff built on it
//! - `areas`: runtime context of the command line tool
//! - `commands`: the `diff` and `chars` commands

pub mod areas;
pub mod artifacts;
pub mod commands;

//! Generic sequence diffing
//!
//! - `sequence`: comparison keys and hashing of diffable inputs
//! - `change`: change records and results
//! - `lcs_diff`: the O(ND) longest-common-subsequence engine
//! - `prettify`: post-processing of change boundaries
//! - `continuation`: time-boxing of the search

pub mod change;
mod change_helper;
pub mod continuation;
pub mod lcs_diff;
mod prettify;
pub mod sequence;

pub use change::{DiffChange, DiffResult};
pub use continuation::{ContinueProcessing, Deadline};
pub use lcs_diff::{LcsDiff, string_diff};
pub use sequence::{Elements, Sequence, StringArraySequence, StringSequence, string_hash};

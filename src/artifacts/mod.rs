//! Diff data structures and algorithms
//!
//! - `core`: Shared utilities (pager wrapper, output selection)
//! - `diff`: The generic O(ND) sequence diff engine and its prettifier
//! - `lines`: Line diffing with character-level refinement

pub mod core;
pub mod diff;
pub mod lines;

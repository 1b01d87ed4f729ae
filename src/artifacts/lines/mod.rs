//! Line-oriented text diffing on top of the generic sequence engine

pub mod char_sequence;
pub mod diff_computer;
pub mod line_change;
pub mod line_sequence;
pub mod navigator;
pub mod options;

pub use diff_computer::DiffComputer;
pub use line_change::{CharChange, LineChange, LineDiffResult};
pub use navigator::ChangeNavigator;
pub use options::{DiffConfig, DiffFlags, DiffOptions};

use bitflags::bitflags;
use derive_new::new;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default wall-clock budget for a line diff, in milliseconds.
pub const DEFAULT_MAX_COMPUTATION_TIME: u64 = 5000;
/// Upper bound on the budget of the char-level refinement, in milliseconds.
pub const MAX_CHAR_COMPUTATION_TIME: u64 = 5000;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    pub struct DiffFlags: u8 {
        /// Refine small line changes into character changes.
        const COMPUTE_CHAR_CHANGES = 0b0001;
        /// Merge character changes separated by fewer than three matching characters.
        const POST_PROCESS_CHAR_CHANGES = 0b0010;
        /// Compare lines and characters without their leading and trailing whitespace.
        const IGNORE_TRIM_WHITESPACE = 0b0100;
        /// Slide change boundaries to more readable positions.
        const PRETTY_DIFF = 0b1000;
    }
}

impl Default for DiffFlags {
    fn default() -> Self {
        Self::all()
    }
}

/// Knobs for a line diff. `max_computation_time` is in milliseconds; zero means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct DiffOptions {
    pub flags: DiffFlags,
    pub max_computation_time: u64,
}

impl Default for DiffOptions {
    fn default() -> Self {
        Self::new(DiffFlags::default(), DEFAULT_MAX_COMPUTATION_TIME)
    }
}

impl DiffOptions {
    pub fn with_flag(mut self, flag: DiffFlags, enabled: bool) -> Self {
        self.flags.set(flag, enabled);
        self
    }

    pub fn with_max_computation_time(mut self, millis: u64) -> Self {
        self.max_computation_time = millis;
        self
    }

    pub fn should_compute_char_changes(&self) -> bool {
        self.flags.contains(DiffFlags::COMPUTE_CHAR_CHANGES)
    }

    pub fn should_post_process_char_changes(&self) -> bool {
        self.flags.contains(DiffFlags::POST_PROCESS_CHAR_CHANGES)
    }

    pub fn should_ignore_trim_whitespace(&self) -> bool {
        self.flags.contains(DiffFlags::IGNORE_TRIM_WHITESPACE)
    }

    pub fn should_make_pretty_diff(&self) -> bool {
        self.flags.contains(DiffFlags::PRETTY_DIFF)
    }

    pub fn line_budget(&self) -> Duration {
        Duration::from_millis(self.max_computation_time)
    }

    /// Budget of the char-level refinement: the line budget capped at five seconds.
    pub fn char_budget(&self) -> Duration {
        if self.max_computation_time == 0 {
            return Duration::ZERO;
        }
        Duration::from_millis(self.max_computation_time.min(MAX_CHAR_COMPUTATION_TIME))
    }
}

/// Options as read from a JSON config file. Absent keys keep their defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase", deny_unknown_fields)]
pub struct DiffConfig {
    pub compute_char_changes: Option<bool>,
    pub post_process_char_changes: Option<bool>,
    pub ignore_trim_whitespace: Option<bool>,
    pub pretty_diff: Option<bool>,
    pub max_computation_time: Option<u64>,
}

impl DiffConfig {
    pub fn from_json(source: &str) -> serde_json::Result<Self> {
        serde_json::from_str(source)
    }

    /// Layer the keys present in this config on top of `options`.
    pub fn apply(&self, options: DiffOptions) -> DiffOptions {
        let toggles = [
            (DiffFlags::COMPUTE_CHAR_CHANGES, self.compute_char_changes),
            (DiffFlags::POST_PROCESS_CHAR_CHANGES, self.post_process_char_changes),
            (DiffFlags::IGNORE_TRIM_WHITESPACE, self.ignore_trim_whitespace),
            (DiffFlags::PRETTY_DIFF, self.pretty_diff),
        ];

        let options = toggles
            .into_iter()
            .filter_map(|(flag, value)| value.map(|enabled| (flag, enabled)))
            .fold(options, |options, (flag, enabled)| options.with_flag(flag, enabled));

        match self.max_computation_time {
            Some(millis) => options.with_max_computation_time(millis),
            None => options,
        }
    }
}

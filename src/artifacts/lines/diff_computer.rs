//! Line diff with character-level refinement
//!
//! ## Algorithm
//!
//! 1. Lines are compared by their trimmed content with [`LcsDiff`], bounded by
//!    the configured computation time.
//! 2. Each resulting change spanning fewer than 20 lines on both sides is
//!    refined into character changes by a second [`LcsDiff`] run over the
//!    characters of those lines.
//! 3. When whitespace is significant, matched lines whose leading or trailing
//!    whitespace differs are reported as extra changes.

use crate::artifacts::diff::{Deadline, DiffChange, LcsDiff};
use crate::artifacts::lines::line_change::{CharChange, LineChange, LineDiffResult};
use crate::artifacts::lines::line_sequence::{
    LineSequence, first_non_blank_column, last_non_blank_column,
};
use crate::artifacts::lines::options::DiffOptions;
use tracing::{debug, trace};

/// Line changes this long or longer on either side are not refined into char changes.
const MAXIMUM_CHAR_DIFF_LINES: usize = 20;
/// Char changes separated by fewer matching characters are merged.
const MINIMUM_MATCHING_CHARS: usize = 3;

pub struct DiffComputer<'a> {
    original: LineSequence<'a>,
    modified: LineSequence<'a>,
    options: DiffOptions,
}

impl<'a> DiffComputer<'a> {
    pub fn new<S: AsRef<str>>(
        original_lines: &'a [S],
        modified_lines: &'a [S],
        options: DiffOptions,
    ) -> Self {
        Self {
            original: LineSequence::new(original_lines),
            modified: LineSequence::new(modified_lines),
            options,
        }
    }

    pub fn compute_diff(&self) -> LineDiffResult {
        if self.original.is_single_empty_line() {
            debug!("original text is empty, reporting a whole-text insertion");
            if self.modified.is_single_empty_line() {
                return LineDiffResult::default();
            }

            return LineDiffResult {
                quit_early: false,
                changes: vec![LineChange::new(1, 1, 1, self.modified.len(), None)],
            };
        }

        if self.modified.is_single_empty_line() {
            debug!("modified text is empty, reporting a whole-text deletion");
            return LineDiffResult {
                quit_early: false,
                changes: vec![LineChange::new(1, self.original.len(), 1, 1, None)],
            };
        }

        let line_deadline = Deadline::new(self.options.line_budget());
        let char_deadline = Deadline::new(self.options.char_budget());

        let result = LcsDiff::new(&self.original, &self.modified)
            .with_continuation(line_deadline)
            .compute_diff(self.options.should_make_pretty_diff());

        debug!(
            original_lines = self.original.len(),
            modified_lines = self.modified.len(),
            changes = result.changes.len(),
            quit_early = result.quit_early,
            "computed line diff"
        );

        if self.options.should_ignore_trim_whitespace() {
            let changes = result
                .changes
                .iter()
                .map(|change| self.line_change(change, char_deadline))
                .collect();

            return LineDiffResult {
                quit_early: result.quit_early,
                changes,
            };
        }

        LineDiffResult {
            quit_early: result.quit_early,
            changes: self.with_trim_whitespace_changes(&result.changes, char_deadline),
        }
    }

    /// Line changes for `raw`, plus changes for matched lines that differ only in
    /// leading or trailing whitespace.
    fn with_trim_whitespace_changes(
        &self,
        raw: &[DiffChange],
        char_deadline: Deadline,
    ) -> Vec<LineChange> {
        let mut result = Vec::with_capacity(raw.len());
        let mut original_index = 0;
        let mut modified_index = 0;

        for next_change in raw.iter().map(Some).chain(std::iter::once(None)) {
            let (original_stop, modified_stop) = match next_change {
                Some(change) => (change.original_start, change.modified_start),
                None => (self.original.len(), self.modified.len()),
            };

            while original_index < original_stop && modified_index < modified_stop {
                let original_line = self.original.line(original_index);
                let modified_line = self.modified.line(modified_index);

                if original_line != modified_line {
                    self.push_trim_whitespace_changes(
                        &mut result,
                        original_index + 1,
                        original_line,
                        modified_index + 1,
                        modified_line,
                    );
                }

                original_index += 1;
                modified_index += 1;
            }

            if let Some(change) = next_change {
                result.push(self.line_change(change, char_deadline));
                original_index += change.original_length;
                modified_index += change.modified_length;
            }
        }

        result
    }

    fn push_trim_whitespace_changes(
        &self,
        result: &mut Vec<LineChange>,
        original_line_number: usize,
        original_line: &str,
        modified_line_number: usize,
        modified_line: &str,
    ) {
        let original_chars = original_line.chars().collect::<Vec<_>>();
        let modified_chars = modified_line.chars().collect::<Vec<_>>();

        let mut original_start_column = first_non_blank_column(original_line, 1);
        let mut modified_start_column = first_non_blank_column(modified_line, 1);
        while original_start_column > 1
            && modified_start_column > 1
            && original_chars[original_start_column - 2] == modified_chars[modified_start_column - 2]
        {
            original_start_column -= 1;
            modified_start_column -= 1;
        }

        if original_start_column > 1 || modified_start_column > 1 {
            self.push_trim_whitespace_char_change(
                result,
                CharChange::new(
                    original_line_number,
                    1,
                    original_line_number,
                    original_start_column,
                    modified_line_number,
                    1,
                    modified_line_number,
                    modified_start_column,
                ),
            );
        }

        let original_max_column = original_chars.len() + 1;
        let modified_max_column = modified_chars.len() + 1;
        let mut original_end_column = last_non_blank_column(original_line, 1);
        let mut modified_end_column = last_non_blank_column(modified_line, 1);
        while original_end_column < original_max_column
            && modified_end_column < modified_max_column
            && original_chars[original_end_column - 1] == modified_chars[modified_end_column - 1]
        {
            original_end_column += 1;
            modified_end_column += 1;
        }

        if original_end_column < original_max_column || modified_end_column < modified_max_column {
            self.push_trim_whitespace_char_change(
                result,
                CharChange::new(
                    original_line_number,
                    original_end_column,
                    original_line_number,
                    original_max_column,
                    modified_line_number,
                    modified_end_column,
                    modified_line_number,
                    modified_max_column,
                ),
            );
        }
    }

    fn push_trim_whitespace_char_change(&self, result: &mut Vec<LineChange>, char_change: CharChange) {
        if self.merge_trim_whitespace_char_change(result, char_change) {
            return;
        }

        let char_changes = self
            .options
            .should_compute_char_changes()
            .then(|| vec![char_change]);

        result.push(LineChange::new(
            char_change.original_start_line_number,
            char_change.original_end_line_number,
            char_change.modified_start_line_number,
            char_change.modified_end_line_number,
            char_changes,
        ));
    }

    /// Fold `char_change` into the last line change when it is on the same or the next line.
    fn merge_trim_whitespace_char_change(
        &self,
        result: &mut [LineChange],
        char_change: CharChange,
    ) -> bool {
        let Some(previous) = result.last_mut() else {
            return false;
        };
        if previous.is_insertion() || previous.is_deletion() {
            return false;
        }

        let original_line_number = char_change.original_start_line_number;
        let modified_line_number = char_change.modified_start_line_number;

        let same_line = previous.original_end_line_number == original_line_number
            && previous.modified_end_line_number == modified_line_number;
        let next_line = previous.original_end_line_number + 1 == original_line_number
            && previous.modified_end_line_number + 1 == modified_line_number;

        if !same_line && !next_line {
            return false;
        }

        if next_line {
            previous.original_end_line_number = original_line_number;
            previous.modified_end_line_number = modified_line_number;
        }

        if self.options.should_compute_char_changes()
            && let Some(char_changes) = previous.char_changes.as_mut()
        {
            char_changes.push(char_change);
        }

        true
    }

    fn line_change(&self, change: &DiffChange, char_deadline: Deadline) -> LineChange {
        let (original_start, original_end) = if change.original_length == 0 {
            (change.original_start, 0)
        } else {
            (change.original_start + 1, change.original_end())
        };
        let (modified_start, modified_end) = if change.modified_length == 0 {
            (change.modified_start, 0)
        } else {
            (change.modified_start + 1, change.modified_end())
        };

        LineChange::new(
            original_start,
            original_end,
            modified_start,
            modified_end,
            self.char_changes(change, char_deadline),
        )
    }

    fn char_changes(&self, change: &DiffChange, char_deadline: Deadline) -> Option<Vec<CharChange>> {
        let refinable = |length: usize| length > 0 && length < MAXIMUM_CHAR_DIFF_LINES;

        if !self.options.should_compute_char_changes()
            || !refinable(change.original_length)
            || !refinable(change.modified_length)
        {
            return None;
        }

        if !char_deadline.has_time_left() {
            trace!(?change, "char diff budget exhausted");
            return None;
        }

        let ignore_trim_whitespace = self.options.should_ignore_trim_whitespace();
        let original = self.original.create_char_sequence(
            ignore_trim_whitespace,
            change.original_start,
            change.original_end() - 1,
        );
        let modified = self.modified.create_char_sequence(
            ignore_trim_whitespace,
            change.modified_start,
            change.modified_end() - 1,
        );

        // nothing to align, the whole line is the change
        if original.is_empty() || modified.is_empty() {
            return None;
        }

        let mut raw = LcsDiff::new(&original, &modified)
            .with_continuation(char_deadline)
            .compute_diff(true)
            .changes;

        if self.options.should_post_process_char_changes() {
            raw = post_process_char_changes(raw);
        }

        Some(
            raw.iter()
                .map(|change| CharChange::from_diff_change(change, &original, &modified))
                .collect(),
        )
    }
}

/// Merge char changes separated by fewer than [`MINIMUM_MATCHING_CHARS`] matching characters.
fn post_process_char_changes(raw: Vec<DiffChange>) -> Vec<DiffChange> {
    let mut result: Vec<DiffChange> = Vec::with_capacity(raw.len());

    for change in raw {
        if let Some(previous) = result.last_mut() {
            let original_matching = change.original_start.saturating_sub(previous.original_end());
            let modified_matching = change.modified_start.saturating_sub(previous.modified_end());

            if original_matching.min(modified_matching) < MINIMUM_MATCHING_CHARS {
                previous.original_length = change.original_end() - previous.original_start;
                previous.modified_length = change.modified_end() - previous.modified_start;
                continue;
            }
        }
        result.push(change);
    }

    result
}

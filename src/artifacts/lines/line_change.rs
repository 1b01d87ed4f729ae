//! Line and character changes reported by the line diff
//!
//! ## Coordinates
//!
//! Line numbers and columns are 1-based. Columns count characters and end
//! columns are exclusive. A line change whose original end line is `0` is an
//! insertion after its original start line; a modified end line of `0` marks a
//! deletion after the modified start line.

use crate::artifacts::diff::DiffChange;
use crate::artifacts::lines::char_sequence::CharSequence;
use derive_new::new;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct CharChange {
    pub original_start_line_number: usize,
    pub original_start_column: usize,
    pub original_end_line_number: usize,
    pub original_end_column: usize,
    pub modified_start_line_number: usize,
    pub modified_start_column: usize,
    pub modified_end_line_number: usize,
    pub modified_end_column: usize,
}

impl CharChange {
    pub(crate) fn from_diff_change(
        change: &DiffChange,
        original: &CharSequence,
        modified: &CharSequence,
    ) -> Self {
        let original_last = change.original_start as isize + change.original_length as isize - 1;
        let modified_last = change.modified_start as isize + change.modified_length as isize - 1;

        Self {
            original_start_line_number: original.start_line_number(change.original_start),
            original_start_column: original.start_column(change.original_start),
            original_end_line_number: original.end_line_number(original_last),
            original_end_column: original.end_column(original_last),
            modified_start_line_number: modified.start_line_number(change.modified_start),
            modified_start_column: modified.start_column(change.modified_start),
            modified_end_line_number: modified.end_line_number(modified_last),
            modified_end_column: modified.end_column(modified_last),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct LineChange {
    pub original_start_line_number: usize,
    pub original_end_line_number: usize,
    pub modified_start_line_number: usize,
    pub modified_end_line_number: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub char_changes: Option<Vec<CharChange>>,
}

impl LineChange {
    pub fn is_insertion(&self) -> bool {
        self.original_end_line_number == 0
    }

    pub fn is_deletion(&self) -> bool {
        self.modified_end_line_number == 0
    }

    pub fn original_line_count(&self) -> usize {
        if self.is_insertion() {
            return 0;
        }
        self.original_end_line_number + 1 - self.original_start_line_number
    }

    pub fn modified_line_count(&self) -> usize {
        if self.is_deletion() {
            return 0;
        }
        self.modified_end_line_number + 1 - self.modified_start_line_number
    }

    /// Last unchanged original line before this change, `0` when it starts the text.
    fn original_equivalent_line_number(&self) -> usize {
        if self.is_insertion() {
            return self.original_start_line_number;
        }
        self.original_start_line_number - 1
    }

    fn modified_equivalent_line_number(&self) -> usize {
        if self.is_deletion() {
            return self.modified_start_line_number;
        }
        self.modified_start_line_number - 1
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineDiffResult {
    pub quit_early: bool,
    pub changes: Vec<LineChange>,
}

/// One side of a line change, as seen from an equivalent-line lookup.
struct Side {
    equivalent_line_number: usize,
    line_count: usize,
}

impl LineDiffResult {
    pub fn is_identical(&self) -> bool {
        self.changes.is_empty()
    }

    /// Lines present only in the modified text.
    pub fn additions(&self) -> usize {
        self.changes.iter().map(LineChange::modified_line_count).sum()
    }

    /// Lines present only in the original text.
    pub fn deletions(&self) -> usize {
        self.changes.iter().map(LineChange::original_line_count).sum()
    }

    /// Modified line that sits where `line_number` of the original sits.
    ///
    /// Lines inside a change map onto the matching offset of the other side,
    /// clamped to its last line.
    pub fn equivalent_line_for_original(&self, line_number: usize) -> usize {
        self.equivalent_line(
            line_number,
            |change| Side {
                equivalent_line_number: change.original_equivalent_line_number(),
                line_count: change.original_line_count(),
            },
            |change| Side {
                equivalent_line_number: change.modified_equivalent_line_number(),
                line_count: change.modified_line_count(),
            },
        )
    }

    /// Original line that sits where `line_number` of the modified text sits.
    pub fn equivalent_line_for_modified(&self, line_number: usize) -> usize {
        self.equivalent_line(
            line_number,
            |change| Side {
                equivalent_line_number: change.modified_equivalent_line_number(),
                line_count: change.modified_line_count(),
            },
            |change| Side {
                equivalent_line_number: change.original_equivalent_line_number(),
                line_count: change.original_line_count(),
            },
        )
    }

    fn equivalent_line(
        &self,
        line_number: usize,
        from: impl Fn(&LineChange) -> Side,
        to: impl Fn(&LineChange) -> Side,
    ) -> usize {
        let Some(change) = self
            .changes
            .iter()
            .rev()
            .find(|change| from(*change).equivalent_line_number <= line_number)
        else {
            return line_number;
        };

        let from = from(change);
        let to = to(change);
        let delta = line_number - from.equivalent_line_number;

        if delta <= from.line_count {
            to.equivalent_line_number + delta.min(to.line_count)
        } else {
            to.equivalent_line_number + to.line_count + delta - from.line_count
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    /// original: a b c d e f
    /// modified: a X Y c e f g
    #[fixture]
    fn result() -> LineDiffResult {
        LineDiffResult {
            quit_early: false,
            changes: vec![
                LineChange::new(2, 2, 2, 3, None),
                LineChange::new(4, 4, 4, 0, None),
                LineChange::new(6, 0, 7, 7, None),
            ],
        }
    }

    #[rstest]
    fn counts_added_and_deleted_lines(result: LineDiffResult) {
        assert_eq!(result.additions(), 3);
        assert_eq!(result.deletions(), 2);
        assert!(!result.is_identical());
    }

    #[rstest]
    #[case(1, 1)]
    #[case(2, 2)]
    #[case(3, 4)]
    #[case(4, 4)]
    #[case(5, 5)]
    #[case(6, 6)]
    fn original_lines_map_onto_modified(result: LineDiffResult, #[case] line: usize, #[case] expected: usize) {
        assert_eq!(result.equivalent_line_for_original(line), expected);
    }

    #[rstest]
    #[case(1, 1)]
    #[case(3, 2)]
    #[case(4, 3)]
    #[case(5, 5)]
    #[case(7, 6)]
    fn modified_lines_map_onto_original(result: LineDiffResult, #[case] line: usize, #[case] expected: usize) {
        assert_eq!(result.equivalent_line_for_modified(line), expected);
    }

    #[rstest]
    fn without_changes_lines_map_onto_themselves() {
        let result = LineDiffResult::default();
        assert_eq!(result.equivalent_line_for_original(42), 42);
        assert_eq!(result.equivalent_line_for_modified(7), 7);
    }

    #[rstest]
    fn char_changes_are_omitted_from_json_when_absent() {
        let json = serde_json::to_string(&LineChange::new(1, 1, 1, 1, None)).unwrap();
        assert_eq!(
            json,
            r#"{"originalStartLineNumber":1,"originalEndLineNumber":1,"modifiedStartLineNumber":1,"modifiedEndLineNumber":1}"#
        );
    }
}

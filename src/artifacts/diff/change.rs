use derive_new::new;
use serde::Serialize;

/// A contiguous region that differs between the original and modified sequences.
///
/// - `original_length == 0`: pure insertion before `original_start`
/// - `modified_length == 0`: pure deletion before `modified_start`
/// - both non-zero: replacement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, new)]
#[serde(rename_all = "camelCase")]
pub struct DiffChange {
    pub original_start: usize,
    pub original_length: usize,
    pub modified_start: usize,
    pub modified_length: usize,
}

impl DiffChange {
    /// One past the last original element covered by this change.
    pub fn original_end(&self) -> usize {
        self.original_start + self.original_length
    }

    /// One past the last modified element covered by this change.
    pub fn modified_end(&self) -> usize {
        self.modified_start + self.modified_length
    }

    pub fn is_insertion(&self) -> bool {
        self.original_length == 0
    }

    pub fn is_deletion(&self) -> bool {
        self.modified_length == 0
    }

    /// Fuse `left` and `right` when they touch or overlap on either side.
    ///
    /// Recursive bisection can split a single change in two at the seam; this
    /// puts it back together.
    pub(crate) fn merge_overlapping(left: &DiffChange, right: &DiffChange) -> Option<DiffChange> {
        assert!(
            left.original_start <= right.original_start,
            "left change is not less than or equal to right change"
        );
        assert!(
            left.modified_start <= right.modified_start,
            "left change is not less than or equal to right change"
        );

        let original_touches = left.original_end() >= right.original_start;
        let modified_touches = left.modified_end() >= right.modified_start;
        if !original_touches && !modified_touches {
            return None;
        }

        let original_length = if original_touches {
            right.original_end() - left.original_start
        } else {
            left.original_length
        };
        let modified_length = if modified_touches {
            right.modified_end() - left.modified_start
        } else {
            left.modified_length
        };

        Some(DiffChange::new(
            left.original_start,
            original_length,
            left.modified_start,
            modified_length,
        ))
    }
}

/// Outcome of one diff computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DiffResult {
    /// The search ran out of budget; `changes` over-approximate the real edit script.
    pub quit_early: bool,
    pub changes: Vec<DiffChange>,
}

/// Append `right` to `left`, fusing the changes at the seam when they touch.
pub(crate) fn concatenate_changes(mut left: Vec<DiffChange>, right: Vec<DiffChange>) -> Vec<DiffChange> {
    if left.is_empty() {
        return right;
    }
    if right.is_empty() {
        return left;
    }

    let mut right = right.into_iter();
    if let (Some(last), Some(first)) = (left.last().copied(), right.next()) {
        match DiffChange::merge_overlapping(&last, &first) {
            Some(merged) => {
                let seam = left.len() - 1;
                left[seam] = merged;
            }
            None => left.push(first),
        }
    }
    left.extend(right);
    left
}

//! Diff prettification
//!
//! A minimal edit script is not unique, and the one the search happens to find
//! often draws change boundaries in surprising places. These passes redraw the
//! boundaries among equal-cost alignments without changing which elements are
//! considered different:
//!
//! 1. Shift every change as far down as possible, merging with its successor
//!    when they meet.
//! 2. Shift every change back up to the position whose boundaries land best
//!    (sequence edges, whitespace-only elements, touching the previous change).
//! 3. For string sequences, when two nearby changes are separated by a short
//!    unchanged run, prefer the alignment of that run which matches the most
//!    content.

use crate::artifacts::diff::change::DiffChange;
use crate::artifacts::diff::lcs_diff::LcsDiff;

/// Gaps of this many unchanged elements or more are left alone by the contiguous-match pass.
const CONTIGUOUS_MATCH_MAX_GAP: usize = 5;
/// Only pairs of changes spanning fewer elements than this on both sides are re-anchored.
const CONTIGUOUS_MATCH_MAX_SPAN: usize = 20;
const TOUCHING_PREVIOUS_CHANGE_SCORE: usize = 5;

impl LcsDiff<'_> {
    pub(super) fn prettify_changes(&self, mut changes: Vec<DiffChange>) -> Vec<DiffChange> {
        self.shift_changes_down(&mut changes);
        self.shift_changes_up(&mut changes);
        if self.has_strings {
            self.prefer_longer_contiguous_matches(&mut changes);
        }
        changes
    }

    fn shift_changes_down(&self, changes: &mut Vec<DiffChange>) {
        let original_len = self.original_hashes.len();
        let modified_len = self.modified_hashes.len();

        let mut i = 0;
        while i < changes.len() {
            let (original_stop, modified_stop) = match changes.get(i + 1) {
                Some(next) => (next.original_start, next.modified_start),
                None => (original_len, modified_len),
            };

            let change = &mut changes[i];
            let check_original = change.original_length > 0;
            let check_modified = change.modified_length > 0;

            while change.original_end() < original_stop
                && change.modified_end() < modified_stop
                && (!check_original
                    || self.original_elements_are_equal(
                        change.original_start as isize,
                        change.original_end() as isize,
                    ))
                && (!check_modified
                    || self.modified_elements_are_equal(
                        change.modified_start as isize,
                        change.modified_end() as isize,
                    ))
            {
                let start_strict_equal = self.elements_are_strict_equal(
                    change.original_start as isize,
                    change.modified_start as isize,
                );
                let end_strict_equal = self.elements_are_strict_equal(
                    change.original_end() as isize,
                    change.modified_end() as isize,
                );
                if end_strict_equal && !start_strict_equal {
                    // moving down would leave a strictly different pair outside the change
                    break;
                }
                change.original_start += 1;
                change.modified_start += 1;
            }

            if let Some(next) = changes.get(i + 1).copied()
                && let Some(merged) = DiffChange::merge_overlapping(&changes[i], &next)
            {
                changes[i] = merged;
                changes.remove(i + 1);
                continue;
            }

            i += 1;
        }
    }

    fn shift_changes_up(&self, changes: &mut Vec<DiffChange>) {
        let mut i = changes.len();
        while i > 0 {
            i -= 1;

            let (original_stop, modified_stop) = match i.checked_sub(1).map(|p| changes[p]) {
                Some(prev) => (prev.original_end(), prev.modified_end()),
                None => (0, 0),
            };

            let change = changes[i];
            let check_original = change.original_length > 0;
            let check_modified = change.modified_length > 0;

            let mut best_delta = 0;
            let mut best_score = self.boundary_score(
                change.original_start as isize,
                change.original_length as isize,
                change.modified_start as isize,
                change.modified_length as isize,
            );

            for delta in 1.. {
                let (Some(original_start), Some(modified_start)) = (
                    change.original_start.checked_sub(delta),
                    change.modified_start.checked_sub(delta),
                ) else {
                    break;
                };
                if original_start < original_stop || modified_start < modified_stop {
                    break;
                }
                if check_original
                    && !self.original_elements_are_equal(
                        original_start as isize,
                        (original_start + change.original_length) as isize,
                    )
                {
                    break;
                }
                if check_modified
                    && !self.modified_elements_are_equal(
                        modified_start as isize,
                        (modified_start + change.modified_length) as isize,
                    )
                {
                    break;
                }

                let touching_previous_change =
                    original_start == original_stop && modified_start == modified_stop;
                let score = if touching_previous_change {
                    TOUCHING_PREVIOUS_CHANGE_SCORE
                } else {
                    0
                } + self.boundary_score(
                    original_start as isize,
                    change.original_length as isize,
                    modified_start as isize,
                    change.modified_length as isize,
                );

                if score > best_score {
                    best_score = score;
                    best_delta = delta;
                }
            }

            changes[i].original_start -= best_delta;
            changes[i].modified_start -= best_delta;

            if i > 0
                && let Some(merged) = DiffChange::merge_overlapping(&changes[i - 1], &changes[i])
            {
                // the merged change is re-examined on the next iteration
                changes[i - 1] = merged;
                changes.remove(i);
            }
        }
    }

    /// There can be several longest common subsequences; prefer the one matching longer elements.
    fn prefer_longer_contiguous_matches(&self, changes: &mut [DiffChange]) {
        for i in 1..changes.len() {
            let a = changes[i - 1];
            let b = changes[i];

            let matched_length = b.original_start - a.original_end();
            let ab_original_length = b.original_end() - a.original_start;
            let ab_modified_length = b.modified_end() - a.modified_start;

            if matched_length >= CONTIGUOUS_MATCH_MAX_GAP
                || ab_original_length >= CONTIGUOUS_MATCH_MAX_SPAN
                || ab_modified_length >= CONTIGUOUS_MATCH_MAX_SPAN
            {
                continue;
            }

            let Some((original_match_start, modified_match_start)) = self.find_better_contiguous_sequence(
                a.original_start,
                ab_original_length,
                a.modified_start,
                ab_modified_length,
                matched_length,
            ) else {
                continue;
            };

            if original_match_start == a.original_end() && modified_match_start == a.modified_end() {
                continue;
            }

            let reanchored_a = DiffChange::new(
                a.original_start,
                original_match_start - a.original_start,
                a.modified_start,
                modified_match_start - a.modified_start,
            );
            let b_original_start = original_match_start + matched_length;
            let b_modified_start = modified_match_start + matched_length;
            let reanchored_b = DiffChange::new(
                b_original_start,
                b.original_end() - b_original_start,
                b_modified_start,
                b.modified_end() - b_modified_start,
            );

            let is_empty = |c: &DiffChange| c.original_length == 0 && c.modified_length == 0;
            if is_empty(&reanchored_a) || is_empty(&reanchored_b) {
                continue;
            }

            changes[i - 1] = reanchored_a;
            changes[i] = reanchored_b;
        }
    }

    fn find_better_contiguous_sequence(
        &self,
        original_start: usize,
        original_length: usize,
        modified_start: usize,
        modified_length: usize,
        desired_length: usize,
    ) -> Option<(usize, usize)> {
        if original_length < desired_length || modified_length < desired_length {
            return None;
        }

        let original_max = original_start + original_length - desired_length + 1;
        let modified_max = modified_start + modified_length - desired_length + 1;

        let mut best: Option<(usize, usize, usize)> = None;
        for i in original_start..original_max {
            for j in modified_start..modified_max {
                let score = self.contiguous_sequence_score(i, j, desired_length);
                if score > 0 && best.is_none_or(|(best_score, _, _)| score > best_score) {
                    best = Some((score, i, j));
                }
            }
        }

        best.map(|(_, i, j)| (i, j))
    }

    /// Total length of the matched elements, or 0 if the run does not match.
    fn contiguous_sequence_score(&self, original_start: usize, modified_start: usize, length: usize) -> usize {
        let mut score = 0;
        for l in 0..length {
            if !self.elements_are_equal((original_start + l) as isize, (modified_start + l) as isize) {
                return 0;
            }
            score += self.original_strings[original_start + l].chars().count();
        }
        score
    }

    fn original_is_boundary(&self, index: isize) -> bool {
        if index <= 0 || index >= self.original_hashes.len() as isize - 1 {
            return true;
        }
        self.has_strings && self.original_strings[index as usize].trim().is_empty()
    }

    fn original_region_is_boundary(&self, start: isize, length: isize) -> bool {
        if self.original_is_boundary(start) || self.original_is_boundary(start - 1) {
            return true;
        }
        if length > 0 {
            let end = start + length;
            if self.original_is_boundary(end - 1) || self.original_is_boundary(end) {
                return true;
            }
        }
        false
    }

    fn modified_is_boundary(&self, index: isize) -> bool {
        if index <= 0 || index >= self.modified_hashes.len() as isize - 1 {
            return true;
        }
        self.has_strings && self.modified_strings[index as usize].trim().is_empty()
    }

    fn modified_region_is_boundary(&self, start: isize, length: isize) -> bool {
        if self.modified_is_boundary(start) || self.modified_is_boundary(start - 1) {
            return true;
        }
        if length > 0 {
            let end = start + length;
            if self.modified_is_boundary(end - 1) || self.modified_is_boundary(end) {
                return true;
            }
        }
        false
    }

    fn boundary_score(
        &self,
        original_start: isize,
        original_length: isize,
        modified_start: isize,
        modified_length: isize,
    ) -> usize {
        usize::from(self.original_region_is_boundary(original_start, original_length))
            + usize::from(self.modified_region_is_boundary(modified_start, modified_length))
    }
}

//! Longest-common-subsequence differ
//!
//! This module implements an O(ND) bidirectional variant of Myers' algorithm
//! ("An O(ND) Difference Algorithm and Its Variations", 1986).
//!
//! ## Algorithm Overview
//!
//! The problem is first narrowed by stripping the common prefix and suffix.
//! What remains is solved by divide and conquer:
//!
//! - A forward search from the top-left and a reverse search from the
//!   bottom-right corner of the edit graph advance one edit-distance "wave"
//!   at a time, extending every reachable diagonal as far as elements match.
//! - When the two frontiers cross, the crossing point lies on an optimal path.
//! - Every wave's frontier is kept as a snapshot (up to
//!   [`MAX_DIFFERENCES_HISTORY`] waves), so the full path through the crossing
//!   point can be walked back directly from memory.
//! - If the history bound is exceeded, only the crossing point is returned and
//!   both halves are solved recursively.
//!
//! ## Time-boxing
//!
//! After every forward wave the optional [`ContinueProcessing`] continuation is
//! consulted. When it declines, the engine emits what it has proven so far and
//! one conservative change covering everything past the furthest point reached,
//! and flags the result with `quit_early`.
//!
//! ## Usage
//!
//! ```rust,ignore
//! let original = StringSequence::new("abcabba");
//! let modified = StringSequence::new("cbabac");
//! let result = LcsDiff::new(&original, &modified).compute_diff(true);
//! ```

use crate::artifacts::diff::change::{DiffChange, DiffResult, concatenate_changes};
use crate::artifacts::diff::change_helper::DiffChangeHelper;
use crate::artifacts::diff::continuation::ContinueProcessing;
use crate::artifacts::diff::sequence::{Elements, Sequence, StringSequence, string_hash};
use std::borrow::Cow;
use tracing::{debug, warn};

/// Number of edit-distance waves whose frontier is retained for the trace walk.
pub const MAX_DIFFERENCES_HISTORY: isize = 1447;

/// Trace-level logging of the search, enabled with the `debug_diff` feature flag
macro_rules! debug_log {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug_diff")]
        {
            tracing::trace!($($arg)*);
        }
    };
}

pub struct LcsDiff<'s> {
    pub(super) original: &'s dyn Sequence,
    pub(super) modified: &'s dyn Sequence,
    pub(super) original_strings: Vec<&'s str>,
    pub(super) original_hashes: Cow<'s, [i32]>,
    pub(super) modified_strings: Vec<&'s str>,
    pub(super) modified_hashes: Cow<'s, [i32]>,
    pub(super) has_strings: bool,
    continuation: Option<Box<dyn ContinueProcessing + 's>>,
}

/// Search state of one direction for a single wave.
#[derive(Debug, Clone, Copy)]
struct Frontier {
    /// Index of the reference diagonal in the points array.
    base: isize,
    start: isize,
    end: isize,
    /// Geometric offset turning an original index on a diagonal into a modified index.
    offset: isize,
}

/// Frontier snapshots of every completed wave; first slot holds the base index.
#[derive(Debug, Default)]
struct TraceHistory {
    forward: Vec<Vec<isize>>,
    reverse: Vec<Vec<isize>>,
}

struct Trace<'t> {
    forward: Frontier,
    reverse: Frontier,
    forward_points: &'t [isize],
    reverse_points: &'t [isize],
    history: &'t TraceHistory,
    delta_is_even: bool,
}

enum RecursionPoint {
    /// The search resolved the region on its own.
    Resolved {
        changes: Vec<DiffChange>,
        quit_early: bool,
    },
    /// A point on an optimal path; both halves still need solving.
    Split { mid_original: isize, mid_modified: isize },
}

fn hashed<'s>(elements: Elements<'s>) -> (Vec<&'s str>, Cow<'s, [i32]>, bool) {
    match elements {
        Elements::Strings(strings) => {
            let hashes = strings.iter().map(|s| string_hash(s, 0)).collect::<Vec<_>>();
            (strings, Cow::Owned(hashes), true)
        }
        Elements::Hashes(hashes) => (Vec::new(), hashes, false),
    }
}

/// Changes covering the inclusive region, or nothing when the region is empty on both sides.
fn region(
    original_start: isize,
    original_end: isize,
    modified_start: isize,
    modified_end: isize,
) -> Vec<DiffChange> {
    let original_length = original_end - original_start + 1;
    let modified_length = modified_end - modified_start + 1;
    debug_assert!(original_length >= 0 && modified_length >= 0);

    if original_length <= 0 && modified_length <= 0 {
        return Vec::new();
    }

    vec![DiffChange::new(
        original_start.max(0) as usize,
        original_length.max(0) as usize,
        modified_start.max(0) as usize,
        modified_length.max(0) as usize,
    )]
}

impl<'s> LcsDiff<'s> {
    pub fn new(original: &'s dyn Sequence, modified: &'s dyn Sequence) -> Self {
        let (original_strings, original_hashes, original_has_strings) = hashed(original.elements());
        let (modified_strings, modified_hashes, modified_has_strings) = hashed(modified.elements());

        Self {
            original,
            modified,
            original_strings,
            original_hashes,
            modified_strings,
            modified_hashes,
            has_strings: original_has_strings && modified_has_strings,
            continuation: None,
        }
    }

    /// Attach a continuation that may cut the search short.
    pub fn with_continuation(mut self, continuation: impl ContinueProcessing + 's) -> Self {
        self.continuation = Some(Box::new(continuation));
        self
    }

    pub fn compute_diff(&mut self, pretty: bool) -> DiffResult {
        let original_end = self.original_hashes.len() as isize - 1;
        let modified_end = self.modified_hashes.len() as isize - 1;

        let (changes, quit_early) = self.compute_diff_recursive(0, original_end, 0, modified_end);
        if quit_early {
            debug!(
                changes = changes.len(),
                "diff search stopped early, result is approximate"
            );
        }

        // prettifying is only sound once the whole change list is known
        let changes = if pretty {
            self.prettify_changes(changes)
        } else {
            changes
        };

        DiffResult {
            quit_early,
            changes,
        }
    }

    pub(super) fn elements_are_equal(&self, original_index: isize, modified_index: isize) -> bool {
        let (o, m) = (original_index as usize, modified_index as usize);
        if self.original_hashes[o] != self.modified_hashes[m] {
            return false;
        }
        !self.has_strings || self.original_strings[o] == self.modified_strings[m]
    }

    pub(super) fn elements_are_strict_equal(&self, original_index: isize, modified_index: isize) -> bool {
        if !self.elements_are_equal(original_index, modified_index) {
            return false;
        }
        self.original.strict_element(original_index as usize)
            == self.modified.strict_element(modified_index as usize)
    }

    pub(super) fn original_elements_are_equal(&self, index1: isize, index2: isize) -> bool {
        let (a, b) = (index1 as usize, index2 as usize);
        if self.original_hashes[a] != self.original_hashes[b] {
            return false;
        }
        !self.has_strings || self.original_strings[a] == self.original_strings[b]
    }

    pub(super) fn modified_elements_are_equal(&self, index1: isize, index2: isize) -> bool {
        let (a, b) = (index1 as usize, index2 as usize);
        if self.modified_hashes[a] != self.modified_hashes[b] {
            return false;
        }
        !self.has_strings || self.modified_strings[a] == self.modified_strings[b]
    }

    /// Diff of the inclusive region `original_start..=original_end` x `modified_start..=modified_end`.
    fn compute_diff_recursive(
        &mut self,
        mut original_start: isize,
        mut original_end: isize,
        mut modified_start: isize,
        mut modified_end: isize,
    ) -> (Vec<DiffChange>, bool) {
        while original_start <= original_end
            && modified_start <= modified_end
            && self.elements_are_equal(original_start, modified_start)
        {
            original_start += 1;
            modified_start += 1;
        }

        while original_end >= original_start
            && modified_end >= modified_start
            && self.elements_are_equal(original_end, modified_end)
        {
            original_end -= 1;
            modified_end -= 1;
        }

        // all insertions, all deletions, or identical
        if original_start > original_end || modified_start > modified_end {
            if modified_start <= modified_end {
                assert_eq!(
                    original_start,
                    original_end + 1,
                    "original start should only be one more than original end"
                );
            } else if original_start <= original_end {
                assert_eq!(
                    modified_start,
                    modified_end + 1,
                    "modified start should only be one more than modified end"
                );
            } else {
                assert_eq!(original_start, original_end + 1);
                assert_eq!(modified_start, modified_end + 1);
            }

            let changes = region(original_start, original_end, modified_start, modified_end);
            return (changes, false);
        }

        match self.compute_recursion_point(original_start, original_end, modified_start, modified_end) {
            RecursionPoint::Resolved {
                changes,
                quit_early,
            } => (changes, quit_early),
            RecursionPoint::Split {
                mid_original,
                mid_modified,
            } => {
                debug_log!(mid_original, mid_modified, "splitting at recursion point");

                let (left, left_quit_early) =
                    self.compute_diff_recursive(original_start, mid_original, modified_start, mid_modified);

                if left_quit_early {
                    // no time left for the second half; report it as one change
                    let right = region(mid_original + 1, original_end, mid_modified + 1, modified_end);
                    return (concatenate_changes(left, right), true);
                }

                let (right, right_quit_early) =
                    self.compute_diff_recursive(mid_original + 1, original_end, mid_modified + 1, modified_end);

                (concatenate_changes(left, right), right_quit_early)
            }
        }
    }

    fn compute_recursion_point(
        &mut self,
        mut original_start: isize,
        original_end: isize,
        mut modified_start: isize,
        modified_end: isize,
    ) -> RecursionPoint {
        // the walk starts just outside the given boundary
        original_start -= 1;
        modified_start -= 1;

        let mut history = TraceHistory::default();

        // each cell holds the original index of the furthest point reached on that diagonal
        let max_differences = (original_end - original_start) + (modified_end - modified_start);
        let num_diagonals = max_differences + 1;
        let mut forward_points = vec![0isize; num_diagonals as usize];
        let mut reverse_points = vec![0isize; num_diagonals as usize];

        let mut forward = Frontier {
            base: modified_end - modified_start,
            start: 0,
            end: 0,
            offset: original_start - modified_start,
        };
        let mut reverse = Frontier {
            base: original_end - original_start,
            start: 0,
            end: 0,
            offset: original_end - modified_end,
        };

        // parity of delta decides which direction detects the overlap first
        let delta = reverse.base - forward.base;
        let delta_is_even = delta % 2 == 0;

        forward_points[forward.base as usize] = original_start;
        reverse_points[reverse.base as usize] = original_end;

        let mut num_differences: isize = 1;
        while num_differences <= max_differences / 2 + 1 {
            let mut furthest_original_index = original_start;
            let mut furthest_modified_index = modified_start;

            forward.start = clip_diagonal_bound(forward.base - num_differences, num_differences, forward.base, num_diagonals);
            forward.end = clip_diagonal_bound(forward.base + num_differences, num_differences, forward.base, num_diagonals);

            let mut diagonal = forward.start;
            while diagonal <= forward.end {
                let d = diagonal as usize;
                let mut original_index = if diagonal == forward.start
                    || (diagonal < forward.end && forward_points[d - 1] < forward_points[d + 1])
                {
                    forward_points[d + 1]
                } else {
                    forward_points[d - 1] + 1
                };
                let mut modified_index = original_index - (diagonal - forward.base) - forward.offset;

                // kept to tell a real overlap from a false one
                let temp_original_index = original_index;

                while original_index < original_end
                    && modified_index < modified_end
                    && self.elements_are_equal(original_index + 1, modified_index + 1)
                {
                    original_index += 1;
                    modified_index += 1;
                }
                forward_points[d] = original_index;

                // diagonals past the corners of the region hold points outside it
                if original_index <= original_end
                    && modified_index <= modified_end
                    && original_index + modified_index > furthest_original_index + furthest_modified_index
                {
                    furthest_original_index = original_index;
                    furthest_modified_index = modified_index;
                }

                // odd delta: overlap shows up first in the forward direction, against the
                // reverse wave of the previous iteration
                if !delta_is_even
                    && (diagonal - reverse.base).abs() <= num_differences - 1
                    && original_index >= reverse_points[d]
                {
                    if temp_original_index <= reverse_points[d]
                        && num_differences <= MAX_DIFFERENCES_HISTORY + 1
                    {
                        let trace = Trace {
                            forward,
                            reverse,
                            forward_points: &forward_points,
                            reverse_points: &reverse_points,
                            history: &history,
                            delta_is_even,
                        };
                        let changes = self.walk_trace(
                            &trace,
                            original_index,
                            modified_index,
                            original_end,
                            modified_end,
                            false,
                        );
                        return RecursionPoint::Resolved {
                            changes,
                            quit_early: false,
                        };
                    }

                    return RecursionPoint::Split {
                        mid_original: original_index,
                        mid_modified: modified_index,
                    };
                }

                diagonal += 2;
            }

            let matched = (furthest_original_index - original_start)
                + (furthest_modified_index - modified_start)
                - num_differences;

            if let Some(continuation) = self.continuation.as_mut()
                && !continuation.should_continue(furthest_original_index.max(0) as usize, (matched.max(0) / 2) as usize)
            {
                debug!(
                    num_differences,
                    furthest_original_index, furthest_modified_index, "continuation declined further search"
                );

                if matched > 0 && num_differences <= MAX_DIFFERENCES_HISTORY + 1 {
                    // enough history to walk the forward path back
                    let trace = Trace {
                        forward,
                        reverse,
                        forward_points: &forward_points,
                        reverse_points: &reverse_points,
                        history: &history,
                        delta_is_even,
                    };
                    let changes = self.walk_trace(
                        &trace,
                        furthest_original_index,
                        furthest_modified_index,
                        original_end,
                        modified_end,
                        true,
                    );
                    return RecursionPoint::Resolved {
                        changes,
                        quit_early: true,
                    };
                }

                return RecursionPoint::Resolved {
                    changes: region(original_start + 1, original_end, modified_start + 1, modified_end),
                    quit_early: true,
                };
            }

            reverse.start = clip_diagonal_bound(reverse.base - num_differences, num_differences, reverse.base, num_diagonals);
            reverse.end = clip_diagonal_bound(reverse.base + num_differences, num_differences, reverse.base, num_diagonals);

            let mut diagonal = reverse.start;
            while diagonal <= reverse.end {
                let d = diagonal as usize;
                let mut original_index = if diagonal == reverse.start
                    || (diagonal < reverse.end && reverse_points[d - 1] >= reverse_points[d + 1])
                {
                    reverse_points[d + 1] - 1
                } else {
                    reverse_points[d - 1]
                };
                let mut modified_index = original_index - (diagonal - reverse.base) - reverse.offset;

                let temp_original_index = original_index;

                while original_index > original_start
                    && modified_index > modified_start
                    && self.elements_are_equal(original_index, modified_index)
                {
                    original_index -= 1;
                    modified_index -= 1;
                }
                reverse_points[d] = original_index;

                // even delta: overlap shows up first in the reverse direction
                if delta_is_even
                    && (diagonal - forward.base).abs() <= num_differences
                    && original_index <= forward_points[d]
                {
                    if temp_original_index >= forward_points[d]
                        && num_differences <= MAX_DIFFERENCES_HISTORY + 1
                    {
                        let trace = Trace {
                            forward,
                            reverse,
                            forward_points: &forward_points,
                            reverse_points: &reverse_points,
                            history: &history,
                            delta_is_even,
                        };
                        let changes = self.walk_trace(
                            &trace,
                            original_index,
                            modified_index,
                            original_end,
                            modified_end,
                            false,
                        );
                        return RecursionPoint::Resolved {
                            changes,
                            quit_early: false,
                        };
                    }

                    return RecursionPoint::Split {
                        mid_original: original_index,
                        mid_modified: modified_index,
                    };
                }

                diagonal += 2;
            }

            if num_differences <= MAX_DIFFERENCES_HISTORY {
                history.forward.push(snapshot(&forward_points, &forward));
                history.reverse.push(snapshot(&reverse_points, &reverse));
            }

            num_differences += 1;
        }

        // the frontiers always meet within max_differences / 2 + 1 waves
        warn!(
            original_start,
            original_end, modified_start, modified_end, "diff search exhausted without overlap"
        );
        RecursionPoint::Resolved {
            changes: region(original_start + 1, original_end, modified_start + 1, modified_end),
            quit_early: false,
        }
    }

    /// Turn the retained frontiers into the change list of the path through
    /// `(mid_original, mid_modified)`.
    fn walk_trace(
        &self,
        trace: &Trace<'_>,
        mid_original: isize,
        mid_modified: isize,
        original_end: isize,
        modified_end: isize,
        quit_early: bool,
    ) -> Vec<DiffChange> {
        // forward half, walked backwards from the middle
        let mut helper = DiffChangeHelper::new();
        let mut points: &[isize] = trace.forward_points;
        let mut base = trace.forward.base;
        let mut diagonal_min = trace.forward.start;
        let mut diagonal_max = trace.forward.end;
        let mut diagonal_relative = (mid_original - mid_modified) - trace.forward.offset;
        let mut last_original_index = isize::MIN;
        let mut history_index = trace.history.forward.len() as isize - 1;

        loop {
            let diagonal = diagonal_relative + base;
            let d = diagonal as usize;

            if diagonal == diagonal_min || (diagonal < diagonal_max && points[d - 1] < points[d + 1]) {
                // vertical move: an insertion
                let original_index = points[d + 1];
                let modified_index = original_index - diagonal_relative - trace.forward.offset;
                if original_index < last_original_index {
                    helper.mark_next_change();
                }
                last_original_index = original_index;
                helper.add_modified_element(original_index + 1, modified_index);
                diagonal_relative = (diagonal + 1) - base;
            } else {
                // horizontal move: a deletion
                let original_index = points[d - 1] + 1;
                let modified_index = original_index - diagonal_relative - trace.forward.offset;
                if original_index < last_original_index {
                    helper.mark_next_change();
                }
                last_original_index = original_index - 1;
                helper.add_original_element(original_index, modified_index + 1);
                diagonal_relative = (diagonal - 1) - base;
            }

            if history_index >= 0 {
                points = &trace.history.forward[history_index as usize];
                base = points[0];
                diagonal_min = 1;
                diagonal_max = points.len() as isize - 1;
            }

            history_index -= 1;
            if history_index < -1 {
                break;
            }
        }

        // recorded back to front
        let forward_changes = helper.into_reverse_changes();

        let reverse_changes = if quit_early {
            // everything past the furthest forward point counts as different
            let mut original_start_point = mid_original + 1;
            let mut modified_start_point = mid_modified + 1;

            if let Some(last) = forward_changes.last() {
                original_start_point = original_start_point.max(last.original_end() as isize);
                modified_start_point = modified_start_point.max(last.modified_end() as isize);
            }

            original_start_point = original_start_point.min(original_end + 1);
            modified_start_point = modified_start_point.min(modified_end + 1);

            region(original_start_point, original_end, modified_start_point, modified_end)
        } else {
            let mut helper = DiffChangeHelper::new();
            let mut points: &[isize] = trace.reverse_points;
            let mut base = trace.reverse.base;
            let mut diagonal_min = trace.reverse.start;
            let mut diagonal_max = trace.reverse.end;
            let mut diagonal_relative = (mid_original - mid_modified) - trace.reverse.offset;
            let mut last_original_index = isize::MAX;
            let mut history_index = if trace.delta_is_even {
                trace.history.reverse.len() as isize - 1
            } else {
                trace.history.reverse.len() as isize - 2
            };

            loop {
                let diagonal = diagonal_relative + base;
                let d = diagonal as usize;

                if diagonal == diagonal_min || (diagonal < diagonal_max && points[d - 1] >= points[d + 1]) {
                    // horizontal move: a deletion
                    let original_index = points[d + 1] - 1;
                    let modified_index = original_index - diagonal_relative - trace.reverse.offset;
                    if original_index > last_original_index {
                        helper.mark_next_change();
                    }
                    last_original_index = original_index + 1;
                    helper.add_original_element(original_index + 1, modified_index + 1);
                    diagonal_relative = (diagonal + 1) - base;
                } else {
                    // vertical move: an insertion
                    let original_index = points[d - 1];
                    let modified_index = original_index - diagonal_relative - trace.reverse.offset;
                    if original_index > last_original_index {
                        helper.mark_next_change();
                    }
                    last_original_index = original_index;
                    helper.add_modified_element(original_index + 1, modified_index + 1);
                    diagonal_relative = (diagonal - 1) - base;
                }

                if history_index >= 0 {
                    points = &trace.history.reverse[history_index as usize];
                    base = points[0];
                    diagonal_min = 1;
                    diagonal_max = points.len() as isize - 1;
                }

                history_index -= 1;
                if history_index < -1 {
                    break;
                }
            }

            helper.into_changes()
        };

        concatenate_changes(forward_changes, reverse_changes)
    }
}

/// Copy the populated diagonals of one wave, prefixed with the base diagonal's position.
fn snapshot(points: &[isize], frontier: &Frontier) -> Vec<isize> {
    let (start, end) = (frontier.start as usize, frontier.end as usize);
    let mut snapshot = Vec::with_capacity(end - start + 2);
    snapshot.push(frontier.base - frontier.start + 1);
    snapshot.extend_from_slice(&points[start..=end]);
    snapshot
}

/// Clamp `diagonal` into `0..num_diagonals`, keeping the parity the wave expects.
fn clip_diagonal_bound(diagonal: isize, num_differences: isize, diagonal_base: isize, num_diagonals: isize) -> isize {
    if diagonal >= 0 && diagonal < num_diagonals {
        return diagonal;
    }

    let diagonals_below = diagonal_base;
    let diagonals_above = num_diagonals - diagonal_base - 1;
    let diff_even = num_differences % 2 == 0;

    if diagonal < 0 {
        let lower_bound_even = diagonals_below % 2 == 0;
        if diff_even == lower_bound_even { 0 } else { 1 }
    } else {
        let upper_bound_even = diagonals_above % 2 == 0;
        if diff_even == upper_bound_even {
            num_diagonals - 1
        } else {
            num_diagonals - 2
        }
    }
}

/// Character-level diff of two strings.
pub fn string_diff(original: &str, modified: &str, pretty: bool) -> Vec<DiffChange> {
    let original = StringSequence::new(original);
    let modified = StringSequence::new(modified);
    LcsDiff::new(&original, &modified).compute_diff(pretty).changes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::diff::sequence::StringArraySequence;
    use pretty_assertions::assert_eq;
    use rstest::{fixture, rstest};

    fn diff_lines(original: &[&str], modified: &[&str], pretty: bool) -> DiffResult {
        let original = StringArraySequence::new(original);
        let modified = StringArraySequence::new(modified);
        LcsDiff::new(&original, &modified).compute_diff(pretty)
    }

    /// Rebuild `modified` from `original` and the change list.
    fn apply<T: Clone>(original: &[T], modified: &[T], changes: &[DiffChange]) -> Vec<T> {
        let mut result = Vec::new();
        let mut cursor = 0;
        for change in changes {
            result.extend_from_slice(&original[cursor..change.original_start]);
            result.extend_from_slice(&modified[change.modified_start..change.modified_end()]);
            cursor = change.original_end();
        }
        result.extend_from_slice(&original[cursor..]);
        result
    }

    #[fixture]
    fn string_inputs() -> (&'static str, &'static str) {
        ("abcabba", "cbabac")
    }

    #[rstest]
    fn identical_sequences_have_no_changes() {
        let result = diff_lines(&["a", "b", "c"], &["a", "b", "c"], true);
        assert_eq!(result, DiffResult::default());
    }

    #[rstest]
    fn single_replacement() {
        let result = diff_lines(&["a", "b", "c"], &["a", "x", "c"], true);
        assert_eq!(result.changes, vec![DiffChange::new(1, 1, 1, 1)]);
        assert!(!result.quit_early);
    }

    #[rstest]
    fn insertion_into_empty_sequence() {
        let result = diff_lines(&[], &["a"], false);
        assert_eq!(result.changes, vec![DiffChange::new(0, 0, 0, 1)]);
    }

    #[rstest]
    fn trailing_deletion() {
        let result = diff_lines(&["a", "b"], &["a"], false);
        assert_eq!(result.changes, vec![DiffChange::new(1, 1, 1, 0)]);
    }

    #[rstest]
    fn both_empty() {
        assert_eq!(diff_lines(&[], &[], true), DiffResult::default());
    }

    #[rstest]
    fn classic_myers_example_is_minimal(string_inputs: (&'static str, &'static str)) {
        let (a, b) = string_inputs;
        let changes = string_diff(a, b, false);

        let deleted: usize = changes.iter().map(|c| c.original_length).sum();
        let inserted: usize = changes.iter().map(|c| c.modified_length).sum();
        assert_eq!(deleted + inserted, 5);

        let a = a.chars().collect::<Vec<_>>();
        let b = b.chars().collect::<Vec<_>>();
        assert_eq!(apply(&a, &b, &changes), b);
    }

    #[rstest]
    #[case("", "abc")]
    #[case("abc", "")]
    #[case("kitten", "sitting")]
    #[case("the quick brown fox", "the quack brown box jumps")]
    #[case("aaaaaaaaaa", "aaaabaaaaa")]
    fn changes_rebuild_the_modified_string(#[case] a: &str, #[case] b: &str) {
        for pretty in [false, true] {
            let changes = string_diff(a, b, pretty);
            let a = a.chars().collect::<Vec<_>>();
            let b = b.chars().collect::<Vec<_>>();
            assert_eq!(apply(&a, &b, &changes), b);
        }
    }

    #[rstest]
    fn long_edit_distance_exceeds_history_and_recurses() {
        // every element differs, so the edit distance is far beyond the retained history
        let original = (0..2000).map(|i| format!("a{i}")).collect::<Vec<_>>();
        let modified = (0..2000).map(|i| format!("b{i}")).collect::<Vec<_>>();
        let original_seq = StringArraySequence::new(&original);
        let modified_seq = StringArraySequence::new(&modified);

        let result = LcsDiff::new(&original_seq, &modified_seq).compute_diff(false);

        assert!(!result.quit_early);
        assert_eq!(apply(&original, &modified, &result.changes), modified);
    }

    #[rstest]
    fn hash_collisions_fall_back_to_exact_comparison() {
        // "Aa" and "BB" share a hash
        let result = diff_lines(&["Aa", "x"], &["BB", "x"], false);
        assert_eq!(result.changes, vec![DiffChange::new(0, 1, 0, 1)]);
    }

    #[rstest]
    fn declined_continuation_covers_the_tail() {
        let original = "abcdefghijklmnopqrstuvwxyz".repeat(4);
        let modified = original
            .chars()
            .map(|c| if c as u32 % 3 == 0 { '#' } else { c })
            .collect::<String>();
        let original_seq = StringSequence::new(&original);
        let modified_seq = StringSequence::new(&modified);

        let mut waves = 0;
        let result = LcsDiff::new(&original_seq, &modified_seq)
            .with_continuation(move |_: usize, _: usize| {
                waves += 1;
                waves < 3
            })
            .compute_diff(false);

        assert!(result.quit_early);
        let a = original.chars().collect::<Vec<_>>();
        let b = modified.chars().collect::<Vec<_>>();
        assert_eq!(apply(&a, &b, &result.changes), b);
    }

    #[rstest]
    fn declined_continuation_keeps_changes_inside_short_side() {
        // the forward search runs past the end of the one-line modified region
        let mut original = vec!["a"; 88];
        original[5] = "b";
        let modified = vec!["a", "b"];
        let original_seq = StringArraySequence::new(&original);
        let modified_seq = StringArraySequence::new(&modified);

        let mut waves = 16;
        let result = LcsDiff::new(&original_seq, &modified_seq)
            .with_continuation(move |_: usize, _: usize| {
                waves -= 1;
                waves > 0
            })
            .compute_diff(false);

        assert!(result.quit_early);
        for change in &result.changes {
            assert!(change.original_end() <= original.len());
            assert!(change.modified_end() <= modified.len());
        }
        assert_eq!(apply(&original, &modified, &result.changes), modified);
    }

    #[rstest]
    fn always_continuing_never_quits_early() {
        let original_seq = StringSequence::new("the rain in spain");
        let modified_seq = StringSequence::new("the plain in maine");
        let result = LcsDiff::new(&original_seq, &modified_seq)
            .with_continuation(|_: usize, _: usize| true)
            .compute_diff(true);
        assert!(!result.quit_early);
    }

    #[rstest]
    #[case(-3, 1, 5, 11, 0)]
    #[case(-2, 2, 5, 11, 1)]
    #[case(12, 1, 5, 11, 10)]
    #[case(13, 2, 5, 11, 9)]
    #[case(4, 1, 5, 11, 4)]
    fn diagonal_bounds_keep_parity(
        #[case] diagonal: isize,
        #[case] num_differences: isize,
        #[case] base: isize,
        #[case] num_diagonals: isize,
        #[case] expected: isize,
    ) {
        assert_eq!(clip_diagonal_bound(diagonal, num_differences, base, num_diagonals), expected);
    }
}

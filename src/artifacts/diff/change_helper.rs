use crate::artifacts::diff::change::DiffChange;

/// Collects single insert/delete steps from a trace walk into [`DiffChange`]s.
///
/// Consecutive steps accumulate into one pending change until
/// [`mark_next_change`](Self::mark_next_change) closes it.
#[derive(Debug)]
pub(crate) struct DiffChangeHelper {
    changes: Vec<DiffChange>,
    original_start: isize,
    modified_start: isize,
    original_count: usize,
    modified_count: usize,
}

impl DiffChangeHelper {
    pub fn new() -> Self {
        Self {
            changes: Vec::new(),
            original_start: isize::MAX,
            modified_start: isize::MAX,
            original_count: 0,
            modified_count: 0,
        }
    }

    fn has_pending(&self) -> bool {
        self.original_count > 0 || self.modified_count > 0
    }

    pub fn mark_next_change(&mut self) {
        if self.has_pending() {
            assert!(
                self.original_start >= 0 && self.modified_start >= 0,
                "change starts before the beginning of the sequence"
            );
            self.changes.push(DiffChange::new(
                self.original_start as usize,
                self.original_count,
                self.modified_start as usize,
                self.modified_count,
            ));
        }

        self.original_count = 0;
        self.modified_count = 0;
        self.original_start = isize::MAX;
        self.modified_start = isize::MAX;
    }

    /// Record a deleted original element.
    pub fn add_original_element(&mut self, original_index: isize, modified_index: isize) {
        self.original_start = self.original_start.min(original_index);
        self.modified_start = self.modified_start.min(modified_index);
        self.original_count += 1;
    }

    /// Record an inserted modified element.
    pub fn add_modified_element(&mut self, original_index: isize, modified_index: isize) {
        self.original_start = self.original_start.min(original_index);
        self.modified_start = self.modified_start.min(modified_index);
        self.modified_count += 1;
    }

    pub fn into_changes(mut self) -> Vec<DiffChange> {
        self.mark_next_change();
        self.changes
    }

    /// Changes in reverse order of recording; used when the trace was walked backwards.
    pub fn into_reverse_changes(self) -> Vec<DiffChange> {
        let mut changes = self.into_changes();
        changes.reverse();
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn steps_accumulate_until_marked() {
        let mut helper = DiffChangeHelper::new();
        helper.add_original_element(4, 4);
        helper.add_original_element(3, 4);
        helper.add_modified_element(3, 3);
        helper.mark_next_change();
        helper.add_modified_element(1, 1);

        assert_eq!(
            helper.into_changes(),
            vec![DiffChange::new(3, 2, 3, 1), DiffChange::new(1, 0, 1, 1)]
        );
    }

    #[test]
    fn empty_marks_are_ignored() {
        let mut helper = DiffChangeHelper::new();
        helper.mark_next_change();
        helper.mark_next_change();
        assert!(helper.into_reverse_changes().is_empty());
    }
}

use crate::artifacts::lines::line_change::{LineChange, LineDiffResult};

/// Steps through the changes of a line diff, wrapping around at either end.
#[derive(Debug, Clone)]
pub struct ChangeNavigator<'r> {
    changes: &'r [LineChange],
    current: Option<usize>,
}

impl<'r> ChangeNavigator<'r> {
    pub fn new(result: &'r LineDiffResult) -> Self {
        Self {
            changes: &result.changes,
            current: None,
        }
    }

    pub fn can_navigate(&self) -> bool {
        !self.changes.is_empty()
    }

    pub fn current(&self) -> Option<&'r LineChange> {
        self.current.map(|index| &self.changes[index])
    }

    pub fn next(&mut self) -> Option<&'r LineChange> {
        if !self.can_navigate() {
            return None;
        }
        let len = self.changes.len();
        self.current = Some(self.current.map_or(0, |index| (index + 1) % len));
        self.current()
    }

    pub fn previous(&mut self) -> Option<&'r LineChange> {
        if !self.can_navigate() {
            return None;
        }
        let len = self.changes.len();
        self.current = Some(self.current.map_or(len - 1, |index| (index + len - 1) % len));
        self.current()
    }

    /// Position the navigator so that [`next`](Self::next) yields the first change
    /// starting after `line_number` of the modified text.
    pub fn seek(&mut self, line_number: usize) {
        let after = self
            .changes
            .iter()
            .position(|change| change.modified_start_line_number > line_number);

        self.current = match after {
            Some(0) | None => None,
            Some(index) => Some(index - 1),
        };
    }
}

use crate::artifacts::diff::sequence::{Elements, Sequence};
use std::borrow::Cow;

const LINE_FEED: i32 = '\n' as i32;

/// Characters taken from a range of lines, remembering where each one came from.
#[derive(Debug, Clone, Default)]
pub struct CharSequence {
    codes: Vec<i32>,
    line_numbers: Vec<usize>,
    columns: Vec<usize>,
}

impl CharSequence {
    pub(crate) fn push(&mut self, c: char, line_number: usize, column: usize) {
        self.codes.push(c as i32);
        self.line_numbers.push(line_number);
        self.columns.push(column);
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    fn assert_index(&self, index: usize) {
        assert!(index < self.codes.len(), "illegal index {index} into char sequence");
    }

    /// Line of the element at `index`; one past the end continues the last element's line.
    pub fn start_line_number(&self, index: usize) -> usize {
        if index > 0 && index == self.line_numbers.len() {
            return self.end_line_number(index as isize - 1);
        }
        self.assert_index(index);
        self.line_numbers[index]
    }

    /// Line on which the element at `index` ends; `-1` means "before the first element".
    pub fn end_line_number(&self, index: isize) -> usize {
        if index == -1 {
            return self.start_line_number(0);
        }
        let index = index as usize;
        self.assert_index(index);

        if self.codes[index] == LINE_FEED {
            return self.line_numbers[index] + 1;
        }
        self.line_numbers[index]
    }

    pub fn start_column(&self, index: usize) -> usize {
        if index > 0 && index == self.columns.len() {
            return self.end_column(index as isize - 1);
        }
        self.assert_index(index);
        self.columns[index]
    }

    /// Exclusive end column of the element at `index`.
    pub fn end_column(&self, index: isize) -> usize {
        if index == -1 {
            return self.start_column(0);
        }
        let index = index as usize;
        self.assert_index(index);

        if self.codes[index] == LINE_FEED {
            return 1;
        }
        self.columns[index] + 1
    }
}

impl Sequence for CharSequence {
    fn elements(&self) -> Elements<'_> {
        Elements::Hashes(Cow::Borrowed(&self.codes))
    }
}

use crate::artifacts::diff::sequence::{Elements, Sequence};
use crate::artifacts::lines::char_sequence::CharSequence;

fn is_blank(c: char) -> bool {
    c == ' ' || c == '\t'
}

/// 1-based column of the first character that is not a space or tab.
pub(crate) fn first_non_blank_column(line: &str, default: usize) -> usize {
    line.chars()
        .position(|c| !is_blank(c))
        .map_or(default, |index| index + 1)
}

/// 1-based column just past the last character that is not a space or tab.
pub(crate) fn last_non_blank_column(line: &str, default: usize) -> usize {
    let count = line.chars().count();
    line.chars()
        .rev()
        .position(|c| !is_blank(c))
        .map_or(default, |from_end| count - from_end + 1)
}

/// The lines of a text, compared by their content without leading and trailing whitespace.
///
/// The untrimmed line is kept as the strict element, so differences hidden by
/// trimming are still visible to the prettifier and the whitespace post-pass.
#[derive(Debug, Clone)]
pub struct LineSequence<'a> {
    lines: Vec<&'a str>,
    trimmed: Vec<&'a str>,
    start_columns: Vec<usize>,
    end_columns: Vec<usize>,
}

impl<'a> LineSequence<'a> {
    pub fn new<S: AsRef<str>>(lines: &'a [S]) -> Self {
        let lines = lines.iter().map(AsRef::as_ref).collect::<Vec<&'a str>>();
        let trimmed = lines.iter().map(|line| line.trim_matches(is_blank)).collect();
        let start_columns = lines.iter().map(|line| first_non_blank_column(line, 1)).collect();
        let end_columns = lines.iter().map(|line| last_non_blank_column(line, 1)).collect();

        Self {
            lines,
            trimmed,
            start_columns,
            end_columns,
        }
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn line(&self, index: usize) -> &'a str {
        self.lines[index]
    }

    /// True for a text consisting of exactly one empty line.
    pub fn is_single_empty_line(&self) -> bool {
        self.lines.len() == 1 && self.lines[0].is_empty()
    }

    /// Characters of the lines `start_index..=end_index`, each tagged with its line and column.
    ///
    /// With `ignore_trim_whitespace` only the trimmed content of each line takes
    /// part; otherwise whole lines joined by `\n` do.
    pub fn create_char_sequence(
        &self,
        ignore_trim_whitespace: bool,
        start_index: usize,
        end_index: usize,
    ) -> CharSequence {
        let mut sequence = CharSequence::default();

        for index in start_index..=end_index {
            let line = self.lines[index];
            let (start_column, end_column) = if ignore_trim_whitespace {
                (self.start_columns[index], self.end_columns[index])
            } else {
                (1, line.chars().count() + 1)
            };

            for (offset, c) in line
                .chars()
                .skip(start_column - 1)
                .take(end_column.saturating_sub(start_column))
                .enumerate()
            {
                sequence.push(c, index + 1, start_column + offset);
            }

            if !ignore_trim_whitespace && index < end_index {
                sequence.push('\n', index + 1, line.chars().count() + 1);
            }
        }

        sequence
    }
}

impl Sequence for LineSequence<'_> {
    fn elements(&self) -> Elements<'_> {
        Elements::Strings(self.trimmed.clone())
    }

    fn strict_element(&self, index: usize) -> Option<&str> {
        self.lines.get(index).copied()
    }
}

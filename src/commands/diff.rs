use crate::areas::session::Session;
use crate::artifacts::lines::{CharChange, DiffComputer, LineChange, LineDiffResult};
use crate::commands::OutputFormat;
use colored::Colorize;
use std::path::Path;
use tracing::info;

const TIMED_OUT_NOTE: &str = "(diff computation timed out; result is approximate)";

impl Session {
    pub fn diff(&self, original: &Path, modified: &Path, format: OutputFormat) -> anyhow::Result<()> {
        let original_lines = self.workspace().read_lines(original)?;
        let modified_lines = self.workspace().read_lines(modified)?;

        let result =
            DiffComputer::new(&original_lines, &modified_lines, self.options()).compute_diff();
        info!(
            changes = result.changes.len(),
            additions = result.additions(),
            deletions = result.deletions(),
            quit_early = result.quit_early,
            "diffed {} against {}",
            original.display(),
            modified.display()
        );

        match format {
            OutputFormat::Text => self.print_line_diff(&result, &original_lines, &modified_lines),
            OutputFormat::Json => {
                writeln!(self.writer(), "{}", serde_json::to_string_pretty(&result)?)?;
                Ok(())
            }
        }
    }

    fn print_line_diff(
        &self,
        result: &LineDiffResult,
        original: &[String],
        modified: &[String],
    ) -> anyhow::Result<()> {
        for change in &result.changes {
            self.print_line_change(change, original, modified)?;
        }

        if result.quit_early {
            writeln!(self.writer(), "{}", TIMED_OUT_NOTE.yellow())?;
        }

        Ok(())
    }

    fn print_line_change(
        &self,
        change: &LineChange,
        original: &[String],
        modified: &[String],
    ) -> anyhow::Result<()> {
        let original_offset = format!(
            "{},{}",
            change.original_start_line_number,
            change.original_line_count()
        );
        let modified_offset = format!(
            "{},{}",
            change.modified_start_line_number,
            change.modified_line_count()
        );

        writeln!(
            self.writer(),
            "{}",
            format!("@@ -{original_offset} +{modified_offset} @@").cyan()
        )?;

        if !change.is_insertion() {
            let removed =
                &original[change.original_start_line_number - 1..change.original_end_line_number];
            for line in removed {
                writeln!(self.writer(), "{}", format!("-{line}").red())?;
            }
        }

        if !change.is_deletion() {
            let added =
                &modified[change.modified_start_line_number - 1..change.modified_end_line_number];
            for line in added {
                writeln!(self.writer(), "{}", format!("+{line}").green())?;
            }
        }

        for char_change in change.char_changes.iter().flatten() {
            writeln!(self.writer(), "{}", format_char_change(char_change))?;
        }

        Ok(())
    }
}

fn format_char_change(change: &CharChange) -> String {
    format!(
        "~ {}:{}-{}:{} => {}:{}-{}:{}",
        change.original_start_line_number,
        change.original_start_column,
        change.original_end_line_number,
        change.original_end_column,
        change.modified_start_line_number,
        change.modified_start_column,
        change.modified_end_line_number,
        change.modified_end_column
    )
}

use crate::areas::session::Session;
use crate::artifacts::diff::{DiffChange, string_diff};
use crate::commands::OutputFormat;

impl Session {
    pub fn chars(&self, original: &str, modified: &str, format: OutputFormat) -> anyhow::Result<()> {
        let changes = string_diff(original, modified, self.options().should_make_pretty_diff());

        match format {
            OutputFormat::Text => {
                for change in &changes {
                    writeln!(self.writer(), "{}", format_change(change))?;
                }
            }
            OutputFormat::Json => {
                writeln!(self.writer(), "{}", serde_json::to_string_pretty(&changes)?)?;
            }
        }

        Ok(())
    }
}

fn format_change(change: &DiffChange) -> String {
    format!(
        "{},{} -> {},{}",
        change.original_start, change.original_length, change.modified_start, change.modified_length
    )
}

mod show_diff_for_generated_files;
mod show_inserted_and_deleted_lines;
mod show_json_diff;
mod show_line_and_char_changes_between_files;
mod show_timed_out_note;
mod show_whitespace_changes_only_when_significant;

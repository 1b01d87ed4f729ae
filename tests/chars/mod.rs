mod show_char_changes_between_strings;

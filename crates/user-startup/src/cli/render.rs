use chrono::{DateTime, Utc};
use colored::Colorize;
use startupapp::api::{CmdMessage, MessageLevel};
use startupapp::model::Entry;
use timeago::Formatter;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

const ID_WIDTH: usize = 28;
const COMMAND_WIDTH: usize = 56;
const TIME_WIDTH: usize = 14;

pub(super) fn print_messages(messages: &[CmdMessage]) {
    for message in messages {
        match message.level {
            MessageLevel::Info => println!("{}", message.content.dimmed()),
            MessageLevel::Success => println!("{}", message.content.green()),
            MessageLevel::Warning => eprintln!("{}", message.content.yellow()),
        }
    }
}

pub(super) fn print_entries(entries: &[Entry]) {
    if entries.is_empty() {
        println!("No startup commands registered.");
        return;
    }

    let header = format!(
        "{}{}{:>width$}",
        pad_to_width("ID", ID_WIDTH),
        pad_to_width("COMMAND", COMMAND_WIDTH),
        "CREATED",
        width = TIME_WIDTH
    );
    println!("{}", header.bold());

    let now = Utc::now();
    for entry in entries {
        println!("{}", format_row(entry, now));
    }
}

fn format_row(entry: &Entry, now: DateTime<Utc>) -> String {
    let mut command = entry.command.replace(['\r', '\n'], " ");
    if let Some(path) = &entry.stdout {
        command.push_str(&format!(" >{}", path.display()));
    }
    if let Some(path) = &entry.stderr {
        command.push_str(&format!(" 2>{}", path.display()));
    }

    format!(
        "{}{}{}",
        pad_to_width(&entry.id, ID_WIDTH).yellow(),
        pad_to_width(&command, COMMAND_WIDTH),
        format_time_ago(entry.created_at, now).dimmed()
    )
}

/// Truncates to one column less than `width` and pads with spaces to exactly `width`.
fn pad_to_width(s: &str, width: usize) -> String {
    let text = truncate_to_width(s, width.saturating_sub(1));
    let padding = width.saturating_sub(text.width());
    format!("{}{}", text, " ".repeat(padding))
}

fn truncate_to_width(s: &str, max_width: usize) -> String {
    if s.width() <= max_width {
        return s.to_string();
    }

    let mut result = String::new();
    let mut current_width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if current_width + char_width > max_width.saturating_sub(1) {
            result.push('…');
            return result;
        }
        result.push(c);
        current_width += char_width;
    }
    result
}

fn format_time_ago(timestamp: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let duration = now.signed_duration_since(timestamp);
    let time_str = Formatter::new().convert(duration.to_std().unwrap_or_default());
    format!("{:>width$}", time_str, width = TIME_WIDTH)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;
    use std::path::PathBuf;

    #[test]
    fn truncate_keeps_short_strings() {
        assert_eq!(truncate_to_width("echo hi", 20), "echo hi");
    }

    #[test]
    fn truncate_marks_cut_strings() {
        let cut = truncate_to_width("syncthing serve --no-browser", 10);
        assert!(cut.ends_with('…'));
        assert!(cut.width() <= 10);
    }

    #[test]
    fn truncate_counts_wide_characters() {
        let cut = truncate_to_width("echo 日本語日本語日本語", 10);
        assert!(cut.width() <= 10);
    }

    #[test]
    fn pad_to_width_is_exact() {
        assert_eq!(pad_to_width("id", 6), "id    ");
        assert_eq!(pad_to_width("a-very-long-identifier", 8).width(), 8);
    }

    #[test]
    fn time_ago_is_right_aligned() {
        let now = Utc::now();
        let s = format_time_ago(now - Duration::hours(3), now);
        assert_eq!(s.len(), TIME_WIDTH);
        assert!(s.trim_start().starts_with("3 hours"));
    }

    #[test]
    fn row_shows_redirections() {
        colored::control::set_override(false);
        let entry = Entry::named("srv", "python -m http.server")
            .with_stdout(Some(PathBuf::from("/tmp/out.log")));
        let row = format_row(&entry, entry.created_at);
        assert!(row.starts_with("srv "));
        assert!(row.contains("python -m http.server >/tmp/out.log"));
    }
}

//! Parser for raw log text submitted from the dashboard
//!
//! Lines of the form `HH:MM:SS:mmm [TYPE] message` keep their own timestamp
//! and level. Anything else is kept verbatim as a `LOG` entry stamped with the
//! receipt time, so no submitted text is ever dropped (blank lines aside).

use once_cell::sync::Lazy;
use regex::Regex;

use crate::store::{LogEntry, LogLevel};

static LOG_LINE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d{2}:\d{2}:\d{2}:\d{3})\s+\[(LOG|WARN|ERROR|CHECKPOINT)\]\s?(.*)$")
        .expect("log line pattern is valid")
});

/// Parse a single line. Returns `None` when the line does not match.
pub fn parse_line(line: &str) -> Option<LogEntry> {
    let captures = LOG_LINE.captures(line)?;
    let level = captures[2].parse::<LogLevel>().ok()?;

    Some(LogEntry {
        timestamp: captures[1].to_string(),
        level,
        message: captures[3].to_string(),
    })
}

/// Split raw text into entries, falling back to `LOG` entries stamped with
/// `received_at` for lines that don't match.
pub fn parse_log_text(text: &str, received_at: &str) -> Vec<LogEntry> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            parse_line(line).unwrap_or_else(|| LogEntry {
                timestamp: received_at.to_string(),
                level: LogLevel::Log,
                message: line.to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const RECEIVED: &str = "2025-03-01T09:15:02.123Z";

    #[test]
    fn test_parses_structured_line() {
        let entries = parse_log_text("12:34:56:789 [ERROR] boom", RECEIVED);

        assert_eq!(
            entries,
            vec![LogEntry {
                timestamp: "12:34:56:789".to_string(),
                level: LogLevel::Error,
                message: "boom".to_string(),
            }]
        );
    }

    #[test]
    fn test_unmatched_line_becomes_log_entry() {
        let entries = parse_log_text("something went sideways", RECEIVED);

        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].level, LogLevel::Log);
        assert_eq!(entries[0].timestamp, RECEIVED);
        assert_eq!(entries[0].message, "something went sideways");
    }

    #[test]
    fn test_mixed_lines_and_blank_lines() {
        let text = "\
09:00:00:001 [CHECKPOINT] call started

09:00:01:500 [WARN] latency high
free text line
09:00:02:000 [LOG]
";
        let entries = parse_log_text(text, RECEIVED);

        assert_eq!(entries.len(), 4);
        assert_eq!(entries[0].level, LogLevel::Checkpoint);
        assert_eq!(entries[0].message, "call started");
        assert_eq!(entries[1].level, LogLevel::Warn);
        assert_eq!(entries[2].timestamp, RECEIVED);
        assert_eq!(entries[2].message, "free text line");
        assert_eq!(entries[3].timestamp, "09:00:02:000");
        assert_eq!(entries[3].message, "");
    }

    #[test]
    fn test_unknown_level_is_not_structured() {
        assert!(parse_line("12:34:56:789 [DEBUG] nope").is_none());
        assert!(parse_line("12:34:56 [LOG] missing millis").is_none());

        let entries = parse_log_text("12:34:56:789 [DEBUG] nope", RECEIVED);
        assert_eq!(entries[0].message, "12:34:56:789 [DEBUG] nope");
    }

    #[test]
    fn test_crlf_input() {
        let entries = parse_log_text("12:00:00:000 [LOG] a\r\n12:00:00:001 [LOG] b\r\n", RECEIVED);
        let messages: Vec<_> = entries.iter().map(|e| e.message.as_str()).collect();
        assert_eq!(messages, vec!["a", "b"]);
    }
}

//! Rendering of messages into the markdown block format.

use chrono::NaiveDateTime;
use parlor_common::Message;

/// Title line of the latest-session snapshot.
pub const SNAPSHOT_TITLE: &str = "Latest Session";

pub(super) const BLOCK_SEPARATOR: &str = "\n\n---\n\n";

const EXCHANGE_HEADER_PREFIX: &str = "# Exchange at ";

/// True if `text` starts with one of the section headers written here.
pub(super) fn starts_with_section_header(text: &str) -> bool {
    text.starts_with(EXCHANGE_HEADER_PREFIX)
        || text
            .strip_prefix("# ")
            .and_then(|rest| rest.strip_prefix(SNAPSHOT_TITLE))
            .is_some_and(|tail| tail.is_empty() || tail.starts_with(['\n', '\r']))
}

/// Render one message as `**<Role>**: <content>` plus separator.
pub fn render_block(message: &Message) -> String {
    format!(
        "**{}**: {}{BLOCK_SEPARATOR}",
        message.role.label(),
        message.content
    )
}

/// Render an appended section: timestamped header followed by one block per message.
pub fn render_section(messages: &[Message], at: NaiveDateTime) -> String {
    let mut out = format!(
        "{EXCHANGE_HEADER_PREFIX}{}\n\n",
        at.format("%Y-%m-%d %H:%M:%S")
    );
    for message in messages {
        out.push_str(&render_block(message));
    }
    out
}

/// Render a full-conversation snapshot.
pub fn render_snapshot(messages: &[Message]) -> String {
    let mut out = format!("# {SNAPSHOT_TITLE}\n\n");
    for message in messages {
        out.push_str(&render_block(message));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn block_format() {
        assert_eq!(
            render_block(&Message::user("Hello")),
            "**User**: Hello\n\n---\n\n"
        );
        assert_eq!(
            render_block(&Message::assistant("Hi there")),
            "**Assistant**: Hi there\n\n---\n\n"
        );
    }

    #[test]
    fn section_has_timestamped_header() {
        let at = NaiveDate::from_ymd_opt(2026, 1, 2)
            .unwrap()
            .and_hms_opt(3, 4, 5)
            .unwrap();
        let text = render_section(&[Message::user("a"), Message::assistant("b")], at);
        assert_eq!(
            text,
            "# Exchange at 2026-01-02 03:04:05\n\n\
             **User**: a\n\n---\n\n\
             **Assistant**: b\n\n---\n\n"
        );
    }

    #[test]
    fn snapshot_includes_system_prompt() {
        let text = render_snapshot(&[Message::system("Be brief."), Message::user("hi")]);
        assert!(text.starts_with("# Latest Session\n\n"));
        assert!(text.contains("**System**: Be brief.\n\n---\n\n"));
        assert!(text.ends_with("**User**: hi\n\n---\n\n"));
    }

    #[test]
    fn only_written_headers_are_section_headers() {
        assert!(starts_with_section_header("# Exchange at 2026-01-02 03:04:05\n\n"));
        assert!(starts_with_section_header("# Latest Session\n\n"));
        assert!(starts_with_section_header("# Latest Session"));
        assert!(!starts_with_section_header("# Latest Session notes\n"));
        assert!(!starts_with_section_header("# Section\n\nBody"));
        assert!(!starts_with_section_header("## Exchange at noon"));
    }
}

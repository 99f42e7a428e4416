//! Parsing of transcript and snapshot files back into messages.

use parlor_common::{Message, PersistError, Role};

use super::format::{starts_with_section_header, BLOCK_SEPARATOR};

/// Parse a transcript or snapshot into its messages, in file order.
///
/// Section header lines are skipped. A separator only ends a block when it
/// is followed by end of input, a section header, or another role label, so
/// message content may itself contain `---` rules and markdown headings.
pub fn parse_transcript(text: &str) -> Result<Vec<Message>, PersistError> {
    let mut messages = Vec::new();
    let mut rest = text;

    loop {
        rest = rest.trim_start_matches(['\n', '\r']);
        if rest.is_empty() {
            break;
        }

        if starts_with_section_header(rest) {
            rest = rest.split_once('\n').map_or("", |(_, tail)| tail);
            continue;
        }

        let (role, body) = parse_block_start(rest).ok_or_else(|| {
            PersistError::Format(format!("expected a role label at {:?}", preview(rest)))
        })?;
        let end = find_block_end(body).ok_or_else(|| {
            PersistError::Format(format!("unterminated {} block", role.label()))
        })?;

        messages.push(Message::new(role, &body[..end]));
        rest = &body[end + BLOCK_SEPARATOR.len()..];
    }

    Ok(messages)
}

fn parse_block_start(text: &str) -> Option<(Role, &str)> {
    let after = text.strip_prefix("**")?;
    let (label, body) = after.split_once("**: ")?;
    Some((Role::from_label(label)?, body))
}

fn find_block_end(body: &str) -> Option<usize> {
    let mut offset = 0;
    while let Some(found) = body[offset..].find(BLOCK_SEPARATOR) {
        let end = offset + found;
        let next = &body[end + BLOCK_SEPARATOR.len()..];
        if next.trim_start_matches(['\n', '\r']).is_empty()
            || starts_with_section_header(next)
            || parse_block_start(next).is_some()
        {
            return Some(end);
        }
        offset = end + 1;
    }
    None
}

fn preview(text: &str) -> String {
    text.chars().take(40).collect()
}

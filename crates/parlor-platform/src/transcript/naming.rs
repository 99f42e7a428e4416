//! Session identity: the transcript file name derived from the first
//! user utterance of a conversation.

use std::sync::LazyLock;

use chrono::NaiveDateTime;
use regex::Regex;

/// Maximum length, in characters, of the utterance fragment.
pub const FRAGMENT_MAX_CHARS: usize = 30;

/// Fragment used when an utterance has no word characters at all.
const EMPTY_FRAGMENT: &str = "untitled";

// Static patterns; compiling them cannot fail.
static NON_WORD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^\w\s]").expect("naming: static regex must compile"));
static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("naming: static regex must compile"));

/// Reduce an utterance to a file-name-safe fragment.
///
/// Non-word characters are stripped, whitespace runs collapse to a single
/// underscore, and the result is cut to [`FRAGMENT_MAX_CHARS`].
pub fn sanitize_fragment(text: &str) -> String {
    let stripped = NON_WORD.replace_all(text, "");
    let collapsed = WHITESPACE_RUN.replace_all(stripped.trim(), "_");
    let fragment: String = collapsed.chars().take(FRAGMENT_MAX_CHARS).collect();
    if fragment.is_empty() {
        EMPTY_FRAGMENT.to_string()
    } else {
        fragment
    }
}

/// Build `<prefix>_<YYYYMMDD_HHMMSS>_<fragment>.md`.
pub fn session_file_name(prefix: &str, at: NaiveDateTime, first_utterance: &str) -> String {
    format!(
        "{prefix}_{}_{}.md",
        at.format("%Y%m%d_%H%M%S"),
        sanitize_fragment(first_utterance)
    )
}

/// Variant of a session file name with a numeric suffix before the
/// extension: `chat_..._Hello.md` becomes `chat_..._Hello_2.md`.
pub fn numbered_file_name(name: &str, n: u32) -> String {
    match name.strip_suffix(".md") {
        Some(stem) => format!("{stem}_{n}.md"),
        None => format!("{name}_{n}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(9, 5, 7)
            .unwrap()
    }

    #[test]
    fn strips_punctuation_and_collapses_whitespace() {
        assert_eq!(sanitize_fragment("Hello,   world!"), "Hello_world");
        assert_eq!(sanitize_fragment("  what is\tRust?\n "), "what_is_Rust");
    }

    #[test]
    fn truncates_to_thirty_chars() {
        let long = "a".repeat(50);
        assert_eq!(sanitize_fragment(&long).chars().count(), FRAGMENT_MAX_CHARS);

        let words = "one two three four five six seven eight";
        let fragment = sanitize_fragment(words);
        assert_eq!(fragment, "one_two_three_four_five_six_se");
        assert_eq!(fragment.len(), 30);
    }

    #[test]
    fn keeps_unicode_word_characters() {
        assert_eq!(sanitize_fragment("こんにちは、世界"), "こんにちは世界");
    }

    #[test]
    fn truncation_counts_chars_not_bytes() {
        let text = "日".repeat(40);
        let fragment = sanitize_fragment(&text);
        assert_eq!(fragment.chars().count(), 30);
    }

    #[test]
    fn punctuation_only_falls_back() {
        assert_eq!(sanitize_fragment("?!... --"), "untitled");
    }

    #[test]
    fn file_name_pattern() {
        assert_eq!(
            session_file_name("chat", at(), "Hello there!"),
            "chat_20261018_090507_Hello_there.md"
        );
    }

    #[test]
    fn numbered_name_keeps_extension() {
        assert_eq!(
            numbered_file_name("chat_20261018_120000_Hello.md", 2),
            "chat_20261018_120000_Hello_2.md"
        );
        assert_eq!(numbered_file_name("notes", 3), "notes_3");
    }
}

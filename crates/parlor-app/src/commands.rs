//! Console input parsing.

/// One line of console input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text to send as a user message.
    Say(String),
    Continue,
    Clear,
    Resume,
    Help,
    Quit,
    /// A slash command nobody recognizes.
    Unknown(String),
}

pub const HELP_TEXT: &str = "\
Type a message and press Enter to send it.

  /continue   ask the assistant to keep going
  /clear      start a new conversation
  /resume     reload the latest saved session
  /help       show this help
  /quit       save the session and exit";

/// Parse a line of input. Lines starting with `/` are commands; a doubled
/// slash (`//text`) sends `/text` literally.
pub fn parse_line(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Say(trimmed.to_string());
    };
    if rest.starts_with('/') {
        return Command::Say(rest.to_string());
    }

    match rest.split_whitespace().next().unwrap_or("") {
        "continue" | "c" => Command::Continue,
        "clear" => Command::Clear,
        "resume" => Command::Resume,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => Command::Unknown(other.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_a_message() {
        assert_eq!(parse_line("  Hello there \n"), Command::Say("Hello there".into()));
        assert_eq!(parse_line(""), Command::Say(String::new()));
    }

    #[test]
    fn slash_commands() {
        assert_eq!(parse_line("/continue"), Command::Continue);
        assert_eq!(parse_line("/c"), Command::Continue);
        assert_eq!(parse_line("/clear"), Command::Clear);
        assert_eq!(parse_line("/resume"), Command::Resume);
        assert_eq!(parse_line("/help"), Command::Help);
        assert_eq!(parse_line(" /quit "), Command::Quit);
        assert_eq!(parse_line("/exit"), Command::Quit);
    }

    #[test]
    fn trailing_arguments_are_ignored() {
        assert_eq!(parse_line("/clear now please"), Command::Clear);
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(parse_line("/frobnicate"), Command::Unknown("frobnicate".into()));
        assert_eq!(parse_line("/"), Command::Unknown(String::new()));
    }

    #[test]
    fn doubled_slash_escapes() {
        assert_eq!(parse_line("//clear"), Command::Say("/clear".into()));
    }
}

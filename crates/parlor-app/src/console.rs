//! Console rendering of conversation entries.

use std::io::{self, Write};

use chrono::{DateTime, Local};
use parlor_ai::Presenter;
use parlor_common::EntryRole;
use tracing::warn;

/// Width of the rule printed under every entry.
pub const DIVIDER_WIDTH: usize = 50;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";

/// Render one entry as `timestamp - role`, the content, and a divider.
pub fn format_entry(role: EntryRole, content: &str, timestamp: DateTime<Local>) -> String {
    let prefix = match role {
        EntryRole::User => "You: ",
        EntryRole::Assistant => "AI: ",
        EntryRole::System | EntryRole::Error => "",
    };
    format!(
        "{} - {role}\n{prefix}{content}\n{}\n",
        timestamp.format("%Y-%m-%d %H:%M:%S"),
        "-".repeat(DIVIDER_WIDTH)
    )
}

/// Writes entries to a terminal or any other writer.
pub struct ConsolePresenter<W: Write> {
    out: W,
    /// Emit an ANSI clear on reset; off when the output is not a terminal.
    clear_screen: bool,
}

impl ConsolePresenter<io::Stdout> {
    pub fn stdout() -> Self {
        use std::io::IsTerminal;
        let out = io::stdout();
        let clear_screen = out.is_terminal();
        Self::new(out, clear_screen)
    }
}

impl<W: Write> ConsolePresenter<W> {
    pub fn new(out: W, clear_screen: bool) -> Self {
        Self { out, clear_screen }
    }

    fn emit(&mut self, text: &str) {
        if let Err(e) = self.out.write_all(text.as_bytes()).and_then(|_| self.out.flush()) {
            warn!("console write failed: {e}");
        }
    }
}

impl<W: Write> Presenter for ConsolePresenter<W> {
    fn on_message_appended(&mut self, role: EntryRole, content: &str, timestamp: DateTime<Local>) {
        let entry = format_entry(role, content, timestamp);
        self.emit(&entry);
    }

    fn on_transcript_cleared(&mut self) {
        if self.clear_screen {
            self.emit(CLEAR_SCREEN);
        } else {
            self.emit("\n");
        }
    }
}

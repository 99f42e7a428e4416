//! Markdown transcript files.
//!
//! Two sinks share one block format:
//! - a per-session transcript, appended after every successful exchange
//! - the latest-session snapshot, overwritten in full on shutdown
//!
//! Each message is rendered as `**<Role>**: <content>` followed by a `---`
//! separator. Appended sections start with a timestamped `#` header.

mod format;
mod naming;
mod reader;
mod writer;

pub use format::{render_block, render_section, render_snapshot, SNAPSHOT_TITLE};
pub use naming::{numbered_file_name, sanitize_fragment, session_file_name, FRAGMENT_MAX_CHARS};
pub use reader::parse_transcript;
pub use writer::TranscriptWriter;

//! Filesystem side of Parlor: platform directories and transcript files.

pub mod paths;
pub mod transcript;

pub use paths::{data_dir, ensure_dir, transcript_dir};
pub use transcript::{
    parse_transcript, render_snapshot, session_file_name, TranscriptWriter,
};

//! Append-only transcript and overwrite-only snapshot files.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::NaiveDateTime;
use parlor_common::{Message, PersistError};
use tracing::{debug, info};

use super::format::{render_section, render_snapshot};
use super::naming::numbered_file_name;
use super::reader::parse_transcript;
use crate::paths::ensure_dir;

/// Writes transcript files under a single directory.
#[derive(Debug, Clone)]
pub struct TranscriptWriter {
    dir: PathBuf,
    latest_session_file: String,
}

impl TranscriptWriter {
    pub fn new(dir: impl Into<PathBuf>, latest_session_file: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            latest_session_file: latest_session_file.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the per-session transcript named `session_name`.
    pub fn transcript_path(&self, session_name: &str) -> PathBuf {
        self.dir.join(session_name)
    }

    /// Path of the latest-session snapshot.
    pub fn latest_session_path(&self) -> PathBuf {
        self.dir.join(&self.latest_session_file)
    }

    /// `name`, or the first numbered variant of it, such that no transcript
    /// with that name exists and `in_use` rejects none of them.
    pub fn unclaimed_session_name(&self, name: String, in_use: impl Fn(&str) -> bool) -> String {
        let taken = |candidate: &str| in_use(candidate) || self.transcript_path(candidate).exists();
        if !taken(&name) {
            return name;
        }
        let mut n = 2;
        loop {
            let candidate = numbered_file_name(&name, n);
            if !taken(&candidate) {
                debug!(%name, %candidate, "session name taken, using numbered variant");
                return candidate;
            }
            n += 1;
        }
    }

    /// Append `messages` as one timestamped section of the session transcript.
    ///
    /// Nothing is written when `messages` is empty.
    pub fn append_exchange(
        &self,
        session_name: &str,
        messages: &[Message],
        at: NaiveDateTime,
    ) -> Result<PathBuf, PersistError> {
        let path = self.transcript_path(session_name);
        if messages.is_empty() {
            return Ok(path);
        }

        ensure_dir(&self.dir)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| PersistError::io(&path, e))?;
        file.write_all(render_section(messages, at).as_bytes())
            .map_err(|e| PersistError::io(&path, e))?;

        debug!(path = %path.display(), count = messages.len(), "appended transcript section");
        Ok(path)
    }

    /// Overwrite the latest-session snapshot with the whole conversation.
    pub fn write_snapshot(&self, messages: &[Message]) -> Result<PathBuf, PersistError> {
        let path = self.latest_session_path();
        ensure_dir(&self.dir)?;
        fs::write(&path, render_snapshot(messages)).map_err(|e| PersistError::io(&path, e))?;
        info!(path = %path.display(), count = messages.len(), "wrote latest session snapshot");
        Ok(path)
    }

    /// Read the latest-session snapshot back, if one exists.
    pub fn read_latest_session(&self) -> Result<Option<Vec<Message>>, PersistError> {
        let path = self.latest_session_path();
        if !path.exists() {
            return Ok(None);
        }
        let text = fs::read_to_string(&path).map_err(|e| PersistError::io(&path, e))?;
        parse_transcript(&text).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(second: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 10, 18)
            .unwrap()
            .and_hms_opt(10, 0, second)
            .unwrap()
    }

    #[test]
    fn append_creates_directory_and_file() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(tmp.path().join("notes"), "latest.md");

        let path = writer
            .append_exchange(
                "chat_x.md",
                &[Message::user("Hello"), Message::assistant("Hi there")],
                at(0),
            )
            .unwrap();

        let text = fs::read_to_string(path).unwrap();
        assert_eq!(
            text,
            "# Exchange at 2026-10-18 10:00:00\n\n\
             **User**: Hello\n\n---\n\n\
             **Assistant**: Hi there\n\n---\n\n"
        );
    }

    #[test]
    fn append_never_rewrites_earlier_sections() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(tmp.path(), "latest.md");

        writer
            .append_exchange("s.md", &[Message::user("one")], at(1))
            .unwrap();
        let first = fs::read_to_string(writer.transcript_path("s.md")).unwrap();
        writer
            .append_exchange("s.md", &[Message::user("two")], at(2))
            .unwrap();
        let second = fs::read_to_string(writer.transcript_path("s.md")).unwrap();

        assert!(second.starts_with(&first));
        assert_eq!(second.matches("# Exchange at").count(), 2);
    }

    #[test]
    fn append_with_no_messages_writes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(tmp.path(), "latest.md");
        let path = writer.append_exchange("empty.md", &[], at(0)).unwrap();
        assert!(!path.exists());
    }

    #[test]
    fn snapshot_is_overwritten_not_appended() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(tmp.path(), "latest.md");

        writer
            .write_snapshot(&[Message::system("sys"), Message::user("first")])
            .unwrap();
        writer
            .write_snapshot(&[Message::system("sys"), Message::user("second")])
            .unwrap();

        let text = fs::read_to_string(writer.latest_session_path()).unwrap();
        assert!(!text.contains("first"));
        assert_eq!(text.matches("# Latest Session").count(), 1);
    }

    #[test]
    fn read_latest_session_round_trip() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(tmp.path(), "latest.md");
        assert!(writer.read_latest_session().unwrap().is_none());

        let messages = vec![
            Message::system("sys"),
            Message::user("q"),
            Message::assistant("a"),
        ];
        writer.write_snapshot(&messages).unwrap();
        assert_eq!(writer.read_latest_session().unwrap(), Some(messages));
    }

    #[test]
    fn unwritable_directory_reports_io_error() {
        let tmp = tempfile::tempdir().unwrap();
        let blocker = tmp.path().join("blocker");
        fs::write(&blocker, "not a directory").unwrap();
        let writer = TranscriptWriter::new(blocker.join("sub"), "latest.md");

        let err = writer.write_snapshot(&[Message::system("s")]).unwrap_err();
        assert!(matches!(err, PersistError::Io { .. }));
    }

    #[test]
    fn unclaimed_name_skips_existing_files() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(tmp.path(), "latest.md");
        let name = "chat_20261018_100000_Hello.md".to_string();

        assert_eq!(writer.unclaimed_session_name(name.clone(), |_| false), name);

        writer
            .append_exchange(&name, &[Message::user("Hello")], at(0))
            .unwrap();
        assert_eq!(
            writer.unclaimed_session_name(name.clone(), |_| false),
            "chat_20261018_100000_Hello_2.md"
        );
    }

    #[test]
    fn unclaimed_name_skips_names_in_use() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(tmp.path(), "latest.md");
        let in_use = ["a.md", "a_2.md"];

        let name = writer.unclaimed_session_name("a.md".into(), |n| in_use.contains(&n));
        assert_eq!(name, "a_3.md");
    }

    #[test]
    fn snapshot_with_markdown_reply_reads_back() {
        let tmp = tempfile::tempdir().unwrap();
        let writer = TranscriptWriter::new(tmp.path(), "latest.md");
        let messages = vec![
            Message::system("You are a helpful assistant."),
            Message::user("Outline it"),
            Message::assistant("Intro\n\n---\n\n# Section\n\nBody\n\n---\n\n## Next"),
        ];

        writer.write_snapshot(&messages).unwrap();
        assert_eq!(writer.read_latest_session().unwrap(), Some(messages));
    }
}

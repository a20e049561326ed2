//! Commit object
//!
//! A commit is an immutable snapshot of the whole tracked file set: a
//! filename-to-blob-id map plus message, parent linkage, timestamp and the
//! authoring branch name. Commits form a DAG through parent and second-parent
//! id references; merge commits carry both.
//!
//! ## Format
//!
//! On disk:
//! ```text
//! commit <size>\0branch <branch>
//! timestamp <unix-seconds> <utc-offset>
//! parent <parent-id>
//! merged <second-parent-id>
//! blob <blob-id> <filename>
//!
//! <commit message>
//! ```
//!
//! The `parent` and `merged` lines are omitted for the root commit and for
//! non-merge commits respectively; `blob` lines are sorted by filename.

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::{OBJECT_ID_LENGTH, ObjectId};
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use chrono::{DateTime, FixedOffset, TimeZone};
use std::collections::BTreeMap;
use std::io::BufRead;

/// Message of the deterministic root commit
pub const ROOT_COMMIT_MESSAGE: &str = "initial commit";

/// Branch every repository starts on
pub const DEFAULT_BRANCH: &str = "master";

/// Snapshot of the full tracked file set plus metadata and parent linkage
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Commit {
    message: String,
    /// First parent (None only for the root commit)
    parent: Option<ObjectId>,
    /// Second parent, set only on merge commits
    second_parent: Option<ObjectId>,
    timestamp: DateTime<FixedOffset>,
    /// Branch that was active when this commit was created
    branch: String,
    /// Tracked files: filename to blob id, ordered by filename
    blobs: BTreeMap<String, ObjectId>,
}

impl Commit {
    pub fn new(
        message: String,
        parent: Option<ObjectId>,
        second_parent: Option<ObjectId>,
        timestamp: DateTime<FixedOffset>,
        branch: String,
        blobs: BTreeMap<String, ObjectId>,
    ) -> Self {
        Commit {
            message,
            parent,
            second_parent,
            timestamp,
            branch,
            blobs,
        }
    }

    /// The deterministic root commit: no parents, no blobs, epoch timestamp
    ///
    /// Repeated initialization of any repository produces the same root id.
    pub fn root() -> Self {
        let epoch = FixedOffset::east_opt(0)
            .expect("zero offset is always valid")
            .timestamp_opt(0, 0)
            .single()
            .expect("epoch is always valid");

        Commit {
            message: ROOT_COMMIT_MESSAGE.to_string(),
            parent: None,
            second_parent: None,
            timestamp: epoch,
            branch: DEFAULT_BRANCH.to_string(),
            blobs: BTreeMap::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn parent(&self) -> Option<&ObjectId> {
        self.parent.as_ref()
    }

    pub fn second_parent(&self) -> Option<&ObjectId> {
        self.second_parent.as_ref()
    }

    pub fn is_merge(&self) -> bool {
        self.second_parent.is_some()
    }

    pub fn timestamp(&self) -> DateTime<FixedOffset> {
        self.timestamp
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    pub fn blobs(&self) -> &BTreeMap<String, ObjectId> {
        &self.blobs
    }

    /// Blob id tracked for `filename`, if any
    pub fn blob_id(&self, filename: &str) -> Option<&ObjectId> {
        self.blobs.get(filename)
    }

    pub fn tracks(&self, filename: &str) -> bool {
        self.blobs.contains_key(filename)
    }

    /// First line of the message, for short-form display
    pub fn short_message(&self) -> String {
        self.message.lines().next().unwrap_or("").to_string()
    }

    /// Timestamp in human-readable form, e.g. "Thu Jan 1 00:00:00 1970 +0000"
    pub fn readable_timestamp(&self) -> String {
        self.timestamp
            .format("%a %b %-d %H:%M:%S %Y %z")
            .to_string()
    }
}

impl Object for Commit {
    fn object_type(&self) -> ObjectType {
        ObjectType::Commit
    }

    /// Hash of (parent id, message, blob ids in filename order, timestamp)
    ///
    /// The second parent is intentionally NOT part of the hash input, even for
    /// merge commits. Changing this would change every merge-commit id ever
    /// produced, so it stays excluded until the hash format itself is
    /// redefined.
    fn id(&self) -> ObjectId {
        let parent = self
            .parent
            .as_ref()
            .map(|p| p.as_ref())
            .unwrap_or_default();
        let timestamp = self.timestamp.timestamp().to_string();

        let mut fields: Vec<&[u8]> = vec![
            self.object_type().as_str().as_bytes(),
            parent.as_bytes(),
            self.message.as_bytes(),
        ];
        fields.extend(self.blobs.values().map(|id| id.as_ref().as_bytes()));
        fields.push(timestamp.as_bytes());

        ObjectId::digest(fields)
    }
}

impl Packable for Commit {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let mut lines = vec![
            format!("branch {}", self.branch),
            format!(
                "timestamp {} {}",
                self.timestamp.timestamp(),
                self.timestamp.format("%z")
            ),
        ];
        if let Some(parent) = &self.parent {
            lines.push(format!("parent {}", parent.as_ref()));
        }
        if let Some(second_parent) = &self.second_parent {
            lines.push(format!("merged {}", second_parent.as_ref()));
        }
        for (filename, blob_id) in &self.blobs {
            lines.push(format!("blob {} {}", blob_id.as_ref(), filename));
        }
        lines.push(String::new());
        lines.push(self.message.clone());

        Ok(self.pack_body(lines.join("\n").as_bytes()))
    }
}

impl Unpackable for Commit {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let body = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let body = String::from_utf8(body)?;

        let (header, message) = body
            .split_once("\n\n")
            .context("Invalid commit object: missing message separator")?;

        let mut branch = None;
        let mut timestamp = None;
        let mut parent = None;
        let mut second_parent = None;
        let mut blobs = BTreeMap::new();

        for line in header.lines() {
            if let Some(value) = line.strip_prefix("branch ") {
                branch = Some(value.to_string());
            } else if let Some(value) = line.strip_prefix("timestamp ") {
                timestamp = Some(parse_timestamp(value)?);
            } else if let Some(value) = line.strip_prefix("parent ") {
                parent = Some(ObjectId::try_parse(value.to_string())?);
            } else if let Some(value) = line.strip_prefix("merged ") {
                second_parent = Some(ObjectId::try_parse(value.to_string())?);
            } else if let Some(value) = line.strip_prefix("blob ") {
                // fixed-width id, then a space, then the filename (which may
                // itself contain spaces)
                if value.len() < OBJECT_ID_LENGTH + 2 {
                    anyhow::bail!("Invalid commit object: malformed blob line: {}", line);
                }
                let (blob_id, filename) = value.split_at(OBJECT_ID_LENGTH);
                let blob_id = ObjectId::try_parse(blob_id.to_string())?;
                blobs.insert(filename[1..].to_string(), blob_id);
            } else {
                anyhow::bail!("Invalid commit object: unknown line: {}", line);
            }
        }

        Ok(Commit {
            message: message.to_string(),
            parent,
            second_parent,
            timestamp: timestamp.context("Invalid commit object: missing timestamp")?,
            branch: branch.context("Invalid commit object: missing branch")?,
            blobs,
        })
    }
}

/// Parse `<unix-seconds> <utc-offset>` back into a fixed-offset datetime
fn parse_timestamp(value: &str) -> anyhow::Result<DateTime<FixedOffset>> {
    let (seconds, offset) = value
        .split_once(' ')
        .context("Invalid commit object: malformed timestamp line")?;
    let seconds = seconds
        .parse::<i64>()
        .context("Invalid commit object: non-numeric timestamp")?;

    let offset = parse_utc_offset(offset)?;
    let datetime = DateTime::from_timestamp(seconds, 0)
        .context("Invalid commit object: timestamp out of range")?;

    Ok(datetime.with_timezone(&offset))
}

/// Parse a `+HHMM`/`-HHMM` offset string
fn parse_utc_offset(offset: &str) -> anyhow::Result<FixedOffset> {
    if offset.len() != 5 {
        anyhow::bail!("Invalid UTC offset: {}", offset);
    }
    let sign = match &offset[..1] {
        "+" => 1,
        "-" => -1,
        _ => anyhow::bail!("Invalid UTC offset sign: {}", offset),
    };
    let hours = offset[1..3].parse::<i32>().context("Invalid offset hours")?;
    let minutes = offset[3..5]
        .parse::<i32>()
        .context("Invalid offset minutes")?;

    FixedOffset::east_opt(sign * (hours * 3600 + minutes * 60))
        .ok_or_else(|| anyhow::anyhow!("UTC offset out of range: {}", offset))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::io::Cursor;

    fn fixed_time(seconds: i64) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(3600)
            .unwrap()
            .timestamp_opt(seconds, 0)
            .single()
            .unwrap()
    }

    fn sample_commit() -> Commit {
        let mut blobs = BTreeMap::new();
        blobs.insert(
            "a.txt".to_string(),
            Blob::new("a.txt".to_string(), "alpha".to_string()).id(),
        );
        blobs.insert(
            "b.txt".to_string(),
            Blob::new("b.txt".to_string(), "beta".to_string()).id(),
        );

        Commit::new(
            "add a and b".to_string(),
            Some(Commit::root().id()),
            None,
            fixed_time(1_700_000_000),
            DEFAULT_BRANCH.to_string(),
            blobs,
        )
    }

    use crate::artifacts::objects::blob::Blob;

    #[test]
    fn root_commit_is_deterministic() {
        assert_eq!(Commit::root().id(), Commit::root().id());
        assert_eq!(Commit::root().message(), ROOT_COMMIT_MESSAGE);
        assert!(Commit::root().blobs().is_empty());
        assert_eq!(Commit::root().timestamp().timestamp(), 0);
    }

    #[test]
    fn id_is_rederivable_from_stored_fields() -> anyhow::Result<()> {
        let commit = sample_commit();
        let id = commit.id();

        let bytes = commit.serialize()?;
        let mut reader = Cursor::new(bytes);
        ObjectType::parse_object_type(&mut reader)?;
        let decoded = Commit::deserialize(reader)?;

        assert_eq!(decoded, commit);
        assert_eq!(decoded.id(), id);
        Ok(())
    }

    #[test]
    fn second_parent_does_not_affect_the_id() {
        let plain = sample_commit();
        let merged = Commit::new(
            plain.message().to_string(),
            plain.parent().cloned(),
            Some(Commit::root().id()),
            plain.timestamp(),
            plain.branch().to_string(),
            plain.blobs().clone(),
        );

        assert_eq!(plain.id(), merged.id());
        assert!(merged.is_merge());
    }

    #[test]
    fn multiline_message_survives_the_roundtrip() -> anyhow::Result<()> {
        let commit = Commit::new(
            "first line\n\nbody paragraph".to_string(),
            Some(Commit::root().id()),
            None,
            fixed_time(1_700_000_123),
            "feature".to_string(),
            BTreeMap::new(),
        );

        let bytes = commit.serialize()?;
        let mut reader = Cursor::new(bytes);
        ObjectType::parse_object_type(&mut reader)?;
        let decoded = Commit::deserialize(reader)?;

        assert_eq!(decoded.message(), commit.message());
        Ok(())
    }

    #[test]
    fn filenames_with_spaces_roundtrip() -> anyhow::Result<()> {
        let mut blobs = BTreeMap::new();
        blobs.insert(
            "my notes.txt".to_string(),
            Blob::new("my notes.txt".to_string(), "x".to_string()).id(),
        );
        let commit = Commit::new(
            "spaces".to_string(),
            Some(Commit::root().id()),
            None,
            fixed_time(1_700_000_456),
            DEFAULT_BRANCH.to_string(),
            blobs,
        );

        let bytes = commit.serialize()?;
        let mut reader = Cursor::new(bytes);
        ObjectType::parse_object_type(&mut reader)?;
        let decoded = Commit::deserialize(reader)?;

        assert_eq!(decoded.blobs(), commit.blobs());
        Ok(())
    }
}

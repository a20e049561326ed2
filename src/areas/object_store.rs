//! Content-addressed object store
//!
//! Durable persistence for blobs and commits under a repository's marker
//! directory. The store is append-only: objects are written once, keyed by
//! their full hex id, and there is no update or delete operation. Anything
//! ever referenced stays retrievable indefinitely (no garbage collection).
//!
//! ## Layout
//!
//! ```text
//! .kit/
//!   commits/<full-commit-id>
//!   blobs/<full-blob-id>
//! ```

use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use crate::errors::KitError;
use anyhow::Context;
use bytes::Bytes;
use std::collections::{HashSet, VecDeque};
use std::io::Cursor;
use std::path::{Path, PathBuf};

/// Commit sub-store directory name
const COMMITS_DIR: &str = "commits";

/// Blob sub-store directory name
const BLOBS_DIR: &str = "blobs";

#[derive(Debug)]
pub struct ObjectStore {
    path: Box<Path>,
}

impl ObjectStore {
    /// Open the store rooted at an existing marker directory
    pub fn new(path: Box<Path>) -> Self {
        ObjectStore { path }
    }

    /// Create the sub-store directories under a fresh marker directory
    pub fn init(path: Box<Path>) -> anyhow::Result<Self> {
        std::fs::create_dir_all(path.join(COMMITS_DIR))
            .context("Unable to create commit store directory")?;
        std::fs::create_dir_all(path.join(BLOBS_DIR))
            .context("Unable to create blob store directory")?;
        Ok(ObjectStore { path })
    }

    fn commit_path(&self, id: &ObjectId) -> PathBuf {
        self.path.join(COMMITS_DIR).join(id.as_ref())
    }

    fn blob_path(&self, id: &ObjectId) -> PathBuf {
        self.path.join(BLOBS_DIR).join(id.as_ref())
    }

    /// Store a blob; idempotent, re-storing identical content is a no-op
    pub fn put_blob(&self, blob: &Blob) -> anyhow::Result<ObjectId> {
        let id = blob.id();
        self.write_object(self.blob_path(&id), blob.serialize()?)?;
        Ok(id)
    }

    /// Store a commit; idempotent like [`put_blob`](Self::put_blob)
    pub fn put_commit(&self, commit: &Commit) -> anyhow::Result<ObjectId> {
        let id = commit.id();
        self.write_object(self.commit_path(&id), commit.serialize()?)?;
        Ok(id)
    }

    pub fn blob_exists(&self, id: &ObjectId) -> bool {
        self.blob_path(id).exists()
    }

    pub fn commit_exists(&self, id: &ObjectId) -> bool {
        self.commit_path(id).exists()
    }

    /// Load a blob; a missing entry is an unrecoverable hard failure
    pub fn get_blob(&self, id: &ObjectId) -> anyhow::Result<Blob> {
        let reader = self.read_object(self.blob_path(id), ObjectType::Blob)?;
        Blob::deserialize(reader).context(format!("Corrupt blob object {}", id))
    }

    /// Load a commit; a missing entry is an unrecoverable hard failure
    pub fn get_commit(&self, id: &ObjectId) -> anyhow::Result<Commit> {
        let reader = self.read_object(self.commit_path(id), ObjectType::Commit)?;
        Commit::deserialize(reader).context(format!("Corrupt commit object {}", id))
    }

    /// All stored commit ids, sorted for deterministic iteration
    pub fn list_commit_ids(&self) -> anyhow::Result<Vec<ObjectId>> {
        let mut ids = Vec::new();
        for entry in std::fs::read_dir(self.path.join(COMMITS_DIR))
            .context("Unable to read commit store directory")?
        {
            let entry = entry?;
            let file_name = entry.file_name().to_string_lossy().to_string();
            ids.push(ObjectId::try_parse(file_name)?);
        }
        ids.sort();
        Ok(ids)
    }

    /// Resolve an abbreviated commit id to the unique stored id it prefixes
    ///
    /// Zero matches and ambiguous prefixes are both errors; an ambiguous
    /// prefix is never silently resolved to one of its candidates.
    pub fn resolve_commit_prefix(&self, prefix: &str) -> anyhow::Result<ObjectId> {
        let matches: Vec<ObjectId> = self
            .list_commit_ids()?
            .into_iter()
            .filter(|id| id.as_ref().starts_with(prefix))
            .collect();

        match matches.len() {
            0 => Err(KitError::NotFound("No commit with that id exists.").into()),
            1 => Ok(matches.into_iter().next().expect("one match")),
            n => Err(KitError::AmbiguousPrefix(prefix.to_string(), n).into()),
        }
    }

    /// Copy `tip` and every ancestor commit this store is missing from
    /// `source`, together with the blobs those commits track
    ///
    /// The walk stops descending below commits already present here; both
    /// stores are append-only, so a present commit implies its whole history
    /// and blob closure are present too. Returns the number of commits copied.
    pub fn copy_history_from(
        &self,
        source: &ObjectStore,
        tip: &ObjectId,
    ) -> anyhow::Result<usize> {
        let mut copied = 0;
        let mut seen = HashSet::new();
        let mut fringe = VecDeque::from([tip.clone()]);

        while let Some(current) = fringe.pop_front() {
            if !seen.insert(current.clone()) || self.commit_exists(&current) {
                continue;
            }
            let commit = source.get_commit(&current)?;
            for blob_id in commit.blobs().values() {
                if !self.blob_exists(blob_id) {
                    self.put_blob(&source.get_blob(blob_id)?)?;
                }
            }
            self.put_commit(&commit)?;
            copied += 1;

            if let Some(parent) = commit.parent() {
                fringe.push_back(parent.clone());
            }
            if let Some(second_parent) = commit.second_parent() {
                fringe.push_back(second_parent.clone());
            }
        }

        tracing::debug!(%tip, copied, "copied history between stores");
        Ok(copied)
    }

    fn write_object(&self, object_path: PathBuf, content: Bytes) -> anyhow::Result<()> {
        if object_path.exists() {
            return Ok(());
        }
        tracing::trace!(path = %object_path.display(), "writing object");
        std::fs::write(&object_path, &content).context(format!(
            "Unable to write object file {}",
            object_path.display()
        ))
    }

    fn read_object(
        &self,
        object_path: PathBuf,
        expected: ObjectType,
    ) -> anyhow::Result<impl std::io::BufRead> {
        let content = std::fs::read(&object_path).context(format!(
            "Unable to read object file {}",
            object_path.display()
        ))?;

        let mut reader = Cursor::new(Bytes::from(content));
        let object_type = ObjectType::parse_object_type(&mut reader)?;
        if object_type != expected {
            anyhow::bail!(
                "Object {} has type {} but {} was expected",
                object_path.display(),
                object_type,
                expected
            );
        }

        Ok(reader)
    }
}

//! Serialized repository-state record
//!
//! Everything that is not an immutable object lives in one JSON record under
//! the marker directory: branch pointers, remotes, head, the active branch
//! name and both staging maps. Each top-level operation loads this record,
//! mutates it in memory and persists it back — that load/mutate/store cycle is
//! the only suspension point between operations. No locking guards concurrent
//! access; two processes on one root are last-writer-wins.

use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::StagingArea;
use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Name of the state record inside the marker directory
pub const STATE_FILE: &str = "state";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepoState {
    /// Branch name to tip commit id
    pub branches: BTreeMap<String, ObjectId>,
    /// Remote name to the path of another repository's marker directory
    pub remotes: BTreeMap<String, PathBuf>,
    /// Commit currently checked out; always equals the active branch's tip
    pub head: ObjectId,
    pub active_branch: String,
    pub staging: StagingArea,
}

impl RepoState {
    /// Load the record from a marker directory
    pub fn load(kit_dir: &Path) -> anyhow::Result<Self> {
        let path = kit_dir.join(STATE_FILE);
        let content = std::fs::read_to_string(&path)
            .context(format!("Unable to read state record {}", path.display()))?;
        serde_json::from_str(&content).context("Corrupt repository state record")
    }

    /// Persist the full record back to a marker directory
    pub fn save(&self, kit_dir: &Path) -> anyhow::Result<()> {
        let path = kit_dir.join(STATE_FILE);
        let content = serde_json::to_string_pretty(self).context("Unable to encode state record")?;
        std::fs::write(&path, content)
            .context(format!("Unable to write state record {}", path.display()))
    }

    /// Tip of the active branch
    pub fn active_tip(&self) -> &ObjectId {
        &self.head
    }

    /// Move the active branch pointer and head together
    pub fn advance_head(&mut self, id: ObjectId) {
        self.branches.insert(self.active_branch.clone(), id.clone());
        self.head = id;
    }
}

//! Staging area (index)
//!
//! Pending additions and removals that the next commit will fold into HEAD's
//! blob map. Both maps key by filename; the mutating operations keep the two
//! disjoint, so a filename is never simultaneously staged for addition and
//! removal.

use crate::artifacts::objects::object_id::ObjectId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StagingArea {
    /// Staged for addition: filename to the blob id of the staged content
    additions: BTreeMap<String, ObjectId>,
    /// Staged for removal: filename to the blob id it had in HEAD
    removals: BTreeMap<String, ObjectId>,
}

impl StagingArea {
    pub fn additions(&self) -> &BTreeMap<String, ObjectId> {
        &self.additions
    }

    pub fn removals(&self) -> &BTreeMap<String, ObjectId> {
        &self.removals
    }

    pub fn is_empty(&self) -> bool {
        self.additions.is_empty() && self.removals.is_empty()
    }

    pub fn is_staged_for_addition(&self, filename: &str) -> bool {
        self.additions.contains_key(filename)
    }

    pub fn staged_blob_id(&self, filename: &str) -> Option<&ObjectId> {
        self.additions.get(filename)
    }

    /// Stage `filename` for addition, clearing any pending removal
    pub fn stage_addition(&mut self, filename: &str, blob_id: ObjectId) {
        self.removals.remove(filename);
        self.additions.insert(filename.to_string(), blob_id);
    }

    /// Drop `filename` from the addition map; returns whether it was staged
    pub fn unstage_addition(&mut self, filename: &str) -> bool {
        self.additions.remove(filename).is_some()
    }

    /// Drop `filename` from the removal map
    pub fn unstage_removal(&mut self, filename: &str) {
        self.removals.remove(filename);
    }

    /// Stage `filename` for removal, clearing any pending addition
    pub fn stage_removal(&mut self, filename: &str, old_blob_id: ObjectId) {
        self.additions.remove(filename);
        self.removals.insert(filename.to_string(), old_blob_id);
    }

    /// Empty both maps; runs after commit, checkout and reset
    pub fn clear(&mut self) {
        self.additions.clear();
        self.removals.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::object::Object;

    fn blob_id(name: &str, content: &str) -> ObjectId {
        Blob::new(name.to_string(), content.to_string()).id()
    }

    #[test]
    fn a_filename_never_sits_in_both_maps() {
        let mut staging = StagingArea::default();

        staging.stage_removal("a.txt", blob_id("a.txt", "old"));
        staging.stage_addition("a.txt", blob_id("a.txt", "new"));
        assert!(staging.is_staged_for_addition("a.txt"));
        assert!(!staging.removals().contains_key("a.txt"));

        staging.stage_removal("a.txt", blob_id("a.txt", "old"));
        assert!(!staging.is_staged_for_addition("a.txt"));
        assert!(staging.removals().contains_key("a.txt"));
    }

    #[test]
    fn clear_empties_both_maps() {
        let mut staging = StagingArea::default();
        staging.stage_addition("a.txt", blob_id("a.txt", "x"));
        staging.stage_removal("b.txt", blob_id("b.txt", "y"));

        staging.clear();
        assert!(staging.is_empty());
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::merge::{SideChange, classify, conflict_content};
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::object::Object;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::KitError;
use std::collections::BTreeSet;
use std::io::Write;

/// One planned file resolution, computed before anything is written
#[derive(Debug)]
enum MergeAction {
    /// Write the target side's blob and stage it
    TakeTarget(ObjectId),
    /// Stage the file for removal and delete it from the working tree
    RemoveFile(ObjectId),
    /// Rewrite the file with conflict markers and stage the result
    Conflict {
        head: Option<ObjectId>,
        target: Option<ObjectId>,
    },
}

impl Repository {
    /// Three-way merge of a branch into the active branch
    ///
    /// All-or-nothing: preconditions and the untracked-file check run before
    /// the first write. Conflicts do not abort the merge; the conflicted files
    /// are rewritten with markers, staged, and committed like everything else.
    pub fn merge(&mut self, target_branch: &str) -> anyhow::Result<()> {
        if !self.state().staging.is_empty() {
            return Err(KitError::Precondition("You have uncommitted changes.").into());
        }
        let target_tip = self.branch_tip(target_branch)?;
        if self.state().active_branch == target_branch {
            return Err(KitError::Precondition("Cannot merge a branch with itself.").into());
        }

        let head_id = self.state().head.clone();
        let split_id = self.graph().find_split_point(&head_id, &target_tip)?;

        if split_id == head_id {
            // target strictly ahead: advance the active branch, no merge commit
            let target = self.store().get_commit(&target_tip)?;
            self.update_working_tree(&target)?;
            let state = self.state_mut();
            state.advance_head(target_tip);
            state.staging.clear();
            writeln!(self.writer(), "Current branch fast-forwarded.")?;
            return Ok(());
        }
        if split_id == target_tip {
            return Err(KitError::Precondition(
                "Given branch is an ancestor of the current branch.",
            )
            .into());
        }

        let head = self.store().get_commit(&head_id)?;
        let target = self.store().get_commit(&target_tip)?;
        let split = self.store().get_commit(&split_id)?;

        let mut filenames: BTreeSet<&String> = split.blobs().keys().collect();
        filenames.extend(head.blobs().keys());
        filenames.extend(target.blobs().keys());

        // Phase 1: classify every file and plan its resolution. No file is
        // touched yet, so an untracked file in the way aborts cleanly.
        let mut plan: Vec<(String, MergeAction)> = Vec::new();
        for filename in filenames {
            let head_blob = head.blob_id(filename);
            let target_blob = target.blob_id(filename);

            let action = match split.blob_id(filename) {
                Some(split_blob) => {
                    let head_side = classify(split_blob, head_blob);
                    let target_side = classify(split_blob, target_blob);
                    match (head_side, target_side, head_blob, target_blob) {
                        (SideChange::Unchanged, SideChange::Modified, _, Some(target_blob)) => {
                            Some(MergeAction::TakeTarget(target_blob.clone()))
                        }
                        (SideChange::Unchanged, SideChange::Absent, Some(head_blob), _) => {
                            Some(MergeAction::RemoveFile(head_blob.clone()))
                        }
                        (SideChange::Modified, SideChange::Modified, ..)
                            if head_blob != target_blob =>
                        {
                            Some(MergeAction::Conflict {
                                head: head_blob.cloned(),
                                target: target_blob.cloned(),
                            })
                        }
                        (SideChange::Modified, SideChange::Absent, ..)
                        | (SideChange::Absent, SideChange::Modified, ..) => {
                            Some(MergeAction::Conflict {
                                head: head_blob.cloned(),
                                target: target_blob.cloned(),
                            })
                        }
                        // both unchanged, both modified identically, one side
                        // deleted what the other left alone: keep HEAD's view
                        _ => None,
                    }
                }
                None => match (head_blob, target_blob) {
                    (None, Some(target_blob)) => {
                        if self.workspace().exists(filename) {
                            return Err(KitError::Precondition(
                                "There is an untracked file in the way; delete it, or add and commit it first.",
                            )
                            .into());
                        }
                        Some(MergeAction::TakeTarget(target_blob.clone()))
                    }
                    (Some(head_blob), Some(target_blob)) if head_blob != target_blob => {
                        Some(MergeAction::Conflict {
                            head: Some(head_blob.clone()),
                            target: Some(target_blob.clone()),
                        })
                    }
                    // only in HEAD, or added identically on both sides
                    _ => None,
                },
            };

            if let Some(action) = action {
                plan.push((filename.clone(), action));
            }
        }
        tracing::debug!(branch = target_branch, files = plan.len(), "applying merge plan");

        // Phase 2: apply the plan to the working tree and staging area.
        let mut conflicted = false;
        for (filename, action) in plan {
            match action {
                MergeAction::TakeTarget(blob_id) => {
                    let blob = self.store().get_blob(&blob_id)?;
                    self.workspace().write_file(&filename, blob.content())?;
                    self.state_mut().staging.stage_addition(&filename, blob_id);
                }
                MergeAction::RemoveFile(old_blob_id) => {
                    self.state_mut()
                        .staging
                        .stage_removal(&filename, old_blob_id);
                    self.workspace().delete_file(&filename)?;
                }
                MergeAction::Conflict {
                    head: head_blob,
                    target: target_blob,
                } => {
                    conflicted = true;
                    let head_content = head_blob
                        .map(|id| self.store().get_blob(&id))
                        .transpose()?;
                    let target_content = target_blob
                        .map(|id| self.store().get_blob(&id))
                        .transpose()?;
                    let content = conflict_content(
                        head_content.as_ref().map(Blob::content),
                        target_content.as_ref().map(Blob::content),
                    );

                    let blob = Blob::new(filename.clone(), content.clone());
                    let blob_id = blob.id();
                    self.store().put_blob(&blob)?;
                    self.workspace().write_file(&filename, &content)?;
                    self.state_mut().staging.stage_addition(&filename, blob_id);
                }
            }
        }

        let message = format!(
            "Merged {} into {}.",
            target_branch,
            self.state().active_branch
        );
        if conflicted {
            writeln!(self.writer(), "Encountered a merge conflict.")?;
        }
        self.create_commit(&message, Some(target_tip))?;
        Ok(())
    }
}

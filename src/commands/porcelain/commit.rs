use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object_id::ObjectId;
use crate::errors::KitError;
use std::io::Write;

impl Repository {
    /// Record the staged changes as a new commit on the active branch
    pub fn commit(&mut self, message: &str) -> anyhow::Result<()> {
        let commit_id = self.create_commit(message, None)?;
        let commit = self.store().get_commit(&commit_id)?;

        writeln!(
            self.writer(),
            "[{}] {}",
            commit_id.to_short_oid(),
            commit.short_message()
        )?;
        Ok(())
    }

    /// Build, store and advance to a new commit; shared with merge
    ///
    /// The new blob map is HEAD's map with staged additions applied first and
    /// staged removals applied last (a removal wins even if the mapping was
    /// already gone). Staging is cleared afterwards.
    pub(crate) fn create_commit(
        &mut self,
        message: &str,
        second_parent: Option<ObjectId>,
    ) -> anyhow::Result<ObjectId> {
        if self.state().staging.is_empty() {
            return Err(KitError::Precondition("No changes added to the commit.").into());
        }
        if message.is_empty() {
            return Err(KitError::UserInput("Please enter a commit message.").into());
        }

        let head = self.head_commit()?;
        let mut blobs = head.blobs().clone();
        for (filename, blob_id) in self.state().staging.additions() {
            blobs.insert(filename.clone(), blob_id.clone());
        }
        for filename in self.state().staging.removals().keys() {
            blobs.remove(filename);
        }

        let commit = Commit::new(
            message.to_string(),
            Some(self.state().head.clone()),
            second_parent,
            chrono::Local::now().fixed_offset(),
            self.state().active_branch.clone(),
            blobs,
        );
        let commit_id = self.store().put_commit(&commit)?;
        tracing::debug!(id = %commit_id, merge = commit.is_merge(), "created commit");

        self.state_mut().advance_head(commit_id.clone());
        self.state_mut().staging.clear();

        Ok(commit_id)
    }
}

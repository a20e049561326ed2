use crate::areas::repository::Repository;
use crate::errors::KitError;

impl Repository {
    /// `checkout -- <file>`: restore a file from HEAD
    pub fn checkout_file_from_head(&mut self, filename: &str) -> anyhow::Result<()> {
        let head_id = self.state().head.clone();
        self.checkout_file_from_commit(head_id.as_ref(), filename)
    }

    /// `checkout <commit> -- <file>`: restore a file from any commit
    ///
    /// The commit operand may be abbreviated to any unique prefix.
    pub fn checkout_file_from_commit(
        &mut self,
        commit_prefix: &str,
        filename: &str,
    ) -> anyhow::Result<()> {
        let commit_id = self.store().resolve_commit_prefix(commit_prefix)?;
        let commit = self.store().get_commit(&commit_id)?;

        let Some(blob_id) = commit.blob_id(filename) else {
            return Err(KitError::NotFound("File does not exist in that commit.").into());
        };
        let blob = self.store().get_blob(blob_id)?;
        self.workspace().write_file(filename, blob.content())?;
        Ok(())
    }

    /// `checkout <branch>`: switch the active branch and working tree
    ///
    /// Aborts before touching any file if an untracked file would be
    /// overwritten. Clears the staging area on success.
    pub fn checkout_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.state().branches.contains_key(branch_name) {
            return Err(KitError::NotFound("No such branch exists.").into());
        }
        if self.state().active_branch == branch_name {
            return Err(
                KitError::Precondition("No need to checkout the current branch.").into(),
            );
        }

        let target_id = self.branch_tip(branch_name)?;
        let target = self.store().get_commit(&target_id)?;
        self.update_working_tree(&target)?;

        let state = self.state_mut();
        state.active_branch = branch_name.to_string();
        state.head = target_id;
        state.staging.clear();
        Ok(())
    }
}

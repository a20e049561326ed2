use crate::areas::repository::Repository;

impl Repository {
    /// Move HEAD and the active branch pointer to a commit
    ///
    /// The working tree is made to match the commit's blob map exactly: files
    /// it tracks are written, files tracked only by the old HEAD are deleted.
    /// An untracked file occupying a needed path blocks the whole operation
    /// before any write. Staging is cleared.
    pub fn reset(&mut self, commit_prefix: &str) -> anyhow::Result<()> {
        let commit_id = self.store().resolve_commit_prefix(commit_prefix)?;
        let commit = self.store().get_commit(&commit_id)?;

        self.update_working_tree(&commit)?;

        let state = self.state_mut();
        state.advance_head(commit_id);
        state.staging.clear();
        Ok(())
    }
}

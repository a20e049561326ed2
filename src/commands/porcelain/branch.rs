use crate::areas::repository::Repository;
use crate::errors::KitError;

impl Repository {
    /// Create a branch pointing at HEAD; does not switch to it
    pub fn branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if self.state().branches.contains_key(branch_name) {
            return Err(
                KitError::Precondition("A branch with that name already exists.").into(),
            );
        }

        let head = self.state().head.clone();
        self.state_mut()
            .branches
            .insert(branch_name.to_string(), head);
        Ok(())
    }

    /// Delete a branch pointer; the commits it reached stay stored forever
    pub fn rm_branch(&mut self, branch_name: &str) -> anyhow::Result<()> {
        if !self.state().branches.contains_key(branch_name) {
            return Err(
                KitError::NotFound("A branch with that name does not exist.").into(),
            );
        }
        if self.state().active_branch == branch_name {
            return Err(KitError::Precondition("Cannot remove the current branch.").into());
        }

        self.state_mut().branches.remove(branch_name);
        Ok(())
    }
}

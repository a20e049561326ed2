use crate::areas::object_store::ObjectStore;
use crate::areas::repository::Repository;
use crate::areas::state::RepoState;
use crate::errors::KitError;

impl Repository {
    /// Append the active head's history to a branch of a remote repository
    ///
    /// Push is pure transport: it copies missing commits and their blobs into
    /// the remote store and moves the remote branch pointer, but never touches
    /// the remote working tree. Only fast-forward updates are allowed; a
    /// remote tip that is not an ancestor of the local head is rejected.
    pub fn push(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let remote_dir = self.remote_path(remote_name)?;
        if !remote_dir.is_dir() {
            return Err(KitError::NotFound("Remote directory not found.").into());
        }

        let mut remote_state = RepoState::load(&remote_dir)?;
        let head_id = self.state().head.clone();

        if let Some(remote_tip) = remote_state.branches.get(branch_name) {
            if !self.graph().is_ancestor(remote_tip, &head_id)? {
                return Err(KitError::Precondition(
                    "Please pull down remote changes before pushing.",
                )
                .into());
            }
        }

        let remote_store = ObjectStore::new(remote_dir.clone().into_boxed_path());
        remote_store.copy_history_from(self.store(), &head_id)?;

        remote_state
            .branches
            .insert(branch_name.to_string(), head_id.clone());
        if remote_state.active_branch == branch_name {
            remote_state.head = head_id;
        }
        remote_state.save(&remote_dir)?;

        Ok(())
    }
}

use crate::areas::object_store::ObjectStore;
use crate::areas::repository::Repository;
use crate::areas::state::RepoState;
use crate::errors::KitError;

impl Repository {
    /// Copy a remote branch's history into the local store
    ///
    /// The fetched tip lands on the tracking branch `<remote>/<branch>`, which
    /// is created or moved but never checked out. The working tree, head and
    /// staging area are untouched. Returns the tracking branch name so that
    /// pull can merge it.
    pub fn fetch(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<String> {
        let remote_dir = self.remote_path(remote_name)?;
        if !remote_dir.is_dir() {
            return Err(KitError::NotFound("Remote directory not found.").into());
        }

        let remote_state = RepoState::load(&remote_dir)?;
        let Some(remote_tip) = remote_state.branches.get(branch_name).cloned() else {
            return Err(
                KitError::NotFound("That remote does not have that branch.").into(),
            );
        };

        let remote_store = ObjectStore::new(remote_dir.into_boxed_path());
        self.store().copy_history_from(&remote_store, &remote_tip)?;

        let tracking_branch = format!("{}/{}", remote_name, branch_name);
        self.state_mut()
            .branches
            .insert(tracking_branch.clone(), remote_tip);

        Ok(tracking_branch)
    }
}

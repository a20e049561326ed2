use crate::areas::repository::Repository;
use crate::errors::KitError;
use std::path::PathBuf;

impl Repository {
    /// Register a named remote pointing at another repository's marker
    /// directory
    ///
    /// The path is stored verbatim, relative paths included, and is only
    /// validated when a transfer command actually uses it.
    pub fn add_remote(&mut self, remote_name: &str, remote_path: &str) -> anyhow::Result<()> {
        if self.state().remotes.contains_key(remote_name) {
            return Err(
                KitError::Precondition("A remote with that name already exists.").into(),
            );
        }

        self.state_mut()
            .remotes
            .insert(remote_name.to_string(), PathBuf::from(remote_path));
        Ok(())
    }

    /// Forget a named remote; objects already fetched from it stay stored
    pub fn rm_remote(&mut self, remote_name: &str) -> anyhow::Result<()> {
        if !self.state().remotes.contains_key(remote_name) {
            return Err(
                KitError::NotFound("A remote with that name does not exist.").into(),
            );
        }

        self.state_mut().remotes.remove(remote_name);
        Ok(())
    }

    /// Resolve a remote name to its marker-directory path
    pub(crate) fn remote_path(&self, remote_name: &str) -> anyhow::Result<PathBuf> {
        self.state()
            .remotes
            .get(remote_name)
            .cloned()
            .ok_or_else(|| KitError::NotFound("A remote with that name does not exist.").into())
    }
}

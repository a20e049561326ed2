use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::KitError;

impl Repository {
    /// Stage a working-tree file for addition
    ///
    /// Staging content identical to what HEAD already tracks is a dedup no-op:
    /// the file ends up in neither staging map, whatever was staged before.
    pub fn add(&mut self, filename: &str) -> anyhow::Result<()> {
        if !self.workspace().exists(filename) {
            return Err(KitError::Precondition("File does not exist.").into());
        }

        let blob = self.working_blob(filename)?;
        let blob_id = blob.id();
        let head = self.head_commit()?;

        if head.blob_id(filename) == Some(&blob_id) {
            let staging = &mut self.state_mut().staging;
            staging.unstage_addition(filename);
            staging.unstage_removal(filename);
            return Ok(());
        }

        self.store().put_blob(&blob)?;
        self.state_mut().staging.stage_addition(filename, blob_id);
        Ok(())
    }
}

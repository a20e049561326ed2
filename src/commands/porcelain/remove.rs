use crate::areas::repository::Repository;
use std::io::Write;

impl Repository {
    /// Unstage a pending addition, or stage a tracked file for removal
    ///
    /// Removing a tracked file also deletes it from the working tree. A file
    /// that is neither staged nor tracked is reported, not failed.
    pub fn rm(&mut self, filename: &str) -> anyhow::Result<()> {
        if self.state().staging.is_staged_for_addition(filename) {
            self.state_mut().staging.unstage_addition(filename);
            return Ok(());
        }

        let head = self.head_commit()?;
        if let Some(old_blob_id) = head.blob_id(filename).cloned() {
            self.state_mut()
                .staging
                .stage_removal(filename, old_blob_id);
            self.workspace().delete_file(filename)?;
            return Ok(());
        }

        writeln!(self.writer(), "No reason to remove the file.")?;
        Ok(())
    }
}

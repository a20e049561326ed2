use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use crate::errors::KitError;
use std::io::Write;

impl Repository {
    /// Print the ids of all commits whose message matches exactly
    pub fn find(&self, message: &str) -> anyhow::Result<()> {
        let mut found = false;
        for commit_id in self.store().list_commit_ids()? {
            let commit = self.store().get_commit(&commit_id)?;
            if commit.message() == message {
                writeln!(self.writer(), "{}", commit.id())?;
                found = true;
            }
        }

        if !found {
            return Err(KitError::NotFound("Found no commit with that message.").into());
        }
        Ok(())
    }
}

use crate::areas::repository::Repository;
use crate::artifacts::objects::commit::Commit;
use crate::artifacts::objects::object::Object;
use colored::Colorize;
use std::io::Write;

impl Repository {
    /// Show the first-parent history of HEAD, newest first
    ///
    /// Second parents of merge commits are not followed; this mirrors the
    /// chain the push/fetch walk copies.
    pub fn log(&self) -> anyhow::Result<()> {
        let mut current = Some(self.state().head.clone());

        while let Some(commit_id) = current {
            let commit = self.store().get_commit(&commit_id)?;
            self.display_commit(&commit)?;
            current = commit.parent().cloned();
        }

        Ok(())
    }

    /// Show every commit ever stored, in sorted id order
    pub fn global_log(&self) -> anyhow::Result<()> {
        for commit_id in self.store().list_commit_ids()? {
            let commit = self.store().get_commit(&commit_id)?;
            self.display_commit(&commit)?;
        }
        Ok(())
    }

    fn display_commit(&self, commit: &Commit) -> anyhow::Result<()> {
        let mut writer = self.writer();
        writeln!(writer, "===")?;
        writeln!(writer, "{}", format!("commit {}", commit.id()).yellow())?;
        writeln!(writer, "Date: {}", commit.readable_timestamp())?;
        writeln!(writer, "{}", commit.message())?;
        writeln!(writer)?;
        Ok(())
    }
}

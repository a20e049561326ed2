use crate::areas::repository::Repository;
use crate::artifacts::objects::object::Object;
use std::collections::BTreeSet;
use std::io::Write;

impl Repository {
    /// Report branches, staged files, removals, unstaged modifications and
    /// untracked files, each section name-sorted
    pub fn status(&self) -> anyhow::Result<()> {
        let head = self.head_commit()?;
        let staging = &self.state().staging;
        let working_files: BTreeSet<String> =
            self.workspace().list_files()?.into_iter().collect();

        let mut writer = self.writer();

        writeln!(writer, "=== Branches ===")?;
        for branch_name in self.state().branches.keys() {
            if branch_name == &self.state().active_branch {
                writeln!(writer, "*{}", branch_name)?;
            } else {
                writeln!(writer, "{}", branch_name)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Staged Files ===")?;
        for filename in staging.additions().keys() {
            writeln!(writer, "{}", filename)?;
        }
        writeln!(writer)?;

        writeln!(writer, "=== Removed Files ===")?;
        for filename in staging.removals().keys() {
            writeln!(writer, "{}", filename)?;
        }
        writeln!(writer)?;

        // Unstaged modifications: compare working content against the staged
        // blob when one exists, otherwise against HEAD's tracked blob.
        writeln!(writer, "=== Modifications Not Staged For Commit ===")?;
        let mut candidates: BTreeSet<&str> = head.blobs().keys().map(String::as_str).collect();
        candidates.extend(staging.additions().keys().map(String::as_str));
        for filename in candidates {
            let expected_id = staging
                .staged_blob_id(filename)
                .or_else(|| head.blob_id(filename));
            let Some(expected_id) = expected_id else {
                continue;
            };

            if !working_files.contains(filename) {
                if !staging.removals().contains_key(filename) {
                    writeln!(writer, "{} (deleted)", filename)?;
                }
                continue;
            }

            let working_id = self.working_blob(filename)?.id();
            if &working_id != expected_id {
                writeln!(writer, "{} (modified)", filename)?;
            }
        }
        writeln!(writer)?;

        writeln!(writer, "=== Untracked Files ===")?;
        for filename in &working_files {
            if !head.tracks(filename) && !staging.is_staged_for_addition(filename) {
                writeln!(writer, "{}", filename)?;
            }
        }
        writeln!(writer)?;

        Ok(())
    }
}

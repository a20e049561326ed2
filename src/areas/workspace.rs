//! Working tree access
//!
//! The repository tracks plain files directly under its root; the marker
//! directory is the only entry skipped. All paths are bare filenames relative
//! to the root.

use crate::areas::repository::REPO_DIR;
use anyhow::Context;
use std::path::Path;

#[derive(Debug)]
pub struct Workspace {
    path: Box<Path>,
}

impl Workspace {
    pub fn new(path: Box<Path>) -> Self {
        Workspace { path }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Plain filenames in the working tree, sorted by name
    pub fn list_files(&self) -> anyhow::Result<Vec<String>> {
        let mut files = Vec::new();
        for entry in std::fs::read_dir(&self.path).context("Unable to read working tree")? {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let name = entry.file_name().to_string_lossy().to_string();
            if name == REPO_DIR {
                continue;
            }
            files.push(name);
        }
        files.sort();
        Ok(files)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path.join(filename).is_file()
    }

    pub fn read_file(&self, filename: &str) -> anyhow::Result<String> {
        std::fs::read_to_string(self.path.join(filename))
            .context(format!("Unable to read working file {}", filename))
    }

    pub fn write_file(&self, filename: &str, content: &str) -> anyhow::Result<()> {
        std::fs::write(self.path.join(filename), content)
            .context(format!("Unable to write working file {}", filename))
    }

    /// Delete a working file; deleting an already-absent file is a no-op
    pub fn delete_file(&self, filename: &str) -> anyhow::Result<()> {
        let path = self.path.join(filename);
        if path.is_file() {
            std::fs::remove_file(&path)
                .context(format!("Unable to delete working file {}", filename))?;
        }
        Ok(())
    }
}

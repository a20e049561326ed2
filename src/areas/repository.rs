//! Repository aggregate
//!
//! One value owns everything an operation needs: the object store, the
//! working tree, and the mutable state record. There is deliberately no
//! module-level singleton; each invocation constructs a repository, runs one
//! operation against it, and persists the state back.

use crate::areas::object_store::ObjectStore;
use crate::areas::state::RepoState;
use crate::areas::workspace::Workspace;
use crate::artifacts::graph::CommitGraph;
use crate::artifacts::objects::blob::Blob;
use crate::artifacts::objects::commit::{Commit, DEFAULT_BRANCH};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::staging::StagingArea;
use crate::errors::KitError;
use std::cell::{RefCell, RefMut};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Name of the marker directory at the working-tree root
pub const REPO_DIR: &str = ".kit";

pub struct Repository {
    path: Box<Path>,
    writer: RefCell<Box<dyn Write>>,
    store: ObjectStore,
    workspace: Workspace,
    state: RepoState,
}

impl Repository {
    /// Initialize a new repository at `path`
    ///
    /// Creates the marker directory, both sub-stores, the deterministic root
    /// commit, and the initial state record with a single `master` branch.
    pub fn init(path: &str, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let path = Path::new(path);
        if !path.exists() {
            std::fs::create_dir_all(path)?;
        }
        let path = path.canonicalize()?;

        let kit_dir = path.join(REPO_DIR);
        if kit_dir.exists() {
            return Err(KitError::Precondition(
                "A kit repository already exists in the current directory.",
            )
            .into());
        }
        std::fs::create_dir_all(&kit_dir)?;

        let store = ObjectStore::init(kit_dir.clone().into_boxed_path())?;
        let root = Commit::root();
        let root_id = store.put_commit(&root)?;

        let mut branches = BTreeMap::new();
        branches.insert(DEFAULT_BRANCH.to_string(), root_id.clone());
        let state = RepoState {
            branches,
            remotes: BTreeMap::new(),
            head: root_id,
            active_branch: DEFAULT_BRANCH.to_string(),
            staging: StagingArea::default(),
        };
        state.save(&kit_dir)?;

        let repository = Repository {
            workspace: Workspace::new(path.clone().into_boxed_path()),
            store,
            state,
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
        };
        writeln!(
            repository.writer(),
            "Initialized empty kit repository in {}",
            repository.path.display()
        )?;

        Ok(repository)
    }

    /// Open an existing repository, loading its persisted state record
    pub fn open(path: &str, writer: Box<dyn Write>) -> anyhow::Result<Self> {
        let path = Path::new(path).canonicalize()?;
        let kit_dir = path.join(REPO_DIR);

        if !kit_dir.is_dir() {
            return Err(KitError::Precondition("Not in an initialized kit repository.").into());
        }
        let state = RepoState::load(&kit_dir)?;

        Ok(Repository {
            workspace: Workspace::new(path.clone().into_boxed_path()),
            store: ObjectStore::new(kit_dir.into_boxed_path()),
            state,
            writer: RefCell::new(writer),
            path: path.into_boxed_path(),
        })
    }

    /// Persist the full state record; called once after a mutating operation
    pub fn save(&self) -> anyhow::Result<()> {
        self.state.save(&self.kit_dir())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn kit_dir(&self) -> PathBuf {
        self.path.join(REPO_DIR)
    }

    pub fn writer(&'_ self) -> RefMut<'_, Box<dyn Write>> {
        self.writer.borrow_mut()
    }

    pub fn store(&self) -> &ObjectStore {
        &self.store
    }

    pub fn workspace(&self) -> &Workspace {
        &self.workspace
    }

    pub fn state(&self) -> &RepoState {
        &self.state
    }

    pub fn state_mut(&mut self) -> &mut RepoState {
        &mut self.state
    }

    pub fn graph(&self) -> CommitGraph<'_> {
        CommitGraph::new(&self.store)
    }

    /// The commit HEAD points at
    pub fn head_commit(&self) -> anyhow::Result<Commit> {
        self.store.get_commit(&self.state.head)
    }

    /// Replace the working tree with `target`'s tracked file set
    ///
    /// Scans for untracked files that `target` would overwrite before any
    /// write happens: either the whole tree updates or nothing does. Files
    /// tracked by the current HEAD but not by `target` are deleted.
    pub(crate) fn update_working_tree(&self, target: &Commit) -> anyhow::Result<()> {
        let head = self.head_commit()?;

        for filename in target.blobs().keys() {
            if self.workspace.exists(filename) && !head.tracks(filename) {
                return Err(KitError::Precondition(
                    "There is an untracked file in the way; delete it, or add and commit it first.",
                )
                .into());
            }
        }

        for (filename, blob_id) in target.blobs() {
            let blob = self.store.get_blob(blob_id)?;
            self.workspace.write_file(filename, blob.content())?;
        }

        for filename in head.blobs().keys() {
            if !target.tracks(filename) {
                self.workspace.delete_file(filename)?;
            }
        }

        Ok(())
    }

    /// Resolve a branch tip, with the fixed diagnostic for unknown branches
    pub(crate) fn branch_tip(&self, branch_name: &str) -> anyhow::Result<ObjectId> {
        self.state
            .branches
            .get(branch_name)
            .cloned()
            .ok_or_else(|| KitError::NotFound("A branch with that name does not exist.").into())
    }

    /// Build (but do not persist) a blob from current working-tree content
    pub(crate) fn working_blob(&self, filename: &str) -> anyhow::Result<Blob> {
        let content = self.workspace.read_file(filename)?;
        Ok(Blob::new(filename.to_string(), content))
    }
}

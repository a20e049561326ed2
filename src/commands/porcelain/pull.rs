use crate::areas::repository::Repository;

impl Repository {
    /// Fetch a remote branch and merge its tracking branch into the active one
    ///
    /// Exactly `fetch` followed by `merge`; every merge precondition and
    /// outcome (fast-forward, conflict markers, merge commit) applies
    /// unchanged.
    pub fn pull(&mut self, remote_name: &str, branch_name: &str) -> anyhow::Result<()> {
        let tracking_branch = self.fetch(remote_name, branch_name)?;
        self.merge(&tracking_branch)
    }
}

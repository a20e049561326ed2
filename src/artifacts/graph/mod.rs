//! Commit graph navigation
//!
//! Commits form a DAG through parent and second-parent id references kept in a
//! flat, id-keyed store; merge histories converge, so every traversal marks
//! visited nodes.
//!
//! ## Split-point search
//!
//! [`CommitGraph::find_split_point`] computes the three-way merge base as a
//! breadth-first first-match: build the other side's full ancestor set, then
//! walk from head in BFS order (parent before second parent) and return the
//! first dequeued commit in that set. On criss-cross histories this is NOT
//! guaranteed to be the graph-theoretic minimal common ancestor; the traversal
//! order is part of the observable contract and must not be swapped for a true
//! LCA algorithm without redefining that contract.

use crate::areas::object_store::ObjectStore;
use crate::artifacts::objects::object_id::ObjectId;
use std::collections::{HashSet, VecDeque};

pub struct CommitGraph<'a> {
    store: &'a ObjectStore,
}

impl<'a> CommitGraph<'a> {
    pub fn new(store: &'a ObjectStore) -> Self {
        CommitGraph { store }
    }

    /// The full set of commits reachable from `id`, including `id` itself
    pub fn ancestors_of(&self, id: &ObjectId) -> anyhow::Result<HashSet<ObjectId>> {
        let mut ancestors = HashSet::new();
        let mut fringe = VecDeque::new();
        fringe.push_back(id.clone());

        while let Some(current) = fringe.pop_front() {
            if !ancestors.insert(current.clone()) {
                continue;
            }
            let commit = self.store.get_commit(&current)?;
            if let Some(parent) = commit.parent() {
                fringe.push_back(parent.clone());
            }
            if let Some(second_parent) = commit.second_parent() {
                fringe.push_back(second_parent.clone());
            }
        }

        Ok(ancestors)
    }

    /// Whether `candidate` is reachable from `id`
    pub fn is_ancestor(&self, candidate: &ObjectId, id: &ObjectId) -> anyhow::Result<bool> {
        Ok(self.ancestors_of(id)?.contains(candidate))
    }

    /// Common-ancestor commit used as the three-way merge base
    ///
    /// Returns `head` itself when `head` is reachable from `other` (the
    /// fast-forward case) and `other` when the relation is reversed.
    pub fn find_split_point(
        &self,
        head: &ObjectId,
        other: &ObjectId,
    ) -> anyhow::Result<ObjectId> {
        let other_ancestors = self.ancestors_of(other)?;

        let mut visited = HashSet::new();
        let mut fringe = VecDeque::new();
        fringe.push_back(head.clone());

        while let Some(current) = fringe.pop_front() {
            if !visited.insert(current.clone()) {
                continue;
            }
            if other_ancestors.contains(&current) {
                tracing::debug!(split = %current, %head, %other, "split point found");
                return Ok(current);
            }
            let commit = self.store.get_commit(&current)?;
            if let Some(parent) = commit.parent() {
                fringe.push_back(parent.clone());
            }
            if let Some(second_parent) = commit.second_parent() {
                fringe.push_back(second_parent.clone());
            }
        }

        // unreachable for commits sharing a root, which every commit in one
        // repository does
        Err(anyhow::anyhow!(
            "Commits {} and {} share no common ancestor",
            head,
            other
        ))
    }
}

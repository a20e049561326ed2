//! Error taxonomy for repository operations
//!
//! Every user-visible failure carries exactly one fixed diagnostic and is
//! grouped by what the caller did wrong:
//!
//! - [`KitError::UserInput`]: bad or missing operands
//! - [`KitError::Precondition`]: the operation cannot run in the current
//!   repository state (nothing staged, uncommitted changes, untracked file in
//!   the way, ...)
//! - [`KitError::NotFound`]: an unknown commit, branch, or remote
//! - [`KitError::AmbiguousPrefix`]: an abbreviated commit id matching more
//!   than one stored commit
//!
//! Missing or corrupt object-store entries are not represented here; they are
//! unrecoverable hard failures surfaced as plain `anyhow` errors with context.
//! All variants abort the running command before any state is persisted. Merge
//! conflicts are deliberately *not* errors: the merge still commits and only a
//! notice is emitted.

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KitError {
    #[error("{0}")]
    UserInput(&'static str),
    #[error("{0}")]
    Precondition(&'static str),
    #[error("{0}")]
    NotFound(&'static str),
    #[error("Ambiguous commit id prefix '{0}' matches {1} commits.")]
    AmbiguousPrefix(String, usize),
}

//! kit — a single-user, local-first version-control engine
//!
//! Content-addressed snapshots of a flat directory tree, branch pointers, a
//! staging area, three-way merges with conflict markers, and filesystem-based
//! push/fetch/pull between repository instances. A "remote" is just another
//! repository root on the same machine; there is no network transport, no
//! compression and no concurrent-access protection.

pub mod areas;
pub mod artifacts;
pub mod commands;
pub mod errors;

pub use areas::repository::Repository;
pub use errors::KitError;

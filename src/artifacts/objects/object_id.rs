//! Object identifier (SHA-1 hash)
//!
//! Object IDs are 40-character hexadecimal strings identifying all objects in
//! the store (blobs and commits). Ids are pure functions of logical content:
//! identical content always yields an identical id, and collisions are assumed
//! impossible rather than handled.

use serde::{Deserialize, Serialize};
use sha1::{Digest, Sha1};

/// Length of a full hex object id
pub const OBJECT_ID_LENGTH: usize = 40;

/// Length of the abbreviated display form
pub const SHORT_OBJECT_ID_LENGTH: usize = 7;

/// Content-address of a stored object
///
/// A 40-character lowercase hexadecimal string. Stored ids are always full
/// length; abbreviated forms are resolved through the object store.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ObjectId(String);

impl ObjectId {
    /// Parse and validate a full object id from a string
    pub fn try_parse(id: String) -> anyhow::Result<Self> {
        if id.len() != OBJECT_ID_LENGTH {
            return Err(anyhow::anyhow!("Invalid object ID length: {}", id.len()));
        }
        if !id.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(anyhow::anyhow!("Invalid object ID characters: {}", id));
        }
        Ok(Self(id))
    }

    /// Digest a sequence of byte fields into an object id
    ///
    /// Fields are separated by a NUL byte so that shifting content between
    /// adjacent fields cannot produce the same digest.
    pub fn digest<'f>(fields: impl IntoIterator<Item = &'f [u8]>) -> Self {
        let mut hasher = Sha1::new();
        for field in fields {
            hasher.update(field);
            hasher.update([0u8]);
        }
        Self(format!("{:x}", hasher.finalize()))
    }

    /// Get the abbreviated display form of the id
    pub fn to_short_oid(&self) -> String {
        self.0.split_at(SHORT_OBJECT_ID_LENGTH).0.to_string()
    }
}

impl AsRef<str> for ObjectId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ObjectId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

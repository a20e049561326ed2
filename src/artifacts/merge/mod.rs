//! Three-way merge building blocks
//!
//! The merge classifies every filename against its split-point blob id, one
//! verdict per side, and resolves the pair through a fixed table (see the
//! `merge` porcelain command). Conflicts rewrite the file with whole-file
//! two-version markers; there is no line-level diffing, deliberately.

use crate::artifacts::objects::object_id::ObjectId;

/// How one side of the merge changed a file relative to the split point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SideChange {
    /// Present with the same blob id as at the split
    Unchanged,
    /// Present with a different blob id
    Modified,
    /// Not present on this side
    Absent,
}

/// Classify one side's blob id against the split-point blob id
pub fn classify(split_id: &ObjectId, side_id: Option<&ObjectId>) -> SideChange {
    match side_id {
        None => SideChange::Absent,
        Some(id) if id == split_id => SideChange::Unchanged,
        Some(_) => SideChange::Modified,
    }
}

/// Whole-file conflict content with literal markers
///
/// Either side may be absent, in which case its section is empty. The marker
/// layout is byte-exact: no trailing branch label after `>>>>>>>`.
pub fn conflict_content(head: Option<&str>, target: Option<&str>) -> String {
    format!(
        "<<<<<<< HEAD\n{}=======\n{}>>>>>>>\n",
        head.unwrap_or(""),
        target.unwrap_or("")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifacts::objects::blob::Blob;
    use crate::artifacts::objects::object::Object;
    use pretty_assertions::assert_eq;

    fn blob_id(content: &str) -> ObjectId {
        Blob::new("a.txt".to_string(), content.to_string()).id()
    }

    #[test]
    fn classification_matches_the_split_blob() {
        let split = blob_id("x");
        assert_eq!(classify(&split, Some(&blob_id("x"))), SideChange::Unchanged);
        assert_eq!(classify(&split, Some(&blob_id("y"))), SideChange::Modified);
        assert_eq!(classify(&split, None), SideChange::Absent);
    }

    #[test]
    fn conflict_markers_are_byte_exact() {
        assert_eq!(
            conflict_content(Some("y"), Some("z")),
            "<<<<<<< HEAD\ny=======\nz>>>>>>>\n"
        );
    }

    #[test]
    fn absent_sides_produce_empty_sections() {
        assert_eq!(
            conflict_content(None, Some("z\n")),
            "<<<<<<< HEAD\n=======\nz\n>>>>>>>\n"
        );
        assert_eq!(
            conflict_content(Some("y\n"), None),
            "<<<<<<< HEAD\ny\n=======\n>>>>>>>\n"
        );
    }
}

use std::io::BufRead;

/// Kind tag written in every object file header
///
/// The store keeps blobs and commits in separate sub-stores, but each file
/// still carries its type so a misfiled or corrupt entry is detected on read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectType {
    Blob,
    Commit,
}

impl ObjectType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectType::Blob => "blob",
            ObjectType::Commit => "commit",
        }
    }

    /// Read the `<type> <size>\0` header off the front of an object file
    pub fn parse_object_type(reader: &mut impl BufRead) -> anyhow::Result<Self> {
        let mut header = Vec::new();
        reader.read_until(0, &mut header)?;

        let header = String::from_utf8(header)?;
        let header = header.trim_end_matches('\0');
        let object_type = header
            .split(' ')
            .next()
            .ok_or_else(|| anyhow::anyhow!("Invalid object header: {}", header))?;

        match object_type {
            "blob" => Ok(ObjectType::Blob),
            "commit" => Ok(ObjectType::Commit),
            _ => Err(anyhow::anyhow!("Unknown object type: {}", object_type)),
        }
    }
}

impl std::fmt::Display for ObjectType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

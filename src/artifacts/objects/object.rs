use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use bytes::Bytes;
use std::io::BufRead;

/// A content-addressed value (blob or commit)
///
/// The id is derived from the object's logical fields, never from its on-disk
/// encoding, so the storage format can evolve without changing ids.
pub trait Object {
    fn object_type(&self) -> ObjectType;

    /// Content address of this object
    fn id(&self) -> ObjectId;
}

/// Serialize an object into its on-disk form, `<type> <size>\0<body>`
pub trait Packable: Object {
    fn serialize(&self) -> anyhow::Result<Bytes>;

    /// Wrap a body in the standard object header
    fn pack_body(&self, body: &[u8]) -> Bytes {
        let mut bytes = Vec::with_capacity(body.len() + 16);
        bytes.extend_from_slice(format!("{} {}\0", self.object_type().as_str(), body.len()).as_bytes());
        bytes.extend_from_slice(body);
        Bytes::from(bytes)
    }
}

/// Deserialize an object body (the header has already been consumed)
pub trait Unpackable: Sized {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self>;
}

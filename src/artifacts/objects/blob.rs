//! Blob object
//!
//! A blob is the content snapshot of one file: its name plus an opaque text
//! payload. Unlike git, the filename participates in the id, so the same
//! content under two names yields two blobs.
//!
//! ## Format
//!
//! On disk: `blob <size>\0name <filename>\n<content>`

use crate::artifacts::objects::object::{Object, Packable, Unpackable};
use crate::artifacts::objects::object_id::ObjectId;
use crate::artifacts::objects::object_type::ObjectType;
use anyhow::Context;
use bytes::Bytes;
use derive_new::new;
use std::io::BufRead;

/// Content snapshot of one working-tree file, immutable once created
#[derive(Debug, Clone, Eq, PartialEq, new)]
pub struct Blob {
    name: String,
    content: String,
}

impl Blob {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn content(&self) -> &str {
        &self.content
    }
}

impl Object for Blob {
    fn object_type(&self) -> ObjectType {
        ObjectType::Blob
    }

    fn id(&self) -> ObjectId {
        ObjectId::digest([
            self.object_type().as_str().as_bytes(),
            self.name.as_bytes(),
            self.content.as_bytes(),
        ])
    }
}

impl Packable for Blob {
    fn serialize(&self) -> anyhow::Result<Bytes> {
        let body = format!("name {}\n{}", self.name, self.content);
        Ok(self.pack_body(body.as_bytes()))
    }
}

impl Unpackable for Blob {
    fn deserialize(reader: impl BufRead) -> anyhow::Result<Self> {
        let body = reader
            .bytes()
            .collect::<Result<Vec<u8>, std::io::Error>>()?;
        let body = String::from_utf8(body)?;

        let (name_line, content) = body
            .split_once('\n')
            .context("Invalid blob object: missing name line")?;
        let name = name_line
            .strip_prefix("name ")
            .context("Invalid blob object: invalid name line")?;

        Ok(Self::new(name.to_string(), content.to_string()))
    }
}

use std::path::PathBuf;

use serde::Serialize;

use crate::serde_util::serialize_u32_hex;
use crate::spec;

use super::SECTOR_SIZE;

/// One member of a PackInfo archive.
#[derive(Clone, Serialize)]
pub struct PackEntry {
    #[serde(serialize_with = "serialize_u32_hex")]
    pub(crate) name_hash: u32,
    pub(crate) sector_offset: u32,
    pub(crate) size: u32,
    pub(crate) name: Option<String>,
    /// Entries carry no compression flag; assume gzip until probed.
    pub(crate) compressed: bool,
}

impl PackEntry {
    pub fn new(name_hash: u32, sector_offset: u32, size: u32) -> Self {
        Self {
            name_hash,
            sector_offset,
            size,
            name: None,
            compressed: true,
        }
    }

    pub fn name_hash(&self) -> u32 {
        self.name_hash
    }

    pub fn sector_offset(&self) -> u32 {
        self.sector_offset
    }

    /// Byte offset into the payload file.
    pub fn offset(&self) -> u64 {
        self.sector_offset as u64 * SECTOR_SIZE
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn is_compressed(&self) -> bool {
        self.compressed
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    /// Set the recovered name. A name is only ever set once and never to an empty string.
    pub(crate) fn set_name(&mut self, name: &str) -> bool {
        if self.name.is_some() || name.is_empty() {
            return false;
        }
        self.name = Some(name.to_string());
        true
    }

    /// Path of this entry relative to the output directory.
    pub fn relative_path(&self) -> PathBuf {
        match &self.name {
            Some(name) => PathBuf::from(name.trim_start_matches(['/', '\\'])),
            None => PathBuf::from(format!("{:08x}.BIN", self.name_hash)),
        }
    }
}

impl From<spec::PackInfoRecord> for PackEntry {
    fn from(value: spec::PackInfoRecord) -> Self {
        Self::new(value.name_hash.get(), value.sector_offset.get(), value.size.get())
    }
}

impl std::fmt::Debug for PackEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PackEntry")
            .field("name_hash", &format!("{:08x}", self.name_hash))
            .field("sector_offset", &self.sector_offset)
            .field("size", &self.size)
            .field("name", &self.name)
            .field("compressed", &self.compressed)
            .finish()
    }
}

impl std::fmt::Display for PackEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "NameHash: 0x{:08x} nSectorOffset: {:8} nSize: {:8} Name: {:60} GZip Compressed: {}",
            self.name_hash,
            self.sector_offset,
            self.size,
            self.name().unwrap_or(""),
            if self.compressed { "True" } else { "False" }
        )
    }
}

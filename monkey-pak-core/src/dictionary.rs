//! Persistent hash -> name dictionary.
//!
//! Stored as a small CSV-like text file:
//!
//! ```text
//! hash,name
//! 0000abcd,data/foo.txt
//! ```
//!
//! Names are written unescaped; everything after the first comma of a row is the name.

use std::collections::HashMap;
use std::hash::BuildHasherDefault;
use std::io::Write;
use std::path::{Path, PathBuf};

use nohash::NoHashHasher;

use crate::error::{PakError, Result};
use crate::pack::PackEntry;

pub const DICTIONARY_HEADER: &str = "hash,name";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NameDictionary {
    names: HashMap<u32, String, BuildHasherDefault<NoHashHasher<u32>>>,
}

impl NameDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load a dictionary store. Fails if the file does not exist.
    pub fn load<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(PakError::file_io(path))?;
        Self::parse(path, &text)
    }

    /// Load a dictionary store, or start empty if it does not exist yet.
    pub fn load_or_default<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        if !path.exists() {
            log::info!("Hash dictionary `{}` not found, starting empty", path.display());
            return Ok(Self::default());
        }
        Self::load(path)
    }

    /// Parse store text. `path` is only used for error messages.
    pub fn parse(path: &Path, text: &str) -> Result<Self> {
        let mut this = Self::default();
        let mut lines = text.lines().enumerate();

        let Some((_, header)) = lines.next() else {
            return Ok(this);
        };
        let header = header.trim_start_matches('\u{feff}').trim_end();
        if header != DICTIONARY_HEADER {
            return Err(PakError::InvalidDictionaryHeader {
                path: path.to_path_buf(),
                found: header.to_string(),
            });
        }

        for (i, line) in lines {
            if line.trim().is_empty() {
                continue;
            }
            let row_error = |reason: String| PakError::InvalidDictionaryRow {
                path: path.to_path_buf(),
                line: i + 1,
                reason,
            };

            let (hash, name) = line
                .split_once(',')
                .ok_or_else(|| row_error(format!("missing name column in `{}`", line)))?;
            let hash = u32::from_str_radix(hash.trim(), 16)
                .map_err(|e| row_error(format!("invalid hash `{}`: {}", hash, e)))?;
            this.names.insert(hash, name.to_string());
        }

        Ok(this)
    }

    /// Overwrite the store at `path`, rows sorted by hash.
    ///
    /// Written to a temporary file next to `path` and renamed into place.
    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        if !dir.exists() {
            std::fs::create_dir_all(&dir).map_err(PakError::file_io(&dir))?;
        }

        let mut tmp = tempfile::NamedTempFile::new_in(&dir).map_err(PakError::file_io(&dir))?;
        tmp.write_all(self.to_store_string().as_bytes())
            .and_then(|_| tmp.flush())
            .map_err(PakError::file_io(tmp.path()))?;
        tmp.persist(path).map_err(|e| PakError::FileIO {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        Ok(())
    }

    /// Serialized store contents, header first, rows sorted by hash.
    pub fn to_store_string(&self) -> String {
        let mut hashes: Vec<u32> = self.names.keys().copied().collect();
        hashes.sort_unstable();

        let mut out = String::with_capacity(16 + hashes.len() * 32);
        out.push_str(DICTIONARY_HEADER);
        out.push('\n');
        for hash in hashes {
            out.push_str(&format!("{:08x},{}\n", hash, self.names[&hash]));
        }
        out
    }

    pub fn get(&self, hash: u32) -> Option<&str> {
        self.names.get(&hash).map(String::as_str)
    }

    pub fn contains(&self, hash: u32) -> bool {
        self.names.contains_key(&hash)
    }

    pub fn insert(&mut self, hash: u32, name: impl Into<String>) -> Option<String> {
        self.names.insert(hash, name.into())
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Write recovered names back. Returns how many hashes gained a name.
    ///
    /// Entries without a recovered name never clear an existing row.
    pub fn merge_entries(&mut self, entries: &[PackEntry]) -> usize {
        let mut newly_named = 0;
        for entry in entries {
            let Some(name) = entry.name() else {
                continue;
            };
            let hash = entry.name_hash();
            match self.names.get(&hash).cloned() {
                Some(old) if old == name => {}
                Some(old) if !old.is_empty() => {
                    log::warn!("Hash {:08x}: replacing dictionary name `{}` with `{}`", hash, old, name);
                    self.names.insert(hash, name.to_string());
                }
                _ => {
                    self.names.insert(hash, name.to_string());
                    newly_named += 1;
                }
            }
        }
        newly_named
    }
}

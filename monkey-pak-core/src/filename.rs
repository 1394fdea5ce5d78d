use std::{collections::HashMap, hash::BuildHasherDefault, path::Path};

use nohash::NoHashHasher;

use crate::error::{PakError, Result};
use crate::hasher::name_hash;

/// Candidate file names keyed by their name hash.
#[derive(Debug, Clone, Default)]
pub struct FileNameTable {
    file_names: HashMap<u32, String, BuildHasherDefault<NoHashHasher<u32>>>,
}

impl FileNameTable {
    /// Load a newline separated list of candidate names.
    pub fn from_list_file<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file_names = std::fs::read_to_string(path).map_err(PakError::file_io(path))?;
        Ok(Self::from_list(&file_names))
    }

    pub fn from_list(file_names: &str) -> Self {
        let mut this = Self::default();
        for line in file_names.lines() {
            this.push_str(line);
        }
        this
    }

    /// Add a candidate. On a hash collision the later name wins.
    pub fn push_str(&mut self, file_name: &str) {
        if file_name.is_empty() {
            return;
        }
        let hash = name_hash(file_name);
        if let Some(old) = self.file_names.insert(hash, file_name.to_string())
            && old != file_name
        {
            log::warn!("Name hash collision {:08x}: `{}` replaces `{}`", hash, file_name, old);
        }
    }

    pub fn get_file_name(&self, hash: u32) -> Option<&str> {
        self.file_names.get(&hash).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.file_names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_list() {
        let table = FileNameTable::from_list("foo.txt\nbar/baz.bin\r\n\n");
        assert_eq!(table.len(), 2);
        assert_eq!(table.get_file_name(name_hash("foo.txt")), Some("foo.txt"));
        assert_eq!(table.get_file_name(name_hash("bar/baz.bin")), Some("bar/baz.bin"));
        assert_eq!(table.get_file_name(0), None);
    }

    #[test]
    fn test_last_candidate_wins() {
        // 0x41 * 0x25 + 0x01 == 0x40 * 0x25 + 0x26
        let first = "A\u{1}";
        let second = "@\u{26}";
        assert_eq!(name_hash(first), name_hash(second));

        let table = FileNameTable::from_list(&format!("{first}\n{second}\n"));
        assert_eq!(table.len(), 1);
        assert_eq!(table.get_file_name(name_hash(first)), Some(second));
    }

    #[test]
    fn test_missing_list_file() {
        assert!(FileNameTable::from_list_file("no/such/wordlist.txt").is_err());
    }
}

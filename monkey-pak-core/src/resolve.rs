use std::path::Path;

use crate::dictionary::NameDictionary;
use crate::error::Result;
use crate::filename::FileNameTable;
use crate::pack::PackEntry;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveStats {
    pub from_dictionary: usize,
    pub from_wordlist: usize,
}

impl ResolveStats {
    pub fn total(&self) -> usize {
        self.from_dictionary + self.from_wordlist
    }
}

/// Annotate entries with recovered names.
///
/// The dictionary is consulted first; the wordlist only fills entries still unnamed.
pub fn resolve_names(
    entries: &mut [PackEntry],
    dictionary: &NameDictionary,
    wordlist: Option<&FileNameTable>,
) -> ResolveStats {
    let mut stats = ResolveStats::default();

    for entry in entries.iter_mut() {
        if let Some(name) = dictionary.get(entry.name_hash())
            && entry.set_name(name)
        {
            stats.from_dictionary += 1;
        }
    }

    if let Some(wordlist) = wordlist {
        for entry in entries.iter_mut().filter(|e| e.name().is_none()) {
            if let Some(name) = wordlist.get_file_name(entry.name_hash())
                && entry.set_name(name)
            {
                stats.from_wordlist += 1;
            }
        }
    }

    stats
}

/// Load a wordlist if present. A missing file is skipped with a warning.
pub fn load_wordlist(path: &Path) -> Result<Option<FileNameTable>> {
    if !path.exists() {
        log::warn!("Could not find wordlist `{}`, skipping!", path.display());
        return Ok(None);
    }
    let table = FileNameTable::from_list_file(path)?;
    log::info!("Loaded {} candidate names from `{}`", table.len(), path.display());
    Ok(Some(table))
}

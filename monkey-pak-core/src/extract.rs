use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::dictionary::NameDictionary;
use crate::error::{PakError, Result};
use crate::pack::{ArchiveVariant, PackEntry, VariantConfig, VariantTable};
use crate::read::{self, payload::PackDataReader};
use crate::resolve::{self, ResolveStats};

type EventCallback = dyn Fn(ExtractEvent) + Send + Sync;

#[derive(Debug, Clone)]
pub enum ExtractEvent {
    Start { total: usize },
    FileDone { hash: u32, path: PathBuf },
    Finish { extracted: usize, skipped: usize },
}

#[derive(Debug, Clone)]
pub struct ExtractReport {
    pub variant: ArchiveVariant,
    pub entries: usize,
    pub extracted: usize,
    /// Zero-size entries, which produce no file.
    pub skipped: usize,
    pub resolved: ResolveStats,
    /// Hashes that gained a name in the dictionary during this run.
    pub newly_named: usize,
    pub output_dir: PathBuf,
    pub dictionary_path: PathBuf,
}

/// Index entries after name resolution and compression probing.
#[derive(Debug, Clone)]
pub struct ScannedArchive {
    pub entries: Vec<PackEntry>,
    pub dictionary: NameDictionary,
    pub resolved: ResolveStats,
}

/// Extraction of one PackInfo/PackData pair.
///
/// Paths default to the variant's entry in the [`VariantTable`] and can be overridden one by one.
pub struct PackExtractBuilder {
    variant: ArchiveVariant,
    config: VariantConfig,
    wordlist: Option<PathBuf>,
    on_event: Option<Arc<EventCallback>>,
}

impl PackExtractBuilder {
    pub fn new(variant: ArchiveVariant, table: &VariantTable) -> Self {
        Self {
            variant,
            config: table.get(variant).clone(),
            wordlist: None,
            on_event: None,
        }
    }

    /// Like [`Self::new`], failing on an unknown variant name before touching any file.
    pub fn from_variant_name(variant: &str, table: &VariantTable) -> Result<Self> {
        Ok(Self::new(variant.parse()?, table))
    }

    pub fn index(mut self, path: impl AsRef<Path>) -> Self {
        self.config.index_file = path.as_ref().to_path_buf();
        self
    }

    pub fn payload(mut self, path: impl AsRef<Path>) -> Self {
        self.config.payload_file = path.as_ref().to_path_buf();
        self
    }

    pub fn dictionary(mut self, path: impl AsRef<Path>) -> Self {
        self.config.dictionary_file = path.as_ref().to_path_buf();
        self
    }

    pub fn output_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.config.output_dir = path.as_ref().to_path_buf();
        self
    }

    pub fn wordlist(mut self, path: impl AsRef<Path>) -> Self {
        self.wordlist = Some(path.as_ref().to_path_buf());
        self
    }

    pub fn on_event<F>(mut self, on_event: F) -> Self
    where
        F: Fn(ExtractEvent) + Send + Sync + 'static,
    {
        self.on_event = Some(Arc::new(on_event));
        self
    }

    pub fn variant(&self) -> ArchiveVariant {
        self.variant
    }

    pub fn config(&self) -> &VariantConfig {
        &self.config
    }

    /// Both archive files must exist before anything is parsed.
    pub fn check_inputs(&self) -> Result<()> {
        for path in [&self.config.index_file, &self.config.payload_file] {
            if !path.is_file() {
                return Err(PakError::MissingInput { path: path.clone() });
            }
        }
        Ok(())
    }

    /// Read the index, resolve names and probe compression without extracting anything.
    pub fn scan(&self) -> Result<ScannedArchive> {
        let (scanned, _payload) = self.prepare()?;
        Ok(scanned)
    }

    /// Extract every entry and persist the updated hash dictionary.
    pub fn run(self) -> Result<ExtractReport> {
        let (scanned, mut payload) = self.prepare()?;
        let ScannedArchive {
            entries,
            mut dictionary,
            resolved,
        } = scanned;

        let output_dir = &self.config.output_dir;
        log::info!("Writing out assets to `{}`, please wait...", output_dir.display());
        if !output_dir.exists() {
            std::fs::create_dir_all(output_dir).map_err(PakError::file_io(output_dir))?;
        }

        self.emit(ExtractEvent::Start { total: entries.len() });
        let mut extracted = 0usize;
        let mut skipped = 0usize;
        for entry in &entries {
            match payload.extract_entry(entry, output_dir)? {
                Some(path) => {
                    log::debug!("{:08x} -> {}", entry.name_hash(), path.display());
                    extracted += 1;
                    self.emit(ExtractEvent::FileDone {
                        hash: entry.name_hash(),
                        path,
                    });
                }
                None => skipped += 1,
            }
        }
        self.emit(ExtractEvent::Finish { extracted, skipped });
        drop(payload);

        let newly_named = dictionary.merge_entries(&entries);
        dictionary.save(&self.config.dictionary_file)?;
        log::info!(
            "Extracted {} entries ({} empty), {} new names saved to `{}`",
            extracted,
            skipped,
            newly_named,
            self.config.dictionary_file.display()
        );

        Ok(ExtractReport {
            variant: self.variant,
            entries: entries.len(),
            extracted,
            skipped,
            resolved,
            newly_named,
            output_dir: self.config.output_dir,
            dictionary_path: self.config.dictionary_file,
        })
    }

    fn prepare(&self) -> Result<(ScannedArchive, PackDataReader<BufReader<File>>)> {
        self.check_inputs()?;

        let mut entries = read::read_index_file(&self.config.index_file)?;
        log::info!("Read {} entries from `{}`", entries.len(), self.config.index_file.display());

        let dictionary = NameDictionary::load_or_default(&self.config.dictionary_file)?;

        let wordlist = match &self.wordlist {
            Some(path) => resolve::load_wordlist(path)?,
            None => None,
        };
        let resolved = resolve::resolve_names(&mut entries, &dictionary, wordlist.as_ref());
        log::info!(
            "Resolved {} of {} names ({} from dictionary, {} from wordlist)",
            resolved.total(),
            entries.len(),
            resolved.from_dictionary,
            resolved.from_wordlist
        );

        let mut payload = PackDataReader::open(&self.config.payload_file)?;
        log::info!(
            "Opened payload `{}` ({} bytes)",
            self.config.payload_file.display(),
            payload.payload_size()
        );
        for entry in entries.iter_mut() {
            payload.probe_compression(entry)?;
        }

        for entry in &entries {
            log::info!("{}", entry);
        }

        Ok((
            ScannedArchive {
                entries,
                dictionary,
                resolved,
            },
            payload,
        ))
    }

    fn emit(&self, event: ExtractEvent) {
        if let Some(on_event) = &self.on_event {
            on_event(event);
        }
    }
}

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::PakError;

/// The known PackInfo archive flavours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArchiveVariant {
    /// Pumped & Primed `DSKIMG.INF` / `DSKIMG.BIN`.
    Dskimg,
    /// Million Monkeys assets, `DATA0.BIN` / `DATA1.BIN`.
    Pdata1,
    /// Million Monkeys audio, `DATA2.BIN` / `DATA3.BIN`.
    Pdata3,
}

impl ArchiveVariant {
    pub const ALL: [ArchiveVariant; 3] = [Self::Dskimg, Self::Pdata1, Self::Pdata3];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Dskimg => "dskimg",
            Self::Pdata1 => "pdata1",
            Self::Pdata3 => "pdata3",
        }
    }

    fn index(&self) -> usize {
        match self {
            Self::Dskimg => 0,
            Self::Pdata1 => 1,
            Self::Pdata3 => 2,
        }
    }
}

impl FromStr for ArchiveVariant {
    type Err = PakError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "dskimg" | "a" => Ok(Self::Dskimg),
            "pdata1" | "b" => Ok(Self::Pdata1),
            "pdata3" | "c" => Ok(Self::Pdata3),
            _ => Err(PakError::UnknownVariant(s.to_string())),
        }
    }
}

impl fmt::Display for ArchiveVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// File locations used for one variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariantConfig {
    pub index_file: PathBuf,
    pub payload_file: PathBuf,
    pub dictionary_file: PathBuf,
    pub output_dir: PathBuf,
}

/// Variant -> file locations.
#[derive(Debug, Clone)]
pub struct VariantTable {
    configs: [VariantConfig; 3],
}

impl VariantTable {
    /// Default layout, with hash dictionaries stored under `dictionary_dir`.
    pub fn with_dictionary_dir(dictionary_dir: impl AsRef<Path>) -> Self {
        let dir = dictionary_dir.as_ref();
        let config = |index: &str, payload: &str, dictionary: &str, output: &str| VariantConfig {
            index_file: index.into(),
            payload_file: payload.into(),
            dictionary_file: dir.join(dictionary),
            output_dir: output.into(),
        };

        Self {
            configs: [
                config("DSKIMG/DSKIMG.INF", "DSKIMG/DSKIMG.BIN", "hashmap_pap_dskimg.csv", "OUT_DSKIMG"),
                config("PDATA/DATA0.BIN", "PDATA/DATA1.BIN", "hashmap_mm_pdata1.csv", "OUT_PDATA1"),
                config("PDATA/DATA2.BIN", "PDATA/DATA3.BIN", "hashmap_mm_pdata3.csv", "OUT_PDATA3"),
            ],
        }
    }

    pub fn get(&self, variant: ArchiveVariant) -> &VariantConfig {
        &self.configs[variant.index()]
    }
}

impl Default for VariantTable {
    fn default() -> Self {
        Self::with_dictionary_dir(".")
    }
}

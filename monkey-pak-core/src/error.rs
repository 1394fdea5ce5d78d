use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, PakError>;

#[derive(Debug, thiserror::Error)]
pub enum PakError {
    #[error("Required input file `{}` not found", .path.display())]
    MissingInput { path: PathBuf },
    #[error("Unknown PackInfo variant: `{0}` (expected one of: dskimg, pdata1, pdata3)")]
    UnknownVariant(String),

    #[error("Upstream IO Error: {0}")]
    IO(#[from] std::io::Error),
    #[error("IO error on `{}`: {source}", .path.display())]
    FileIO { path: PathBuf, source: std::io::Error },

    #[error("Invalid hash dictionary header in `{}`: expected `hash,name`, found `{found}`", .path.display())]
    InvalidDictionaryHeader { path: PathBuf, found: String },
    #[error("Invalid hash dictionary row in `{}` at line {line}: {reason}", .path.display())]
    InvalidDictionaryRow { path: PathBuf, line: usize, reason: String },

    #[error("Failed to read entry {hash:08x} from the payload: {source}")]
    EntryIO { hash: u32, source: std::io::Error },
    #[error("Invalid entry range for {hash:08x}: offset={offset}, size={size}, file_size={file_size}")]
    InvalidEntryRange {
        hash: u32,
        offset: u64,
        size: u64,
        file_size: u64,
    },
    #[error("Failed to decompress entry {hash:08x}: {source}")]
    Decompression { hash: u32, source: std::io::Error },
}

impl PakError {
    pub(crate) fn file_io(path: impl Into<PathBuf>) -> impl FnOnce(std::io::Error) -> Self {
        let path = path.into();
        move |source| PakError::FileIO { path, source }
    }
}

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use crate::error::{PakError, Result};
use crate::pack::PackEntry;
use crate::spec::PackInfoRecord;

pub mod payload;

/// Read a PackInfo index file.
pub fn read_index_file<P>(path: P) -> Result<Vec<PackEntry>>
where
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let file = File::open(path).map_err(PakError::file_io(path))?;
    let mut reader = BufReader::new(file);
    read_index(&mut reader).map_err(|e| match e {
        PakError::IO(source) => PakError::FileIO {
            path: path.to_path_buf(),
            source,
        },
        e => e,
    })
}

/// Read PackInfo records until the end of the stream.
///
/// The entry count is `len / 12`; a trailing partial record is dropped.
pub fn read_index<R>(reader: &mut R) -> Result<Vec<PackEntry>>
where
    R: Read,
{
    let mut index_bytes = Vec::new();
    reader.read_to_end(&mut index_bytes)?;

    let total_files = index_bytes.len() / PackInfoRecord::SIZE;
    let mut entries = Vec::with_capacity(total_files);
    for chunk in index_bytes.chunks_exact(PackInfoRecord::SIZE) {
        let record = PackInfoRecord::from_bytes(chunk)
            .ok_or_else(|| std::io::Error::new(std::io::ErrorKind::InvalidData, "short index record"))?;
        entries.push(PackEntry::from(record));
    }

    Ok(entries)
}

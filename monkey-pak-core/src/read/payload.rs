use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::{Path, PathBuf};

use byteorder::{ByteOrder, LittleEndian};

use crate::compression::{self, GZIP_MAGIC};
use crate::error::{PakError, Result};
use crate::pack::PackEntry;

/// Random-access reader over a PackData payload.
pub struct PackDataReader<R> {
    reader: R,
    len: u64,
}

impl PackDataReader<BufReader<File>> {
    pub fn open<P>(path: P) -> Result<Self>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let file = File::open(path).map_err(PakError::file_io(path))?;
        Self::new(BufReader::new(file)).map_err(|e| match e {
            PakError::IO(source) => PakError::FileIO {
                path: path.to_path_buf(),
                source,
            },
            e => e,
        })
    }
}

impl<R> PackDataReader<R>
where
    R: Read + Seek,
{
    pub fn new(mut reader: R) -> Result<Self> {
        let len = reader.seek(SeekFrom::End(0))?;
        Ok(Self { reader, len })
    }

    /// Payload size in bytes.
    pub fn payload_size(&self) -> u64 {
        self.len
    }

    /// Sniff the gzip magic at the start of the entry and record the result on it.
    ///
    /// Must run before [`Self::read_entry`], which trusts the flag.
    pub fn probe_compression(&mut self, entry: &mut PackEntry) -> Result<bool> {
        let entry_io = |source| PakError::EntryIO {
            hash: entry.name_hash(),
            source,
        };
        self.reader.seek(SeekFrom::Start(entry.offset())).map_err(entry_io)?;
        let mut magic = Vec::with_capacity(2);
        (&mut self.reader).take(2).read_to_end(&mut magic).map_err(entry_io)?;

        entry.compressed = magic.len() == 2 && LittleEndian::read_u16(&magic) == GZIP_MAGIC;
        Ok(entry.compressed)
    }

    /// Read the stored bytes of an entry as-is.
    pub fn read_raw(&mut self, entry: &PackEntry) -> Result<Vec<u8>> {
        let size = entry.size() as u64;
        if entry.offset() + size > self.len {
            return Err(PakError::InvalidEntryRange {
                hash: entry.name_hash(),
                offset: entry.offset(),
                size,
                file_size: self.len,
            });
        }

        let entry_io = |source| PakError::EntryIO {
            hash: entry.name_hash(),
            source,
        };
        self.reader.seek(SeekFrom::Start(entry.offset())).map_err(entry_io)?;
        let mut data = vec![0; entry.size() as usize];
        self.reader.read_exact(&mut data).map_err(entry_io)?;

        Ok(data)
    }

    /// Read an entry, inflating it if it was probed as gzip.
    pub fn read_entry(&mut self, entry: &PackEntry) -> Result<Vec<u8>> {
        let data = self.read_raw(entry)?;
        if !entry.is_compressed() {
            return Ok(data);
        }

        compression::decompress_gzip(&data).map_err(|source| PakError::Decompression {
            hash: entry.name_hash(),
            source,
        })
    }

    /// Write an entry below `output_dir`, returning the written path.
    ///
    /// Zero-size entries produce no file. Existing files are overwritten.
    pub fn extract_entry(&mut self, entry: &PackEntry, output_dir: &Path) -> Result<Option<PathBuf>> {
        if entry.is_empty() {
            return Ok(None);
        }

        let data = self.read_entry(entry)?;

        let out_path = output_dir.join(entry.relative_path());
        if let Some(parent) = out_path.parent()
            && !parent.exists()
        {
            std::fs::create_dir_all(parent).map_err(PakError::file_io(parent))?;
        }
        std::fs::write(&out_path, &data).map_err(PakError::file_io(&out_path))?;

        Ok(Some(out_path))
    }
}

#[cfg(test)]
mod tests {
    use std::io::{Cursor, Write};

    use flate2::write::GzEncoder;

    use super::*;
    use crate::pack::SECTOR_SIZE;

    fn gzip(data: &[u8]) -> Vec<u8> {
        let mut encoder = GzEncoder::new(Vec::new(), flate2::Compression::default());
        encoder.write_all(data).unwrap();
        encoder.finish().unwrap()
    }

    /// Payload with `sections` placed at consecutive sectors.
    fn payload(sections: &[&[u8]]) -> Vec<u8> {
        let mut out = Vec::new();
        for section in sections {
            let mut sector = section.to_vec();
            let padded = sector.len().div_ceil(SECTOR_SIZE as usize).max(1) * SECTOR_SIZE as usize;
            sector.resize(padded, 0);
            out.extend_from_slice(&sector);
        }
        out
    }

    #[test]
    fn test_probe_compression() {
        let compressed = gzip(b"hello");
        let data = payload(&[&compressed, b"plain data"]);
        let mut reader = PackDataReader::new(Cursor::new(data)).unwrap();

        let mut gz_entry = PackEntry::new(0x1, 0, compressed.len() as u32);
        let mut raw_entry = PackEntry::new(0x2, 1, 10);
        assert!(reader.probe_compression(&mut gz_entry).unwrap());
        assert!(!reader.probe_compression(&mut raw_entry).unwrap());
        assert!(gz_entry.is_compressed());
        assert!(!raw_entry.is_compressed());
    }

    #[test]
    fn test_probe_past_end() {
        let mut reader = PackDataReader::new(Cursor::new(vec![0x1F])).unwrap();
        let mut entry = PackEntry::new(0x1, 0, 0);
        assert!(!reader.probe_compression(&mut entry).unwrap());
        let mut entry = PackEntry::new(0x1, 4, 0);
        assert!(!reader.probe_compression(&mut entry).unwrap());
    }

    #[test]
    fn test_read_entry() {
        let compressed = gzip(b"ABC");
        let data = payload(&[b"raw bytes!", &compressed]);
        let mut reader = PackDataReader::new(Cursor::new(data)).unwrap();

        let mut raw_entry = PackEntry::new(0x1, 0, 10);
        let mut gz_entry = PackEntry::new(0x2, 1, compressed.len() as u32);
        reader.probe_compression(&mut raw_entry).unwrap();
        reader.probe_compression(&mut gz_entry).unwrap();

        assert_eq!(reader.read_entry(&raw_entry).unwrap(), b"raw bytes!");
        assert_eq!(reader.read_entry(&gz_entry).unwrap(), b"ABC");
        assert_eq!(reader.read_raw(&gz_entry).unwrap(), compressed);
    }

    #[test]
    fn test_corrupt_gzip() {
        let mut compressed = gzip(b"some longer content to compress");
        compressed[2] = 0x00; // compression method must be deflate
        let data = payload(&[&compressed]);
        let mut reader = PackDataReader::new(Cursor::new(data)).unwrap();

        let mut entry = PackEntry::new(0xDEAD, 0, compressed.len() as u32);
        assert!(reader.probe_compression(&mut entry).unwrap());
        let err = reader.read_entry(&entry).unwrap_err();
        assert!(matches!(err, PakError::Decompression { hash: 0xDEAD, .. }));
    }

    #[test]
    fn test_extract_entry() {
        let dir = tempfile::tempdir().unwrap();
        let compressed = gzip(b"hello");
        let data = payload(&[&compressed, b"raw"]);
        let mut reader = PackDataReader::new(Cursor::new(data)).unwrap();

        let mut named = PackEntry::new(0x1, 0, compressed.len() as u32);
        named.set_name("sub/dir/hello.txt");
        let mut unnamed = PackEntry::new(0xBEEF, 1, 3);
        let empty = PackEntry::new(0x3, 0, 0);
        reader.probe_compression(&mut named).unwrap();
        reader.probe_compression(&mut unnamed).unwrap();

        let path = reader.extract_entry(&named, dir.path()).unwrap().unwrap();
        assert_eq!(path, dir.path().join("sub/dir/hello.txt"));
        assert_eq!(std::fs::read(&path).unwrap(), b"hello");

        let path = reader.extract_entry(&unnamed, dir.path()).unwrap().unwrap();
        assert_eq!(path, dir.path().join("0000beef.BIN"));
        assert_eq!(std::fs::read(&path).unwrap(), b"raw");

        assert!(reader.extract_entry(&empty, dir.path()).unwrap().is_none());
        assert!(!dir.path().join("00000003.BIN").exists());
    }

    #[test]
    fn test_extract_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("00000001.BIN"), b"old contents").unwrap();
        let mut reader = PackDataReader::new(Cursor::new(b"new".to_vec())).unwrap();
        let mut entry = PackEntry::new(0x1, 0, 3);
        reader.probe_compression(&mut entry).unwrap();
        reader.extract_entry(&entry, dir.path()).unwrap();
        assert_eq!(std::fs::read(dir.path().join("00000001.BIN")).unwrap(), b"new");
    }

    #[test]
    fn test_read_multi_member_gzip() {
        let mut compressed = gzip(b"first-");
        compressed.extend_from_slice(&gzip(b"second"));
        let data = payload(&[&compressed]);
        let mut reader = PackDataReader::new(Cursor::new(data)).unwrap();

        let mut entry = PackEntry::new(0x1, 0, compressed.len() as u32);
        assert!(reader.probe_compression(&mut entry).unwrap());
        assert_eq!(reader.read_entry(&entry).unwrap(), b"first-second");
    }

    #[test]
    fn test_entry_past_end() {
        let dir = tempfile::tempdir().unwrap();
        let mut reader = PackDataReader::new(Cursor::new(b"raw".to_vec())).unwrap();
        assert_eq!(reader.payload_size(), 3);

        let mut entry = PackEntry::new(0xCAFEBABE, 0, 100);
        reader.probe_compression(&mut entry).unwrap();
        let err = reader.extract_entry(&entry, dir.path()).unwrap_err();
        assert!(matches!(
            err,
            PakError::InvalidEntryRange {
                hash: 0xCAFEBABE,
                offset: 0,
                size: 100,
                file_size: 3
            }
        ));
        assert!(err.to_string().contains("cafebabe"));
        assert!(!dir.path().join("cafebabe.BIN").exists());

        let far = PackEntry::new(0x2, 1, 1);
        assert!(matches!(
            reader.read_raw(&far).unwrap_err(),
            PakError::InvalidEntryRange { hash: 0x2, .. }
        ));
    }

    #[test]
    fn test_open_missing_payload() {
        let err = PackDataReader::open("no/such/DATA1.BIN").err().unwrap();
        assert!(matches!(err, PakError::FileIO { ref path, .. } if path.ends_with("DATA1.BIN")));
    }
}

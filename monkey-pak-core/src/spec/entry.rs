use zerocopy::byteorder::{LittleEndian, U32};
use zerocopy::{FromBytes, Immutable, IntoBytes, KnownLayout, Unaligned};

/// Raw PackInfo index record, 12 bytes, little-endian.
#[derive(Debug, Clone, FromBytes, IntoBytes, Immutable, KnownLayout, Unaligned)]
#[repr(C)]
pub struct PackInfoRecord {
    pub name_hash: U32<LittleEndian>,
    /// Multiply by the sector size to get the payload offset.
    pub sector_offset: U32<LittleEndian>,
    pub size: U32<LittleEndian>,
}

static_assertions::assert_eq_size!(PackInfoRecord, [u8; 12]);

impl PackInfoRecord {
    pub const SIZE: usize = std::mem::size_of::<Self>();

    /// Parse a record from exactly [`Self::SIZE`] bytes.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        Self::read_from_bytes(bytes).ok()
    }

    #[cfg(test)]
    pub fn new(name_hash: u32, sector_offset: u32, size: u32) -> Self {
        Self {
            name_hash: U32::new(name_hash),
            sector_offset: U32::new(sector_offset),
            size: U32::new(size),
        }
    }

    #[cfg(test)]
    pub fn into_bytes(self) -> [u8; Self::SIZE] {
        let mut buf = [0u8; Self::SIZE];
        buf.copy_from_slice(self.as_bytes());
        buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_read_write() {
        let bytes = &[
            0x78, 0x56, 0x34, 0x12, 0x10, 0x00, 0x00, 0x00, 0x00, 0x08, 0x01, 0x00,
        ];
        let record = PackInfoRecord::from_bytes(bytes).unwrap();
        assert_eq!(record.name_hash.get(), 0x12345678);
        assert_eq!(record.sector_offset.get(), 16);
        assert_eq!(record.size.get(), 0x10800);

        let write_bytes = record.into_bytes();
        assert_eq!(write_bytes, *bytes);
    }

    #[test]
    fn test_wrong_length() {
        assert!(PackInfoRecord::from_bytes(&[0u8; 11]).is_none());
        assert!(PackInfoRecord::new(1, 2, 3).into_bytes().len() == PackInfoRecord::SIZE);
    }
}

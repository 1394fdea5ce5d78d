mod entry;
mod variant;

pub use entry::*;
pub use variant::*;

/// Addressing unit of the PackData payload.
pub const SECTOR_SIZE: u64 = 0x800;

//! Name hash used by the PackInfo index of Pumped & Primed and Million Monkeys.

const MULTIPLIER: u32 = 0x25;

/// Hash a file name the way the game does.
///
/// Every character contributes its code point: `acc = acc * 0x25 + c`, wrapping at 32 bits.
pub fn name_hash(name: &str) -> u32 {
    name.chars()
        .fold(0u32, |acc, c| acc.wrapping_mul(MULTIPLIER).wrapping_add(c as u32))
}

/// Extension for hashing anything that can be viewed as a file name.
pub trait NameHashExt {
    fn name_hash(&self) -> u32;
}

impl<T> NameHashExt for T
where
    T: AsRef<str> + ?Sized,
{
    fn name_hash(&self) -> u32 {
        name_hash(self.as_ref())
    }
}

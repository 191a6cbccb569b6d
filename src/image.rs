//! # Register Image
//!
//! The in-memory copy of a device's 256-byte register space. An image is
//! filled once by a [`RegisterSource`](crate::source::RegisterSource) and then
//! only read. Addresses that were never written read as zero, and reads past
//! the end of the register space also yield zero, so decoding a sparse image
//! never fails.

use crate::constants::REGISTER_SPACE;

/// Snapshot of the register space, indexed by one-byte command code.
#[derive(Clone, PartialEq, Eq)]
pub struct RegisterImage {
    bytes: [u8; REGISTER_SPACE],
    present: [bool; REGISTER_SPACE],
}

impl Default for RegisterImage {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for RegisterImage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RegisterImage")
            .field("populated", &self.populated())
            .finish()
    }
}

impl RegisterImage {
    /// Creates an empty image; every address reads as zero.
    pub fn new() -> Self {
        RegisterImage {
            bytes: [0; REGISTER_SPACE],
            present: [false; REGISTER_SPACE],
        }
    }

    /// Builds an image whose first `data.len()` addresses hold `data`.
    ///
    /// Bytes beyond the register space are ignored.
    pub fn from_bytes(data: &[u8]) -> Self {
        let mut image = Self::new();
        for (addr, &value) in data.iter().enumerate().take(REGISTER_SPACE) {
            image.set(addr, value);
        }
        image
    }

    /// Stores `value` at `addr`. Returns `false` when `addr` lies outside
    /// the register space and nothing was written.
    pub fn set(&mut self, addr: usize, value: u8) -> bool {
        match self.bytes.get_mut(addr) {
            Some(slot) => {
                *slot = value;
                self.present[addr] = true;
                true
            }
            None => false,
        }
    }

    /// Reads the byte at `addr`, or zero if it was never set.
    pub fn byte(&self, addr: usize) -> u8 {
        self.bytes.get(addr).copied().unwrap_or(0)
    }

    /// Composes the little-endian word at `addr` / `addr + 1`.
    pub fn word(&self, addr: usize) -> u16 {
        u16::from_le_bytes([self.byte(addr), self.byte(addr + 1)])
    }

    /// Reads `len` consecutive bytes starting at `addr`, zero-filling gaps.
    pub fn bytes(&self, addr: usize, len: usize) -> Vec<u8> {
        (addr..addr + len).map(|a| self.byte(a)).collect()
    }

    /// Whether `addr` was explicitly written during population.
    pub fn is_set(&self, addr: usize) -> bool {
        self.present.get(addr).copied().unwrap_or(false)
    }

    /// Number of explicitly written addresses.
    pub fn populated(&self) -> usize {
        self.present.iter().filter(|p| **p).count()
    }

    /// Iterates over explicitly written `(address, value)` pairs in address order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, u8)> + '_ {
        self.bytes
            .iter()
            .enumerate()
            .filter(|(addr, _)| self.present[*addr])
            .map(|(addr, value)| (addr, *value))
    }

    /// The full register space, unset addresses as zero.
    pub fn as_bytes(&self) -> &[u8; REGISTER_SPACE] {
        &self.bytes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_image_reads_zero() {
        let image = RegisterImage::new();
        assert_eq!(image.byte(0x00), 0);
        assert_eq!(image.word(0x88), 0);
        assert_eq!(image.populated(), 0);
    }

    #[test]
    fn test_word_is_little_endian() {
        let mut image = RegisterImage::new();
        image.set(0x8B, 0x34);
        image.set(0x8C, 0x12);
        assert_eq!(image.word(0x8B), 0x1234);
    }

    #[test]
    fn test_word_at_last_address_uses_zero_high_byte() {
        let mut image = RegisterImage::new();
        image.set(0xFF, 0xAB);
        assert_eq!(image.word(0xFF), 0x00AB);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut image = RegisterImage::new();
        assert!(!image.set(0x100, 0x55));
        assert_eq!(image.populated(), 0);
        assert_eq!(image.byte(0x100), 0);
    }

    #[test]
    fn test_later_writes_overwrite() {
        let mut image = RegisterImage::new();
        image.set(0x10, 1);
        image.set(0x10, 2);
        assert_eq!(image.byte(0x10), 2);
        assert_eq!(image.populated(), 1);
    }

    #[test]
    fn test_iter_skips_unset() {
        let image = {
            let mut i = RegisterImage::new();
            i.set(3, 0x33);
            i.set(1, 0x11);
            i
        };
        let pairs: Vec<_> = image.iter().collect();
        assert_eq!(pairs, vec![(1, 0x11), (3, 0x33)]);
    }

    #[test]
    fn test_from_bytes_truncates() {
        let image = RegisterImage::from_bytes(&[0xAA; 300]);
        assert_eq!(image.populated(), REGISTER_SPACE);
        assert_eq!(image.bytes(0xFE, 4), vec![0xAA, 0xAA, 0, 0]);
    }
}

use std::fmt;

use crate::error::{HuffmanError, Result};

/// Occurrence count of every byte value seen in an input.
///
/// Backed by a 256-slot counter array; only slots with a non-zero count are
/// part of the table's logical content.
#[derive(Clone, PartialEq, Eq)]
pub struct FrequencyTable {
    counts: [u64; 256],
    symbols: usize,
    total: u64,
}

impl FrequencyTable {
    pub fn new() -> Self {
        FrequencyTable {
            counts: [0; 256],
            symbols: 0,
            total: 0,
        }
    }

    /// Counts every byte of `bytes` in a single pass.
    pub fn from_bytes(bytes: &[u8]) -> Self {
        let mut counts = [0u64; 256];
        for &byte in bytes {
            counts[byte as usize] += 1;
        }

        let symbols = counts.iter().filter(|&&c| c > 0).count();
        FrequencyTable {
            counts,
            symbols,
            total: bytes.len() as u64,
        }
    }

    /// Rebuilds a table from persisted `(byte, count)` pairs.
    ///
    /// Duplicate symbols, zero counts and totals that do not fit in a `u64`
    /// are rejected as container corruption.
    pub fn from_pairs<I>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (u8, u64)>,
    {
        let mut table = FrequencyTable::new();
        for (byte, count) in pairs {
            if count == 0 {
                return Err(HuffmanError::corrupt(format!(
                    "symbol 0x{:02x} stored with zero count",
                    byte
                )));
            }
            if table.counts[byte as usize] != 0 {
                return Err(HuffmanError::corrupt(format!(
                    "symbol 0x{:02x} stored twice",
                    byte
                )));
            }
            table.total = table
                .total
                .checked_add(count)
                .ok_or_else(|| HuffmanError::corrupt("frequency total overflows u64"))?;
            table.counts[byte as usize] = count;
            table.symbols += 1;
        }
        Ok(table)
    }

    pub fn get(&self, byte: u8) -> u64 {
        self.counts[byte as usize]
    }

    /// Number of distinct byte values observed.
    pub fn len(&self) -> usize {
        self.symbols
    }

    pub fn is_empty(&self) -> bool {
        self.symbols == 0
    }

    /// Sum of all counts, i.e. the length of the counted input.
    pub fn total(&self) -> u64 {
        self.total
    }

    /// Observed `(byte, count)` pairs in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, u64)> + '_ {
        self.counts
            .iter()
            .enumerate()
            .filter(|&(_, &count)| count > 0)
            .map(|(byte, &count)| (byte as u8, count))
    }
}

impl Default for FrequencyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FrequencyTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl From<&[u8]> for FrequencyTable {
    fn from(bytes: &[u8]) -> Self {
        FrequencyTable::from_bytes(bytes)
    }
}

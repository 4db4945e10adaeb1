//! Container format.
//!
//! ```text
//! u32 LE        symbol count M
//! M x (u8, u64 LE)  (byte value, count), ascending byte value
//! u64 LE        original length in bytes
//! u8            valid bits in the last payload byte (0 = byte aligned)
//! ..            payload bytes
//! ```
//!
//! Only the frequency table is stored; the decoder rebuilds the tree from it.

use std::io::{self, Cursor, Read};

use crate::bit_vec::PackedPayload;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;

const MAX_SYMBOLS: u32 = 256;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompressedData {
    pub frequencies: FrequencyTable,
    pub original_length: u64,
    pub payload: PackedPayload,
}

impl CompressedData {
    /// Pairs a frequency table with the payload packed from the same input.
    pub fn new(frequencies: FrequencyTable, payload: PackedPayload) -> Self {
        CompressedData {
            original_length: frequencies.total(),
            frequencies,
            payload,
        }
    }

    /// Container for the empty input.
    pub fn empty() -> Self {
        CompressedData::new(FrequencyTable::new(), PackedPayload::new())
    }

    pub fn symbol_count(&self) -> usize {
        self.frequencies.len()
    }

    /// Size of the serialized header, everything but the payload bytes.
    pub fn header_len(&self) -> usize {
        4 + self.frequencies.len() * 9 + 8 + 1
    }

    pub fn serialize(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.header_len() + self.payload.len());

        // write count of unique bytes, then each (byte, freq) pair
        let unique_byte_count = self.frequencies.len() as u32;
        bytes.extend_from_slice(&unique_byte_count.to_le_bytes());
        for (byte, freq) in self.frequencies.iter() {
            bytes.push(byte);
            bytes.extend_from_slice(&freq.to_le_bytes());
        }

        bytes.extend_from_slice(&self.original_length.to_le_bytes());
        bytes.push(self.payload.valid_bits());
        bytes.extend_from_slice(self.payload.as_bytes());
        bytes
    }

    pub fn deserialize(data: &[u8]) -> Result<CompressedData> {
        let mut cursor = Cursor::new(data);

        let count = read_u32(&mut cursor, "symbol count")?;
        if count > MAX_SYMBOLS {
            return Err(HuffmanError::corrupt(format!(
                "symbol count {} exceeds {}",
                count, MAX_SYMBOLS
            )));
        }

        let mut pairs = Vec::with_capacity(count as usize);
        for _ in 0..count {
            let byte = read_u8(&mut cursor, "frequency entry")?;
            let freq = read_u64(&mut cursor, "frequency entry")?;
            pairs.push((byte, freq));
        }
        let frequencies = FrequencyTable::from_pairs(pairs)?;

        let original_length = read_u64(&mut cursor, "original length")?;
        let valid_bits = read_u8(&mut cursor, "valid-bit count")?;

        if frequencies.total() != original_length {
            return Err(HuffmanError::corrupt(format!(
                "frequency total {} does not match original length {}",
                frequencies.total(),
                original_length
            )));
        }

        let mut compressed_bits = Vec::new();
        cursor.read_to_end(&mut compressed_bits)?;

        if original_length == 0 && !compressed_bits.is_empty() {
            return Err(HuffmanError::corrupt(format!(
                "{} payload bytes for an empty input",
                compressed_bits.len()
            )));
        }
        if original_length > 0 && compressed_bits.is_empty() {
            return Err(HuffmanError::corrupt("payload is missing"));
        }

        Ok(CompressedData {
            frequencies,
            original_length,
            payload: PackedPayload::from_parts(compressed_bits, valid_bits)?,
        })
    }
}

fn read_field<const N: usize>(cursor: &mut Cursor<&[u8]>, field: &str) -> Result<[u8; N]> {
    let mut buf = [0u8; N];
    cursor.read_exact(&mut buf).map_err(|e| match e.kind() {
        io::ErrorKind::UnexpectedEof => {
            HuffmanError::corrupt(format!("container truncated in {}", field))
        }
        _ => HuffmanError::Io(e),
    })?;
    Ok(buf)
}

fn read_u8(cursor: &mut Cursor<&[u8]>, field: &str) -> Result<u8> {
    read_field::<1>(cursor, field).map(|b| b[0])
}

fn read_u32(cursor: &mut Cursor<&[u8]>, field: &str) -> Result<u32> {
    read_field::<4>(cursor, field).map(u32::from_le_bytes)
}

fn read_u64(cursor: &mut Cursor<&[u8]>, field: &str) -> Result<u64> {
    read_field::<8>(cursor, field).map(u64::from_le_bytes)
}

//! Bit-level packing of codes into bytes and the tree walk that undoes it.
//!
//! Bits are written most-significant-bit first. The final byte is padded
//! with zeros on the right and the number of meaningful bits in it is carried
//! next to the bytes, so padding is never mistaken for the start of a code.

use std::io::Cursor;

use bitstream_io::{BigEndian, BitRead, BitReader, BitWrite, BitWriter};

use crate::code_table::CodeTable;
use crate::error::{HuffmanError, Result};
use crate::hufftree::{HuffNode, HuffmanTree};

/// Packed code stream plus the valid-bit count of its final byte.
///
/// `valid_bits` is 0 when the stream ends on a byte boundary (including the
/// empty stream), otherwise 1–7. A value of 8 is accepted on input and means
/// the same as 0.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PackedPayload {
    bytes: Vec<u8>,
    valid_bits: u8,
}

impl PackedPayload {
    pub fn new() -> Self {
        PackedPayload {
            bytes: Vec::new(),
            valid_bits: 0,
        }
    }

    /// Wraps bytes read from a container, checking the valid-bit count.
    pub fn from_parts(bytes: Vec<u8>, valid_bits: u8) -> Result<Self> {
        if valid_bits > 8 {
            return Err(HuffmanError::corrupt(format!(
                "valid-bit count {} exceeds 8",
                valid_bits
            )));
        }
        if bytes.is_empty() && valid_bits != 0 {
            return Err(HuffmanError::corrupt(format!(
                "valid-bit count {} for an empty payload",
                valid_bits
            )));
        }
        Ok(PackedPayload { bytes, valid_bits })
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn valid_bits(&self) -> u8 {
        self.valid_bits
    }

    /// Number of meaningful bits in the payload.
    pub fn bit_len(&self) -> u64 {
        match self.bytes.len() {
            0 => 0,
            n => {
                let last = match self.valid_bits {
                    0 | 8 => 8,
                    v => v as u64,
                };
                (n as u64 - 1) * 8 + last
            }
        }
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Concatenates the code of every byte of `data`, in input order.
pub fn pack(data: &[u8], table: &CodeTable) -> Result<PackedPayload> {
    let mut bytes = Vec::new();
    let mut bit_count: u64 = 0;
    {
        let mut writer = BitWriter::endian(&mut bytes, BigEndian);
        for &byte in data {
            let code = table
                .get(byte)
                .ok_or(HuffmanError::InputConsistency { byte })?;
            for &bit in code.bits() {
                writer.write_bit(bit)?;
            }
            bit_count += code.len() as u64;
        }
        writer.byte_align()?;
    }

    Ok(PackedPayload {
        bytes,
        valid_bits: (bit_count % 8) as u8,
    })
}

/// Walks `tree` bit by bit until `original_length` bytes have been emitted.
///
/// Padding bits after the last valid bit are never read. Running out of valid
/// bits before `original_length` bytes exist is a truncated payload; valid
/// bits left over once they do exist mean the payload and the length
/// disagree.
pub fn unpack(
    payload: &PackedPayload,
    original_length: usize,
    tree: &HuffmanTree,
) -> Result<Vec<u8>> {
    let available = payload.bit_len();
    let capacity = usize::try_from(available).unwrap_or(usize::MAX);
    let mut result = Vec::with_capacity(original_length.min(capacity));

    let mut reader = BitReader::endian(Cursor::new(payload.as_bytes()), BigEndian);
    let mut consumed: u64 = 0;
    let mut node = &tree.root;

    while result.len() < original_length {
        match node {
            HuffNode::Leaf { byte, .. } => {
                result.push(*byte);
                node = &tree.root;
            }
            HuffNode::Internal { left, right, .. } => {
                if consumed >= available {
                    return Err(HuffmanError::truncated(result.len(), original_length));
                }
                let bit = reader
                    .read_bit()
                    .map_err(|_| HuffmanError::truncated(result.len(), original_length))?;
                consumed += 1;
                node = if bit { &**right } else { &**left };
            }
            HuffNode::Vacant => {
                return Err(HuffmanError::corrupt(format!(
                    "bit {} selects an unused branch",
                    consumed
                )));
            }
        }
    }

    if consumed != available {
        return Err(HuffmanError::corrupt(format!(
            "{} valid bits remain after decoding {} bytes",
            available - consumed,
            original_length
        )));
    }

    Ok(result)
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::code_table::Code;

    fn table(entries: &[(u8, &str)]) -> CodeTable {
        let mut table = CodeTable::new();
        for &(byte, code) in entries {
            table.insert(byte, Code::from(code));
        }
        table
    }

    #[test]
    fn test_pack_msb_first_with_padding() {
        let t = table(&[(b'a', "0"), (b'b', "10"), (b'c', "11")]);
        // a b c a -> 0 10 11 0 = 0101_10 -> 0b0101_1000, 6 valid bits
        let payload = pack(b"abca", &t).unwrap();
        assert_eq!(payload.as_bytes(), &[0b0101_1000]);
        assert_eq!(payload.valid_bits(), 6);
        assert_eq!(payload.bit_len(), 6);
    }

    #[test]
    fn test_pack_byte_aligned_has_zero_valid_bits() {
        let t = table(&[(b'a', "0"), (b'b', "1")]);
        let payload = pack(b"abababab", &t).unwrap();
        assert_eq!(payload.as_bytes(), &[0b0101_0101]);
        assert_eq!(payload.valid_bits(), 0);
        assert_eq!(payload.bit_len(), 8);
    }

    #[test]
    fn test_pack_spans_bytes() {
        let t = table(&[(1, "111"), (2, "0")]);
        let payload = pack(&[1, 1, 1, 2], &t).unwrap();
        // 111 111 111 0 -> 1111_1111 10 -> [0xff, 0b1000_0000], 2 valid
        assert_eq!(payload.as_bytes(), &[0xff, 0x80]);
        assert_eq!(payload.valid_bits(), 2);
        assert_eq!(payload.bit_len(), 10);
    }

    #[test]
    fn test_pack_rejects_unknown_byte() {
        let t = table(&[(b'a', "0")]);
        match pack(b"ab", &t) {
            Err(HuffmanError::InputConsistency { byte }) => assert_eq!(byte, b'b'),
            other => panic!("expected input consistency error, got {:?}", other),
        }
    }

    #[test]
    fn test_pack_empty() {
        let payload = pack(&[], &CodeTable::new()).unwrap();
        assert!(payload.is_empty());
        assert_eq!(payload.valid_bits(), 0);
    }

    #[test]
    fn test_unpack_ignores_padding() {
        let data = b"aaab";
        let tree = HuffmanTree::from_bytes(data).unwrap();
        let payload = pack(data, &tree.generate_table()).unwrap();
        assert_eq!(payload.valid_bits(), 4);

        // padding bits set to ones must not be interpreted
        let mut bytes = payload.as_bytes().to_vec();
        bytes[0] |= 0x0f;
        let dirty = PackedPayload::from_parts(bytes, 4).unwrap();
        assert_eq!(unpack(&dirty, 4, &tree).unwrap(), data.to_vec());
    }

    #[test]
    fn test_unpack_single_symbol() {
        let data = [7u8; 13];
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let payload = pack(&data, &tree.generate_table()).unwrap();
        assert_eq!(payload.as_bytes(), &[0, 0]);
        assert_eq!(payload.valid_bits(), 5);
        assert_eq!(unpack(&payload, 13, &tree).unwrap(), data.to_vec());
    }

    #[test]
    fn test_unpack_vacant_branch_is_corrupt() {
        let tree = HuffmanTree::from_bytes(&[7u8; 4]).unwrap();
        let payload = PackedPayload::from_parts(vec![0b0010_0000], 4).unwrap();
        let err = unpack(&payload, 4, &tree).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptContainer { .. }));
    }

    #[test]
    fn test_unpack_truncated() {
        let data = b"hello, huffman";
        let tree = HuffmanTree::from_bytes(data).unwrap();
        let payload = pack(data, &tree.generate_table()).unwrap();
        let mut bytes = payload.as_bytes().to_vec();
        bytes.pop();
        let short = PackedPayload::from_parts(bytes, 0).unwrap();
        let err = unpack(&short, data.len(), &tree).unwrap_err();
        assert!(matches!(err, HuffmanError::TruncatedPayload { .. }));
    }

    #[test]
    fn test_unpack_rejects_leftover_bits() {
        let data = b"abab";
        let tree = HuffmanTree::from_bytes(data).unwrap();
        let payload = pack(data, &tree.generate_table()).unwrap();
        let err = unpack(&payload, 3, &tree).unwrap_err();
        assert!(matches!(err, HuffmanError::CorruptContainer { .. }));
    }

    #[test]
    fn test_from_parts_validation() {
        assert!(PackedPayload::from_parts(vec![1], 9).is_err());
        assert!(PackedPayload::from_parts(vec![], 3).is_err());
        let full = PackedPayload::from_parts(vec![1, 2], 8).unwrap();
        assert_eq!(full.bit_len(), 16);
    }
}

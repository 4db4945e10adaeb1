use std::fmt;

use crate::compressed_data::CompressedData;
use crate::error::Result;
use crate::hufftree::HuffmanTree;

/// Summary of a container, gathered without decoding the payload.
#[derive(Debug, Clone, PartialEq)]
pub struct ContainerInfo {
    pub symbol_count: usize,
    pub original_length: u64,
    pub container_length: usize,
    pub header_length: usize,
    pub payload_length: usize,
    pub valid_bits: u8,
    /// Payload bits implied by the rebuilt tree.
    pub encoded_bits: u64,
    /// Longest code in the rebuilt tree, 0 for the empty input.
    pub max_code_length: usize,
}

impl ContainerInfo {
    pub fn inspect(container: &[u8]) -> Result<Self> {
        let data = CompressedData::deserialize(container)?;
        let tree = HuffmanTree::from_frequencies(&data.frequencies);

        let (encoded_bits, max_code_length) = match &tree {
            Some(tree) => (
                tree.encoded_bit_len(&data.frequencies).unwrap_or(u64::MAX),
                tree.depth(),
            ),
            None => (0, 0),
        };

        Ok(ContainerInfo {
            symbol_count: data.symbol_count(),
            original_length: data.original_length,
            container_length: container.len(),
            header_length: data.header_len(),
            payload_length: data.payload.len(),
            valid_bits: data.payload.valid_bits(),
            encoded_bits,
            max_code_length,
        })
    }

    /// Container size relative to the original input, 0.0 for empty input.
    pub fn ratio(&self) -> f64 {
        if self.original_length == 0 {
            0.0
        } else {
            self.container_length as f64 / self.original_length as f64
        }
    }

    /// Average payload bits spent per input byte.
    pub fn bits_per_byte(&self) -> f64 {
        if self.original_length == 0 {
            0.0
        } else {
            self.encoded_bits as f64 / self.original_length as f64
        }
    }
}

impl fmt::Display for ContainerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "symbols:          {}", self.symbol_count)?;
        writeln!(f, "original length:  {} bytes", self.original_length)?;
        writeln!(
            f,
            "container length: {} bytes ({} header + {} payload)",
            self.container_length, self.header_length, self.payload_length
        )?;
        writeln!(f, "valid bits:       {}", self.valid_bits)?;
        writeln!(f, "encoded bits:     {}", self.encoded_bits)?;
        writeln!(f, "max code length:  {}", self.max_code_length)?;
        writeln!(f, "bits per byte:    {:.3}", self.bits_per_byte())?;
        write!(f, "ratio:            {:.1}%", self.ratio() * 100.0)
    }
}

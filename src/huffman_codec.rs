use std::io::{Read, Write};

use crate::bit_vec::{self, PackedPayload};
use crate::code_table::CodeTable;
use crate::compressed_data::CompressedData;
use crate::error::{HuffmanError, Result};
use crate::frequency::FrequencyTable;
use crate::hufftree::HuffmanTree;

/// Knobs for [`HuffmanCodec::compress_with`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CodecOptions {
    /// Decode the freshly built container and compare it with the input
    /// before returning it.
    pub verify: bool,
}

impl CodecOptions {
    pub fn verified() -> Self {
        CodecOptions { verify: true }
    }
}

/// Codec bound to the frequency table of one input.
///
/// Holds the tree and code table derived from that table; both are `None` /
/// empty for the empty input.
#[derive(Debug, Clone)]
pub struct HuffmanCodec {
    frequencies: FrequencyTable,
    tree: Option<HuffmanTree>,
    encode_table: CodeTable,
}

impl HuffmanCodec {
    pub fn new(frequencies: FrequencyTable) -> Self {
        let tree = HuffmanTree::from_frequencies(&frequencies);
        let encode_table = tree
            .as_ref()
            .map(HuffmanTree::generate_table)
            .unwrap_or_default();

        HuffmanCodec {
            frequencies,
            tree,
            encode_table,
        }
    }

    pub fn from_bytes(data: &[u8]) -> Self {
        Self::new(FrequencyTable::from_bytes(data))
    }

    pub fn frequencies(&self) -> &FrequencyTable {
        &self.frequencies
    }

    pub fn tree(&self) -> Option<&HuffmanTree> {
        self.tree.as_ref()
    }

    pub fn code_table(&self) -> &CodeTable {
        &self.encode_table
    }

    /// Packs `data`, which must be the input this codec was built from.
    ///
    /// A byte without a code, or a byte whose count differs from the codec's
    /// frequency table, is an input consistency error: the container would
    /// otherwise not decode.
    pub fn encode(&self, data: &[u8]) -> Result<CompressedData> {
        if self.tree.is_none() {
            return match data.first() {
                Some(&byte) => Err(HuffmanError::InputConsistency { byte }),
                None => Ok(CompressedData::empty()),
            };
        }

        let payload = bit_vec::pack(data, &self.encode_table)?;

        let observed = FrequencyTable::from_bytes(data);
        if observed != self.frequencies {
            let byte = (0..=255u8)
                .find(|&b| observed.get(b) != self.frequencies.get(b))
                .unwrap_or_default();
            return Err(HuffmanError::InputConsistency { byte });
        }

        Ok(CompressedData::new(self.frequencies.clone(), payload))
    }

    /// Rebuilds the tree from the container's frequency table and unpacks the
    /// payload.
    pub fn decode(compressed: &CompressedData) -> Result<Vec<u8>> {
        let original_length = usize::try_from(compressed.original_length).map_err(|_| {
            HuffmanError::corrupt(format!(
                "original length {} does not fit in memory",
                compressed.original_length
            ))
        })?;
        if compressed.frequencies.total() != compressed.original_length {
            return Err(HuffmanError::corrupt(format!(
                "frequency total {} does not match original length {}",
                compressed.frequencies.total(),
                compressed.original_length
            )));
        }

        let tree = match HuffmanTree::from_frequencies(&compressed.frequencies) {
            Some(tree) => tree,
            None if compressed.payload.is_empty() => return Ok(Vec::new()),
            None => return Err(HuffmanError::corrupt("payload present for an empty input")),
        };

        check_payload_shape(&compressed.payload, &tree, &compressed.frequencies)?;
        log::trace!("{}", tree);

        bit_vec::unpack(&compressed.payload, original_length, &tree)
    }

    pub fn compress_with(data: &[u8], options: &CodecOptions) -> Result<Vec<u8>> {
        let codec = HuffmanCodec::from_bytes(data);
        log::trace!("Byte frequency: {:?}", codec.frequencies());

        let container = codec.encode(data)?.serialize();
        log::debug!(
            "compressed {} bytes ({} symbols) into {} bytes",
            data.len(),
            codec.frequencies().len(),
            container.len()
        );

        if options.verify && decompress(&container)? != data {
            return Err(HuffmanError::corrupt("container failed verification"));
        }
        Ok(container)
    }

    /// Reads all of `input`, compresses it and writes the container to
    /// `output`. Returns the number of bytes written.
    pub fn encode_from_file<R: Read, W: Write>(mut input: R, mut output: W) -> Result<usize> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;

        let container = compress(&data)?;
        output.write_all(&container)?;
        output.flush()?;
        Ok(container.len())
    }

    /// Reads a whole container from `input` and writes the decoded bytes to
    /// `output`. Returns the number of bytes written.
    pub fn decode_from_file<R: Read, W: Write>(mut input: R, mut output: W) -> Result<usize> {
        let mut container = Vec::new();
        input.read_to_end(&mut container)?;

        let decoded = decompress(&container)?;
        output.write_all(&decoded)?;
        output.flush()?;
        Ok(decoded.len())
    }
}

/// The payload must be exactly as long as the rebuilt tree says, down to the
/// valid bits of its last byte.
fn check_payload_shape(
    payload: &PackedPayload,
    tree: &HuffmanTree,
    frequencies: &FrequencyTable,
) -> Result<()> {
    let expected_bits = tree
        .encoded_bit_len(frequencies)
        .ok_or_else(|| HuffmanError::corrupt("encoded bit length overflows u64"))?;
    let expected_len = expected_bits.div_ceil(8);

    if (payload.len() as u64) < expected_len {
        return Err(HuffmanError::corrupt(format!(
            "payload is {} bytes, expected {}",
            payload.len(),
            expected_len
        )));
    }
    if (payload.len() as u64) > expected_len {
        return Err(HuffmanError::corrupt(format!(
            "{} trailing bytes after payload",
            payload.len() as u64 - expected_len
        )));
    }
    if payload.bit_len() != expected_bits {
        return Err(HuffmanError::corrupt(format!(
            "valid-bit count {} does not match {} encoded bits",
            payload.valid_bits(),
            expected_bits
        )));
    }
    Ok(())
}

/// Compresses `data` into a self-describing container.
pub fn compress(data: &[u8]) -> Result<Vec<u8>> {
    HuffmanCodec::compress_with(data, &CodecOptions::default())
}

/// Restores the bytes a container was built from.
pub fn decompress(container: &[u8]) -> Result<Vec<u8>> {
    let compressed = CompressedData::deserialize(container)?;
    let decoded = HuffmanCodec::decode(&compressed)?;
    log::debug!(
        "decompressed {} bytes into {} bytes",
        container.len(),
        decoded.len()
    );
    Ok(decoded)
}

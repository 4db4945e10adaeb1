//! # huffcodec
//!
//! Lossless byte-stream compression with a Huffman code built per input.
//!
//! A container stores the byte frequency table, the original length, the
//! number of valid bits in the last payload byte and the packed codes. The
//! decoder rebuilds the exact same tree from the frequency table, so the
//! tree itself is never persisted.
//!
//! ## Quick Start
//!
//! ```rust
//! use huffcodec::{compress, decompress};
//!
//! let input = b"abracadabra, abracadabra";
//! let container = compress(input)?;
//! assert_eq!(decompress(&container)?, input.to_vec());
//! # Ok::<(), huffcodec::HuffmanError>(())
//! ```
//!
//! Working with readers and writers:
//!
//! ```rust
//! use huffcodec::HuffmanCodec;
//! use std::io::Cursor;
//!
//! let mut packed = Vec::new();
//! HuffmanCodec::encode_from_file(Cursor::new(b"some file contents"), &mut packed)?;
//!
//! let mut restored = Vec::new();
//! HuffmanCodec::decode_from_file(Cursor::new(&packed), &mut restored)?;
//! assert_eq!(restored, b"some file contents");
//! # Ok::<(), huffcodec::HuffmanError>(())
//! ```

pub mod bit_vec;
pub mod code_table;
pub mod compressed_data;
pub mod error;
pub mod frequency;
pub mod huffman_codec;
pub mod hufftree;
pub mod metadata;

// Internal modules - not part of public API
mod min_heap;

// Re-export main types for convenience
pub use bit_vec::PackedPayload;
pub use code_table::{Code, CodeTable};
pub use compressed_data::CompressedData;
pub use error::{HuffmanError, Result};
pub use frequency::FrequencyTable;
pub use huffman_codec::{compress, decompress, CodecOptions, HuffmanCodec};
pub use hufftree::{HuffNode, HuffmanTree};
pub use metadata::ContainerInfo;

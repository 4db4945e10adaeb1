use std::fmt;

use crate::code_table::{Code, CodeTable};
use crate::frequency::FrequencyTable;
use crate::min_heap::MinHeap;

/// Sequence numbers below this value belong to leaves (the sequence number of
/// a leaf is its byte value); merged nodes are numbered from here upwards.
const FIRST_MERGE_SEQ: usize = 256;

/// Prefix-code tree built from a [`FrequencyTable`].
///
/// Construction is deterministic: the merge queue orders nodes by
/// `(weight, sequence)` where leaves use their byte value as sequence number
/// and the k-th merged node uses `256 + k`. Decompression relies on this to
/// rebuild exactly the tree the compressor used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HuffmanTree {
    pub root: HuffNode,
}

impl HuffmanTree {
    /// Counts `bytes` and builds the tree; `None` for empty input.
    pub fn from_bytes(bytes: &[u8]) -> Option<Self> {
        HuffmanTree::from_frequencies(&FrequencyTable::from_bytes(bytes))
    }

    /// Builds the tree for `frequencies`.
    ///
    /// Returns `None` when the table is empty. A table with a single symbol
    /// yields an internal root holding the leaf on the left and a
    /// [`HuffNode::Vacant`] sentinel on the right, so the symbol is coded as
    /// `0` instead of receiving an empty code.
    pub fn from_frequencies(frequencies: &FrequencyTable) -> Option<Self> {
        let mut heap = MinHeap::with_capacity(frequencies.len());
        for (byte, count) in frequencies.iter() {
            heap.insert(count, byte as usize, HuffNode::new(byte, count));
        }

        match heap.heap_size() {
            0 => None,
            1 => {
                let (weight, leaf) = heap.extract_min()?;
                Some(HuffmanTree {
                    root: HuffNode::Internal {
                        weight,
                        left: Box::new(leaf),
                        right: Box::new(HuffNode::Vacant),
                    },
                })
            }
            _ => HuffmanTree::build_from_heap(heap),
        }
    }

    fn build_from_heap(mut heap: MinHeap<HuffNode>) -> Option<Self> {
        let mut seq = FIRST_MERGE_SEQ;
        while heap.heap_size() > 1 {
            let (_, x) = heap.extract_min()?;
            let (_, y) = heap.extract_min()?;

            let z = HuffNode::merge(x, y);
            heap.insert(z.weight(), seq, z);
            seq += 1;
        }
        heap.extract_min().map(|(_, root)| HuffmanTree { root })
    }

    pub fn generate_table(&self) -> CodeTable {
        let mut table = CodeTable::new();
        self.root.generate_table(&mut table, Code::new());
        table
    }

    /// Total number of payload bits needed to encode an input with these
    /// frequencies, or `None` if it does not fit in a `u64`.
    pub fn encoded_bit_len(&self, frequencies: &FrequencyTable) -> Option<u64> {
        self.generate_table()
            .iter()
            .try_fold(0u64, |acc, (byte, code)| {
                frequencies
                    .get(byte)
                    .checked_mul(code.len() as u64)
                    .and_then(|bits| acc.checked_add(bits))
            })
    }

    /// Number of symbols carried by the leaves.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Length of the longest root-to-leaf path.
    pub fn depth(&self) -> usize {
        self.root.depth()
    }
}

impl fmt::Display for HuffmanTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Huffman Tree Structure:")?;
        self.root.fmt_node(f, 0, "root")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HuffNode {
    Leaf {
        weight: u64,
        byte: u8,
    },
    Internal {
        weight: u64,
        left: Box<HuffNode>,
        right: Box<HuffNode>,
    },
    /// Unused branch of a single-symbol tree. Carries no symbol and no code.
    Vacant,
}

impl HuffNode {
    pub fn new(b: u8, f: u64) -> Self {
        HuffNode::Leaf { weight: f, byte: b }
    }

    pub fn weight(&self) -> u64 {
        match self {
            HuffNode::Leaf { weight, .. } => *weight,
            HuffNode::Internal { weight, .. } => *weight,
            HuffNode::Vacant => 0,
        }
    }

    pub fn merge(a: Self, b: Self) -> Self {
        // a was extracted first and goes left
        let weight = a.weight() + b.weight();
        HuffNode::Internal {
            weight,
            left: Box::new(a),
            right: Box::new(b),
        }
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, HuffNode::Leaf { .. })
    }

    pub fn generate_table(&self, code_table: &mut CodeTable, code: Code) {
        match self {
            HuffNode::Leaf { byte, .. } => {
                code_table.insert(*byte, code);
            }
            HuffNode::Internal { left, right, .. } => {
                // Left = 0, Right = 1
                left.generate_table(code_table, code.with_bit(false));
                right.generate_table(code_table, code.with_bit(true));
            }
            HuffNode::Vacant => {}
        }
    }

    fn leaf_count(&self) -> usize {
        match self {
            HuffNode::Leaf { .. } => 1,
            HuffNode::Internal { left, right, .. } => left.leaf_count() + right.leaf_count(),
            HuffNode::Vacant => 0,
        }
    }

    fn depth(&self) -> usize {
        match self {
            HuffNode::Internal { left, right, .. } => 1 + left.depth().max(right.depth()),
            _ => 0,
        }
    }

    fn fmt_node(&self, f: &mut fmt::Formatter<'_>, depth: usize, label: &str) -> fmt::Result {
        let indent = "  ".repeat(depth);
        match self {
            HuffNode::Leaf { byte, weight } => {
                let shown = if byte.is_ascii_graphic() {
                    format!("'{}'", *byte as char)
                } else {
                    format!("0x{:02x}", byte)
                };
                writeln!(f, "{}{}-> Leaf: {} [weight: {}]", indent, label, shown, weight)
            }
            HuffNode::Internal { weight, left, right } => {
                writeln!(f, "{}{}-> Internal [weight: {}]", indent, label, weight)?;
                left.fmt_node(f, depth + 1, "L")?;
                right.fmt_node(f, depth + 1, "R")
            }
            HuffNode::Vacant => writeln!(f, "{}{}-> Vacant", indent, label),
        }
    }
}

//! Property-based checks of the codec invariants

use huffcodec::{compress, decompress, CompressedData, FrequencyTable, HuffmanTree};
use proptest::prelude::*;

/// Inputs drawn from a small alphabet so that ties and skew both show up.
fn skewed_bytes() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(
        prop_oneof![
            8 => Just(b'e'),
            4 => Just(b't'),
            2 => prop::sample::select(vec![b'a', b'o', b'i', b'n']),
            1 => any::<u8>(),
        ],
        0..2000,
    )
}

proptest! {
    #[test]
    fn prop_roundtrip(data in prop::collection::vec(any::<u8>(), 0..4096)) {
        let container = compress(&data).unwrap();
        prop_assert_eq!(decompress(&container).unwrap(), data);
    }

    #[test]
    fn prop_roundtrip_skewed(data in skewed_bytes()) {
        let container = compress(&data).unwrap();
        prop_assert_eq!(decompress(&container).unwrap(), data);
    }

    #[test]
    fn prop_deterministic(data in skewed_bytes()) {
        prop_assert_eq!(compress(&data).unwrap(), compress(&data).unwrap());
    }

    #[test]
    fn prop_single_symbol_roundtrip(byte in any::<u8>(), len in 1usize..500) {
        let data = vec![byte; len];
        prop_assert_eq!(decompress(&compress(&data).unwrap()).unwrap(), data);
    }

    #[test]
    fn prop_codes_prefix_free_and_non_empty(data in prop::collection::vec(any::<u8>(), 1..1024)) {
        let tree = HuffmanTree::from_bytes(&data).unwrap();
        let table = tree.generate_table();
        prop_assert!(table.is_prefix_free());
        prop_assert!(table.min_code_len().unwrap() >= 1);
        prop_assert_eq!(table.len(), FrequencyTable::from_bytes(&data).len());
    }

    #[test]
    fn prop_rebuilt_tree_matches(data in skewed_bytes()) {
        let container = compress(&data).unwrap();
        let parsed = CompressedData::deserialize(&container).unwrap();
        prop_assert_eq!(parsed.original_length, data.len() as u64);
        prop_assert_eq!(parsed.frequencies.total(), parsed.original_length);
        prop_assert_eq!(
            HuffmanTree::from_frequencies(&parsed.frequencies),
            HuffmanTree::from_bytes(&data)
        );
    }

    #[test]
    fn prop_garbage_never_panics(data in prop::collection::vec(any::<u8>(), 0..256)) {
        let _ = decompress(&data);
    }
}

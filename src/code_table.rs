use std::collections::BTreeMap;
use std::fmt;

/// A single prefix code, stored as its bits in transmission order.
///
/// Codes are kept as bit sequences rather than packed integers: a tree built
/// from an adversarial frequency table can be up to 255 levels deep.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct Code {
    bits: Vec<bool>,
}

impl Code {
    pub fn new() -> Self {
        Code { bits: Vec::new() }
    }

    /// Returns this code extended by one bit.
    pub fn with_bit(&self, bit: bool) -> Code {
        let mut bits = Vec::with_capacity(self.bits.len() + 1);
        bits.extend_from_slice(&self.bits);
        bits.push(bit);
        Code { bits }
    }

    pub fn len(&self) -> usize {
        self.bits.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bits.is_empty()
    }

    pub fn bits(&self) -> &[bool] {
        &self.bits
    }

    pub fn is_prefix_of(&self, other: &Code) -> bool {
        other.bits.starts_with(&self.bits)
    }
}

impl fmt::Display for Code {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for &bit in &self.bits {
            f.write_str(if bit { "1" } else { "0" })?;
        }
        Ok(())
    }
}

impl From<&str> for Code {
    /// Parses a `"0101"` style bit string; any character other than `'1'`
    /// is read as a zero bit.
    fn from(text: &str) -> Self {
        Code {
            bits: text.chars().map(|c| c == '1').collect(),
        }
    }
}

/// Byte value to code mapping derived from a Huffman tree.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct CodeTable {
    codes: BTreeMap<u8, Code>,
}

impl CodeTable {
    pub fn new() -> Self {
        CodeTable {
            codes: BTreeMap::new(),
        }
    }

    pub fn insert(&mut self, byte: u8, code: Code) {
        self.codes.insert(byte, code);
    }

    pub fn get(&self, byte: u8) -> Option<&Code> {
        self.codes.get(&byte)
    }

    pub fn len(&self) -> usize {
        self.codes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Entries in ascending byte order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Code)> {
        self.codes.iter().map(|(&byte, code)| (byte, code))
    }

    /// Length of the shortest code, `None` for an empty table.
    pub fn min_code_len(&self) -> Option<usize> {
        self.codes.values().map(Code::len).min()
    }

    pub fn max_code_len(&self) -> Option<usize> {
        self.codes.values().map(Code::len).max()
    }

    /// Checks that no code is a prefix of another one.
    ///
    /// Sorting the codes lexicographically puts every prefix directly before
    /// some code it prefixes, so comparing neighbours is enough.
    pub fn is_prefix_free(&self) -> bool {
        let mut codes: Vec<&Code> = self.codes.values().collect();
        codes.sort_by(|a, b| a.bits.cmp(&b.bits));
        codes.windows(2).all(|pair| !pair[0].is_prefix_of(pair[1]))
    }
}

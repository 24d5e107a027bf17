use crate::error_handling::Error::NoneASCIICharacters;
use crate::error_handling::Result;
use std::fmt::Debug;

pub const ALPHABET_SIZE: usize = 128;

/// The finite set of symbols an automaton reads. Only ASCII is supported, so
/// membership is a lookup into a 128-entry table.
#[derive(Clone, PartialEq, Eq)]
pub struct Alphabet {
    symbols: [bool; ALPHABET_SIZE],
}

impl Alphabet {
    pub fn empty() -> Self {
        Self {
            symbols: [false; ALPHABET_SIZE],
        }
    }

    pub fn lowercase() -> Self {
        let mut symbols = [false; ALPHABET_SIZE];
        for c in 'a'..='z' {
            symbols[c as usize] = true;
        }
        Self { symbols }
    }

    pub fn from_symbols(symbols_str: &str) -> Result<Self> {
        let mut symbols = [false; ALPHABET_SIZE];
        for c in symbols_str.chars() {
            if false == c.is_ascii() {
                return Err(NoneASCIICharacters);
            }
            symbols[c as usize] = true;
        }
        Ok(Self { symbols })
    }

    pub fn contains(&self, symbol: char) -> bool {
        let idx = symbol as usize;
        idx < ALPHABET_SIZE && self.symbols[idx]
    }

    // Ascending ASCII order, which keeps DFA state numbering deterministic.
    pub fn iter(&self) -> impl Iterator<Item = char> + '_ {
        (0..ALPHABET_SIZE as u8)
            .filter(|&i| self.symbols[i as usize])
            .map(|i| i as char)
    }

    pub fn len(&self) -> usize {
        self.symbols.iter().filter(|&&present| present).count()
    }

    pub fn is_empty(&self) -> bool {
        0 == self.len()
    }
}

impl Default for Alphabet {
    fn default() -> Self {
        Self::lowercase()
    }
}

impl Debug for Alphabet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Alphabet({:?})", self.iter().collect::<String>())
    }
}

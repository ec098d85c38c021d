//! DNA and RNA alphabets.

use std::fmt;

use super::{
    alias, build_encode_table, extended_alphabet, Alphabet, AlphabetError, AlphabetResult,
    Nucleotide, StrictAlphabet, NOT_IN_ALPHABET,
};

/// A deoxyribonucleotide. States are pinned to A=0, C=1, G=2, T=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Dna {
    A,
    C,
    G,
    T,
}

impl Dna {
    const SYMBOLS: &'static [u8] = b"ACGT";
    const STATES: [Dna; 4] = [Dna::A, Dna::C, Dna::G, Dna::T];
    const ENCODE: [u8; 256] = alias(build_encode_table(Self::SYMBOLS, NOT_IN_ALPHABET), b'U', b'T');
    const COMPLEMENT: [Dna; 4] = [Dna::T, Dna::G, Dna::C, Dna::A];

    /// Watson-Crick complement (A<->T, C<->G).
    pub fn complement(self) -> Dna {
        Self::COMPLEMENT[self as usize]
    }
}

impl Alphabet for Dna {
    const SIZE: usize = 4;
    const NAME: &'static str = "DNA";

    fn state(self) -> u8 {
        self as u8
    }

    fn to_char(self) -> char {
        Self::SYMBOLS[self as usize] as char
    }
}

impl StrictAlphabet for Dna {
    type Extended = DnaX;

    fn try_from_byte(byte: u8) -> AlphabetResult<Self> {
        match Self::ENCODE[byte as usize] {
            NOT_IN_ALPHABET => Err(AlphabetError::NotInAlphabet {
                character: byte as char,
                alphabet: Self::NAME,
            }),
            state => Ok(Self::STATES[state as usize]),
        }
    }

    fn from_state(state: u8) -> Option<Self> {
        Self::STATES.get(state as usize).copied()
    }
}

impl Nucleotide for Dna {}

impl fmt::Display for Dna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

/// A ribonucleotide. States are pinned to A=0, C=1, G=2, U=3.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Rna {
    A,
    C,
    G,
    U,
}

impl Rna {
    const SYMBOLS: &'static [u8] = b"ACGU";
    const STATES: [Rna; 4] = [Rna::A, Rna::C, Rna::G, Rna::U];
    const ENCODE: [u8; 256] = alias(build_encode_table(Self::SYMBOLS, NOT_IN_ALPHABET), b'T', b'U');
}

impl Alphabet for Rna {
    const SIZE: usize = 4;
    const NAME: &'static str = "RNA";

    fn state(self) -> u8 {
        self as u8
    }

    fn to_char(self) -> char {
        Self::SYMBOLS[self as usize] as char
    }
}

impl StrictAlphabet for Rna {
    type Extended = RnaX;

    fn try_from_byte(byte: u8) -> AlphabetResult<Self> {
        match Self::ENCODE[byte as usize] {
            NOT_IN_ALPHABET => Err(AlphabetError::NotInAlphabet {
                character: byte as char,
                alphabet: Self::NAME,
            }),
            state => Ok(Self::STATES[state as usize]),
        }
    }

    fn from_state(state: u8) -> Option<Self> {
        Self::STATES.get(state as usize).copied()
    }
}

impl Nucleotide for Rna {}

impl fmt::Display for Rna {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

extended_alphabet! {
    /// A deoxyribonucleotide or the `Invalid` marker (A=0, C=1, G=2, X=3, T=4).
    DnaX, "DNA-X",
    symbols: b"ACGXT",
    invalid: 3,
    alias: b'U' => b'T'
}

extended_alphabet! {
    /// A ribonucleotide or the `Invalid` marker (A=0, C=1, G=2, X=3, U=4).
    RnaX, "RNA-X",
    symbols: b"ACGXU",
    invalid: 3,
    alias: b'T' => b'U'
}

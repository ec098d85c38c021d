//! Amino-acid alphabets.

use std::fmt;

use super::{
    build_encode_table, extended_alphabet, Alphabet, AlphabetError, AlphabetResult,
    StrictAlphabet, NOT_IN_ALPHABET,
};

/// One of the 20 standard residues or the stop marker (`-`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AminoAcid {
    /// Stop codon marker, printed as `-`.
    Stop,
    V,
    A,
    D,
    E,
    G,
    F,
    L,
    S,
    Y,
    C,
    W,
    P,
    H,
    Q,
    R,
    I,
    /// Methionine, the start residue.
    M,
    T,
    N,
    K,
}

impl AminoAcid {
    pub(crate) const SYMBOLS: &'static [u8] = b"-VADEGFLSYCWPHQRIMTNK";
    pub(crate) const STATES: [AminoAcid; 21] = [
        AminoAcid::Stop,
        AminoAcid::V,
        AminoAcid::A,
        AminoAcid::D,
        AminoAcid::E,
        AminoAcid::G,
        AminoAcid::F,
        AminoAcid::L,
        AminoAcid::S,
        AminoAcid::Y,
        AminoAcid::C,
        AminoAcid::W,
        AminoAcid::P,
        AminoAcid::H,
        AminoAcid::Q,
        AminoAcid::R,
        AminoAcid::I,
        AminoAcid::M,
        AminoAcid::T,
        AminoAcid::N,
        AminoAcid::K,
    ];
    pub(crate) const ENCODE: [u8; 256] = build_encode_table(Self::SYMBOLS, NOT_IN_ALPHABET);

    /// Returns true for methionine.
    pub fn is_start(self) -> bool {
        self == AminoAcid::M
    }

    /// Returns true for the stop marker.
    pub fn is_stop(self) -> bool {
        self == AminoAcid::Stop
    }

    /// Uppercase three-letter code (`TER` for the stop marker).
    pub fn three_letter_code(self) -> &'static str {
        match self {
            AminoAcid::Stop => "TER",
            AminoAcid::V => "VAL",
            AminoAcid::A => "ALA",
            AminoAcid::D => "ASP",
            AminoAcid::E => "GLU",
            AminoAcid::G => "GLY",
            AminoAcid::F => "PHE",
            AminoAcid::L => "LEU",
            AminoAcid::S => "SER",
            AminoAcid::Y => "TYR",
            AminoAcid::C => "CYS",
            AminoAcid::W => "TRP",
            AminoAcid::P => "PRO",
            AminoAcid::H => "HIS",
            AminoAcid::Q => "GLN",
            AminoAcid::R => "ARG",
            AminoAcid::I => "ILE",
            AminoAcid::M => "MET",
            AminoAcid::T => "THR",
            AminoAcid::N => "ASN",
            AminoAcid::K => "LYS",
        }
    }
}

impl Alphabet for AminoAcid {
    const SIZE: usize = 21;
    const NAME: &'static str = "amino acid";

    fn state(self) -> u8 {
        self as u8
    }

    fn to_char(self) -> char {
        Self::SYMBOLS[self as usize] as char
    }
}

impl StrictAlphabet for AminoAcid {
    type Extended = AminoAcidX;

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

impl fmt::Display for AminoAcid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_char())
    }
}

extended_alphabet! {
    /// An amino acid, the stop marker, or the `Invalid` marker (state 21).
    AminoAcidX, "amino acid-X",
    symbols: b"-VADEGFLSYCWPHQRIMTNKX",
    invalid: 21
}

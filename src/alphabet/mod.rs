//! Alphabet codecs for nucleotide and amino-acid symbols.
//!
//! Every alphabet is a closed set of states with a total mapping between raw
//! bytes and states:
//! - `Dna` / `DnaX`: A, C, G, T (U accepted as T), X for unknown input
//! - `Rna` / `RnaX`: A, C, G, U (T accepted as U), X for unknown input
//! - `AminoAcid` / `AminoAcidX`: the 20 residues plus the stop marker `-`,
//!   X for unknown input
//!
//! The `X` variants never fail: any byte outside the alphabet becomes the
//! `Invalid` state. The strict variants refuse such bytes with an
//! [`AlphabetError`], so raw text should go through the conversion pipeline in
//! [`crate::convert`], which filters through the `X` variant first.

mod amino;
mod nucleotide;

pub use amino::{AminoAcid, AminoAcidX};
pub use nucleotide::{Dna, DnaX, Rna, RnaX};

use std::fmt;

use thiserror::Error;

/// Character printed for the `Invalid` state of the `X` alphabets.
pub const INVALID_CHARACTER: char = 'X';

/// Table marker for bytes a strict alphabet does not accept.
pub(crate) const NOT_IN_ALPHABET: u8 = u8::MAX;

/// Errors raised by the strict alphabets.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum AlphabetError {
    #[error("Character {character:?} is not part of the {alphabet} alphabet")]
    NotInAlphabet {
        character: char,
        alphabet: &'static str,
    },
}

/// Result type for strict alphabet operations.
pub type AlphabetResult<T> = Result<T, AlphabetError>;

/// A closed set of symbols with a compact state representation.
pub trait Alphabet: Copy + Eq + fmt::Debug {
    /// Number of states in the alphabet.
    const SIZE: usize;
    /// Human readable name, used in error messages.
    const NAME: &'static str;

    /// The compact state, always in `0..Self::SIZE`.
    fn state(self) -> u8;

    /// The canonical (uppercase) character for this symbol.
    fn to_char(self) -> char;
}

/// An alphabet that accepts every byte, mapping unknown input to `Invalid`.
pub trait ExtendedAlphabet: Alphabet {
    /// Encodes a byte. Never fails.
    fn from_byte(byte: u8) -> Self;

    /// Returns true for the `Invalid` state.
    fn is_invalid(self) -> bool;
}

/// An alphabet that only accepts its own symbols.
pub trait StrictAlphabet: Alphabet {
    /// The permissive counterpart used to filter raw input.
    type Extended: ExtendedAlphabet;

    /// Encodes a byte, rejecting anything outside the alphabet.
    fn try_from_byte(byte: u8) -> AlphabetResult<Self>;

    /// Builds a symbol from its state, if the state is in range.
    fn from_state(state: u8) -> Option<Self>;

    /// Narrows a permissive symbol, dropping `Invalid`.
    fn from_extended(symbol: Self::Extended) -> Option<Self> {
        if symbol.is_invalid() {
            return None;
        }
        Self::try_from_byte(symbol.to_char() as u8).ok()
    }
}

/// Strict nucleotide alphabets usable as codon letters.
///
/// Implementors keep A=0, C=1, G=2, T/U=3 so codon lookups can index by state.
pub trait Nucleotide: StrictAlphabet {}

/// Builds a byte -> state table where `symbols[state]` and its lowercase form
/// map to `state` and every other byte maps to `fill`.
pub(crate) const fn build_encode_table(symbols: &[u8], fill: u8) -> [u8; 256] {
    let mut table = [fill; 256];
    let mut state = 0;
    while state < symbols.len() {
        let character = symbols[state];
        table[character as usize] = state as u8;
        table[character.to_ascii_lowercase() as usize] = state as u8;
        state += 1;
    }
    table
}

/// Makes `alias` (both cases) encode to the same state as `target`.
pub(crate) const fn alias(mut table: [u8; 256], alias: u8, target: u8) -> [u8; 256] {
    let state = table[target as usize];
    table[alias as usize] = state;
    table[alias.to_ascii_lowercase() as usize] = state;
    table
}

/// Declares a permissive `X` alphabet: a state newtype whose last printable
/// symbol is the `Invalid` sentinel.
macro_rules! extended_alphabet {
    (
        $(#[$meta:meta])*
        $name:ident, $label:literal,
        symbols: $symbols:expr,
        invalid: $invalid:expr
        $(, alias: $from:literal => $to:literal)?
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(u8);

        impl $name {
            const SYMBOLS: &'static [u8] = $symbols;
            const INVALID_STATE: u8 = $invalid;
            const ENCODE: [u8; 256] = {
                let table = $crate::alphabet::build_encode_table(Self::SYMBOLS, Self::INVALID_STATE);
                $(let table = $crate::alphabet::alias(table, $from, $to);)?
                table
            };

            /// The `Invalid` symbol.
            pub const INVALID: Self = Self(Self::INVALID_STATE);
        }

        impl $crate::alphabet::Alphabet for $name {
            const SIZE: usize = Self::SYMBOLS.len();
            const NAME: &'static str = $label;

            fn state(self) -> u8 {
                self.0
            }

            fn to_char(self) -> char {
                Self::SYMBOLS[self.0 as usize] as char
            }
        }

        impl $crate::alphabet::ExtendedAlphabet for $name {
            fn from_byte(byte: u8) -> Self {
                Self(Self::ENCODE[byte as usize])
            }

            fn is_invalid(self) -> bool {
                self.0 == Self::INVALID_STATE
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                use $crate::alphabet::Alphabet;
                write!(f, "{}", self.to_char())
            }
        }
    };
}

pub(crate) use extended_alphabet;

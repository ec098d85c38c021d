//! Conversion between raw text and typed sequences.
//!
//! Conversions into a strict alphabet run in two stages: every byte is
//! encoded through the permissive `X` alphabet, then `Invalid` symbols are
//! dropped. Noise in the input is therefore filtered silently and never
//! reported as an error.

use crate::alphabet::{
    Alphabet, AminoAcid, AminoAcidX, Dna, DnaX, ExtendedAlphabet, Rna, RnaX, StrictAlphabet,
};

pub type DnaSequence = Vec<Dna>;
pub type DnaXSequence = Vec<DnaX>;
pub type RnaSequence = Vec<Rna>;
pub type RnaXSequence = Vec<RnaX>;
pub type AminoSequence = Vec<AminoAcid>;
pub type AminoXSequence = Vec<AminoAcidX>;

/// Encodes every byte through a permissive alphabet.
pub fn convert_extended<X: ExtendedAlphabet>(source: impl AsRef<[u8]>) -> Vec<X> {
    source.as_ref().iter().map(|&byte| X::from_byte(byte)).collect()
}

/// Encodes the source and keeps only the symbols valid in `A`.
pub fn convert_strict<A: StrictAlphabet>(source: impl AsRef<[u8]>) -> Vec<A> {
    source
        .as_ref()
        .iter()
        .filter_map(|&byte| A::from_extended(A::Extended::from_byte(byte)))
        .collect()
}

pub fn convert_to_dna_x(source: impl AsRef<[u8]>) -> DnaXSequence {
    convert_extended(source)
}

pub fn convert_to_dna(source: impl AsRef<[u8]>) -> DnaSequence {
    convert_strict(source)
}

/// Reverse complement: reads the source back to front and complements every
/// retained nucleotide.
pub fn convert_to_dna_reversed(source: impl AsRef<[u8]>) -> DnaSequence {
    source
        .as_ref()
        .iter()
        .rev()
        .filter_map(|&byte| Dna::from_extended(DnaX::from_byte(byte)))
        .map(Dna::complement)
        .collect()
}

pub fn convert_to_rna_x(source: impl AsRef<[u8]>) -> RnaXSequence {
    convert_extended(source)
}

pub fn convert_to_rna(source: impl AsRef<[u8]>) -> RnaSequence {
    convert_strict(source)
}

pub fn convert_to_amino_x(source: impl AsRef<[u8]>) -> AminoXSequence {
    convert_extended(source)
}

pub fn convert_to_amino(source: impl AsRef<[u8]>) -> AminoSequence {
    convert_strict(source)
}

/// Renders a typed sequence back into text.
pub fn sequence_to_string<A: Alphabet>(sequence: &[A]) -> String {
    sequence.iter().map(|symbol| symbol.to_char()).collect()
}

/// Renders an amino sequence as dash-separated three-letter codes
/// (`MET-ALA-TER`).
pub fn to_three_letter_code(sequence: &[AminoAcid]) -> String {
    sequence
        .iter()
        .map(|amino| amino.three_letter_code())
        .collect::<Vec<_>>()
        .join("-")
}

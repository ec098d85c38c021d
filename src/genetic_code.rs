//! Genetic code and translation logic.
//!
//! This module provides:
//! - The standard genetic code (NCBI table 1), stop codons translated to `-`
//! - Codon to amino acid translation for DNA and RNA symbols
//! - Sequence translation and the three forward reading frames

use std::fmt;

use thiserror::Error;

use crate::alphabet::{AlphabetError, AminoAcid, Dna, Nucleotide, Rna, StrictAlphabet};
use crate::convert::{convert_strict, AminoSequence};

/// Errors raised when translating raw codon text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranslationError {
    #[error("Codon must have exactly 3 nucleotides, got {0}")]
    InvalidLength(usize),

    #[error("Invalid nucleotide in codon: {0}")]
    InvalidNucleotide(#[from] AlphabetError),
}

/// One of the three forward reading frames.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub enum Frame {
    #[default]
    First,
    Second,
    Third,
}

impl Frame {
    /// All frames in offset order.
    pub const ALL: [Frame; 3] = [Frame::First, Frame::Second, Frame::Third];

    /// Nucleotide offset applied before triplet decomposition, also the
    /// zero-based frame index.
    pub fn offset(self) -> usize {
        self as usize
    }

    /// Gets a frame from its offset.
    pub fn from_offset(offset: usize) -> Option<Frame> {
        Self::ALL.get(offset).copied()
    }

    /// Returns the part of `source` this frame reads, empty if the source is
    /// shorter than the offset.
    pub fn apply(self, source: &[u8]) -> &[u8] {
        source.get(self.offset()..).unwrap_or_default()
    }
}

impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frame {}", self.offset() + 1)
    }
}

/// A genetic code table for translating codons to amino acids.
#[derive(Debug, Clone)]
pub struct GeneticCode {
    /// Indexed by `16 * first + 4 * second + third` nucleotide state
    codon_table: [AminoAcid; 64],
}

/// The standard genetic code.
pub const STANDARD_CODE: GeneticCode = GeneticCode::from_ncbieaa(
    b"FFLLSSSSYY**CC*WLLLLPPPPHHQQRRRRIIIMTTTTNNKKSSRRVVVVAAAADDEEGGGG",
);

impl GeneticCode {
    /// Builds a code from an NCBI `ncbieaa` string.
    ///
    /// NCBI order is TTT, TTC, TTA, TTG, TCT, ... (bases in T, C, A, G order);
    /// `*` marks a stop codon.
    const fn from_ncbieaa(ncbieaa: &[u8; 64]) -> Self {
        // Nucleotide states of T, C, A, G.
        const NCBI_BASE_STATES: [usize; 4] = [3, 1, 0, 2];

        let mut codon_table = [AminoAcid::Stop; 64];
        let mut idx = 0;
        while idx < 64 {
            let first = NCBI_BASE_STATES[idx / 16];
            let second = NCBI_BASE_STATES[(idx / 4) % 4];
            let third = NCBI_BASE_STATES[idx % 4];

            let letter = match ncbieaa[idx] {
                b'*' => b'-',
                other => other,
            };
            let state = AminoAcid::ENCODE[letter as usize];
            codon_table[first * 16 + second * 4 + third] = AminoAcid::STATES[state as usize];
            idx += 1;
        }

        Self { codon_table }
    }

    /// Translates a single codon.
    pub fn translate_triplet<N: Nucleotide>(&self, first: N, second: N, third: N) -> AminoAcid {
        let index =
            16 * first.state() as usize + 4 * second.state() as usize + third.state() as usize;
        self.codon_table[index]
    }

    /// Translates a codon given as text. T and U are interchangeable and case
    /// is ignored; anything else is rejected.
    pub fn try_translate_codon(&self, codon: &[u8]) -> Result<AminoAcid, TranslationError> {
        match codon {
            &[first, second, third] => Ok(self.translate_triplet(
                Dna::try_from_byte(first)?,
                Dna::try_from_byte(second)?,
                Dna::try_from_byte(third)?,
            )),
            _ => Err(TranslationError::InvalidLength(codon.len())),
        }
    }

    /// Translates consecutive triplets from offset 0. Trailing nucleotides
    /// that do not fill a codon are ignored.
    pub fn translate_sequence<N: Nucleotide>(&self, sequence: &[N]) -> AminoSequence {
        sequence
            .chunks_exact(3)
            .map(|codon| self.translate_triplet(codon[0], codon[1], codon[2]))
            .collect()
    }

    /// Converts raw text read in `frame` into `N` symbols and translates it.
    pub fn translate_frame<N: Nucleotide>(&self, source: &[u8], frame: Frame) -> AminoSequence {
        let nucleotides: Vec<N> = convert_strict(frame.apply(source));
        self.translate_sequence(&nucleotides)
    }
}

impl Default for GeneticCode {
    fn default() -> Self {
        STANDARD_CODE
    }
}

/// Translates a codon with the standard code.
pub fn translate_triplet<N: Nucleotide>(first: N, second: N, third: N) -> AminoAcid {
    STANDARD_CODE.translate_triplet(first, second, third)
}

/// Translates a nucleotide sequence with the standard code.
pub fn translate_sequence<N: Nucleotide>(sequence: &[N]) -> AminoSequence {
    STANDARD_CODE.translate_sequence(sequence)
}

/// Translates raw DNA text read in `frame`.
pub fn translate_frame_dna(source: &[u8], frame: Frame) -> AminoSequence {
    STANDARD_CODE.translate_frame::<Dna>(source, frame)
}

/// Translates raw RNA text read in `frame`.
pub fn translate_frame_rna(source: &[u8], frame: Frame) -> AminoSequence {
    STANDARD_CODE.translate_frame::<Rna>(source, frame)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::convert::{convert_to_dna, convert_to_rna, sequence_to_string};

    fn translate_str(codon: &str) -> char {
        use crate::alphabet::Alphabet;
        STANDARD_CODE
            .try_translate_codon(codon.as_bytes())
            .unwrap()
            .to_char()
    }

    #[test]
    fn test_standard_code_translation() {
        assert_eq!(translate_str("ATG"), 'M'); // Start codon
        assert_eq!(translate_str("TAA"), '-'); // Stop codon
        assert_eq!(translate_str("TAG"), '-');
        assert_eq!(translate_str("TGA"), '-');
        assert_eq!(translate_str("TTT"), 'F');
        assert_eq!(translate_str("GGG"), 'G');
        assert_eq!(translate_str("TGG"), 'W');
        assert_eq!(translate_str("AGA"), 'R');
    }

    #[test]
    fn test_rna_translation() {
        assert_eq!(translate_triplet(Rna::U, Rna::U, Rna::U), AminoAcid::F);
        assert_eq!(translate_triplet(Rna::A, Rna::U, Rna::G), AminoAcid::M);
        assert_eq!(translate_triplet(Rna::U, Rna::A, Rna::A), AminoAcid::Stop);
        assert_eq!(translate_str("AUG"), 'M');
        assert_eq!(translate_str("UUU"), 'F');
    }

    #[test]
    fn test_thymine_and_uracil_agree() {
        let bases = [b'A', b'C', b'G', b'T'];
        for &b1 in &bases {
            for &b2 in &bases {
                for &b3 in &bases {
                    let dna = [b1, b2, b3];
                    let rna = dna.map(|b| if b == b'T' { b'U' } else { b });
                    assert_eq!(
                        STANDARD_CODE.try_translate_codon(&dna),
                        STANDARD_CODE.try_translate_codon(&rna)
                    );

                    let dna_typed = convert_to_dna(dna);
                    let rna_typed = convert_to_rna(rna);
                    assert_eq!(
                        translate_sequence(&dna_typed),
                        translate_sequence(&rna_typed)
                    );
                }
            }
        }
    }

    #[test]
    fn test_table_has_three_stops() {
        let stops = STANDARD_CODE
            .codon_table
            .iter()
            .filter(|amino| amino.is_stop())
            .count();
        assert_eq!(stops, 3);
    }

    #[test]
    fn test_invalid_codons() {
        assert!(matches!(
            STANDARD_CODE.try_translate_codon(b"ATN"),
            Err(TranslationError::InvalidNucleotide(_))
        ));
        assert_eq!(
            STANDARD_CODE.try_translate_codon(b"AT"),
            Err(TranslationError::InvalidLength(2))
        );
        assert_eq!(
            STANDARD_CODE.try_translate_codon(b"ATGA"),
            Err(TranslationError::InvalidLength(4))
        );
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(translate_str("atg"), 'M');
        assert_eq!(translate_str("AtG"), 'M');
        assert_eq!(translate_str("aug"), 'M');
    }

    #[test]
    fn test_sequence_translation() {
        let seq = convert_to_dna("ATGTTTTAG");
        assert_eq!(sequence_to_string(&translate_sequence(&seq)), "MF-");
        assert!(translate_sequence::<Dna>(&[]).is_empty());
    }

    #[test]
    fn test_frames() {
        let seq = b"AATGTTTTAG"; // 10 characters
        // Frame 1: AAT GTT TTA G -> N, V, L (incomplete G not translated)
        assert_eq!(
            sequence_to_string(&STANDARD_CODE.translate_frame::<Dna>(seq, Frame::First)),
            "NVL"
        );
        // Frame 2: ATG TTT TAG -> M, F, stop
        assert_eq!(
            sequence_to_string(&STANDARD_CODE.translate_frame::<Dna>(seq, Frame::Second)),
            "MF-"
        );
        // Frame 3: TGT TTT AG -> C, F (incomplete AG not translated)
        assert_eq!(
            sequence_to_string(&STANDARD_CODE.translate_frame::<Rna>(seq, Frame::Third)),
            "CF"
        );
    }

    #[test]
    fn test_frame_offset_past_end() {
        assert!(Frame::Third.apply(b"A").is_empty());
        assert!(translate_frame_dna(b"AT", Frame::Third).is_empty());
    }

    #[test]
    fn test_frame_translation_skips_noise() {
        // Frame offset applies to raw text, before noise is filtered.
        let amino = translate_frame_rna(b"xAUG UUU", Frame::Second);
        assert_eq!(sequence_to_string(&amino), "MF");
    }

    #[test]
    fn test_frame_offset() {
        assert_eq!(Frame::Third.offset(), 2);
        assert_eq!(Frame::from_offset(1), Some(Frame::Second));
        assert_eq!(Frame::from_offset(3), None);
        for (offset, frame) in Frame::ALL.into_iter().enumerate() {
            assert_eq!(frame.offset(), offset);
            assert_eq!(Frame::from_offset(offset), Some(frame));
        }
        assert_eq!(Frame::Third.to_string(), "Frame 3");
    }
}

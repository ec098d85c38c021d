//! Sequence records and their baked text views.
//!
//! A record owns everything derived from its raw text at construction:
//! DNA and RNA records hold three reading frames, each with the frame's
//! nucleotides, their translation and the protein candidates found in it.
//! Amino records hold a single amino sequence and its candidates.

use std::fmt;

use crate::alphabet::{Dna, Nucleotide, Rna};
use crate::convert::{
    convert_strict, convert_to_amino, convert_to_dna_reversed, sequence_to_string, AminoSequence,
};
use crate::genetic_code::{translate_sequence, Frame};
use crate::orf::extract_candidates;

/// The three kinds of record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SequenceKind {
    Dna,
    Rna,
    Amino,
}

impl SequenceKind {
    /// Tag used in project files.
    pub fn tag(self) -> &'static str {
        match self {
            SequenceKind::Dna => "DNA",
            SequenceKind::Rna => "RNA",
            SequenceKind::Amino => "PEP",
        }
    }

    /// Parses a project file tag.
    pub fn from_tag(tag: &str) -> Option<Self> {
        match tag {
            "DNA" => Some(SequenceKind::Dna),
            "RNA" => Some(SequenceKind::Rna),
            "PEP" => Some(SequenceKind::Amino),
            _ => None,
        }
    }

    pub fn is_nucleotide(self) -> bool {
        !matches!(self, SequenceKind::Amino)
    }
}

impl fmt::Display for SequenceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SequenceKind::Dna => write!(f, "DNA"),
            SequenceKind::Rna => write!(f, "RNA"),
            SequenceKind::Amino => write!(f, "protein"),
        }
    }
}

/// Strand read when building a DNA record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Strand {
    #[default]
    Forward,
    /// Reverse complement of the input.
    Reverse,
}

/// One reading frame of a nucleotide record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NucleotideFrame<N> {
    pub nucleotides: Vec<N>,
    pub amino: AminoSequence,
    pub candidates: Vec<AminoSequence>,
}

impl<N: Nucleotide> NucleotideFrame<N> {
    /// Translates the nucleotides and extracts their candidates.
    pub fn new(nucleotides: Vec<N>) -> Self {
        let amino = translate_sequence(&nucleotides);
        let candidates = extract_candidates(&amino);
        Self {
            nucleotides,
            amino,
            candidates,
        }
    }

    /// Assembles a frame from already computed parts.
    pub fn from_parts(
        nucleotides: Vec<N>,
        amino: AminoSequence,
        candidates: Vec<AminoSequence>,
    ) -> Self {
        Self {
            nucleotides,
            amino,
            candidates,
        }
    }
}

/// A DNA or RNA record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NucleotideRecord<N> {
    name: String,
    frames: [NucleotideFrame<N>; 3],
}

impl<N: Nucleotide> NucleotideRecord<N> {
    /// Builds the three forward frames. Each frame skips `offset` raw
    /// characters before conversion.
    pub fn forward(name: impl Into<String>, raw: impl AsRef<[u8]>) -> Self {
        let raw = raw.as_ref();
        Self::from_frames(
            name,
            Frame::ALL.map(|frame| NucleotideFrame::new(convert_strict(frame.apply(raw)))),
        )
    }

    pub fn from_frames(name: impl Into<String>, frames: [NucleotideFrame<N>; 3]) -> Self {
        Self {
            name: name.into(),
            frames,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn frame(&self, frame: Frame) -> &NucleotideFrame<N> {
        &self.frames[frame.offset()]
    }

    pub fn frames(&self) -> &[NucleotideFrame<N>; 3] {
        &self.frames
    }
}

impl NucleotideRecord<Dna> {
    /// Builds the three frames of the reverse complement. Frame `k` drops the
    /// last `k` raw characters before reversing.
    pub fn reverse(name: impl Into<String>, raw: impl AsRef<[u8]>) -> Self {
        let raw = raw.as_ref();
        Self::from_frames(
            name,
            Frame::ALL.map(|frame| {
                let end = raw.len().saturating_sub(frame.offset());
                NucleotideFrame::new(convert_to_dna_reversed(&raw[..end]))
            }),
        )
    }
}

/// A protein record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AminoRecord {
    name: String,
    amino: AminoSequence,
    candidates: Vec<AminoSequence>,
}

impl AminoRecord {
    pub fn new(name: impl Into<String>, raw: impl AsRef<[u8]>) -> Self {
        let amino = convert_to_amino(raw);
        let candidates = extract_candidates(&amino);
        Self::from_parts(name, amino, candidates)
    }

    pub fn from_parts(
        name: impl Into<String>,
        amino: AminoSequence,
        candidates: Vec<AminoSequence>,
    ) -> Self {
        Self {
            name: name.into(),
            amino,
            candidates,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn amino(&self) -> &AminoSequence {
        &self.amino
    }

    pub fn candidates(&self) -> &[AminoSequence] {
        &self.candidates
    }
}

/// A registered sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SequenceRecord {
    Dna(NucleotideRecord<Dna>),
    Rna(NucleotideRecord<Rna>),
    Amino(AminoRecord),
}

impl SequenceRecord {
    /// Builds a DNA record from raw text.
    pub fn dna(name: impl Into<String>, raw: impl AsRef<[u8]>, strand: Strand) -> Self {
        match strand {
            Strand::Forward => SequenceRecord::Dna(NucleotideRecord::forward(name, raw)),
            Strand::Reverse => SequenceRecord::Dna(NucleotideRecord::reverse(name, raw)),
        }
    }

    /// Builds an RNA record from raw text.
    pub fn rna(name: impl Into<String>, raw: impl AsRef<[u8]>) -> Self {
        SequenceRecord::Rna(NucleotideRecord::forward(name, raw))
    }

    /// Builds a protein record from raw text.
    pub fn amino(name: impl Into<String>, raw: impl AsRef<[u8]>) -> Self {
        SequenceRecord::Amino(AminoRecord::new(name, raw))
    }

    pub fn kind(&self) -> SequenceKind {
        match self {
            SequenceRecord::Dna(_) => SequenceKind::Dna,
            SequenceRecord::Rna(_) => SequenceKind::Rna,
            SequenceRecord::Amino(_) => SequenceKind::Amino,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            SequenceRecord::Dna(record) => record.name(),
            SequenceRecord::Rna(record) => record.name(),
            SequenceRecord::Amino(record) => record.name(),
        }
    }

    /// Nucleotides of a frame as text. Amino records have none.
    pub fn bake_sequence(&self, frame: Frame) -> String {
        match self {
            SequenceRecord::Dna(record) => sequence_to_string(&record.frame(frame).nucleotides),
            SequenceRecord::Rna(record) => sequence_to_string(&record.frame(frame).nucleotides),
            SequenceRecord::Amino(_) => String::new(),
        }
    }

    /// Amino sequence of a frame as text. The frame is ignored for amino
    /// records.
    pub fn bake_amino_sequence(&self, frame: Frame) -> String {
        sequence_to_string(self.amino_sequence(frame))
    }

    /// Protein candidates of a frame as text, in scan order.
    pub fn bake_protein_candidates(&self, frame: Frame) -> Vec<String> {
        self.candidates(frame)
            .iter()
            .map(|candidate| sequence_to_string(candidate))
            .collect()
    }

    /// Typed amino sequence of a frame.
    pub fn amino_sequence(&self, frame: Frame) -> &AminoSequence {
        match self {
            SequenceRecord::Dna(record) => &record.frame(frame).amino,
            SequenceRecord::Rna(record) => &record.frame(frame).amino,
            SequenceRecord::Amino(record) => record.amino(),
        }
    }

    /// Typed protein candidates of a frame.
    pub fn candidates(&self, frame: Frame) -> &[AminoSequence] {
        match self {
            SequenceRecord::Dna(record) => &record.frame(frame).candidates,
            SequenceRecord::Rna(record) => &record.frame(frame).candidates,
            SequenceRecord::Amino(record) => record.candidates(),
        }
    }
}

//! Line-based project files.
//!
//! ## Format
//!
//! ```text
//! #DNA:name           (#RNA:name for RNA records)
//! frame 1 nucleotides
//! frame 1 amino acids
//! {
//! one protein candidate per line
//! }
//! ... frames 2 and 3 ...
//! #PEP:name
//! amino acids
//! {
//! one protein candidate per line
//! }
//! ```
//!
//! Lines are read by position, so an empty sequence is an empty line.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Lines, Write};
use std::path::Path;

use log::info;
use thiserror::Error;

use crate::alphabet::Nucleotide;
use crate::convert::{convert_strict, convert_to_amino, sequence_to_string, AminoSequence};
use crate::genetic_code::Frame;
use crate::record::{AminoRecord, NucleotideFrame, NucleotideRecord, SequenceKind, SequenceRecord};
use crate::registry::SequenceRegistry;

const BLOCK_START: &str = "{";
const BLOCK_END: &str = "}";

/// Errors raised while reading or writing project files.
#[derive(Error, Debug)]
pub enum ProjectFileError {
    #[error("Failed to access project file: {0}")]
    IoError(#[from] io::Error),

    #[error("Malformed record header at line {0}")]
    InvalidHeader(usize),

    #[error("Unknown record tag {tag:?} at line {line}")]
    UnknownRecordTag { line: usize, tag: String },

    #[error("Unexpected end of file after line {0}")]
    UnexpectedEof(usize),

    #[error("Expected '{{' at line {0}")]
    MissingBlockStart(usize),

    #[error("Missing '}}' for the block opened at line {0}")]
    MissingBlockEnd(usize),
}

pub type ProjectFileResult<T> = Result<T, ProjectFileError>;

/// Writes every registered record in id order.
///
/// Names spanning several lines are refused with
/// [`io::ErrorKind::InvalidInput`], as they could not be read back.
pub fn write_project<W: Write>(registry: &SequenceRegistry, mut writer: W) -> io::Result<()> {
    for (_, record) in registry.iter() {
        if record.name().contains(['\n', '\r']) {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                format!("Sequence name {:?} spans several lines", record.name()),
            ));
        }
        writeln!(writer, "#{}:{}", record.kind().tag(), record.name())?;
        match record {
            SequenceRecord::Dna(record) => write_frames(&mut writer, record)?,
            SequenceRecord::Rna(record) => write_frames(&mut writer, record)?,
            SequenceRecord::Amino(record) => {
                writeln!(writer, "{}", sequence_to_string(record.amino()))?;
                write_candidates(&mut writer, record.candidates())?;
            }
        }
    }
    writer.flush()
}

fn write_frames<W: Write, N: Nucleotide>(
    writer: &mut W,
    record: &NucleotideRecord<N>,
) -> io::Result<()> {
    for frame in Frame::ALL {
        let frame = record.frame(frame);
        writeln!(writer, "{}", sequence_to_string(&frame.nucleotides))?;
        writeln!(writer, "{}", sequence_to_string(&frame.amino))?;
        write_candidates(writer, &frame.candidates)?;
    }
    Ok(())
}

fn write_candidates<W: Write>(writer: &mut W, candidates: &[AminoSequence]) -> io::Result<()> {
    writeln!(writer, "{}", BLOCK_START)?;
    for candidate in candidates {
        writeln!(writer, "{}", sequence_to_string(candidate))?;
    }
    writeln!(writer, "{}", BLOCK_END)
}

/// Writes a project file to disk.
pub fn save_project<P: AsRef<Path>>(registry: &SequenceRegistry, path: P) -> ProjectFileResult<()> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_project(registry, BufWriter::new(file))?;
    info!("Saved {} sequences to {}", registry.len(), path.display());
    Ok(())
}

/// Positional line reader keeping track of line numbers.
struct LineReader<R> {
    lines: Lines<R>,
    line_number: usize,
}

impl<R: BufRead> LineReader<R> {
    fn new(reader: R) -> Self {
        Self {
            lines: reader.lines(),
            line_number: 0,
        }
    }

    fn next_line(&mut self) -> ProjectFileResult<Option<String>> {
        match self.lines.next() {
            Some(line) => {
                self.line_number += 1;
                let mut line = line?;
                if line.ends_with('\r') {
                    line.pop();
                }
                Ok(Some(line))
            }
            None => Ok(None),
        }
    }

    fn expect_line(&mut self) -> ProjectFileResult<String> {
        self.next_line()?
            .ok_or(ProjectFileError::UnexpectedEof(self.line_number))
    }

    fn read_candidates(&mut self) -> ProjectFileResult<Vec<AminoSequence>> {
        let opening = self.expect_line()?;
        if opening.trim() != BLOCK_START {
            return Err(ProjectFileError::MissingBlockStart(self.line_number));
        }
        let opened_at = self.line_number;

        let mut candidates = Vec::new();
        loop {
            match self.next_line()? {
                Some(line) if line.trim() == BLOCK_END => return Ok(candidates),
                Some(line) => candidates.push(convert_to_amino(line)),
                None => return Err(ProjectFileError::MissingBlockEnd(opened_at)),
            }
        }
    }

    fn read_frame<N: Nucleotide>(&mut self) -> ProjectFileResult<NucleotideFrame<N>> {
        let nucleotides = convert_strict(self.expect_line()?);
        let amino = convert_to_amino(self.expect_line()?);
        let candidates = self.read_candidates()?;
        Ok(NucleotideFrame::from_parts(nucleotides, amino, candidates))
    }

    fn read_nucleotide_record<N: Nucleotide>(
        &mut self,
        name: &str,
    ) -> ProjectFileResult<NucleotideRecord<N>> {
        let frames = [self.read_frame()?, self.read_frame()?, self.read_frame()?];
        Ok(NucleotideRecord::from_frames(name, frames))
    }
}

/// Reads every record of a project file, in file order.
pub fn read_project<R: BufRead>(reader: R) -> ProjectFileResult<Vec<SequenceRecord>> {
    let mut lines = LineReader::new(reader);
    let mut records = Vec::new();

    while let Some(line) = lines.next_line()? {
        if line.trim().is_empty() {
            continue;
        }

        let header = line
            .strip_prefix('#')
            .and_then(|header| header.split_once(':'))
            .ok_or(ProjectFileError::InvalidHeader(lines.line_number))?;
        let (tag, name) = header;
        let kind =
            SequenceKind::from_tag(tag).ok_or_else(|| ProjectFileError::UnknownRecordTag {
                line: lines.line_number,
                tag: tag.to_string(),
            })?;

        let record = match kind {
            SequenceKind::Dna => SequenceRecord::Dna(lines.read_nucleotide_record(name)?),
            SequenceKind::Rna => SequenceRecord::Rna(lines.read_nucleotide_record(name)?),
            SequenceKind::Amino => {
                let amino = convert_to_amino(lines.expect_line()?);
                let candidates = lines.read_candidates()?;
                SequenceRecord::Amino(AminoRecord::from_parts(name, amino, candidates))
            }
        };
        records.push(record);
    }

    Ok(records)
}

/// Reads a project file from disk.
pub fn load_project<P: AsRef<Path>>(path: P) -> ProjectFileResult<Vec<SequenceRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = read_project(BufReader::new(file))?;
    info!("Loaded {} sequences from {}", records.len(), path.display());
    Ok(records)
}

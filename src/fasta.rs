//! FASTA file reader.
//!
//! Produces `(name, sequence)` records from FASTA text. Multi-line
//! sequences are concatenated.
//!
//! ## FASTA Format
//!
//! ```text
//! >sequence name, kept whole
//! ACGTACGTACGT...
//! >another sequence
//! TGCATGCATGCA...
//! ```
//!
//! Sequence lines may not contain spaces. A blank line ends the current
//! record; sequence lines after it are ignored until the next header. The raw
//! sequence text is kept as is; filtering happens when the text is turned
//! into a record.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use log::{debug, info};
use thiserror::Error;

/// Errors that can occur during FASTA parsing.
#[derive(Error, Debug)]
pub enum FastaError {
    #[error("Failed to open file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Empty FASTA file")]
    EmptyFile,

    #[error("Invalid FASTA format: {0}")]
    InvalidFormat(String),

    #[error("Sequence without header at line {0}")]
    SequenceWithoutHeader(usize),

    #[error("Space inside sequence at line {0}")]
    SpaceInSequence(usize),
}

/// Result type for FASTA operations.
pub type FastaResult<T> = Result<T, FastaError>;

/// A named raw sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    pub name: String,
    pub sequence: String,
}

/// Parses a FASTA file.
///
/// # Examples
///
/// ```no_run
/// use seqlab::fasta::parse_fasta_file;
///
/// let records = parse_fasta_file("sequences.fasta").unwrap();
/// println!("Loaded {} sequences", records.len());
/// ```
pub fn parse_fasta_file<P: AsRef<Path>>(path: P) -> FastaResult<Vec<FastaRecord>> {
    let path = path.as_ref();
    let file = File::open(path)?;
    let records = parse_fasta(BufReader::new(file))?;
    info!("Read {} sequences from {}", records.len(), path.display());
    Ok(records)
}

/// Parses FASTA content from a reader.
pub fn parse_fasta<R: BufRead>(reader: R) -> FastaResult<Vec<FastaRecord>> {
    let mut records = Vec::new();
    let mut current_name: Option<String> = None;
    let mut current_seq = String::new();
    let mut seen_header = false;

    for (index, line_result) in reader.lines().enumerate() {
        let line_number = index + 1;
        let line = line_result?;
        let line = line.trim();

        let header = line.strip_prefix('>');
        if line.is_empty() || header.is_some() {
            // A blank line or a new header closes the current record. A
            // header without sequence lines yields no record.
            if let Some(name) = current_name.take() {
                if !current_seq.is_empty() {
                    records.push(FastaRecord {
                        name,
                        sequence: std::mem::take(&mut current_seq),
                    });
                }
            }
            current_seq.clear();
        }

        if let Some(header) = header {
            let name = header.trim();
            if name.is_empty() {
                return Err(FastaError::InvalidFormat(format!(
                    "Empty sequence name at line {}",
                    line_number
                )));
            }

            current_name = Some(name.to_string());
            seen_header = true;
        } else if !line.is_empty() {
            if current_name.is_none() {
                if !seen_header {
                    return Err(FastaError::SequenceWithoutHeader(line_number));
                }
                debug!("Ignoring line {} outside of any record", line_number);
                continue;
            }
            if line.contains(' ') {
                return Err(FastaError::SpaceInSequence(line_number));
            }

            current_seq.push_str(line);
        }
    }

    if let Some(name) = current_name {
        if !current_seq.is_empty() {
            records.push(FastaRecord {
                name,
                sequence: current_seq,
            });
        }
    }

    if records.is_empty() {
        return Err(FastaError::EmptyFile);
    }

    Ok(records)
}

/// Parses FASTA content from a string.
pub fn parse_fasta_str(content: &str) -> FastaResult<Vec<FastaRecord>> {
    parse_fasta(content.as_bytes())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_simple_fasta() {
        let content = ">seq1\nACGT\n>seq2\nTGCA\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].name, "seq1");
        assert_eq!(records[0].sequence, "ACGT");
        assert_eq!(records[1].name, "seq2");
        assert_eq!(records[1].sequence, "TGCA");
    }

    #[test]
    fn test_parse_multiline_sequence() {
        let content = ">seq1\nACGT\nTGCA\nAAAA\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, "ACGTTGCAAAAA");
    }

    #[test]
    fn test_name_keeps_description() {
        let content = ">seq1 Homo sapiens insulin\nACGT\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records[0].name, "seq1 Homo sapiens insulin");
    }

    #[test]
    fn test_parse_with_empty_lines() {
        let content = ">seq1\nACGT\n\n>seq2\nTGCA\n\n\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].sequence, "ACGT");
        assert_eq!(records[1].sequence, "TGCA");
    }

    #[test]
    fn test_blank_line_ends_record() {
        let content = ">a\nACGT\n\nTTTT\n>b\n\n>c\nGG\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(
            records,
            vec![
                FastaRecord {
                    name: "a".to_string(),
                    sequence: "ACGT".to_string(),
                },
                FastaRecord {
                    name: "c".to_string(),
                    sequence: "GG".to_string(),
                },
            ]
        );

        // Lines after a blank line are dropped, even when nothing follows
        let records = parse_fasta_str(">a\nAC\n\nGT\n").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].sequence, "AC");
    }

    #[test]
    fn test_windows_line_endings() {
        let content = ">seq1\r\nACGT\r\nAC\r\n";
        let records = parse_fasta_str(content).unwrap();
        assert_eq!(records[0].sequence, "ACGTAC");
    }

    #[test]
    fn test_header_without_sequence_skipped() {
        let content = ">empty\n>seq1\nACGT\n>trailing\n";
        let records = parse_fasta_str(content).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].name, "seq1");
    }

    #[test]
    fn test_space_in_sequence() {
        let content = ">seq1\nACGT\nAC GT\n";
        let result = parse_fasta_str(content);
        assert!(matches!(result, Err(FastaError::SpaceInSequence(3))));
    }

    #[test]
    fn test_empty_file() {
        assert!(matches!(parse_fasta_str(""), Err(FastaError::EmptyFile)));
        assert!(matches!(parse_fasta_str(">only\n"), Err(FastaError::EmptyFile)));
    }

    #[test]
    fn test_sequence_without_header() {
        let content = "ACGT\n>seq1\nTGCA\n";
        let result = parse_fasta_str(content);
        assert!(matches!(result, Err(FastaError::SequenceWithoutHeader(1))));
    }

    #[test]
    fn test_empty_name() {
        let result = parse_fasta_str(">\nACGT\n");
        assert!(matches!(result, Err(FastaError::InvalidFormat(_))));
    }

    #[test]
    fn test_case_preservation() {
        let records = parse_fasta_str(">seq1\nacgt\n").unwrap();
        // Raw text is kept as is
        assert_eq!(records[0].sequence, "acgt");
    }

    #[test]
    fn test_parse_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, ">gene\nATGAAA\nTAA\n").unwrap();

        let records = parse_fasta_file(file.path()).unwrap();
        assert_eq!(
            records,
            vec![FastaRecord {
                name: "gene".to_string(),
                sequence: "ATGAAATAA".to_string(),
            }]
        );
    }

    #[test]
    fn test_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = parse_fasta_file(dir.path().join("missing.fasta"));
        assert!(matches!(result, Err(FastaError::IoError(_))));
    }
}

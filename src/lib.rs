//! # seqlab - Sequence Translation and Peptide Properties
//!
//! A library for encoding nucleotide and amino-acid sequences, translating
//! them in three reading frames, extracting protein candidates and computing
//! their biochemical properties.
//!
//! ## Architecture
//!
//! Modules build on each other, leaf first:
//! - `alphabet`: compact symbol states for DNA, RNA and amino acids
//! - `convert`: raw text to typed sequences, reverse complement, back to text
//! - `genetic_code`: codon translation and reading frames
//! - `orf`: protein candidate extraction
//! - `properties`: molecular weight, charge, pI, extinction, formula, hydropathy
//! - `record`: DNA, RNA and protein records with their frames
//! - `registry`: id-keyed record storage
//! - `project`: selection state and the cached calculations derived from it
//! - `settings`: calculation parameters
//! - `fasta` / `project_file`: reading and writing sequence files

pub mod alphabet;
pub mod convert;
pub mod fasta;
pub mod genetic_code;
pub mod orf;
pub mod project;
pub mod project_file;
pub mod properties;
pub mod record;
pub mod registry;
pub mod settings;

//! seqlab - sequence translation and peptide property report
//!
//! Loads sequences from a FASTA file and/or a project file, translates them
//! and prints the properties of every sequence and protein candidate.
//!
//! ## Usage
//!
//! ```bash
//! seqlab genes.fasta                       # DNA, frame 1
//! seqlab -k rna -r 2 transcripts.fasta     # RNA, frame 2
//! seqlab --reverse genes.fasta             # reverse complement
//! seqlab -k protein --ph 5.5 peptides.fasta
//! seqlab genes.fasta -o genes.project      # also save a project file
//! seqlab -p genes.project                  # report a saved project
//! ```

// Use jemalloc for better memory management (returns memory to OS)
#[cfg(not(windows))]
#[global_allocator]
static GLOBAL: tikv_jemallocator::Jemalloc = tikv_jemallocator::Jemalloc;

use std::io::{self, Write};
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::{Parser, ValueEnum};
use log::debug;

use seqlab::fasta::{parse_fasta_file, FastaRecord};
use seqlab::genetic_code::Frame;
use seqlab::project::{CurrentView, Project, PropertySet, Selection};
use seqlab::project_file::{load_project, save_project};
use seqlab::record::{SequenceKind, SequenceRecord, Strand};
use seqlab::registry::SequenceId;
use seqlab::settings::CalculationSettings;

/// Sequence kind of the FASTA input
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    /// DNA, translated in three frames
    Dna,
    /// RNA, translated in three frames
    Rna,
    /// Amino-acid sequences
    Protein,
}

impl From<KindArg> for SequenceKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Dna => SequenceKind::Dna,
            KindArg::Rna => SequenceKind::Rna,
            KindArg::Protein => SequenceKind::Amino,
        }
    }
}

/// seqlab - translate sequences and report peptide properties
///
/// Reads FASTA input and/or a saved project, then prints, for each sequence,
/// its translation, protein candidates, molecular weight, isoelectric point,
/// net charge, extinction coefficient, formula and hydropathy.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// FASTA file to import
    file: Option<PathBuf>,

    /// Project file to load before importing
    #[arg(short = 'p', long = "project")]
    project: Option<PathBuf>,

    /// How to read the FASTA sequences
    #[arg(short = 'k', long = "kind", value_enum, default_value = "dna")]
    kind: KindArg,

    /// Read DNA input as its reverse complement
    #[arg(long = "reverse")]
    reverse: bool,

    /// pH used for the net charge
    #[arg(long = "ph", default_value_t = CalculationSettings::DEFAULT_PH)]
    ph: f64,

    /// Hydropathy window (odd, at least 3)
    #[arg(short = 'w', long = "window", default_value_t = CalculationSettings::DEFAULT_HYDROPATHY_WINDOW)]
    window: usize,

    /// Reading frame reported for DNA/RNA sequences (1-3)
    #[arg(short = 'r', long = "frame", default_value = "1")]
    frame: u8,

    /// Save all sequences to this project file
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Line width of the sequence listings
    #[arg(long = "width", default_value = "60")]
    width: usize,

    /// Print debug logs
    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn build_record(kind: SequenceKind, strand: Strand, fasta: FastaRecord) -> SequenceRecord {
    match kind {
        SequenceKind::Dna => SequenceRecord::dna(fasta.name, fasta.sequence, strand),
        SequenceKind::Rna => SequenceRecord::rna(fasta.name, fasta.sequence),
        SequenceKind::Amino => SequenceRecord::amino(fasta.name, fasta.sequence),
    }
}

/// Writes `text` wrapped to `width` columns, every line prefixed by `indent`.
fn write_wrapped<W: Write>(out: &mut W, text: &str, width: usize, indent: &str) -> io::Result<()> {
    if text.is_empty() {
        return writeln!(out, "{}(empty)", indent);
    }
    let options = textwrap::Options::new(width)
        .initial_indent(indent)
        .subsequent_indent(indent);
    writeln!(out, "{}", textwrap::fill(text, options))
}

fn format_value(value: Option<f64>, precision: usize, unit: &str) -> String {
    match value {
        Some(value) => format!("{:.*}{}", precision, value, unit),
        None => "n/a".to_string(),
    }
}

fn write_properties<W: Write>(
    out: &mut W,
    properties: &PropertySet,
    settings: &CalculationSettings,
    indent: &str,
) -> io::Result<()> {
    writeln!(
        out,
        "{}Molecular weight:  {}",
        indent,
        format_value(properties.molecular_weight, 2, " Da")
    )?;
    writeln!(
        out,
        "{}Isoelectric point: {}",
        indent,
        format_value(properties.isoelectric_point, 2, "")
    )?;
    writeln!(
        out,
        "{}Net charge (pH {:.2}): {}",
        indent,
        settings.ph,
        format_value(properties.net_charge, 1, "")
    )?;
    writeln!(
        out,
        "{}Extinction coefficient: {} (cysteines reduced: {})",
        indent, properties.extinction_coefficient, properties.extinction_coefficient_reduced
    )?;
    writeln!(
        out,
        "{}Formula: {}",
        indent,
        properties
            .formula
            .map(|formula| formula.bake())
            .unwrap_or_else(|| "n/a".to_string())
    )?;
    match &properties.hydropathy {
        Some(profile) => writeln!(
            out,
            "{}Hydropathy (window {}): min {:.2}, max {:.2}",
            indent, profile.window, profile.min_score, profile.max_score
        ),
        None => writeln!(
            out,
            "{}Hydropathy (window {}): sequence too short",
            indent, settings.hydropathy_window
        ),
    }
}

/// Selects a sequence, then each of its candidates, and prints the cached
/// results.
fn report_sequence<W: Write>(
    project: &mut Project,
    id: SequenceId,
    frame: Frame,
    width: usize,
    out: &mut W,
) -> Result<()> {
    let settings = *project.settings();
    let Some(record) = project.registry().get(id) else {
        bail!("Sequence {} disappeared from the project", id);
    };
    let kind = record.kind();
    let candidate_count = record.candidates(frame).len();

    let selection = if kind.is_nucleotide() {
        Selection::nucleotide(id, frame)
    } else {
        Selection::amino(id, None)
    };
    project.select(selection)?;

    let Some(CurrentView::Sequence(cache)) = project.current_view() else {
        bail!("No sequence view for {}", id);
    };
    if kind.is_nucleotide() {
        writeln!(out, ">{} ({}, {})", cache.name, kind, frame)?;
        writeln!(out, "Nucleotides:")?;
        write_wrapped(out, &cache.nucleotides, width, "  ")?;
    } else {
        writeln!(out, ">{} ({})", cache.name, kind)?;
    }
    writeln!(out, "Amino acids:")?;
    write_wrapped(out, &cache.baked_amino, width, "  ")?;
    write_properties(out, &cache.properties, &settings, "")?;
    writeln!(out, "Protein candidates: {}", candidate_count)?;

    for index in 0..candidate_count {
        project.select(selection.with_peptide(index))?;
        let Some(CurrentView::Peptide(peptide)) = project.current_view() else {
            bail!("No peptide view for candidate {} of {}", index + 1, id);
        };
        writeln!(
            out,
            "  Candidate {} ({} residues):",
            index + 1,
            peptide.candidate.len()
        )?;
        write_wrapped(out, &peptide.baked, width, "    ")?;
        write_properties(out, &peptide.properties, &settings, "    ")?;
    }
    writeln!(out)?;

    Ok(())
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if args.file.is_none() && args.project.is_none() {
        bail!("Nothing to read: give a FASTA file and/or -p/--project");
    }

    // Validate reading frame (1-3)
    let Some(frame) = args
        .frame
        .checked_sub(1)
        .and_then(|offset| Frame::from_offset(offset.into()))
    else {
        bail!("Reading frame must be 1-3 (got {})", args.frame);
    };

    let kind = SequenceKind::from(args.kind);
    if args.reverse && kind != SequenceKind::Dna {
        bail!("--reverse only applies to DNA input");
    }
    let strand = if args.reverse {
        Strand::Reverse
    } else {
        Strand::Forward
    };

    if args.width < 10 {
        bail!("Width must be at least 10 (got {})", args.width);
    }

    let mut project = Project::with_settings(CalculationSettings {
        ph: args.ph,
        hydropathy_window: args.window,
    })?;
    project.subscribe(|selection| debug!("Selection changed: {:?}", selection));

    if let Some(path) = &args.project {
        for record in load_project(path)? {
            project.register(record);
        }
    }
    if let Some(path) = &args.file {
        for fasta in parse_fasta_file(path)? {
            project.register(build_record(kind, strand, fasta));
        }
    }

    let ids: Vec<SequenceId> = project.registry().ids().collect();
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    for id in ids {
        report_sequence(&mut project, id, frame, args.width, &mut handle)?;
    }
    handle.flush()?;

    if let Some(output) = &args.output {
        save_project(project.registry(), output)?;
        project.mark_saved();
        eprintln!(
            "Wrote {} sequences to {}",
            project.registry().len(),
            output.display()
        );
    }

    Ok(())
}

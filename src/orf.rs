//! Protein candidate (open reading frame) extraction.

use crate::alphabet::AminoAcid;
use crate::convert::AminoSequence;

/// Splits an amino sequence into protein candidates.
///
/// A candidate opens at `M` and runs up to, not including, the next stop
/// marker. Methionines inside an open candidate are ordinary residues, so
/// candidates never overlap. A candidate still open at the end of the sequence
/// is kept.
pub fn extract_candidates(sequence: &[AminoAcid]) -> Vec<AminoSequence> {
    let mut candidates = Vec::new();
    let mut current: Option<AminoSequence> = None;

    for &amino in sequence {
        if amino.is_stop() {
            candidates.extend(current.take());
        } else if let Some(candidate) = current.as_mut() {
            candidate.push(amino);
        } else if amino.is_start() {
            current = Some(vec![amino]);
        }
    }

    candidates.extend(current);
    candidates
}

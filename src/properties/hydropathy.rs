//! Kyte-Doolittle hydropathy profiles.

use crate::alphabet::AminoAcid;

/// Kyte-Doolittle hydropathy index. The stop marker scores 0.
pub fn kyte_doolittle(amino: AminoAcid) -> f64 {
    match amino {
        AminoAcid::Stop => 0.0,
        AminoAcid::V => 4.2,
        AminoAcid::A => 1.8,
        AminoAcid::D => -3.5,
        AminoAcid::E => -3.5,
        AminoAcid::G => -0.4,
        AminoAcid::F => 2.8,
        AminoAcid::L => 3.8,
        AminoAcid::S => -0.8,
        AminoAcid::Y => -1.3,
        AminoAcid::C => 2.5,
        AminoAcid::W => -0.9,
        AminoAcid::P => -1.6,
        AminoAcid::H => -3.2,
        AminoAcid::Q => -3.5,
        AminoAcid::R => -4.5,
        AminoAcid::I => 4.5,
        AminoAcid::M => 1.9,
        AminoAcid::T => -0.7,
        AminoAcid::N => -3.5,
        AminoAcid::K => -3.9,
    }
}

/// Sliding-window hydropathy averages.
#[derive(Debug, Clone, PartialEq)]
pub struct HydropathyProfile {
    pub window: usize,
    /// One average per window start, `len - window + 1` entries.
    pub scores: Vec<f64>,
    /// Highest score, never below 0.
    pub max_score: f64,
    /// Lowest score, never above 0.
    pub min_score: f64,
}

/// Computes the hydropathy profile of a sequence.
///
/// Returns `None` unless the window is non-zero and shorter than half the
/// sequence.
pub fn hydropathy_profile(sequence: &[AminoAcid], window: usize) -> Option<HydropathyProfile> {
    if window == 0 || sequence.len() / 2 <= window {
        return None;
    }

    let scores: Vec<f64> = sequence
        .windows(window)
        .map(|span| span.iter().copied().map(kyte_doolittle).sum::<f64>() / window as f64)
        .collect();
    let max_score = scores.iter().copied().fold(0.0, f64::max);
    let min_score = scores.iter().copied().fold(0.0, f64::min);

    Some(HydropathyProfile {
        window,
        scores,
        max_score,
        min_score,
    })
}

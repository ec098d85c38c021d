//! Biochemical properties of amino sequences.
//!
//! All calculators are pure functions. Empty sequences have no molecular
//! weight, charge or isoelectric point, so those return `None`.
//!
//! Two charge models are provided on purpose:
//! - [`net_charge`] is a stepped model: each ionisable group is fully charged,
//!   half charged exactly at its pKa, or neutral.
//! - [`isoelectric_point`] and [`isoelectric_plot`] use the smooth
//!   Henderson-Hasselbalch model with a different pKa set.

mod formula;
mod hydropathy;

pub use formula::{peptide_formula, PeptideFormula};
pub use hydropathy::{hydropathy_profile, kyte_doolittle, HydropathyProfile};

use crate::alphabet::AminoAcid;

/// Average molecular weight of water, lost at each peptide bond.
pub const WATER_WEIGHT: f64 = 18.01528;

/// Lowest pH of the isoelectric scan.
pub const PH_MIN: f64 = 0.0;
/// Upper bound of the isoelectric scan.
pub const PH_MAX: f64 = 14.0;
/// Step of the isoelectric scan.
pub const PH_STEP: f64 = 0.01;

/// Terminal pKa used when the terminal residue is the stop marker.
const DEFAULT_TERMINUS_PKA: f64 = 3.3;

/// Average molecular weight of a free amino acid (Da). The stop marker weighs
/// nothing.
pub fn residue_weight(amino: AminoAcid) -> f64 {
    match amino {
        AminoAcid::Stop => 0.0,
        AminoAcid::V => 117.14634,
        AminoAcid::A => 89.09318,
        AminoAcid::D => 133.10268,
        AminoAcid::E => 147.12926,
        AminoAcid::G => 75.0666,
        AminoAcid::F => 165.18914,
        AminoAcid::L => 131.17292,
        AminoAcid::S => 105.09258,
        AminoAcid::Y => 181.18854,
        AminoAcid::C => 121.15818,
        AminoAcid::W => 204.22518,
        AminoAcid::P => 115.13046,
        AminoAcid::H => 155.15456,
        AminoAcid::Q => 146.1445,
        AminoAcid::R => 174.20096,
        AminoAcid::I => 131.17292,
        AminoAcid::M => 149.21134,
        AminoAcid::T => 119.11916,
        AminoAcid::N => 132.11792,
        AminoAcid::K => 146.18756,
    }
}

/// Molecular weight of a peptide: residue weights minus one water per bond.
pub fn molecular_weight(sequence: &[AminoAcid]) -> Option<f64> {
    if sequence.is_empty() {
        return None;
    }

    let residues: f64 = sequence.iter().copied().map(residue_weight).sum();
    let bonds = (sequence.len() - 1) as f64;
    Some(residues - bonds * WATER_WEIGHT)
}

fn n_terminus_pka(amino: AminoAcid) -> f64 {
    match amino {
        AminoAcid::A => 9.60,
        AminoAcid::R => 9.04,
        AminoAcid::N => 8.80,
        AminoAcid::D => 9.60,
        AminoAcid::C => 10.28,
        AminoAcid::Q => 9.13,
        AminoAcid::E => 9.67,
        AminoAcid::G => 9.60,
        AminoAcid::H => 9.17,
        AminoAcid::I => 9.68,
        AminoAcid::L => 9.60,
        AminoAcid::K => 8.95,
        AminoAcid::M => 9.21,
        AminoAcid::F => 9.13,
        AminoAcid::P => 9.68,
        AminoAcid::S => 9.15,
        AminoAcid::T => 9.62,
        AminoAcid::W => 9.38,
        AminoAcid::Y => 9.11,
        AminoAcid::V => 9.62,
        AminoAcid::Stop => DEFAULT_TERMINUS_PKA,
    }
}

fn c_terminus_pka(amino: AminoAcid) -> f64 {
    match amino {
        AminoAcid::A => 2.34,
        AminoAcid::R => 2.17,
        AminoAcid::N => 2.02,
        AminoAcid::D => 1.88,
        AminoAcid::C => 1.96,
        AminoAcid::Q => 2.17,
        AminoAcid::E => 2.19,
        AminoAcid::G => 2.34,
        AminoAcid::H => 1.82,
        AminoAcid::I => 2.36,
        AminoAcid::L => 2.36,
        AminoAcid::K => 2.18,
        AminoAcid::M => 2.28,
        AminoAcid::F => 1.83,
        AminoAcid::P => 1.99,
        AminoAcid::S => 2.21,
        AminoAcid::T => 2.11,
        AminoAcid::W => 2.38,
        AminoAcid::Y => 2.20,
        AminoAcid::V => 2.32,
        AminoAcid::Stop => DEFAULT_TERMINUS_PKA,
    }
}

/// Sign of an ionisable group once charged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Ionisation {
    /// Carries +1 below its pKa.
    Basic,
    /// Carries -1 above its pKa.
    Acidic,
}

impl Ionisation {
    fn stepped_charge(self, ph: f64, pka: f64) -> f64 {
        match self {
            Ionisation::Basic if ph < pka => 1.0,
            Ionisation::Acidic if ph > pka => -1.0,
            Ionisation::Basic if ph == pka => 0.5,
            Ionisation::Acidic if ph == pka => -0.5,
            _ => 0.0,
        }
    }

    fn smooth_charge(self, ph: f64, pka: f64) -> f64 {
        match self {
            Ionisation::Basic => 1.0 / (1.0 + 10f64.powf(ph - pka)),
            Ionisation::Acidic => -1.0 / (1.0 + 10f64.powf(pka - ph)),
        }
    }
}

/// Side chain group and pKa for the stepped model.
fn stepped_side_chain(amino: AminoAcid) -> Option<(Ionisation, f64)> {
    match amino {
        AminoAcid::D => Some((Ionisation::Acidic, 3.65)),
        AminoAcid::E => Some((Ionisation::Acidic, 4.25)),
        AminoAcid::C => Some((Ionisation::Acidic, 8.18)),
        AminoAcid::Y => Some((Ionisation::Acidic, 10.07)),
        AminoAcid::K => Some((Ionisation::Basic, 10.53)),
        AminoAcid::R => Some((Ionisation::Basic, 12.48)),
        AminoAcid::H => Some((Ionisation::Basic, 6.0)),
        _ => None,
    }
}

/// Side chain group and pKa for the smooth model.
fn smooth_side_chain(amino: AminoAcid) -> Option<(Ionisation, f64)> {
    match amino {
        AminoAcid::D => Some((Ionisation::Acidic, 3.9)),
        AminoAcid::E => Some((Ionisation::Acidic, 4.07)),
        AminoAcid::C => Some((Ionisation::Acidic, 8.18)),
        AminoAcid::Y => Some((Ionisation::Acidic, 10.46)),
        AminoAcid::H => Some((Ionisation::Basic, 6.04)),
        AminoAcid::K => Some((Ionisation::Basic, 10.54)),
        AminoAcid::R => Some((Ionisation::Basic, 12.48)),
        _ => None,
    }
}

const SMOOTH_N_TERMINUS_PKA: f64 = 8.2;
const SMOOTH_C_TERMINUS_PKA: f64 = 3.65;

/// Net charge at `ph` under the stepped model.
pub fn net_charge(sequence: &[AminoAcid], ph: f64) -> Option<f64> {
    let (&first, &last) = (sequence.first()?, sequence.last()?);

    let termini = Ionisation::Basic.stepped_charge(ph, n_terminus_pka(first))
        + Ionisation::Acidic.stepped_charge(ph, c_terminus_pka(last));
    let side_chains: f64 = sequence
        .iter()
        .filter_map(|&amino| stepped_side_chain(amino))
        .map(|(group, pka)| group.stepped_charge(ph, pka))
        .sum();

    Some(termini + side_chains)
}

/// Ionisable groups of a sequence under the smooth model, counted once so the
/// pH scan does not walk the sequence at every step.
struct ChargeProfile {
    groups: Vec<(Ionisation, f64, f64)>,
}

impl ChargeProfile {
    fn new(sequence: &[AminoAcid]) -> Self {
        let mut groups: Vec<(Ionisation, f64, f64)> = vec![
            (Ionisation::Basic, SMOOTH_N_TERMINUS_PKA, 1.0),
            (Ionisation::Acidic, SMOOTH_C_TERMINUS_PKA, 1.0),
        ];
        for amino in sequence.iter().copied() {
            if let Some((group, pka)) = smooth_side_chain(amino) {
                match groups
                    .iter_mut()
                    .skip(2)
                    .find(|(g, p, _)| *g == group && *p == pka)
                {
                    Some((_, _, count)) => *count += 1.0,
                    None => groups.push((group, pka, 1.0)),
                }
            }
        }
        Self { groups }
    }

    fn charge_at(&self, ph: f64) -> f64 {
        self.groups
            .iter()
            .map(|&(group, pka, count)| count * group.smooth_charge(ph, pka))
            .sum()
    }
}

/// Isoelectric point: the first pH of the upward scan at which the smooth net
/// charge is no longer positive.
///
/// Returns `Some(0.0)` if the scan reaches [`PH_MAX`] without the charge
/// dropping, which cannot happen with this pKa set.
pub fn isoelectric_point(sequence: &[AminoAcid]) -> Option<f64> {
    if sequence.is_empty() {
        return None;
    }

    let profile = ChargeProfile::new(sequence);
    let mut ph = PH_MIN;
    loop {
        if profile.charge_at(ph) <= 0.0 {
            return Some(ph);
        }
        if ph >= PH_MAX {
            return Some(0.0);
        }
        ph += PH_STEP;
    }
}

/// Smooth net charge sampled over the pH scan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IsoelectricPlot {
    pub ph: Vec<f64>,
    pub charge: Vec<f64>,
}

impl IsoelectricPlot {
    pub fn len(&self) -> usize {
        self.ph.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ph.is_empty()
    }

    /// `(ph, charge)` samples in scan order.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.ph.iter().copied().zip(self.charge.iter().copied())
    }
}

/// Samples the smooth net charge from [`PH_MIN`] while below [`PH_MAX`].
pub fn isoelectric_plot(sequence: &[AminoAcid]) -> Option<IsoelectricPlot> {
    if sequence.is_empty() {
        return None;
    }

    let profile = ChargeProfile::new(sequence);
    let mut plot = IsoelectricPlot::default();
    let mut ph = PH_MIN;
    while ph < PH_MAX {
        plot.ph.push(ph);
        plot.charge.push(profile.charge_at(ph));
        ph += PH_STEP;
    }
    Some(plot)
}

/// Molar extinction coefficient at 280 nm assuming every cysteine pair forms
/// a cystine.
pub fn extinction_coefficient(sequence: &[AminoAcid]) -> u32 {
    let cysteines = count(sequence, AminoAcid::C);
    extinction_coefficient_reduced(sequence) + 125 * (cysteines / 2)
}

/// Molar extinction coefficient at 280 nm with all cysteines reduced.
pub fn extinction_coefficient_reduced(sequence: &[AminoAcid]) -> u32 {
    1490 * count(sequence, AminoAcid::Y) + 5500 * count(sequence, AminoAcid::W)
}

fn count(sequence: &[AminoAcid], target: AminoAcid) -> u32 {
    sequence.iter().filter(|&&amino| amino == target).count() as u32
}

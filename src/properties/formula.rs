//! Elemental formula of peptides.

use std::fmt;
use std::ops::AddAssign;

use crate::alphabet::AminoAcid;

/// Atom counts of a peptide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PeptideFormula {
    pub carbon: u32,
    pub hydrogen: u32,
    pub nitrogen: u32,
    pub oxygen: u32,
    pub sulfur: u32,
}

impl PeptideFormula {
    /// Formula of a peptide with no residues: one water molecule.
    pub const EMPTY: Self = Self::new(0, 2, 0, 1, 0);

    const fn new(carbon: u32, hydrogen: u32, nitrogen: u32, oxygen: u32, sulfur: u32) -> Self {
        Self {
            carbon,
            hydrogen,
            nitrogen,
            oxygen,
            sulfur,
        }
    }

    /// Formula of the free amino acid. `None` for the stop marker.
    pub fn of_residue(amino: AminoAcid) -> Option<Self> {
        let formula = match amino {
            AminoAcid::Stop => return None,
            AminoAcid::V => Self::new(5, 11, 1, 2, 0),
            AminoAcid::A => Self::new(3, 7, 1, 2, 0),
            AminoAcid::D => Self::new(4, 7, 1, 4, 0),
            AminoAcid::E => Self::new(5, 9, 1, 4, 0),
            AminoAcid::G => Self::new(2, 5, 1, 2, 0),
            AminoAcid::F => Self::new(9, 11, 1, 2, 0),
            AminoAcid::L => Self::new(6, 13, 1, 2, 0),
            AminoAcid::S => Self::new(3, 7, 1, 3, 0),
            AminoAcid::Y => Self::new(9, 11, 1, 3, 0),
            AminoAcid::C => Self::new(3, 7, 1, 2, 1),
            AminoAcid::W => Self::new(11, 12, 2, 2, 0),
            AminoAcid::P => Self::new(5, 9, 1, 2, 0),
            AminoAcid::H => Self::new(6, 9, 3, 2, 0),
            AminoAcid::Q => Self::new(5, 10, 2, 3, 0),
            AminoAcid::R => Self::new(6, 14, 4, 2, 0),
            AminoAcid::I => Self::new(6, 13, 1, 2, 0),
            AminoAcid::M => Self::new(5, 11, 1, 2, 1),
            AminoAcid::T => Self::new(4, 9, 1, 3, 0),
            AminoAcid::N => Self::new(4, 8, 2, 3, 0),
            AminoAcid::K => Self::new(6, 14, 2, 2, 0),
        };
        Some(formula)
    }

    /// Renders the formula in Hill-like order (`C3H7NO2`). Elements with a
    /// zero count are left out and a count of one carries no digit.
    pub fn bake(&self) -> String {
        let mut baked = String::new();
        for (symbol, count) in [
            ('C', self.carbon),
            ('H', self.hydrogen),
            ('N', self.nitrogen),
            ('O', self.oxygen),
            ('S', self.sulfur),
        ] {
            match count {
                0 => {}
                1 => baked.push(symbol),
                n => {
                    baked.push(symbol);
                    baked.push_str(&n.to_string());
                }
            }
        }
        baked
    }
}

impl Default for PeptideFormula {
    fn default() -> Self {
        Self::EMPTY
    }
}

/// Adds a residue, releasing one water for the new peptide bond. Stop markers
/// contribute nothing.
impl AddAssign<AminoAcid> for PeptideFormula {
    fn add_assign(&mut self, amino: AminoAcid) {
        let Some(residue) = Self::of_residue(amino) else {
            return;
        };
        self.carbon += residue.carbon;
        self.hydrogen += residue.hydrogen - 2;
        self.nitrogen += residue.nitrogen;
        self.oxygen += residue.oxygen - 1;
        self.sulfur += residue.sulfur;
    }
}

impl FromIterator<AminoAcid> for PeptideFormula {
    fn from_iter<I: IntoIterator<Item = AminoAcid>>(iter: I) -> Self {
        let mut formula = Self::EMPTY;
        for amino in iter {
            formula += amino;
        }
        formula
    }
}

impl fmt::Display for PeptideFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.bake())
    }
}

/// Elemental formula of a peptide.
pub fn peptide_formula(sequence: &[AminoAcid]) -> PeptideFormula {
    sequence.iter().copied().collect()
}

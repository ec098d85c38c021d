//! Calculation parameters.

use thiserror::Error;

use crate::properties::{PH_MAX, PH_MIN};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SettingsError {
    #[error("pH must be between 0 and 14 (got {0})")]
    InvalidPh(f64),

    #[error("Hydropathy window must be an odd number of at least 3 (got {0})")]
    InvalidWindow(usize),
}

/// Parameters shared by the property calculations of a project.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CalculationSettings {
    /// pH used for the net charge.
    pub ph: f64,
    /// Window length of the hydropathy profile.
    pub hydropathy_window: usize,
}

impl CalculationSettings {
    pub const DEFAULT_PH: f64 = 7.0;
    pub const DEFAULT_HYDROPATHY_WINDOW: usize = 3;

    pub fn validate(&self) -> Result<(), SettingsError> {
        validate_ph(self.ph)?;
        validate_window(self.hydropathy_window)
    }
}

impl Default for CalculationSettings {
    fn default() -> Self {
        Self {
            ph: Self::DEFAULT_PH,
            hydropathy_window: Self::DEFAULT_HYDROPATHY_WINDOW,
        }
    }
}

pub fn validate_ph(ph: f64) -> Result<(), SettingsError> {
    if (PH_MIN..=PH_MAX).contains(&ph) {
        Ok(())
    } else {
        Err(SettingsError::InvalidPh(ph))
    }
}

/// A window needs a central residue, so it must be odd.
pub fn validate_window(window: usize) -> Result<(), SettingsError> {
    if window >= 3 && window % 2 == 1 {
        Ok(())
    } else {
        Err(SettingsError::InvalidWindow(window))
    }
}

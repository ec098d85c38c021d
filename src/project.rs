//! Project context: registered sequences, the current selection and the
//! calculations cached for it.
//!
//! ## Cache tiers
//!
//! - The sequence tier holds the baked strings and properties of the selected
//!   sequence (in the selected view and frame).
//! - The peptide tier holds the same for the selected protein candidate.
//!
//! Changing the view, sequence or frame drops both tiers. Changing only the
//! peptide drops the peptide tier. Tiers are rebuilt lazily by
//! [`Project::current_view`].

use std::fmt;

use log::{debug, info};
use thiserror::Error;

use crate::alphabet::AminoAcid;
use crate::convert::{sequence_to_string, to_three_letter_code, AminoSequence};
use crate::genetic_code::Frame;
use crate::properties::{
    extinction_coefficient, extinction_coefficient_reduced, hydropathy_profile,
    isoelectric_plot, isoelectric_point, molecular_weight, net_charge, peptide_formula,
    HydropathyProfile, IsoelectricPlot, PeptideFormula,
};
use crate::record::SequenceRecord;
use crate::registry::{RegistryError, SequenceId, SequenceRegistry};
use crate::settings::{validate_ph, validate_window, CalculationSettings, SettingsError};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProjectError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error("Sequence {0} is a protein and has no nucleotide view")]
    NoNucleotideView(SequenceId),

    #[error("Sequence {0} needs a reading frame")]
    MissingFrame(SequenceId),

    #[error("Sequence {sequence} has {count} protein candidates, no candidate {index}")]
    PeptideOutOfRange {
        sequence: SequenceId,
        index: usize,
        count: usize,
    },

    #[error(transparent)]
    Settings(#[from] SettingsError),
}

pub type ProjectResult<T> = Result<T, ProjectError>;

/// How the selected sequence is displayed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SequenceView {
    Nucleotide,
    Amino,
}

/// What the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Selection {
    pub view: SequenceView,
    pub sequence: SequenceId,
    /// Required for DNA and RNA records, ignored for protein records.
    pub frame: Option<Frame>,
    /// Index into the candidates of the selected frame.
    pub peptide: Option<usize>,
}

impl Selection {
    pub fn nucleotide(sequence: SequenceId, frame: Frame) -> Self {
        Self {
            view: SequenceView::Nucleotide,
            sequence,
            frame: Some(frame),
            peptide: None,
        }
    }

    pub fn amino(sequence: SequenceId, frame: Option<Frame>) -> Self {
        Self {
            view: SequenceView::Amino,
            sequence,
            frame,
            peptide: None,
        }
    }

    pub fn with_peptide(mut self, index: usize) -> Self {
        self.peptide = Some(index);
        self
    }

    /// True if `other` shows the same sequence data, peptide aside.
    fn same_sequence_as(&self, other: &Selection) -> bool {
        self.view == other.view && self.sequence == other.sequence && self.frame == other.frame
    }
}

/// Derived properties of one amino sequence.
#[derive(Debug, Clone, PartialEq)]
pub struct PropertySet {
    pub molecular_weight: Option<f64>,
    pub isoelectric_point: Option<f64>,
    pub net_charge: Option<f64>,
    pub extinction_coefficient: u32,
    pub extinction_coefficient_reduced: u32,
    /// `None` for an empty sequence.
    pub formula: Option<PeptideFormula>,
    pub isoelectric_plot: Option<IsoelectricPlot>,
    pub hydropathy: Option<HydropathyProfile>,
}

impl PropertySet {
    fn compute(amino: &[AminoAcid], settings: &CalculationSettings) -> Self {
        Self {
            molecular_weight: molecular_weight(amino),
            isoelectric_point: isoelectric_point(amino),
            net_charge: net_charge(amino, settings.ph),
            extinction_coefficient: extinction_coefficient(amino),
            extinction_coefficient_reduced: extinction_coefficient_reduced(amino),
            formula: (!amino.is_empty()).then(|| peptide_formula(amino)),
            isoelectric_plot: isoelectric_plot(amino),
            hydropathy: hydropathy_profile(amino, settings.hydropathy_window),
        }
    }
}

/// Sequence tier.
#[derive(Debug, Clone, PartialEq)]
pub struct SequenceCache {
    pub name: String,
    pub view: SequenceView,
    /// Empty in the amino view.
    pub nucleotides: String,
    pub amino: AminoSequence,
    pub baked_amino: String,
    pub three_letter_code: String,
    pub candidates: Vec<String>,
    pub candidate_lengths: Vec<usize>,
    pub properties: PropertySet,
}

impl SequenceCache {
    fn build(
        record: &SequenceRecord,
        view: SequenceView,
        frame: Frame,
        settings: &CalculationSettings,
    ) -> Self {
        let amino = record.amino_sequence(frame).clone();
        let candidates = record.bake_protein_candidates(frame);
        let candidate_lengths = candidates.iter().map(String::len).collect();
        let nucleotides = match view {
            SequenceView::Nucleotide => record.bake_sequence(frame),
            SequenceView::Amino => String::new(),
        };

        Self {
            name: record.name().to_string(),
            view,
            nucleotides,
            baked_amino: sequence_to_string(&amino),
            three_letter_code: to_three_letter_code(&amino),
            candidates,
            candidate_lengths,
            properties: PropertySet::compute(&amino, settings),
            amino,
        }
    }
}

/// Peptide tier.
#[derive(Debug, Clone, PartialEq)]
pub struct PeptideCache {
    pub name: String,
    pub index: usize,
    pub candidate: AminoSequence,
    pub baked: String,
    pub three_letter_code: String,
    pub properties: PropertySet,
}

impl PeptideCache {
    fn build(
        name: &str,
        index: usize,
        candidate: &[AminoAcid],
        settings: &CalculationSettings,
    ) -> Self {
        Self {
            name: name.to_string(),
            index,
            candidate: candidate.to_vec(),
            baked: sequence_to_string(candidate),
            three_letter_code: to_three_letter_code(candidate),
            properties: PropertySet::compute(candidate, settings),
        }
    }
}

/// The populated tier matching the selection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CurrentView<'a> {
    Sequence(&'a SequenceCache),
    Peptide(&'a PeptideCache),
}

impl CurrentView<'_> {
    pub fn name(&self) -> &str {
        match self {
            CurrentView::Sequence(cache) => &cache.name,
            CurrentView::Peptide(cache) => &cache.name,
        }
    }

    pub fn properties(&self) -> &PropertySet {
        match self {
            CurrentView::Sequence(cache) => &cache.properties,
            CurrentView::Peptide(cache) => &cache.properties,
        }
    }
}

/// Callback run after every selection change.
pub type SelectionCallback = Box<dyn Fn(Option<&Selection>)>;

/// Owns the registry, the selection and everything derived from it.
pub struct Project {
    registry: SequenceRegistry,
    selection: Option<Selection>,
    settings: CalculationSettings,
    sequence_cache: Option<SequenceCache>,
    peptide_cache: Option<PeptideCache>,
    subscribers: Vec<SelectionCallback>,
    unsaved: bool,
}

impl Project {
    pub fn new() -> Self {
        Self {
            registry: SequenceRegistry::new(),
            selection: None,
            settings: CalculationSettings::default(),
            sequence_cache: None,
            peptide_cache: None,
            subscribers: Vec::new(),
            unsaved: false,
        }
    }

    pub fn with_settings(settings: CalculationSettings) -> ProjectResult<Self> {
        settings.validate()?;
        Ok(Self {
            settings,
            ..Self::new()
        })
    }

    pub fn registry(&self) -> &SequenceRegistry {
        &self.registry
    }

    pub fn settings(&self) -> &CalculationSettings {
        &self.settings
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    /// True if sequences were added or removed since the last save.
    pub fn is_unsaved(&self) -> bool {
        self.unsaved
    }

    pub fn mark_saved(&mut self) {
        self.unsaved = false;
    }

    pub fn register(&mut self, record: SequenceRecord) -> SequenceId {
        self.unsaved = true;
        self.registry.register(record)
    }

    /// Removes a sequence. Removing the selected sequence clears the
    /// selection.
    pub fn unregister(&mut self, id: SequenceId) -> ProjectResult<SequenceRecord> {
        let record = self.registry.unregister(id)?;
        self.unsaved = true;
        if self.selection.is_some_and(|selection| selection.sequence == id) {
            self.clear_selection();
        }
        Ok(record)
    }

    /// Registers a subscriber notified after every selection change.
    pub fn subscribe(&mut self, callback: impl Fn(Option<&Selection>) + 'static) {
        self.subscribers.push(Box::new(callback));
    }

    /// Changes the selection. Invalid selections leave the project untouched.
    pub fn select(&mut self, selection: Selection) -> ProjectResult<()> {
        let selection = self.validate(selection)?;

        match &self.selection {
            Some(current) if current.same_sequence_as(&selection) => {
                if current.peptide != selection.peptide {
                    debug!("Peptide selection changed, dropping peptide cache");
                    self.peptide_cache = None;
                }
            }
            _ => {
                debug!("Sequence selection changed, dropping caches");
                self.drop_caches();
            }
        }

        self.selection = Some(selection);
        self.notify();
        Ok(())
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
        self.drop_caches();
        self.notify();
    }

    /// Checks a selection against the registry and normalizes the frame of
    /// protein records to `None`.
    fn validate(&self, mut selection: Selection) -> ProjectResult<Selection> {
        let record = self
            .registry
            .get(selection.sequence)
            .ok_or(RegistryError::UnknownSequence(selection.sequence))?;

        let frame = if record.kind().is_nucleotide() {
            selection
                .frame
                .ok_or(ProjectError::MissingFrame(selection.sequence))?
        } else {
            if selection.view == SequenceView::Nucleotide {
                return Err(ProjectError::NoNucleotideView(selection.sequence));
            }
            selection.frame = None;
            Frame::default()
        };

        if let Some(index) = selection.peptide {
            let count = record.candidates(frame).len();
            if index >= count {
                return Err(ProjectError::PeptideOutOfRange {
                    sequence: selection.sequence,
                    index,
                    count,
                });
            }
        }

        Ok(selection)
    }

    fn drop_caches(&mut self) {
        self.sequence_cache = None;
        self.peptide_cache = None;
    }

    fn notify(&self) {
        for subscriber in &self.subscribers {
            subscriber(self.selection.as_ref());
        }
    }

    /// Populates the cache tiers for the selection and returns the peptide
    /// tier if a peptide is selected, otherwise the sequence tier.
    pub fn current_view(&mut self) -> Option<CurrentView<'_>> {
        let selection = self.selection?;
        let record = self.registry.get(selection.sequence)?;
        let frame = selection.frame.unwrap_or_default();

        if self.sequence_cache.is_none() {
            debug!("Populating sequence cache for {}", selection.sequence);
            self.sequence_cache = Some(SequenceCache::build(
                record,
                selection.view,
                frame,
                &self.settings,
            ));
        }

        match selection.peptide {
            Some(index) => {
                if self.peptide_cache.is_none() {
                    let candidate = record.candidates(frame).get(index)?;
                    debug!(
                        "Populating peptide cache for candidate {} of {}",
                        index, selection.sequence
                    );
                    self.peptide_cache = Some(PeptideCache::build(
                        record.name(),
                        index,
                        candidate,
                        &self.settings,
                    ));
                }
                self.peptide_cache.as_ref().map(CurrentView::Peptide)
            }
            None => self.sequence_cache.as_ref().map(CurrentView::Sequence),
        }
    }

    /// Sequence tier as currently cached, without populating it.
    pub fn cached_sequence(&self) -> Option<&SequenceCache> {
        self.sequence_cache.as_ref()
    }

    /// Peptide tier as currently cached, without populating it.
    pub fn cached_peptide(&self) -> Option<&PeptideCache> {
        self.peptide_cache.as_ref()
    }

    /// Sets the pH and recomputes the net charge of the cached tiers.
    pub fn set_ph(&mut self, ph: f64) -> ProjectResult<()> {
        validate_ph(ph)?;
        self.settings.ph = ph;

        if let Some(cache) = self.sequence_cache.as_mut() {
            cache.properties.net_charge = net_charge(&cache.amino, ph);
        }
        if let Some(cache) = self.peptide_cache.as_mut() {
            cache.properties.net_charge = net_charge(&cache.candidate, ph);
        }
        Ok(())
    }

    /// Sets the hydropathy window and recomputes the profiles of the cached
    /// tiers.
    pub fn set_hydropathy_window(&mut self, window: usize) -> ProjectResult<()> {
        validate_window(window)?;
        self.settings.hydropathy_window = window;

        if let Some(cache) = self.sequence_cache.as_mut() {
            cache.properties.hydropathy = hydropathy_profile(&cache.amino, window);
        }
        if let Some(cache) = self.peptide_cache.as_mut() {
            cache.properties.hydropathy = hydropathy_profile(&cache.candidate, window);
        }
        Ok(())
    }

    /// Drops every sequence, the selection and the caches. Ids handed out
    /// before the reset are not reused.
    pub fn reset(&mut self) {
        info!("Resetting project ({} sequences)", self.registry.len());
        self.registry.clear();
        self.unsaved = false;
        self.clear_selection();
    }
}

impl Default for Project {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for Project {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Project")
            .field("registry", &self.registry)
            .field("selection", &self.selection)
            .field("settings", &self.settings)
            .field("subscribers", &self.subscribers.len())
            .field("unsaved", &self.unsaved)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::Strand;
    use std::cell::RefCell;
    use std::rc::Rc;

    /// Frame 2 translates to `MF-MKV`: two candidates.
    fn project_with_dna() -> (Project, SequenceId) {
        let mut project = Project::new();
        let id = project.register(SequenceRecord::dna(
            "gene",
            "AATGTTTTAGATGAAAGTT",
            Strand::Forward,
        ));
        (project, id)
    }

    #[test]
    fn test_register_marks_unsaved() {
        let (mut project, id) = project_with_dna();
        assert!(project.is_unsaved());
        project.mark_saved();
        assert!(!project.is_unsaved());
        project.unregister(id).unwrap();
        assert!(project.is_unsaved());
    }

    #[test]
    fn test_nucleotide_view() {
        let (mut project, id) = project_with_dna();
        project
            .select(Selection::nucleotide(id, Frame::Second))
            .unwrap();

        let Some(CurrentView::Sequence(cache)) = project.current_view() else {
            panic!("expected the sequence tier");
        };
        assert_eq!(cache.name, "gene");
        assert_eq!(cache.nucleotides, "ATGTTTTAGATGAAAGTT");
        assert_eq!(cache.baked_amino, "MF-MKV");
        assert_eq!(cache.three_letter_code, "MET-PHE-TER-MET-LYS-VAL");
        assert_eq!(cache.candidates, vec!["MF", "MKV"]);
        assert_eq!(cache.candidate_lengths, vec![2, 3]);
        assert!(cache.properties.molecular_weight.is_some());
        assert!(cache.properties.formula.is_some());
    }

    #[test]
    fn test_peptide_view() {
        let (mut project, id) = project_with_dna();
        project
            .select(Selection::nucleotide(id, Frame::Second).with_peptide(1))
            .unwrap();

        let view = project.current_view().unwrap();
        let CurrentView::Peptide(cache) = view else {
            panic!("expected the peptide tier");
        };
        assert_eq!(cache.index, 1);
        assert_eq!(cache.baked, "MKV");
        assert_eq!(cache.three_letter_code, "MET-LYS-VAL");
        assert_eq!(view.name(), "gene");
        assert!(project.cached_sequence().is_some());
    }

    #[test]
    fn test_no_selection_no_view() {
        let (mut project, _) = project_with_dna();
        assert!(project.current_view().is_none());
    }

    #[test]
    fn test_peptide_change_keeps_sequence_tier() {
        let (mut project, id) = project_with_dna();
        project
            .select(Selection::nucleotide(id, Frame::Second).with_peptide(0))
            .unwrap();
        project.current_view();
        assert!(project.cached_sequence().is_some());
        assert!(project.cached_peptide().is_some());

        project
            .select(Selection::nucleotide(id, Frame::Second).with_peptide(1))
            .unwrap();
        assert!(project.cached_sequence().is_some());
        assert!(project.cached_peptide().is_none());
    }

    #[test]
    fn test_frame_change_drops_both_tiers() {
        let (mut project, id) = project_with_dna();
        project
            .select(Selection::nucleotide(id, Frame::Second).with_peptide(0))
            .unwrap();
        project.current_view();

        project
            .select(Selection::nucleotide(id, Frame::First))
            .unwrap();
        assert!(project.cached_sequence().is_none());
        assert!(project.cached_peptide().is_none());
    }

    #[test]
    fn test_sequence_change_drops_both_tiers() {
        let (mut project, id) = project_with_dna();
        let other = project.register(SequenceRecord::dna(
            "other",
            "AATGTTTTAGATGAAAGTT",
            Strand::Forward,
        ));
        project
            .select(Selection::nucleotide(id, Frame::Second).with_peptide(0))
            .unwrap();
        project.current_view();
        assert!(project.cached_sequence().is_some());
        assert!(project.cached_peptide().is_some());

        // Same frame, view and peptide index on another sequence
        project
            .select(Selection::nucleotide(other, Frame::Second).with_peptide(0))
            .unwrap();
        assert!(project.cached_sequence().is_none());
        assert!(project.cached_peptide().is_none());

        project.current_view();
        assert_eq!(project.cached_sequence().unwrap().name, "other");
    }

    #[test]
    fn test_view_change_drops_both_tiers() {
        let (mut project, id) = project_with_dna();
        project
            .select(Selection::nucleotide(id, Frame::Second))
            .unwrap();
        project.current_view();

        project
            .select(Selection::amino(id, Some(Frame::Second)))
            .unwrap();
        assert!(project.cached_sequence().is_none());

        let Some(CurrentView::Sequence(cache)) = project.current_view() else {
            panic!("expected the sequence tier");
        };
        assert_eq!(cache.view, SequenceView::Amino);
        assert!(cache.nucleotides.is_empty());
        assert_eq!(cache.baked_amino, "MF-MKV");
    }

    #[test]
    fn test_invalid_selections_leave_state_untouched() {
        let (mut project, id) = project_with_dna();
        let protein = project.register(SequenceRecord::amino("pep", "MKV"));
        let gone = project.register(SequenceRecord::amino("gone", "M"));
        project.unregister(gone).unwrap();
        let selection = Selection::nucleotide(id, Frame::Second);
        project.select(selection).unwrap();
        project.current_view();

        assert!(matches!(
            project.select(Selection::amino(gone, None)),
            Err(ProjectError::Registry(RegistryError::UnknownSequence(_)))
        ));
        assert_eq!(
            project.select(Selection::nucleotide(protein, Frame::First)),
            Err(ProjectError::NoNucleotideView(protein))
        );
        assert_eq!(
            project.select(Selection::amino(id, None)),
            Err(ProjectError::MissingFrame(id))
        );
        assert_eq!(
            project.select(Selection::nucleotide(id, Frame::Second).with_peptide(2)),
            Err(ProjectError::PeptideOutOfRange {
                sequence: id,
                index: 2,
                count: 2
            })
        );

        assert_eq!(project.selection(), Some(&selection));
        assert!(project.cached_sequence().is_some());
    }

    #[test]
    fn test_protein_record_frame_ignored() {
        let mut project = Project::new();
        let id = project.register(SequenceRecord::amino("pep", "MAAA-MKKK"));
        project
            .select(Selection::amino(id, Some(Frame::Third)).with_peptide(1))
            .unwrap();
        assert_eq!(project.selection().unwrap().frame, None);

        let Some(CurrentView::Peptide(cache)) = project.current_view() else {
            panic!("expected the peptide tier");
        };
        assert_eq!(cache.baked, "MKKK");
    }

    #[test]
    fn test_subscribers_notified() {
        let (mut project, id) = project_with_dna();
        let seen: Rc<RefCell<Vec<Option<Selection>>>> = Rc::default();
        let sink = Rc::clone(&seen);
        project.subscribe(move |selection| sink.borrow_mut().push(selection.copied()));

        let selection = Selection::nucleotide(id, Frame::First);
        project.select(selection).unwrap();
        project.select(selection.with_peptide(5)).unwrap_err();
        project.clear_selection();

        assert_eq!(*seen.borrow(), vec![Some(selection), None]);
    }

    #[test]
    fn test_unregister_selected_clears_selection() {
        let (mut project, id) = project_with_dna();
        let other = project.register(SequenceRecord::amino("pep", "MKV"));
        project
            .select(Selection::nucleotide(id, Frame::First))
            .unwrap();

        project.unregister(other).unwrap();
        assert!(project.selection().is_some());

        project.unregister(id).unwrap();
        assert!(project.selection().is_none());
        assert!(project.current_view().is_none());
        assert!(matches!(
            project.unregister(id),
            Err(ProjectError::Registry(_))
        ));
    }

    #[test]
    fn test_set_ph_recomputes_net_charge() {
        let mut project = Project::new();
        let id = project.register(SequenceRecord::amino("all", "ARNDCQEGHILKMFPSTWYV"));
        project.select(Selection::amino(id, None)).unwrap();
        project.current_view();
        let pi = project.cached_sequence().unwrap().properties.isoelectric_point;

        project.set_ph(10.0).unwrap();
        let cache = project.cached_sequence().unwrap();
        assert_eq!(cache.properties.net_charge, Some(-2.0));
        assert_eq!(cache.properties.isoelectric_point, pi);
        assert_eq!(project.settings().ph, 10.0);

        assert!(matches!(
            project.set_ph(15.0),
            Err(ProjectError::Settings(SettingsError::InvalidPh(_)))
        ));
        assert_eq!(project.settings().ph, 10.0);
    }

    #[test]
    fn test_set_hydropathy_window() {
        let mut project = Project::new();
        let id = project.register(SequenceRecord::amino("all", "ARNDCQEGHILKMFPSTWYV"));
        project.select(Selection::amino(id, None)).unwrap();
        project.current_view();
        assert_eq!(
            project
                .cached_sequence()
                .and_then(|cache| cache.properties.hydropathy.as_ref())
                .map(|profile| profile.scores.len()),
            Some(18)
        );

        project.set_hydropathy_window(9).unwrap();
        let profile = project
            .cached_sequence()
            .and_then(|cache| cache.properties.hydropathy.as_ref())
            .unwrap();
        assert_eq!(profile.window, 9);
        assert_eq!(profile.scores.len(), 12);

        assert!(project.set_hydropathy_window(4).is_err());
        assert_eq!(project.settings().hydropathy_window, 9);
    }

    #[test]
    fn test_reset_keeps_id_counter() {
        let (mut project, id) = project_with_dna();
        project
            .select(Selection::nucleotide(id, Frame::First))
            .unwrap();
        project.reset();

        assert!(project.registry().is_empty());
        assert!(project.selection().is_none());
        assert!(!project.is_unsaved());

        let next = project.register(SequenceRecord::amino("pep", "M"));
        assert!(next > id);
    }

    #[test]
    fn test_with_settings_validates() {
        let settings = CalculationSettings {
            ph: 7.5,
            hydropathy_window: 2,
        };
        assert!(Project::with_settings(settings).is_err());
    }
}

//! Scripted engine for exercising the preparation layer in tests.
//!
//! [`StubEngine`] implements [`TagEngine`] without any real tagging logic:
//! it records what it was configured and run with and fabricates one
//! deterministic candidate per input object. The integration tests and the
//! benches use it to drive [`Tagger`](crate::Tagger) end to end without an
//! external engine build.

use std::path::{Path, PathBuf};

use tagprep_core::{
    CandidateKind, Constituent, ConstituentKind, Error, LorentzVector, Result, TaggedCandidate,
};

use crate::dispatch::InputSet;
use crate::engine::TagEngine;
use crate::inputs::{CandInput, FatJetInput, JetInput};

/// Discriminator assigned to the fabricated three-jet candidate.
pub const STUB_TRIJET_DISC: f64 = 0.5;

/// Scale factor assigned to fabricated merged candidates.
pub const STUB_SCALE_FACTOR: f64 = 1.05;

/// Engine double that fabricates deterministic candidates from its inputs.
#[derive(Debug, Default)]
pub struct StubEngine {
    cfg_path: PathBuf,
    working_dir: Option<PathBuf>,
    results: Vec<TaggedCandidate>,
    candidates: Vec<TaggedCandidate>,
    combination: Option<&'static str>,
    /// When set, the next `run` fails with an engine error and the flag
    /// clears itself. Prior outputs stay in place.
    pub fail_next_run: bool,
}

impl StubEngine {
    /// Path the engine was configured from.
    pub fn cfg_path(&self) -> &Path {
        &self.cfg_path
    }

    /// Working directory recorded at configuration, if any.
    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Combination label of the last successful run.
    pub fn combination(&self) -> Option<&'static str> {
        self.combination
    }
}

impl TagEngine for StubEngine {
    fn configure(cfg_path: &Path, working_dir: Option<&Path>) -> Result<Self> {
        if cfg_path.as_os_str().is_empty() {
            return Err(Error::Configuration("engine configuration path is empty".into()));
        }
        Ok(Self {
            cfg_path: cfg_path.to_path_buf(),
            working_dir: working_dir.map(Path::to_path_buf),
            ..Self::default()
        })
    }

    fn run(&mut self, inputs: InputSet<'_>) -> Result<()> {
        if self.fail_next_run {
            self.fail_next_run = false;
            return Err(Error::Engine("scripted stub failure".into()));
        }

        let mut results = Vec::new();
        let mut candidates = Vec::new();
        match &inputs {
            InputSet::Jets(jets) => tag_jets(jets, &mut results, &mut candidates),
            InputSet::JetsAndCands(jets, cands) => {
                tag_jets(jets, &mut results, &mut candidates);
                tag_cands(cands, &mut results, &mut candidates);
            }
            InputSet::FatJets(fat_jets) => tag_fat_jets(fat_jets, &mut results, &mut candidates),
            InputSet::JetsAndFatJets(jets, fat_jets) => {
                tag_jets(jets, &mut results, &mut candidates);
                tag_fat_jets(fat_jets, &mut results, &mut candidates);
            }
            InputSet::All(jets, cands, fat_jets) => {
                tag_jets(jets, &mut results, &mut candidates);
                tag_cands(cands, &mut results, &mut candidates);
                tag_fat_jets(fat_jets, &mut results, &mut candidates);
            }
        }

        self.combination = Some(inputs.kind());
        self.results = results;
        self.candidates = candidates;
        Ok(())
    }

    fn results(&self) -> &[TaggedCandidate] {
        &self.results
    }

    fn candidates(&self) -> &[TaggedCandidate] {
        &self.candidates
    }
}

/// One unclassified trial per kept jet, plus a resolved top built from the
/// first three kept jets when the event has that many.
fn tag_jets(
    input: &JetInput<'_>,
    results: &mut Vec<TaggedCandidate>,
    candidates: &mut Vec<TaggedCandidate>,
) {
    for row in input.kept() {
        let p4 = input.jets.value(row);
        candidates.push(
            TaggedCandidate::new(p4, f64::from(input.btag.value(row)), CandidateKind::None)
                .with_constituent(Constituent::new(p4, ConstituentKind::Jet, row)),
        );
    }

    let trio: Vec<usize> = input.kept().take(3).collect();
    if trio.len() < 3 {
        return;
    }
    let mut p4 = LorentzVector::new(0.0, 0.0, 0.0, 0.0);
    for &row in &trio {
        p4 = p4.add(&input.jets.value(row));
    }
    let mut top = TaggedCandidate::new(p4, STUB_TRIJET_DISC, CandidateKind::ResolvedTop);
    for &row in &trio {
        let jet = input.jets.value(row);
        top = top.with_constituent(Constituent::new(jet, ConstituentKind::Jet, row));
    }
    if let Some(row) = input.truth.and_then(|t| t.linked_rows().next()) {
        top = top.with_gen_match(row);
    }
    candidates.push(top.clone());
    results.push(top);
}

/// One resolved top per precomputed candidate row, carrying the stored
/// discriminator and the non-sentinel constituent-jet rows.
fn tag_cands(
    input: &CandInput<'_>,
    results: &mut Vec<TaggedCandidate>,
    candidates: &mut Vec<TaggedCandidate>,
) {
    for i in 0..input.len() {
        let p4 = input.cands.value(i);
        let mut top =
            TaggedCandidate::new(p4, f64::from(input.disc.value(i)), CandidateKind::ResolvedTop);
        for row in input.constituent_rows(i) {
            top = top.with_constituent(Constituent::new(p4, ConstituentKind::Jet, row));
        }
        candidates.push(top.clone());
        results.push(top);
    }
}

/// One merged top per fat jet, with a fixed scale factor and a single
/// systematic entry so the scale-factor table has something to project.
fn tag_fat_jets(
    input: &FatJetInput<'_>,
    results: &mut Vec<TaggedCandidate>,
    candidates: &mut Vec<TaggedCandidate>,
) {
    for i in 0..input.len() {
        let p4 = input.fat_jets.value(i);
        let mut top =
            TaggedCandidate::new(p4, f64::from(input.top_disc.value(i)), CandidateKind::MergedTop)
                .with_constituent(Constituent::new(p4, ConstituentKind::FatJet, i))
                .with_scale_factor(STUB_SCALE_FACTOR)
                .with_systematic("sf_up", 0.02);
        if let Some(row) = input.truth.and_then(|t| t.linked_rows().next()) {
            top = top.with_gen_match(row);
        }
        candidates.push(top.clone());
        results.push(top);
    }
}

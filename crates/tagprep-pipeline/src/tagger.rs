//! Pipeline driver wrapping a tagging engine.

use std::path::Path;

use tagprep_core::{Result, TaggedCandidate};

use crate::dispatch::InputSet;
use crate::engine::TagEngine;
use crate::gen_truth::GenColumns;
use crate::inputs::{CandColumns, FatJetColumns, JetColumns};
use crate::project::{self, KinematicTable, ScaleFactorTable};

/// Event-preparation driver owning a tagging engine across invocations.
///
/// Each call to [`run`](Tagger::run) assembles the supplied column groups
/// into per-invocation inputs, selects the constituent combination and hands
/// the set to the engine in one call. The accessors expose the engine's two
/// result surfaces and project either one into flat tables.
#[derive(Debug)]
pub struct Tagger<E> {
    engine: E,
}

impl<E: TagEngine> Tagger<E> {
    /// Configure the engine from its parameter file and wrap the handle.
    pub fn configure(cfg_path: &Path, working_dir: Option<&Path>) -> Result<Self> {
        let engine = E::configure(cfg_path, working_dir)?;
        Ok(Self { engine })
    }

    /// Prepare one invocation's inputs and run the engine over them.
    ///
    /// The generator block, when supplied, is linked once and the resulting
    /// truth record is shared by the jet and fat-jet inputs. Fails without
    /// touching the engine when the populated groups form no legal
    /// combination, so a failed call leaves any earlier results in place.
    /// All intermediates live only for the duration of the call.
    pub fn run<'a>(
        &mut self,
        jets: Option<JetColumns<'a>>,
        fat_jets: Option<FatJetColumns<'a>>,
        cands: Option<CandColumns<'a>>,
        gen: Option<GenColumns<'a>>,
    ) -> Result<()> {
        let truth = gen.map(|g| g.link());
        let truth = truth.as_ref();

        let jet_input = match jets {
            Some(columns) => Some(columns.assemble(truth)?),
            None => None,
        };
        let cand_input = match cands {
            Some(columns) => Some(columns.assemble()?),
            None => None,
        };
        let fat_jet_input = match fat_jets {
            Some(columns) => Some(columns.assemble(truth)?),
            None => None,
        };

        let set = InputSet::select(jet_input, cand_input, fat_jet_input)?;
        log::debug!("running tagging engine over {} inputs", set.kind());
        self.engine.run(set)
    }

    /// Final tagged objects from the last successful run.
    pub fn results(&self) -> &[TaggedCandidate] {
        self.engine.results()
    }

    /// Every candidate the engine trialed, including unclassified ones.
    pub fn candidates(&self) -> &[TaggedCandidate] {
        self.engine.candidates()
    }

    /// Kinematic table over the final tagged objects.
    pub fn results_table(&self) -> KinematicTable {
        project::project_kinematics(self.engine.results())
    }

    /// Kinematic table over the full candidate list.
    pub fn candidates_table(&self) -> KinematicTable {
        project::project_kinematics(self.engine.candidates())
    }

    /// Scale-factor table over the final tagged objects.
    pub fn results_scale_factors(&self) -> ScaleFactorTable {
        project::project_scale_factors(self.engine.results())
    }

    /// Scale-factor table over the full candidate list.
    pub fn candidates_scale_factors(&self) -> ScaleFactorTable {
        project::project_scale_factors(self.engine.candidates())
    }

    /// Shared access to the wrapped engine.
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Mutable access to the wrapped engine.
    pub fn engine_mut(&mut self) -> &mut E {
        &mut self.engine
    }
}

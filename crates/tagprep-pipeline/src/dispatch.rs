//! Selection of the engine input combination.
//!
//! The engine accepts a closed set of input combinations. Candidate input
//! requires the narrow-jet input alongside it, since candidate constituent
//! indices resolve into the jet collection. Selection happens before the
//! engine is touched, so an illegal combination never costs engine work.

use tagprep_core::{Error, Result};

use crate::inputs::{CandInput, FatJetInput, JetInput};

/// One legal combination of assembled inputs.
#[derive(Debug, Clone)]
pub enum InputSet<'a> {
    /// Narrow jets alone
    Jets(JetInput<'a>),
    /// Narrow jets with resolved candidates
    JetsAndCands(JetInput<'a>, CandInput<'a>),
    /// Fat jets alone
    FatJets(FatJetInput<'a>),
    /// Narrow and fat jets
    JetsAndFatJets(JetInput<'a>, FatJetInput<'a>),
    /// All three input kinds
    All(JetInput<'a>, CandInput<'a>, FatJetInput<'a>),
}

impl<'a> InputSet<'a> {
    /// Map the present inputs onto the legal combination, or reject.
    ///
    /// Illegal: nothing at all, candidates alone, and candidates with fat
    /// jets but no narrow jets.
    pub fn select(
        jets: Option<JetInput<'a>>,
        cands: Option<CandInput<'a>>,
        fat_jets: Option<FatJetInput<'a>>,
    ) -> Result<Self> {
        match (jets, cands, fat_jets) {
            (Some(j), None, None) => Ok(InputSet::Jets(j)),
            (Some(j), Some(c), None) => Ok(InputSet::JetsAndCands(j, c)),
            (None, None, Some(f)) => Ok(InputSet::FatJets(f)),
            (Some(j), None, Some(f)) => Ok(InputSet::JetsAndFatJets(j, f)),
            (Some(j), Some(c), Some(f)) => Ok(InputSet::All(j, c, f)),
            (None, None, None) | (None, Some(_), None) | (None, Some(_), Some(_)) => {
                Err(Error::Configuration("Illegal constituent combination".into()))
            }
        }
    }

    /// Short name of the combination, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            InputSet::Jets(_) => "jets",
            InputSet::JetsAndCands(..) => "jets+candidates",
            InputSet::FatJets(_) => "fat-jets",
            InputSet::JetsAndFatJets(..) => "jets+fat-jets",
            InputSet::All(..) => "jets+candidates+fat-jets",
        }
    }
}

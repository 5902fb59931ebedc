//! Candidate object model
//!
//! Reconstructed objects returned by a tagging engine. The preparation layer
//! never mutates these; it only projects them into flat tables.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::kinematics::LorentzVector;

/// Reconstruction category of a tagged candidate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateKind {
    /// Fully merged top decay in one fat jet
    MergedTop,
    /// Merged W plus a separate b jet
    SemiMergedWb,
    /// Three resolved jets
    ResolvedTop,
    /// Merged W with no b jet found
    MergedW,
    /// Merged quark pair plus a b jet
    SemiMergedQb,
    /// Unclassified
    None,
}

impl CandidateKind {
    /// Stable integer code used in flattened result tables
    pub fn code(&self) -> i32 {
        match self {
            CandidateKind::MergedTop => 0,
            CandidateKind::SemiMergedWb => 1,
            CandidateKind::ResolvedTop => 2,
            CandidateKind::MergedW => 3,
            CandidateKind::SemiMergedQb => 4,
            CandidateKind::None => 5,
        }
    }
}

/// Raw collection a constituent was drawn from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConstituentKind {
    /// Narrow-cone jet collection
    Jet,
    /// Wide-cone jet collection
    FatJet,
    /// Precomputed resolved-candidate collection
    Candidate,
}

/// One building block of a tagged candidate
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Constituent {
    /// Four-vector of the constituent
    pub p4: LorentzVector,
    /// Collection the constituent came from
    pub kind: ConstituentKind,
    /// Row index into that collection, as supplied to the engine
    pub index: usize,
}

impl Constituent {
    /// Create a constituent
    pub fn new(p4: LorentzVector, kind: ConstituentKind, index: usize) -> Self {
        Self { p4, kind, index }
    }
}

/// A reconstructed candidate produced by a tagging engine
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaggedCandidate {
    /// Candidate four-vector
    pub p4: LorentzVector,
    /// Engine discriminator score
    pub discriminator: f64,
    /// Reconstruction category
    pub kind: CandidateKind,
    /// Constituents in engine order; result tables read the first three
    pub constituents: Vec<Constituent>,
    /// Row of the matched generator particle, if the engine found one
    pub gen_match: Option<usize>,
    /// Simulation-to-data scale factor
    pub scale_factor: f64,
    /// Systematic uncertainty magnitudes keyed by source name
    pub systematics: BTreeMap<String, f64>,
}

impl TaggedCandidate {
    /// Create a candidate with no constituents, unit scale factor and no
    /// systematics
    pub fn new(p4: LorentzVector, discriminator: f64, kind: CandidateKind) -> Self {
        Self {
            p4,
            discriminator,
            kind,
            constituents: Vec::new(),
            gen_match: None,
            scale_factor: 1.0,
            systematics: BTreeMap::new(),
        }
    }

    /// Append a constituent
    pub fn with_constituent(mut self, constituent: Constituent) -> Self {
        self.constituents.push(constituent);
        self
    }

    /// Record a generator match
    pub fn with_gen_match(mut self, row: usize) -> Self {
        self.gen_match = Some(row);
        self
    }

    /// Set the scale factor
    pub fn with_scale_factor(mut self, sf: f64) -> Self {
        self.scale_factor = sf;
        self
    }

    /// Record a systematic uncertainty
    pub fn with_systematic(mut self, name: impl Into<String>, value: f64) -> Self {
        self.systematics.insert(name.into(), value);
        self
    }
}

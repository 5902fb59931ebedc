//! Projection of candidate lists into fixed-width output tables.
//!
//! Downstream consumers read flat per-candidate rows rather than the
//! structured [`TaggedCandidate`] objects, so both result surfaces project
//! into a kinematic table and a scale-factor table with exactly one row per
//! candidate.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use tagprep_core::TaggedCandidate;

/// Column count of the projected kinematic rows.
pub const TABLE_WIDTH: usize = 5;

/// Sentinel written where a candidate has fewer constituents than columns.
pub const NO_CONSTITUENT: i32 = -1;

/// Fixed-width kinematic summary of a candidate list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct KinematicTable {
    /// Per-candidate `(pt, eta, phi, mass, discriminator)`
    pub floats: Vec<[f32; TABLE_WIDTH]>,
    /// Per-candidate `(kind code, three constituent rows, truth-match flag)`
    pub ints: Vec<[i32; TABLE_WIDTH]>,
}

impl KinematicTable {
    /// Number of candidate rows.
    pub fn n_rows(&self) -> usize {
        self.floats.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.floats.is_empty()
    }
}

/// Scale factors and systematic shifts of a candidate list.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScaleFactorTable {
    /// Simulation-to-data scale factor per candidate
    pub scale_factors: Vec<f32>,
    /// Named systematic-shift magnitudes per candidate
    pub systematics: Vec<BTreeMap<String, f64>>,
}

impl ScaleFactorTable {
    /// Number of candidate rows.
    pub fn n_rows(&self) -> usize {
        self.scale_factors.len()
    }

    /// True when the table holds no rows.
    pub fn is_empty(&self) -> bool {
        self.scale_factors.is_empty()
    }
}

/// Project each candidate into one float row and one integer row.
///
/// The float row carries the four-vector in collider coordinates plus the
/// discriminator. The integer row carries the candidate-kind code, the
/// origin rows of up to three constituents ([`NO_CONSTITUENT`] where absent)
/// and a flag marking candidates linked to a generator-truth top.
pub fn project_kinematics(candidates: &[TaggedCandidate]) -> KinematicTable {
    let mut floats = Vec::with_capacity(candidates.len());
    let mut ints = Vec::with_capacity(candidates.len());
    for cand in candidates {
        floats.push([
            cand.p4.pt() as f32,
            cand.p4.eta() as f32,
            cand.p4.phi() as f32,
            cand.p4.mass() as f32,
            cand.discriminator as f32,
        ]);

        let mut row = [
            cand.kind.code(),
            NO_CONSTITUENT,
            NO_CONSTITUENT,
            NO_CONSTITUENT,
            i32::from(cand.gen_match.is_some()),
        ];
        for (slot, constituent) in row[1..4].iter_mut().zip(cand.constituents.iter()) {
            *slot = constituent.index as i32;
        }
        ints.push(row);
    }
    KinematicTable { floats, ints }
}

/// Project each candidate's scale factor and systematic map.
pub fn project_scale_factors(candidates: &[TaggedCandidate]) -> ScaleFactorTable {
    let mut scale_factors = Vec::with_capacity(candidates.len());
    let mut systematics = Vec::with_capacity(candidates.len());
    for cand in candidates {
        scale_factors.push(cand.scale_factor as f32);
        systematics.push(cand.systematics.clone());
    }
    ScaleFactorTable { scale_factors, systematics }
}

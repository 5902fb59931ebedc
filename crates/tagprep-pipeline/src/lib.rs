//! # tagprep-pipeline
//!
//! Event-preparation pipeline for an external top-tagging engine.
//!
//! The crate turns caller-supplied collider event columns into the
//! structured inputs a tagging engine consumes: lepton-overlap cleaning over
//! the jet collection, subjet association for fat jets, generator-truth
//! linking, assembly of the per-invocation input groups and dispatch over
//! the legal constituent combinations. [`Tagger`] drives the whole sequence
//! and projects the engine's outputs into flat result tables.
//!
//! The engine itself stays behind the [`TagEngine`] trait; the
//! [`testing`] module ships a scripted implementation for tests and benches.

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod cleaning;
pub mod dispatch;
pub mod engine;
pub mod gen_truth;
pub mod inputs;
pub mod project;
pub mod subjets;
pub mod tagger;
pub mod testing;

pub use cleaning::LeptonMatch;
pub use dispatch::InputSet;
pub use engine::TagEngine;
pub use gen_truth::{GenColumns, TruthRecord};
pub use inputs::{CandColumns, CandInput, FatJetColumns, FatJetInput, JetColumns, JetInput};
pub use project::{KinematicTable, ScaleFactorTable};
pub use tagger::Tagger;

/// Version of the tagprep-pipeline crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!VERSION.is_empty());
    }
}

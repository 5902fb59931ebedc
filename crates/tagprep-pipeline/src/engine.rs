//! Tagging-engine interface.
//!
//! The engine is an external collaborator consumed through this trait. The
//! preparation layer never inspects how candidates are reconstructed; it
//! hands over one assembled input combination and reads back result
//! collections.

use std::path::Path;

use tagprep_core::{Result, TaggedCandidate};

use crate::dispatch::InputSet;

/// An engine that reconstructs tagged candidates from assembled inputs.
///
/// A handle spans invocations: each successful [`run`](Self::run)
/// overwrites the results of the previous one, and a failed run leaves
/// them untouched. Handles are not reentrant; callers must not interleave
/// concurrent runs against one handle.
pub trait TagEngine: Sized {
    /// Build a handle from the engine's configuration file, with an
    /// optional working directory for auxiliary files the configuration
    /// names.
    fn configure(cfg_path: &Path, working_dir: Option<&Path>) -> Result<Self>;

    /// Run once over one input combination.
    fn run(&mut self, inputs: InputSet<'_>) -> Result<()>;

    /// Final reconstructed candidates from the latest successful run.
    fn results(&self) -> &[TaggedCandidate];

    /// Intermediate candidates from the latest successful run.
    fn candidates(&self) -> &[TaggedCandidate];
}

//! # tagprep-core
//!
//! Core types and error handling for the tagprep event-preparation workspace.
//!
//! This crate provides:
//! - Common error types
//! - Lorentz-vector kinematics
//! - The candidate object model produced by tagging engines

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod candidate;
pub mod error;
pub mod kinematics;

pub use candidate::{CandidateKind, Constituent, ConstituentKind, TaggedCandidate};
pub use error::{Error, Result};
pub use kinematics::LorentzVector;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

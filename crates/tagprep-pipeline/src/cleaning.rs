//! Jet/lepton overlap removal.
//!
//! Leptons leave energy deposits that are also reconstructed as jets. Each
//! jet carries the index of its best-matched electron and muon; a jet close
//! to an identified, isolated lepton is dropped before tagging, as is any
//! jet below the minimum transverse momentum.

use tagprep_columns::{ColumnView, FourVecView};
use tagprep_core::{Error, LorentzVector, Result};

/// Minimum jet transverse momentum. Slightly below the nominal 20.0 cut to
/// absorb rounding in the upstream event format.
pub const MIN_JET_PT: f64 = 19.9;

/// Leptons softer than this never flag a jet.
const MIN_LEPTON_PT: f64 = 10.0;

/// Electron mini-isolation threshold.
const MAX_ELECTRON_MINI_ISO: f64 = 0.10;

/// Muon isolation threshold.
const MAX_MUON_ISO: f64 = 0.2;

/// Angular matching cone between jet and lepton.
const MAX_LEPTON_DR: f64 = 0.2;

/// Lepton collections plus the per-jet best-match indices used for overlap
/// removal. A negative or out-of-range index means the jet has no match.
#[derive(Debug, Clone)]
pub struct LeptonMatch<'a> {
    /// Best-matched electron row per jet
    pub electron_idx: &'a [i32],
    /// Best-matched muon row per jet
    pub muon_idx: &'a [i32],
    /// Electron four-vectors
    pub electrons: FourVecView<'a>,
    /// Packed identification bit tag per electron
    pub electron_id_bits: &'a [i32],
    /// Mini-isolation value per electron
    pub electron_mini_iso: &'a [f32],
    /// Muon four-vectors
    pub muons: FourVecView<'a>,
    /// Identification flag per muon. `None` means the upstream sample only
    /// stored passing muons, so every muon counts as identified.
    pub muon_id: Option<&'a [bool]>,
    /// Isolation value per muon
    pub muon_iso: &'a [f32],
}

impl LeptonMatch<'_> {
    /// Check buffer lengths against the jet count and the lepton counts.
    pub(crate) fn validate(&self, n_jets: usize) -> Result<()> {
        let per_jet = [
            ("electron match", self.electron_idx.len()),
            ("muon match", self.muon_idx.len()),
        ];
        for (name, have) in per_jet {
            if have < n_jets {
                return Err(Error::Shape(format!(
                    "{} column holds {} values, expected {} jets",
                    name, have, n_jets
                )));
            }
        }

        let per_lepton = [
            ("electron id", self.electron_id_bits.len(), self.electrons.len()),
            ("electron mini-iso", self.electron_mini_iso.len(), self.electrons.len()),
            ("muon iso", self.muon_iso.len(), self.muons.len()),
        ];
        for (name, have, expected) in per_lepton {
            if have < expected {
                return Err(Error::Shape(format!(
                    "{} column holds {} values, expected {}",
                    name, have, expected
                )));
            }
        }
        if let Some(ids) = self.muon_id {
            if ids.len() < self.muons.len() {
                return Err(Error::Shape(format!(
                    "muon id column holds {} values, expected {}",
                    ids.len(),
                    self.muons.len()
                )));
            }
        }
        Ok(())
    }
}

/// Aggregate identification quality from a packed cut bit tag.
///
/// The tag packs ten sequential cut results, three bits each. The
/// relative-isolation field is forced to "pass" so isolation can be applied
/// separately, then the minimum field value across all ten cuts is the
/// aggregate quality, in `[0, 7]`.
pub fn id_quality_no_iso(bits: i32) -> i32 {
    const N_CUTS: usize = 10;
    const BIT_STRIDE: u32 = 3;
    const FIELD_MASK: i32 = 0x7;
    // Octal: the three relative-isolation bits sit in field 7.
    const ISO_FIELD: i32 = 0o70000000;

    let mut bits = bits | ISO_FIELD;
    let mut quality = FIELD_MASK;
    for _ in 0..N_CUTS {
        quality = quality.min(bits & FIELD_MASK);
        bits >>= BIT_STRIDE;
    }
    quality
}

/// Compute the per-jet keep mask.
///
/// Without lepton inputs no jet can be flagged as contaminated and only the
/// momentum threshold applies. The mask is rebuilt from scratch on every
/// call; nothing is carried between invocations.
pub fn keep_mask(
    jets: &ColumnView<'_, LorentzVector>,
    leptons: Option<&LeptonMatch<'_>>,
) -> Result<Vec<bool>> {
    let n_jets = jets.len();
    if let Some(lep) = leptons {
        lep.validate(n_jets)?;
    }

    let mut mask = Vec::with_capacity(n_jets);
    for i in 0..n_jets {
        let jet = jets.value(i);
        let contaminated = match leptons {
            Some(lep) => electron_flags(&jet, i, lep) || muon_flags(&jet, i, lep),
            None => false,
        };
        mask.push(!contaminated && jet.pt() >= MIN_JET_PT);
    }

    let dropped = mask.iter().filter(|keep| !**keep).count();
    if dropped > 0 {
        log::debug!("overlap removal dropped {} of {} jets", dropped, n_jets);
    }

    Ok(mask)
}

fn electron_flags(jet: &LorentzVector, i_jet: usize, lep: &LeptonMatch<'_>) -> bool {
    let idx = lep.electron_idx[i_jet];
    if idx < 0 {
        return false;
    }
    let Some(electron) = lep.electrons.get(idx as usize) else {
        return false;
    };
    if electron.pt() <= MIN_LEPTON_PT {
        return false;
    }

    let quality = id_quality_no_iso(lep.electron_id_bits[idx as usize]);
    let mini_iso = f64::from(lep.electron_mini_iso[idx as usize]);
    quality >= 1 && mini_iso < MAX_ELECTRON_MINI_ISO && jet.delta_r(&electron) < MAX_LEPTON_DR
}

fn muon_flags(jet: &LorentzVector, i_jet: usize, lep: &LeptonMatch<'_>) -> bool {
    let idx = lep.muon_idx[i_jet];
    if idx < 0 {
        return false;
    }
    let Some(muon) = lep.muons.get(idx as usize) else {
        return false;
    };
    if muon.pt() <= MIN_LEPTON_PT {
        return false;
    }

    let identified = lep.muon_id.map_or(true, |ids| ids[idx as usize]);
    let iso = f64::from(lep.muon_iso[idx as usize]);
    identified && iso < MAX_MUON_ISO && jet.delta_r(&muon) < MAX_LEPTON_DR
}

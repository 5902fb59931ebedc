//! Generator-truth linkage.
//!
//! The engine matches reconstructed candidates against simulated top-quark
//! decays. From the flat generator record this module selects hadronically
//! decaying last-copy tops and records their direct decay daughters, with W
//! bosons followed through their radiation chain to the final copy.

use tagprep_columns::{ColumnView, FourVecView};
use tagprep_core::{Error, LorentzVector, Result};

/// Status-flag bit marking the last copy of a particle in the generator
/// record (upstream event-format convention).
const LAST_COPY_BIT: i32 = 1 << 13;

const TOP_PDG: i32 = 6;
const W_PDG: i32 = 24;

fn is_quark(pdg: i32) -> bool {
    (1..=5).contains(&pdg.abs())
}

/// Raw generator-particle columns.
#[derive(Debug, Clone)]
pub struct GenColumns<'a> {
    particles: FourVecView<'a>,
    pdg_id: &'a [i32],
    status_flags: &'a [i32],
    mother_idx: &'a [i32],
}

impl<'a> GenColumns<'a> {
    /// Wrap the generator record, validating column lengths against the
    /// particle count.
    ///
    /// A mother index of -1 (or anything out of range) means the particle
    /// has no recorded mother.
    pub fn new(
        particles: FourVecView<'a>,
        pdg_id: &'a [i32],
        status_flags: &'a [i32],
        mother_idx: &'a [i32],
    ) -> Result<Self> {
        let n = particles.len();
        let columns = [
            ("pdg id", pdg_id.len()),
            ("status flags", status_flags.len()),
            ("mother index", mother_idx.len()),
        ];
        for (name, have) in columns {
            if have < n {
                return Err(Error::Shape(format!(
                    "{} column holds {} values, expected {} generator particles",
                    name, have, n
                )));
            }
        }
        Ok(Self { particles, pdg_id, status_flags, mother_idx })
    }

    /// Number of generator particles.
    pub fn len(&self) -> usize {
        self.particles.len()
    }

    /// True when the record is empty.
    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Build the truth record the assembled inputs carry.
    pub fn link(&self) -> TruthRecord<'a> {
        let n = self.particles.len();

        // Direct children per row, from the stored mother indices.
        // Self-mothered rows are ignored.
        let mut children: Vec<Vec<usize>> = vec![Vec::new(); n];
        for (row, &mother) in self.mother_idx[..n].iter().enumerate() {
            if mother >= 0 && (mother as usize) < n && mother as usize != row {
                children[mother as usize].push(row);
            }
        }

        let mut daughters: Vec<Vec<usize>> = vec![Vec::new(); n];
        let mut n_linked = 0;
        for top in 0..n {
            if self.pdg_id[top].abs() != TOP_PDG
                || self.status_flags[top] & LAST_COPY_BIT == 0
            {
                continue;
            }

            let mut recorded = Vec::new();
            let mut saw_w = false;
            let mut hadronic = true;
            for &child in &children[top] {
                if self.pdg_id[child].abs() == W_PDG {
                    saw_w = true;
                    let w = self.last_same_pdg_copy(child, &children);
                    for &grand in &children[w] {
                        if self.pdg_id[grand] == self.pdg_id[w] {
                            continue;
                        }
                        hadronic = hadronic && is_quark(self.pdg_id[grand]);
                        recorded.push(grand);
                    }
                } else {
                    recorded.push(child);
                }
            }

            if saw_w && hadronic {
                daughters[top] = recorded;
                n_linked += 1;
            }
        }

        if n_linked > 0 {
            log::debug!("linked {} hadronic top rows of {} generator particles", n_linked, n);
        }

        TruthRecord { particles: self.particles.materialize(), daughters }
    }

    /// Follow same-pdg children to the final copy of a radiating particle.
    /// The walk is bounded so malformed mother links cannot loop forever.
    fn last_same_pdg_copy(&self, start: usize, children: &[Vec<usize>]) -> usize {
        let pdg = self.pdg_id[start];
        let mut row = start;
        for _ in 0..children.len() {
            match children[row].iter().copied().find(|&c| self.pdg_id[c] == pdg) {
                Some(next) => row = next,
                None => break,
            }
        }
        row
    }
}

/// Truth-particle four-vectors plus per-particle daughter rows.
///
/// Every index in `daughters` is valid for `particles`. Daughter lists are
/// non-empty only for rows selected by the hadronic-top policy.
#[derive(Debug, Clone)]
pub struct TruthRecord<'a> {
    /// Generator-particle four-vectors, dense for repeated engine access
    pub particles: ColumnView<'a, LorentzVector>,
    /// Recorded decay-daughter rows, one list per particle
    pub daughters: Vec<Vec<usize>>,
}

impl TruthRecord<'_> {
    /// Number of particles.
    pub fn n_particles(&self) -> usize {
        self.particles.len()
    }

    /// Daughter rows recorded for `row`.
    pub fn daughters_of(&self, row: usize) -> &[usize] {
        &self.daughters[row]
    }

    /// Rows with at least one recorded daughter.
    pub fn linked_rows(&self) -> impl Iterator<Item = usize> + '_ {
        self.daughters
            .iter()
            .enumerate()
            .filter(|(_, d)| !d.is_empty())
            .map(|(row, _)| row)
    }
}

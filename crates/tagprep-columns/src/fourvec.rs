//! Four-vector columns over the two raw input representations.

use tagprep_core::{Error, LorentzVector, Result};

use crate::view::ColumnView;

/// Backing storage of a [`FourVecView`].
#[derive(Debug, Clone, Copy)]
enum FourVecSource<'a> {
    /// Parallel collider-component buffers; elements synthesized per index
    Components {
        pt: &'a [f32],
        eta: &'a [f32],
        phi: &'a [f32],
        mass: &'a [f32],
    },
    /// Prebuilt vectors owned by the caller
    Vectors(&'a [LorentzVector]),
}

/// A four-vector column over either parallel `(pt, eta, phi, mass)` buffers
/// or a caller-owned slice of prebuilt vectors.
///
/// Component sources synthesize a [`LorentzVector`] lazily per index, which
/// suits collections where only scattered elements are read (leptons,
/// subjets). Collections read densely are [`materialize`](Self::materialize)d
/// once and the result reused.
#[derive(Debug, Clone)]
pub struct FourVecView<'a> {
    source: FourVecSource<'a>,
    len: usize,
}

impl<'a> FourVecView<'a> {
    /// View `expected` four-vectors over parallel component buffers.
    pub fn composed(
        pt: &'a [f32],
        eta: &'a [f32],
        phi: &'a [f32],
        mass: &'a [f32],
        expected: usize,
    ) -> Result<Self> {
        for (name, buf) in [("pt", pt), ("eta", eta), ("phi", phi), ("mass", mass)] {
            if buf.len() < expected {
                return Err(Error::Shape(format!(
                    "{} buffer holds {} values, expected {}",
                    name,
                    buf.len(),
                    expected
                )));
            }
        }
        Ok(Self {
            source: FourVecSource::Components {
                pt: &pt[..expected],
                eta: &eta[..expected],
                phi: &phi[..expected],
                mass: &mass[..expected],
            },
            len: expected,
        })
    }

    /// View `expected` four-vectors of a caller-owned prebuilt slice.
    pub fn borrowed(vectors: &'a [LorentzVector], expected: usize) -> Result<Self> {
        if vectors.len() < expected {
            return Err(Error::Shape(format!(
                "vector buffer holds {} values, expected {}",
                vectors.len(),
                expected
            )));
        }
        Ok(Self { source: FourVecSource::Vectors(&vectors[..expected]), len: expected })
    }

    /// Number of four-vectors.
    pub fn len(&self) -> usize {
        self.len
    }

    /// True when the column has no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Four-vector at `i`. Panics if `i >= len()`.
    pub fn p4(&self, i: usize) -> LorentzVector {
        match &self.source {
            FourVecSource::Components { pt, eta, phi, mass } => LorentzVector::from_pt_eta_phi_mass(
                pt[i] as f64,
                eta[i] as f64,
                phi[i] as f64,
                mass[i] as f64,
            ),
            FourVecSource::Vectors(v) => v[i],
        }
    }

    /// Four-vector at `i`, or `None` when out of range.
    pub fn get(&self, i: usize) -> Option<LorentzVector> {
        if i < self.len {
            Some(self.p4(i))
        } else {
            None
        }
    }

    /// Produce a dense column for reuse.
    ///
    /// Component sources are synthesized once into owned storage; prebuilt
    /// sources pass through without copying.
    pub fn materialize(&self) -> ColumnView<'a, LorentzVector> {
        match self.source {
            FourVecSource::Components { .. } => {
                let mut out = Vec::with_capacity(self.len);
                for i in 0..self.len {
                    out.push(self.p4(i));
                }
                ColumnView::Owned(out)
            }
            FourVecSource::Vectors(v) => ColumnView::Borrowed(v),
        }
    }
}

//! Lorentz-vector kinematics
//!
//! Four-vectors are stored in Cartesian form at `f64` precision, which is
//! what the tagging engines consume. Collider inputs arrive as
//! `(pt, eta, phi, mass)` components and are converted on construction.

use std::f64::consts::PI;

use serde::{Deserialize, Serialize};

/// Energy-momentum four-vector in Cartesian form
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct LorentzVector {
    /// Momentum x component
    pub px: f64,
    /// Momentum y component
    pub py: f64,
    /// Momentum z component
    pub pz: f64,
    /// Energy
    pub e: f64,
}

impl LorentzVector {
    /// Create a four-vector from Cartesian components
    pub fn new(px: f64, py: f64, pz: f64, e: f64) -> Self {
        Self { px, py, pz, e }
    }

    /// Create a four-vector from collider components.
    ///
    /// A negative mass (seen in stored jet collections after calibration)
    /// yields `E = sqrt(max(p^2 - m^2, 0))`, so the invariant mass
    /// round-trips with its sign.
    pub fn from_pt_eta_phi_mass(pt: f64, eta: f64, phi: f64, mass: f64) -> Self {
        let pt = pt.abs();
        let px = pt * phi.cos();
        let py = pt * phi.sin();
        let pz = pt * eta.sinh();
        let p2 = px * px + py * py + pz * pz;
        let e = if mass >= 0.0 {
            (p2 + mass * mass).sqrt()
        } else {
            (p2 - mass * mass).max(0.0).sqrt()
        };
        Self { px, py, pz, e }
    }

    /// Transverse momentum
    pub fn pt(&self) -> f64 {
        self.px.hypot(self.py)
    }

    /// Momentum magnitude
    pub fn p(&self) -> f64 {
        (self.px * self.px + self.py * self.py + self.pz * self.pz).sqrt()
    }

    /// Pseudorapidity. Vectors along the beam axis map to signed infinity.
    pub fn eta(&self) -> f64 {
        let p = self.p();
        let denom = p - self.pz;
        if denom <= 0.0 {
            return f64::INFINITY;
        }
        let num = p + self.pz;
        if num <= 0.0 {
            return f64::NEG_INFINITY;
        }
        0.5 * (num / denom).ln()
    }

    /// Azimuthal angle in `(-pi, pi]`
    pub fn phi(&self) -> f64 {
        self.py.atan2(self.px)
    }

    /// Invariant mass squared
    pub fn m2(&self) -> f64 {
        self.e * self.e - self.px * self.px - self.py * self.py - self.pz * self.pz
    }

    /// Invariant mass, carrying the sign of `m2`
    pub fn mass(&self) -> f64 {
        let m2 = self.m2();
        if m2 < 0.0 {
            -(-m2).sqrt()
        } else {
            m2.sqrt()
        }
    }

    /// Four-vector sum
    pub fn add(&self, other: &Self) -> Self {
        Self {
            px: self.px + other.px,
            py: self.py + other.py,
            pz: self.pz + other.pz,
            e: self.e + other.e,
        }
    }

    /// Azimuthal separation wrapped into `(-pi, pi]`
    pub fn delta_phi(&self, other: &Self) -> f64 {
        let mut dphi = self.phi() - other.phi();
        while dphi > PI {
            dphi -= 2.0 * PI;
        }
        while dphi <= -PI {
            dphi += 2.0 * PI;
        }
        dphi
    }

    /// Angular separation `sqrt(deta^2 + dphi^2)`
    pub fn delta_r(&self, other: &Self) -> f64 {
        let deta = self.eta() - other.eta();
        let dphi = self.delta_phi(other);
        (deta * deta + dphi * dphi).sqrt()
    }
}

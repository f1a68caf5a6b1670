//! Pairwise merge distances ("y" values) for the jet algorithms.
//!
//! All three classic variants scale an energy-weighted quantity by the squared
//! visible energy of the event, so `y` is dimensionless and, for physical
//! input, lies in [0, 1]:
//!
//! ```text
//! Jade    y = 2 · E1 · E2 · (1 − cos θ12)      / Evis²
//! Jade-E  y = (E1 + E2)² − |p1 + p2|²           / Evis²   (pair mass²)
//! Durham  y = 2 · min(E1, E2)² · (1 − cos θ12) / Evis²
//! ```
//!
//! # Invariants
//!
//! - Symmetric in its two jet arguments.
//! - Never negative. Jade-E clamps rounding-level negative mass² to 0.
//! - Pure: no state, no side effects.

use core::fmt;

use crate::vector::FourVector;

/// A merge-distance function between two jets.
///
/// Implement this for custom algorithms; the finder only relies on the
/// invariants listed in the module docs.
pub trait DistanceMetric {
    /// Merge distance between jets with summed vectors `a` and `b` in an event
    /// of visible energy `evis` (> 0).
    fn distance(&self, a: &FourVector, b: &FourVector, evis: f64) -> f64;

    /// Short algorithm name, used in logs.
    fn name(&self) -> &'static str;
}

// ─── Algorithm ──────────────────────────────────────────────────────────────

/// The standard e⁺e⁻ jet algorithms.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Algorithm {
    /// JADE: product of energies times `(1 − cos θ)`.
    Jade,
    /// JADE E-scheme: invariant mass squared of the pair.
    #[default]
    JadeE,
    /// Durham (k⊥): squared minimum energy times `(1 − cos θ)`.
    Durham,
}

impl Algorithm {
    /// All variants, in declaration order.
    pub const ALL: [Algorithm; 3] = [Algorithm::Jade, Algorithm::JadeE, Algorithm::Durham];
}

impl DistanceMetric for Algorithm {
    fn distance(&self, a: &FourVector, b: &FourVector, evis: f64) -> f64 {
        let norm = evis * evis;
        match self {
            Algorithm::Jade => 2.0 * a.e * b.e * (1.0 - a.cos_theta(b)) / norm,
            Algorithm::JadeE => ((*a + *b).mag2() / norm).max(0.0),
            Algorithm::Durham => {
                let e_min = a.e.min(b.e);
                2.0 * e_min * e_min * (1.0 - a.cos_theta(b)) / norm
            }
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Algorithm::Jade => "jade",
            Algorithm::JadeE => "jade-e",
            Algorithm::Durham => "durham",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl core::str::FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "jade" => Ok(Algorithm::Jade),
            "jade-e" | "jadee" | "jade_e" => Ok(Algorithm::JadeE),
            "durham" | "kt" => Ok(Algorithm::Durham),
            _ => Err(UnknownAlgorithm),
        }
    }
}

/// Parse failure for [`Algorithm`] names.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("unknown jet algorithm (expected jade, jade-e or durham)")]
pub struct UnknownAlgorithm;

// ─── Tests ──────────────────────────────────────────────────────────────────

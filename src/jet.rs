/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! Jets: four-vector sums over a set of constituent particles.
//!
//! A [`Jet`] records its constituents by their index in the event slice handed
//! to [`crate::finder::JetFinder::initialize`]. The particles themselves stay
//! with the caller; [`Jet::particles`] resolves the indices back to them.
//!
//! # Invariants
//!
//! - The jet vector is always the sum of its constituents' vectors, up to
//!   ordinary floating-point rounding.
//! - A constituent index appears at most once in a jet.

use core::fmt;

use crate::vector::FourVector;

// ─── Jet ────────────────────────────────────────────────────────────────────

/// A cluster of particles, represented by the sum of their four-vectors.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Jet {
    /// Summed four-vector of all constituents.
    vector: FourVector,
    /// Event indices of the constituents, in the order they joined.
    constituents: Vec<usize>,
}

impl Jet {
    /// Construct an empty jet with a zero vector.
    pub fn new() -> Self {
        Self {
            vector: FourVector::ZERO,
            constituents: Vec::new(),
        }
    }

    /// Singleton jet wrapping the particle at `index`.
    pub fn from_particle(index: usize, vector: FourVector) -> Self {
        Self {
            vector,
            constituents: vec![index],
        }
    }

    /// Jet built from several `(index, vector)` constituents.
    ///
    /// Duplicate indices are ignored after their first occurrence.
    pub fn from_particles<I>(parts: I) -> Self
    where
        I: IntoIterator<Item = (usize, FourVector)>,
    {
        let mut jet = Self::new();
        for (index, vector) in parts {
            jet.add(index, vector);
        }
        jet
    }

    /// Add one constituent. Returns `false` (and changes nothing) if the
    /// index is already a member.
    pub fn add(&mut self, index: usize, vector: FourVector) -> bool {
        if self.contains(index) {
            return false;
        }
        self.constituents.push(index);
        self.vector += vector;
        true
    }

    /// Absorb `other`: sum the vectors and append its constituents.
    ///
    /// `other` is consumed, which is how the finder retires a merged-away jet.
    pub fn merge(&mut self, other: Jet) {
        self.vector += other.vector;
        self.constituents.extend(other.constituents);
    }

    /// Remove a constituent and subtract its vector.
    ///
    /// Returns `false` if `index` is not a member.
    pub fn remove(&mut self, index: usize, vector: FourVector) -> bool {
        match self.constituents.iter().position(|&i| i == index) {
            Some(pos) => {
                self.constituents.remove(pos);
                self.vector -= vector;
                true
            }
            None => false,
        }
    }

    // ── Read accessors ─────────────────────────────────────────────────────

    /// Number of constituent particles.
    pub fn n_particles(&self) -> usize {
        self.constituents.len()
    }

    /// Event indices of the constituents.
    pub fn constituents(&self) -> &[usize] {
        &self.constituents
    }

    /// Whether the particle at `index` belongs to this jet.
    pub fn contains(&self, index: usize) -> bool {
        self.constituents.contains(&index)
    }

    /// Summed four-vector.
    pub fn vector(&self) -> &FourVector {
        &self.vector
    }

    /// Jet energy.
    pub fn energy(&self) -> f64 {
        self.vector.e
    }

    /// Invariant mass of the jet.
    pub fn mass(&self) -> f64 {
        self.vector.mag()
    }

    /// Whether the jet has no constituents.
    pub fn is_empty(&self) -> bool {
        self.constituents.is_empty()
    }

    /// Resolve the constituents against the event slice they were seeded from.
    ///
    /// Indices outside `event` are skipped.
    pub fn particles<'p, P>(&'p self, event: &'p [P]) -> impl Iterator<Item = &'p P> + 'p
    where
        P: 'p,
    {
        self.constituents.iter().filter_map(move |&i| event.get(i))
    }
}

impl fmt::Display for Jet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Jet(n={}, E={:.4}, p={:.4}, m={:.4}, parts={:?})",
            self.n_particles(),
            self.vector.e,
            self.vector.p(),
            self.vector.mag(),
            self.constituents
        )
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

//! Energy-momentum four-vectors and the particle input contract.
//!
//! The jet finder never owns the caller's particle objects. Anything that can
//! report a four-vector implements [`Particle`]; the finder copies the
//! [`FourVector`] out at seeding time and refers back to the caller's slice by
//! index from then on.
//!
//! # Implementing for a track type
//!
//! ```rust
//! use jetclust_core::vector::{FourVector, Particle};
//!
//! struct Track {
//!     charge: i8,
//!     p4: FourVector,
//! }
//!
//! impl Particle for Track {
//!     fn four_vector(&self) -> FourVector {
//!         self.p4
//!     }
//! }
//! ```

use core::fmt;
use core::ops::{Add, AddAssign, Sub, SubAssign};

/// Input contract for anything the jet finder can cluster.
pub trait Particle {
    /// The particle's energy-momentum four-vector.
    fn four_vector(&self) -> FourVector;
}

// ─── FourVector ─────────────────────────────────────────────────────────────

/// Lorentz four-vector `(E, px, py, pz)` with metric `(+, −, −, −)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FourVector {
    /// Energy.
    pub e: f64,
    /// Momentum x component.
    pub px: f64,
    /// Momentum y component.
    pub py: f64,
    /// Momentum z component.
    pub pz: f64,
}

impl FourVector {
    /// The zero vector.
    pub const ZERO: Self = Self { e: 0.0, px: 0.0, py: 0.0, pz: 0.0 };

    /// Construct from energy and momentum components.
    pub const fn new(e: f64, px: f64, py: f64, pz: f64) -> Self {
        Self { e, px, py, pz }
    }

    /// Massless vector along `(px, py, pz)`, energy set to `|p|`.
    pub fn massless(px: f64, py: f64, pz: f64) -> Self {
        let p = (px * px + py * py + pz * pz).sqrt();
        Self { e: p, px, py, pz }
    }

    /// Energy component.
    pub fn energy(&self) -> f64 {
        self.e
    }

    /// Squared three-momentum magnitude.
    pub fn p2(&self) -> f64 {
        self.px * self.px + self.py * self.py + self.pz * self.pz
    }

    /// Three-momentum magnitude.
    pub fn p(&self) -> f64 {
        self.p2().sqrt()
    }

    /// Invariant mass squared, `E² − |p|²`. May be slightly negative from rounding.
    pub fn mag2(&self) -> f64 {
        self.e * self.e - self.p2()
    }

    /// Invariant mass. Negative `mag2` gives `-sqrt(-mag2)`, the usual convention.
    pub fn mag(&self) -> f64 {
        let m2 = self.mag2();
        if m2 < 0.0 {
            -(-m2).sqrt()
        } else {
            m2.sqrt()
        }
    }

    /// Whether all four components are finite.
    pub fn is_finite(&self) -> bool {
        self.e.is_finite() && self.px.is_finite() && self.py.is_finite() && self.pz.is_finite()
    }

    /// Three-momentum dot product.
    pub fn dot3(&self, other: &Self) -> f64 {
        self.px * other.px + self.py * other.py + self.pz * other.pz
    }

    /// Cosine of the opening angle between the two three-momenta.
    ///
    /// Returns 1.0 when either momentum vanishes, and is clamped to [−1, 1].
    pub fn cos_theta(&self, other: &Self) -> f64 {
        let norm = (self.p2() * other.p2()).sqrt();
        if norm <= 0.0 {
            return 1.0;
        }
        (self.dot3(other) / norm).clamp(-1.0, 1.0)
    }

    /// Opening angle between the two three-momenta in radians.
    pub fn angle(&self, other: &Self) -> f64 {
        self.cos_theta(other).acos()
    }
}

impl Add for FourVector {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self {
            e: self.e + rhs.e,
            px: self.px + rhs.px,
            py: self.py + rhs.py,
            pz: self.pz + rhs.pz,
        }
    }
}

impl AddAssign for FourVector {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl Sub for FourVector {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self {
            e: self.e - rhs.e,
            px: self.px - rhs.px,
            py: self.py - rhs.py,
            pz: self.pz - rhs.pz,
        }
    }
}

impl SubAssign for FourVector {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl core::iter::Sum for FourVector {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for FourVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({:.4}, {:.4}, {:.4}, {:.4})",
            self.e, self.px, self.py, self.pz
        )
    }
}

impl Particle for FourVector {
    fn four_vector(&self) -> FourVector {
        *self
    }
}

/// `[E, px, py, pz]`.
impl Particle for [f64; 4] {
    fn four_vector(&self) -> FourVector {
        FourVector::new(self[0], self[1], self[2], self[3])
    }
}

impl<P: Particle + ?Sized> Particle for &P {
    fn four_vector(&self) -> FourVector {
        (**self).four_vector()
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

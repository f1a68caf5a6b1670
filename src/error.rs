//! Error types for jet finding.
//!
//! Every variant is a usage error: the caller sequenced calls wrongly or fed
//! an event the finder cannot normalise. A forced jet count that misses its
//! target is not an error; see [`crate::finder::ForceOutcome`].

use thiserror::Error;

/// Result alias for jet finder operations.
pub type Result<T> = core::result::Result<T, JetError>;

/// Usage errors reported by the jet finder.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JetError {
    /// A clustering or read operation ran before `initialize`.
    #[error("jet finder not initialized - call initialize() with the event particles first")]
    NotInitialized,

    /// `initialize` received no particles.
    #[error("cannot initialize jet finder from an empty event")]
    EmptyEvent,

    /// A particle four-vector has a NaN or infinite component.
    #[error("particle {index} has a non-finite four-vector component")]
    NonFiniteParticle {
        /// Event index of the offending particle.
        index: usize,
    },

    /// The summed particle energy cannot normalise distances.
    #[error("visible energy must be positive and finite, got {evis}")]
    ZeroVisibleEnergy {
        /// The offending visible energy.
        evis: f64,
    },

    /// The ycut was lowered after a merge. Merges already made cannot be undone.
    #[error("ycut cannot be lowered after jets have merged: current {current}, requested {requested} (re-initialize to lower it)")]
    YcutDecrease {
        /// The ycut in force.
        current: f64,
        /// The rejected lower value.
        requested: f64,
    },

    /// A ycut that is negative or NaN.
    #[error("ycut must be a non-negative number, got {ycut}")]
    InvalidYcut {
        /// The rejected value.
        ycut: f64,
    },

    /// `next_unmerged_distance` before any `find_jets` pass.
    #[error("no jet finding pass has run yet - call find_jets() first")]
    NotClustered,

    /// Forced jet count outside `1..=particles`.
    #[error("cannot force {requested} jets from {particles} particles")]
    InvalidJetCount {
        /// Requested final jet count.
        requested: usize,
        /// Number of particles in the event.
        particles: usize,
    },
}

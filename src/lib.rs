//! # jetclust-core
//!
//! Iterative pairwise-merging jet finders for e⁺e⁻ event analysis: Jade,
//! Jade-E and Durham.
//!
//! ---
//!
//! ## How it works
//!
//! Every particle starts as its own jet. The finder keeps a table of merge
//! distances `y` between all current jets and repeatedly merges the closest
//! pair while its `y` is below the threshold `ycut`. A merged jet is the
//! four-vector sum of its constituents.
//!
//! Two things make this finder more than a loop:
//!
//! **Resumable ycut** — the merge order never depends on `ycut`, so after a
//! pass at one `ycut` you may raise it and continue from the current partition.
//! Nothing below the old `ycut` is redone.
//!
//! **Forced jet count** — the final jet count is a step function of `ycut`.
//! [`JetFinder::force_jet_count`] bisects `ycut` until exactly `n` jets remain,
//! with a trial cap for counts no `ycut` can produce.
//!
//! ## Usage
//!
//! ```rust
//! use jetclust_core::{Algorithm, FourVector, JetFinder};
//!
//! let event = [
//!     FourVector::massless(1.0, 0.0, 20.0),
//!     FourVector::massless(-1.0, 0.0, 20.0),
//!     FourVector::massless(1.0, 0.0, -20.0),
//!     FourVector::massless(-1.0, 0.0, -20.0),
//! ];
//!
//! let mut finder = JetFinder::new(Algorithm::Durham, 0.01)?;
//! finder.initialize(&event)?;
//! finder.find_jets()?;
//! assert_eq!(finder.jet_count()?, 2);
//!
//! // Raise the ycut and resume from the two jets found so far.
//! finder.set_ycut(2.0)?;
//! finder.find_jets()?;
//! assert_eq!(finder.jet_count()?, 1);
//!
//! // Or ask for an exact jet count.
//! let outcome = finder.force_jet_count(2)?;
//! assert!(outcome.converged);
//! # Ok::<(), jetclust_core::JetError>(())
//! ```
//!
//! ## Module overview
//!
//! | Module | Key types | What it does |
//! |--------|-----------|--------------|
//! | [`vector`] | [`FourVector`], [`Particle`] | Four-vector arithmetic and the input contract |
//! | [`jet`] | [`Jet`] | Constituent set plus summed four-vector |
//! | [`metric`] | [`Algorithm`], [`DistanceMetric`] | Jade, Jade-E and Durham merge distances |
//! | [`cache`] | [`cache::DistanceCache`] | Symmetric pair-distance table over jet slots |
//! | [`finder`] | [`JetFinder`], [`FinderConfig`], [`ForceOutcome`] | Merge loop, resumable ycut, forced jet count |
//! | [`error`] | [`JetError`] | Usage errors |
//!
//! ## Features
//!
//! - `serde` — serialisation for [`FourVector`], [`Algorithm`], [`FinderConfig`]
//!   and [`ForceOutcome`].
//! - `python-ffi` — PyO3 bindings (`ffi` module).
//!
//! ## Logging
//!
//! The finder emits `tracing` events: `debug` per pass and per forced-count
//! trial, `trace` per merge, `warn` when a forced count is not reached. No
//! subscriber is installed by this crate.
//!
//! ## License
//!
//! Business Source License 1.1.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod cache;
pub mod error;
pub mod finder;
pub mod jet;
pub mod metric;
pub mod vector;

#[cfg(feature = "python-ffi")]
pub mod ffi;

pub use error::{JetError, Result};
pub use finder::{FinderConfig, ForceOutcome, JetFinder, DEFAULT_MAX_TRIALS};
pub use jet::Jet;
pub use metric::{Algorithm, DistanceMetric};
pub use vector::{FourVector, Particle};

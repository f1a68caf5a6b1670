/*
 * This source code is licensed under the Business Source License 1.1.
 */

//! The clustering engine: resumable pairwise merging and forced jet counts.
//!
//! # Lifecycle
//!
//! ```text
//! new ──► initialize(particles) ──► find_jets() ──► set_ycut(bigger) ──► find_jets() ...
//!              ▲                          │
//!              └──── force_jet_count(n) ◄─┘   (re-seeds internally)
//! ```
//!
//! [`JetFinder::initialize`] seeds one jet per particle and evaluates the
//! metric for every pair once. Each merge afterwards only recomputes the row
//! of the surviving jet, so raising the ycut and calling
//! [`JetFinder::find_jets`] again continues from the current partition
//! instead of redoing every merge below the old ycut.
//!
//! # Invariants
//!
//! - The union of all jets' constituents is the seeded index set `0..n`, and
//!   jets are pairwise disjoint.
//! - Each merge removes exactly one jet.
//! - The ycut cannot be lowered once a merge has happened since seeding.
//! - The merge order does not depend on the ycut: the globally closest pair
//!   always merges first, ties going to the earliest pair in slot order. A run
//!   at `y1` followed by a run at `y2 > y1` therefore ends in the same
//!   partition as a single run at `y2`.

use hashbrown::HashMap;
use tracing::{debug, trace, warn};

use crate::cache::DistanceCache;
use crate::error::{JetError, Result};
use crate::jet::Jet;
use crate::metric::{Algorithm, DistanceMetric};
use crate::vector::{FourVector, Particle};

/// Default trial cap for [`JetFinder::force_jet_count`].
pub const DEFAULT_MAX_TRIALS: u32 = 100;

// ─── Config ─────────────────────────────────────────────────────────────────

/// Construction-time settings for a [`JetFinder`].
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct FinderConfig {
    /// Initial merge threshold. Default: 0.0 (no merges).
    pub ycut: f64,
    /// Trial cap for the forced jet count search. Default: 100.
    pub max_trials: u32,
}

impl Default for FinderConfig {
    fn default() -> Self {
        Self {
            ycut: 0.0,
            max_trials: DEFAULT_MAX_TRIALS,
        }
    }
}

/// Result of a [`JetFinder::force_jet_count`] search.
///
/// `converged == false` is the soft shortfall: the trial budget ran out (or
/// the bracket collapsed) without hitting the target. The finder is left in
/// the last attempted state and `jet_count` says what it holds.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ForceOutcome {
    /// Requested jet count.
    pub target: usize,
    /// Jet count the finder ended with.
    pub jet_count: usize,
    /// ycut of the final state.
    pub ycut: f64,
    /// Clustering trials spent.
    pub trials: u32,
    /// Whether `jet_count == target`.
    pub converged: bool,
}

// ─── JetFinder ──────────────────────────────────────────────────────────────

/// Iterative pairwise-merging jet finder.
///
/// Generic over the [`DistanceMetric`]; [`Algorithm`] covers Jade, Jade-E and
/// Durham. `Clone` is a full deep copy, so a finder can be branched and each
/// branch resumed at a different ycut.
#[derive(Clone, Debug)]
pub struct JetFinder<M: DistanceMetric = Algorithm> {
    /// Merge distance function.
    metric: M,
    /// Construction settings.
    config: FinderConfig,
    /// Current merge threshold.
    ycut: f64,
    /// Four-vectors copied from the event at seeding time, by event index.
    seeds: Vec<FourVector>,
    /// Visible energy of the seeded event.
    evis: f64,
    /// Jet arena. Slot `i` starts as the singleton of particle `i`; a slot
    /// becomes `None` when its jet is merged into a lower slot.
    slots: Vec<Option<Jet>>,
    /// Pair distances between live slots.
    cache: DistanceCache,
    /// Set by `initialize`.
    initialized: bool,
    /// True once a pass at the current ycut has run to completion.
    done: bool,
    /// True once any `find_jets` pass has run since seeding.
    clustered: bool,
    /// Smallest remaining pair distance after the last pass.
    next_unmerged: Option<f64>,
}

impl<M: DistanceMetric> JetFinder<M> {
    /// Create a finder with the given metric and starting ycut.
    pub fn new(metric: M, ycut: f64) -> Result<Self> {
        Self::with_config(
            metric,
            FinderConfig {
                ycut,
                ..FinderConfig::default()
            },
        )
    }

    /// Create a finder from a full configuration.
    pub fn with_config(metric: M, config: FinderConfig) -> Result<Self> {
        validate_ycut(config.ycut)?;
        Ok(Self {
            metric,
            ycut: config.ycut,
            config,
            seeds: Vec::new(),
            evis: 0.0,
            slots: Vec::new(),
            cache: DistanceCache::default(),
            initialized: false,
            done: false,
            clustered: false,
            next_unmerged: None,
        })
    }

    // ── Seeding ────────────────────────────────────────────────────────────

    /// Seed one jet per particle and build the full distance cache.
    ///
    /// Discards any previous partition. The ycut is kept. On error the finder
    /// is left untouched.
    pub fn initialize<P: Particle>(&mut self, particles: &[P]) -> Result<()> {
        if particles.is_empty() {
            return Err(JetError::EmptyEvent);
        }
        let seeds: Vec<FourVector> = particles.iter().map(Particle::four_vector).collect();
        if let Some(index) = seeds.iter().position(|p| !p.is_finite()) {
            return Err(JetError::NonFiniteParticle { index });
        }
        let evis: f64 = seeds.iter().map(|p| p.e).sum();
        if !(evis > 0.0 && evis.is_finite()) {
            return Err(JetError::ZeroVisibleEnergy { evis });
        }

        self.seeds = seeds;
        self.evis = evis;
        self.initialized = true;
        self.seed();
        debug!(
            algorithm = self.metric.name(),
            particles = self.seeds.len(),
            evis,
            "jet finder initialized"
        );
        Ok(())
    }

    /// Rebuild slots and cache from `seeds`.
    fn seed(&mut self) {
        self.slots = self
            .seeds
            .iter()
            .enumerate()
            .map(|(i, v)| Some(Jet::from_particle(i, *v)))
            .collect();
        let (metric, seeds, evis) = (&self.metric, &self.seeds, self.evis);
        self.cache = DistanceCache::build(seeds.len(), |i, j| {
            metric.distance(&seeds[i], &seeds[j], evis)
        });
        self.done = self.seeds.len() < 2;
        self.clustered = false;
        self.next_unmerged = None;
    }

    // ── Threshold ──────────────────────────────────────────────────────────

    /// Change the merge threshold.
    ///
    /// Raising it never merges anything by itself; the next [`find_jets`]
    /// pass picks it up. Lowering it is only allowed while the partition is
    /// still the seeded one, since merged jets cannot be split again.
    ///
    /// [`find_jets`]: JetFinder::find_jets
    pub fn set_ycut(&mut self, ycut: f64) -> Result<()> {
        validate_ycut(ycut)?;
        if ycut < self.ycut && self.has_merged() {
            return Err(JetError::YcutDecrease {
                current: self.ycut,
                requested: ycut,
            });
        }
        if ycut != self.ycut {
            self.ycut = ycut;
            self.done = false;
        }
        Ok(())
    }

    // ── Merge loop ─────────────────────────────────────────────────────────

    /// Merge the closest pair while its distance is below the ycut.
    ///
    /// Resumes from the current partition and returns the number of merges
    /// made in this pass (0 when called twice at the same ycut).
    pub fn find_jets(&mut self) -> Result<usize> {
        self.ensure_initialized()?;
        let mut merges = 0;
        loop {
            match self.cache.min_pair() {
                Some((i, j, y)) if y < self.ycut => {
                    trace!(keep = i, absorb = j, y, "merging jets");
                    self.merge_slots(i, j);
                    merges += 1;
                }
                next => {
                    self.next_unmerged = next.map(|(_, _, y)| y);
                    break;
                }
            }
        }
        self.done = true;
        self.clustered = true;
        debug!(
            algorithm = self.metric.name(),
            ycut = self.ycut,
            merges,
            jets = self.cache.live_count(),
            next_unmerged = ?self.next_unmerged,
            "jet finding pass complete"
        );
        Ok(merges)
    }

    /// Merge the jet in slot `j` into slot `i` and refresh row `i`.
    fn merge_slots(&mut self, i: usize, j: usize) {
        let Self {
            metric,
            evis,
            slots,
            cache,
            ..
        } = self;

        // `min_pair` only yields live pairs with `i < j`; anything else leaves
        // the partition untouched.
        if i >= j {
            return;
        }
        let (head, tail) = slots.split_at_mut(j);
        let (Some(keeper), Some(absorbed)) = (head[i].as_mut(), tail[0].as_mut()) else {
            return;
        };
        keeper.merge(core::mem::take(absorbed));
        tail[0] = None;
        cache.release(j);
        let merged = *keeper.vector();

        cache.refresh_row(i, |k| {
            slots[k]
                .as_ref()
                .map_or(f64::NAN, |other| metric.distance(&merged, other.vector(), *evis))
        });
    }

    /// Clone this finder, raise the clone's ycut to `ycut` and cluster it.
    ///
    /// The original is untouched.
    pub fn fork_at(&self, ycut: f64) -> Result<Self>
    where
        M: Clone,
    {
        let mut branch = self.clone();
        branch.set_ycut(ycut)?;
        branch.find_jets()?;
        Ok(branch)
    }

    // ── Read accessors ─────────────────────────────────────────────────────

    /// Distance of the pair that would merge next if the ycut were raised to
    /// meet it.
    ///
    /// `Ok(None)` when a single jet remains. Errors before any
    /// [`find_jets`](JetFinder::find_jets) pass since seeding.
    pub fn next_unmerged_distance(&self) -> Result<Option<f64>> {
        self.ensure_initialized()?;
        if !self.clustered {
            return Err(JetError::NotClustered);
        }
        Ok(self.next_unmerged)
    }

    /// Current jets, in slot (insertion) order.
    pub fn jets(&self) -> Result<impl Iterator<Item = &Jet> + '_> {
        self.ensure_initialized()?;
        Ok(self.slots.iter().flatten())
    }

    /// The `index`-th current jet in [`jets`](JetFinder::jets) order.
    pub fn jet(&self, index: usize) -> Result<Option<&Jet>> {
        Ok(self.jets()?.nth(index))
    }

    /// Number of current jets.
    pub fn jet_count(&self) -> Result<usize> {
        self.ensure_initialized()?;
        Ok(self.cache.live_count())
    }

    /// Map from event index to the position of its jet in [`jets`](JetFinder::jets) order.
    pub fn assignment(&self) -> Result<HashMap<usize, usize>> {
        let mut map = HashMap::with_capacity(self.seeds.len());
        for (pos, jet) in self.jets()?.enumerate() {
            for &index in jet.constituents() {
                map.insert(index, pos);
            }
        }
        Ok(map)
    }

    /// Consume the finder and return its jets in slot order.
    pub fn into_jets(self) -> Vec<Jet> {
        self.slots.into_iter().flatten().collect()
    }

    /// Current merge threshold.
    pub fn ycut(&self) -> f64 {
        self.ycut
    }

    /// Visible energy of the seeded event (0.0 before `initialize`).
    pub fn visible_energy(&self) -> f64 {
        self.evis
    }

    /// Number of seeded particles.
    pub fn particle_count(&self) -> usize {
        self.seeds.len()
    }

    /// Whether `initialize` has succeeded at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Whether no pair below the current ycut remains.
    pub fn is_finished(&self) -> bool {
        self.done
    }

    /// The distance metric in use.
    pub fn metric(&self) -> &M {
        &self.metric
    }

    /// Construction settings.
    pub fn config(&self) -> &FinderConfig {
        &self.config
    }

    // ── Internal helpers ───────────────────────────────────────────────────

    fn ensure_initialized(&self) -> Result<()> {
        if self.initialized {
            Ok(())
        } else {
            Err(JetError::NotInitialized)
        }
    }

    fn has_merged(&self) -> bool {
        self.initialized && self.cache.live_count() < self.seeds.len()
    }
}

// ─── Forced jet count ───────────────────────────────────────────────────────

impl<M: DistanceMetric + Clone> JetFinder<M> {
    /// Search for a ycut that leaves exactly `target` jets.
    ///
    /// The final jet count is a non-increasing step function of the ycut, so
    /// the search bisects a bracket `[lo, hi]` where `lo` leaves too many jets
    /// and `hi` too few. `lo` starts at 0; `hi` starts at
    /// `max(1, largest seeded pair distance)` and doubles while it still
    /// leaves too many jets. Every trial resumes from the partition reached at
    /// `lo`, which gives the same result as re-seeding and clustering at the
    /// trial ycut.
    ///
    /// Some targets are unreachable (two merges at the same distance skip a
    /// count). The search then stops after `max_trials` trials, or earlier if
    /// the bracket collapses, and reports `converged: false`. The finder keeps
    /// the last attempted state either way.
    pub fn force_jet_count(&mut self, target: usize) -> Result<ForceOutcome> {
        self.ensure_initialized()?;
        let particles = self.seeds.len();
        if target == 0 || target > particles {
            return Err(JetError::InvalidJetCount {
                requested: target,
                particles,
            });
        }

        let mut lo_state = self.reseeded();
        lo_state.find_jets()?;
        if lo_state.cache.live_count() == target {
            *self = lo_state;
            return Ok(self.outcome(target, 0, true));
        }

        let max_trials = self.config.max_trials.max(1);
        let mut lo = lo_state.ycut;
        let mut hi = lo_state.cache.max_distance().unwrap_or(0.0).max(1.0);
        let mut hi_confirmed = false;
        let mut last: Option<Self> = None;
        let mut trials = 0;

        while trials < max_trials {
            let y = if hi_confirmed { 0.5 * (lo + hi) } else { hi };
            if hi_confirmed && !(y > lo && y < hi) {
                debug!(lo, hi, "ycut bracket collapsed");
                break;
            }
            trials += 1;

            let mut trial = lo_state.clone();
            trial.set_ycut(y)?;
            trial.find_jets()?;
            let count = trial.cache.live_count();
            debug!(trial = trials, ycut = y, jets = count, target, "forced jet count trial");

            if count == target {
                *self = trial;
                return Ok(self.outcome(target, trials, true));
            }
            if count > target {
                lo = y;
                if !hi_confirmed {
                    hi = y * 2.0;
                }
                lo_state = trial.clone();
            } else {
                hi = y;
                hi_confirmed = true;
            }
            last = Some(trial);
        }

        *self = last.unwrap_or(lo_state);
        let outcome = self.outcome(target, trials, false);
        warn!(
            target,
            jets = outcome.jet_count,
            ycut = outcome.ycut,
            trials,
            "forced jet count not reached"
        );
        Ok(outcome)
    }

    /// Fresh copy seeded from the stored particles at ycut 0.
    fn reseeded(&self) -> Self {
        let mut fresh = Self {
            metric: self.metric.clone(),
            config: self.config.clone(),
            ycut: 0.0,
            seeds: self.seeds.clone(),
            evis: self.evis,
            slots: Vec::new(),
            cache: DistanceCache::default(),
            initialized: true,
            done: false,
            clustered: false,
            next_unmerged: None,
        };
        fresh.seed();
        fresh
    }

    fn outcome(&self, target: usize, trials: u32, converged: bool) -> ForceOutcome {
        ForceOutcome {
            target,
            jet_count: self.cache.live_count(),
            ycut: self.ycut,
            trials,
            converged,
        }
    }
}

fn validate_ycut(ycut: f64) -> Result<()> {
    if ycut >= 0.0 {
        Ok(())
    } else {
        Err(JetError::InvalidYcut { ycut })
    }
}

// ─── Tests ──────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    // ── Helpers ──────────────────────────────────────────────────────────

    /// Two tight pairs, back to back along z, each pair opened by a small
    /// angle in the x direction.
    fn two_pair_event() -> Vec<FourVector> {
        vec![
            FourVector::massless(1.0, 0.0, 20.0),
            FourVector::massless(-1.0, 0.0, 20.0),
            FourVector::massless(1.0, 0.0, -20.0),
            FourVector::massless(-1.0, 0.0, -20.0),
        ]
    }

    fn finder(ycut: f64) -> JetFinder {
        JetFinder::new(Algorithm::Durham, ycut).expect("valid ycut")
    }

    fn sorted_constituents(f: &JetFinder) -> Vec<Vec<usize>> {
        let mut out: Vec<Vec<usize>> = f
            .jets()
            .expect("initialized")
            .map(|j| {
                let mut c = j.constituents().to_vec();
                c.sort_unstable();
                c
            })
            .collect();
        out.sort();
        out
    }

    // ── Lifecycle ────────────────────────────────────────────────────────

    #[test]
    fn test_operations_before_initialize_fail() {
        let mut f = finder(0.1);
        assert!(!f.is_initialized());
        assert_eq!(f.find_jets(), Err(JetError::NotInitialized));
        assert_eq!(f.jet_count(), Err(JetError::NotInitialized));
        assert_eq!(f.next_unmerged_distance(), Err(JetError::NotInitialized));
        assert_eq!(f.force_jet_count(1), Err(JetError::NotInitialized));
        assert!(f.jets().is_err());
    }

    #[test]
    fn test_empty_and_zero_energy_events_rejected() {
        let mut f = finder(0.1);
        let empty: [FourVector; 0] = [];
        assert_eq!(f.initialize(&empty), Err(JetError::EmptyEvent));
        let dead = [FourVector::ZERO, FourVector::ZERO];
        assert!(matches!(
            f.initialize(&dead),
            Err(JetError::ZeroVisibleEnergy { .. })
        ));
        assert!(!f.is_initialized());
    }

    #[test]
    fn test_non_finite_particle_rejected() {
        let mut f = finder(0.1);
        let mut event = two_pair_event();
        event[2].px = f64::NAN;
        assert_eq!(f.initialize(&event), Err(JetError::NonFiniteParticle { index: 2 }));
        event[2].px = 1.0;
        event[3].e = f64::INFINITY;
        assert_eq!(f.initialize(&event), Err(JetError::NonFiniteParticle { index: 3 }));
        assert!(!f.is_initialized());

        f.initialize(&two_pair_event()).unwrap();
        event[3].e = f64::NAN;
        assert!(f.initialize(&event).is_err());
        assert_eq!(f.jet_count().unwrap(), 4);
        assert_eq!(f.particle_count(), 4);
    }

    #[test]
    fn test_merge_of_dead_slot_keeps_partition() {
        let mut f = finder(0.0);
        f.initialize(&two_pair_event()).unwrap();
        f.merge_slots(0, 1);
        assert_eq!(sorted_constituents(&f), vec![vec![0, 1], vec![2], vec![3]]);

        // Slot 1 is gone: neither as keeper nor as absorbed jet may it drop
        // anyone from the partition.
        f.merge_slots(0, 1);
        f.merge_slots(1, 2);
        f.merge_slots(2, 2);
        assert_eq!(sorted_constituents(&f), vec![vec![0, 1], vec![2], vec![3]]);
        assert_eq!(f.jet_count().unwrap(), 3);
    }

    #[test]
    fn test_invalid_ycut_rejected() {
        assert!(matches!(
            JetFinder::new(Algorithm::Jade, -0.5),
            Err(JetError::InvalidYcut { .. })
        ));
        assert!(JetFinder::new(Algorithm::Jade, f64::NAN).is_err());
    }

    #[test]
    fn test_initialize_seeds_singletons() {
        let mut f = finder(0.0);
        let event = two_pair_event();
        f.initialize(&event).unwrap();
        assert_eq!(f.jet_count().unwrap(), 4);
        assert_eq!(f.particle_count(), 4);
        assert_relative_eq!(f.visible_energy(), event.iter().map(|p| p.e).sum::<f64>());
        for (i, jet) in f.jets().unwrap().enumerate() {
            assert_eq!(jet.constituents(), &[i]);
        }
        assert_eq!(f.next_unmerged_distance(), Err(JetError::NotClustered));
    }

    // ── Merge loop ───────────────────────────────────────────────────────

    #[test]
    fn test_two_pairs_cluster_to_two_jets() {
        let mut f = finder(0.01);
        f.initialize(&two_pair_event()).unwrap();
        assert_eq!(f.find_jets().unwrap(), 2);
        assert_eq!(f.jet_count().unwrap(), 2);
        assert_eq!(sorted_constituents(&f), vec![vec![0, 1], vec![2, 3]]);
        assert!(f.is_finished());

        let next = f.next_unmerged_distance().unwrap().expect("two jets left");
        assert!(next >= 0.01);
    }

    #[test]
    fn test_find_jets_idempotent() {
        let mut f = finder(0.01);
        f.initialize(&two_pair_event()).unwrap();
        f.find_jets().unwrap();
        let before = sorted_constituents(&f);
        assert_eq!(f.find_jets().unwrap(), 0);
        assert_eq!(sorted_constituents(&f), before);
    }

    #[test]
    fn test_single_particle_is_one_jet() {
        let mut f = finder(0.5);
        f.initialize(&[FourVector::massless(0.0, 0.0, 5.0)]).unwrap();
        assert_eq!(f.jet_count().unwrap(), 1);
        assert!(f.is_finished());
        assert_eq!(f.find_jets().unwrap(), 0);
        assert_eq!(f.next_unmerged_distance().unwrap(), None);
    }

    #[test]
    fn test_huge_ycut_merges_everything() {
        let mut f = finder(10.0);
        f.initialize(&two_pair_event()).unwrap();
        assert_eq!(f.find_jets().unwrap(), 3);
        assert_eq!(f.jet_count().unwrap(), 1);
        assert_eq!(f.next_unmerged_distance().unwrap(), None);
        let jet = f.jets().unwrap().next().unwrap();
        assert_eq!(jet.n_particles(), 4);
        assert_relative_eq!(jet.energy(), f.visible_energy(), epsilon = 1e-9);
    }

    #[test]
    fn test_ties_merge_earliest_pair_first() {
        // Four identical directions: every pair distance is 0 under Durham,
        // so the first merge must be (0, 1), then the merged jet in slot 0
        // absorbs 2, then 3.
        let event = vec![FourVector::massless(0.0, 0.0, 1.0); 4];
        let mut f = finder(1e-9);
        f.initialize(&event).unwrap();
        f.find_jets().unwrap();
        let jets: Vec<&Jet> = f.jets().unwrap().collect();
        assert_eq!(jets.len(), 1);
        assert_eq!(jets[0].constituents(), &[0, 1, 2, 3]);
    }

    // ── Threshold changes ────────────────────────────────────────────────

    #[test]
    fn test_ycut_cannot_drop_after_merges() {
        let mut f = finder(0.01);
        f.initialize(&two_pair_event()).unwrap();
        f.find_jets().unwrap();
        assert_eq!(
            f.set_ycut(0.001),
            Err(JetError::YcutDecrease {
                current: 0.01,
                requested: 0.001
            })
        );
        assert_eq!(f.ycut(), 0.01);

        f.initialize(&two_pair_event()).unwrap();
        assert!(f.set_ycut(0.001).is_ok());
    }

    #[test]
    fn test_ycut_may_drop_after_a_pass_without_merges() {
        let mut f = finder(0.0001);
        f.initialize(&two_pair_event()).unwrap();
        assert_eq!(f.find_jets().unwrap(), 0);
        assert_eq!(f.set_ycut(0.00001), Ok(()));
        assert_eq!(f.ycut(), 0.00001);

        f.set_ycut(0.01).unwrap();
        assert_eq!(f.find_jets().unwrap(), 2);
        assert!(matches!(
            f.set_ycut(0.00001),
            Err(JetError::YcutDecrease { .. })
        ));
    }

    #[test]
    fn test_raising_ycut_does_not_merge_until_find_jets() {
        let mut f = finder(0.0001);
        f.initialize(&two_pair_event()).unwrap();
        f.find_jets().unwrap();
        assert_eq!(f.jet_count().unwrap(), 4);

        f.set_ycut(10.0).unwrap();
        assert!(!f.is_finished());
        assert_eq!(f.jet_count().unwrap(), 4);
        f.find_jets().unwrap();
        assert_eq!(f.jet_count().unwrap(), 1);
    }

    #[test]
    fn test_fork_leaves_original_untouched() {
        let mut f = finder(0.01);
        f.initialize(&two_pair_event()).unwrap();
        f.find_jets().unwrap();

        let branch = f.fork_at(10.0).unwrap();
        assert_eq!(branch.jet_count().unwrap(), 1);
        assert_eq!(f.jet_count().unwrap(), 2);
        assert_eq!(f.ycut(), 0.01);
    }

    #[test]
    fn test_assignment_maps_every_particle() {
        let mut f = finder(0.01);
        f.initialize(&two_pair_event()).unwrap();
        f.find_jets().unwrap();
        let map = f.assignment().unwrap();
        assert_eq!(map.len(), 4);
        assert_eq!(map[&0], map[&1]);
        assert_eq!(map[&2], map[&3]);
        assert_ne!(map[&0], map[&2]);

        let first = f.jet(map[&0]).unwrap().expect("jet exists");
        assert!(first.contains(0) && first.contains(1));
        assert_eq!(f.jet(2).unwrap(), None);
    }

    // ── Forced jet count ─────────────────────────────────────────────────

    #[test]
    fn test_force_two_jets() {
        let mut f = finder(0.0);
        f.initialize(&two_pair_event()).unwrap();
        let outcome = f.force_jet_count(2).unwrap();
        assert!(outcome.converged, "{outcome:?}");
        assert_eq!(outcome.jet_count, 2);
        assert_eq!(f.jet_count().unwrap(), 2);
        assert_eq!(f.ycut(), outcome.ycut);
        assert_eq!(sorted_constituents(&f), vec![vec![0, 1], vec![2, 3]]);
    }

    #[test]
    fn test_force_all_particles_needs_no_trial() {
        let mut f = finder(0.3);
        f.initialize(&two_pair_event()).unwrap();
        f.find_jets().unwrap();
        let outcome = f.force_jet_count(4).unwrap();
        assert!(outcome.converged);
        assert_eq!(outcome.trials, 0);
        assert_eq!(f.jet_count().unwrap(), 4);
    }

    #[test]
    fn test_force_invalid_target() {
        let mut f = finder(0.0);
        f.initialize(&two_pair_event()).unwrap();
        assert_eq!(
            f.force_jet_count(0),
            Err(JetError::InvalidJetCount {
                requested: 0,
                particles: 4
            })
        );
        assert!(f.force_jet_count(5).is_err());
    }

    #[test]
    fn test_force_unreachable_target_is_soft() {
        // Identical directions: every merge happens at distance 0, so the
        // count jumps straight from 3 to 1.
        let event = vec![FourVector::massless(0.0, 1.0, 0.0); 3];
        let mut f = JetFinder::with_config(
            Algorithm::Jade,
            FinderConfig {
                ycut: 0.0,
                max_trials: 20,
            },
        )
        .unwrap();
        f.initialize(&event).unwrap();
        let outcome = f.force_jet_count(2).unwrap();
        assert!(!outcome.converged);
        assert!(outcome.trials <= 20);
        assert_eq!(outcome.jet_count, f.jet_count().unwrap());
        assert_eq!(outcome.jet_count, 1);
    }
}

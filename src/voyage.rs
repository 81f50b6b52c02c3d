//! Unattended voyages for the `run` and `batch` commands.
//!
//! An autopilot plays the game: before each day it spends items on any
//! restorable resource below a threshold, then sails on. Batches run many
//! voyages in parallel with rayon and fold the results into [`VoyageStats`].

// Averages and rates convert counts to f64
#![allow(clippy::cast_precision_loss)]

use rand::Rng;
use rayon::prelude::*;

use crate::game::{GameState, ItemKind, ItemOutcome, Levels, Outcome, Resource, TOTAL_DISASTERS};

/// Upper bound on days per voyage. A game always ends well before this.
const MAX_DAYS: u32 = TOTAL_DISASTERS + 2;

/// Autopilot settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VoyageConfig {
    /// Use an item when its resource falls below this level.
    pub threshold: u8,
    /// Keep a per-day log in the result.
    pub record_days: bool,
}

impl Default for VoyageConfig {
    fn default() -> Self {
        Self {
            threshold: 40,
            record_days: true,
        }
    }
}

/// One day of a voyage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayLog {
    /// Day the disaster struck on.
    pub day: u32,
    /// Disaster name.
    pub disaster: &'static str,
    /// Items used before sailing.
    pub items_used: u32,
    /// Levels after the disaster.
    pub levels: Levels,
}

/// How a voyage ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoyageEnd {
    /// Reached safe waters.
    Victory,
    /// Lost to the named disaster.
    Lost {
        /// The fatal disaster.
        cause: &'static str,
    },
}

/// Result of one voyage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoyageResult {
    /// How it ended.
    pub end: VoyageEnd,
    /// Final day.
    pub day: u32,
    /// Disasters survived.
    pub survived: u32,
    /// Health + sanity + ship condition at the end.
    pub final_score: u32,
    /// Items used over the whole voyage.
    pub items_used: u32,
    /// Levels at the end.
    pub levels: Levels,
    /// Per-day log (empty unless requested).
    pub days: Vec<DayLog>,
}

impl VoyageResult {
    /// Whether the voyage reached safe waters.
    #[must_use]
    pub const fn is_victory(&self) -> bool {
        matches!(self.end, VoyageEnd::Victory)
    }
}

/// The item that restores `resource`, if any.
const fn remedy(resource: Resource) -> Option<ItemKind> {
    match resource {
        Resource::Health => Some(ItemKind::MedicalKit),
        Resource::ShipCondition => Some(ItemKind::RepairKit),
        Resource::Food => Some(ItemKind::EmergencyRation),
        Resource::Water => Some(ItemKind::FreshWater),
        Resource::Sanity => None,
    }
}

/// Spend items on every restorable resource below the threshold.
///
/// Returns how many items were used.
pub fn resupply(state: &mut GameState, threshold: u8) -> u32 {
    let mut used = 0;
    for resource in Resource::ALL {
        let Some(kind) = remedy(resource) else {
            continue;
        };
        if state.level(resource) < threshold
            && matches!(state.use_item(kind), ItemOutcome::Used(_))
        {
            used += 1;
        }
    }
    used
}

/// Play one voyage to the end with the autopilot.
pub fn run_voyage<R: Rng>(rng: &mut R, config: &VoyageConfig) -> VoyageResult {
    let mut state = GameState::new();
    let mut items_used = 0;
    let mut days = Vec::new();

    let end = loop {
        if state.day > MAX_DAYS {
            log::error!("voyage overran {MAX_DAYS} days");
            break VoyageEnd::Lost { cause: "overrun" };
        }

        let used = resupply(&mut state, config.threshold);
        items_used += used;

        match state.advance(rng) {
            Outcome::Victory { .. } => break VoyageEnd::Victory,
            Outcome::Ignored => break VoyageEnd::Lost { cause: "unknown" },
            Outcome::Struck { disaster } | Outcome::Defeated { disaster } => {
                if config.record_days {
                    days.push(DayLog {
                        day: state.day - 1,
                        disaster: disaster.name,
                        items_used: used,
                        levels: state.levels,
                    });
                }
                if !state.alive {
                    break VoyageEnd::Lost {
                        cause: disaster.name,
                    };
                }
            }
        }
    };

    log::debug!(
        "voyage ended on day {} after {} disasters: {end:?}",
        state.day,
        state.disasters_survived
    );

    VoyageResult {
        end,
        day: state.day,
        survived: state.disasters_survived,
        final_score: state.final_score(),
        items_used,
        levels: state.levels,
        days,
    }
}

/// Aggregated statistics over many voyages.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct VoyageStats {
    /// Voyages played.
    pub voyages: u64,
    /// Voyages that reached safe waters.
    pub victories: u64,
    /// Sum of disasters survived.
    total_survived: u64,
    /// Sum of final scores over victories.
    total_victory_score: u64,
    /// Best final score over victories.
    pub best_score: Option<u32>,
    /// Sum of items used.
    total_items: u64,
    /// Loss count per fatal disaster, sorted by name.
    pub causes: Vec<(&'static str, u64)>,
}

impl VoyageStats {
    /// Empty stats.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one result in.
    pub fn add(&mut self, result: &VoyageResult) {
        self.voyages += 1;
        self.total_survived += u64::from(result.survived);
        self.total_items += u64::from(result.items_used);
        match result.end {
            VoyageEnd::Victory => {
                self.victories += 1;
                self.total_victory_score += u64::from(result.final_score);
                self.best_score = self.best_score.max(Some(result.final_score));
            }
            VoyageEnd::Lost { cause } => self.count_cause(cause, 1),
        }
    }

    /// Merge stats gathered elsewhere.
    pub fn merge(&mut self, other: &VoyageStats) {
        self.voyages += other.voyages;
        self.victories += other.victories;
        self.total_survived += other.total_survived;
        self.total_victory_score += other.total_victory_score;
        self.best_score = self.best_score.max(other.best_score);
        self.total_items += other.total_items;
        for &(cause, n) in &other.causes {
            self.count_cause(cause, n);
        }
    }

    fn count_cause(&mut self, cause: &'static str, n: u64) {
        match self.causes.binary_search_by(|(c, _)| c.cmp(&cause)) {
            Ok(i) => self.causes[i].1 += n,
            Err(i) => self.causes.insert(i, (cause, n)),
        }
    }

    /// Voyages lost.
    #[must_use]
    pub const fn losses(&self) -> u64 {
        self.voyages - self.victories
    }

    /// Fraction of voyages won (0.0-1.0).
    #[must_use]
    pub fn win_rate(&self) -> f64 {
        if self.voyages == 0 {
            return 0.0;
        }
        self.victories as f64 / self.voyages as f64
    }

    /// Mean disasters survived per voyage.
    #[must_use]
    pub fn avg_survived(&self) -> f64 {
        if self.voyages == 0 {
            return 0.0;
        }
        self.total_survived as f64 / self.voyages as f64
    }

    /// Mean final score over victories.
    #[must_use]
    pub fn avg_victory_score(&self) -> f64 {
        if self.victories == 0 {
            return 0.0;
        }
        self.total_victory_score as f64 / self.victories as f64
    }

    /// Mean items used per voyage.
    #[must_use]
    pub fn avg_items(&self) -> f64 {
        if self.voyages == 0 {
            return 0.0;
        }
        self.total_items as f64 / self.voyages as f64
    }
}

/// Run `count` voyages in parallel and aggregate them.
///
/// Each rayon worker folds into its own stats; the partials are merged at
/// the end, so there is no shared state on the hot path.
#[must_use]
pub fn run_voyages(count: u64, config: &VoyageConfig) -> VoyageStats {
    let config = VoyageConfig {
        record_days: false,
        ..*config
    };
    (0..count)
        .into_par_iter()
        .fold(VoyageStats::new, |mut stats, _| {
            let result = run_voyage(&mut rand::thread_rng(), &config);
            stats.add(&result);
            stats
        })
        .reduce(VoyageStats::new, |mut a, b| {
            a.merge(&b);
            a
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_resupply_below_threshold() {
        let mut state = GameState::new();
        state.levels.water = 20;
        state.levels.health = 60;
        state.levels.sanity = 5;

        let used = resupply(&mut state, 40);
        assert_eq!(used, 1);
        assert_eq!(state.levels.water, 70);
        assert_eq!(state.levels.health, 60);
        assert_eq!(state.inventory.fresh_water, 2);
    }

    #[test]
    fn test_resupply_out_of_stock() {
        let mut state = GameState::new();
        state.inventory.medical_kits = 0;
        state.levels.health = 10;
        assert_eq!(resupply(&mut state, 40), 0);
        assert_eq!(state.levels.health, 10);
    }

    #[test]
    fn test_voyage_ends() {
        let mut rng = StdRng::seed_from_u64(3);
        let result = run_voyage(&mut rng, &VoyageConfig::default());

        assert!(result.survived <= TOTAL_DISASTERS);
        assert_eq!(result.day, result.survived + 1);
        assert_eq!(result.days.len(), result.survived as usize);
        match result.end {
            VoyageEnd::Victory => assert_eq!(result.survived, TOTAL_DISASTERS),
            VoyageEnd::Lost { cause } => {
                assert!(crate::game::find(cause).is_some());
                assert!(result.levels.is_depleted());
            }
        }
    }

    #[test]
    fn test_voyage_without_log() {
        let mut rng = StdRng::seed_from_u64(9);
        let config = VoyageConfig {
            record_days: false,
            ..VoyageConfig::default()
        };
        assert!(run_voyage(&mut rng, &config).days.is_empty());
    }

    #[test]
    fn test_zero_threshold_never_uses_items() {
        let mut rng = StdRng::seed_from_u64(5);
        let config = VoyageConfig {
            threshold: 0,
            record_days: true,
        };
        let result = run_voyage(&mut rng, &config);
        assert_eq!(result.items_used, 0);
    }

    #[test]
    fn test_stats_add_and_merge() {
        let mut rng = StdRng::seed_from_u64(21);
        let config = VoyageConfig::default();
        let results: Vec<_> = (0..20).map(|_| run_voyage(&mut rng, &config)).collect();

        let mut whole = VoyageStats::new();
        for r in &results {
            whole.add(r);
        }

        let mut left = VoyageStats::new();
        let mut right = VoyageStats::new();
        for r in &results[..7] {
            left.add(r);
        }
        for r in &results[7..] {
            right.add(r);
        }
        left.merge(&right);

        assert_eq!(left, whole);
        assert_eq!(whole.voyages, 20);
        assert_eq!(whole.victories + whole.losses(), 20);
        let lost: u64 = whole.causes.iter().map(|(_, n)| n).sum();
        assert_eq!(lost, whole.losses());
        assert!(whole.causes.windows(2).all(|w| w[0].0 < w[1].0));
    }

    #[test]
    fn test_empty_stats() {
        let stats = VoyageStats::new();
        assert!(stats.win_rate().abs() < f64::EPSILON);
        assert!(stats.avg_survived().abs() < f64::EPSILON);
        assert!(stats.avg_victory_score().abs() < f64::EPSILON);
        assert_eq!(stats.best_score, None);
    }

    #[test]
    fn test_run_voyages_counts() {
        let stats = run_voyages(50, &VoyageConfig::default());
        assert_eq!(stats.voyages, 50);
        assert!(stats.avg_survived() <= f64::from(TOTAL_DISASTERS));
    }
}

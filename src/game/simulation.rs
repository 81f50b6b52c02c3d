//! The simulation step: draw a disaster, apply it, check for the end.

use rand::Rng;

use crate::game::{ActiveDisaster, DisasterDefinition, GameState, disaster};

/// What a call to [`GameState::advance`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The crew is already lost. Nothing changed.
    Ignored,
    /// Every disaster has been survived. Nothing changed.
    Victory {
        /// Health + sanity + ship condition.
        final_score: u32,
    },
    /// A disaster struck and the crew made it through.
    Struck {
        /// The disaster that struck.
        disaster: DisasterDefinition,
    },
    /// A disaster struck and health or ship condition ran out.
    Defeated {
        /// The disaster that struck.
        disaster: DisasterDefinition,
    },
}

impl Outcome {
    /// The disaster that struck, if one did.
    #[must_use]
    pub const fn disaster(&self) -> Option<&DisasterDefinition> {
        match self {
            Outcome::Struck { disaster } | Outcome::Defeated { disaster } => Some(disaster),
            Outcome::Ignored | Outcome::Victory { .. } => None,
        }
    }

    /// Whether the game has ended with this outcome.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Outcome::Victory { .. } | Outcome::Defeated { .. })
    }
}

impl GameState {
    /// Advance one day: a random disaster strikes.
    pub fn advance<R: Rng>(&mut self, rng: &mut R) -> Outcome {
        if !self.alive {
            log::warn!("ignoring advance: crew is lost");
            return Outcome::Ignored;
        }
        if self.all_survived() {
            return self.victory();
        }
        self.strike(disaster::draw(rng))
    }

    /// Advance one day with a chosen disaster.
    pub fn strike(&mut self, disaster: &DisasterDefinition) -> Outcome {
        if !self.alive {
            log::warn!("ignoring {}: crew is lost", disaster.name);
            return Outcome::Ignored;
        }
        if self.all_survived() {
            return self.victory();
        }

        self.current_disaster = Some(ActiveDisaster::begin(*disaster));
        self.apply_effects(disaster.effects);
        self.day += 1;
        self.disasters_survived += 1;

        log::info!(
            "day {}: {} ({}/{})",
            self.day,
            disaster.name,
            self.disasters_survived,
            self.total_disasters
        );

        let outcome = if self.check_game_over() {
            log::info!(
                "crew lost after {} disasters over {} days",
                self.disasters_survived,
                self.day
            );
            Outcome::Defeated {
                disaster: *disaster,
            }
        } else {
            Outcome::Struck {
                disaster: *disaster,
            }
        };

        super::assert_invariants(self);
        outcome
    }

    fn victory(&self) -> Outcome {
        let final_score = self.final_score();
        log::info!("safe waters reached, final score {final_score}");
        Outcome::Victory { final_score }
    }
}

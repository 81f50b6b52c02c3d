//! Game invariants - sanity checks that detect bugs.
//!
//! The clamped-add rule and the guarded item use should make every one of
//! these impossible to violate. If one triggers, something bypassed them.

use crate::game::{GameState, MAX_LEVEL, Resource};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Check all game invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(state: &GameState) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();

    for resource in Resource::ALL {
        let value = state.level(resource);
        if value > MAX_LEVEL {
            violations.push(InvariantViolation {
                message: format!("{resource} is {value} > max {MAX_LEVEL}"),
            });
        }
    }

    if state.disasters_survived > state.total_disasters {
        violations.push(InvariantViolation {
            message: format!(
                "Survived {} disasters > total {}",
                state.disasters_survived, state.total_disasters
            ),
        });
    }

    if state.day != state.disasters_survived + 1 {
        violations.push(InvariantViolation {
            message: format!(
                "Day {} does not follow {} disasters",
                state.day, state.disasters_survived
            ),
        });
    }

    if !state.alive && !state.levels.is_depleted() {
        violations.push(InvariantViolation {
            message: "Crew marked lost with health and ship intact".to_string(),
        });
    }

    if state.alive && state.levels.is_depleted() {
        violations.push(InvariantViolation {
            message: "Crew still afloat with health or ship at zero".to_string(),
        });
    }

    if state.current_disaster.is_some() && state.disasters_survived == 0 {
        violations.push(InvariantViolation {
            message: "Disaster on record before any struck".to_string(),
        });
    }

    violations
}

/// Assert all game invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(state: &GameState) {
    let violations = check_invariants(state);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Game invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_state: &GameState) {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::CATALOG;

    #[test]
    fn test_fresh_game_passes() {
        let game = GameState::new();
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_after_strike_passes() {
        let mut game = GameState::new();
        game.strike(&CATALOG[4]);
        let violations = check_invariants(&game);
        assert!(violations.is_empty(), "{violations:?}");
    }

    #[test]
    fn test_out_of_range_level_detected() {
        let mut game = GameState::new();
        game.levels.sanity = 101;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Sanity"));
    }

    #[test]
    fn test_level_exactly_at_max_passes() {
        let mut game = GameState::new();
        game.levels.water = MAX_LEVEL;
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_progress_overflow_detected() {
        let mut game = GameState::new();
        game.disasters_survived = game.total_disasters + 1;
        game.day = game.disasters_survived + 1;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Survived"));
    }

    #[test]
    fn test_day_mismatch_detected() {
        let mut game = GameState::new();
        game.day = 5;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("Day"));
    }

    #[test]
    fn test_dead_with_intact_vitals_detected() {
        let mut game = GameState::new();
        game.alive = false;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("lost"));
    }

    #[test]
    fn test_afloat_with_empty_health_detected() {
        let mut game = GameState::new();
        game.levels.health = 0;

        let violations = check_invariants(&game);
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.contains("afloat"));
    }

    #[test]
    fn test_dead_with_sunk_ship_passes() {
        let mut game = GameState::new();
        game.levels.ship_condition = 0;
        game.alive = false;
        assert!(check_invariants(&game).is_empty());
    }

    #[test]
    fn test_multiple_violations_all_reported() {
        let mut game = GameState::new();
        game.levels.health = 200;
        game.day = 0;
        game.alive = false;

        let violations = check_invariants(&game);
        assert!(violations.len() >= 3, "{violations:?}");
    }
}

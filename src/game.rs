//! Game layer.
//!
//! Implements the survival rules:
//! - Five clamped resources and a small consumable inventory
//! - A static catalog of disasters
//! - The daily simulation step (disaster, damage, victory/defeat)
//! - Invariant checks run after every mutation in debug builds

mod disaster;
mod inventory;
mod invariants;
mod resource;
mod simulation;
mod state;

pub use disaster::{ActiveDisaster, CATALOG, Category, DisasterDefinition, draw, find};
pub use inventory::{Inventory, ItemKind};
pub use invariants::{InvariantViolation, assert_invariants, check_invariants};
pub use resource::{Effect, Levels, MAX_LEVEL, MIN_LEVEL, Resource, Tier, clamped_add};
pub use simulation::Outcome;
pub use state::{GameState, ItemOutcome, TOTAL_DISASTERS};

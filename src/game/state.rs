//! Game state management.

use crate::game::{ActiveDisaster, Effect, Inventory, ItemKind, Levels, Resource};

/// Number of disasters that must be survived to win.
pub const TOTAL_DISASTERS: u32 = 25;

/// Result of trying to use an inventory item.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemOutcome {
    /// The item was consumed and its effect applied.
    Used(ItemKind),
    /// None of this item left. Nothing changed.
    OutOfStock(ItemKind),
    /// The crew is dead. Nothing changed.
    Ignored,
}

/// Complete game state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameState {
    /// Current day (starts at 1).
    pub day: u32,
    /// Disasters survived so far.
    pub disasters_survived: u32,
    /// Disasters needed to win.
    pub total_disasters: u32,
    /// Resource levels.
    pub levels: Levels,
    /// Consumables on board.
    pub inventory: Inventory,
    /// The most recent disaster, if any.
    pub current_disaster: Option<ActiveDisaster>,
    /// False once health or ship condition has reached zero.
    pub alive: bool,
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl GameState {
    /// A fresh voyage: day 1, everything full, starting inventory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            day: 1,
            disasters_survived: 0,
            total_disasters: TOTAL_DISASTERS,
            levels: Levels::full(),
            inventory: Inventory::starting(),
            current_disaster: None,
            alive: true,
        }
    }

    /// Throw away everything and start over.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Read one resource.
    #[must_use]
    pub const fn level(&self, resource: Resource) -> u8 {
        self.levels.get(resource)
    }

    /// Whether every disaster has been survived.
    #[must_use]
    pub const fn all_survived(&self) -> bool {
        self.disasters_survived >= self.total_disasters
    }

    /// Score shown on victory: health + sanity + ship condition.
    #[must_use]
    pub fn final_score(&self) -> u32 {
        u32::from(self.levels.health)
            + u32::from(self.levels.sanity)
            + u32::from(self.levels.ship_condition)
    }

    /// Whether the active disaster's visual should be drawn.
    #[must_use]
    pub fn disaster_active(&self) -> bool {
        self.current_disaster.is_some_and(|d| d.active)
    }

    /// Stop drawing the current disaster.
    pub fn clear_disaster_visual(&mut self) {
        if let Some(disaster) = self.current_disaster.as_mut() {
            disaster.deactivate();
        }
    }

    /// Apply effects with the clamped-add rule.
    pub(crate) fn apply_effects(&mut self, effects: &[Effect]) {
        self.levels.apply_all(effects);
    }

    /// Mark the crew dead if a vital resource has run out.
    ///
    /// Returns `true` if this call killed them.
    pub(crate) fn check_game_over(&mut self) -> bool {
        if self.alive && self.levels.is_depleted() {
            self.alive = false;
            return true;
        }
        false
    }

    /// Use one item of `kind` with its fixed restorative effect.
    pub fn use_item(&mut self, kind: ItemKind) -> ItemOutcome {
        self.use_item_with(kind, kind.restores())
    }

    /// Use one item of `kind`, applying `effects`.
    ///
    /// No-op when the crew is dead or no `kind` is left.
    pub fn use_item_with(&mut self, kind: ItemKind, effects: &[Effect]) -> ItemOutcome {
        if !self.alive {
            log::warn!("ignoring {kind}: crew is lost");
            return ItemOutcome::Ignored;
        }
        if !self.inventory.take(kind) {
            log::debug!("no {kind} left");
            return ItemOutcome::OutOfStock(kind);
        }

        self.apply_effects(effects);
        log::debug!("used {kind}, {} left", self.inventory.count(kind));
        if self.check_game_over() {
            log::info!("crew lost to a {kind} on day {}", self.day);
        }
        super::assert_invariants(self);
        ItemOutcome::Used(kind)
    }
}

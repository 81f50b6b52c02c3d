//! Dashboard projection of the game state.
//!
//! Everything here is recomputed from [`GameState`] on each call; the HUD
//! keeps nothing between frames.

use crate::game::{GameState, ItemKind, Resource, Tier};

/// One resource bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bar {
    /// Which resource.
    pub resource: Resource,
    /// Current value, 0-100.
    pub value: u8,
    /// Styling tier.
    pub tier: Tier,
}

impl Bar {
    /// Percentage text, e.g. `"75%"`.
    #[must_use]
    pub fn text(self) -> String {
        format!("{}%", self.value)
    }
}

/// One inventory slot and whether its action is enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ItemSlot {
    /// Which item.
    pub kind: ItemKind,
    /// How many are left.
    pub count: u32,
    /// Whether the use action should be enabled.
    pub usable: bool,
}

/// Everything the dashboard shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hud {
    /// Current day.
    pub day: u32,
    /// Disasters survived.
    pub survived: u32,
    /// Disasters needed to win.
    pub total: u32,
    /// Resource bars in display order.
    pub bars: [Bar; 5],
    /// Inventory slots in display order.
    pub items: [ItemSlot; 4],
}

impl Hud {
    /// Project the current state.
    #[must_use]
    pub fn project(state: &GameState) -> Self {
        let bars = Resource::ALL.map(|resource| {
            let value = state.level(resource);
            Bar {
                resource,
                value,
                tier: Tier::of(value),
            }
        });
        let items = ItemKind::ALL.map(|kind| {
            let count = state.inventory.count(kind);
            ItemSlot {
                kind,
                count,
                usable: count > 0,
            }
        });

        Self {
            day: state.day,
            survived: state.disasters_survived,
            total: state.total_disasters,
            bars,
            items,
        }
    }

    /// Progress text, e.g. `"3/25"`.
    #[must_use]
    pub fn progress(&self) -> String {
        format!("{}/{}", self.survived, self.total)
    }

    /// The bar for `resource`.
    #[must_use]
    pub fn bar(&self, resource: Resource) -> Bar {
        self.bars
            .iter()
            .copied()
            .find(|b| b.resource == resource)
            .unwrap_or(Bar {
                resource,
                value: 0,
                tier: Tier::Critical,
            })
    }

    /// The slot for `kind`.
    #[must_use]
    pub fn item(&self, kind: ItemKind) -> ItemSlot {
        self.items
            .iter()
            .copied()
            .find(|s| s.kind == kind)
            .unwrap_or(ItemSlot {
                kind,
                count: 0,
                usable: false,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::find;

    #[test]
    fn test_fresh_hud() {
        let hud = Hud::project(&GameState::new());
        assert_eq!(hud.day, 1);
        assert_eq!(hud.progress(), "0/25");
        for bar in hud.bars {
            assert_eq!(bar.value, 100);
            assert_eq!(bar.tier, Tier::Normal);
            assert_eq!(bar.text(), "100%");
        }
        assert_eq!(hud.item(ItemKind::FreshWater).count, 3);
        assert!(hud.items.iter().all(|s| s.usable));
    }

    #[test]
    fn test_hud_tracks_damage() {
        let mut game = GameState::new();
        game.strike(find("Water Shortage").unwrap());
        game.strike(find("Navigation Failure").unwrap());

        let hud = Hud::project(&game);
        assert_eq!(hud.day, 3);
        assert_eq!(hud.progress(), "2/25");

        let water = hud.bar(Resource::Water);
        assert_eq!(water.value, 30);
        assert_eq!(water.tier, Tier::Warning);

        let sanity = hud.bar(Resource::Sanity);
        assert_eq!(sanity.value, 65);
        assert_eq!(sanity.tier, Tier::Normal);
    }

    #[test]
    fn test_empty_slot_disabled() {
        let mut game = GameState::new();
        game.use_item(ItemKind::RepairKit);

        let hud = Hud::project(&game);
        let slot = hud.item(ItemKind::RepairKit);
        assert_eq!(slot.count, 0);
        assert!(!slot.usable);
        assert!(hud.item(ItemKind::MedicalKit).usable);
    }

    #[test]
    fn test_critical_tier() {
        let mut game = GameState::new();
        game.levels.health = 24;
        assert_eq!(Hud::project(&game).bar(Resource::Health).tier, Tier::Critical);
    }
}

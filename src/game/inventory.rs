//! Consumable inventory.

use std::fmt;

use crate::game::{Effect, Resource};

const MEDICAL_KIT: &[Effect] = &[Effect::new(Resource::Health, 30)];
const REPAIR_KIT: &[Effect] = &[Effect::new(Resource::ShipCondition, 25)];
const EMERGENCY_RATION: &[Effect] = &[Effect::new(Resource::Food, 40)];
const FRESH_WATER: &[Effect] = &[Effect::new(Resource::Water, 50)];

/// One of the four consumables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ItemKind {
    /// Restores health.
    MedicalKit,
    /// Restores ship condition.
    RepairKit,
    /// Restores food.
    EmergencyRation,
    /// Restores water.
    FreshWater,
}

impl ItemKind {
    /// All items in display order.
    pub const ALL: [ItemKind; 4] = [
        ItemKind::MedicalKit,
        ItemKind::RepairKit,
        ItemKind::EmergencyRation,
        ItemKind::FreshWater,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            ItemKind::MedicalKit => "medical kit",
            ItemKind::RepairKit => "repair kit",
            ItemKind::EmergencyRation => "emergency ration",
            ItemKind::FreshWater => "fresh water",
        }
    }

    /// The fixed restorative effect of using one of this item.
    #[must_use]
    pub const fn restores(self) -> &'static [Effect] {
        match self {
            ItemKind::MedicalKit => MEDICAL_KIT,
            ItemKind::RepairKit => REPAIR_KIT,
            ItemKind::EmergencyRation => EMERGENCY_RATION,
            ItemKind::FreshWater => FRESH_WATER,
        }
    }
}

impl fmt::Display for ItemKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Counts of each consumable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Inventory {
    /// Medical kits.
    pub medical_kits: u32,
    /// Repair kits.
    pub repair_kits: u32,
    /// Emergency rations.
    pub emergency_rations: u32,
    /// Fresh water casks.
    pub fresh_water: u32,
}

impl Default for Inventory {
    fn default() -> Self {
        Self::starting()
    }
}

impl Inventory {
    /// The kit every voyage starts with.
    #[must_use]
    pub const fn starting() -> Self {
        Self {
            medical_kits: 1,
            repair_kits: 1,
            emergency_rations: 2,
            fresh_water: 3,
        }
    }

    /// How many of `kind` are left.
    #[must_use]
    pub const fn count(&self, kind: ItemKind) -> u32 {
        match kind {
            ItemKind::MedicalKit => self.medical_kits,
            ItemKind::RepairKit => self.repair_kits,
            ItemKind::EmergencyRation => self.emergency_rations,
            ItemKind::FreshWater => self.fresh_water,
        }
    }

    /// Whether at least one `kind` is left.
    #[must_use]
    pub const fn has(&self, kind: ItemKind) -> bool {
        self.count(kind) > 0
    }

    /// Remove one `kind`. Returns `false` and changes nothing if none are left.
    pub fn take(&mut self, kind: ItemKind) -> bool {
        let slot = match kind {
            ItemKind::MedicalKit => &mut self.medical_kits,
            ItemKind::RepairKit => &mut self.repair_kits,
            ItemKind::EmergencyRation => &mut self.emergency_rations,
            ItemKind::FreshWater => &mut self.fresh_water,
        };
        match slot.checked_sub(1) {
            Some(left) => {
                *slot = left;
                true
            }
            None => false,
        }
    }

    /// Total items across all kinds.
    #[must_use]
    pub fn total(&self) -> u32 {
        ItemKind::ALL.iter().map(|k| self.count(*k)).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starting_inventory() {
        let inv = Inventory::starting();
        assert_eq!(inv.count(ItemKind::MedicalKit), 1);
        assert_eq!(inv.count(ItemKind::RepairKit), 1);
        assert_eq!(inv.count(ItemKind::EmergencyRation), 2);
        assert_eq!(inv.count(ItemKind::FreshWater), 3);
        assert_eq!(inv.total(), 7);
    }

    #[test]
    fn test_take_stops_at_zero() {
        let mut inv = Inventory::starting();
        assert!(inv.take(ItemKind::RepairKit));
        assert!(!inv.has(ItemKind::RepairKit));
        assert!(!inv.take(ItemKind::RepairKit));
        assert_eq!(inv.count(ItemKind::RepairKit), 0);
    }

    #[test]
    fn test_restore_table() {
        assert_eq!(ItemKind::MedicalKit.restores(), &[Effect::new(Resource::Health, 30)]);
        assert_eq!(
            ItemKind::RepairKit.restores(),
            &[Effect::new(Resource::ShipCondition, 25)]
        );
        assert_eq!(ItemKind::EmergencyRation.restores(), &[Effect::new(Resource::Food, 40)]);
        assert_eq!(ItemKind::FreshWater.restores(), &[Effect::new(Resource::Water, 50)]);
    }
}

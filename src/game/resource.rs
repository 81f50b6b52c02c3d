//! Survival resources and the clamped-add rule.
//!
//! Every resource is a percentage in `[0, 100]`. Effects are signed deltas
//! of any magnitude; applying one always clamps back into range.

use std::fmt;

/// Lowest value a resource can hold.
pub const MIN_LEVEL: u8 = 0;

/// Highest value a resource can hold (and the starting value of each).
pub const MAX_LEVEL: u8 = 100;

/// One of the five survival resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Resource {
    /// Crew health. Reaching zero ends the game.
    Health,
    /// Crew sanity.
    Sanity,
    /// Food stores.
    Food,
    /// Drinking water stores.
    Water,
    /// Hull and machinery condition. Reaching zero ends the game.
    ShipCondition,
}

impl Resource {
    /// All resources in display order.
    pub const ALL: [Resource; 5] = [
        Resource::Health,
        Resource::Sanity,
        Resource::Food,
        Resource::Water,
        Resource::ShipCondition,
    ];

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Resource::Health => "Health",
            Resource::Sanity => "Sanity",
            Resource::Food => "Food",
            Resource::Water => "Water",
            Resource::ShipCondition => "Ship",
        }
    }

    /// Whether this resource reaching zero is fatal.
    #[must_use]
    pub const fn is_vital(self) -> bool {
        matches!(self, Resource::Health | Resource::ShipCondition)
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A signed change to a single resource.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Effect {
    /// The resource affected.
    pub resource: Resource,
    /// Signed change in percentage points.
    pub delta: i32,
}

impl Effect {
    /// Create a new effect.
    #[must_use]
    pub const fn new(resource: Resource, delta: i32) -> Self {
        Self { resource, delta }
    }
}

/// Add `delta` to `value`, clamping into `[MIN_LEVEL, MAX_LEVEL]`.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn clamped_add(value: u8, delta: i32) -> u8 {
    i32::from(value)
        .saturating_add(delta)
        .clamp(i32::from(MIN_LEVEL), i32::from(MAX_LEVEL)) as u8
}

/// Severity tier of a resource value. Only used for styling.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tier {
    /// 50 and above.
    Normal,
    /// 25 to 49.
    Warning,
    /// Below 25.
    Critical,
}

impl Tier {
    /// Classify a resource value.
    #[must_use]
    pub const fn of(value: u8) -> Self {
        if value < 25 {
            Tier::Critical
        } else if value < 50 {
            Tier::Warning
        } else {
            Tier::Normal
        }
    }
}

/// Current values of all five resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Levels {
    /// Crew health.
    pub health: u8,
    /// Crew sanity.
    pub sanity: u8,
    /// Food stores.
    pub food: u8,
    /// Water stores.
    pub water: u8,
    /// Ship condition.
    pub ship_condition: u8,
}

impl Default for Levels {
    fn default() -> Self {
        Self::full()
    }
}

impl Levels {
    /// Every resource at its maximum.
    #[must_use]
    pub const fn full() -> Self {
        Self {
            health: MAX_LEVEL,
            sanity: MAX_LEVEL,
            food: MAX_LEVEL,
            water: MAX_LEVEL,
            ship_condition: MAX_LEVEL,
        }
    }

    /// Read one resource.
    #[must_use]
    pub const fn get(self, resource: Resource) -> u8 {
        match resource {
            Resource::Health => self.health,
            Resource::Sanity => self.sanity,
            Resource::Food => self.food,
            Resource::Water => self.water,
            Resource::ShipCondition => self.ship_condition,
        }
    }

    fn slot_mut(&mut self, resource: Resource) -> &mut u8 {
        match resource {
            Resource::Health => &mut self.health,
            Resource::Sanity => &mut self.sanity,
            Resource::Food => &mut self.food,
            Resource::Water => &mut self.water,
            Resource::ShipCondition => &mut self.ship_condition,
        }
    }

    /// Apply a single effect with the clamped-add rule.
    pub fn apply(&mut self, effect: Effect) {
        let slot = self.slot_mut(effect.resource);
        *slot = clamped_add(*slot, effect.delta);
    }

    /// Apply every effect in order.
    pub fn apply_all(&mut self, effects: &[Effect]) {
        for &effect in effects {
            self.apply(effect);
        }
    }

    /// True if any vital resource has reached zero.
    #[must_use]
    pub fn is_depleted(self) -> bool {
        Resource::ALL
            .iter()
            .any(|r| r.is_vital() && self.get(*r) == MIN_LEVEL)
    }
}

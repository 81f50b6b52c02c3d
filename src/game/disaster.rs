//! The static disaster catalog.

use rand::Rng;

use crate::game::{Effect, Resource};

/// Visual category of a disaster. Selects the scene effect drawn while it is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Storm at sea.
    Storm,
    /// Fire aboard.
    Fire,
    /// Food spoiled.
    Hunger,
    /// Water supply failure.
    Thirst,
    /// Boarding party.
    Pirates,
    /// Crew unrest.
    Mutiny,
    /// Hazardous spill.
    Toxic,
    /// Navigation lost.
    Lost,
}

impl Category {
    /// Lowercase tag.
    #[must_use]
    pub const fn tag(self) -> &'static str {
        match self {
            Category::Storm => "storm",
            Category::Fire => "fire",
            Category::Hunger => "hunger",
            Category::Thirst => "thirst",
            Category::Pirates => "pirates",
            Category::Mutiny => "mutiny",
            Category::Toxic => "toxic",
            Category::Lost => "lost",
        }
    }
}

/// An immutable catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisasterDefinition {
    /// Display name.
    pub name: &'static str,
    /// Flavor text.
    pub description: &'static str,
    /// Visual category.
    pub category: Category,
    /// Resource deltas. Unlisted resources are untouched.
    pub effects: &'static [Effect],
    /// Nominal duration in disaster-turns. Flavor only; disasters resolve instantly.
    pub duration: u8,
}

impl DisasterDefinition {
    /// Delta this disaster applies to `resource` (zero if unlisted).
    #[must_use]
    pub fn delta(&self, resource: Resource) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.resource == resource)
            .map(|e| e.delta)
            .sum()
    }
}

/// Every disaster that can strike.
pub static CATALOG: [DisasterDefinition; 8] = [
    DisasterDefinition {
        name: "Mega Storm",
        description: "A massive storm with waves taller than the ship!",
        category: Category::Storm,
        effects: &[
            Effect::new(Resource::Health, -15),
            Effect::new(Resource::Sanity, -10),
            Effect::new(Resource::ShipCondition, -20),
        ],
        duration: 3,
    },
    DisasterDefinition {
        name: "Engine Fire",
        description: "Fire in the engine room! Smoke everywhere!",
        category: Category::Fire,
        effects: &[
            Effect::new(Resource::Health, -20),
            Effect::new(Resource::ShipCondition, -25),
            Effect::new(Resource::Sanity, -15),
        ],
        duration: 2,
    },
    DisasterDefinition {
        name: "Food Crisis",
        description: "Storm contaminated the food supplies!",
        category: Category::Hunger,
        effects: &[
            Effect::new(Resource::Food, -40),
            Effect::new(Resource::Health, -10),
            Effect::new(Resource::Sanity, -10),
        ],
        duration: 2,
    },
    DisasterDefinition {
        name: "Water Shortage",
        description: "Water purification system failed!",
        category: Category::Thirst,
        effects: &[
            Effect::new(Resource::Water, -50),
            Effect::new(Resource::Health, -15),
            Effect::new(Resource::Sanity, -10),
        ],
        duration: 2,
    },
    DisasterDefinition {
        name: "Pirates Attack",
        description: "Pirates are boarding the ship!",
        category: Category::Pirates,
        effects: &[
            Effect::new(Resource::Health, -25),
            Effect::new(Resource::Sanity, -20),
            Effect::new(Resource::ShipCondition, -15),
        ],
        duration: 3,
    },
    DisasterDefinition {
        name: "Crew Mutiny",
        description: "The crew is losing their minds!",
        category: Category::Mutiny,
        effects: &[
            Effect::new(Resource::Sanity, -30),
            Effect::new(Resource::Health, -10),
        ],
        duration: 2,
    },
    DisasterDefinition {
        name: "Toxic Spill",
        description: "Hazardous materials are leaking!",
        category: Category::Toxic,
        effects: &[
            Effect::new(Resource::Health, -30),
            Effect::new(Resource::Sanity, -15),
        ],
        duration: 3,
    },
    DisasterDefinition {
        name: "Navigation Failure",
        description: "All navigation systems are down!",
        category: Category::Lost,
        effects: &[
            Effect::new(Resource::Sanity, -25),
            Effect::new(Resource::Food, -20),
            Effect::new(Resource::Water, -20),
        ],
        duration: 2,
    },
];

/// Draw one disaster uniformly at random. Repeats are allowed.
#[must_use]
pub fn draw<R: Rng>(rng: &mut R) -> &'static DisasterDefinition {
    &CATALOG[rng.gen_range(0..CATALOG.len())]
}

/// Look up a catalog entry by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static DisasterDefinition> {
    CATALOG.iter().find(|d| d.name == name)
}

/// A disaster that has struck: a copy of its definition plus display state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActiveDisaster {
    /// The catalog entry.
    pub disaster: DisasterDefinition,
    /// Countdown initialised to the duration. Never decremented.
    pub timer: u8,
    /// Whether the scene still shows this disaster's effect.
    pub active: bool,
}

impl ActiveDisaster {
    /// Start showing a disaster.
    #[must_use]
    pub const fn begin(disaster: DisasterDefinition) -> Self {
        Self {
            disaster,
            timer: disaster.duration,
            active: true,
        }
    }

    /// Stop showing the disaster's visual effect.
    pub fn deactivate(&mut self) {
        self.active = false;
    }
}

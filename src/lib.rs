// Allow unwrap and unreadable literals in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::unreadable_literal))]
//! Survival: keep a cargo ship and its crew alive through 25 disasters.
//!
//! Each day a random disaster strikes and drains the crew's resources.
//! The player spends a small stock of items to patch things up between
//! disasters. Health or ship condition at zero ends the voyage.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   CLI: play (TUI) / run / batch     │
//! ├─────────────────────────────────────┤
//! │   Session (notices, banners)        │
//! │   Voyage autopilot (rayon batches)  │
//! ├─────────────────────────────────────┤
//! │   Render: HUD, scene, rasteriser    │
//! ├─────────────────────────────────────┤
//! │   Game: state, disasters, items     │
//! └─────────────────────────────────────┘
//! ```

pub mod game;
pub mod render;
pub mod session;
pub mod voyage;

// Re-export key types at crate root for convenience
pub use game::{DisasterDefinition, GameState, ItemKind, Outcome, Resource};
pub use session::{Session, SessionConfig, Trigger};
pub use voyage::{VoyageConfig, VoyageResult, VoyageStats};

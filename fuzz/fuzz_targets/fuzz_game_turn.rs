#![no_main]

//! Session fuzzer.
//!
//! Drives a play session with arbitrary input triggers and clock jumps:
//! 1. Advance, item use and restart in any order
//! 2. Notice expiry at arbitrary times
//! 3. Scene composition and rasterising of whatever state results
//!
//! After every step the game state invariants must hold.

use std::time::{Duration, Instant};

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use rand::SeedableRng;
use rand::rngs::StdRng;
use survival::game::{ItemKind, TOTAL_DISASTERS, check_invariants};
use survival::render::{Hud, Raster};
use survival::session::{Session, SessionConfig, Trigger};

/// A fuzzer-generated input.
#[derive(Arbitrary, Debug, Clone, Copy)]
enum FuzzInput {
    Advance,
    Medical,
    Repair,
    Ration,
    Water,
    Restart,
    /// Let time pass (milliseconds).
    Wait(u16),
    /// Draw a frame at this raster size.
    Draw { width: u8, height: u8 },
}

#[derive(Arbitrary, Debug)]
struct SessionInput {
    seed: u64,
    inputs: Vec<FuzzInput>,
}

fuzz_target!(|input: SessionInput| {
    let mut session = Session::new(SessionConfig::default(), StdRng::seed_from_u64(input.seed));
    let mut now = Instant::now();
    let start = now;

    for step in input.inputs.into_iter().take(200) {
        match step {
            FuzzInput::Advance => session.handle(Trigger::Advance, now),
            FuzzInput::Medical => session.handle(Trigger::Use(ItemKind::MedicalKit), now),
            FuzzInput::Repair => session.handle(Trigger::Use(ItemKind::RepairKit), now),
            FuzzInput::Ration => session.handle(Trigger::Use(ItemKind::EmergencyRation), now),
            FuzzInput::Water => session.handle(Trigger::Use(ItemKind::FreshWater), now),
            FuzzInput::Restart => session.handle(Trigger::Restart, now),
            FuzzInput::Wait(ms) => {
                now += Duration::from_millis(u64::from(ms));
                session.tick(now);
            }
            FuzzInput::Draw { width, height } => {
                let elapsed = now.duration_since(start).as_secs_f64() * 1000.0;
                let scene = session.scene(elapsed);
                let raster = Raster::render(&scene, usize::from(width), usize::from(height));
                assert_eq!(raster.width(), usize::from(width));
            }
        }

        let state = session.state();
        let violations = check_invariants(state);
        if !violations.is_empty() {
            panic!("Invariant violations: {violations:?}");
        }
        assert!(state.disasters_survived <= TOTAL_DISASTERS);

        let hud = Hud::project(state);
        assert!(hud.bars.iter().all(|b| b.value <= 100));
        if session.banner().is_some() {
            assert!(!state.alive || state.all_survived());
        }
    }
});

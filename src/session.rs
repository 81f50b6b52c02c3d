//! A play session: the game state plus everything the host shows around it.
//!
//! The session turns input triggers into simulation calls and keeps the
//! transient display state the core does not own: the notice panel with
//! its auto-hide deadline, the end-of-game banner and the window during
//! which a disaster's visual effect stays on screen.

use std::time::{Duration, Instant};

use rand::Rng;

use crate::game::{GameState, ItemKind, ItemOutcome, Outcome};
use crate::render::{Hud, Scene, render_text};

/// An input from the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// Sail on into the next disaster.
    Advance,
    /// Use one item.
    Use(ItemKind),
    /// Start a new voyage.
    Restart,
}

impl Trigger {
    /// The four item triggers, in display order.
    pub const ITEMS: [Trigger; 4] = [
        Trigger::Use(ItemKind::MedicalKit),
        Trigger::Use(ItemKind::RepairKit),
        Trigger::Use(ItemKind::EmergencyRation),
        Trigger::Use(ItemKind::FreshWater),
    ];
}

/// Timing of the transient display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// How long a disaster notice (and its visual effect) stays up.
    pub disaster_notice: Duration,
    /// How long an item confirmation stays up.
    pub item_notice: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            disaster_notice: Duration::from_secs(3),
            item_notice: Duration::from_secs(2),
        }
    }
}

/// What a notice is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    /// A disaster struck.
    Disaster,
    /// An item was used.
    Item,
}

/// A transient message panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    /// Headline.
    pub title: String,
    /// Detail text.
    pub body: String,
    /// What it is about.
    pub kind: NoticeKind,
    /// When it went up.
    pub shown_at: Instant,
    /// How long it stays up.
    pub duration: Duration,
}

impl Notice {
    /// When the notice hides itself.
    #[must_use]
    pub fn expires_at(&self) -> Instant {
        self.shown_at + self.duration
    }

    /// Whether the notice should be hidden at `now`.
    #[must_use]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at()
    }
}

/// The end-of-game panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Banner {
    /// Every disaster survived.
    Victory {
        /// Health + sanity + ship condition.
        final_score: u32,
        /// Disasters survived.
        survived: u32,
    },
    /// The crew was lost.
    Defeat {
        /// Disasters survived (including the fatal one).
        survived: u32,
        /// Day reached.
        days: u32,
    },
}

impl Banner {
    /// Headline.
    #[must_use]
    pub const fn title(&self) -> &'static str {
        match self {
            Banner::Victory { .. } => "VICTORY!",
            Banner::Defeat { .. } => "GAME OVER",
        }
    }

    /// Detail text.
    #[must_use]
    pub fn body(&self) -> String {
        match self {
            Banner::Victory {
                final_score,
                survived,
            } => format!(
                "You survived all {survived} disasters and reached safe waters!\nFinal Score: {final_score}"
            ),
            Banner::Defeat { survived, days } => {
                format!("You survived {survived} disasters over {days} days.")
            }
        }
    }
}

/// A running game and its host-side display state.
#[derive(Debug)]
pub struct Session<R> {
    state: GameState,
    rng: R,
    config: SessionConfig,
    notice: Option<Notice>,
    banner: Option<Banner>,
    disaster_until: Option<Instant>,
}

impl<R: Rng> Session<R> {
    /// Start a fresh voyage.
    #[must_use]
    pub fn new(config: SessionConfig, rng: R) -> Self {
        Self {
            state: GameState::new(),
            rng,
            config,
            notice: None,
            banner: None,
            disaster_until: None,
        }
    }

    /// Current game state.
    #[must_use]
    pub const fn state(&self) -> &GameState {
        &self.state
    }

    /// Dashboard projection of the current state.
    #[must_use]
    pub fn hud(&self) -> Hud {
        Hud::project(&self.state)
    }

    /// The notice currently shown, if any.
    #[must_use]
    pub const fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The end-of-game banner, if the game has ended.
    #[must_use]
    pub const fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }

    /// Whether the scene should shake (a disaster just struck).
    #[must_use]
    pub fn is_shaking(&self, now: Instant) -> bool {
        self.disaster_until.is_some_and(|until| now < until)
    }

    /// Compose this frame's scene.
    pub fn scene(&mut self, elapsed_ms: f64) -> Scene {
        Scene::compose(&self.state, elapsed_ms, &mut self.rng)
    }

    /// Random jitter in `[-max, max]`, for shaking the view.
    pub fn jitter(&mut self, max: i32) -> i32 {
        if max <= 0 {
            return 0;
        }
        self.rng.gen_range(-max..=max)
    }

    /// Handle one player input.
    pub fn handle(&mut self, trigger: Trigger, now: Instant) {
        match trigger {
            Trigger::Restart => self.restart(),
            Trigger::Advance | Trigger::Use(_) if self.banner.is_some() => {
                log::debug!("ignoring {trigger:?}: voyage is over");
            }
            Trigger::Advance => self.advance(now),
            Trigger::Use(kind) => self.use_item(kind, now),
        }
    }

    /// Expire timed display state.
    pub fn tick(&mut self, now: Instant) {
        if self.notice.as_ref().is_some_and(|n| n.is_expired(now)) {
            self.notice = None;
        }
        if self.disaster_until.is_some_and(|until| now >= until) {
            self.state.clear_disaster_visual();
            self.disaster_until = None;
        }
    }

    fn restart(&mut self) {
        log::info!("new voyage");
        self.state.reset();
        self.notice = None;
        self.banner = None;
        self.disaster_until = None;
    }

    fn advance(&mut self, now: Instant) {
        match self.state.advance(&mut self.rng) {
            Outcome::Ignored => {}
            Outcome::Victory { final_score } => {
                self.banner = Some(Banner::Victory {
                    final_score,
                    survived: self.state.disasters_survived,
                });
            }
            Outcome::Struck { disaster } => {
                self.show_disaster(disaster.name, disaster.description, now);
            }
            Outcome::Defeated { disaster } => {
                self.show_disaster(disaster.name, disaster.description, now);
                self.banner = Some(Banner::Defeat {
                    survived: self.state.disasters_survived,
                    days: self.state.day,
                });
            }
        }
        if self.banner.is_some() && log::log_enabled!(log::Level::Info) {
            log::info!("voyage over\n{}", render_text(&self.state));
        }
    }

    fn show_disaster(&mut self, name: &str, description: &str, now: Instant) {
        self.notice = Some(Notice {
            title: name.to_string(),
            body: format!("{description}\nEffects applied to your ship and crew..."),
            kind: NoticeKind::Disaster,
            shown_at: now,
            duration: self.config.disaster_notice,
        });
        self.disaster_until = Some(now + self.config.disaster_notice);
    }

    fn use_item(&mut self, kind: ItemKind, now: Instant) {
        if let ItemOutcome::Used(kind) = self.state.use_item(kind) {
            self.notice = Some(Notice {
                title: String::new(),
                body: format!("Used {kind}"),
                kind: NoticeKind::Item,
                shown_at: now,
                duration: self.config.item_notice,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Resource, TOTAL_DISASTERS};
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn session() -> Session<StdRng> {
        Session::new(SessionConfig::default(), StdRng::seed_from_u64(11))
    }

    #[test]
    fn test_advance_shows_disaster_notice() {
        let mut s = session();
        let now = Instant::now();
        s.handle(Trigger::Advance, now);

        let notice = s.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Disaster);
        assert_eq!(notice.duration, Duration::from_secs(3));
        assert!(notice.body.contains("Effects applied"));
        assert_eq!(s.state().disasters_survived, 1);
        assert!(s.state().disaster_active());
        assert!(s.is_shaking(now));
    }

    #[test]
    fn test_disaster_visual_clears_after_notice() {
        let mut s = session();
        let now = Instant::now();
        s.handle(Trigger::Advance, now);

        s.tick(now + Duration::from_millis(2999));
        assert!(s.notice().is_some());
        assert!(s.state().disaster_active());

        let later = now + Duration::from_secs(3);
        s.tick(later);
        assert!(s.notice().is_none());
        assert!(!s.state().disaster_active());
        assert!(!s.is_shaking(later));
        assert!(s.state().current_disaster.is_some());
    }

    #[test]
    fn test_item_notice_does_not_end_disaster_early() {
        let mut s = session();
        let now = Instant::now();
        s.handle(Trigger::Advance, now);
        s.handle(
            Trigger::Use(ItemKind::FreshWater),
            now + Duration::from_millis(1500),
        );

        let notice = s.notice().unwrap();
        assert_eq!(notice.kind, NoticeKind::Item);
        assert_eq!(notice.body, "Used fresh water");

        s.tick(now + Duration::from_millis(2500));
        assert!(s.state().disaster_active());
        s.tick(now + Duration::from_secs(3));
        assert!(!s.state().disaster_active());
        assert!(s.notice().is_some());
        s.tick(now + Duration::from_millis(3500));
        assert!(s.notice().is_none());
    }

    #[test]
    fn test_empty_item_shows_nothing() {
        let mut s = session();
        let now = Instant::now();
        s.handle(Trigger::Use(ItemKind::MedicalKit), now);
        s.tick(now + Duration::from_secs(5));
        s.handle(Trigger::Use(ItemKind::MedicalKit), now + Duration::from_secs(5));

        assert!(s.notice().is_none());
        assert_eq!(s.state().inventory.medical_kits, 0);
    }

    #[test]
    fn test_defeat_banner_and_restart() {
        let mut s = session();
        let now = Instant::now();
        while s.banner().is_none() {
            s.handle(Trigger::Advance, now);
        }

        match s.banner() {
            Some(Banner::Defeat { survived, days }) => {
                assert_eq!(*days, survived + 1);
                assert!(!s.state().alive);
            }
            Some(Banner::Victory { .. }) => assert!(s.state().alive),
            None => unreachable!(),
        }

        let frozen = *s.state();
        s.handle(Trigger::Advance, now);
        s.handle(Trigger::Use(ItemKind::FreshWater), now);
        assert_eq!(s.state(), &frozen);

        s.handle(Trigger::Restart, now);
        assert!(s.banner().is_none());
        assert!(s.notice().is_none());
        assert_eq!(s.state(), &GameState::new());
    }

    #[test]
    fn test_victory_banner() {
        let mut s = session();
        let now = Instant::now();
        s.state.disasters_survived = TOTAL_DISASTERS;
        s.state.day = TOTAL_DISASTERS + 1;
        s.state.levels.sanity = 40;

        s.handle(Trigger::Advance, now);
        let banner = s.banner().copied().unwrap();
        assert_eq!(
            banner,
            Banner::Victory {
                final_score: 240,
                survived: TOTAL_DISASTERS
            }
        );
        assert_eq!(banner.title(), "VICTORY!");
        assert!(banner.body().contains("Final Score: 240"));
        assert!(s.notice().is_none());
    }

    #[test]
    fn test_banner_text() {
        let defeat = Banner::Defeat {
            survived: 7,
            days: 8,
        };
        assert_eq!(defeat.title(), "GAME OVER");
        assert_eq!(defeat.body(), "You survived 7 disasters over 8 days.");
    }

    #[test]
    fn test_hud_follows_session() {
        let mut s = session();
        let now = Instant::now();
        s.handle(Trigger::Advance, now);
        let hud = s.hud();
        assert_eq!(hud.progress(), "1/25");
        assert!(hud.bar(Resource::Health).value <= 100);
    }

    #[test]
    fn test_jitter_bounds() {
        let mut s = session();
        assert_eq!(s.jitter(0), 0);
        for _ in 0..100 {
            let j = s.jitter(2);
            assert!((-2..=2).contains(&j));
        }
    }
}

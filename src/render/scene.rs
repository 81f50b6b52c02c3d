//! Scene composition: the ocean, the ship and the active disaster's effect.
//!
//! A [`Scene`] is a flat list of shapes in a fixed 800×600 canvas with the
//! origin top-left and y pointing down. It is rebuilt from scratch every
//! frame; random particles are redrawn at new positions each time and no
//! particle outlives the frame that drew it.

// Scene maths works in f64 canvas units.
#![allow(clippy::cast_precision_loss)]

use rand::Rng;

use crate::game::{Category, GameState};

/// Canvas width in scene units.
pub const CANVAS_WIDTH: f64 = 800.0;

/// Canvas height in scene units.
pub const CANVAS_HEIGHT: f64 = 600.0;

/// Ship sprite width.
pub const SHIP_WIDTH: f64 = 200.0;

/// Ship sprite height.
pub const SHIP_HEIGHT: f64 = 80.0;

/// Ship condition below which the damage tint is drawn.
pub const DAMAGE_THRESHOLD: u8 = 50;

const WAVE_COUNT: u32 = 5;
const WAVE_BASE_Y: f64 = 400.0;
const WAVE_STEP_X: f64 = 20.0;
const RAIN_DROPS: u32 = 50;
const LIGHTNING_CHANCE: f64 = 0.02;
const FIRE_PARTICLES: u32 = 20;
const TOXIC_BUBBLES: u32 = 10;

/// A colour with straight (non-premultiplied) alpha in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rgba {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Opacity.
    pub a: f64,
}

impl Rgba {
    /// Fully opaque colour.
    #[must_use]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b, a: 1.0 }
    }

    /// Colour with the given opacity.
    #[must_use]
    pub const fn rgba(r: u8, g: u8, b: u8, a: f64) -> Self {
        Self { r, g, b, a }
    }

    /// Same colour, opacity scaled by `factor`.
    #[must_use]
    pub fn fade(self, factor: f64) -> Self {
        Self {
            a: (self.a * factor).clamp(0.0, 1.0),
            ..self
        }
    }
}

/// A point in scene units.
pub type Point = (f64, f64);

/// Axis-aligned rectangle in scene units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Left edge.
    pub x: f64,
    /// Top edge.
    pub y: f64,
    /// Width.
    pub width: f64,
    /// Height.
    pub height: f64,
}

impl Rect {
    /// Create a rectangle.
    #[must_use]
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    fn offset(self, dx: f64, dy: f64) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

/// One drawing primitive.
#[derive(Debug, Clone, PartialEq)]
pub enum Shape {
    /// Vertical gradient over the whole canvas.
    Gradient {
        /// Colour at the top edge.
        top: Rgba,
        /// Colour at the bottom edge.
        bottom: Rgba,
    },
    /// Translucent colour over the whole canvas.
    Wash(Rgba),
    /// Filled rectangle.
    Fill {
        /// Area covered.
        rect: Rect,
        /// Fill colour.
        color: Rgba,
    },
    /// Filled polygon.
    Polygon {
        /// Vertices in order.
        points: Vec<Point>,
        /// Fill colour.
        color: Rgba,
    },
    /// Open stroked path.
    Polyline {
        /// Vertices in order.
        points: Vec<Point>,
        /// Stroke colour.
        color: Rgba,
    },
    /// Straight stroke.
    Line {
        /// Start.
        from: Point,
        /// End.
        to: Point,
        /// Stroke colour.
        color: Rgba,
    },
    /// Filled circle.
    Disc {
        /// Centre.
        center: Point,
        /// Radius.
        radius: f64,
        /// Fill colour.
        color: Rgba,
    },
}

const OCEAN_TOP: Rgba = Rgba::rgb(0x1a, 0x29, 0x80);
const OCEAN_BOTTOM: Rgba = Rgba::rgb(0x26, 0xd0, 0xce);
const WAVE: Rgba = Rgba::rgba(255, 255, 255, 0.3);
const HULL: Rgba = Rgba::rgb(0x8B, 0x45, 0x13);
const DECK: Rgba = Rgba::rgb(0xDE, 0xB8, 0x87);
const CABIN: Rgba = Rgba::rgb(0xA5, 0x2A, 0x2A);
const CONTAINERS: [(f64, Rgba); 3] = [
    (40.0, Rgba::rgb(0xFF, 0x6B, 0x35)),
    (70.0, Rgba::rgb(0x4E, 0xCD, 0xC4)),
    (130.0, Rgba::rgb(0x45, 0xB7, 0xD1)),
];
const DAMAGE: Rgba = Rgba::rgba(231, 76, 60, 0.3);
const RAIN: Rgba = Rgba::rgba(255, 255, 255, 0.6);
const LIGHTNING: Rgba = Rgba::rgba(255, 255, 255, 0.3);
const PIRATE_HULL: Rgba = Rgba::rgb(0x8B, 0x00, 0x00);
const BLACK: Rgba = Rgba::rgb(0, 0, 0);
const WHITE: Rgba = Rgba::rgb(255, 255, 255);
const TOXIC_FOG: Rgba = Rgba::rgba(50, 200, 50, 0.2);

/// Opacity of the ship sprite for a given condition.
#[must_use]
pub fn ship_alpha(ship_condition: u8) -> f64 {
    0.5 + f64::from(ship_condition) / 100.0 * 0.5
}

/// Width of the red damage tint, if the ship is damaged enough to show one.
#[must_use]
pub fn damage_width(ship_condition: u8) -> Option<f64> {
    (ship_condition < DAMAGE_THRESHOLD).then(|| SHIP_WIDTH * f64::from(ship_condition) / 100.0)
}

/// Top-left corner of the ship sprite.
#[must_use]
pub fn ship_origin() -> Point {
    (
        CANVAS_WIDTH / 2.0 - SHIP_WIDTH / 2.0,
        CANVAS_HEIGHT / 2.0 - SHIP_HEIGHT / 2.0,
    )
}

/// One frame's worth of shapes, in paint order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Scene {
    /// Shapes, back to front.
    pub shapes: Vec<Shape>,
}

impl Scene {
    /// Compose the frame for `state` at `elapsed_ms` wall-clock milliseconds.
    #[must_use]
    pub fn compose<R: Rng>(state: &GameState, elapsed_ms: f64, rng: &mut R) -> Self {
        let mut scene = Self::default();
        scene.ocean(elapsed_ms);
        scene.ship(state.levels.ship_condition);
        if let Some(current) = state.current_disaster.filter(|d| d.active) {
            scene.disaster(current.disaster.category, elapsed_ms, rng);
        }
        scene
    }

    /// Number of shapes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether nothing was drawn.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }

    fn push(&mut self, shape: Shape) {
        self.shapes.push(shape);
    }

    fn ocean(&mut self, elapsed_ms: f64) {
        self.push(Shape::Gradient {
            top: OCEAN_TOP,
            bottom: OCEAN_BOTTOM,
        });

        let phase = elapsed_ms * 0.001;
        for i in 0..WAVE_COUNT {
            let base = WAVE_BASE_Y + f64::from(i) * 10.0;
            let mut points = vec![(0.0, base)];
            let mut x = 0.0;
            while x < CANVAS_WIDTH {
                points.push((x, base + ((x + phase) * 0.1).sin() * 5.0));
                x += WAVE_STEP_X;
            }
            self.push(Shape::Polyline {
                points,
                color: WAVE,
            });
        }
    }

    fn ship(&mut self, ship_condition: u8) {
        let (ox, oy) = ship_origin();
        let alpha = ship_alpha(ship_condition);

        self.push(Shape::Polygon {
            points: vec![
                (ox + 20.0, oy + 40.0),
                (ox + 180.0, oy + 40.0),
                (ox + 160.0, oy + 60.0),
                (ox + 40.0, oy + 60.0),
            ],
            color: HULL.fade(alpha),
        });
        self.push(Shape::Fill {
            rect: Rect::new(30.0, 20.0, 140.0, 20.0).offset(ox, oy),
            color: DECK.fade(alpha),
        });
        self.push(Shape::Fill {
            rect: Rect::new(100.0, 10.0, 40.0, 10.0).offset(ox, oy),
            color: CABIN.fade(alpha),
        });
        for (x, color) in CONTAINERS {
            self.push(Shape::Fill {
                rect: Rect::new(x, 15.0, 20.0, 15.0).offset(ox, oy),
                color: color.fade(alpha),
            });
        }

        if let Some(width) = damage_width(ship_condition) {
            self.push(Shape::Fill {
                rect: Rect::new(ox, oy, width, SHIP_HEIGHT),
                color: DAMAGE,
            });
        }
    }

    fn disaster<R: Rng>(&mut self, category: Category, elapsed_ms: f64, rng: &mut R) {
        match category {
            Category::Storm => self.storm(elapsed_ms, rng),
            Category::Fire => self.fire(rng),
            Category::Pirates => self.pirates(),
            Category::Toxic => self.toxic(rng),
            // No distinct visual for these.
            Category::Hunger | Category::Thirst | Category::Mutiny | Category::Lost => {}
        }
    }

    fn storm<R: Rng>(&mut self, elapsed_ms: f64, rng: &mut R) {
        for i in 0..RAIN_DROPS {
            let x = rng.gen_range(0.0..CANVAS_WIDTH);
            let y = (elapsed_ms * 0.1 + f64::from(i) * 10.0) % CANVAS_HEIGHT;
            self.push(Shape::Line {
                from: (x, y),
                to: (x + 2.0, y + 10.0),
                color: RAIN,
            });
        }

        if rng.gen_bool(LIGHTNING_CHANCE) {
            self.push(Shape::Wash(LIGHTNING));
        }
    }

    fn fire<R: Rng>(&mut self, rng: &mut R) {
        for _ in 0..FIRE_PARTICLES {
            let x = 400.0 + rng.gen_range(0.0..100.0);
            let y = 200.0 + rng.gen_range(0.0..50.0);

            self.push(Shape::Disc {
                center: (x, y),
                radius: rng.gen_range(0.0..20.0) + 5.0,
                color: Rgba::rgba(100, 100, 100, rng.gen_range(0.0..0.5)),
            });

            let green = 100 + rng.gen_range(0..100u8);
            self.push(Shape::Disc {
                center: (x, y + 10.0),
                radius: rng.gen_range(0.0..15.0) + 5.0,
                color: Rgba::rgba(255, green, 0, rng.gen_range(0.0..0.7)),
            });
        }
    }

    fn pirates(&mut self) {
        self.push(Shape::Fill {
            rect: Rect::new(50.0, 100.0, 120.0, 40.0),
            color: PIRATE_HULL,
        });
        self.push(Shape::Fill {
            rect: Rect::new(80.0, 80.0, 60.0, 20.0),
            color: PIRATE_HULL,
        });

        // Jolly Roger
        self.push(Shape::Fill {
            rect: Rect::new(140.0, 60.0, 2.0, 40.0),
            color: BLACK,
        });
        self.push(Shape::Fill {
            rect: Rect::new(142.0, 60.0, 30.0, 30.0),
            color: WHITE,
        });
        self.push(Shape::Disc {
            center: (157.0, 70.0),
            radius: 8.0,
            color: BLACK,
        });
    }

    fn toxic<R: Rng>(&mut self, rng: &mut R) {
        self.push(Shape::Wash(TOXIC_FOG));

        for _ in 0..TOXIC_BUBBLES {
            let x = rng.gen_range(0.0..CANVAS_WIDTH);
            let y = rng.gen_range(0.0..CANVAS_HEIGHT);
            self.push(Shape::Disc {
                center: (x, y),
                radius: rng.gen_range(0.0..15.0) + 5.0,
                color: Rgba::rgba(50, 200, 50, rng.gen_range(0.0..0.5)),
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::find;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    const BASE_SHAPES: usize = 1 + WAVE_COUNT as usize + 6;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    fn struck(name: &str) -> GameState {
        let mut game = GameState::new();
        game.strike(find(name).unwrap());
        // Keep the ship intact so only the disaster effect varies.
        game.levels.ship_condition = 100;
        game
    }

    #[test]
    fn test_ship_alpha() {
        assert!(approx(ship_alpha(100), 1.0));
        assert!(approx(ship_alpha(50), 0.75));
        assert!(approx(ship_alpha(0), 0.5));
    }

    #[test]
    fn test_damage_width() {
        assert_eq!(damage_width(50), None);
        assert_eq!(damage_width(100), None);
        assert!(approx(damage_width(49).unwrap(), 98.0));
        assert!(approx(damage_width(10).unwrap(), 20.0));
        assert!(approx(damage_width(0).unwrap(), 0.0));
    }

    #[test]
    fn test_calm_scene() {
        let game = GameState::new();
        let mut rng = StdRng::seed_from_u64(1);
        let scene = Scene::compose(&game, 0.0, &mut rng);

        assert_eq!(scene.len(), BASE_SHAPES);
        assert!(matches!(scene.shapes[0], Shape::Gradient { .. }));
    }

    #[test]
    fn test_damaged_ship_gets_tint() {
        let mut game = GameState::new();
        game.levels.ship_condition = 30;
        let mut rng = StdRng::seed_from_u64(1);
        let scene = Scene::compose(&game, 0.0, &mut rng);

        assert_eq!(scene.len(), BASE_SHAPES + 1);
        match scene.shapes.last() {
            Some(Shape::Fill { rect, color }) => {
                assert!(approx(rect.width, 60.0));
                assert!(approx(rect.height, SHIP_HEIGHT));
                assert_eq!(*color, DAMAGE);
            }
            other => panic!("expected damage tint, got {other:?}"),
        }
    }

    #[test]
    fn test_waves_move_with_time() {
        let game = GameState::new();
        let mut rng = StdRng::seed_from_u64(1);
        let early = Scene::compose(&game, 0.0, &mut rng);
        let late = Scene::compose(&game, 5000.0, &mut rng);
        assert_ne!(early.shapes[1], late.shapes[1]);
    }

    #[test]
    fn test_storm_draws_rain() {
        let game = struck("Mega Storm");
        let mut rng = StdRng::seed_from_u64(2);
        let scene = Scene::compose(&game, 0.0, &mut rng);

        let drops = scene
            .shapes
            .iter()
            .filter(|s| matches!(s, Shape::Line { .. }))
            .count();
        assert_eq!(drops, RAIN_DROPS as usize);
    }

    #[test]
    fn test_storm_lightning_is_rare() {
        let game = struck("Mega Storm");
        let mut rng = StdRng::seed_from_u64(3);
        let flashes = (0..2000)
            .filter(|_| {
                Scene::compose(&game, 0.0, &mut rng)
                    .shapes
                    .iter()
                    .any(|s| matches!(s, Shape::Wash(_)))
            })
            .count();
        assert!(flashes > 0 && flashes < 200, "{flashes} flashes");
    }

    #[test]
    fn test_fire_particles_within_plume() {
        let game = struck("Engine Fire");
        let mut rng = StdRng::seed_from_u64(4);
        let scene = Scene::compose(&game, 0.0, &mut rng);

        let discs: Vec<_> = scene
            .shapes
            .iter()
            .filter_map(|s| match s {
                Shape::Disc { center, radius, .. } => Some((*center, *radius)),
                _ => None,
            })
            .collect();
        assert_eq!(discs.len(), FIRE_PARTICLES as usize * 2);
        for ((x, y), r) in discs {
            assert!((400.0..500.0).contains(&x));
            assert!((200.0..260.0).contains(&y));
            assert!((5.0..25.0).contains(&r));
        }
    }

    #[test]
    fn test_pirates_are_static() {
        let game = struck("Pirates Attack");
        let mut rng = StdRng::seed_from_u64(5);
        let a = Scene::compose(&game, 0.0, &mut rng);
        let b = Scene::compose(&game, 0.0, &mut rng);
        assert_eq!(a, b);
        assert_eq!(a.len(), BASE_SHAPES + 5);
    }

    #[test]
    fn test_toxic_washes_green() {
        let game = struck("Toxic Spill");
        let mut rng = StdRng::seed_from_u64(6);
        let scene = Scene::compose(&game, 0.0, &mut rng);

        assert_eq!(scene.shapes[BASE_SHAPES], Shape::Wash(TOXIC_FOG));
        assert_eq!(scene.len(), BASE_SHAPES + 1 + TOXIC_BUBBLES as usize);
    }

    #[test]
    fn test_categories_without_visual() {
        for name in ["Food Crisis", "Water Shortage", "Crew Mutiny", "Navigation Failure"] {
            let game = struck(name);
            let mut rng = StdRng::seed_from_u64(7);
            assert_eq!(Scene::compose(&game, 0.0, &mut rng).len(), BASE_SHAPES, "{name}");
        }
    }

    #[test]
    fn test_inactive_disaster_not_drawn() {
        let mut game = struck("Engine Fire");
        game.clear_disaster_visual();
        let mut rng = StdRng::seed_from_u64(8);
        assert_eq!(Scene::compose(&game, 0.0, &mut rng).len(), BASE_SHAPES);
    }
}

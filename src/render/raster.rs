//! Software rasteriser for [`Scene`]s.
//!
//! Paints scene shapes into a small RGB pixel grid with alpha blending.
//! The grid is sized to whatever the host can show (for the terminal: one
//! column per cell, two rows per cell) and the 800×600 scene is scaled to
//! fit.

// Pixel maths converts between f64 scene units and usize pixel indices.
#![allow(
    clippy::cast_possible_truncation,
    clippy::cast_precision_loss,
    clippy::cast_sign_loss
)]

use crate::render::scene::{CANVAS_HEIGHT, CANVAS_WIDTH, Point, Rect, Rgba, Scene, Shape};

/// An opaque RGB pixel.
pub type Pixel = [u8; 3];

/// A fixed-size RGB framebuffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    width: usize,
    height: usize,
    pixels: Vec<Pixel>,
}

impl Raster {
    /// Create a black raster.
    #[must_use]
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            pixels: vec![[0, 0, 0]; width * height],
        }
    }

    /// Render a whole scene into a fresh raster.
    #[must_use]
    pub fn render(scene: &Scene, width: usize, height: usize) -> Self {
        let mut raster = Self::new(width, height);
        raster.paint(scene);
        raster
    }

    /// Width in pixels.
    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    /// Height in pixels.
    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    /// Pixel at `(x, y)`, if in bounds.
    #[must_use]
    pub fn pixel(&self, x: usize, y: usize) -> Option<Pixel> {
        if x < self.width && y < self.height {
            Some(self.pixels[y * self.width + x])
        } else {
            None
        }
    }

    /// Paint every shape of `scene`, back to front.
    pub fn paint(&mut self, scene: &Scene) {
        for shape in &scene.shapes {
            self.draw(shape);
        }
    }

    fn scale(&self) -> (f64, f64) {
        (
            self.width as f64 / CANVAS_WIDTH,
            self.height as f64 / CANVAS_HEIGHT,
        )
    }

    fn draw(&mut self, shape: &Shape) {
        match shape {
            Shape::Gradient { top, bottom } => self.gradient(*top, *bottom),
            Shape::Wash(color) => self.wash(*color),
            Shape::Fill { rect, color } => self.fill_rect(*rect, *color),
            Shape::Polygon { points, color } => self.fill_polygon(points, *color),
            Shape::Polyline { points, color } => {
                for pair in points.windows(2) {
                    self.stroke(pair[0], pair[1], *color);
                }
            }
            Shape::Line { from, to, color } => self.stroke(*from, *to, *color),
            Shape::Disc {
                center,
                radius,
                color,
            } => self.disc(*center, *radius, *color),
        }
    }

    fn blend(&mut self, x: usize, y: usize, color: Rgba) {
        if x >= self.width || y >= self.height {
            return;
        }
        let idx = y * self.width + x;
        let under = self.pixels[idx];
        let a = color.a.clamp(0.0, 1.0);
        let mix = |c: u8, u: u8| (f64::from(c) * a + f64::from(u) * (1.0 - a)).round() as u8;
        self.pixels[idx] = [
            mix(color.r, under[0]),
            mix(color.g, under[1]),
            mix(color.b, under[2]),
        ];
    }

    fn gradient(&mut self, top: Rgba, bottom: Rgba) {
        let rows = self.height.max(1) as f64;
        for y in 0..self.height {
            let t = (y as f64 + 0.5) / rows;
            let lerp =
                |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
            let color = Rgba::rgba(
                lerp(top.r, bottom.r),
                lerp(top.g, bottom.g),
                lerp(top.b, bottom.b),
                top.a + (bottom.a - top.a) * t,
            );
            for x in 0..self.width {
                self.blend(x, y, color);
            }
        }
    }

    fn wash(&mut self, color: Rgba) {
        for y in 0..self.height {
            for x in 0..self.width {
                self.blend(x, y, color);
            }
        }
    }

    /// Pixel span covering `[start, end)` scene units along one axis.
    fn span(start: f64, end: f64, scale: f64, limit: usize) -> (usize, usize) {
        let lo = (start * scale).floor().max(0.0);
        let hi = (end * scale).ceil().min(limit as f64);
        if hi <= lo {
            return (0, 0);
        }
        (lo as usize, hi as usize)
    }

    fn fill_rect(&mut self, rect: Rect, color: Rgba) {
        if rect.width <= 0.0 || rect.height <= 0.0 {
            return;
        }
        let (sx, sy) = self.scale();
        let (x0, x1) = Self::span(rect.x, rect.x + rect.width, sx, self.width);
        let (y0, y1) = Self::span(rect.y, rect.y + rect.height, sy, self.height);
        for y in y0..y1 {
            for x in x0..x1 {
                self.blend(x, y, color);
            }
        }
    }

    fn fill_polygon(&mut self, points: &[Point], color: Rgba) {
        if points.len() < 3 {
            return;
        }
        let (sx, sy) = self.scale();
        let mut crossings = Vec::with_capacity(points.len());

        for py in 0..self.height {
            let yc = (py as f64 + 0.5) / sy;
            crossings.clear();
            for (i, &(xa, ya)) in points.iter().enumerate() {
                let (xb, yb) = points[(i + 1) % points.len()];
                if (ya <= yc && yb > yc) || (yb <= yc && ya > yc) {
                    crossings.push(xa + (yc - ya) / (yb - ya) * (xb - xa));
                }
            }
            crossings.sort_by(f64::total_cmp);
            for pair in crossings.chunks_exact(2) {
                let (x0, x1) = Self::span(pair[0], pair[1], sx, self.width);
                for px in x0..x1 {
                    self.blend(px, py, color);
                }
            }
        }
    }

    fn stroke(&mut self, from: Point, to: Point, color: Rgba) {
        let (sx, sy) = self.scale();
        let (x0, y0) = (from.0 * sx, from.1 * sy);
        let (x1, y1) = (to.0 * sx, to.1 * sy);
        let steps = (x1 - x0).abs().max((y1 - y0).abs()).ceil().max(1.0) as usize;

        let mut last = None;
        for i in 0..=steps {
            let t = i as f64 / steps as f64;
            let x = (x0 + (x1 - x0) * t).floor();
            let y = (y0 + (y1 - y0) * t).floor();
            if x < 0.0 || y < 0.0 {
                continue;
            }
            let px = (x as usize, y as usize);
            if last != Some(px) {
                self.blend(px.0, px.1, color);
                last = Some(px);
            }
        }
    }

    fn disc(&mut self, center: Point, radius: f64, color: Rgba) {
        if radius <= 0.0 {
            return;
        }
        let (sx, sy) = self.scale();
        let (x0, x1) = Self::span(center.0 - radius, center.0 + radius, sx, self.width);
        let (y0, y1) = Self::span(center.1 - radius, center.1 + radius, sy, self.height);

        let mut painted = false;
        for py in y0..y1 {
            let dy = (py as f64 + 0.5) / sy - center.1;
            for px in x0..x1 {
                let dx = (px as f64 + 0.5) / sx - center.0;
                if dx * dx + dy * dy <= radius * radius {
                    self.blend(px, py, color);
                    painted = true;
                }
            }
        }

        // Smaller than a pixel: still leave a mark.
        if !painted && center.0 >= 0.0 && center.1 >= 0.0 {
            self.blend((center.0 * sx) as usize, (center.1 * sy) as usize, color);
        }
    }
}

//! Half-block widget that shows a [`Raster`] in the terminal.
//!
//! Each cell is `▀` with the foreground set to the upper pixel and the
//! background to the lower one, so a `w × h` area shows a `w × 2h` raster.

// Cell coordinates are u16, raster coordinates usize, shake offsets i32
#![allow(clippy::cast_sign_loss, clippy::cast_possible_wrap)]

use ratatui::{buffer::Buffer, layout::Rect, style::Color, widgets::Widget};
use survival::render::{Pixel, Raster};

const UPPER_HALF: &str = "▀";

/// Pixel size of the raster that fills `area`.
pub(super) fn raster_size(area: Rect) -> (usize, usize) {
    (usize::from(area.width), usize::from(area.height) * 2)
}

/// Paints a raster, optionally shifted by a few pixels.
#[derive(Debug, Clone, Copy)]
pub(super) struct RasterView<'a> {
    raster: &'a Raster,
    shift: (i32, i32),
}

impl<'a> RasterView<'a> {
    pub(super) const fn new(raster: &'a Raster) -> Self {
        Self {
            raster,
            shift: (0, 0),
        }
    }

    /// Shift the picture right/down by `(dx, dy)` pixels.
    pub(super) const fn shifted(mut self, dx: i32, dy: i32) -> Self {
        self.shift = (dx, dy);
        self
    }

    /// Source pixel for raster position `(x, y)` after shifting.
    fn sample(&self, x: usize, y: usize) -> Pixel {
        let sx = x as i32 - self.shift.0;
        let sy = y as i32 - self.shift.1;
        let clamp = |v: i32, len: usize| v.clamp(0, len.saturating_sub(1) as i32) as usize;
        self.raster
            .pixel(clamp(sx, self.raster.width()), clamp(sy, self.raster.height()))
            .unwrap_or([0, 0, 0])
    }
}

const fn color([r, g, b]: Pixel) -> Color {
    Color::Rgb(r, g, b)
}

impl Widget for RasterView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        for row in 0..area.height {
            for col in 0..area.width {
                let x = usize::from(col);
                let y = usize::from(row) * 2;
                let top = self.sample(x, y);
                let bottom = self.sample(x, y + 1);
                if let Some(cell) = buf.cell_mut((area.x + col, area.y + row)) {
                    cell.set_symbol(UPPER_HALF)
                        .set_fg(color(top))
                        .set_bg(color(bottom));
                }
            }
        }
    }
}

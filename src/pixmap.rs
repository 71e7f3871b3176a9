//! Downscaled RGBA images drawn with half-block cells

use ratatui::{
    buffer::Buffer,
    layout::{Position, Rect},
    style::Color,
    widgets::Widget,
};
use serde::{Deserialize, Serialize};

/// Longest edge kept after decoding. Terminal cells never need more.
pub const MAX_EDGE: u32 = 96;
const UPPER_HALF: &str = "\u{2580}";
const ALPHA_CUTOFF: u8 = 128;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Pixmap {
    pub width: u32,
    pub height: u32,
    /// Row-major RGBA
    pub pixels: Vec<u8>,
}

impl Pixmap {
    pub fn decode(bytes: &[u8]) -> Result<Self, image::ImageError> {
        let image = image::load_from_memory(bytes)?;
        let rgba = image.thumbnail(MAX_EDGE, MAX_EDGE).to_rgba8();
        let (width, height) = rgba.dimensions();
        Ok(Self {
            width,
            height,
            pixels: rgba.into_raw(),
        })
    }

    /// Pixel at (x, y), `None` when out of range or transparent.
    pub fn rgb(&self, x: u32, y: u32) -> Option<(u8, u8, u8)> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let idx = ((y * self.width + x) * 4) as usize;
        let px = self.pixels.get(idx..idx + 4)?;
        if px[3] < ALPHA_CUTOFF {
            return None;
        }
        Some((px[0], px[1], px[2]))
    }

    /// Cells (cols, rows) within `max_cols` x `max_rows` keeping the aspect ratio.
    /// One cell holds two vertical pixels.
    pub fn fit(&self, max_cols: u16, max_rows: u16) -> (u16, u16) {
        if self.width == 0 || self.height == 0 || max_cols == 0 || max_rows == 0 {
            return (0, 0);
        }
        let scale_x = f64::from(max_cols) / f64::from(self.width);
        let scale_y = f64::from(max_rows) * 2.0 / f64::from(self.height);
        let scale = scale_x.min(scale_y);
        let cols = (f64::from(self.width) * scale).round().max(1.0) as u16;
        let rows = (f64::from(self.height) * scale / 2.0).round().max(1.0) as u16;
        (cols.min(max_cols), rows.min(max_rows))
    }
}

/// Renders a pixmap centered in its area.
pub struct PixmapView<'a> {
    pub pixmap: &'a Pixmap,
    pub background: Color,
}

impl Widget for PixmapView<'_> {
    fn render(self, area: Rect, buf: &mut Buffer) {
        let (cols, rows) = self.pixmap.fit(area.width, area.height);
        if cols == 0 || rows == 0 {
            return;
        }
        let left = area.x + (area.width - cols) / 2;
        let top = area.y + (area.height - rows) / 2;
        let sample = |col: u16, sub_row: u32| {
            let x = u32::from(col) * self.pixmap.width / u32::from(cols);
            let y = sub_row * self.pixmap.height / (u32::from(rows) * 2);
            self.pixmap
                .rgb(x, y)
                .map(|(r, g, b)| Color::Rgb(r, g, b))
                .unwrap_or(self.background)
        };
        for row in 0..rows {
            for col in 0..cols {
                let upper = sample(col, u32::from(row) * 2);
                let lower = sample(col, u32::from(row) * 2 + 1);
                if let Some(cell) = buf.cell_mut(Position::new(left + col, top + row)) {
                    cell.set_symbol(UPPER_HALF).set_fg(upper).set_bg(lower);
                }
            }
        }
    }
}

use embedded_graphics::Drawable;
use embedded_graphics::geometry::Point;
use embedded_graphics::mono_font::{MonoFont, MonoTextStyle, ascii};
use embedded_graphics::text::{Baseline, Text};

use crate::raster::color::Color;
use crate::raster::surface::Surface;

/// Bitmap font used by the drawing functions.
///
/// `y` coordinates passed to [`Font::draw_glyph`] address the baseline; glyphs extend
/// [`Font::baseline`] pixels above it and `height - baseline` below.
pub trait Font: Send + Sync + std::fmt::Debug {
    /// Horizontal advance of `ch` in pixels.
    fn character_width(&self, ch: char) -> i32;
    /// Line height in pixels.
    fn height(&self) -> i32;
    /// Ascent: distance from the top of the line box to the baseline.
    fn baseline(&self) -> i32;
    /// Draw `ch` with its origin at `(x, y)` on the baseline. Returns the advance.
    fn draw_glyph(&self, surface: &mut Surface, x: i32, y: i32, color: Color, ch: char) -> i32;
}

/// Fixed-cell font that draws every visible character as a filled cell.
///
/// Text is not legible, but widths and lit areas are exact for any cell size.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct BlockFont {
    cell_width: i32,
    ascent: i32,
    descent: i32,
}

impl BlockFont {
    /// Cells of `cell_width x ascent` pixels with a `descent` below the baseline.
    pub fn new(cell_width: i32, ascent: i32, descent: i32) -> Self {
        Self {
            cell_width: cell_width.max(1),
            ascent: ascent.max(1),
            descent: descent.max(0),
        }
    }
}

impl Default for BlockFont {
    fn default() -> Self {
        Self::new(4, 7, 2)
    }
}

impl Font for BlockFont {
    fn character_width(&self, _ch: char) -> i32 {
        self.cell_width + 1
    }

    fn height(&self) -> i32 {
        self.ascent + self.descent
    }

    fn baseline(&self) -> i32 {
        self.ascent
    }

    fn draw_glyph(&self, surface: &mut Surface, x: i32, y: i32, color: Color, ch: char) -> i32 {
        if !ch.is_whitespace() {
            surface.fill_rect(x, y - self.ascent, self.cell_width, self.ascent, color);
        }
        self.character_width(ch)
    }
}

/// ASCII fonts compiled into `embedded-graphics`, used when a BDF font cannot be loaded.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum BuiltinFont {
    /// 5x7 cells, the closest match to the sign's own small fonts.
    #[default]
    Small,
    /// 6x10 cells.
    Medium,
}

impl BuiltinFont {
    fn face(self) -> &'static MonoFont<'static> {
        match self {
            Self::Small => &ascii::FONT_5X7,
            Self::Medium => &ascii::FONT_6X10,
        }
    }
}

impl Font for BuiltinFont {
    fn character_width(&self, _ch: char) -> i32 {
        let face = self.face();
        (face.character_size.width + face.character_spacing) as i32
    }

    fn height(&self) -> i32 {
        self.face().character_size.height as i32
    }

    fn baseline(&self) -> i32 {
        self.face().baseline as i32
    }

    fn draw_glyph(&self, surface: &mut Surface, x: i32, y: i32, color: Color, ch: char) -> i32 {
        let mut buf = [0u8; 4];
        let style = MonoTextStyle::new(self.face(), color.into());
        let Ok(_) = Text::with_baseline(
            ch.encode_utf8(&mut buf),
            Point::new(x, y),
            style,
            Baseline::Alphabetic,
        )
        .draw(surface);
        self.character_width(ch)
    }
}

/// Sum of character advances of `text` in `font`.
pub fn text_width(font: &dyn Font, text: &str) -> i32 {
    text.chars().map(|ch| font.character_width(ch)).sum()
}

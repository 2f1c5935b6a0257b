use embedded_graphics::Drawable;
use embedded_graphics::geometry::Point;
use embedded_graphics::pixelcolor::Rgb888;
use embedded_graphics::primitives::{Circle, Line, Primitive, PrimitiveStyle};

use crate::raster::color::Color;
use crate::raster::font::Font;
use crate::raster::surface::Surface;

/// Draw `text` starting at `(x, y)` where `y` is the baseline. Returns the total advance.
pub fn draw_text(
    surface: &mut Surface,
    font: &dyn Font,
    x: i32,
    y: i32,
    color: Color,
    text: &str,
) -> i32 {
    let mut pen = x;
    for ch in text.chars() {
        pen += font.draw_glyph(surface, pen, y, color, ch);
    }
    pen - x
}

fn stroke(color: Color) -> PrimitiveStyle<Rgb888> {
    PrimitiveStyle::with_stroke(color.into(), 1)
}

/// One-pixel line including both endpoints.
pub fn draw_line(surface: &mut Surface, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
    let Ok(()) = Line::new(Point::new(x0, y0), Point::new(x1, y1))
        .into_styled(stroke(color))
        .draw(surface);
}

/// One-pixel circle outline of radius `r` centred on `(cx, cy)`.
pub fn draw_circle(surface: &mut Surface, cx: i32, cy: i32, r: i32, color: Color) {
    if r < 0 {
        return;
    }
    if r == 0 {
        surface.set_pixel(cx, cy, color);
        return;
    }
    let diameter = 2 * r.unsigned_abs() + 1;
    let Ok(()) = Circle::with_center(Point::new(cx, cy), diameter)
        .into_styled(stroke(color))
        .draw(surface);
}

#[cfg(test)]
#[path = "../../tests/unit/raster/draw.rs"]
mod tests;

use crate::foundation::error::{SignError, SignResult};
use crate::foundation::math::{lerp_u8, luma_u8, mul_div255_u8};
use crate::raster::color::Color;
use crate::raster::surface::Surface;

/// Decoded raster image, straight (non-premultiplied) RGBA8, row-major.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl Image {
    /// Wrap packed RGBA8 bytes. Fails when the buffer does not match `width * height * 4`.
    pub fn from_rgba8(width: u32, height: u32, rgba: Vec<u8>) -> SignResult<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|v| v.checked_mul(4))
            .ok_or_else(|| SignError::invalid_argument("image size overflow"))?;
        if rgba.len() != expected {
            return Err(SignError::invalid_argument(format!(
                "image buffer is {} bytes, expected {expected} for {width}x{height}",
                rgba.len()
            )));
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// RGBA of the pixel at `(x, y)`. Panics when out of range.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let idx = ((y as usize) * (self.width as usize) + (x as usize)) * 4;
        [
            self.rgba[idx],
            self.rgba[idx + 1],
            self.rgba[idx + 2],
            self.rgba[idx + 3],
        ]
    }
}

/// Which point of the image lands on the `(x, y)` passed to [`composite_image`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Anchor {
    /// Top-left corner.
    #[default]
    TopLeft,
    /// Middle of the top edge.
    TopCenter,
    /// Top-right corner.
    TopRight,
    /// Middle of the left edge.
    LeftMid,
    /// Image centre.
    CenterCenter,
    /// Middle of the right edge.
    RightMid,
    /// Bottom-left corner.
    BottomLeft,
    /// Middle of the bottom edge.
    BottomCenter,
    /// Bottom-right corner.
    BottomRight,
}

impl Anchor {
    /// Offset from the anchor point to the image's top-left corner.
    pub fn top_left_offset(self, width: u32, height: u32) -> (i32, i32) {
        let w = width as i32;
        let h = height as i32;
        match self {
            Self::TopLeft => (0, 0),
            Self::TopCenter => (-w / 2, 0),
            Self::TopRight => (-w, 0),
            Self::LeftMid => (0, -h / 2),
            Self::CenterCenter => (-w / 2, -h / 2),
            Self::RightMid => (-w, -h / 2),
            Self::BottomLeft => (0, -h),
            Self::BottomCenter => (-w / 2, -h),
            Self::BottomRight => (-w, -h),
        }
    }
}

/// How an image pixel combines with the destination pixel. Channels are 0-255.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BlendMode {
    /// Replace the destination.
    #[default]
    Normal,
    /// `d * s / 255`.
    Multiply,
    /// `d * (255 - s) / 255`.
    InvertMultiply,
    /// `max(d - s, 0)`.
    Subtract,
    /// `max(d, s)` per channel.
    LighterColor,
}

impl BlendMode {
    /// Combine one channel.
    pub fn apply(self, dst: u8, src: u8) -> u8 {
        match self {
            Self::Normal => src,
            Self::Multiply => mul_div255_u8(u16::from(dst), u16::from(src)),
            Self::InvertMultiply => mul_div255_u8(u16::from(dst), 255 - u16::from(src)),
            Self::Subtract => dst.saturating_sub(src),
            Self::LighterColor => dst.max(src),
        }
    }

    fn apply_color(self, dst: Color, src: Color) -> Color {
        Color::rgb(
            self.apply(dst.r, src.r),
            self.apply(dst.g, src.g),
            self.apply(dst.b, src.b),
        )
    }
}

/// Draw `image` onto `surface` with `anchor` placed at `(x, y)`.
///
/// With a `tint` the source luminance modulates the tint color, so white artwork takes on the
/// sign color. Fully transparent pixels are skipped; partial alpha mixes the blended result with
/// the destination.
pub fn composite_image(
    surface: &mut Surface,
    image: &Image,
    x: i32,
    y: i32,
    anchor: Anchor,
    tint: Option<Color>,
    blend: BlendMode,
) {
    let (ox, oy) = anchor.top_left_offset(image.width, image.height);
    let left = x + ox;
    let top = y + oy;

    for iy in 0..image.height {
        for ix in 0..image.width {
            let [r, g, b, a] = image.pixel(ix, iy);
            if a == 0 {
                continue;
            }
            let dx = left + ix as i32;
            let dy = top + iy as i32;
            let Some(dst) = surface.get_pixel(dx, dy) else {
                continue;
            };

            let src = match tint {
                Some(t) => {
                    let l = u16::from(luma_u8(r, g, b));
                    Color::rgb(
                        mul_div255_u8(u16::from(t.r), l),
                        mul_div255_u8(u16::from(t.g), l),
                        mul_div255_u8(u16::from(t.b), l),
                    )
                }
                None => Color::rgb(r, g, b),
            };

            let blended = blend.apply_color(dst, src);
            let out = if a == 255 {
                blended
            } else {
                Color::rgb(
                    lerp_u8(dst.r, blended.r, a),
                    lerp_u8(dst.g, blended.g, a),
                    lerp_u8(dst.b, blended.b, a),
                )
            };
            surface.set_pixel(dx, dy, out);
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/raster/image.rs"]
mod tests;

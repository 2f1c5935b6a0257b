use std::collections::HashMap;
use std::path::Path;

use anyhow::Context as _;

use crate::foundation::error::{SignError, SignResult};
use crate::raster::color::Color;
use crate::raster::font::Font;
use crate::raster::surface::Surface;

#[derive(Clone, Debug, Default)]
struct Glyph {
    advance: i32,
    bbx_w: i32,
    bbx_h: i32,
    bbx_x: i32,
    bbx_y: i32,
    // One entry per bitmap row, MSB-first, `row_bits` wide.
    rows: Vec<u64>,
    row_bits: u32,
}

impl Glyph {
    fn bit(&self, row: usize, col: i32) -> bool {
        let Some(bits) = self.rows.get(row) else {
            return false;
        };
        if col < 0 || col as u32 >= self.row_bits {
            return false;
        }
        (bits >> (self.row_bits - 1 - col as u32)) & 1 == 1
    }
}

/// Font in the Glyph Bitmap Distribution Format, the format LED matrix drivers consume.
#[derive(Clone, Debug)]
pub struct BdfFont {
    glyphs: HashMap<char, Glyph>,
    default_glyph: Option<char>,
    height: i32,
    ascent: i32,
    fallback_advance: i32,
}

impl BdfFont {
    /// Read and parse a `.bdf` file.
    pub fn load(path: &Path) -> SignResult<Self> {
        let src = std::fs::read_to_string(path)
            .with_context(|| format!("read font '{}'", path.display()))
            .map_err(|e| SignError::configuration(format!("{e:#}")))?;
        Self::parse(&src)
            .map_err(|e| SignError::configuration(format!("font '{}': {e}", path.display())))
    }

    /// Parse BDF source text.
    pub fn parse(src: &str) -> SignResult<Self> {
        let mut bbox: Option<(i32, i32, i32, i32)> = None;
        let mut font_ascent: Option<i32> = None;
        let mut font_descent: Option<i32> = None;
        let mut default_code: Option<u32> = None;
        let mut glyphs = HashMap::new();

        let mut current: Option<(Option<char>, Glyph)> = None;
        let mut bitmap_rows_left = 0usize;

        for (line_no, raw) in src.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() {
                continue;
            }

            if bitmap_rows_left > 0 {
                let Some((_, glyph)) = current.as_mut() else {
                    return Err(bad_line(line_no, "bitmap row outside of a glyph"));
                };
                if line == "ENDCHAR" {
                    bitmap_rows_left = 0;
                } else {
                    let digits = line.len().min(16);
                    let bits = u64::from_str_radix(&line[..digits], 16)
                        .map_err(|_| bad_line(line_no, "invalid hex bitmap row"))?;
                    glyph.row_bits = (digits as u32) * 4;
                    glyph.rows.push(bits);
                    bitmap_rows_left -= 1;
                    continue;
                }
            }

            let mut parts = line.split_whitespace();
            let Some(keyword) = parts.next() else {
                continue;
            };
            let args: Vec<&str> = parts.collect();

            match keyword {
                "FONTBOUNDINGBOX" => {
                    let v = parse_ints(&args, 4, line_no)?;
                    bbox = Some((v[0], v[1], v[2], v[3]));
                }
                "FONT_ASCENT" => font_ascent = Some(parse_ints(&args, 1, line_no)?[0]),
                "FONT_DESCENT" => font_descent = Some(parse_ints(&args, 1, line_no)?[0]),
                "DEFAULT_CHAR" => {
                    default_code = parse_ints(&args, 1, line_no)?[0].try_into().ok();
                }
                "STARTCHAR" => current = Some((None, Glyph::default())),
                "ENCODING" => {
                    let code = parse_ints(&args, 1, line_no)?[0];
                    if let Some((ch, _)) = current.as_mut() {
                        *ch = u32::try_from(code).ok().and_then(char::from_u32);
                    }
                }
                "DWIDTH" => {
                    let v = parse_ints(&args, 1, line_no)?;
                    if let Some((_, glyph)) = current.as_mut() {
                        glyph.advance = v[0];
                    }
                }
                "BBX" => {
                    let v = parse_ints(&args, 4, line_no)?;
                    if let Some((_, glyph)) = current.as_mut() {
                        glyph.bbx_w = v[0];
                        glyph.bbx_h = v[1];
                        glyph.bbx_x = v[2];
                        glyph.bbx_y = v[3];
                    }
                }
                "BITMAP" => {
                    let Some((_, glyph)) = current.as_ref() else {
                        return Err(bad_line(line_no, "BITMAP outside of a glyph"));
                    };
                    bitmap_rows_left = glyph.bbx_h.max(0) as usize;
                }
                "ENDCHAR" => {
                    if let Some((Some(ch), glyph)) = current.take() {
                        glyphs.insert(ch, glyph);
                    }
                }
                _ => {}
            }
        }

        let Some((bbox_w, bbox_h, _bbox_x, bbox_y)) = bbox else {
            return Err(SignError::configuration("BDF source has no FONTBOUNDINGBOX"));
        };
        if glyphs.is_empty() {
            return Err(SignError::configuration("BDF source has no glyphs"));
        }

        let ascent = font_ascent.unwrap_or(bbox_h + bbox_y);
        let height = match (font_ascent, font_descent) {
            (Some(a), Some(d)) => a + d,
            _ => bbox_h,
        };
        let default_glyph = default_code
            .and_then(char::from_u32)
            .filter(|c| glyphs.contains_key(c));

        Ok(Self {
            glyphs,
            default_glyph,
            height,
            ascent,
            fallback_advance: bbox_w,
        })
    }

    /// Number of glyphs with a Unicode encoding.
    pub fn glyph_count(&self) -> usize {
        self.glyphs.len()
    }

    fn glyph(&self, ch: char) -> Option<&Glyph> {
        self.glyphs
            .get(&ch)
            .or_else(|| self.default_glyph.and_then(|d| self.glyphs.get(&d)))
    }
}

impl Font for BdfFont {
    fn character_width(&self, ch: char) -> i32 {
        self.glyph(ch)
            .map(|g| g.advance)
            .unwrap_or(self.fallback_advance)
    }

    fn height(&self) -> i32 {
        self.height
    }

    fn baseline(&self) -> i32 {
        self.ascent
    }

    fn draw_glyph(&self, surface: &mut Surface, x: i32, y: i32, color: Color, ch: char) -> i32 {
        let Some(glyph) = self.glyph(ch) else {
            return self.fallback_advance;
        };
        let top = y - (glyph.bbx_y + glyph.bbx_h);
        for row in 0..glyph.bbx_h.max(0) {
            for col in 0..glyph.bbx_w.max(0) {
                if glyph.bit(row as usize, col) {
                    surface.set_pixel(x + glyph.bbx_x + col, top + row, color);
                }
            }
        }
        glyph.advance
    }
}

fn parse_ints(args: &[&str], n: usize, line_no: usize) -> SignResult<Vec<i32>> {
    if args.len() < n {
        return Err(bad_line(line_no, "missing numeric arguments"));
    }
    args[..n]
        .iter()
        .map(|a| {
            a.parse::<i32>()
                .map_err(|_| bad_line(line_no, "invalid integer"))
        })
        .collect()
}

fn bad_line(line_no: usize, what: &str) -> SignError {
    SignError::configuration(format!("BDF line {}: {what}", line_no + 1))
}

#[cfg(test)]
#[path = "../../tests/unit/raster/bdf.rs"]
mod tests;

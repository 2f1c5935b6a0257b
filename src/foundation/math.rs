pub(crate) fn mul_div255_u16(x: u16, y: u16) -> u16 {
    (((u32::from(x) * u32::from(y)) + 127) / 255) as u16
}

pub(crate) fn mul_div255_u8(x: u16, y: u16) -> u8 {
    mul_div255_u16(x, y).min(255) as u8
}

/// Linear mix of two channels: `t = 0` keeps `a`, `t = 255` yields `b`.
pub(crate) fn lerp_u8(a: u8, b: u8, t: u8) -> u8 {
    let t = u16::from(t);
    let a_part = mul_div255_u16(u16::from(a), 255 - t);
    let b_part = mul_div255_u16(u16::from(b), t);
    (a_part + b_part).min(255) as u8
}

/// Integer Rec.601 luma of an RGB triple.
pub(crate) fn luma_u8(r: u8, g: u8, b: u8) -> u8 {
    let y = 299 * u32::from(r) + 587 * u32::from(g) + 114 * u32::from(b);
    ((y + 500) / 1000).min(255) as u8
}

/// Scale a channel by a factor in `[0, 1]` (clamped).
pub(crate) fn scale_u8(c: u8, factor: f64) -> u8 {
    let factor = if factor.is_finite() {
        factor.clamp(0.0, 1.0)
    } else {
        0.0
    };
    (f64::from(c) * factor).round().clamp(0.0, 255.0) as u8
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/math.rs"]
mod tests;

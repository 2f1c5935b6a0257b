use embedded_graphics::pixelcolor::{Rgb888, RgbColor};

/// 8-bit RGB color as driven onto the LED panel.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct Color {
    /// Red channel.
    pub r: u8,
    /// Green channel.
    pub g: u8,
    /// Blue channel.
    pub b: u8,
}

impl Color {
    /// All LEDs off.
    pub const BLACK: Self = Self::rgb(0, 0, 0);
    /// Full white.
    pub const WHITE: Self = Self::rgb(255, 255, 255);
    /// Full red, the sign's house color.
    pub const RED: Self = Self::rgb(255, 0, 0);
    /// Full green.
    pub const GREEN: Self = Self::rgb(0, 255, 0);
    /// Full blue.
    pub const BLUE: Self = Self::rgb(0, 0, 255);
    /// Red + green.
    pub const YELLOW: Self = Self::rgb(255, 255, 0);
    /// Red + blue.
    pub const PINK: Self = Self::rgb(255, 0, 255);

    /// Build a color from channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// True when every channel is zero.
    pub fn is_black(self) -> bool {
        self.r == 0 && self.g == 0 && self.b == 0
    }
}

impl From<Rgb888> for Color {
    fn from(c: Rgb888) -> Self {
        Self::rgb(c.r(), c.g(), c.b())
    }
}

impl From<Color> for Rgb888 {
    fn from(c: Color) -> Self {
        Rgb888::new(c.r, c.g, c.b)
    }
}

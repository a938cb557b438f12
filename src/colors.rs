//! Color model: 8-bit RGB, the day and night palettes, and hex conversion.
//!
//! Colors are `palette::Srgb<u8>` so every channel is in range by
//! construction. Renderers that expect strings get `#rrggbb` through
//! [`to_hex`]; everything inside the crate stays typed.

use core::fmt::Write;

use palette::Srgb;

use crate::types::Bucket;

/// An 8-bit RGB color.
pub type Rgb = Srgb<u8>;

/// `#rrggbb` text.
pub type HexColor = heapless::String<7>;

/// Black, every channel off.
pub const BLACK: Rgb = Rgb::new(0x00, 0x00, 0x00);

/// A color per temperature bucket.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    pub hot: Rgb,
    pub neutral: Rgb,
    pub cold: Rgb,
}

impl Palette {
    /// Creates a palette from its three bucket colors.
    pub const fn new(hot: Rgb, neutral: Rgb, cold: Rgb) -> Self {
        Self { hot, neutral, cold }
    }

    /// Color for `bucket`.
    #[inline]
    pub fn color(&self, bucket: Bucket) -> Rgb {
        match bucket {
            Bucket::Hot => self.hot,
            Bucket::Neutral => self.neutral,
            Bucket::Cold => self.cold,
        }
    }

    /// Mutable color for `bucket`.
    #[inline]
    pub fn color_mut(&mut self, bucket: Bucket) -> &mut Rgb {
        match bucket {
            Bucket::Hot => &mut self.hot,
            Bucket::Neutral => &mut self.neutral,
            Bucket::Cold => &mut self.cold,
        }
    }
}

/// Full-brightness colors used between sunrise and sunset.
pub const DAY_PALETTE: Palette = Palette::new(
    Rgb::new(0xd4, 0x1c, 0x0f),
    Rgb::new(0xff, 0xff, 0xff),
    Rgb::new(0x03, 0x4e, 0xff),
);

/// Dimmed colors used at night, roughly nine shades below the day palette.
pub const NIGHT_PALETTE: Palette = Palette::new(
    Rgb::new(0x15, 0x02, 0x01),
    Rgb::new(0x19, 0x19, 0x19),
    Rgb::new(0x00, 0x07, 0x19),
);

/// All buckets black.
pub const BLACK_PALETTE: Palette = Palette::new(BLACK, BLACK, BLACK);

/// Formats a color as lowercase `#rrggbb`.
pub fn to_hex(color: Rgb) -> HexColor {
    let mut hex = HexColor::new();
    // Seven characters always fit.
    let _ = write!(hex, "#{:02x}{:02x}{:02x}", color.red, color.green, color.blue);
    hex
}

/// Parses `#rrggbb` or `rrggbb` (either case).
pub fn from_hex(text: &str) -> Option<Rgb> {
    let digits = text.strip_prefix('#').unwrap_or(text);
    if digits.len() != 6 || !digits.bytes().all(|b| b.is_ascii_hexdigit()) {
        return None;
    }

    let channel = |range: core::ops::Range<usize>| u8::from_str_radix(&digits[range], 16).ok();
    Some(Rgb::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}

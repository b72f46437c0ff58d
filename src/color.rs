//! Color utilities for deriving shadow and pattern tones.

use palette::{Hsl, IntoColor, Srgb};

/// Parses a hex color (`#rgb` or `#rrggbb`, `#` optional).
pub fn parse_hex(color: &str) -> Option<Srgb<u8>> {
    color.trim().parse::<Srgb<u8>>().ok()
}

/// Formats a color as lowercase `#rrggbb`.
pub fn to_hex(color: Srgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color.red, color.green, color.blue)
}

/// Darkens a hex color by reducing its HSL lightness.
///
/// Returns `None` for colors that are not hex (named colors, `rgb()`, ...).
pub fn darken(color: &str, amount: f32) -> Option<String> {
    shift_lightness(color, -amount)
}

/// Lightens a hex color by raising its HSL lightness.
pub fn lighten(color: &str, amount: f32) -> Option<String> {
    shift_lightness(color, amount)
}

fn shift_lightness(color: &str, amount: f32) -> Option<String> {
    let rgb: Srgb = parse_hex(color)?.into_format();
    let mut hsl: Hsl = rgb.into_color();
    hsl.lightness = (hsl.lightness + amount).clamp(0.0, 1.0);
    let shifted: Srgb = hsl.into_color();
    Some(to_hex(shifted.into_format()))
}

//! Brand colors and the linear interpolation shared by the heart fill.

use crate::error::{AssetError, AssetResult};
use image::Rgba;
use std::str::FromStr;

/// An opaque RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const WHITE: Color = Color::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Fully opaque pixel of this color.
    pub fn to_rgba(self) -> Rgba<u8> {
        self.with_alpha(255)
    }

    pub fn with_alpha(self, alpha: u8) -> Rgba<u8> {
        Rgba([self.r, self.g, self.b, alpha])
    }

    /// CSS hex notation, e.g. `#FF6B9D`.
    pub fn to_hex(self) -> String {
        format!("#{:02X}{:02X}{:02X}", self.r, self.g, self.b)
    }
}

impl FromStr for Color {
    type Err = AssetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        hex_to_rgb(s)
    }
}

/// Parse a CSS color (`#RRGGBB` for the brand palette) into an RGB triple.
///
/// Any alpha component in the input is dropped.
pub fn hex_to_rgb(hex: &str) -> AssetResult<Color> {
    let srgb = css_color::Srgb::from_str(hex.trim())
        .map_err(|_| AssetError::render(format!("invalid color: {hex:?}")))?;

    Ok(Color::new(
        unit_to_channel(srgb.red),
        unit_to_channel(srgb.green),
        unit_to_channel(srgb.blue),
    ))
}

fn unit_to_channel(value: f32) -> u8 {
    (value.clamp(0.0, 1.0) * 255.0).round() as u8
}

/// Linear interpolation between two colors, channel by channel.
///
/// `ratio` is clamped to `[0, 1]`; `0` yields `a` and `1` yields `b`.
pub fn gradient_color(a: Color, b: Color, ratio: f32) -> Color {
    let ratio = if ratio.is_nan() {
        0.0
    } else {
        ratio.clamp(0.0, 1.0)
    };
    let mix = |from: u8, to: u8| -> u8 {
        (from as f32 * (1.0 - ratio) + to as f32 * ratio).round() as u8
    };

    Color::new(mix(a.r, b.r), mix(a.g, b.g), mix(a.b, b.b))
}

pub const PRIMARY_HEX: &str = "#FF6B9D";
pub const SECONDARY_HEX: &str = "#C44569";
pub const ACCENT_HEX: &str = "#FFA07A";
pub const BACKGROUND_HEX: &str = "#FFFFFF";

/// The fixed brand palette every asset is drawn with.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Vibrant pink, left heart and caption.
    pub primary: Color,
    /// Deep rose, gradient shade.
    pub secondary: Color,
    /// Coral, right heart.
    pub accent: Color,
    pub background: Color,
}

impl Palette {
    pub fn brand() -> AssetResult<Self> {
        Ok(Self {
            primary: hex_to_rgb(PRIMARY_HEX)?,
            secondary: hex_to_rgb(SECONDARY_HEX)?,
            accent: hex_to_rgb(ACCENT_HEX)?,
            background: hex_to_rgb(BACKGROUND_HEX)?,
        })
    }
}

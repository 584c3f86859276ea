//! Caption text: font acquisition with fallback, measurement and drawing.

use crate::bitmap_font::{self, GLYPH_SIZE};
use crate::color::{gradient_color, Color};
use image::{Rgba, RgbaImage};
use rusttype::{point, Font, PositionedGlyph, Scale};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Bold sans fonts tried after any user-supplied font.
pub fn default_font_paths() -> Vec<PathBuf> {
    [
        "/usr/share/fonts/truetype/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/TTF/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu/DejaVuSans-Bold.ttf",
        "/usr/share/fonts/dejavu-sans-fonts/DejaVuSans-Bold.ttf",
        "/Library/Fonts/Arial Bold.ttf",
        "/System/Library/Fonts/Supplemental/Arial Bold.ttf",
        "C:\\Windows\\Fonts\\arialbd.ttf",
    ]
    .into_iter()
    .map(PathBuf::from)
    .collect()
}

/// Bounding box of laid-out text, relative to the layout origin (top-left of the line).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TextBox {
    pub left: i32,
    pub top: i32,
    pub width: u32,
    pub height: u32,
}

/// The font a caption is drawn with.
pub enum CaptionFont {
    TrueType { font: Font<'static>, path: PathBuf },
    /// Built-in 8x8 glyphs scaled up to the requested size.
    Bitmap,
}

impl std::fmt::Debug for CaptionFont {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TrueType { path, .. } => f.debug_tuple("TrueType").field(path).finish(),
            Self::Bitmap => f.write_str("Bitmap"),
        }
    }
}

impl CaptionFont {
    /// Load the first candidate that parses as a font, falling back to the built-in bitmap font.
    ///
    /// Never fails: a missing or unreadable font only costs typography.
    pub fn load(candidates: &[PathBuf]) -> Self {
        for path in candidates {
            if let Some(font) = read_font(path) {
                debug!(path = %path.display(), "loaded caption font");
                return Self::TrueType {
                    font,
                    path: path.clone(),
                };
            }
        }

        warn!(
            tried = ?candidates,
            "no usable caption font found, using built-in bitmap font"
        );
        Self::Bitmap
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Bitmap)
    }

    /// Human-readable name for progress output.
    pub fn describe(&self) -> String {
        match self {
            Self::TrueType { path, .. } => path.display().to_string(),
            Self::Bitmap => "built-in bitmap font".to_string(),
        }
    }

    /// Measure `text` at `size` pixels.
    pub fn measure(&self, text: &str, size: f32) -> TextBox {
        match self {
            Self::TrueType { font, .. } => {
                let glyphs = layout(font, text, size, 0, 0);
                let mut bounds: Option<(i32, i32, i32, i32)> = None;
                for bb in glyphs.iter().filter_map(|g| g.pixel_bounding_box()) {
                    bounds = Some(match bounds {
                        None => (bb.min.x, bb.min.y, bb.max.x, bb.max.y),
                        Some((x0, y0, x1, y1)) => (
                            x0.min(bb.min.x),
                            y0.min(bb.min.y),
                            x1.max(bb.max.x),
                            y1.max(bb.max.y),
                        ),
                    });
                }
                bounds
                    .map(|(x0, y0, x1, y1)| TextBox {
                        left: x0,
                        top: y0,
                        width: (x1 - x0) as u32,
                        height: (y1 - y0) as u32,
                    })
                    .unwrap_or_default()
            }
            Self::Bitmap => {
                let cell = bitmap_cell(size);
                TextBox {
                    left: 0,
                    top: 0,
                    width: cell * text.chars().count() as u32,
                    height: if text.is_empty() { 0 } else { cell },
                }
            }
        }
    }

    /// Draw `text` with its layout origin at (`x`, `y`), blending over what is already there.
    pub fn draw(&self, canvas: &mut RgbaImage, text: &str, x: i32, y: i32, size: f32, color: Color) {
        match self {
            Self::TrueType { font, .. } => {
                for glyph in layout(font, text, size, x, y) {
                    let Some(bb) = glyph.pixel_bounding_box() else {
                        continue;
                    };
                    glyph.draw(|gx, gy, coverage| {
                        let px = bb.min.x + gx as i32;
                        let py = bb.min.y + gy as i32;
                        blend_at(canvas, px, py, color, coverage);
                    });
                }
            }
            Self::Bitmap => {
                let cell = bitmap_cell(size);
                let unit = (cell / GLYPH_SIZE) as i32;
                for (i, ch) in text.chars().enumerate() {
                    let Some(rows) = bitmap_font::glyph(ch).or_else(|| bitmap_font::glyph('?'))
                    else {
                        continue;
                    };
                    let origin_x = x + (i as i32) * cell as i32;
                    for row in 0..GLYPH_SIZE {
                        for col in 0..GLYPH_SIZE {
                            if !bitmap_font::is_set(rows, col, row) {
                                continue;
                            }
                            let left = origin_x + col as i32 * unit;
                            let top = y + row as i32 * unit;
                            for dy in 0..unit {
                                for dx in 0..unit {
                                    blend_at(canvas, left + dx, top + dy, color, 1.0);
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn read_font(path: &Path) -> Option<Font<'static>> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) => {
            debug!(path = %path.display(), error = %err, "font not readable");
            return None;
        }
    };
    let font = Font::try_from_vec(bytes);
    if font.is_none() {
        debug!(path = %path.display(), "file is not a usable font");
    }
    font
}

fn layout(
    font: &Font<'static>,
    text: &str,
    size: f32,
    x: i32,
    y: i32,
) -> Vec<PositionedGlyph<'static>> {
    let scale = Scale::uniform(size);
    let ascent = font.v_metrics(scale).ascent;
    font.layout(text, scale, point(x as f32, y as f32 + ascent))
        .collect()
}

/// Side of one scaled bitmap glyph cell; the 8px design is scaled by a whole factor.
fn bitmap_cell(size: f32) -> u32 {
    let factor = (size / GLYPH_SIZE as f32).round().max(1.0) as u32;
    factor * GLYPH_SIZE
}

fn blend_at(canvas: &mut RgbaImage, x: i32, y: i32, color: Color, coverage: f32) {
    if x < 0 || y < 0 || x >= canvas.width() as i32 || y >= canvas.height() as i32 {
        return;
    }
    blend(canvas.get_pixel_mut(x as u32, y as u32), color, coverage);
}

/// Source-over compositing of `color` at `coverage` onto a straight-alpha pixel.
fn blend(dst: &mut Rgba<u8>, color: Color, coverage: f32) {
    let src_a = coverage.clamp(0.0, 1.0);
    if src_a <= 0.0 {
        return;
    }
    let dst_a = dst[3] as f32 / 255.0;
    let out_a = src_a + dst_a * (1.0 - src_a);
    let under = Color::new(dst[0], dst[1], dst[2]);
    *dst = gradient_color(under, color, src_a / out_a).with_alpha((out_a * 255.0).round() as u8);
}

//! Heart shape rendering.
//!
//! The outline is traced from the classic parametric heart curve
//!
//! ```text
//! x(t) = 16 sin³(t)
//! y(t) = -(13 cos(t) - 5 cos(2t) - 2 cos(3t) - cos(4t))
//! ```
//!
//! which is roughly 32 units wide, so a [`HeartSpec::scale`] of 100 maps one
//! curve unit to one pixel. The sampled outline is filled as a single polygon
//! with an even-odd scanline pass sampling pixel centers.

use crate::color::{gradient_color, Color};
use crate::error::{AssetError, AssetResult};
use image::{Rgba, RgbaImage};
use std::f32::consts::TAU;

/// Samples per revolution. One per degree keeps chord error under a pixel up to 2048px canvases.
pub const HEART_SAMPLES: usize = 360;

/// A point in canvas space (x right, y down).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    fn is_finite(self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Everything needed to draw one heart.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HeartSpec {
    pub center: Point,
    /// Heart size; the curve is multiplied by `scale / 100`.
    pub scale: f32,
    pub color: Color,
    pub rotation_degrees: f32,
    /// When set, rows blend from `color` at the top of the heart to this color at its tip.
    pub shade: Option<Color>,
}

impl HeartSpec {
    pub fn new(center: Point, scale: f32, color: Color, rotation_degrees: f32) -> Self {
        Self {
            center,
            scale,
            color,
            rotation_degrees,
            shade: None,
        }
    }

    pub fn with_shade(mut self, shade: Color) -> Self {
        self.shade = Some(shade);
        self
    }

    fn validate(&self) -> AssetResult<()> {
        if !(self.scale.is_finite() && self.scale > 0.0) {
            return Err(AssetError::render(format!(
                "heart scale must be positive, got {}",
                self.scale
            )));
        }
        if !self.center.is_finite() || !self.rotation_degrees.is_finite() {
            return Err(AssetError::render(format!(
                "heart placement must be finite, got center {:?} rotation {}",
                self.center, self.rotation_degrees
            )));
        }
        Ok(())
    }
}

/// The unscaled, unrotated heart curve at parameter `t` (radians).
pub fn heart_curve(t: f32) -> Point {
    let x = 16.0 * t.sin().powi(3);
    let y = -(13.0 * t.cos() - 5.0 * (2.0 * t).cos() - 2.0 * (3.0 * t).cos() - (4.0 * t).cos());
    Point::new(x, y)
}

/// Ordered outline of the heart in canvas space.
///
/// Samples are taken at `HEART_SAMPLES` evenly spaced angles over one
/// revolution, then scaled, rotated about the curve origin and translated
/// to `spec.center`.
pub fn heart_outline(spec: &HeartSpec) -> Vec<Point> {
    let factor = spec.scale / 100.0;
    let (sin, cos) = spec.rotation_degrees.to_radians().sin_cos();

    (0..HEART_SAMPLES)
        .map(|i| {
            let t = i as f32 * TAU / HEART_SAMPLES as f32;
            let p = heart_curve(t);
            let x = p.x * cos - p.y * sin;
            let y = p.x * sin + p.y * cos;
            Point::new(spec.center.x + x * factor, spec.center.y + y * factor)
        })
        .collect()
}

/// Fill one heart onto the canvas.
///
/// Invalid specs are rejected before any pixel is touched.
pub fn render_heart(canvas: &mut RgbaImage, spec: &HeartSpec) -> AssetResult<()> {
    spec.validate()?;

    let outline = heart_outline(spec);
    let (top, bottom) = vertical_extent(&outline);
    let span = (bottom - top).max(f32::EPSILON);
    let flat = spec.color.to_rgba();

    fill_polygon(canvas, &outline, |row| match spec.shade {
        Some(shade) => {
            let ratio = (row as f32 + 0.5 - top) / span;
            gradient_color(spec.color, shade, ratio).to_rgba()
        }
        None => flat,
    });

    Ok(())
}

fn vertical_extent(points: &[Point]) -> (f32, f32) {
    points
        .iter()
        .fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
            (lo.min(p.y), hi.max(p.y))
        })
}

/// Even-odd scanline fill of a closed polygon. `paint` picks the color for each row.
///
/// A pixel is covered when its center lies inside the polygon; parts of the
/// polygon outside the canvas are clipped.
fn fill_polygon<F>(canvas: &mut RgbaImage, points: &[Point], mut paint: F)
where
    F: FnMut(u32) -> Rgba<u8>,
{
    if points.len() < 3 || canvas.width() == 0 || canvas.height() == 0 {
        return;
    }

    let width = canvas.width() as i64;
    let height = canvas.height() as i64;
    let (min_y, max_y) = vertical_extent(points);

    let first_row = ((min_y - 0.5).ceil() as i64).max(0);
    let last_row = ((max_y - 0.5).floor() as i64).min(height - 1);

    let mut crossings: Vec<f32> = Vec::with_capacity(8);
    for row in first_row..=last_row {
        let yc = row as f32 + 0.5;

        crossings.clear();
        for (i, a) in points.iter().enumerate() {
            let b = points[(i + 1) % points.len()];
            // Half-open so a vertex on the scanline is counted once.
            if (a.y <= yc && b.y > yc) || (b.y <= yc && a.y > yc) {
                let t = (yc - a.y) / (b.y - a.y);
                crossings.push(a.x + t * (b.x - a.x));
            }
        }
        if crossings.len() < 2 {
            continue;
        }
        crossings.sort_by(|l, r| l.total_cmp(r));

        let pixel = paint(row as u32);
        for span in crossings.chunks_exact(2) {
            let start = ((span[0] - 0.5).ceil() as i64).max(0);
            let end = ((span[1] - 0.5).floor() as i64).min(width - 1);
            for x in start..=end {
                canvas.put_pixel(x as u32, row as u32, pixel);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PINK: Color = Color::new(255, 107, 157);
    const ROSE: Color = Color::new(196, 69, 105);

    fn blank(size: u32) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Color::WHITE.to_rgba())
    }

    fn centered(size: u32, scale: f32) -> HeartSpec {
        let c = size as f32 / 2.0;
        HeartSpec::new(Point::new(c, c), scale, PINK, 0.0)
    }

    fn close(a: Point, b: Point) -> bool {
        (a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3
    }

    #[test]
    fn curve_is_closed() {
        assert!(close(heart_curve(0.0), heart_curve(TAU)));
    }

    #[test]
    fn curve_known_points() {
        // Notch between the lobes and the bottom tip.
        assert!(close(heart_curve(0.0), Point::new(0.0, -5.0)));
        assert!(close(heart_curve(std::f32::consts::PI), Point::new(0.0, 17.0)));
    }

    #[test]
    fn outline_has_one_sample_per_degree() {
        let outline = heart_outline(&centered(256, 100.0));
        assert_eq!(outline.len(), HEART_SAMPLES);
        // The last sample sits one degree short of the first.
        let step = outline[0].x - outline[HEART_SAMPLES - 1].x;
        assert!(step.abs() < 1.0, "gap between last and first sample: {step}");
    }

    #[test]
    fn outline_scales_and_translates() {
        let spec = HeartSpec::new(Point::new(50.0, 60.0), 200.0, PINK, 0.0);
        let outline = heart_outline(&spec);
        // t = 0 maps to (0, -5) * 2 + center.
        assert!(close(outline[0], Point::new(50.0, 50.0)));
        // t = 90 degrees is the rightmost point of the curve: (16, -4) * 2 + center.
        assert!(close(outline[90], Point::new(82.0, 52.0)));
    }

    #[test]
    fn rotation_turns_the_outline() {
        let spec = HeartSpec::new(Point::new(0.0, 0.0), 100.0, PINK, 90.0);
        let outline = heart_outline(&spec);
        // (0, -5) rotated by +90 degrees lands on (5, 0).
        assert!(close(outline[0], Point::new(5.0, 0.0)));
    }

    #[test]
    fn full_turn_matches_no_rotation() {
        let base = heart_outline(&HeartSpec::new(Point::new(10.0, 10.0), 100.0, PINK, 0.0));
        let turned = heart_outline(&HeartSpec::new(Point::new(10.0, 10.0), 100.0, PINK, 360.0));
        for (a, b) in base.iter().zip(&turned) {
            assert!((a.x - b.x).abs() < 1e-3 && (a.y - b.y).abs() < 1e-3);
        }
    }

    #[test]
    fn fills_the_center_and_leaves_corners() {
        let mut canvas = blank(128);
        render_heart(&mut canvas, &centered(128, 200.0)).unwrap();

        assert_eq!(*canvas.get_pixel(64, 64), PINK.to_rgba());
        assert_eq!(*canvas.get_pixel(0, 0), Color::WHITE.to_rgba());
        assert_eq!(*canvas.get_pixel(127, 127), Color::WHITE.to_rgba());
    }

    #[test]
    fn non_positive_scale_is_rejected_without_drawing() {
        for scale in [0.0, -10.0, f32::NAN] {
            let mut canvas = blank(64);
            let before = canvas.clone();
            let err = render_heart(&mut canvas, &centered(64, scale)).unwrap_err();
            assert!(err.is_render());
            assert_eq!(canvas, before);
        }
    }

    #[test]
    fn rendering_is_deterministic() {
        let spec = HeartSpec::new(Point::new(70.3, 61.7), 137.0, PINK, -10.0).with_shade(ROSE);
        let mut first = blank(160);
        let mut second = blank(160);
        render_heart(&mut first, &spec).unwrap();
        render_heart(&mut second, &spec).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn shade_blends_from_top_to_tip() {
        let mut canvas = blank(256);
        let spec = centered(256, 600.0).with_shade(ROSE);
        render_heart(&mut canvas, &spec).unwrap();

        let (_, bottom) = vertical_extent(&heart_outline(&spec));
        // The notch between the lobes sits 30px above center at this scale.
        let upper = canvas.get_pixel(128, 110);
        let lower = canvas.get_pixel(128, (bottom - 20.0) as u32);

        // Red falls from 255 toward 196 moving down the heart.
        assert!(upper[0] > lower[0], "upper {upper:?} lower {lower:?}");
        assert!(lower[0] >= ROSE.r);
    }

    #[test]
    fn heart_partly_off_canvas_is_clipped() {
        let mut canvas = blank(32);
        let spec = HeartSpec::new(Point::new(0.0, 0.0), 300.0, PINK, 0.0);
        render_heart(&mut canvas, &spec).unwrap();
        assert_eq!(*canvas.get_pixel(0, 0), PINK.to_rgba());
    }
}

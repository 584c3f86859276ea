use crate::caption::CaptionFont;
use crate::color::{Color, Palette};
use crate::error::{AssetError, AssetResult};
use crate::heart::{render_heart, HeartSpec, Point};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType as PngFilterType, PngEncoder},
    ColorType, DynamicImage, ImageEncoder, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use tracing::debug;

/// Caption drawn under the hearts on the splash screen.
pub const CAPTION_TEXT: &str = "Better Together";

const CAPTION_SIZE: f32 = 80.0;
const CAPTION_PADDING: f32 = 80.0;

/// Hearts tilt away from each other by this many degrees.
const HEART_TILT_DEGREES: f32 = 10.0;
/// Horizontal distance of each heart from the center, as a share of the heart size.
const HEART_OFFSET_FACTOR: f32 = 0.3;

/// Largest canvas side accepted.
const MAX_DIMENSION: u32 = 16_384;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
    Icon,
    Splash,
    AdaptiveIcon,
    Favicon,
}

impl AssetKind {
    pub fn file_name(self) -> &'static str {
        match self {
            AssetKind::Icon => "icon.png",
            AssetKind::Splash => "splash.png",
            AssetKind::AdaptiveIcon => "adaptive-icon.png",
            AssetKind::Favicon => "favicon.png",
        }
    }

    /// Heart size as a share of the canvas' shorter side.
    fn size_factor(self) -> f32 {
        match self {
            AssetKind::Splash => 0.25,
            AssetKind::Icon | AssetKind::AdaptiveIcon | AssetKind::Favicon => 0.35,
        }
    }

    /// How far above the canvas center the hearts sit, leaving room for the caption.
    fn vertical_lift(self) -> f32 {
        match self {
            AssetKind::Splash => 100.0,
            _ => 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Background {
    /// Filled with the palette background, written without an alpha channel.
    Opaque,
    /// Fully transparent, written with an alpha channel.
    Transparent,
}

/// One output file.
#[derive(Debug, Clone, PartialEq)]
pub struct AssetSpec {
    pub kind: AssetKind,
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub background: Background,
    /// Shade both hearts toward the palette's secondary color.
    pub use_gradient: bool,
    pub include_caption: bool,
}

impl AssetSpec {
    pub fn name(&self) -> String {
        self.path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.kind.file_name().to_string())
    }

    fn validate(&self) -> AssetResult<()> {
        for (label, value) in [("width", self.width), ("height", self.height)] {
            if value == 0 || value > MAX_DIMENSION {
                return Err(AssetError::render(format!(
                    "{} {label} must be between 1 and {MAX_DIMENSION}, got {value}",
                    self.name()
                )));
            }
        }
        Ok(())
    }
}

/// The four store assets, written under `base_dir`.
pub fn standard_assets(base_dir: &Path) -> Vec<AssetSpec> {
    let spec = |kind: AssetKind, width, height, background, use_gradient, include_caption| {
        AssetSpec {
            kind,
            path: base_dir.join(kind.file_name()),
            width,
            height,
            background,
            use_gradient,
            include_caption,
        }
    };

    vec![
        spec(AssetKind::Icon, 1024, 1024, Background::Opaque, true, false),
        spec(AssetKind::Splash, 2048, 2732, Background::Opaque, true, true),
        spec(
            AssetKind::AdaptiveIcon,
            1024,
            1024,
            Background::Transparent,
            true,
            false,
        ),
        spec(AssetKind::Favicon, 256, 256, Background::Opaque, false, false),
    ]
}

/// Where the two hearts of an asset go.
///
/// The left heart is tilted left in the primary color, the right heart tilted
/// right in the accent color.
pub fn heart_pair(spec: &AssetSpec, palette: &Palette) -> [HeartSpec; 2] {
    let (center, heart_size) = heart_anchor(spec);
    let offset = heart_size * HEART_OFFSET_FACTOR;

    let mut left = HeartSpec::new(
        Point::new(center.x - offset, center.y),
        heart_size,
        palette.primary,
        -HEART_TILT_DEGREES,
    );
    let mut right = HeartSpec::new(
        Point::new(center.x + offset, center.y),
        heart_size,
        palette.accent,
        HEART_TILT_DEGREES,
    );

    if spec.use_gradient {
        left = left.with_shade(palette.secondary);
        right = right.with_shade(palette.secondary);
    }

    [left, right]
}

fn heart_anchor(spec: &AssetSpec) -> (Point, f32) {
    let center = Point::new(
        (spec.width / 2) as f32,
        (spec.height / 2) as f32 - spec.kind.vertical_lift(),
    );
    let heart_size = spec.width.min(spec.height) as f32 * spec.kind.size_factor();
    (center, heart_size)
}

/// Draws assets with a fixed palette and caption font.
#[derive(Debug)]
pub struct Composer {
    palette: Palette,
    font: CaptionFont,
}

impl Composer {
    pub fn new(palette: Palette, font: CaptionFont) -> Self {
        Self { palette, font }
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn font(&self) -> &CaptionFont {
        &self.font
    }

    /// Draw the asset into a fresh canvas without writing it.
    pub fn render(&self, spec: &AssetSpec) -> AssetResult<RgbaImage> {
        spec.validate()?;

        let fill = match spec.background {
            Background::Opaque => self.palette.background.to_rgba(),
            Background::Transparent => self.palette.background.with_alpha(0),
        };
        let mut canvas = RgbaImage::from_pixel(spec.width, spec.height, fill);

        for heart in heart_pair(spec, &self.palette) {
            render_heart(&mut canvas, &heart)?;
        }

        if spec.include_caption {
            self.draw_caption(&mut canvas, spec);
        }

        Ok(canvas)
    }

    /// Render the asset and write it to `spec.path`.
    #[tracing::instrument(skip_all, fields(asset = %spec.name()))]
    pub fn compose_asset(&self, spec: &AssetSpec) -> AssetResult<()> {
        let canvas = self.render(spec)?;
        write_png(canvas, &spec.path, spec.background)?;
        debug!(path = %spec.path.display(), "asset written");
        Ok(())
    }

    fn draw_caption(&self, canvas: &mut RgbaImage, spec: &AssetSpec) {
        let (center, heart_size) = heart_anchor(spec);
        let bounds = self.font.measure(CAPTION_TEXT, CAPTION_SIZE);

        let x = (spec.width as i32 - bounds.width as i32) / 2 - bounds.left;
        let y = (center.y + heart_size + CAPTION_PADDING) as i32;
        debug!(x, y, width = bounds.width, font = %self.font.describe(), "placing caption");

        self.font
            .draw(canvas, CAPTION_TEXT, x, y, CAPTION_SIZE, self.palette.primary);
    }
}

/// Encode the canvas as PNG, dropping the alpha channel for opaque assets.
pub fn write_png(canvas: RgbaImage, path: &Path, background: Background) -> AssetResult<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(|e| AssetError::io(parent, e))?;
    }

    let (width, height) = canvas.dimensions();
    let (bytes, color_type) = match background {
        Background::Opaque => (
            DynamicImage::ImageRgba8(canvas).to_rgb8().into_raw(),
            ColorType::Rgb8,
        ),
        Background::Transparent => (canvas.into_raw(), ColorType::Rgba8),
    };

    let file = File::create(path).map_err(|e| AssetError::io(path, e))?;
    let mut out = BufWriter::new(file);
    let encoder =
        PngEncoder::new_with_quality(&mut out, CompressionType::Best, PngFilterType::Adaptive);
    encoder
        .write_image(&bytes, width, height, color_type)
        .map_err(|e| AssetError::encode(path, e))?;
    out.flush().map_err(|e| AssetError::io(path, e))?;

    Ok(())
}

/// Result of one asset in a batch.
#[derive(Debug)]
pub struct AssetOutcome {
    pub kind: AssetKind,
    pub name: String,
    pub path: PathBuf,
    pub result: AssetResult<()>,
}

#[derive(Debug, Default)]
pub struct BatchReport {
    pub outcomes: Vec<AssetOutcome>,
}

impl BatchReport {
    pub fn succeeded(&self) -> impl Iterator<Item = &AssetOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_ok())
    }

    pub fn failures(&self) -> impl Iterator<Item = &AssetOutcome> {
        self.outcomes.iter().filter(|o| o.result.is_err())
    }

    pub fn all_succeeded(&self) -> bool {
        self.outcomes.iter().all(|o| o.result.is_ok())
    }

    pub fn print_summary(&self, base_dir: &Path) {
        println!();
        println!(
            "Generated {} of {} assets in {}",
            self.succeeded().count(),
            self.outcomes.len(),
            base_dir.display()
        );
        for outcome in self.failures() {
            if let Err(err) = &outcome.result {
                println!("  ✗ {}: {err}", outcome.name);
            }
        }
    }
}

/// Generate every asset, isolating failures so one bad asset never stops the rest.
pub fn generate_assets(specs: &[AssetSpec], composer: &Composer) -> BatchReport {
    let mut report = BatchReport::default();

    for spec in specs {
        let name = spec.name();
        println!("Generating {name}...");

        let result = composer.compose_asset(spec);
        match &result {
            Ok(()) => println!("✓ Generated {name}"),
            Err(err) => println!("✗ Error creating {name}: {err}"),
        }

        report.outcomes.push(AssetOutcome {
            kind: spec.kind,
            name,
            path: spec.path.clone(),
            result,
        });
    }

    report
}

/// Re-open a generated asset and check it matches its spec.
pub fn verify_asset(spec: &AssetSpec) -> Result<()> {
    let img = image::open(&spec.path)
        .with_context(|| format!("Failed to open {}", spec.path.display()))?;

    if img.width() != spec.width || img.height() != spec.height {
        anyhow::bail!(
            "{} is {}x{}, expected {}x{}",
            spec.name(),
            img.width(),
            img.height(),
            spec.width,
            spec.height
        );
    }

    let rgba = img.to_rgba8();
    match spec.background {
        Background::Transparent => {
            if !rgba.pixels().any(|p| p[3] == 0) {
                anyhow::bail!("{} has no transparent pixels", spec.name());
            }
        }
        Background::Opaque => {
            if rgba.pixels().any(|p| p[3] != 255) {
                anyhow::bail!("{} should be fully opaque", spec.name());
            }
        }
    }

    Ok(())
}

/// Color of the pixel at (`x`, `y`) of a rendered canvas, ignoring alpha.
pub fn color_at(canvas: &RgbaImage, x: u32, y: u32) -> Option<Color> {
    if x >= canvas.width() || y >= canvas.height() {
        return None;
    }
    let p = canvas.get_pixel(x, y);
    Some(Color::new(p[0], p[1], p[2]))
}

use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use together_assets::{
    app_config::{asset_dir_name, write_app_config, AppConfig},
    asset_gen::{generate_assets, standard_assets, Composer},
    caption::{default_font_paths, CaptionFont},
    color::Palette,
};
use tracing::Level;

#[derive(Debug, Parser)]
#[clap(
    name = "together-assets",
    about = "Generate the Better Together app icon, splash screen, adaptive icon and favicon"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = "./assets")]
    output: PathBuf,

    /// TrueType font for the splash caption, tried before the system fonts.
    #[clap(long, value_name = "PATH")]
    font: Option<PathBuf>,

    /// Don't write the app.json fragment next to the assets.
    #[clap(long)]
    no_app_config: bool,

    /// Print debug diagnostics to stderr.
    #[clap(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_max_level(if args.verbose {
            Level::DEBUG
        } else {
            Level::WARN
        })
        .init();

    let palette = Palette::brand().context("Invalid brand palette")?;
    let fonts: Vec<PathBuf> = args
        .font
        .iter()
        .cloned()
        .chain(default_font_paths())
        .collect();
    let composer = Composer::new(palette, CaptionFont::load(&fonts));

    println!("\nBetter Together - Asset Generator");
    println!("Primary: {}", palette.primary.to_hex());
    println!("Accent:  {}", palette.accent.to_hex());
    println!("Caption font: {}\n", composer.font().describe());

    let specs = standard_assets(&args.output);
    let report = generate_assets(&specs, &composer);

    if !args.no_app_config {
        let asset_dir = asset_dir_name(&args.output);
        let config = AppConfig::from_report(&report, &asset_dir, palette.background);
        if config.is_empty() {
            println!("No assets generated, skipping app config");
        } else {
            match write_app_config(&args.output, &config) {
                Ok(path) => println!("✓ Generated {}", path.display()),
                Err(err) => println!("✗ Error creating app config: {err:#}"),
            }
        }
    }

    report.print_summary(&args.output);

    if !report.all_succeeded() {
        anyhow::bail!(
            "{} of {} assets failed",
            report.failures().count(),
            report.outcomes.len()
        );
    }

    Ok(())
}

use std::path::PathBuf;
use together_assets::asset_gen::{standard_assets, verify_asset};

fn main() {
    let dir = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("assets"));

    println!("Checking assets in: {}", dir.display());

    let mut failed = 0;
    for spec in standard_assets(&dir) {
        match verify_asset(&spec) {
            Ok(()) => println!("  ✓ {} ({}x{})", spec.name(), spec.width, spec.height),
            Err(err) => {
                failed += 1;
                println!("  ✗ {}: {err:#}", spec.name());
            }
        }
    }

    if failed > 0 {
        println!("\n⚠ {failed} asset(s) failed verification");
        std::process::exit(1);
    }
    println!("\n✓ All assets look right");
}

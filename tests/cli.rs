use std::process::Command;
use tempfile::TempDir;

const BINARY: &str = env!("CARGO_BIN_EXE_together-assets");

/// Runs `together-assets -o <dir>` with a font that does not exist and checks
/// every asset plus the app config fragment is produced.
#[test]
fn test_cli_generates_all_assets() {
    let temp_dir = TempDir::new().expect("Failed to create temp directory");
    let output_dir = temp_dir.path().join("assets");

    let output = Command::new(BINARY)
        .arg("-o")
        .arg(&output_dir)
        .arg("--font")
        .arg(temp_dir.path().join("missing.ttf"))
        .output()
        .expect("Failed to run together-assets");

    if !output.status.success() {
        eprintln!("stdout: {}", String::from_utf8_lossy(&output.stdout));
        eprintln!("stderr: {}", String::from_utf8_lossy(&output.stderr));
        panic!("together-assets failed with status {}", output.status);
    }

    for name in ["icon.png", "splash.png", "adaptive-icon.png", "favicon.png"] {
        let path = output_dir.join(name);
        assert!(path.exists(), "{} should exist", path.display());
    }
    assert!(output_dir.join("app-assets.json").exists());

    let splash = image::open(output_dir.join("splash.png")).expect("Failed to load splash");
    assert_eq!((splash.width(), splash.height()), (2048, 2732));

    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("Generated 4 of 4 assets"), "stdout: {stdout}");
}

#[test]
fn test_cli_skips_app_config_when_asked() {
    let temp_dir = TempDir::new().unwrap();

    let status = Command::new(BINARY)
        .arg("--output")
        .arg(temp_dir.path())
        .arg("--no-app-config")
        .status()
        .expect("Failed to run together-assets");

    assert!(status.success());
    assert!(temp_dir.path().join("favicon.png").exists());
    assert!(!temp_dir.path().join("app-assets.json").exists());
}

/// Every asset fails when the output path sits under a regular file, but all
/// four are still attempted and reported before the non-zero exit.
#[test]
fn test_cli_reports_every_failure() {
    let temp_dir = TempDir::new().unwrap();
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"plain file").unwrap();

    let output = Command::new(BINARY)
        .arg("-o")
        .arg(blocker.join("assets"))
        .output()
        .expect("Failed to run together-assets");

    assert!(!output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    for name in ["icon.png", "splash.png", "adaptive-icon.png", "favicon.png"] {
        assert!(
            stdout.contains(&format!("✗ Error creating {name}")),
            "missing failure line for {name}: {stdout}"
        );
    }
    assert!(stdout.contains("Generated 0 of 4 assets"));
}

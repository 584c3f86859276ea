//! Expo `app.json` fragment for the generated assets
//!
//! This module defines a subset of Expo's app config schema covering the
//! fields that reference store assets. The fragment is written next to the
//! assets so it can be merged into the project's `app.json`.

use crate::asset_gen::{AssetKind, BatchReport};
use crate::color::Color;
use anyhow::{Context, Result};
use serde::Serialize;
use std::path::{Path, PathBuf};

/// File name of the written fragment
pub const APP_CONFIG_FILE: &str = "app-assets.json";

/// Root of the fragment
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct AppConfig {
    pub expo: ExpoConfig,
}

/// The `expo` object of an Expo app config
///
/// Only fields whose asset was actually generated are present.
#[derive(Serialize, Debug, Clone, Default, PartialEq)]
pub struct ExpoConfig {
    /// Path to the 1024x1024 app icon
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,

    /// Splash screen shown while the app loads
    #[serde(skip_serializing_if = "Option::is_none")]
    pub splash: Option<SplashConfig>,

    /// Android specific settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub android: Option<AndroidConfig>,

    /// Web specific settings
    #[serde(skip_serializing_if = "Option::is_none")]
    pub web: Option<WebConfig>,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SplashConfig {
    pub image: String,

    /// How the image is fit to the screen ("contain", "cover" or "native")
    pub resize_mode: String,

    /// Fill color around the image, CSS hex notation
    pub background_color: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AndroidConfig {
    pub adaptive_icon: AdaptiveIconConfig,
}

/// Foreground layer plus the color the launcher composites it over
#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdaptiveIconConfig {
    pub foreground_image: String,
    pub background_color: String,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct WebConfig {
    pub favicon: String,
}

impl AppConfig {
    /// Builds the fragment from the assets that were generated successfully
    ///
    /// # Arguments
    /// * `report` - Outcome of the asset batch
    /// * `asset_dir` - Directory name the assets live in, relative to the app root
    /// * `background` - Background color for the splash and adaptive icon
    pub fn from_report(report: &BatchReport, asset_dir: &str, background: Color) -> Self {
        let mut expo = ExpoConfig::default();
        let background = background.to_hex();

        for outcome in report.succeeded() {
            let path = relative_asset_path(asset_dir, &outcome.name);
            match outcome.kind {
                AssetKind::Icon => expo.icon = Some(path),
                AssetKind::Splash => {
                    expo.splash = Some(SplashConfig {
                        image: path,
                        resize_mode: "contain".to_string(),
                        background_color: background.clone(),
                    })
                }
                AssetKind::AdaptiveIcon => {
                    expo.android = Some(AndroidConfig {
                        adaptive_icon: AdaptiveIconConfig {
                            foreground_image: path,
                            background_color: background.clone(),
                        },
                    })
                }
                AssetKind::Favicon => expo.web = Some(WebConfig { favicon: path }),
            }
        }

        Self { expo }
    }

    pub fn is_empty(&self) -> bool {
        self.expo == ExpoConfig::default()
    }
}

fn relative_asset_path(asset_dir: &str, file_name: &str) -> String {
    if asset_dir.is_empty() {
        format!("./{file_name}")
    } else {
        format!("./{asset_dir}/{file_name}")
    }
}

/// Name of the last component of `dir`, used as the asset folder in the fragment
pub fn asset_dir_name(dir: &Path) -> String {
    dir.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}

/// Writes the fragment as pretty JSON into `dir`
///
/// # Returns
/// * `Result<PathBuf>` - Path of the written file
///
/// # Errors
/// Returns an error if serialization or writing fails
pub fn write_app_config(dir: &Path, config: &AppConfig) -> Result<PathBuf> {
    let path = dir.join(APP_CONFIG_FILE);
    let json = serde_json::to_string_pretty(config).context("Failed to serialize app config")?;
    std::fs::write(&path, json)
        .with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset_gen::AssetOutcome;
    use crate::error::AssetError;

    fn outcome(kind: AssetKind, ok: bool) -> AssetOutcome {
        AssetOutcome {
            kind,
            name: kind.file_name().to_string(),
            path: PathBuf::from("assets").join(kind.file_name()),
            result: if ok {
                Ok(())
            } else {
                Err(AssetError::render("boom"))
            },
        }
    }

    #[test]
    fn test_full_report_serialization() {
        let report = BatchReport {
            outcomes: vec![
                outcome(AssetKind::Icon, true),
                outcome(AssetKind::Splash, true),
                outcome(AssetKind::AdaptiveIcon, true),
                outcome(AssetKind::Favicon, true),
            ],
        };
        let config = AppConfig::from_report(&report, "assets", Color::WHITE);
        let value = serde_json::to_value(&config).unwrap();

        assert_eq!(
            value,
            serde_json::json!({
                "expo": {
                    "icon": "./assets/icon.png",
                    "splash": {
                        "image": "./assets/splash.png",
                        "resizeMode": "contain",
                        "backgroundColor": "#FFFFFF"
                    },
                    "android": {
                        "adaptiveIcon": {
                            "foregroundImage": "./assets/adaptive-icon.png",
                            "backgroundColor": "#FFFFFF"
                        }
                    },
                    "web": { "favicon": "./assets/favicon.png" }
                }
            })
        );
    }

    #[test]
    fn test_failed_assets_are_left_out() {
        let report = BatchReport {
            outcomes: vec![
                outcome(AssetKind::Icon, true),
                outcome(AssetKind::Splash, false),
            ],
        };
        let config = AppConfig::from_report(&report, "assets", Color::WHITE);
        assert!(config.expo.icon.is_some());
        assert!(config.expo.splash.is_none());

        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("splash"));
        assert!(!json.contains("android"));
    }

    #[test]
    fn test_empty_report() {
        let config = AppConfig::from_report(&BatchReport::default(), "assets", Color::WHITE);
        assert!(config.is_empty());
    }

    #[test]
    fn test_asset_dir_name() {
        assert_eq!(asset_dir_name(Path::new("mobile/assets")), "assets");
        assert_eq!(relative_asset_path("", "icon.png"), "./icon.png");
    }

    #[test]
    fn test_write_app_config() {
        let dir = tempfile::tempdir().unwrap();
        let report = BatchReport {
            outcomes: vec![outcome(AssetKind::Favicon, true)],
        };
        let config = AppConfig::from_report(&report, "assets", Color::WHITE);

        let path = write_app_config(dir.path(), &config).unwrap();
        assert_eq!(path, dir.path().join(APP_CONFIG_FILE));

        let content = std::fs::read_to_string(&path).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&content).unwrap();
        assert_eq!(parsed["expo"]["web"]["favicon"], "./assets/favicon.png");
    }
}

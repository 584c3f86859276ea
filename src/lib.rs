pub mod app_config;
pub mod asset_gen;
pub mod bitmap_font;
pub mod caption;
pub mod color;
pub mod error;
pub mod heart;

pub use asset_gen::{
    generate_assets, standard_assets, AssetKind, AssetSpec, Background, BatchReport, Composer,
};
pub use caption::CaptionFont;
pub use color::{gradient_color, hex_to_rgb, Color, Palette};
pub use error::{AssetError, AssetResult};
pub use heart::{render_heart, HeartSpec, Point};

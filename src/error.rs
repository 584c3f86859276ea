use std::path::{Path, PathBuf};

pub type AssetResult<T> = Result<T, AssetError>;

#[derive(thiserror::Error, Debug)]
pub enum AssetError {
    #[error("render error: {0}")]
    Render(String),

    #[error("io error at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("io error: cannot encode {path:?}: {source}")]
    Encode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
}

impl AssetError {
    pub fn render(msg: impl Into<String>) -> Self {
        Self::Render(msg.into())
    }

    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    pub fn encode(path: impl AsRef<Path>, source: image::ImageError) -> Self {
        Self::Encode {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// Invalid geometry or spec input.
    pub fn is_render(&self) -> bool {
        matches!(self, Self::Render(_))
    }

    /// Anything that went wrong touching the filesystem or encoding the file.
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::Encode { .. })
    }
}

use std::path::PathBuf;

/// Failure to bring an image or a config file into the app.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    #[error("failed to read '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    #[error("image '{name}' has no pixels")]
    Empty { name: String },

    #[error("invalid slider config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("image loader for '{name}' stopped before finishing")]
    Disconnected { name: String },
}

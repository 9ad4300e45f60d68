use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Errors from the I/O-bearing parts of the crate.
///
/// Formatting itself never fails; these cover config loading, rendering to
/// PDF and the command line.
#[derive(Debug, Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid config: {0}")]
    Config(#[from] toml::de::Error),

    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("PDF output needs an output path or an input file")]
    MissingOutput,
}

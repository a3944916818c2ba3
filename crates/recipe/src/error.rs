use thiserror::Error;

/// Errors raised while reading or writing recipe catalogs.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("Catalog I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Catalog is not valid recipe JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Errors raised by a recipe synthesizer or while promoting its output.
#[derive(Error, Debug)]
pub enum SynthesisError {
    #[error("Synthesis backend error: {0}")]
    Backend(String),

    #[error("Synthesized payload is not a recipe draft: {0}")]
    InvalidPayload(#[from] serde_json::Error),

    #[error("Synthesized draft has no usable name")]
    MissingName,
}

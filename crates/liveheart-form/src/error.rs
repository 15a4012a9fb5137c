use liveheart_core::error::CoreError;
use liveheart_diagram::error::DiagramError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormError {
    #[error("failed to read form file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },

    #[error("invalid form file: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Field(#[from] CoreError),

    #[error(transparent)]
    Segment(#[from] DiagramError),
}

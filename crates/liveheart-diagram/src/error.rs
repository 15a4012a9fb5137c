use liveheart_core::error::CoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DiagramError {
    #[error("not a segment field name: {0}")]
    InvalidFieldName(String),

    #[error(transparent)]
    Segment(#[from] CoreError),
}

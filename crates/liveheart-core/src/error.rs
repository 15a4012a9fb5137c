use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("unknown measurement: {0}")]
    UnknownMeasurement(String),

    #[error("unknown metric: {0}")]
    UnknownMetric(String),

    #[error("unknown section: {0}")]
    UnknownSection(String),

    #[error("segment {0} is outside 1..=17")]
    InvalidSegment(u8),
}

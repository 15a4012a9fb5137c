//! liveheart-diagram
//!
//! The myocardial segment diagram: one wall-motion state per segment, cycled
//! by activation and mirrored into an external sink so it can be submitted
//! with the form.

pub mod error;
pub mod map;
pub mod summary;

pub use map::{SegmentMap, SegmentSink, SegmentSource};
pub use summary::WallMotionSummary;

use liveheart_core::models::measurement::MeasurementKey;
use liveheart_core::models::segment::SegmentId;

/// Notifications delivered to the orchestrator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormEvent {
    /// A measurement field was edited. Every input is re-read, not just
    /// this one.
    InputChanged(MeasurementKey),
    /// A segment on the diagram was clicked.
    SegmentActivated(SegmentId),
}

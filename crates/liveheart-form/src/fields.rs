//! Accessors between the orchestrator and whatever hosts the form.

use std::collections::BTreeMap;

use liveheart_core::models::measurement::MeasurementKey;
use liveheart_core::models::metric::MetricKey;
use liveheart_core::models::segment::{SegmentId, SegmentState};
use liveheart_diagram::{SegmentSink, SegmentSource};

/// Read access to the raw text of every measurement field.
pub trait InputSource {
    fn read(&self, key: MeasurementKey) -> Option<String>;
}

/// Write access to the display field of every derived metric.
pub trait MetricSink {
    fn show(&mut self, key: MetricKey, display: String);
    fn clear(&mut self, key: MetricKey);
}

/// Everything the orchestrator needs from its host.
pub trait FormFields: InputSource + MetricSink + SegmentSource + SegmentSink {}

impl<T> FormFields for T where T: InputSource + MetricSink + SegmentSource + SegmentSink {}

/// In-memory form: raw inputs, metric displays and hidden segment fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldStore {
    inputs: BTreeMap<MeasurementKey, String>,
    displays: BTreeMap<MetricKey, String>,
    segments: BTreeMap<SegmentId, String>,
}

impl FieldStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_input(&mut self, key: MeasurementKey, raw: impl Into<String>) {
        self.inputs.insert(key, raw.into());
    }

    pub fn clear_input(&mut self, key: MeasurementKey) {
        self.inputs.remove(&key);
    }

    /// Current display text of a metric; empty when cleared.
    pub fn display(&self, key: MetricKey) -> &str {
        self.displays.get(&key).map(String::as_str).unwrap_or("")
    }

    pub fn set_segment(&mut self, id: SegmentId, raw: impl Into<String>) {
        self.segments.insert(id, raw.into());
    }

    /// Current hidden-field value of a segment.
    pub fn segment(&self, id: SegmentId) -> Option<&str> {
        self.segments.get(&id).map(String::as_str)
    }
}

impl InputSource for FieldStore {
    fn read(&self, key: MeasurementKey) -> Option<String> {
        self.inputs.get(&key).cloned()
    }
}

impl MetricSink for FieldStore {
    fn show(&mut self, key: MetricKey, display: String) {
        self.displays.insert(key, display);
    }

    fn clear(&mut self, key: MetricKey) {
        self.displays.remove(&key);
    }
}

impl SegmentSource for FieldStore {
    fn initial_state(&self, id: SegmentId) -> Option<String> {
        self.segments.get(&id).cloned()
    }
}

impl SegmentSink for FieldStore {
    fn mirror(&mut self, id: SegmentId, state: SegmentState) {
        self.segments.insert(id, state.ordinal().to_string());
    }
}

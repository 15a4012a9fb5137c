use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use super::measurement::MeasurementKey;
use super::metric::MetricKey;
use super::section::Section;
use super::segment::{SegmentId, SegmentState};

/// Patient details entered by the clinician alongside the measurements.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientDetails {
    pub full_name: String,
    #[serde(default)]
    pub age: Option<u32>,
    #[serde(default)]
    pub exam_datetime: Option<jiff::civil::DateTime>,
}

/// The patient block of a submission.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct PatientRecord {
    pub full_name: String,
    pub age: Option<u32>,
    pub exam_datetime: Option<jiff::civil::DateTime>,
    pub height: Option<f64>,
    pub weight: Option<f64>,
    pub bmi: Option<f64>,
    pub bsa: Option<f64>,
}

/// The echo-measurements block of a submission.
///
/// `measurements` and `metrics` always carry every key; an absent value is
/// `null`, never omitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct EchoRecord {
    pub examination_id: Uuid,
    pub measurements: BTreeMap<MeasurementKey, Option<f64>>,
    pub metrics: BTreeMap<MetricKey, Option<f64>>,
    pub segments: BTreeMap<SegmentId, u8>,
    #[serde(default)]
    pub disabled_sections: Vec<Section>,
}

impl EchoRecord {
    pub fn measurement(&self, key: MeasurementKey) -> Option<f64> {
        self.measurements.get(&key).copied().flatten()
    }

    pub fn metric(&self, key: MetricKey) -> Option<f64> {
        self.metrics.get(&key).copied().flatten()
    }

    /// Segment state, treating missing or out-of-range ordinals as normal.
    pub fn segment_state(&self, id: SegmentId) -> SegmentState {
        self.segments
            .get(&id)
            .and_then(|ordinal| SegmentState::from_ordinal(*ordinal))
            .unwrap_or_default()
    }

    pub fn is_enabled(&self, section: Section) -> bool {
        !self.disabled_sections.contains(&section)
    }
}

/// Everything the submission collaborator sends for one examination.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct SubmissionPayload {
    pub patient: PatientRecord,
    pub echo: EchoRecord,
}

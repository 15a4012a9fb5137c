//! Template context for the protocol report.
//!
//! Flattens a [`SubmissionPayload`] into labelled, pre-formatted rows so the
//! template only has to lay them out.

use liveheart_core::models::measurement::MeasurementKey;
use liveheart_core::models::metric::MetricKey;
use liveheart_core::models::payload::SubmissionPayload;
use liveheart_core::models::section::Section;
use liveheart_core::models::segment::SegmentId;
use liveheart_diagram::WallMotionSummary;
use liveheart_metrics::graph::MetricGraph;
use serde::Serialize;

use crate::styles::DocumentStyles;

const MISSING: &str = "-";

#[derive(Debug, Clone, Serialize)]
pub struct ProtocolContext {
    pub institution: Option<String>,
    pub title: String,
    pub patient: PatientSummary,
    pub sections: Vec<SectionRows>,
    pub wall_motion: WallMotionSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct PatientSummary {
    pub full_name: String,
    pub exam_date: String,
    pub age: String,
    pub height: String,
    pub weight: String,
    pub bmi: String,
    pub bsa: String,
    pub heart_rate: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct SectionRows {
    pub id: String,
    pub name: String,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Row {
    pub label: String,
    pub value: String,
}

/// `"<value> <unit>"`, or `-` when absent.
pub fn format_measurement(value: Option<f64>, unit: &str) -> String {
    match value {
        Some(v) => with_unit(v.to_string(), unit),
        None => MISSING.to_string(),
    }
}

/// Like [`format_measurement`] but with the metric's fixed precision.
pub fn format_metric(key: MetricKey, value: Option<f64>) -> String {
    let Some(v) = value else {
        return MISSING.to_string();
    };
    let digits = MetricGraph::standard()
        .definition(key)
        .map(|def| usize::from(def.precision))
        .unwrap_or(2);
    with_unit(format!("{v:.digits$}"), key.info().unit)
}

fn with_unit(value: String, unit: &str) -> String {
    if unit.is_empty() {
        value
    } else {
        format!("{value} {unit}")
    }
}

impl ProtocolContext {
    pub fn from_payload(payload: &SubmissionPayload, styles: &DocumentStyles) -> Self {
        let patient = &payload.patient;
        let echo = &payload.echo;

        let summary = PatientSummary {
            full_name: patient.full_name.clone(),
            exam_date: patient
                .exam_datetime
                .map(|dt| dt.strftime("%d.%m.%Y").to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            age: patient
                .age
                .map(|a| a.to_string())
                .unwrap_or_else(|| MISSING.to_string()),
            height: format_measurement(patient.height, "cm"),
            weight: format_measurement(patient.weight, "kg"),
            bmi: format_metric(MetricKey::Bmi, patient.bmi),
            bsa: format_metric(MetricKey::Bsa, patient.bsa),
            heart_rate: format_measurement(echo.measurement(MeasurementKey::LvHr), "bpm"),
        };

        // Height and weight live in the patient header.
        let sections = Section::ALL
            .into_iter()
            .filter(|s| *s != Section::Anthropometrics && echo.is_enabled(*s))
            .map(|section| {
                let measurements = MeasurementKey::in_section(section)
                    .filter(|key| *key != MeasurementKey::LvHr)
                    .map(|key| {
                        let info = key.info();
                        Row {
                            label: info.name.to_string(),
                            value: format_measurement(echo.measurement(key), info.unit),
                        }
                    });
                let metrics = MetricKey::ALL
                    .into_iter()
                    .filter(|key| key.section() == section)
                    .map(|key| Row {
                        label: key.info().name.to_string(),
                        value: format_metric(key, echo.metric(key)),
                    });

                SectionRows {
                    id: section.id().to_string(),
                    name: section.name().to_string(),
                    rows: measurements.chain(metrics).collect(),
                }
            })
            .collect();

        let wall_motion = WallMotionSummary::from_states(
            SegmentId::all().map(|id| (id, echo.segment_state(id))),
        );

        Self {
            institution: styles.institution.clone(),
            title: "Echocardiography Protocol".to_string(),
            patient: summary,
            sections,
            wall_motion,
        }
    }
}

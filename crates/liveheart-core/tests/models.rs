use std::collections::BTreeMap;

use liveheart_core::error::CoreError;
use liveheart_core::models::measurement::MeasurementKey;
use liveheart_core::models::metric::MetricKey;
use liveheart_core::models::payload::{EchoRecord, PatientRecord, SubmissionPayload};
use liveheart_core::models::section::Section;
use liveheart_core::models::segment::{SegmentId, SegmentState, SEGMENT_COUNT};
use pretty_assertions::assert_eq;

#[test]
fn measurement_ids_match_serde_names() {
    for key in MeasurementKey::ALL {
        let json = serde_json::to_value(key).unwrap();
        assert_eq!(json, serde_json::Value::String(key.id().to_string()));
        assert_eq!(key.id().parse::<MeasurementKey>().unwrap(), key);
    }
}

#[test]
fn metric_ids_match_serde_names() {
    for key in MetricKey::ALL {
        let json = serde_json::to_value(key).unwrap();
        assert_eq!(json, serde_json::Value::String(key.id().to_string()));
        assert_eq!(key.id().parse::<MetricKey>().unwrap(), key);
    }
}

#[test]
fn unknown_ids_are_rejected() {
    assert!(matches!(
        "lv_xyz".parse::<MeasurementKey>(),
        Err(CoreError::UnknownMeasurement(id)) if id == "lv_xyz"
    ));
    assert!(matches!(
        "gfr".parse::<MetricKey>(),
        Err(CoreError::UnknownMetric(_))
    ));
    assert!(matches!(
        "spleen".parse::<Section>(),
        Err(CoreError::UnknownSection(_))
    ));
}

#[test]
fn every_section_has_measurements() {
    for section in Section::ALL {
        assert!(
            MeasurementKey::in_section(section).count() > 0,
            "{section} has no measurements"
        );
    }
    assert_eq!(
        MeasurementKey::in_section(Section::Anthropometrics).collect::<Vec<_>>(),
        vec![MeasurementKey::Height, MeasurementKey::Weight]
    );
}

#[test]
fn segment_state_cycles_through_four_states() {
    let mut state = SegmentState::Normal;
    let mut seen = Vec::new();
    for _ in 0..8 {
        seen.push(state.ordinal());
        state = state.next();
    }
    assert_eq!(seen, vec![0, 1, 2, 3, 0, 1, 2, 3]);
    assert_eq!(SegmentState::from_ordinal(4), None);
    assert_eq!(SegmentState::from_ordinal(2), Some(SegmentState::Akinesis));
}

#[test]
fn segment_ids_are_bounded() {
    assert!(SegmentId::new(0).is_err());
    assert!(SegmentId::new(SEGMENT_COUNT + 1).is_err());
    assert_eq!(SegmentId::new(17).unwrap().number(), 17);
    assert_eq!(SegmentId::all().count(), usize::from(SEGMENT_COUNT));
}

#[test]
fn payload_keeps_absent_values_as_null() {
    let mut measurements = BTreeMap::new();
    measurements.insert(MeasurementKey::Height, Some(180.0));
    measurements.insert(MeasurementKey::Weight, None);

    let mut metrics = BTreeMap::new();
    metrics.insert(MetricKey::Bsa, None);

    let mut segments = BTreeMap::new();
    segments.insert(SegmentId::new(3).unwrap(), 2);

    let payload = SubmissionPayload {
        patient: PatientRecord {
            full_name: "Test Patient".to_string(),
            age: Some(54),
            exam_datetime: None,
            height: Some(180.0),
            weight: None,
            bmi: None,
            bsa: None,
        },
        echo: EchoRecord {
            examination_id: uuid::Uuid::nil(),
            measurements,
            metrics,
            segments,
            disabled_sections: vec![Section::Aorta],
        },
    };

    let json = serde_json::to_value(&payload).unwrap();
    assert_eq!(json["echo"]["measurements"]["height"], 180.0);
    assert!(json["echo"]["measurements"]["weight"].is_null());
    assert!(json["echo"]["metrics"]["bsa"].is_null());
    assert_eq!(json["echo"]["segments"]["3"], 2);
    assert_eq!(json["echo"]["disabled_sections"][0], "aorta");

    let back: SubmissionPayload = serde_json::from_value(json).unwrap();
    assert_eq!(back, payload);
    assert_eq!(
        back.echo.segment_state(SegmentId::new(3).unwrap()),
        SegmentState::Akinesis
    );
    assert_eq!(
        back.echo.segment_state(SegmentId::new(4).unwrap()),
        SegmentState::Normal
    );
    assert!(!back.echo.is_enabled(Section::Aorta));
    assert!(back.echo.is_enabled(Section::LeftVentricle));
}

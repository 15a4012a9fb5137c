use liveheart_core::models::measurement::MeasurementKey as M;
use liveheart_core::models::metric::MetricKey as K;
use liveheart_core::models::section::Section;
use liveheart_core::models::segment::{SegmentId, SegmentState};
use liveheart_form::error::FormError;
use liveheart_form::fields::InputSource;
use liveheart_form::form_file::FormFile;
use liveheart_form::orchestrator::Orchestrator;

const FORM: &str = r#"{
    "patient": { "full_name": "Petrov I. I.", "age": 47, "exam_datetime": "2026-03-14T09:30:00" },
    "inputs": { "height": "180", "weight": "80,0", "lv_edd": 5, "lv_esd": "3.2" },
    "segments": { "segment_4": "1", "9": 2 },
    "activations": [4, 4, 11],
    "disabled_sections": ["aorta"]
}"#;

fn segment(n: u8) -> SegmentId {
    SegmentId::new(n).unwrap()
}

#[test]
fn parses_text_and_numeric_fields() {
    let form = FormFile::parse(FORM).unwrap();
    let store = form.to_store().unwrap();

    assert_eq!(store.read(M::Height).as_deref(), Some("180"));
    assert_eq!(store.read(M::Weight).as_deref(), Some("80,0"));
    assert_eq!(store.read(M::LvEdd).as_deref(), Some("5"));
    assert_eq!(store.read(M::LvEdv), None);
    assert_eq!(store.segment(segment(4)), Some("1"));
    assert_eq!(store.segment(segment(9)), Some("2"));

    assert_eq!(form.patient.full_name, "Petrov I. I.");
    assert_eq!(form.patient.age, Some(47));
    assert_eq!(form.disabled_sections, vec![Section::Aorta]);
    assert_eq!(
        form.activations().unwrap(),
        vec![segment(4), segment(4), segment(11)]
    );
}

#[test]
fn replaying_activations_settles_segments() {
    let form = FormFile::parse(FORM).unwrap();
    let mut orchestrator = Orchestrator::start(form.to_store().unwrap());
    for id in form.activations().unwrap() {
        orchestrator.activate(id);
    }

    let segments = orchestrator.segments();
    assert_eq!(segments.state(segment(4)), SegmentState::Dyskinesis);
    assert_eq!(segments.state(segment(9)), SegmentState::Akinesis);
    assert_eq!(segments.state(segment(11)), SegmentState::Hypokinesis);
    assert_eq!(orchestrator.fields().display(K::Fs), "36.0");
    assert_eq!(orchestrator.fields().display(K::Bsa), "2.00");
}

#[test]
fn missing_sections_default_to_empty() {
    let form = FormFile::parse("{}").unwrap();
    assert!(form.inputs.is_empty());
    assert!(form.activations().unwrap().is_empty());
    assert_eq!(form.patient.full_name, "");
}

#[test]
fn unknown_measurement_is_rejected() {
    let form = FormFile::parse(r#"{ "inputs": { "heigth": "180" } }"#).unwrap();
    assert!(matches!(form.to_store(), Err(FormError::Field(_))));
}

#[test]
fn bad_segment_keys_are_rejected() {
    let form = FormFile::parse(r#"{ "segments": { "segment_18": "1" } }"#).unwrap();
    assert!(form.to_store().is_err());

    let form = FormFile::parse(r#"{ "segments": { "apex": "1" } }"#).unwrap();
    assert!(matches!(form.to_store(), Err(FormError::Segment(_))));

    let form = FormFile::parse(r#"{ "activations": [0] }"#).unwrap();
    assert!(matches!(form.activations(), Err(FormError::Field(_))));
}

#[test]
fn load_reports_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let result = FormFile::load(&dir.path().join("absent.json"));
    assert!(matches!(result, Err(FormError::Read { .. })));
}

#[test]
fn load_reads_from_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("form.json");
    std::fs::write(&path, FORM).unwrap();

    let form = FormFile::load(&path).unwrap();
    assert_eq!(form.activations.len(), 3);
}

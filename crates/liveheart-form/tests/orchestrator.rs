use liveheart_core::models::measurement::MeasurementKey as M;
use liveheart_core::models::metric::MetricKey as K;
use liveheart_core::models::payload::{PatientDetails, PatientRecord};
use liveheart_core::models::section::Section;
use liveheart_core::models::segment::{SegmentId, SegmentState};
use liveheart_form::event::FormEvent;
use liveheart_form::fields::FieldStore;
use liveheart_form::orchestrator::Orchestrator;
use pretty_assertions::assert_eq;
use tokio::sync::mpsc;

fn segment(n: u8) -> SegmentId {
    SegmentId::new(n).unwrap()
}

fn store() -> FieldStore {
    let mut store = FieldStore::new();
    store.set_input(M::Height, "180");
    store.set_input(M::Weight, "80");
    store.set_input(M::LvEdv, "120");
    store.set_input(M::LvEsv, "50");
    store.set_input(M::LvHr, "70");
    store
}

#[test]
fn start_populates_every_derived_field() {
    let form = Orchestrator::start(store());

    let fields = form.fields();
    assert_eq!(fields.display(K::Bsa), "2.00");
    assert_eq!(fields.display(K::Bmi), "24.7");
    assert_eq!(fields.display(K::Ef), "58.3");
    assert_eq!(fields.display(K::Co), "4.90");
    assert_eq!(fields.display(K::Ci), "2.45");
    assert_eq!(fields.display(K::Lvm), "");
    assert_eq!(form.evaluation().value(K::Mo), Some(4900.0));
}

#[test]
fn input_change_triggers_full_recompute() {
    let mut form = Orchestrator::start(store());
    assert_eq!(form.fields().display(K::Fs), "");

    form.fields_mut().set_input(M::LvEdd, "5,0");
    form.fields_mut().set_input(M::LvEsd, "3.2");
    // Edits are not visible until the host notifies.
    assert_eq!(form.fields().display(K::Fs), "");

    form.handle(FormEvent::InputChanged(M::LvEsd));
    assert_eq!(form.fields().display(K::Fs), "36.0");
}

#[test]
fn clearing_height_clears_dependent_displays() {
    let mut form = Orchestrator::start(store());
    assert_eq!(form.fields().display(K::Ci), "2.45");

    form.fields_mut().clear_input(M::Height);
    form.handle(FormEvent::InputChanged(M::Height));

    let fields = form.fields();
    for key in [K::Bmi, K::Bsa, K::Ci, K::Lvmi, K::Lavi] {
        assert_eq!(fields.display(key), "", "{key} should be cleared");
    }
    // Unrelated metrics survive.
    assert_eq!(fields.display(K::Co), "4.90");
}

#[test]
fn unparseable_input_behaves_as_empty() {
    let mut form = Orchestrator::start(store());
    form.fields_mut().set_input(M::Weight, "eighty");
    form.handle(FormEvent::InputChanged(M::Weight));

    assert_eq!(form.fields().display(K::Bsa), "");
    assert_eq!(form.evaluation().value(K::Bsa), None);
}

#[test]
fn recompute_is_idempotent() {
    let mut form = Orchestrator::start(store());
    let first = form.recompute().clone();
    let fields = form.fields().clone();

    let second = form.recompute().clone();
    assert_eq!(first, second);
    assert_eq!(&fields, form.fields());
}

#[test]
fn segment_states_load_from_hidden_fields() {
    let mut fields = store();
    fields.set_segment(segment(4), "1");
    fields.set_segment(segment(9), "3");
    fields.set_segment(segment(12), "garbage");

    let form = Orchestrator::start(fields);
    let segments = form.segments();
    assert_eq!(segments.state(segment(4)), SegmentState::Hypokinesis);
    assert_eq!(segments.state(segment(9)), SegmentState::Dyskinesis);
    assert_eq!(segments.state(segment(12)), SegmentState::Normal);
    assert_eq!(segments.state(segment(1)), SegmentState::Normal);
}

#[test]
fn activation_cycles_and_mirrors_into_hidden_field() {
    let mut form = Orchestrator::start(store());
    let id = segment(7);

    assert_eq!(form.activate(id), SegmentState::Hypokinesis);
    assert_eq!(form.fields().segment(id), Some("1"));

    form.handle(FormEvent::SegmentActivated(id));
    form.handle(FormEvent::SegmentActivated(id));
    assert_eq!(form.segments().state(id), SegmentState::Dyskinesis);
    assert_eq!(form.fields().segment(id), Some("3"));

    assert_eq!(form.activate(id), SegmentState::Normal);
    assert_eq!(form.fields().segment(id), Some("0"));
    assert_eq!(form.fields().segment(segment(8)), None);
}

#[tokio::test]
async fn event_loop_drains_channel_in_order() {
    let form = Orchestrator::start(FieldStore::new());
    let (tx, rx) = mpsc::unbounded_channel();

    tx.send(FormEvent::SegmentActivated(segment(3))).unwrap();
    tx.send(FormEvent::SegmentActivated(segment(3))).unwrap();
    tx.send(FormEvent::SegmentActivated(segment(5))).unwrap();
    tx.send(FormEvent::InputChanged(M::Height)).unwrap();
    drop(tx);

    let form = form.run(rx).await;
    assert_eq!(form.segments().state(segment(3)), SegmentState::Akinesis);
    assert_eq!(form.segments().state(segment(5)), SegmentState::Hypokinesis);
    assert_eq!(form.evaluation().computed(), 0);
}

#[test]
fn payload_reflects_current_fields() {
    let mut form = Orchestrator::start(store());
    form.activate(segment(2));
    form.fields_mut().set_input(M::AortaDiameter, " 32 ");

    let details = PatientDetails {
        full_name: "Ivanova A. P.".to_string(),
        age: Some(61),
        exam_datetime: None,
    };
    let payload = form.payload(&details, &[Section::PulmonaryArtery]);

    assert_eq!(
        payload.patient,
        PatientRecord {
            full_name: "Ivanova A. P.".to_string(),
            age: Some(61),
            exam_datetime: None,
            height: Some(180.0),
            weight: Some(80.0),
            bmi: Some(24.7),
            bsa: Some(2.0),
        }
    );

    let echo = &payload.echo;
    assert_eq!(echo.examination_id, form.examination_id());
    assert_eq!(echo.measurements.len(), M::ALL.len());
    assert_eq!(echo.metrics.len(), K::ALL.len());
    assert_eq!(echo.segments.len(), 17);
    // Read fresh, without waiting for a recompute.
    assert_eq!(echo.measurement(M::AortaDiameter), Some(32.0));
    assert_eq!(echo.measurement(M::LaVolume), None);
    assert_eq!(echo.metric(K::Ef), Some(58.3));
    assert_eq!(echo.metric(K::Mpap), None);
    assert_eq!(echo.segment_state(segment(2)), SegmentState::Hypokinesis);
    assert_eq!(echo.segments[&segment(2)], 1);
    assert!(!echo.is_enabled(Section::PulmonaryArtery));
    assert!(echo.is_enabled(Section::Aorta));
}

#[test]
fn payload_serializes_absent_values_as_null() {
    let form = Orchestrator::start(FieldStore::new());
    let payload = form.payload(&PatientDetails::default(), &[]);
    let json = serde_json::to_value(&payload).unwrap();

    assert!(json["patient"]["height"].is_null());
    assert!(json["patient"]["bsa"].is_null());
    assert!(json["echo"]["measurements"]["lv_edd"].is_null());
    assert!(json["echo"]["metrics"]["ef"].is_null());
    assert_eq!(json["echo"]["segments"]["1"], 0);
}

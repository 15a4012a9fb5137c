use liveheart_core::models::measurement::MeasurementKey;
use liveheart_metrics::resolve::resolve;
use liveheart_metrics::snapshot::MeasurementSnapshot;

#[test]
fn plain_and_comma_decimals_resolve() {
    assert_eq!(resolve("180"), Some(180.0));
    assert_eq!(resolve("4.5"), Some(4.5));
    assert_eq!(resolve("4,5"), Some(4.5));
    assert_eq!(resolve("  72,25 "), Some(72.25));
    assert_eq!(resolve("-1.5"), Some(-1.5));
}

#[test]
fn zero_is_a_value_not_absent() {
    assert_eq!(resolve("0"), Some(0.0));
    assert_eq!(resolve("0,0"), Some(0.0));
}

#[test]
fn blank_and_garbage_are_absent() {
    assert_eq!(resolve(""), None);
    assert_eq!(resolve("   "), None);
    assert_eq!(resolve("abc"), None);
    assert_eq!(resolve("12abc"), None);
    assert_eq!(resolve("1,2,3"), None);
    assert_eq!(resolve(","), None);
}

#[test]
fn non_finite_text_is_absent() {
    assert_eq!(resolve("inf"), None);
    assert_eq!(resolve("-infinity"), None);
    assert_eq!(resolve("NaN"), None);
    assert_eq!(resolve("1e400"), None);
}

#[test]
fn snapshot_reads_every_key_through_the_accessor() {
    let mut asked = Vec::new();
    let snapshot = MeasurementSnapshot::read_all(|key| {
        asked.push(key);
        match key {
            MeasurementKey::Height => Some("180".to_string()),
            MeasurementKey::Weight => Some("80,5".to_string()),
            MeasurementKey::LvEdd => Some("n/a".to_string()),
            _ => None,
        }
    });

    assert_eq!(asked.len(), MeasurementKey::ALL.len());
    assert_eq!(snapshot.get(MeasurementKey::Height), Some(180.0));
    assert_eq!(snapshot.get(MeasurementKey::Weight), Some(80.5));
    assert_eq!(snapshot.get(MeasurementKey::LvEdd), None);
    assert_eq!(snapshot.present(), 2);

    let map = snapshot.to_map();
    assert_eq!(map.len(), MeasurementKey::ALL.len());
    assert_eq!(map[&MeasurementKey::LvEdd], None);
}

#[test]
fn snapshot_set_drops_non_finite_values() {
    let mut snapshot = MeasurementSnapshot::new().with(MeasurementKey::Height, 170.0);
    snapshot.set(MeasurementKey::Height, Some(f64::NAN));
    assert_eq!(snapshot.get(MeasurementKey::Height), None);
}

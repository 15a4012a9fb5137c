use std::collections::BTreeMap;

use liveheart_core::models::measurement::MeasurementKey;

use crate::resolve::resolve;

/// Resolved measurement values at one point in time. Absent inputs are
/// simply not present in the map.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeasurementSnapshot {
    values: BTreeMap<MeasurementKey, f64>,
}

impl MeasurementSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve every measurement by reading its raw text through `read`.
    pub fn read_all<F>(mut read: F) -> Self
    where
        F: FnMut(MeasurementKey) -> Option<String>,
    {
        let mut snapshot = Self::new();
        for key in MeasurementKey::ALL {
            if let Some(value) = read(key).as_deref().and_then(resolve) {
                snapshot.values.insert(key, value);
            }
        }
        snapshot
    }

    /// Set or clear a value. Non-finite values are stored as absent.
    pub fn set(&mut self, key: MeasurementKey, value: Option<f64>) {
        match value.filter(|v| v.is_finite()) {
            Some(v) => {
                self.values.insert(key, v);
            }
            None => {
                self.values.remove(&key);
            }
        }
    }

    pub fn with(mut self, key: MeasurementKey, value: f64) -> Self {
        self.set(key, Some(value));
        self
    }

    pub fn get(&self, key: MeasurementKey) -> Option<f64> {
        self.values.get(&key).copied()
    }

    pub fn present(&self) -> usize {
        self.values.len()
    }

    /// Every measurement key with its value, absent ones included as `None`.
    pub fn to_map(&self) -> BTreeMap<MeasurementKey, Option<f64>> {
        MeasurementKey::ALL
            .into_iter()
            .map(|key| (key, self.get(key)))
            .collect()
    }
}

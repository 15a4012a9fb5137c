use std::collections::BTreeMap;

use liveheart_core::models::metric::MetricKey;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Round `value` to `digits` decimal places.
pub fn round_to(value: f64, digits: u8) -> f64 {
    let factor = 10f64.powi(i32::from(digits));
    (value * factor).round() / factor
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Slot {
    raw: Option<f64>,
    precision: u8,
}

/// The result of one full evaluation pass.
///
/// Holds the unrounded value of every metric (used by downstream formulas)
/// together with its precision; callers see rounded values and display
/// strings.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Evaluation {
    slots: BTreeMap<MetricKey, Slot>,
}

/// A metric as shown to the user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct MetricReading {
    pub key: MetricKey,
    pub value: Option<f64>,
    /// Fixed-point text, empty when the value is absent.
    pub display: String,
    pub unit: String,
}

impl Evaluation {
    pub(crate) fn insert(&mut self, key: MetricKey, raw: Option<f64>, precision: u8) {
        self.slots.insert(key, Slot { raw, precision });
    }

    /// Unrounded value.
    pub fn raw(&self, key: MetricKey) -> Option<f64> {
        self.slots.get(&key).and_then(|slot| slot.raw)
    }

    /// Value rounded to the metric's precision.
    pub fn value(&self, key: MetricKey) -> Option<f64> {
        let slot = self.slots.get(&key)?;
        slot.raw.map(|v| round_to(v, slot.precision))
    }

    /// Fixed-point display text; empty when absent.
    pub fn display(&self, key: MetricKey) -> String {
        match self.slots.get(&key) {
            Some(Slot {
                raw: Some(v),
                precision,
            }) => format!("{:.*}", usize::from(*precision), round_to(*v, *precision)),
            _ => String::new(),
        }
    }

    /// Number of metrics that produced a value.
    pub fn computed(&self) -> usize {
        self.slots.values().filter(|slot| slot.raw.is_some()).count()
    }

    /// Rounded values for every evaluated metric.
    pub fn to_map(&self) -> BTreeMap<MetricKey, Option<f64>> {
        self.slots.keys().map(|&key| (key, self.value(key))).collect()
    }

    pub fn readings(&self) -> Vec<MetricReading> {
        self.slots
            .keys()
            .map(|&key| MetricReading {
                key,
                value: self.value(key),
                display: self.display(key),
                unit: key.info().unit.to_string(),
            })
            .collect()
    }
}

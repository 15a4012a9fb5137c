//! Nearest-match lookup of mean pulmonary artery pressure from the AT/ET
//! ratio of pulmonary flow.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::MetricError;

/// Distances within this of each other count as a tie, so decimal
/// midpoints such as 0.275 tie despite binary rounding.
const TIE_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct LookupEntry {
    pub ratio: f64,
    pub pressure: f64,
}

/// Reference table of AT/ET ratio → mPAP (mmHg).
pub const MPAP_TABLE: [LookupEntry; 6] = [
    LookupEntry { ratio: 0.20, pressure: 69.0 },
    LookupEntry { ratio: 0.25, pressure: 50.0 },
    LookupEntry { ratio: 0.30, pressure: 36.0 },
    LookupEntry { ratio: 0.35, pressure: 26.0 },
    LookupEntry { ratio: 0.40, pressure: 19.0 },
    LookupEntry { ratio: 0.45, pressure: 13.0 },
];

/// A non-empty lookup table with finite entries.
#[derive(Debug, Clone, PartialEq)]
pub struct PressureTable {
    entries: Vec<LookupEntry>,
}

impl PressureTable {
    pub fn new(entries: Vec<LookupEntry>) -> Result<Self, MetricError> {
        if entries.is_empty() {
            return Err(MetricError::EmptyTable);
        }
        if let Some(index) = entries
            .iter()
            .position(|e| !e.ratio.is_finite() || !e.pressure.is_finite())
        {
            return Err(MetricError::InvalidTableEntry { index });
        }
        Ok(Self { entries })
    }

    /// The built-in mPAP table.
    pub fn mpap() -> Self {
        Self {
            entries: MPAP_TABLE.to_vec(),
        }
    }

    pub fn entries(&self) -> &[LookupEntry] {
        &self.entries
    }

    /// Pressure of the entry nearest to `ratio`.
    ///
    /// Scans in table order; a later entry replaces the current pick only
    /// when closer by more than [`TIE_TOLERANCE`], so ties resolve to the
    /// earlier entry.
    /// No interpolation, and no bound: ratios far outside the table resolve
    /// to the nearest end.
    pub fn estimate(&self, ratio: f64) -> f64 {
        let Some((first, rest)) = self.entries.split_first() else {
            return f64::NAN;
        };

        let mut nearest = first;
        let mut best = (first.ratio - ratio).abs();
        for entry in rest {
            let distance = (entry.ratio - ratio).abs();
            if distance < best - TIE_TOLERANCE {
                nearest = entry;
                best = distance;
            }
        }
        nearest.pressure
    }
}

//! JSON form files for the command-line driver.
//!
//! ```json
//! {
//!   "patient": { "full_name": "…", "age": 61, "exam_datetime": "2026-03-14T09:30" },
//!   "inputs": { "height": "180", "weight": "80,5", "lv_edd": 5.1 },
//!   "segments": { "segment_4": "1" },
//!   "activations": [4, 4, 11],
//!   "disabled_sections": ["aorta"]
//! }
//! ```

use std::collections::BTreeMap;
use std::path::Path;

use liveheart_core::models::measurement::MeasurementKey;
use liveheart_core::models::payload::PatientDetails;
use liveheart_core::models::section::Section;
use liveheart_core::models::segment::SegmentId;
use liveheart_diagram::map::parse_field_name;
use serde::Deserialize;

use crate::error::FormError;
use crate::fields::FieldStore;

/// A field value as written in the file: text as typed, or a bare number.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawField {
    Text(String),
    Number(f64),
}

impl RawField {
    pub fn to_text(&self) -> String {
        match self {
            RawField::Text(text) => text.clone(),
            RawField::Number(n) => n.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct FormFile {
    #[serde(default)]
    pub patient: PatientDetails,
    #[serde(default)]
    pub inputs: BTreeMap<String, RawField>,
    /// Keyed by `segment_<n>` or just `<n>`.
    #[serde(default)]
    pub segments: BTreeMap<String, RawField>,
    /// Segment numbers clicked after the form is loaded, in order.
    #[serde(default)]
    pub activations: Vec<u8>,
    #[serde(default)]
    pub disabled_sections: Vec<Section>,
}

impl FormFile {
    pub fn load(path: &Path) -> Result<Self, FormError> {
        let contents = std::fs::read_to_string(path).map_err(|source| FormError::Read {
            path: path.display().to_string(),
            source,
        })?;
        Self::parse(&contents)
    }

    pub fn parse(contents: &str) -> Result<Self, FormError> {
        Ok(serde_json::from_str(contents)?)
    }

    /// The initial state of the form, before any activation.
    pub fn to_store(&self) -> Result<FieldStore, FormError> {
        let mut store = FieldStore::new();
        for (id, raw) in &self.inputs {
            let key: MeasurementKey = id.parse()?;
            store.set_input(key, raw.to_text());
        }
        for (name, raw) in &self.segments {
            store.set_segment(segment_key(name)?, raw.to_text());
        }
        Ok(store)
    }

    pub fn activations(&self) -> Result<Vec<SegmentId>, FormError> {
        self.activations
            .iter()
            .map(|n| SegmentId::new(*n).map_err(FormError::from))
            .collect()
    }
}

fn segment_key(name: &str) -> Result<SegmentId, FormError> {
    match name.parse::<u8>() {
        Ok(number) => Ok(SegmentId::new(number)?),
        Err(_) => Ok(parse_field_name(name)?),
    }
}

use std::collections::BTreeMap;

use liveheart_core::models::segment::{SegmentId, SegmentState};

use crate::error::DiagramError;

const FIELD_PREFIX: &str = "segment_";

/// Supplies the externally held value a segment starts from.
pub trait SegmentSource {
    fn initial_state(&self, id: SegmentId) -> Option<String>;
}

/// Receives every state change so it can be submitted later.
pub trait SegmentSink {
    fn mirror(&mut self, id: SegmentId, state: SegmentState);
}

/// Name of the hidden form field carrying a segment's state.
pub fn field_name(id: SegmentId) -> String {
    format!("{FIELD_PREFIX}{id}")
}

pub fn parse_field_name(name: &str) -> Result<SegmentId, DiagramError> {
    let number = name
        .strip_prefix(FIELD_PREFIX)
        .and_then(|n| n.parse::<u8>().ok())
        .ok_or_else(|| DiagramError::InvalidFieldName(name.to_string()))?;
    Ok(SegmentId::new(number)?)
}

/// Parse an externally held state. Missing, non-numeric or out-of-range
/// values start the segment as normal.
pub fn parse_state(raw: Option<&str>) -> SegmentState {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return SegmentState::Normal;
    };

    match raw.parse::<u8>().ok().and_then(SegmentState::from_ordinal) {
        Some(state) => state,
        None => {
            tracing::warn!(value = raw, "ignoring unparseable segment state");
            SegmentState::Normal
        }
    }
}

/// Wall-motion state for all 17 segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SegmentMap {
    states: BTreeMap<SegmentId, SegmentState>,
}

impl Default for SegmentMap {
    fn default() -> Self {
        Self {
            states: SegmentId::all()
                .map(|id| (id, SegmentState::Normal))
                .collect(),
        }
    }
}

impl SegmentMap {
    /// Initialize every segment from `source`.
    pub fn load(source: &impl SegmentSource) -> Self {
        let states = SegmentId::all()
            .map(|id| (id, parse_state(source.initial_state(id).as_deref())))
            .collect();
        Self { states }
    }

    pub fn state(&self, id: SegmentId) -> SegmentState {
        self.states.get(&id).copied().unwrap_or_default()
    }

    /// The presentation attribute of a segment (its ordinal as text).
    pub fn data_state(&self, id: SegmentId) -> String {
        self.state(id).ordinal().to_string()
    }

    /// Advance one segment to its next state and mirror it into `sink`.
    pub fn activate(&mut self, id: SegmentId, sink: &mut impl SegmentSink) -> SegmentState {
        let state = self.states.entry(id).or_default();
        *state = state.next();
        let new_state = *state;

        sink.mirror(id, new_state);
        tracing::debug!(segment = id.number(), state = new_state.ordinal(), "segment activated");
        new_state
    }

    pub fn iter(&self) -> impl Iterator<Item = (SegmentId, SegmentState)> + '_ {
        self.states.iter().map(|(id, state)| (*id, *state))
    }

    /// Ordinals keyed by segment, as carried in the submission payload.
    pub fn ordinals(&self) -> BTreeMap<SegmentId, u8> {
        self.iter().map(|(id, state)| (id, state.ordinal())).collect()
    }
}

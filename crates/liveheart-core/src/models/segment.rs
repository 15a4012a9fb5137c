use std::fmt;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;

/// Number of myocardial segments on the diagram (17-segment model).
pub const SEGMENT_COUNT: u8 = 17;

/// Wall-motion state of a single myocardial segment.
///
/// The ordinal (0–3) is what gets mirrored into the form and the payload.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export)]
pub enum SegmentState {
    #[default]
    Normal,
    Hypokinesis,
    Akinesis,
    Dyskinesis,
}

impl SegmentState {
    pub const ALL: [SegmentState; 4] = [
        SegmentState::Normal,
        SegmentState::Hypokinesis,
        SegmentState::Akinesis,
        SegmentState::Dyskinesis,
    ];

    pub fn ordinal(self) -> u8 {
        match self {
            SegmentState::Normal => 0,
            SegmentState::Hypokinesis => 1,
            SegmentState::Akinesis => 2,
            SegmentState::Dyskinesis => 3,
        }
    }

    pub fn from_ordinal(ordinal: u8) -> Option<Self> {
        SegmentState::ALL.get(usize::from(ordinal)).copied()
    }

    /// The state after one activation: `(ordinal + 1) mod 4`.
    pub fn next(self) -> Self {
        SegmentState::ALL[usize::from((self.ordinal() + 1) % 4)]
    }

    pub fn label(self) -> &'static str {
        match self {
            SegmentState::Normal => "Normal",
            SegmentState::Hypokinesis => "Hypokinesis",
            SegmentState::Akinesis => "Akinesis",
            SegmentState::Dyskinesis => "Dyskinesis",
        }
    }
}

/// A segment number in `1..=SEGMENT_COUNT`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS)]
#[serde(try_from = "u8", into = "u8")]
#[ts(export)]
pub struct SegmentId(u8);

impl SegmentId {
    pub fn new(number: u8) -> Result<Self, CoreError> {
        if (1..=SEGMENT_COUNT).contains(&number) {
            Ok(Self(number))
        } else {
            Err(CoreError::InvalidSegment(number))
        }
    }

    pub fn number(self) -> u8 {
        self.0
    }

    /// All segments, 1 through 17.
    pub fn all() -> impl Iterator<Item = SegmentId> {
        (1..=SEGMENT_COUNT).map(SegmentId)
    }
}

impl TryFrom<u8> for SegmentId {
    type Error = CoreError;

    fn try_from(number: u8) -> Result<Self, Self::Error> {
        SegmentId::new(number)
    }
}

impl From<SegmentId> for u8 {
    fn from(id: SegmentId) -> Self {
        id.0
    }
}

impl fmt::Display for SegmentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

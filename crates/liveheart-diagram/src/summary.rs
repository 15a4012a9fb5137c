use liveheart_core::models::segment::{SegmentId, SegmentState};
use serde::Serialize;
use ts_rs::TS;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct AbnormalSegment {
    pub segment: SegmentId,
    pub state: SegmentState,
    pub label: String,
}

/// Regional wall-motion findings for the protocol conclusion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
pub struct WallMotionSummary {
    pub normal_count: usize,
    pub abnormal: Vec<AbnormalSegment>,
    pub conclusion: String,
}

impl WallMotionSummary {
    pub fn from_states(states: impl IntoIterator<Item = (SegmentId, SegmentState)>) -> Self {
        let mut normal_count = 0;
        let mut abnormal = Vec::new();

        for (segment, state) in states {
            if state == SegmentState::Normal {
                normal_count += 1;
            } else {
                abnormal.push(AbnormalSegment {
                    segment,
                    state,
                    label: state.label().to_string(),
                });
            }
        }
        abnormal.sort_by_key(|a| a.segment);

        let conclusion = if abnormal.is_empty() {
            "No regional wall-motion abnormalities detected.".to_string()
        } else {
            let findings = abnormal
                .iter()
                .map(|a| format!("Segment {}: {}", a.segment, a.label))
                .collect::<Vec<_>>()
                .join(", ");
            format!("Regional wall-motion abnormalities: {findings}")
        };

        Self {
            normal_count,
            abnormal,
            conclusion,
        }
    }

    pub fn is_normal(&self) -> bool {
        self.abnormal.is_empty()
    }
}

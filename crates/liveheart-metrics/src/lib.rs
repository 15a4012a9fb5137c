//! liveheart-metrics
//!
//! Derived echocardiographic metrics. Pure computation: raw field text is
//! resolved into a [`snapshot::MeasurementSnapshot`], and the
//! [`graph::MetricGraph`] evaluates every metric from scratch against it.

pub mod error;
pub mod evaluate;
pub mod graph;
pub mod pressure;
pub mod resolve;
pub mod snapshot;

use evaluate::Evaluation;
use graph::MetricGraph;
use snapshot::MeasurementSnapshot;

/// Evaluate the standard metric graph against `snapshot`.
pub fn evaluate(snapshot: &MeasurementSnapshot) -> Evaluation {
    MetricGraph::standard().evaluate(snapshot)
}

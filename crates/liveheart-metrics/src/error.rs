use liveheart_core::models::metric::MetricKey;
use thiserror::Error;

use crate::graph::Dependency;

/// Defects in a metric graph or lookup table. None of these can occur with
/// the built-in definitions; they guard custom graphs and tables.
#[derive(Debug, Error)]
pub enum MetricError {
    #[error("metric '{0}' is defined more than once")]
    DuplicateMetric(MetricKey),

    #[error("metric '{metric}' depends on undefined {dependency}")]
    UnknownDependency {
        metric: MetricKey,
        dependency: Dependency,
    },

    #[error("dependency cycle among metrics: {}", format_keys(.0))]
    Cycle(Vec<MetricKey>),

    #[error("lookup table is empty")]
    EmptyTable,

    #[error("lookup table entry {index} is not finite")]
    InvalidTableEntry { index: usize },
}

fn format_keys(keys: &[MetricKey]) -> String {
    keys.iter()
        .map(|k| k.id())
        .collect::<Vec<_>>()
        .join(", ")
}

//! The metric dependency graph.
//!
//! Each [`MetricDefinition`] names the values its formula needs, in argument
//! order. [`MetricGraph::new`] checks the definitions form a DAG and derives
//! the evaluation order by topological sort, so definitions can be declared
//! in any order.

use std::collections::{BTreeSet, HashMap};
use std::fmt;
use std::sync::LazyLock;

use liveheart_core::models::measurement::MeasurementKey;
use liveheart_core::models::metric::MetricKey;

use crate::error::MetricError;
use crate::evaluate::Evaluation;
use crate::pressure::PressureTable;
use crate::snapshot::MeasurementSnapshot;

/// A value a formula reads: either a raw measurement or another metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
    Input(MeasurementKey),
    Metric(MetricKey),
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Dependency::Input(key) => write!(f, "input '{key}'"),
            Dependency::Metric(key) => write!(f, "metric '{key}'"),
        }
    }
}

type Formula = Box<dyn Fn(&[f64]) -> f64 + Send + Sync>;

pub struct MetricDefinition {
    pub key: MetricKey,
    /// Digits kept after the decimal point when the value is emitted.
    pub precision: u8,
    pub requires: Vec<Dependency>,
    formula: Formula,
}

impl MetricDefinition {
    /// `formula` receives the values of `requires`, in the same order.
    pub fn new<F>(key: MetricKey, precision: u8, requires: Vec<Dependency>, formula: F) -> Self
    where
        F: Fn(&[f64]) -> f64 + Send + Sync + 'static,
    {
        Self {
            key,
            precision,
            requires,
            formula: Box::new(formula),
        }
    }

    /// Apply the formula. A non-finite result (e.g. division by a zero
    /// input) is absent.
    pub fn compute(&self, args: &[f64]) -> Option<f64> {
        let value = (self.formula)(args);
        value.is_finite().then_some(value)
    }

    fn metric_dependencies(&self) -> impl Iterator<Item = MetricKey> + '_ {
        self.requires.iter().filter_map(|dep| match dep {
            Dependency::Metric(key) => Some(*key),
            Dependency::Input(_) => None,
        })
    }
}

impl fmt::Debug for MetricDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MetricDefinition")
            .field("key", &self.key)
            .field("precision", &self.precision)
            .field("requires", &self.requires)
            .finish_non_exhaustive()
    }
}

#[derive(Debug)]
pub struct MetricGraph {
    definitions: Vec<MetricDefinition>,
    /// Indices into `definitions`, dependencies first.
    order: Vec<usize>,
}

static STANDARD: LazyLock<MetricGraph> = LazyLock::new(|| {
    MetricGraph::new(standard_definitions())
        .unwrap_or_else(|e| panic!("built-in metric graph is malformed: {e}"))
});

impl MetricGraph {
    /// Validate `definitions` and compute their evaluation order.
    pub fn new(definitions: Vec<MetricDefinition>) -> Result<Self, MetricError> {
        let mut index: HashMap<MetricKey, usize> = HashMap::new();
        for (i, def) in definitions.iter().enumerate() {
            if index.insert(def.key, i).is_some() {
                return Err(MetricError::DuplicateMetric(def.key));
            }
        }

        let mut in_degree = vec![0usize; definitions.len()];
        let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); definitions.len()];
        for (i, def) in definitions.iter().enumerate() {
            for dep in def.metric_dependencies() {
                let &from = index.get(&dep).ok_or(MetricError::UnknownDependency {
                    metric: def.key,
                    dependency: Dependency::Metric(dep),
                })?;
                dependents[from].push(i);
                in_degree[i] += 1;
            }
        }

        // Kahn's algorithm, always taking the earliest-declared ready metric
        // so the order is deterministic.
        let mut ready: BTreeSet<usize> = (0..definitions.len())
            .filter(|&i| in_degree[i] == 0)
            .collect();
        let mut order = Vec::with_capacity(definitions.len());

        while let Some(i) = ready.pop_first() {
            order.push(i);
            for &next in &dependents[i] {
                in_degree[next] -= 1;
                if in_degree[next] == 0 {
                    ready.insert(next);
                }
            }
        }

        if order.len() != definitions.len() {
            let stuck = (0..definitions.len())
                .filter(|&i| in_degree[i] > 0)
                .map(|i| definitions[i].key)
                .collect();
            return Err(MetricError::Cycle(stuck));
        }

        Ok(Self { definitions, order })
    }

    /// The built-in echocardiography metrics.
    ///
    /// # Panics
    ///
    /// Panics on first use if the built-in definitions do not form a valid
    /// graph, which indicates a bug in [`standard_definitions`].
    pub fn standard() -> &'static MetricGraph {
        &STANDARD
    }

    pub fn definitions(&self) -> &[MetricDefinition] {
        &self.definitions
    }

    pub fn definition(&self, key: MetricKey) -> Option<&MetricDefinition> {
        self.definitions.iter().find(|def| def.key == key)
    }

    /// Definitions in evaluation order.
    pub fn ordered(&self) -> impl Iterator<Item = &MetricDefinition> {
        self.order.iter().map(|&i| &self.definitions[i])
    }

    pub fn evaluation_order(&self) -> Vec<MetricKey> {
        self.ordered().map(|def| def.key).collect()
    }

    /// Evaluate every metric from scratch against `snapshot`.
    ///
    /// A metric is computed only when every value in its `requires` list is
    /// present; otherwise it is absent, which in turn makes every metric that
    /// depends on it absent.
    pub fn evaluate(&self, snapshot: &MeasurementSnapshot) -> Evaluation {
        let mut evaluation = Evaluation::default();
        let mut args = Vec::new();

        for def in self.ordered() {
            args.clear();
            let complete = def.requires.iter().all(|dep| {
                let value = match *dep {
                    Dependency::Input(key) => snapshot.get(key),
                    Dependency::Metric(key) => evaluation.raw(key),
                };
                value.map(|v| args.push(v)).is_some()
            });

            let value = if complete { def.compute(&args) } else { None };
            evaluation.insert(def.key, value, def.precision);
        }

        tracing::debug!(
            inputs = snapshot.present(),
            computed = evaluation.computed(),
            "metric graph evaluated"
        );
        evaluation
    }
}

/// The formulas of the echo protocol.
///
/// Anthropometrics use height in cm and weight in kg; LV dimensions are in
/// cm, volumes in ml, heart rate in bpm.
pub fn standard_definitions() -> Vec<MetricDefinition> {
    use Dependency::{Input, Metric};
    use MeasurementKey as M;
    use MetricKey as K;

    let mpap = PressureTable::mpap();

    vec![
        MetricDefinition::new(K::Bmi, 1, vec![Input(M::Height), Input(M::Weight)], |v| {
            v[1] / (v[0] / 100.0).powi(2)
        }),
        // Mosteller
        MetricDefinition::new(K::Bsa, 2, vec![Input(M::Height), Input(M::Weight)], |v| {
            (v[0] * v[1] / 3600.0).sqrt()
        }),
        MetricDefinition::new(K::Fs, 1, vec![Input(M::LvEdd), Input(M::LvEsd)], |v| {
            (v[0] - v[1]) / v[0] * 100.0
        }),
        MetricDefinition::new(K::Sv, 1, vec![Input(M::LvEdv), Input(M::LvEsv)], |v| {
            v[0] - v[1]
        }),
        MetricDefinition::new(K::Ef, 1, vec![Metric(K::Sv), Input(M::LvEdv)], |v| {
            v[0] / v[1] * 100.0
        }),
        MetricDefinition::new(K::Mo, 0, vec![Metric(K::Sv), Input(M::LvHr)], |v| v[0] * v[1]),
        MetricDefinition::new(K::Co, 2, vec![Metric(K::Mo)], |v| v[0] / 1000.0),
        MetricDefinition::new(K::Ci, 2, vec![Metric(K::Co), Metric(K::Bsa)], |v| v[0] / v[1]),
        // Devereux
        MetricDefinition::new(
            K::Lvm,
            0,
            vec![Input(M::LvEdd), Input(M::LvIvsd), Input(M::LvPw)],
            |v| 0.8 * (1.04 * (v[0] + v[1] + v[2]).powi(3) - v[0].powi(3)) + 0.6,
        ),
        MetricDefinition::new(K::Lvmi, 1, vec![Metric(K::Lvm), Metric(K::Bsa)], |v| {
            v[0] / v[1]
        }),
        MetricDefinition::new(K::Rwt, 2, vec![Input(M::LvPw), Input(M::LvEdd)], |v| {
            2.0 * v[0] / v[1]
        }),
        MetricDefinition::new(K::Lavi, 1, vec![Input(M::LaVolume), Metric(K::Bsa)], |v| {
            v[0] / v[1]
        }),
        MetricDefinition::new(K::MvEa, 2, vec![Input(M::MvE), Input(M::MvA)], |v| v[0] / v[1]),
        MetricDefinition::new(K::TvEa, 2, vec![Input(M::TvE), Input(M::TvA)], |v| v[0] / v[1]),
        MetricDefinition::new(K::PaAtEt, 2, vec![Input(M::PaAt), Input(M::PaEt)], |v| {
            v[0] / v[1]
        }),
        MetricDefinition::new(K::Mpap, 0, vec![Metric(K::PaAtEt)], move |v| {
            mpap.estimate(v[0])
        }),
    ]
}

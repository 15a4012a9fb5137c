use liveheart_core::models::measurement::MeasurementKey;
use liveheart_core::models::metric::MetricKey;
use liveheart_core::models::payload::{EchoRecord, PatientDetails, PatientRecord, SubmissionPayload};
use liveheart_core::models::section::Section;
use liveheart_core::models::segment::{SegmentId, SegmentState};
use liveheart_diagram::SegmentMap;
use liveheart_metrics::evaluate::Evaluation;
use liveheart_metrics::graph::MetricGraph;
use liveheart_metrics::snapshot::MeasurementSnapshot;
use tokio::sync::mpsc;
use uuid::Uuid;

use crate::event::FormEvent;
use crate::fields::FormFields;

/// Keeps a form's derived fields and segment diagram in sync with its
/// inputs.
///
/// Every input notification triggers a full rebuild: all inputs are re-read,
/// every metric is re-evaluated and every display is rewritten or cleared.
/// Handling is synchronous, so a pass is never observed half-done.
pub struct Orchestrator<F> {
    fields: F,
    graph: &'static MetricGraph,
    segments: SegmentMap,
    evaluation: Evaluation,
    examination_id: Uuid,
}

impl<F: FormFields> Orchestrator<F> {
    /// Load segment states from `fields` and populate every metric once.
    pub fn start(fields: F) -> Self {
        let segments = SegmentMap::load(&fields);
        let mut orchestrator = Self {
            fields,
            graph: MetricGraph::standard(),
            segments,
            evaluation: Evaluation::default(),
            examination_id: Uuid::new_v4(),
        };
        orchestrator.recompute();
        tracing::info!(
            examination_id = %orchestrator.examination_id,
            computed = orchestrator.evaluation.computed(),
            "form started"
        );
        orchestrator
    }

    pub fn handle(&mut self, event: FormEvent) {
        match event {
            FormEvent::InputChanged(key) => {
                tracing::trace!(field = key.id(), "input changed");
                self.recompute();
            }
            FormEvent::SegmentActivated(id) => {
                self.activate(id);
            }
        }
    }

    /// Handle events until every sender is dropped, then hand the
    /// orchestrator back.
    pub async fn run(mut self, mut events: mpsc::UnboundedReceiver<FormEvent>) -> Self {
        while let Some(event) = events.recv().await {
            self.handle(event);
        }
        tracing::debug!("form event channel closed");
        self
    }

    /// Re-read all inputs, re-evaluate every metric and write the results.
    pub fn recompute(&mut self) -> &Evaluation {
        let snapshot = self.read_snapshot();
        self.evaluation = self.graph.evaluate(&snapshot);

        for key in MetricKey::ALL {
            if self.evaluation.value(key).is_some() {
                self.fields.show(key, self.evaluation.display(key));
            } else {
                self.fields.clear(key);
            }
        }
        &self.evaluation
    }

    pub fn activate(&mut self, id: SegmentId) -> SegmentState {
        self.segments.activate(id, &mut self.fields)
    }

    /// Result of the most recent recompute pass.
    pub fn evaluation(&self) -> &Evaluation {
        &self.evaluation
    }

    pub fn segments(&self) -> &SegmentMap {
        &self.segments
    }

    pub fn fields(&self) -> &F {
        &self.fields
    }

    /// Direct access for the host. Edits take effect on the next
    /// [`FormEvent::InputChanged`].
    pub fn fields_mut(&mut self) -> &mut F {
        &mut self.fields
    }

    pub fn examination_id(&self) -> Uuid {
        self.examination_id
    }

    /// Assemble the submission payload from the current field values.
    pub fn payload(
        &self,
        details: &PatientDetails,
        disabled_sections: &[Section],
    ) -> SubmissionPayload {
        let snapshot = self.read_snapshot();
        let evaluation = self.graph.evaluate(&snapshot);

        let patient = PatientRecord {
            full_name: details.full_name.clone(),
            age: details.age,
            exam_datetime: details.exam_datetime,
            height: snapshot.get(MeasurementKey::Height),
            weight: snapshot.get(MeasurementKey::Weight),
            bmi: evaluation.value(MetricKey::Bmi),
            bsa: evaluation.value(MetricKey::Bsa),
        };

        let echo = EchoRecord {
            examination_id: self.examination_id,
            measurements: snapshot.to_map(),
            metrics: evaluation.to_map(),
            segments: self.segments.ordinals(),
            disabled_sections: disabled_sections.to_vec(),
        };

        SubmissionPayload { patient, echo }
    }

    fn read_snapshot(&self) -> MeasurementSnapshot {
        MeasurementSnapshot::read_all(|key| self.fields.read(key))
    }
}

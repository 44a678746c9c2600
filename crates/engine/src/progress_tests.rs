// SPDX-License-Identifier: MIT

use super::*;
use parking_lot::Mutex;
use tmt_core::plan::PlanId;
use tmt_core::step::StepKind;

struct RecordingSink {
    names: Mutex<Vec<&'static str>>,
}

impl ProgressSink for RecordingSink {
    fn on_event(&self, event: &Event) {
        self.names.lock().push(event.name());
    }
}

#[test]
fn noop_sink_drops_every_event() {
    let sink = NoopProgressSink;
    sink.on_event(&Event::StepStarted { plan_id: PlanId::new("/p"), step: StepKind::Discover });
}

#[test]
fn a_custom_sink_observes_event_names() {
    let sink = RecordingSink { names: Mutex::new(Vec::new()) };
    sink.on_event(&Event::StepStarted { plan_id: PlanId::new("/p"), step: StepKind::Discover });
    sink.on_event(&Event::RunCompleted { run_id: tmt_core::run::RunId::new("r1") });
    assert_eq!(*sink.names.lock(), vec!["step_started", "run_completed"]);
}

// SPDX-License-Identifier: MIT

//! An injectable progress callback the dispatcher and invoker report
//! state transitions to, decoupled from any concrete terminal UI —
//! grounded on the teacher's pluggable per-entity activity logger, here
//! reduced to the single append-only hook a plan run needs.

use tmt_core::Event;

pub trait ProgressSink: Send + Sync {
    fn on_event(&self, event: &Event);
}

/// Discards every event. Used by callers that only care about the
/// final `results.yaml`.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopProgressSink;

impl ProgressSink for NoopProgressSink {
    fn on_event(&self, _event: &Event) {}
}

/// Logs every event through `tracing`, matching the structured-field
/// style the rest of the engine uses for effect execution.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingProgressSink;

impl ProgressSink for TracingProgressSink {
    fn on_event(&self, event: &Event) {
        tracing::info!(event = event.name(), fields = ?event.fields(), "plan progress");
    }
}

#[cfg(test)]
#[path = "progress_tests.rs"]
mod tests;

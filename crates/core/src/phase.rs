// SPDX-License-Identifier: MIT

//! A single phase within a step: one `how`-flavored unit of work (an
//! `install` phase inside `prepare`, a `shell` phase inside `finish`, ...).
//! Phases carry their own ordering and guest targeting (spec §4.3).

use crate::step::StepKind;
use serde::{Deserialize, Serialize};

/// Explicit phase ordering, default `50` (spec §4.3: "order (default 50,
/// lower runs first)").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PhaseOrder(pub i64);

impl Default for PhaseOrder {
    fn default() -> Self {
        PhaseOrder(50)
    }
}

/// The `where` selector naming which guest role(s) a phase runs on. An
/// empty selector means "every active guest".
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Where(pub Vec<String>);

impl Where {
    pub fn any() -> Self {
        Where(Vec::new())
    }

    pub fn matches_all_guests(&self) -> bool {
        self.0.is_empty()
    }

    pub fn names(&self) -> &[String] {
        &self.0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Phase {
    /// Fully-qualified phase id, e.g. `prepare/install-deps`, used as the
    /// deterministic tie-break key when `order` and source position agree
    /// (see DESIGN.md).
    pub id: String,
    pub step: StepKind,
    pub how: String,
    pub order: PhaseOrder,
    /// Position among phases declared for the same step, in source order;
    /// used as the secondary sort key before the id tie-break.
    pub source_index: usize,
    pub where_: Where,
    pub when: Vec<String>,
    /// Statically disables the phase regardless of `when` (spec §4.1:
    /// `enabled(phase, context) -> bool`).
    pub enabled: bool,
    pub summary: Option<String>,
    /// The command body for `how: shell`-flavored phases; other `how`
    /// values leave this unset and are resolved by a plugin keyed on
    /// `how` (out of scope here; see the `local` guest's shell fallback).
    pub script: Option<String>,
    /// Forces the dispatcher to run this phase on its guests one at a
    /// time even when more than one is selected (spec §4.4).
    pub sequential: bool,
}

impl Phase {
    pub fn new(id: impl Into<String>, step: StepKind, how: impl Into<String>, source_index: usize) -> Self {
        Self {
            id: id.into(),
            step,
            how: how.into(),
            order: PhaseOrder::default(),
            source_index,
            where_: Where::any(),
            when: Vec::new(),
            enabled: true,
            summary: None,
            script: None,
            sequential: false,
        }
    }

    pub fn with_order(mut self, order: i64) -> Self {
        self.order = PhaseOrder(order);
        self
    }

    pub fn with_where(mut self, names: Vec<String>) -> Self {
        self.where_ = Where(names);
        self
    }

    pub fn with_when(mut self, rules: Vec<String>) -> Self {
        self.when = rules;
        self
    }

    pub fn with_script(mut self, script: Option<String>) -> Self {
        self.script = script;
        self
    }

    pub fn with_sequential(mut self, sequential: bool) -> Self {
        self.sequential = sequential;
        self
    }

    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }
}

/// Sorts phases within a step: `order` ascending, then source order, then
/// the fully-qualified id as a last, fully deterministic tie-break.
pub fn sort_phases(phases: &mut [Phase]) {
    phases.sort_by(|a, b| {
        a.order
            .cmp(&b.order)
            .then(a.source_index.cmp(&b.source_index))
            .then(a.id.cmp(&b.id))
    });
}

#[cfg(test)]
#[path = "phase_tests.rs"]
mod tests;

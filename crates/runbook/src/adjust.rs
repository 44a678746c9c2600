// SPDX-License-Identifier: MIT

//! Adjust rules: context-conditional patches applied to a plan's raw
//! metadata before it is deserialized into a [`crate::PlanDef`] (spec
//! §4.1 "Context & Adjust"). A key suffixed with `+` extends an existing
//! sequence instead of replacing it, mirroring the merge-key convention
//! real-world metadata trees use for this kind of list accumulation.

use crate::error::PlanError;
use serde::{Deserialize, Serialize};
use tmt_core::context::any_matches;
use tmt_core::Context;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AdjustRule {
    #[serde(default)]
    pub when: Vec<String>,
    pub patch: serde_yaml::Value,
}

/// Applies every rule whose `when` matches `context`, in order, folding
/// each patch into `base`.
pub fn apply(mut base: serde_yaml::Value, rules: &[AdjustRule], context: &Context) -> Result<serde_yaml::Value, PlanError> {
    for rule in rules {
        let matched = any_matches(&rule.when, context)
            .map_err(|err| PlanError::InvalidAdjustWhen(err.to_string()))?;
        if matched {
            tracing::debug!(when = ?rule.when, "adjust rule matched");
            merge(&mut base, &rule.patch);
        }
    }
    Ok(base)
}

fn merge(base: &mut serde_yaml::Value, patch: &serde_yaml::Value) {
    let (serde_yaml::Value::Mapping(base_map), serde_yaml::Value::Mapping(patch_map)) = (base.clone(), patch) else {
        *base = patch.clone();
        return;
    };
    let mut merged = base_map;
    for (key, value) in patch_map {
        let serde_yaml::Value::String(key_str) = key else {
            merged.insert(key.clone(), value.clone());
            continue;
        };
        if let Some(stripped) = key_str.strip_suffix('+') {
            let target_key = serde_yaml::Value::String(stripped.to_string());
            let mut combined = match merged.get(&target_key) {
                Some(serde_yaml::Value::Sequence(existing)) => existing.clone(),
                _ => Vec::new(),
            };
            if let serde_yaml::Value::Sequence(additions) = value {
                combined.extend(additions.clone());
            } else {
                combined.push(value.clone());
            }
            merged.insert(target_key, serde_yaml::Value::Sequence(combined));
            continue;
        }

        let existing = merged.get(key).cloned();
        match existing {
            Some(mut existing_value) => {
                merge(&mut existing_value, value);
                merged.insert(key.clone(), existing_value);
            }
            None => {
                merged.insert(key.clone(), value.clone());
            }
        }
    }
    *base = serde_yaml::Value::Mapping(merged);
}

#[cfg(test)]
#[path = "adjust_tests.rs"]
mod tests;

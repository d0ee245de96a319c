use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::model::CoursePlan;

/// Per-course completion flags keyed by step number.
///
/// Serializes as a JSON object with stringified step keys, e.g. `{"4":true}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgressRecord(BTreeMap<u32, bool>);

impl ProgressRecord {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_done(&self, step: u32) -> bool {
        self.0.get(&step).copied().unwrap_or(false)
    }

    pub fn set(&mut self, step: u32, done: bool) {
        self.0.insert(step, done);
    }

    /// Flips the flag for `step` and returns the new value.
    pub fn toggle(&mut self, step: u32) -> bool {
        let done = !self.is_done(step);
        self.0.insert(step, done);
        done
    }

    /// Number of the plan's lessons marked done. Flags for steps the plan
    /// does not contain are ignored.
    #[must_use]
    pub fn completed_in(&self, plan: &CoursePlan) -> usize {
        plan.lessons()
            .iter()
            .filter(|lesson| self.is_done(lesson.step))
            .count()
    }

    /// First lesson (in plan order) not marked done.
    #[must_use]
    pub fn first_pending(&self, plan: &CoursePlan) -> Option<u32> {
        plan.lessons()
            .iter()
            .map(|lesson| lesson.step)
            .find(|step| !self.is_done(*step))
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `round(100 * completed / total)`, or 0 when there is nothing to complete.
#[must_use]
pub fn completion_percent(completed: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let completed = completed.min(total);
    // Integer round-half-up.
    let pct = (completed * 200 + total) / (total * 2);
    u8::try_from(pct).unwrap_or(100)
}

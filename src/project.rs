use crate::task::{Task, flatten_tasks};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};

/// A portfolio project: its own schedule window, the projects it follows, and
/// its work breakdown structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    pub id: String,
    pub title: String,
    pub start: Timestamp,
    pub end: Timestamp,
    #[serde(default)]
    pub predecessor_ids: Vec<String>,
    #[serde(default)]
    pub tasks: Vec<Task>,
    #[serde(default)]
    pub engaged_workload: f64,
    #[serde(default)]
    pub consumed_workload: f64,
}

impl Project {
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        start: impl Into<Timestamp>,
        end: impl Into<Timestamp>,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            start: start.into(),
            end: end.into(),
            predecessor_ids: Vec::new(),
            tasks: Vec::new(),
            engaged_workload: 0.0,
            consumed_workload: 0.0,
        }
    }

    pub fn with_predecessors<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.predecessor_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_tasks(mut self, tasks: Vec<Task>) -> Self {
        self.tasks = tasks;
        self
    }

    pub fn with_workload(mut self, engaged: f64, consumed: f64) -> Self {
        self.engaged_workload = engaged;
        self.consumed_workload = consumed;
        self
    }

    /// Consumed over engaged workload as a percentage, capped to `0..=100`.
    /// Zero when nothing is engaged.
    pub fn progress(&self) -> f64 {
        let engaged = self.engaged_workload;
        if !engaged.is_finite() || engaged <= 0.0 || !self.consumed_workload.is_finite() {
            return 0.0;
        }
        (self.consumed_workload / self.engaged_workload * 100.0).clamp(0.0, 100.0)
    }

    /// Number of tasks at every depth of the WBS.
    pub fn task_count(&self) -> usize {
        flatten_tasks(&self.tasks).len()
    }
}

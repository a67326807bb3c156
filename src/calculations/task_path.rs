use super::select_ids;
use crate::config::TiePolicy;
use crate::graph::longest_path_by_end_date;
use crate::task::{Task, flatten_tasks};
use std::collections::HashSet;
use tracing::debug;

/// Critical path over one project's WBS, all depths flattened.
pub struct TaskPathAnalyzer<'a> {
    tasks: &'a [Task],
    ties: TiePolicy,
}

impl<'a> TaskPathAnalyzer<'a> {
    pub fn new(tasks: &'a [Task]) -> Self {
        Self {
            tasks,
            ties: TiePolicy::Union,
        }
    }

    pub fn with_ties(mut self, ties: TiePolicy) -> Self {
        self.ties = ties;
        self
    }

    pub fn execute(&self) -> HashSet<String> {
        if self.tasks.is_empty() {
            return HashSet::new();
        }
        let flat = flatten_tasks(self.tasks);
        let summary = longest_path_by_end_date(&flat);
        debug!(
            tasks = flat.len(),
            chain_len = summary.best_path_ids.len(),
            tied = summary.tied_path_ids.len(),
            end = ?summary.best_end_date,
            "task critical path"
        );
        select_ids(summary, self.ties)
    }
}

/// Ids of the tasks on every chain that ends on the latest date.
pub fn analyze_task_critical_path(tasks: &[Task]) -> HashSet<String> {
    TaskPathAnalyzer::new(tasks).execute()
}

use super::select_ids;
use crate::config::TiePolicy;
use crate::graph::longest_path_by_end_date;
use crate::project::Project;
use std::collections::HashSet;
use tracing::debug;

/// Critical path over the project-level predecessor graph.
pub struct ProjectPathAnalyzer<'a> {
    projects: &'a [Project],
    ties: TiePolicy,
}

impl<'a> ProjectPathAnalyzer<'a> {
    pub fn new(projects: &'a [Project]) -> Self {
        Self {
            projects,
            ties: TiePolicy::Single,
        }
    }

    pub fn with_ties(mut self, ties: TiePolicy) -> Self {
        self.ties = ties;
        self
    }

    pub fn execute(&self) -> HashSet<String> {
        let summary = longest_path_by_end_date(self.projects);
        debug!(
            projects = self.projects.len(),
            chain_len = summary.best_path_ids.len(),
            end = ?summary.best_end_date,
            "project critical path"
        );
        select_ids(summary, self.ties)
    }
}

/// Ids of the projects on the chain that ends last.
pub fn analyze_critical_path(projects: &[Project]) -> HashSet<String> {
    ProjectPathAnalyzer::new(projects).execute()
}

pub mod project_path;
pub mod task_path;

pub use project_path::{ProjectPathAnalyzer, analyze_critical_path};
pub use task_path::{TaskPathAnalyzer, analyze_task_critical_path};

use crate::config::TiePolicy;
use crate::graph::ChainSummary;
use std::collections::HashSet;

fn select_ids(summary: ChainSummary<String>, ties: TiePolicy) -> HashSet<String> {
    match ties {
        TiePolicy::Single => summary.best_path_ids.into_iter().collect(),
        TiePolicy::Union => summary.tied_path_ids.into_iter().collect(),
    }
}

//! Pre-commit checks for new dependency edges.
//!
//! The editing flow must call one of these before a predecessor or
//! dependency list changes. The analyzers only defend against cycles that
//! slipped in from elsewhere; this is the one place cycles are refused.

use crate::graph::{detects_cycle, predecessor_map};
use crate::project::Project;
use crate::task::{Task, TreeError, find_task, flatten_tasks, update_task};
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GuardError {
    #[error("unknown node {0}")]
    UnknownNode(String),
    #[error("making {owner} depend on {candidate} would create a dependency cycle")]
    CycleDetected { owner: String, candidate: String },
    #[error(transparent)]
    Tree(#[from] TreeError),
}

/// Would `owner_id` listing `candidate_id` as a predecessor close a cycle?
pub fn would_create_cycle(projects: &[Project], candidate_id: &str, owner_id: &str) -> bool {
    let edges = predecessor_map(projects);
    detects_cycle(&edges, &owner_id.to_string(), &candidate_id.to_string())
}

/// Same check over one project's task tree, all depths included.
pub fn would_create_task_cycle(tasks: &[Task], candidate_id: &str, owner_id: &str) -> bool {
    let flat = flatten_tasks(tasks);
    let edges = predecessor_map(&flat);
    detects_cycle(&edges, &owner_id.to_string(), &candidate_id.to_string())
}

/// Adds `candidate_id` to the owner's predecessors once the guard has passed.
/// Already-present predecessors are left as they are.
pub fn add_predecessor(
    projects: &mut [Project],
    owner_id: &str,
    candidate_id: &str,
) -> Result<(), GuardError> {
    if !projects.iter().any(|project| project.id == candidate_id) {
        return Err(GuardError::UnknownNode(candidate_id.to_string()));
    }
    let owner_idx = projects
        .iter()
        .position(|project| project.id == owner_id)
        .ok_or_else(|| GuardError::UnknownNode(owner_id.to_string()))?;

    if would_create_cycle(projects, candidate_id, owner_id) {
        warn!(owner = owner_id, candidate = candidate_id, "rejected project predecessor");
        return Err(GuardError::CycleDetected {
            owner: owner_id.to_string(),
            candidate: candidate_id.to_string(),
        });
    }

    let owner = &mut projects[owner_idx];
    if !owner.predecessor_ids.iter().any(|id| id == candidate_id) {
        owner.predecessor_ids.push(candidate_id.to_string());
    }
    Ok(())
}

/// Returns a new task tree in which `owner_id` depends on `candidate_id`.
pub fn add_task_dependency(
    tasks: &[Task],
    owner_id: &str,
    candidate_id: &str,
) -> Result<Vec<Task>, GuardError> {
    for id in [candidate_id, owner_id] {
        if find_task(tasks, id).is_none() {
            return Err(GuardError::UnknownNode(id.to_string()));
        }
    }

    if would_create_task_cycle(tasks, candidate_id, owner_id) {
        warn!(owner = owner_id, candidate = candidate_id, "rejected task dependency");
        return Err(GuardError::CycleDetected {
            owner: owner_id.to_string(),
            candidate: candidate_id.to_string(),
        });
    }

    let next = update_task(tasks, owner_id, |task| {
        if !task.dependency_ids.iter().any(|id| id == candidate_id) {
            task.dependency_ids.push(candidate_id.to_string());
        }
    })?;
    Ok(next)
}

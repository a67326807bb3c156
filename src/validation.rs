use crate::project::Project;
use crate::task::{Task, flatten_tasks};
use std::collections::HashSet;
use thiserror::Error;

const MAX_PROGRESS: f64 = 100.0;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

pub fn validate_task(task: &Task) -> Result<(), ValidationError> {
    if !task.progress.is_finite() || task.progress < 0.0 || task.progress > MAX_PROGRESS {
        return Err(ValidationError::new(format!(
            "task {} has invalid progress {} (must be between 0 and 100)",
            task.id, task.progress
        )));
    }
    if task.id.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "task '{}' requires a non-empty id",
            task.name
        )));
    }
    Ok(())
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.id.trim().is_empty() {
        return Err(ValidationError::new(format!(
            "project '{}' requires a non-empty id",
            project.title
        )));
    }
    for (label, value) in [
        ("engaged", project.engaged_workload),
        ("consumed", project.consumed_workload),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::new(format!(
                "project {} has invalid {label} workload {value}",
                project.id
            )));
        }
    }

    let mut seen_tasks = HashSet::new();
    for task in flatten_tasks(&project.tasks) {
        if !seen_tasks.insert(task.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate task id {} in project {}",
                task.id, project.id
            )));
        }
        validate_task(task)?;
    }
    Ok(())
}

/// Structural checks only. Dangling ids and dependency cycles are tolerated
/// by the analyzers and are not reported here.
pub fn validate_projects(projects: &[Project]) -> Result<(), ValidationError> {
    let mut seen_ids = HashSet::with_capacity(projects.len());
    for project in projects {
        if !seen_ids.insert(project.id.as_str()) {
            return Err(ValidationError::new(format!(
                "duplicate project id {}",
                project.id
            )));
        }
        validate_project(project)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str) -> Project {
        Project::new(id, id, "2024-01-01", "2024-02-01")
    }

    #[test]
    fn rejects_duplicate_project_ids() {
        let err = validate_projects(&[project("a"), project("a")]).unwrap_err();
        assert!(err.to_string().contains("duplicate project id a"));
    }

    #[test]
    fn rejects_duplicate_task_ids_at_any_depth() {
        let p = project("a").with_tasks(vec![
            Task::new("t", "T", "2024-01-01", "2024-01-02")
                .with_children(vec![Task::new("t", "Again", "2024-01-01", "2024-01-02")]),
        ]);
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("duplicate task id t"));
    }

    #[test]
    fn rejects_out_of_range_progress_and_workload() {
        let task = Task::new("t", "T", "2024-01-01", "2024-01-02").with_progress(140.0);
        assert!(validate_task(&task).is_err());

        let p = project("a").with_workload(-1.0, 0.0);
        let err = validate_project(&p).unwrap_err();
        assert!(err.to_string().contains("invalid engaged workload"));
    }

    #[test]
    fn tolerates_dangling_ids() {
        let p = project("a").with_predecessors(["nowhere"]);
        assert!(validate_projects(&[p]).is_ok());
    }
}

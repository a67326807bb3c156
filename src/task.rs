use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use thiserror::Error;

/// One node of a project's work breakdown structure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    /// Completion percentage, 0 to 100.
    #[serde(default)]
    pub progress: f64,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<Task>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependency_ids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskKind {
    Phase,
    Task,
    Milestone,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    #[error("task {0} not found")]
    NotFound(String),
    #[error("duplicate task id {0}")]
    DuplicateId(String),
}

impl Task {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        start: impl Into<Timestamp>,
        end: impl Into<Timestamp>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            start: start.into(),
            end: end.into(),
            progress: 0.0,
            children: Vec::new(),
            dependency_ids: Vec::new(),
            assignee_id: None,
        }
    }

    pub fn with_children(mut self, children: Vec<Task>) -> Self {
        self.children = children;
        self
    }

    pub fn with_dependencies<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependency_ids = ids.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_progress(mut self, progress: f64) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_assignee(mut self, assignee_id: impl Into<String>) -> Self {
        self.assignee_id = Some(assignee_id.into());
        self
    }

    /// Children win over dates: a task with children is a phase even when it
    /// has zero duration. `children: []` is a leaf.
    pub fn kind(&self) -> TaskKind {
        if !self.children.is_empty() {
            TaskKind::Phase
        } else if self.start.is_later_than(&self.end) || self.start.same_instant(&self.end) {
            TaskKind::Milestone
        } else {
            TaskKind::Task
        }
    }

    pub fn duration_days(&self) -> Option<i64> {
        self.start.whole_days_until(&self.end)
    }
}

/// Pre-order walk of a task tree: parent before children, siblings in order.
pub fn flatten_tasks(tasks: &[Task]) -> Vec<&Task> {
    let mut flat = Vec::new();
    collect_pre_order(tasks, &mut flat);
    flat
}

fn collect_pre_order<'a>(tasks: &'a [Task], out: &mut Vec<&'a Task>) {
    for task in tasks {
        out.push(task);
        collect_pre_order(&task.children, out);
    }
}

pub fn find_task<'a>(tasks: &'a [Task], id: &str) -> Option<&'a Task> {
    for task in tasks {
        if task.id == id {
            return Some(task);
        }
        if let found @ Some(_) = find_task(&task.children, id) {
            return found;
        }
    }
    None
}

fn find_task_mut<'a>(tasks: &'a mut [Task], id: &str) -> Option<&'a mut Task> {
    for task in tasks.iter_mut() {
        if task.id == id {
            return Some(task);
        }
        if let found @ Some(_) = find_task_mut(&mut task.children, id) {
            return found;
        }
    }
    None
}

fn take_task(tasks: &mut Vec<Task>, id: &str) -> Option<Task> {
    if let Some(pos) = tasks.iter().position(|task| task.id == id) {
        return Some(tasks.remove(pos));
    }
    tasks
        .iter_mut()
        .find_map(|task| take_task(&mut task.children, id))
}

fn ensure_unique_ids(tasks: &[Task]) -> Result<(), TreeError> {
    let mut seen = HashSet::new();
    for task in flatten_tasks(tasks) {
        if !seen.insert(task.id.as_str()) {
            return Err(TreeError::DuplicateId(task.id.clone()));
        }
    }
    Ok(())
}

/// Returns a new tree with `task` appended under `parent_id` (or at the root
/// when `parent_id` is `None`). The input tree is left untouched.
pub fn insert_task(
    tasks: &[Task],
    parent_id: Option<&str>,
    task: Task,
) -> Result<Vec<Task>, TreeError> {
    let mut next = tasks.to_vec();
    match parent_id {
        None => next.push(task),
        Some(parent_id) => {
            let parent = find_task_mut(&mut next, parent_id)
                .ok_or_else(|| TreeError::NotFound(parent_id.to_string()))?;
            parent.children.push(task);
        }
    }
    ensure_unique_ids(&next)?;
    Ok(next)
}

/// Returns a new tree in which the task `id` has been passed through `edit`.
pub fn update_task<F>(tasks: &[Task], id: &str, edit: F) -> Result<Vec<Task>, TreeError>
where
    F: FnOnce(&mut Task),
{
    let mut next = tasks.to_vec();
    let target = find_task_mut(&mut next, id).ok_or_else(|| TreeError::NotFound(id.to_string()))?;
    edit(target);
    ensure_unique_ids(&next)?;
    Ok(next)
}

/// Returns the tree without task `id` (and its subtree), plus the removed task.
pub fn remove_task(tasks: &[Task], id: &str) -> Result<(Vec<Task>, Task), TreeError> {
    let mut next = tasks.to_vec();
    let removed = take_task(&mut next, id).ok_or_else(|| TreeError::NotFound(id.to_string()))?;
    Ok((next, removed))
}

use crate::project::Project;
use crate::task::flatten_tasks;
use crate::timestamp::{Timestamp, whole_days};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::debug;

/// Planned start/end pair kept for variance comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineWindow {
    pub start: Timestamp,
    pub end: Timestamp,
}

impl BaselineWindow {
    pub fn new(start: Timestamp, end: Timestamp) -> Self {
        Self { start, end }
    }

    /// Whole days the current end has slipped past the planned end (negative
    /// when ahead of plan). Partial days count as a full day, as in task
    /// durations. `None` if either date is invalid.
    pub fn end_variance_days(&self, current_end: &Timestamp) -> Option<i64> {
        let planned = self.end.instant()?;
        let current = current_end.instant()?;
        Some(whole_days(current - planned))
    }
}

/// Original-plan dates per project, then per project/task id.
///
/// Task ids are only unique inside their project, so every lookup names the
/// owning project. A project's own window sits under its own id.
///
/// The session layer owns this value. It is filled once, by the first
/// [`capture`](Self::capture) that sees a non-empty collection, and entries
/// are never overwritten afterwards. Ids created later stay without a
/// baseline until [`reset`](Self::reset).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BaselineSnapshot {
    windows: HashMap<String, HashMap<String, BaselineWindow>>,
    captured: bool,
}

impl BaselineSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records every project and task window if nothing was captured yet.
    /// Returns whether this call performed the capture.
    pub fn capture(&mut self, projects: &[Project]) -> bool {
        if self.captured || projects.is_empty() {
            return false;
        }
        for project in projects {
            let windows = self.windows.entry(project.id.clone()).or_default();
            windows
                .entry(project.id.clone())
                .or_insert_with(|| BaselineWindow::new(project.start, project.end));
            for task in flatten_tasks(&project.tasks) {
                windows
                    .entry(task.id.clone())
                    .or_insert_with(|| BaselineWindow::new(task.start, task.end));
            }
        }
        self.captured = true;
        debug!(entries = self.len(), "baseline captured");
        true
    }

    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// Window of `id` inside `project_id`. Pass the project id twice for the
    /// project's own window.
    pub fn get(&self, project_id: &str, id: &str) -> Option<&BaselineWindow> {
        self.windows.get(project_id)?.get(id)
    }

    pub fn len(&self) -> usize {
        self.windows.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every entry so the next [`capture`](Self::capture) starts over.
    pub fn reset(&mut self) {
        self.windows.clear();
        self.captured = false;
    }
}

/// Builds a captured snapshot from `(project_id, id, window)` entries.
impl FromIterator<(String, String, BaselineWindow)> for BaselineSnapshot {
    fn from_iter<T: IntoIterator<Item = (String, String, BaselineWindow)>>(iter: T) -> Self {
        let mut snapshot = Self::default();
        for (project_id, id, window) in iter {
            snapshot.windows.entry(project_id).or_default().insert(id, window);
        }
        snapshot.captured = !snapshot.is_empty();
        snapshot
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::Task;

    fn portfolio() -> Vec<Project> {
        vec![
            Project::new("p1", "P1", "2024-01-01", "2024-03-01").with_tasks(vec![
                Task::new("t1", "T1", "2024-01-01", "2024-01-10")
                    .with_children(vec![Task::new("t2", "T2", "2024-01-02", "2024-01-05")]),
            ]),
        ]
    }

    #[test]
    fn capture_happens_once() {
        let mut snapshot = BaselineSnapshot::new();
        assert!(!snapshot.capture(&[]));
        assert!(!snapshot.is_captured());

        let mut projects = portfolio();
        assert!(snapshot.capture(&projects));
        assert_eq!(snapshot.len(), 3);

        projects[0].end = Timestamp::from_ymd(2024, 6, 1);
        projects.push(Project::new("p2", "P2", "2024-02-01", "2024-04-01"));
        assert!(!snapshot.capture(&projects));
        assert_eq!(snapshot.get("p1", "p1").unwrap().end, Timestamp::from_ymd(2024, 3, 1));
        assert!(snapshot.get("p2", "p2").is_none());

        snapshot.reset();
        assert!(snapshot.capture(&projects));
        assert!(snapshot.get("p2", "p2").is_some());
    }

    #[test]
    fn same_task_id_in_two_projects_keeps_both_windows() {
        let projects = vec![
            Project::new("p1", "P1", "2024-01-01", "2024-03-01")
                .with_tasks(vec![Task::new("t1", "T1", "2024-01-01", "2024-01-10")]),
            Project::new("p2", "P2", "2024-04-01", "2024-06-01")
                .with_tasks(vec![Task::new("t1", "T1", "2024-04-01", "2024-05-20")]),
        ];
        let mut snapshot = BaselineSnapshot::new();
        assert!(snapshot.capture(&projects));

        assert_eq!(snapshot.len(), 4);
        assert_eq!(snapshot.get("p1", "t1").unwrap().end, Timestamp::from_ymd(2024, 1, 10));
        assert_eq!(snapshot.get("p2", "t1").unwrap().end, Timestamp::from_ymd(2024, 5, 20));
        assert!(snapshot.get("p1", "p2").is_none());
    }

    #[test]
    fn collected_snapshot_counts_as_captured() {
        let window = BaselineWindow::new(
            Timestamp::from_ymd(2024, 1, 1),
            Timestamp::from_ymd(2024, 1, 10),
        );
        let snapshot: BaselineSnapshot =
            [("p1".to_string(), "t1".to_string(), window)].into_iter().collect();
        assert!(snapshot.is_captured());
        assert_eq!(snapshot.get("p1", "t1"), Some(&window));
    }

    #[test]
    fn end_variance_counts_days() {
        let window = BaselineWindow::new(
            Timestamp::from_ymd(2024, 1, 1),
            Timestamp::from_ymd(2024, 1, 10),
        );
        assert_eq!(window.end_variance_days(&Timestamp::from_ymd(2024, 1, 13)), Some(3));
        assert_eq!(window.end_variance_days(&Timestamp::from_ymd(2024, 1, 8)), Some(-2));
        assert_eq!(window.end_variance_days(&Timestamp::Invalid), None);

        let slipped = Timestamp::parse("2024-01-11T12:00:00Z");
        assert_eq!(window.end_variance_days(&slipped), Some(2));
        assert_eq!(window.end.whole_days_until(&slipped), Some(2));
    }
}

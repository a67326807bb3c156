use crate::baseline::{BaselineSnapshot, BaselineWindow};
use crate::calculations::{ProjectPathAnalyzer, TaskPathAnalyzer};
use crate::config::EngineConfig;
use crate::project::Project;
use crate::resource::{Resource, name_lookup};
use crate::task::{Task, TaskKind};
use crate::timestamp::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RowKind {
    Project,
    Phase,
    Task,
    Milestone,
}

impl From<TaskKind> for RowKind {
    fn from(kind: TaskKind) -> Self {
        match kind {
            TaskKind::Phase => RowKind::Phase,
            TaskKind::Task => RowKind::Task,
            TaskKind::Milestone => RowKind::Milestone,
        }
    }
}

/// One display row of the flattened project -> phase -> task hierarchy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub id: String,
    /// `None` for project rows; otherwise the enclosing task or project.
    pub parent_id: Option<String>,
    pub project_id: String,
    pub level: usize,
    pub kind: RowKind,
    pub wbs: String,
    pub name: String,
    pub start: Timestamp,
    pub end: Timestamp,
    pub baseline: BaselineWindow,
    /// False when `baseline` fell back to the current dates.
    pub has_baseline: bool,
    pub duration_days: Option<i64>,
    pub progress: f64,
    pub is_critical: bool,
    /// Predecessor ids for project rows, dependency ids for task rows.
    pub dependency_ids: Vec<String>,
    pub assignee_id: Option<String>,
    pub assignee_name: Option<String>,
    pub has_children: bool,
    pub is_expanded: bool,
}

impl ScheduleRow {
    pub fn end_variance_days(&self) -> Option<i64> {
        self.baseline.end_variance_days(&self.end)
    }
}

/// Flattens a project collection into schedule rows.
///
/// Every project and every task at every depth yields exactly one row, in
/// project order and pre-order within each WBS. The expansion set only
/// annotates rows; hiding collapsed subtrees is left to [`visible_rows`].
pub struct RowBuilder<'a> {
    projects: &'a [Project],
    resource_names: HashMap<&'a str, &'a str>,
    expanded_ids: &'a HashSet<String>,
    baseline: &'a BaselineSnapshot,
    config: EngineConfig,
}

impl<'a> RowBuilder<'a> {
    pub fn new(
        projects: &'a [Project],
        resources: &'a [Resource],
        expanded_ids: &'a HashSet<String>,
        baseline: &'a BaselineSnapshot,
    ) -> Self {
        Self {
            projects,
            resource_names: name_lookup(resources),
            expanded_ids,
            baseline,
            config: EngineConfig::default(),
        }
    }

    pub fn with_config(mut self, config: EngineConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(&self) -> Vec<ScheduleRow> {
        let critical_projects = ProjectPathAnalyzer::new(self.projects)
            .with_ties(self.config.project_ties)
            .execute();

        let mut rows = Vec::new();
        for (idx, project) in self.projects.iter().enumerate() {
            let wbs = (idx + 1).to_string();
            let (baseline, has_baseline) =
                self.resolve_baseline(&project.id, &project.id, project.start, project.end);
            rows.push(ScheduleRow {
                id: project.id.clone(),
                parent_id: None,
                project_id: project.id.clone(),
                level: 0,
                kind: RowKind::Project,
                wbs: wbs.clone(),
                name: project.title.clone(),
                start: project.start,
                end: project.end,
                baseline,
                has_baseline,
                duration_days: project.start.whole_days_until(&project.end),
                progress: project.progress(),
                is_critical: critical_projects.contains(&project.id),
                dependency_ids: project.predecessor_ids.clone(),
                assignee_id: None,
                assignee_name: None,
                has_children: !project.tasks.is_empty(),
                is_expanded: self.expanded_ids.contains(&project.id),
            });

            let walk = TaskWalk {
                project_id: &project.id,
                critical: TaskPathAnalyzer::new(&project.tasks)
                    .with_ties(self.config.task_ties)
                    .execute(),
            };
            self.push_tasks(&mut rows, &walk, &project.id, &wbs, 1, &project.tasks);
        }

        debug!(projects = self.projects.len(), rows = rows.len(), "schedule rows built");
        rows
    }

    fn push_tasks(
        &self,
        rows: &mut Vec<ScheduleRow>,
        walk: &TaskWalk<'_>,
        parent_id: &str,
        parent_wbs: &str,
        level: usize,
        tasks: &[Task],
    ) {
        for (idx, task) in tasks.iter().enumerate() {
            let wbs = format!("{parent_wbs}.{}", idx + 1);
            let (baseline, has_baseline) =
                self.resolve_baseline(walk.project_id, &task.id, task.start, task.end);
            let assignee_name = task
                .assignee_id
                .as_deref()
                .and_then(|id| self.resource_names.get(id))
                .map(|name| name.to_string());

            rows.push(ScheduleRow {
                id: task.id.clone(),
                parent_id: Some(parent_id.to_string()),
                project_id: walk.project_id.to_string(),
                level,
                kind: task.kind().into(),
                wbs: wbs.clone(),
                name: task.name.clone(),
                start: task.start,
                end: task.end,
                baseline,
                has_baseline,
                duration_days: task.duration_days(),
                progress: task.progress,
                is_critical: walk.critical.contains(&task.id),
                dependency_ids: task.dependency_ids.clone(),
                assignee_id: task.assignee_id.clone(),
                assignee_name,
                has_children: !task.children.is_empty(),
                is_expanded: self.expanded_ids.contains(&task.id),
            });

            self.push_tasks(rows, walk, &task.id, &wbs, level + 1, &task.children);
        }
    }

    fn resolve_baseline(
        &self,
        project_id: &str,
        id: &str,
        start: Timestamp,
        end: Timestamp,
    ) -> (BaselineWindow, bool) {
        match self.baseline.get(project_id, id) {
            Some(window) => (*window, true),
            None => (BaselineWindow::new(start, end), false),
        }
    }
}

/// Per-project state shared by every level of the task walk.
struct TaskWalk<'p> {
    project_id: &'p str,
    critical: HashSet<String>,
}

pub fn build_schedule_rows(
    projects: &[Project],
    resources: &[Resource],
    expanded_ids: &HashSet<String>,
    baseline: &BaselineSnapshot,
) -> Vec<ScheduleRow> {
    RowBuilder::new(projects, resources, expanded_ids, baseline).build()
}

/// Rows whose every ancestor is expanded. Project rows are always visible.
pub fn visible_rows<'r>(
    rows: &'r [ScheduleRow],
    expanded_ids: &HashSet<String>,
) -> Vec<&'r ScheduleRow> {
    let mut index: HashMap<(&str, &str), &ScheduleRow> = HashMap::with_capacity(rows.len());
    for row in rows {
        index.entry((row.project_id.as_str(), row.id.as_str())).or_insert(row);
    }

    rows.iter()
        .filter(|row| ancestors_expanded(row, &index, expanded_ids))
        .collect()
}

fn ancestors_expanded(
    row: &ScheduleRow,
    index: &HashMap<(&str, &str), &ScheduleRow>,
    expanded_ids: &HashSet<String>,
) -> bool {
    let project_id = row.project_id.as_str();
    let mut current = row.parent_id.as_deref();
    let mut hops = 0;
    while let Some(parent_id) = current {
        if !expanded_ids.contains(parent_id) {
            return false;
        }
        hops += 1;
        if hops > index.len() {
            break;
        }
        current = index
            .get(&(project_id, parent_id))
            .and_then(|parent| parent.parent_id.as_deref());
    }
    true
}

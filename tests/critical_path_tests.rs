use portfolio_graph::{
    Project, ProjectPathAnalyzer, Task, TaskPathAnalyzer, TiePolicy, Timestamp,
    analyze_critical_path, analyze_task_critical_path, longest_path_by_end_date,
};
use std::collections::HashSet;

fn d(y: i32, m: u32, d: u32) -> Timestamp {
    Timestamp::from_ymd(y, m, d)
}

fn project(id: &str, start: Timestamp, end: Timestamp, preds: &[&str]) -> Project {
    Project::new(id, format!("Project {id}"), start, end).with_predecessors(preds.iter().copied())
}

fn task(id: &str, end_day: u32, deps: &[&str]) -> Task {
    Task::new(id, id, d(2024, 1, 1), d(2024, 1, end_day)).with_dependencies(deps.iter().copied())
}

fn ids(values: &[&str]) -> HashSet<String> {
    values.iter().map(|v| v.to_string()).collect()
}

#[test]
fn project_chain_follows_predecessor() {
    let mut projects = vec![
        project("p1", d(2024, 1, 1), d(2024, 3, 1), &[]),
        project("p2", d(2024, 3, 2), d(2024, 5, 1), &["p1"]),
    ];
    assert_eq!(analyze_critical_path(&projects), ids(&["p1", "p2"]));

    // an unrelated, earlier project does not disturb the result
    projects.push(project("p3", d(2023, 11, 1), d(2024, 1, 1), &[]));
    assert_eq!(analyze_critical_path(&projects), ids(&["p1", "p2"]));
}

#[test]
fn task_chain_beats_later_standalone_task() {
    let tasks = vec![task("a", 10, &[]), task("b", 15, &["a"]), task("c", 12, &[])];
    assert_eq!(analyze_task_critical_path(&tasks), ids(&["a", "b"]));
}

#[test]
fn task_analyzer_sees_nested_dependencies() {
    let tasks = vec![
        Task::new("phase", "Phase", d(2024, 1, 1), d(2024, 1, 20)).with_children(vec![
            task("design", 5, &[]),
            task("build", 25, &["design"]),
        ]),
        task("qa", 28, &["build"]),
    ];
    assert_eq!(analyze_task_critical_path(&tasks), ids(&["design", "build", "qa"]));
}

#[test]
fn task_ties_union_all_chains_by_default() {
    let tasks = vec![task("a", 10, &[]), task("b", 15, &["a"]), task("c", 15, &[])];
    assert_eq!(analyze_task_critical_path(&tasks), ids(&["a", "b", "c"]));

    let single = TaskPathAnalyzer::new(&tasks).with_ties(TiePolicy::Single).execute();
    assert_eq!(single, ids(&["a", "b"]));
}

#[test]
fn project_ties_keep_a_single_chain_by_default() {
    let projects = vec![
        project("p1", d(2024, 1, 1), d(2024, 5, 1), &[]),
        project("p2", d(2024, 2, 1), d(2024, 5, 1), &[]),
    ];
    assert_eq!(analyze_critical_path(&projects), ids(&["p1"]));

    let union = ProjectPathAnalyzer::new(&projects)
        .with_ties(TiePolicy::Union)
        .execute();
    assert_eq!(union, ids(&["p1", "p2"]));
}

#[test]
fn empty_inputs_give_empty_sets() {
    assert!(analyze_critical_path(&[]).is_empty());
    assert!(analyze_task_critical_path(&[]).is_empty());
}

#[test]
fn dangling_predecessors_are_ignored() {
    let projects = vec![
        project("p1", d(2024, 1, 1), d(2024, 2, 1), &["ghost"]),
        project("p2", d(2024, 1, 1), d(2024, 1, 15), &[]),
    ];
    assert_eq!(analyze_critical_path(&projects), ids(&["p1"]));
}

#[test]
fn cyclic_projects_terminate() {
    let projects = vec![
        project("p1", d(2024, 1, 1), d(2024, 2, 1), &["p2"]),
        project("p2", d(2024, 1, 1), d(2024, 3, 1), &["p1"]),
    ];
    let critical = analyze_critical_path(&projects);
    assert!(critical.contains("p2"));
}

#[test]
fn invalid_end_dates_never_join_the_path() {
    let projects = vec![
        project("broken", d(2024, 1, 1), Timestamp::parse("31/02/2024"), &[]),
        project("p1", d(2024, 1, 1), d(2024, 2, 1), &["broken"]),
        project("p2", d(2024, 1, 1), d(2024, 1, 20), &[]),
    ];
    assert_eq!(analyze_critical_path(&projects), ids(&["p1"]));

    let tasks = vec![Task::new("t", "T", d(2024, 1, 1), Timestamp::Invalid)];
    assert!(analyze_task_critical_path(&tasks).is_empty());
}

#[test]
fn critical_terminal_is_end_maximal() {
    // deterministic pseudo-random DAG: every node may depend on earlier nodes
    let mut seed: u64 = 0x2545_f491_4f6c_dd1d;
    let mut next = move || {
        seed ^= seed << 13;
        seed ^= seed >> 7;
        seed ^= seed << 17;
        seed
    };

    let mut projects = Vec::new();
    for i in 0..40u32 {
        let mut preds = Vec::new();
        for j in 0..i {
            if next() % 7 == 0 {
                preds.push(format!("p{j}"));
            }
        }
        let end_day = (next() % 28) as u32 + 1;
        let end_month = (next() % 12) as u32 + 1;
        projects.push(
            Project::new(format!("p{i}"), "P", d(2023, 1, 1), d(2024, end_month, end_day))
                .with_predecessors(preds),
        );
    }

    let summary = longest_path_by_end_date(&projects);
    let best_end = summary.best_end_date.unwrap();
    for project in &projects {
        assert!(
            !project.end.is_later_than(&best_end),
            "{} ends after the critical path",
            project.id
        );
    }

    let critical = analyze_critical_path(&projects);
    let terminal = summary.best_path_ids.last().unwrap();
    assert!(critical.contains(terminal));
    assert!(projects.iter().find(|p| &p.id == terminal).unwrap().end.same_instant(&best_end));
}

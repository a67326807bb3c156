//! Decoding of externally supplied project collections.

use crate::graph::DependencyDag;
use crate::project::Project;
use crate::resource::Resource;
use crate::task::flatten_tasks;
use crate::validation::{ValidationError, validate_projects};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid data: {0}")]
    InvalidData(String),
}

impl From<ValidationError> for ImportError {
    fn from(value: ValidationError) -> Self {
        Self::InvalidData(value.to_string())
    }
}

pub type ImportResult<T> = Result<T, ImportError>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSnapshot {
    #[serde(default)]
    pub projects: Vec<Project>,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

impl PortfolioSnapshot {
    /// Structural validation plus integrity warnings for the dependency
    /// graphs. Only structural problems are errors.
    pub fn validate(&self) -> ImportResult<()> {
        validate_projects(&self.projects)?;
        report_integrity(&self.projects);
        Ok(())
    }
}

pub fn portfolio_from_json_str(raw: &str) -> ImportResult<PortfolioSnapshot> {
    let snapshot: PortfolioSnapshot = serde_json::from_str(raw)?;
    snapshot.validate()?;
    Ok(snapshot)
}

pub fn portfolio_from_reader<R: Read>(reader: R) -> ImportResult<PortfolioSnapshot> {
    let snapshot: PortfolioSnapshot = serde_json::from_reader(reader)?;
    snapshot.validate()?;
    Ok(snapshot)
}

pub fn load_portfolio_from_json<P: AsRef<Path>>(path: P) -> ImportResult<PortfolioSnapshot> {
    let file = File::open(path)?;
    portfolio_from_reader(BufReader::new(file))
}

fn report_integrity(projects: &[Project]) {
    let dag = DependencyDag::build(projects);
    for (owner, missing) in dag.dangling_edges() {
        warn!(project = %owner, predecessor = %missing, "predecessor id not found");
    }
    for cycle in dag.cycles() {
        warn!(projects = ?cycle, "project predecessor cycle");
    }

    for project in projects {
        let flat = flatten_tasks(&project.tasks);
        let dag = DependencyDag::build(&flat);
        for (owner, missing) in dag.dangling_edges() {
            warn!(
                project = %project.id,
                task = %owner,
                dependency = %missing,
                "dependency id not found"
            );
        }
        for cycle in dag.cycles() {
            warn!(project = %project.id, tasks = ?cycle, "task dependency cycle");
        }
    }
    debug!(projects = projects.len(), "portfolio integrity checked");
}

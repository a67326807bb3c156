pub mod baseline;
pub mod calculations;
pub mod config;
pub mod graph;
pub mod guard;
pub mod import;
pub mod project;
pub mod resource;
pub mod schedule;
pub mod task;
pub mod timestamp;
pub mod validation;

pub use baseline::{BaselineSnapshot, BaselineWindow};
pub use calculations::{
    ProjectPathAnalyzer, TaskPathAnalyzer, analyze_critical_path, analyze_task_critical_path,
};
pub use config::{EngineConfig, TiePolicy};
pub use graph::{ChainNode, ChainSummary, DependencyDag, detects_cycle, longest_path_by_end_date};
pub use guard::{
    GuardError, add_predecessor, add_task_dependency, would_create_cycle, would_create_task_cycle,
};
pub use import::{
    ImportError, PortfolioSnapshot, load_portfolio_from_json, portfolio_from_json_str,
    portfolio_from_reader,
};
pub use project::Project;
pub use resource::Resource;
pub use schedule::{RowBuilder, RowKind, ScheduleRow, build_schedule_rows, visible_rows};
pub use task::{Task, TaskKind, TreeError};
pub use timestamp::Timestamp;
pub use validation::ValidationError;

//! Generic directed-graph helpers shared by the project and task analyzers.
//!
//! Nodes are anything that can report an id, the ids it depends on, and an
//! end date. Edges point from a node to its predecessors.

use crate::project::Project;
use crate::task::Task;
use crate::timestamp::Timestamp;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;

pub mod chain;
pub mod dag;
pub mod reachability;

pub use chain::{ChainSummary, longest_path_by_end_date};
pub use dag::DependencyDag;
pub use reachability::detects_cycle;

pub trait ChainNode {
    type Id: Clone + Eq + Hash + Debug;

    fn node_id(&self) -> &Self::Id;
    fn predecessor_ids(&self) -> &[Self::Id];
    fn end_date(&self) -> Timestamp;
}

impl<T: ChainNode + ?Sized> ChainNode for &T {
    type Id = T::Id;

    fn node_id(&self) -> &Self::Id {
        (**self).node_id()
    }

    fn predecessor_ids(&self) -> &[Self::Id] {
        (**self).predecessor_ids()
    }

    fn end_date(&self) -> Timestamp {
        (**self).end_date()
    }
}

impl ChainNode for Project {
    type Id = String;

    fn node_id(&self) -> &String {
        &self.id
    }

    fn predecessor_ids(&self) -> &[String] {
        &self.predecessor_ids
    }

    fn end_date(&self) -> Timestamp {
        self.end
    }
}

impl ChainNode for Task {
    type Id = String;

    fn node_id(&self) -> &String {
        &self.id
    }

    fn predecessor_ids(&self) -> &[String] {
        &self.dependency_ids
    }

    fn end_date(&self) -> Timestamp {
        self.end
    }
}

/// Node id -> predecessor ids, the edge encoding [`detects_cycle`] expects.
/// When an id repeats, the first node's edges are kept.
pub fn predecessor_map<N: ChainNode>(nodes: &[N]) -> HashMap<N::Id, Vec<N::Id>> {
    let mut edges = HashMap::with_capacity(nodes.len());
    for node in nodes {
        edges
            .entry(node.node_id().clone())
            .or_insert_with(|| node.predecessor_ids().to_vec());
    }
    edges
}

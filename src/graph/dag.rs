use super::ChainNode;
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::hash::Hash;

/// petgraph view of a dependency collection, used for integrity reports on
/// imported data. Edges run predecessor -> dependent.
pub struct DependencyDag<Id> {
    pub graph: DiGraph<Id, ()>,
    pub id_to_index: HashMap<Id, NodeIndex>,
    dangling: Vec<(Id, Id)>,
}

impl<Id: Clone + Eq + Hash> DependencyDag<Id> {
    pub fn build<N: ChainNode<Id = Id>>(nodes: &[N]) -> Self {
        let mut graph: DiGraph<Id, ()> = DiGraph::new();
        let mut id_to_index: HashMap<Id, NodeIndex> = HashMap::with_capacity(nodes.len());

        // Add nodes first
        for node in nodes {
            let id = node.node_id();
            if !id_to_index.contains_key(id) {
                let node_ix = graph.add_node(id.clone());
                id_to_index.insert(id.clone(), node_ix);
            }
        }

        // Add edges: predecessor -> node
        let mut dangling = Vec::new();
        for node in nodes {
            let Some(&v) = id_to_index.get(node.node_id()) else {
                continue;
            };
            for predecessor_id in node.predecessor_ids() {
                match id_to_index.get(predecessor_id) {
                    Some(&u) => {
                        graph.add_edge(u, v, ());
                    }
                    None => dangling.push((node.node_id().clone(), predecessor_id.clone())),
                }
            }
        }

        Self {
            graph,
            id_to_index,
            dangling,
        }
    }

    /// `(owner, missing predecessor)` pairs that point outside the collection.
    pub fn dangling_edges(&self) -> &[(Id, Id)] {
        &self.dangling
    }

    /// Groups of ids that depend on each other, including self-dependencies.
    /// Ids inside a group and the groups themselves follow input order.
    pub fn cycles(&self) -> Vec<Vec<Id>> {
        let mut components: Vec<Vec<NodeIndex>> = tarjan_scc(&self.graph)
            .into_iter()
            .filter(|component| {
                component.len() > 1 || self.graph.contains_edge(component[0], component[0])
            })
            .collect();
        for component in &mut components {
            component.sort();
        }
        components.sort_by_key(|component| component[0]);
        components
            .into_iter()
            .map(|component| {
                component
                    .into_iter()
                    .map(|ix| self.graph[ix].clone())
                    .collect()
            })
            .collect()
    }

    pub fn has_cycle(&self) -> bool {
        toposort(&self.graph, None).is_err()
    }

    /// Predecessors before dependents, or `None` if the graph is cyclic.
    pub fn topological_order(&self) -> Option<Vec<Id>> {
        toposort(&self.graph, None)
            .ok()
            .map(|order| order.into_iter().map(|ix| self.graph[ix].clone()).collect())
    }
}

use super::ChainNode;
use crate::timestamp::Timestamp;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Outcome of [`longest_path_by_end_date`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChainSummary<Id> {
    /// The winning chain, root first.
    pub best_path_ids: Vec<Id>,
    /// End date of the winning chain's terminus, `None` when no node had a
    /// valid end date.
    pub best_end_date: Option<Timestamp>,
    /// Union of every chain whose terminus ends exactly on `best_end_date`,
    /// in first-seen order.
    pub tied_path_ids: Vec<Id>,
}

impl<Id> ChainSummary<Id> {
    pub fn is_empty(&self) -> bool {
        self.best_path_ids.is_empty()
    }
}

#[derive(Debug, Clone)]
struct Chain<Id> {
    path: Vec<Id>,
    end: Option<Timestamp>,
}

impl<Id> Chain<Id> {
    fn empty() -> Self {
        Self {
            path: Vec::new(),
            end: None,
        }
    }

    /// Later end wins, then the longer path. Invalid ends never win.
    fn outranks(&self, other: &Chain<Id>) -> bool {
        match (self.end, other.end) {
            (Some(mine), Some(theirs)) => {
                mine.is_later_than(&theirs)
                    || (mine.same_instant(&theirs) && self.path.len() > other.path.len())
            }
            (Some(mine), None) => mine.is_valid(),
            (None, _) => false,
        }
    }
}

struct ChainEvaluator<'a, N: ChainNode> {
    index: HashMap<&'a N::Id, &'a N>,
    memo: HashMap<&'a N::Id, Chain<N::Id>>,
    visiting: HashSet<&'a N::Id>,
}

impl<'a, N: ChainNode> ChainEvaluator<'a, N> {
    fn new(nodes: &'a [N]) -> Self {
        let mut index = HashMap::with_capacity(nodes.len());
        for node in nodes {
            index.entry(node.node_id()).or_insert(node);
        }
        Self {
            index,
            memo: HashMap::with_capacity(nodes.len()),
            visiting: HashSet::new(),
        }
    }

    fn chain_ending_at(&mut self, node: &'a N) -> Chain<N::Id> {
        let id = node.node_id();
        if let Some(chain) = self.memo.get(id) {
            return chain.clone();
        }
        if !self.visiting.insert(id) {
            debug!(node = ?id, "dependency cycle cut during critical path walk");
            return Chain::empty();
        }

        let mut best = Chain::empty();
        for predecessor_id in node.predecessor_ids() {
            let Some(predecessor) = self.index.get(predecessor_id).copied() else {
                continue;
            };
            let candidate = self.chain_ending_at(predecessor);
            if candidate.outranks(&best) {
                best = candidate;
            }
        }
        self.visiting.remove(id);

        let mut path = best.path;
        path.push(id.clone());
        let chain = Chain {
            path,
            end: Some(node.end_date()),
        };
        self.memo.insert(id, chain.clone());
        chain
    }
}

/// Finds the dependency chain whose terminus ends last.
///
/// The chain ending at a node is the node alone when it has no resolvable
/// predecessors, otherwise the chain of its best-ranked predecessor extended
/// by the node. Ranking prefers the later end date, then the longer chain;
/// remaining ties keep the earlier node in input order. Dangling predecessor
/// ids are skipped and a node met again on the current branch contributes
/// nothing, so cyclic input still terminates.
pub fn longest_path_by_end_date<N: ChainNode>(nodes: &[N]) -> ChainSummary<N::Id> {
    let mut evaluator = ChainEvaluator::new(nodes);
    let mut best = Chain::empty();
    let mut terminals = Vec::with_capacity(nodes.len());

    for node in nodes {
        let chain = evaluator.chain_ending_at(node);
        if chain.outranks(&best) {
            best = chain.clone();
        }
        terminals.push(chain);
    }

    let mut tied_path_ids = Vec::new();
    if let Some(best_end) = best.end {
        let mut seen = HashSet::new();
        for chain in &terminals {
            let ties = chain.end.is_some_and(|end| end.same_instant(&best_end));
            if !ties {
                continue;
            }
            for id in &chain.path {
                if seen.insert(id) {
                    tied_path_ids.push(id.clone());
                }
            }
        }
    }

    ChainSummary {
        best_path_ids: best.path,
        best_end_date: best.end,
        tied_path_ids,
    }
}

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

/// Would adding the edge `source_id -> proposed_target_id` close a cycle?
///
/// `edges` maps each node to its predecessor ids. The answer is yes when
/// `source_id` is already reachable from `proposed_target_id` by following
/// predecessor edges (a self edge counts). The visited set keeps the search
/// finite even if `edges` is already cyclic.
pub fn detects_cycle<Id>(
    edges: &HashMap<Id, Vec<Id>>,
    source_id: &Id,
    proposed_target_id: &Id,
) -> bool
where
    Id: Eq + Hash,
{
    let mut visited: HashSet<&Id> = HashSet::new();
    let mut stack = vec![proposed_target_id];

    while let Some(current) = stack.pop() {
        if current == source_id {
            return true;
        }
        if !visited.insert(current) {
            continue;
        }
        if let Some(predecessors) = edges.get(current) {
            stack.extend(predecessors.iter().rev());
        }
    }
    false
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edges(
        pairs: Vec<(&'static str, Vec<&'static str>)>,
    ) -> HashMap<&'static str, Vec<&'static str>> {
        pairs.into_iter().collect()
    }

    #[test]
    fn closing_edge_is_detected() {
        // c depends on b, b depends on a
        let g = edges(vec![("a", vec![]), ("b", vec!["a"]), ("c", vec!["b"])]);
        // making a depend on c closes a -> c -> b -> a
        assert!(detects_cycle(&g, &"a", &"c"));
        // d depending on c is fine
        assert!(!detects_cycle(&g, &"d", &"c"));
        // c depending on a directly is redundant but acyclic
        assert!(!detects_cycle(&g, &"c", &"a"));
    }

    #[test]
    fn self_edge_is_a_cycle() {
        let g = edges(vec![("a", vec![])]);
        assert!(detects_cycle(&g, &"a", &"a"));
    }

    #[test]
    fn terminates_on_already_cyclic_graph() {
        let g = edges(vec![("a", vec!["b"]), ("b", vec!["a"]), ("c", vec![])]);
        assert!(!detects_cycle(&g, &"c", &"a"));
        assert!(detects_cycle(&g, &"a", &"b"));
    }

    #[test]
    fn dangling_ids_are_ignored() {
        let g = edges(vec![("a", vec!["ghost"])]);
        assert!(!detects_cycle(&g, &"b", &"a"));
    }
}

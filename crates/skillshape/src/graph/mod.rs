//! Neighbor graphs over positioned nodes.
//!
//! Builders work on node indices (`Adjacency`); the dispatcher converts to id lists at the end.

pub mod knn;
pub mod topology;

use crate::model::NodePosition;
use indexmap::IndexSet;
use rustc_hash::FxHashSet;

pub use topology::Topology;

/// One neighbor list per node, by index.
pub type Adjacency = Vec<Vec<usize>>;

pub fn empty(n: usize) -> Adjacency {
    (0..n).map(|_| Vec::new()).collect()
}

/// Adds the undirected edge `a - b`. Self-loops and duplicates are ignored.
pub fn link(adj: &mut Adjacency, a: usize, b: usize) {
    if a == b || a >= adj.len() || b >= adj.len() {
        return;
    }
    if !adj[a].contains(&b) {
        adj[a].push(b);
    }
    if !adj[b].contains(&a) {
        adj[b].push(a);
    }
}

/// Adds every reverse edge and drops duplicates, keeping first-seen order.
pub fn symmetrize(adj: &Adjacency) -> Adjacency {
    let mut sets: Vec<IndexSet<usize>> = (0..adj.len()).map(|_| IndexSet::new()).collect();
    for (i, list) in adj.iter().enumerate() {
        for &j in list {
            if j == i || j >= adj.len() {
                continue;
            }
            sets[i].insert(j);
            sets[j].insert(i);
        }
    }
    sets.into_iter().map(|s| s.into_iter().collect()).collect()
}

pub fn is_symmetric(adj: &Adjacency) -> bool {
    adj.iter()
        .enumerate()
        .all(|(i, list)| list.iter().all(|&j| adj.get(j).is_some_and(|back| back.contains(&i))))
}

/// Replaces each position's neighbor ids with the ids named by `adj`.
pub fn assign(positions: &mut [NodePosition], adj: &Adjacency) {
    let ids: Vec<String> = positions.iter().map(|p| p.id.clone()).collect();
    for (pos, list) in positions.iter_mut().zip(adj) {
        pos.neighbors = list.iter().filter_map(|&j| ids.get(j).cloned()).collect();
    }
}

/// Drops neighbor ids that do not name a position in the same collection. Returns how many were
/// removed.
pub fn prune_dangling(positions: &mut [NodePosition]) -> usize {
    let present: FxHashSet<String> = positions.iter().map(|p| p.id.clone()).collect();
    let mut removed = 0;
    for pos in positions.iter_mut() {
        let before = pos.neighbors.len();
        pos.neighbors.retain(|id| present.contains(id));
        removed += before - pos.neighbors.len();
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NodePosition, SkillNode};

    #[test]
    fn link_ignores_self_loops_and_duplicates() {
        let mut adj = empty(3);
        link(&mut adj, 0, 1);
        link(&mut adj, 1, 0);
        link(&mut adj, 2, 2);
        link(&mut adj, 2, 7);
        assert_eq!(adj, vec![vec![1], vec![0], vec![]]);
    }

    #[test]
    fn symmetrize_adds_reverse_edges() {
        let adj = vec![vec![1, 2, 1], vec![], vec![0]];
        let sym = symmetrize(&adj);
        assert_eq!(sym, vec![vec![1, 2], vec![0], vec![0]]);
        assert!(is_symmetric(&sym));
        assert!(!is_symmetric(&adj));
    }

    #[test]
    fn prune_dangling_removes_missing_ids() {
        let mut positions = vec![
            NodePosition::at(&SkillNode::new("a", 5.0), 0.0, 0.0, 0.5),
            NodePosition::at(&SkillNode::new("b", 5.0), 1.0, 0.0, 0.5),
        ];
        positions[0].neighbors = vec!["b".into(), "ghost".into()];
        positions[1].neighbors = vec!["a".into()];
        assert_eq!(prune_dangling(&mut positions), 1);
        assert_eq!(positions[0].neighbors, vec!["b".to_string()]);
    }
}

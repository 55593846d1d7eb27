use super::{Adjacency, empty, link};
use crate::error::Error;
use crate::rng;
use rand::RngCore;
use std::str::FromStr;

/// Neighbor rule driven by node order alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Topology {
    Chain,
    /// Chain plus `i - (i+3)` for every `i` divisible by 3.
    LinearBus,
    /// Binary heap order: `i` links to `2i+1` and `2i+2`.
    Tree,
    Ring,
    /// Hub-and-spoke around node 0.
    Star,
    Full,
    /// Each node links to `min(3, n-1)` random others.
    PartialMesh,
    /// About 15% isolated nodes; the rest grouped into 2 to 4 random clusters with 1 or 2 links
    /// per node inside its cluster.
    Incomplete,
    None,
}

impl Topology {
    pub const ALL: [Topology; 9] = [
        Topology::Chain,
        Topology::LinearBus,
        Topology::Tree,
        Topology::Ring,
        Topology::Star,
        Topology::Full,
        Topology::PartialMesh,
        Topology::Incomplete,
        Topology::None,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Topology::Chain => "chain",
            Topology::LinearBus => "linear-bus",
            Topology::Tree => "tree",
            Topology::Ring => "ring",
            Topology::Star => "star",
            Topology::Full => "full",
            Topology::PartialMesh => "partial-mesh",
            Topology::Incomplete => "incomplete",
            Topology::None => "none",
        }
    }

    /// Symmetric, deduplicated neighbor lists for `n` nodes. Every node gets its own list.
    pub fn generate(self, n: usize, rng: &mut dyn RngCore) -> Adjacency {
        let mut adj = empty(n);
        match self {
            Topology::Chain => chain(&mut adj),
            Topology::LinearBus => {
                chain(&mut adj);
                for i in (0..n).step_by(3) {
                    link(&mut adj, i, i + 3);
                }
            }
            Topology::Tree => {
                for i in 0..n {
                    link(&mut adj, i, 2 * i + 1);
                    link(&mut adj, i, 2 * i + 2);
                }
            }
            Topology::Ring => {
                chain(&mut adj);
                if n > 2 {
                    link(&mut adj, n - 1, 0);
                }
            }
            Topology::Star => {
                for i in 1..n {
                    link(&mut adj, 0, i);
                }
            }
            Topology::Full => {
                for i in 0..n {
                    for j in (i + 1)..n {
                        link(&mut adj, i, j);
                    }
                }
            }
            Topology::PartialMesh => {
                let per_node = 3.min(n.saturating_sub(1));
                for i in 0..n {
                    let mut others: Vec<usize> = (0..n).filter(|&j| j != i).collect();
                    rng::shuffle(rng, &mut others);
                    for &j in others.iter().take(per_node) {
                        link(&mut adj, i, j);
                    }
                }
            }
            Topology::Incomplete => incomplete(&mut adj, rng),
            Topology::None => {}
        }
        adj
    }
}

fn chain(adj: &mut Adjacency) {
    for i in 1..adj.len() {
        link(adj, i - 1, i);
    }
}

fn incomplete(adj: &mut Adjacency, rng: &mut dyn RngCore) {
    let n = adj.len();
    let mut order: Vec<usize> = (0..n).collect();
    rng::shuffle(rng, &mut order);
    let isolated = ((n as f64) * 0.15).round() as usize;
    let connected = &order[isolated.min(n)..];
    if connected.len() < 2 {
        return;
    }

    let cluster_count = (2 + rng::index(rng, 3)).min(connected.len());
    let mut clusters: Vec<Vec<usize>> = vec![Vec::new(); cluster_count];
    for &node in connected {
        clusters[rng::index(rng, cluster_count)].push(node);
    }
    // A lone node has nobody to link to; fold it into the next cluster.
    clusters.retain(|c| !c.is_empty());
    while clusters.len() > 1 {
        let Some(lone) = clusters.iter().position(|c| c.len() == 1) else {
            break;
        };
        let moved = clusters.remove(lone);
        let into = lone % clusters.len();
        clusters[into].extend(moved);
    }

    for cluster in &clusters {
        for &node in cluster {
            let wanted = 1 + rng::index(rng, 2);
            let mut candidates: Vec<usize> = cluster.iter().copied().filter(|&j| j != node).collect();
            rng::shuffle(rng, &mut candidates);
            for &j in candidates.iter().take(wanted) {
                link(adj, node, j);
            }
        }
    }
}

impl FromStr for Topology {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let name = s.trim().to_ascii_lowercase();
        let t = match name.as_str() {
            "chain" => Topology::Chain,
            "linear-bus" | "bus" => Topology::LinearBus,
            "tree" | "binary-tree" => Topology::Tree,
            "ring" => Topology::Ring,
            "star" | "hub-and-spoke" => Topology::Star,
            "full" | "fully-connected" => Topology::Full,
            "partial-mesh" | "mesh" => Topology::PartialMesh,
            "incomplete" | "clustered" => Topology::Incomplete,
            "none" => Topology::None,
            _ => {
                return Err(Error::UnknownTopology {
                    name: s.to_string(),
                });
            }
        };
        Ok(t)
    }
}

impl std::fmt::Display for Topology {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

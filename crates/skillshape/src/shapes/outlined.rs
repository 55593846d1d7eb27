//! Shapes built from a traced outline: a ring of nodes on the outline plus interior scatter.

use super::Outline;
use crate::geom::{Point, Polygon, Region};
use crate::graph::{self, Adjacency};
use crate::model::{NodePosition, ShapeParams, SkillNode};
use crate::sample::{AttemptCeiling, sample_region};
use rand::RngCore;

/// Nodes on the outline ring come first, interior nodes after.
pub(crate) struct Placement {
    pub points: Vec<Point>,
    pub outline_len: usize,
    pub adj: Adjacency,
}

impl Placement {
    pub(crate) fn interior(&self) -> std::ops::Range<usize> {
        self.outline_len..self.points.len()
    }
}

/// `count` outline vertices taken at even index steps.
pub(crate) fn evenly_spaced(coords: &[Point], count: usize) -> Vec<Point> {
    if coords.is_empty() || count == 0 {
        return Vec::new();
    }
    let count = count.min(coords.len());
    (0..count).map(|i| coords[i * coords.len() / count]).collect()
}

/// Puts `outline_count` nodes on the outline (linked into a ring) and samples the remaining
/// `n - outline_count` inside the polygon those nodes span.
pub(crate) fn place(
    coords: &[Point],
    outline_count: usize,
    n: usize,
    ceiling: AttemptCeiling,
    rng: &mut dyn RngCore,
) -> Placement {
    let ring = evenly_spaced(coords, outline_count.min(n));
    let outline_len = ring.len();
    let interior = Region::Polygon(Polygon::new(ring.clone()));
    let inner = sample_region(&interior, n - outline_len, ceiling, rng);

    let mut points = ring;
    points.extend(inner);
    let mut adj = graph::empty(points.len());
    for i in 0..outline_len {
        graph::link(&mut adj, i, (i + 1) % outline_len);
    }
    Placement {
        points,
        outline_len,
        adj,
    }
}

pub(crate) fn ring_outline(coords: &[Point]) -> Outline {
    let mut closed = coords.to_vec();
    if let Some(first) = coords.first().copied() {
        closed.push(first);
    }
    Outline::from([("outline".to_string(), closed)])
}

const BRAIN_TEST2_OUTLINE: [(f64, f64); 16] = [
    (0.11666666666666667, 0.4523809523809524),
    (0.11666666666666667, 0.35714285714285715),
    (0.15, 0.2619047619047619),
    (0.21666666666666667, 0.21428571428571427),
    (0.2833333333333333, 0.16666666666666666),
    (0.4166666666666667, 0.16666666666666666),
    (0.55, 0.11904761904761904),
    (0.7166666666666667, 0.16666666666666666),
    (0.8166666666666667, 0.2619047619047619),
    (0.8833333333333333, 0.35714285714285715),
    (0.9166666666666666, 0.5),
    (0.85, 0.5952380952380952),
    (0.65, 0.8333333333333334),
    (0.55, 0.7857142857142857),
    (0.38333333333333336, 0.5952380952380952),
    (0.18333333333333332, 0.5476190476190477),
];

fn brain_test2_coords(width: f64, height: f64) -> Vec<Point> {
    Polygon::from_normalized(&BRAIN_TEST2_OUTLINE, width, height)
        .vertices()
        .to_vec()
}

/// A quarter of the nodes (8 to 16) on the outline ring, the rest scattered inside.
pub(crate) fn brain_test2(
    nodes: &[SkillNode],
    params: &ShapeParams,
    rng: &mut dyn RngCore,
) -> Vec<NodePosition> {
    let n = nodes.len();
    let coords = brain_test2_coords(params.width, params.height);
    let outline_count = coords.len().min((n / 4).max(8));
    let ceiling = match params.knobs.get_usize("sampling.maxAttempts") {
        Some(total) => AttemptCeiling::Total(total),
        None => AttemptCeiling::Total(5_000),
    };
    let placement = place(&coords, outline_count, n, ceiling, rng);

    let mut positions: Vec<NodePosition> = nodes
        .iter()
        .zip(&placement.points)
        .map(|(node, p)| NodePosition::at(node, p.x, p.y, 0.7))
        .collect();
    graph::assign(&mut positions, &placement.adj);
    positions
}

pub(crate) fn brain_test2_outline(width: f64, height: f64) -> Outline {
    ring_outline(&brain_test2_coords(width, height))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::replicate_pool;
    use crate::rng::XorShift64Star;

    #[test]
    fn evenly_spaced_uses_floor_steps() {
        let coords: Vec<Point> = (0..10).map(|i| Point::new(i as f64, 0.0)).collect();
        let picked = evenly_spaced(&coords, 4);
        let xs: Vec<f64> = picked.iter().map(|p| p.x).collect();
        assert_eq!(xs, vec![0.0, 2.0, 5.0, 7.0]);
        assert_eq!(evenly_spaced(&coords, 50).len(), 10);
        assert!(evenly_spaced(&[], 3).is_empty());
    }

    #[test]
    fn outline_ring_is_symmetric_and_interior_stays_inside() {
        let coords = brain_test2_coords(600.0, 400.0);
        let mut rng = XorShift64Star::new(21);
        let placement = place(&coords, 12, 40, AttemptCeiling::Total(5_000), &mut rng);
        assert_eq!(placement.points.len(), 40);
        assert!(graph::is_symmetric(&placement.adj));
        for i in 0..placement.outline_len {
            assert_eq!(placement.adj[i].len(), 2);
        }
        let ring = Polygon::new(placement.points[..placement.outline_len].to_vec());
        for i in placement.interior() {
            assert!(ring.contains(placement.points[i]));
        }
    }

    #[test]
    fn brain_test2_places_every_node_and_prunes_nothing() {
        let nodes = replicate_pool(&crate::model::default_pool(), 48);
        let params = ShapeParams::new(600.0, 400.0);
        let out = brain_test2(&nodes, &params, &mut XorShift64Star::new(3));
        assert_eq!(out.len(), 48);
        // 48 / 4 = 12 outline nodes, each with two ring neighbors.
        assert!(out[..12].iter().all(|p| p.neighbors.len() == 2));
        assert!(out[12..].iter().all(|p| p.neighbors.is_empty()));
    }

    #[test]
    fn tiny_inputs_use_every_node_on_the_outline() {
        let nodes = replicate_pool(&crate::model::default_pool(), 3);
        let params = ShapeParams::new(600.0, 400.0);
        let out = brain_test2(&nodes, &params, &mut XorShift64Star::new(3));
        assert_eq!(out.len(), 3);
        assert!(out.iter().all(|p| p.neighbors.len() == 2));
    }
}

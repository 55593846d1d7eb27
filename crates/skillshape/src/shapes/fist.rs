//! Fist silhouettes: a traced outline with hub wiring, and a rasterized vector variant.

use super::Outline;
use super::outlined::{self, Placement};
use super::recipe::{Recipe, Wiring};
use crate::error::Result;
use crate::geom::{PathRegion, Point, Polygon, Region};
use crate::graph;
use crate::model::{NodePosition, ShapeParams, SkillNode};
use crate::rng;
use crate::sample::AttemptCeiling;
use rand::RngCore;
use std::sync::Arc;

const FIST_OUTLINE: &str = include_str!("../../data/fist.json");
const FIST_COLOR: &str = "#8B0000";
const HUB_COUNT: usize = 4;
/// Interior nodes only attach to hubs closer than this, in pixels.
const HUB_REACH: f64 = 80.0;

fn fist_coords(width: f64, height: f64) -> Result<Vec<Point>> {
    Ok(Polygon::from_normalized_json(FIST_OUTLINE, width, height)?
        .vertices()
        .to_vec())
}

/// Outline ring (a fifth of the nodes, at least 10) with interior scatter. Each outline node
/// links to one random interior node; four random interior hubs collect every other interior
/// node within reach, up to `max_inside_connections` hubs each.
pub(crate) fn fist(
    nodes: &[SkillNode],
    params: &ShapeParams,
    rng: &mut dyn RngCore,
) -> Result<Vec<NodePosition>> {
    let n = nodes.len();
    let coords = fist_coords(params.width, params.height)?;
    let outline_count = coords.len().min((n / 5).max(10));
    let ceiling = match params.knobs.get_usize("sampling.maxAttempts") {
        Some(total) => AttemptCeiling::Total(total),
        None => AttemptCeiling::Total(5_000),
    };
    let mut placement = outlined::place(&coords, outline_count, n, ceiling, rng);
    wire_hubs(&mut placement, params.max_inside_connections(), rng);

    let mut positions: Vec<NodePosition> = nodes
        .iter()
        .zip(&placement.points)
        .enumerate()
        .map(|(i, (node, p))| {
            let mut pos = NodePosition::at(node, p.x, p.y, 0.7);
            pos.color = Some(FIST_COLOR.to_string());
            pos.size = Some(if i < placement.outline_len { 8.0 } else { 5.0 });
            pos
        })
        .collect();
    graph::assign(&mut positions, &placement.adj);
    Ok(positions)
}

fn wire_hubs(placement: &mut Placement, max_inside_connections: usize, rng: &mut dyn RngCore) {
    let interior: Vec<usize> = placement.interior().collect();
    if interior.is_empty() {
        return;
    }
    for i in 0..placement.outline_len {
        let target = interior[rng::index(rng, interior.len())];
        graph::link(&mut placement.adj, i, target);
    }

    let mut shuffled = interior.clone();
    rng::shuffle(rng, &mut shuffled);
    let hubs: Vec<usize> = shuffled.into_iter().take(HUB_COUNT).collect();
    if max_inside_connections == 0 {
        return;
    }
    for &node in interior.iter().filter(|i| !hubs.contains(i)) {
        let p = placement.points[node];
        let mut near: Vec<(f64, usize)> = hubs
            .iter()
            .map(|&h| (p.distance(placement.points[h]), h))
            .filter(|(d, _)| *d < HUB_REACH)
            .collect();
        near.sort_by(|a, b| a.0.total_cmp(&b.0));
        for (_, hub) in near.into_iter().take(max_inside_connections) {
            graph::link(&mut placement.adj, node, hub);
        }
    }
}

pub(crate) fn fist_outline(width: f64, height: f64) -> Result<Outline> {
    Ok(outlined::ring_outline(&fist_coords(width, height)?))
}

/// Vector fist outline, authored in a 451 x 368 box.
const FIST1_PATH: &str = "M0 0 C148.83 0 297.66 0 451 0 C451 121.44 451 242.88 451 368 \
    C302.17 368 153.34 368 0 368 C0 246.56 0 125.12 0 0 Z";

pub(crate) fn fist1(width: f64, height: f64) -> Result<Recipe> {
    let region = PathRegion::from_svg(FIST1_PATH, 451.0, 368.0, width, height)?;
    Ok(Recipe::single("outline", Region::Path(Arc::new(region)))
        .ceiling(AttemptCeiling::Total(5_000))
        .wiring(Wiring::KnnAll))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_pool, replicate_pool};
    use crate::rng::XorShift64Star;

    #[test]
    fn fist_outline_loads_and_scales() {
        let coords = fist_coords(600.0, 400.0).expect("coords");
        assert!(coords.len() > 100);
        assert!(
            coords
                .iter()
                .all(|p| (0.0..=600.0).contains(&p.x) && (0.0..=400.0).contains(&p.y))
        );
    }

    #[test]
    fn fist_wires_outline_nodes_into_the_interior() {
        let nodes = replicate_pool(&default_pool(), 80);
        let params = ShapeParams::new(600.0, 400.0).with_max_inside_connections(2);
        let out = fist(&nodes, &params, &mut XorShift64Star::new(8)).expect("fist");
        assert!(out.len() > 60, "placed {}", out.len());
        // 80 / 5 = 16 outline nodes: two ring links plus at least the interior link.
        for p in &out[..16] {
            assert!(p.neighbors.len() >= 3, "{:?}", p.neighbors);
            assert_eq!(p.size, Some(8.0));
        }
        assert!(out[16..].iter().all(|p| p.size == Some(5.0)));
        assert!(out.iter().all(|p| p.color.as_deref() == Some(FIST_COLOR)));
    }

    #[test]
    fn zero_inside_connections_leaves_hubs_unattached() {
        let nodes = replicate_pool(&default_pool(), 60);
        let params = ShapeParams::new(600.0, 400.0).with_max_inside_connections(0);
        let out = fist(&nodes, &params, &mut XorShift64Star::new(8)).expect("fist");
        let outline_ids: Vec<&str> = out[..12].iter().map(|p| p.id.as_str()).collect();
        for p in &out[12..] {
            assert!(
                p.neighbors
                    .iter()
                    .all(|id| outline_ids.contains(&id.as_str()))
            );
        }
    }

    #[test]
    fn fist1_path_fills_a_centered_box() {
        let r = fist1(902.0, 368.0).expect("fist1");
        let Region::Path(path) = &r.composite().parts[0].region else {
            panic!("expected a path region");
        };
        // Scale 1, offset by 225.5 horizontally.
        assert!(path.contains(451.0, 184.0));
        assert!(!path.contains(100.0, 184.0));
        assert!(!path.contains(800.0, 184.0));
    }
}

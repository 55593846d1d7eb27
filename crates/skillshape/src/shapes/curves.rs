//! Parametric curves: the twisted loop and the lateral-eight family.

use super::Outline;
use crate::geom::Point;
use crate::graph;
use crate::model::{NodePosition, ShapeParams, SkillNode, score_to_brightness};
use std::f64::consts::TAU;

const CURVE_SAMPLES: usize = 240;

fn moebius_point(params: &ShapeParams, t: f64) -> Point {
    let (cx, cy) = (params.width / 2.0, params.height / 2.0);
    let r = params.width.min(params.height) * 0.32;
    let w = r * 0.22;
    let radial = r + w * (t / 2.0).cos();
    Point::new(cx + radial * t.cos(), cy + radial * t.sin() * (t / 2.0).cos())
}

/// Lateral eight scaled by `(a, b)`.
fn eight_point(params: &ShapeParams, a: f64, b: f64, t: f64) -> Point {
    Point::new(
        params.width / 2.0 + a * t.cos(),
        params.height / 2.0 + b * (2.0 * t).sin() / 1.2,
    )
}

fn along<F>(nodes: &[SkillNode], point_at: F) -> Vec<NodePosition>
where
    F: Fn(f64) -> Point,
{
    let n = nodes.len() as f64;
    nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let p = point_at(i as f64 / n * TAU);
            NodePosition::at(node, p.x, p.y, score_to_brightness(node.score))
        })
        .collect()
}

fn trace<F>(point_at: F) -> Vec<Point>
where
    F: Fn(f64) -> Point,
{
    (0..=CURVE_SAMPLES)
        .map(|i| point_at(i as f64 / CURVE_SAMPLES as f64 * TAU))
        .collect()
}

pub(crate) fn moebius(nodes: &[SkillNode], params: &ShapeParams) -> Vec<NodePosition> {
    along(nodes, |t| moebius_point(params, t))
}

pub(crate) fn moebius_outline(params: &ShapeParams) -> Outline {
    Outline::from([("curve".to_string(), trace(|t| moebius_point(params, t)))])
}

fn infinity_axes(params: &ShapeParams) -> (f64, f64) {
    let m = params.width.min(params.height);
    (m * 0.42, m * 0.19)
}

pub(crate) fn infinity(nodes: &[SkillNode], params: &ShapeParams) -> Vec<NodePosition> {
    let (a, b) = infinity_axes(params);
    along(nodes, |t| eight_point(params, a, b, t))
}

pub(crate) fn infinity_outline(params: &ShapeParams) -> Outline {
    let (a, b) = infinity_axes(params);
    Outline::from([("curve".to_string(), trace(|t| eight_point(params, a, b, t)))])
}

/// Axes of layer `layer`; outer layers grow by `node_space * 1.1` steps.
fn layer_axes(params: &ShapeParams, layer: usize) -> (f64, f64) {
    let m = params.width.min(params.height);
    let offset = params.node_space() * 1.1 * layer as f64;
    (m * 0.48 + offset * 90.0, m * 0.19 + offset * 60.0)
}

/// Concentric lateral eights. Nodes are split across `layers` in order, earlier layers taking
/// the extra node when the count does not divide evenly. Each layer is a ring, and node `i` of a
/// layer links to node `i` of each adjacent layer.
pub(crate) fn layered(nodes: &[SkillNode], params: &ShapeParams, layers: usize) -> Vec<NodePosition> {
    let n = nodes.len();
    let layers = layers.max(1);
    let (base, extra) = (n / layers, n % layers);
    let sizes: Vec<usize> = (0..layers).map(|l| base + usize::from(l < extra)).collect();

    let mut positions = Vec::with_capacity(n);
    let mut starts = Vec::with_capacity(layers);
    let mut cursor = 0;
    for (layer, &size) in sizes.iter().enumerate() {
        starts.push(cursor);
        let (a, b) = layer_axes(params, layer);
        for i in 0..size {
            let node = &nodes[cursor + i];
            let p = eight_point(params, a, b, i as f64 / size as f64 * TAU);
            positions.push(NodePosition::at(
                node,
                p.x,
                p.y,
                score_to_brightness(node.score),
            ));
        }
        cursor += size;
    }

    let mut adj = graph::empty(n);
    for (layer, &size) in sizes.iter().enumerate() {
        let start = starts[layer];
        for i in 0..size {
            graph::link(&mut adj, start + i, start + (i + 1) % size);
            if layer + 1 < layers && i < sizes[layer + 1] {
                graph::link(&mut adj, start + i, starts[layer + 1] + i);
            }
        }
    }
    graph::assign(&mut positions, &adj);
    positions
}

pub(crate) fn layered_outline(params: &ShapeParams, layers: usize) -> Outline {
    (0..layers.max(1))
        .map(|layer| {
            let (a, b) = layer_axes(params, layer);
            (
                format!("layer{layer}"),
                trace(|t| eight_point(params, a, b, t)),
            )
        })
        .collect()
}

//! Topology showcases and user-drawn outlines.

use super::Outline;
use super::recipe::{OUTLINE_SAMPLES, Recipe, Shade, Wiring};
use crate::error::{Error, Result};
use crate::geom::{Ellipse, Point, Polygon, Region};
use crate::graph::{self, Topology};
use crate::model::{NodePosition, ShapeParams, SkillNode, score_to_brightness};
use crate::sample::AttemptCeiling;
use rand::RngCore;
use std::f64::consts::TAU;

fn demo_ellipse(params: &ShapeParams) -> Ellipse {
    Ellipse::new(
        Point::new(params.width / 2.0, params.height / 2.0),
        params.width * 0.38,
        params.height * 0.38,
    )
}

/// Nodes evenly spaced on an ellipse, wired by `topology` in input order.
pub(crate) fn topology_demo(
    topology: Topology,
    nodes: &[SkillNode],
    params: &ShapeParams,
    rng: &mut dyn RngCore,
) -> Vec<NodePosition> {
    let e = demo_ellipse(params);
    let n = nodes.len();
    let mut positions: Vec<NodePosition> = nodes
        .iter()
        .enumerate()
        .map(|(i, node)| {
            let t = i as f64 / n as f64 * TAU;
            NodePosition::at(
                node,
                e.center.x + e.rx * t.cos(),
                e.center.y + e.ry * t.sin(),
                score_to_brightness(node.score),
            )
        })
        .collect();
    graph::assign(&mut positions, &topology.generate(n, rng));
    positions
}

pub(crate) fn topology_demo_outline(params: &ShapeParams) -> Outline {
    Outline::from([(
        "ellipse".to_string(),
        Region::Ellipse(demo_ellipse(params)).outline(OUTLINE_SAMPLES),
    )])
}

/// Polygon from the `outline` knob: a JSON array of normalized points, or a string holding one.
pub(crate) fn drawn(params: &ShapeParams) -> Result<Recipe> {
    let polygon = match params.knobs.get("outline") {
        Some(serde_json::Value::String(json)) => {
            Polygon::from_normalized_json(json, params.width, params.height)?
        }
        Some(value) => Polygon::from_normalized_value(value, params.width, params.height)?,
        None => {
            return Err(Error::InvalidOutline {
                message: "no `outline` knob was supplied".to_string(),
            });
        }
    };
    Ok(Recipe::single("outline", Region::Polygon(polygon))
        .ceiling(AttemptCeiling::Total(5_000))
        .wiring(Wiring::KnnAll)
        .shade(Shade::Score))
}

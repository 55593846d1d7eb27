#![forbid(unsafe_code)]

//! Procedural region-constrained layouts for skill-node diagrams.
//!
//! A layout places caller-supplied nodes inside a named shape (brains, fists, curves, topology
//! showcases), wires them into a neighbor graph and optionally relaxes them with a bounded force
//! pass. Everything is headless and synchronous; randomness is injected through
//! [`rand::RngCore`].

pub mod cluster;
pub mod config;
pub mod error;
pub mod geom;
pub mod graph;
pub mod model;
pub mod relax;
pub mod rng;
pub mod sample;
pub mod shapes;

pub use cluster::{ClusterOptions, cluster};
pub use config::LayoutConfig;
pub use error::{Error, Result};
pub use geom::Point;
pub use graph::Topology;
pub use model::{NodePosition, ShapeParams, SkillNode, default_pool, replicate_pool};
pub use rng::XorShift64Star;
pub use shapes::{Outline, ShapeId, outline};

use rand::RngCore;

/// Permissive entry point with fresh entropy. Failures log a warning and yield no positions.
pub fn layout(shape_id: &str, nodes: &[SkillNode], params: &ShapeParams) -> Vec<NodePosition> {
    layout_with_rng(shape_id, nodes, params, &mut rand::thread_rng())
}

/// Reproducible variant of [`layout`].
pub fn layout_seeded(
    shape_id: &str,
    nodes: &[SkillNode],
    params: &ShapeParams,
    seed: u64,
) -> Vec<NodePosition> {
    layout_with_rng(shape_id, nodes, params, &mut XorShift64Star::new(seed))
}

pub fn layout_with_rng(
    shape_id: &str,
    nodes: &[SkillNode],
    params: &ShapeParams,
    rng: &mut dyn RngCore,
) -> Vec<NodePosition> {
    match try_layout(shape_id, nodes, params, rng) {
        Ok(positions) => positions,
        Err(err) => {
            tracing::warn!(shape_id, error = %err, "layout failed");
            Vec::new()
        }
    }
}

/// Strict entry point.
///
/// Fails on an unknown shape, a non-positive or non-finite drawing area, an unknown `topology`
/// knob, or a malformed outline/path. An empty node list is not an error.
pub fn try_layout(
    shape_id: &str,
    nodes: &[SkillNode],
    params: &ShapeParams,
    rng: &mut dyn RngCore,
) -> Result<Vec<NodePosition>> {
    let shape: ShapeId = shape_id.parse()?;
    if !params.has_valid_area() {
        return Err(Error::InvalidDimensions {
            width: params.width,
            height: params.height,
        });
    }
    if nodes.is_empty() {
        return Ok(Vec::new());
    }
    shapes::run(shape, nodes, params, rng)
}

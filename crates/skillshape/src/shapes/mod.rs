//! Shape catalog and dispatch.
//!
//! Every shape is a recipe over the shared pipeline (sample, wire, optionally relax) or a direct
//! placement along a curve. After the shape runs, the knob-driven post-passes apply in order:
//! topology override, clustering, dangling-neighbor pruning.

mod brain;
mod chikara;
mod curves;
mod demo;
mod fist;
mod outlined;
mod recipe;

use crate::cluster::{ClusterOptions, cluster};
use crate::error::{Error, Result};
use crate::geom::Point;
use crate::graph::{self, Topology};
use crate::model::{NodePosition, ShapeParams, SkillNode};
use indexmap::IndexMap;
use rand::RngCore;
use std::str::FromStr;

/// Named boundary polylines of a shape, in drawing-area coordinates.
pub type Outline = IndexMap<String, Vec<Point>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ShapeId {
    Moebius,
    Infinity,
    Infinity2,
    Infinity3,
    Chikara,
    Brain,
    Brain2,
    Brain3,
    Brain4Polygon,
    BrainSvg2,
    TopDownBrain,
    TopDownBrain2,
    BrainTest2,
    Fist,
    Fist1,
    /// Polygon supplied through the `outline` knob.
    Drawn,
    TopologyDemo(Topology),
}

const TOPOLOGY_DEMO_SUFFIX: &str = "-topology-demo";

impl ShapeId {
    const FIXED: [ShapeId; 16] = [
        ShapeId::Moebius,
        ShapeId::Infinity,
        ShapeId::Infinity2,
        ShapeId::Infinity3,
        ShapeId::Chikara,
        ShapeId::Brain,
        ShapeId::Brain2,
        ShapeId::Brain3,
        ShapeId::Brain4Polygon,
        ShapeId::BrainSvg2,
        ShapeId::TopDownBrain,
        ShapeId::TopDownBrain2,
        ShapeId::BrainTest2,
        ShapeId::Fist,
        ShapeId::Fist1,
        ShapeId::Drawn,
    ];

    /// Every supported identifier, topology demos last.
    pub fn all() -> Vec<ShapeId> {
        Self::FIXED
            .into_iter()
            .chain(Topology::ALL.into_iter().map(ShapeId::TopologyDemo))
            .collect()
    }

    pub fn name(self) -> String {
        let fixed = match self {
            ShapeId::Moebius => "moebius",
            ShapeId::Infinity => "infinity",
            ShapeId::Infinity2 => "infinity2",
            ShapeId::Infinity3 => "infinity3",
            ShapeId::Chikara => "chikara",
            ShapeId::Brain => "brain",
            ShapeId::Brain2 => "brain2",
            ShapeId::Brain3 => "brain3",
            ShapeId::Brain4Polygon => "brain4-polygon",
            ShapeId::BrainSvg2 => "brain-svg2",
            ShapeId::TopDownBrain => "top-down-brain",
            ShapeId::TopDownBrain2 => "top-down-brain2",
            ShapeId::BrainTest2 => "brain-test2",
            ShapeId::Fist => "fist",
            ShapeId::Fist1 => "fist1",
            ShapeId::Drawn => "drawn",
            ShapeId::TopologyDemo(t) => return format!("{}{TOPOLOGY_DEMO_SUFFIX}", t.name()),
        };
        fixed.to_string()
    }
}

impl FromStr for ShapeId {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        if let Some(found) = Self::FIXED.into_iter().find(|id| id.name() == name) {
            return Ok(found);
        }
        name.strip_suffix(TOPOLOGY_DEMO_SUFFIX)
            .and_then(|t| t.parse::<Topology>().ok())
            .map(ShapeId::TopologyDemo)
            .ok_or_else(|| Error::UnknownShape {
                shape_id: s.to_string(),
            })
    }
}

impl std::fmt::Display for ShapeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name())
    }
}

/// Places `nodes` for `shape` and applies the post-passes.
pub(crate) fn run(
    shape: ShapeId,
    nodes: &[SkillNode],
    params: &ShapeParams,
    rng: &mut dyn RngCore,
) -> Result<Vec<NodePosition>> {
    let (w, h) = (params.width, params.height);
    tracing::debug!(shape = %shape, nodes = nodes.len(), width = w, height = h, "layout");
    let mut positions = match shape {
        ShapeId::Moebius => curves::moebius(nodes, params),
        ShapeId::Infinity => curves::infinity(nodes, params),
        ShapeId::Infinity2 => curves::layered(nodes, params, 2),
        ShapeId::Infinity3 => curves::layered(nodes, params, 3),
        ShapeId::Chikara => chikara::chikara(nodes, params),
        ShapeId::Brain => brain::brain(w, h).run(nodes, params, rng),
        ShapeId::Brain2 => brain::brain2(w, h).run(nodes, params, rng),
        ShapeId::Brain3 => brain::brain3(w, h).run(nodes, params, rng),
        ShapeId::Brain4Polygon => brain::brain4_polygon(w, h).run(nodes, params, rng),
        ShapeId::BrainSvg2 => brain::brain_svg2(w, h)?.run(nodes, params, rng),
        ShapeId::TopDownBrain => brain::top_down_brain(w, h).run(nodes, params, rng),
        ShapeId::TopDownBrain2 => brain::top_down_brain2(w, h)?.run(nodes, params, rng),
        ShapeId::BrainTest2 => outlined::brain_test2(nodes, params, rng),
        ShapeId::Fist => fist::fist(nodes, params, rng)?,
        ShapeId::Fist1 => fist::fist1(w, h)?.run(nodes, params, rng),
        ShapeId::Drawn => demo::drawn(params)?.run(nodes, params, rng),
        ShapeId::TopologyDemo(t) => demo::topology_demo(t, nodes, params, rng),
    };
    if positions.len() < nodes.len() {
        tracing::warn!(
            shape = %shape,
            requested = nodes.len(),
            placed = positions.len(),
            "layout placed fewer nodes than requested"
        );
    }
    post_process(&mut positions, params, rng)?;
    Ok(positions)
}

fn post_process(
    positions: &mut [NodePosition],
    params: &ShapeParams,
    rng: &mut dyn RngCore,
) -> Result<()> {
    if let Some(name) = params.knobs.get_str("topology") {
        let topology: Topology = name.parse()?;
        tracing::debug!(%topology, "rewiring by topology");
        graph::assign(positions, &topology.generate(positions.len(), rng));
    }
    if let Some(opts) = ClusterOptions::from_config(&params.knobs) {
        cluster(positions, &opts);
    }
    let pruned = graph::prune_dangling(positions);
    if pruned > 0 {
        tracing::debug!(pruned, "dropped neighbors without a position");
    }
    Ok(())
}

/// Boundary polylines of `shape` for display.
pub fn outline(shape: ShapeId, params: &ShapeParams) -> Result<Outline> {
    if !params.has_valid_area() {
        return Err(Error::InvalidDimensions {
            width: params.width,
            height: params.height,
        });
    }
    let (w, h) = (params.width, params.height);
    let out = match shape {
        ShapeId::Moebius => curves::moebius_outline(params),
        ShapeId::Infinity => curves::infinity_outline(params),
        ShapeId::Infinity2 => curves::layered_outline(params, 2),
        ShapeId::Infinity3 => curves::layered_outline(params, 3),
        ShapeId::Chikara => chikara::chikara_outline(params),
        ShapeId::Brain => brain::brain(w, h).outline(),
        ShapeId::Brain2 => brain::brain2(w, h).outline(),
        ShapeId::Brain3 => brain::brain3(w, h).outline(),
        ShapeId::Brain4Polygon => brain::brain4_polygon(w, h).outline(),
        ShapeId::BrainSvg2 => brain::brain_svg2(w, h)?.outline(),
        ShapeId::TopDownBrain => brain::top_down_brain(w, h).outline(),
        ShapeId::TopDownBrain2 => brain::top_down_brain2(w, h)?.outline(),
        ShapeId::BrainTest2 => outlined::brain_test2_outline(w, h),
        ShapeId::Fist => fist::fist_outline(w, h)?,
        ShapeId::Fist1 => fist::fist1(w, h)?.outline(),
        ShapeId::Drawn => demo::drawn(params)?.outline(),
        ShapeId::TopologyDemo(_) => demo::topology_demo_outline(params),
    };
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_shape_name_parses_back() {
        let all = ShapeId::all();
        assert_eq!(all.len(), 16 + Topology::ALL.len());
        for id in all {
            assert_eq!(id.name().parse::<ShapeId>().expect("parse"), id);
        }
    }

    #[test]
    fn topology_demo_names_use_the_topology_name() {
        assert_eq!(
            "ring-topology-demo".parse::<ShapeId>().expect("parse"),
            ShapeId::TopologyDemo(Topology::Ring)
        );
        assert_eq!(
            ShapeId::TopologyDemo(Topology::PartialMesh).to_string(),
            "partial-mesh-topology-demo"
        );
    }

    #[test]
    fn unknown_names_are_rejected() {
        for bad in ["", "pentagon", "spiral-topology-demo", "-topology-demo"] {
            assert!(matches!(
                bad.parse::<ShapeId>(),
                Err(Error::UnknownShape { .. })
            ));
        }
    }

    #[test]
    fn every_static_shape_has_an_outline() {
        let params = ShapeParams::new(600.0, 400.0);
        for id in ShapeId::all() {
            if id == ShapeId::Drawn {
                continue;
            }
            let out = outline(id, &params).expect("outline");
            assert!(!out.is_empty(), "{id}");
            assert!(out.values().all(|pts| pts.len() >= 2), "{id}");
        }
    }
}

//! The sample / wire / relax pipeline shared by every region-filled shape.

use super::Outline;
use crate::geom::{Composite, Part, Point, Region};
use crate::graph::{self, knn};
use crate::model::{self, NodePosition, ShapeParams, SkillNode};
use crate::relax::{Body, RelaxOptions, relax};
use crate::sample::{AttemptCeiling, sample_composite};
use rand::RngCore;

/// Segments used when tracing curved region boundaries for display.
pub(crate) const OUTLINE_SAMPLES: usize = 120;

/// How the sampled points are connected.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Wiring {
    None,
    /// k-NN restricted to each composite part.
    KnnPerPart,
    /// k-NN across the whole shape.
    KnnAll,
}

/// Where a node's brightness comes from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Shade {
    Fixed(f64),
    Score,
    /// A weighted random intensity per node, which also strengthens its attraction when relaxing.
    Intensity,
}

#[derive(Debug, Clone)]
pub(crate) struct Recipe {
    composite: Composite,
    ceiling: AttemptCeiling,
    wiring: Wiring,
    relax: bool,
    shade: Shade,
    color: Option<&'static str>,
    size: Option<f64>,
}

impl Recipe {
    pub(crate) fn new(composite: Composite) -> Self {
        Self {
            composite,
            ceiling: AttemptCeiling::default(),
            wiring: Wiring::KnnPerPart,
            relax: false,
            shade: Shade::Fixed(0.7),
            color: None,
            size: None,
        }
    }

    /// A single region holding the whole budget.
    pub(crate) fn single(name: &'static str, region: Region) -> Self {
        Self::new(Composite::new(
            vec![Part {
                name,
                region,
                share: 1.0,
            }],
            0,
        ))
    }

    pub(crate) fn ceiling(mut self, ceiling: AttemptCeiling) -> Self {
        self.ceiling = ceiling;
        self
    }

    pub(crate) fn wiring(mut self, wiring: Wiring) -> Self {
        self.wiring = wiring;
        self
    }

    pub(crate) fn relaxed(mut self) -> Self {
        self.relax = true;
        self
    }

    pub(crate) fn shade(mut self, shade: Shade) -> Self {
        self.shade = shade;
        self
    }

    pub(crate) fn styled(mut self, color: &'static str, size: f64) -> Self {
        self.color = Some(color);
        self.size = Some(size);
        self
    }

    pub(crate) fn composite(&self) -> &Composite {
        &self.composite
    }

    pub(crate) fn outline(&self) -> Outline {
        self.composite()
            .parts
            .iter()
            .map(|part| (part.name.to_string(), part.region.outline(OUTLINE_SAMPLES)))
            .collect()
    }

    fn effective_ceiling(&self, params: &ShapeParams) -> AttemptCeiling {
        match (self.ceiling, params.knobs.get_usize("sampling.maxAttempts")) {
            (AttemptCeiling::PerPoint(_), Some(n)) => AttemptCeiling::PerPoint(n),
            (AttemptCeiling::Total(_), Some(n)) => AttemptCeiling::Total(n),
            (ceiling, None) => ceiling,
        }
    }

    pub(crate) fn run(
        &self,
        nodes: &[SkillNode],
        params: &ShapeParams,
        rng: &mut dyn RngCore,
    ) -> Vec<NodePosition> {
        let tagged = sample_composite(
            self.composite(),
            nodes.len(),
            self.effective_ceiling(params),
            rng,
        );
        let (tags, mut points): (Vec<usize>, Vec<Point>) = tagged.into_iter().unzip();

        let k = params.knobs.get_usize("graph.k").unwrap_or(3);
        let adj = match self.wiring {
            Wiring::None => graph::empty(points.len()),
            Wiring::KnnPerPart => knn::per_region(&points, &tags, k),
            Wiring::KnnAll => knn::nearest(&points, k),
        };

        let intensities: Vec<Option<u8>> = match self.shade {
            Shade::Intensity => (0..points.len())
                .map(|_| Some(model::random_intensity(rng)))
                .collect(),
            _ => vec![None; points.len()],
        };

        if params.knobs.get_bool("relax.enabled").unwrap_or(self.relax) {
            let regions: Vec<Region> = self
                .composite
                .parts
                .iter()
                .map(|p| p.region.clone())
                .collect();
            let mut bodies: Vec<Body> = points
                .iter()
                .zip(&tags)
                .zip(&adj)
                .zip(&intensities)
                .map(|(((&pos, &region), neighbors), &intensity)| Body {
                    pos,
                    region,
                    neighbors: neighbors.clone(),
                    intensity,
                })
                .collect();
            relax(
                &mut bodies,
                &regions,
                params.width,
                params.height,
                &RelaxOptions::from_config(&params.knobs),
                rng,
            );
            points = bodies.into_iter().map(|b| b.pos).collect();
        }

        let mut positions: Vec<NodePosition> = nodes
            .iter()
            .zip(points.iter().zip(&intensities))
            .map(|(node, (p, intensity))| {
                let brightness = match (self.shade, intensity) {
                    (Shade::Intensity, Some(i)) => model::intensity_to_brightness(*i),
                    (Shade::Score, _) => model::score_to_brightness(node.score),
                    (Shade::Fixed(b), _) => b,
                    (Shade::Intensity, None) => 0.7,
                };
                let mut pos = NodePosition::at(node, p.x, p.y, brightness);
                pos.color = self.color.map(str::to_string);
                pos.size = self.size;
                pos
            })
            .collect();
        graph::assign(&mut positions, &adj);
        positions
    }
}

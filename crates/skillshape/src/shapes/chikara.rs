//! The kanji for "strength" drawn as three straight strokes.

use super::Outline;
use crate::geom::Point;
use crate::graph;
use crate::model::{NodePosition, ShapeParams, SkillNode};
use crate::sample::split_budget;

struct Stroke {
    name: &'static str,
    from: (f64, f64),
    to: (f64, f64),
}

const STROKES: [Stroke; 3] = [
    Stroke {
        name: "stem",
        from: (0.35, 0.18),
        to: (0.35, 0.82),
    },
    Stroke {
        name: "sweep",
        from: (0.35, 0.5),
        to: (0.75, 0.18),
    },
    Stroke {
        name: "hook",
        from: (0.55, 0.65),
        to: (0.82, 0.82),
    },
];

impl Stroke {
    fn length(&self) -> f64 {
        (self.to.0 - self.from.0).hypot(self.to.1 - self.from.1)
    }

    fn at(&self, t: f64, width: f64, height: f64) -> Point {
        Point::new(
            width * (self.from.0 + (self.to.0 - self.from.0) * t),
            height * (self.from.1 + (self.to.1 - self.from.1) * t),
        )
    }
}

/// Nodes split across the strokes by stroke length (rounding absorbed by the first stroke),
/// spaced evenly inside each stroke without touching its end points, and chained along it.
pub(crate) fn chikara(nodes: &[SkillNode], params: &ShapeParams) -> Vec<NodePosition> {
    let total: f64 = STROKES.iter().map(Stroke::length).sum();
    let shares: Vec<f64> = STROKES.iter().map(|s| s.length() / total).collect();
    let budgets = split_budget(&shares, nodes.len(), 0);

    let mut positions = Vec::with_capacity(nodes.len());
    let mut adj = graph::empty(nodes.len());
    let mut remaining = nodes.iter();
    for (stroke, &count) in STROKES.iter().zip(&budgets) {
        let start = positions.len();
        for (i, node) in remaining.by_ref().take(count).enumerate() {
            let t = (i + 1) as f64 / (count + 1) as f64;
            let p = stroke.at(t, params.width, params.height);
            positions.push(NodePosition::at(node, p.x, p.y, 0.7));
            if i > 0 {
                graph::link(&mut adj, start + i - 1, start + i);
            }
        }
    }
    graph::assign(&mut positions, &adj);
    positions
}

pub(crate) fn chikara_outline(params: &ShapeParams) -> Outline {
    STROKES
        .iter()
        .map(|s| {
            (
                s.name.to_string(),
                vec![
                    s.at(0.0, params.width, params.height),
                    s.at(1.0, params.width, params.height),
                ],
            )
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{default_pool, replicate_pool};

    #[test]
    fn budgets_follow_stroke_length_and_conserve() {
        for n in [1, 2, 10, 33] {
            let nodes = replicate_pool(&default_pool(), n);
            assert_eq!(chikara(&nodes, &ShapeParams::new(500.0, 500.0)).len(), n);
        }
    }

    #[test]
    fn nodes_avoid_stroke_end_points_and_chain() {
        let nodes = replicate_pool(&default_pool(), 10);
        let out = chikara(&nodes, &ShapeParams::new(100.0, 100.0));
        // Longest stroke first: x == 35 for all of its nodes, y strictly inside (18, 82).
        let stem: Vec<&NodePosition> = out.iter().take_while(|p| (p.x - 35.0).abs() < 1e-9).collect();
        assert!(!stem.is_empty());
        assert!(stem.iter().all(|p| p.y > 18.0 && p.y < 82.0));
        assert_eq!(stem[0].neighbors.len(), 1);
        if stem.len() > 2 {
            assert_eq!(stem[1].neighbors.len(), 2);
        }
    }
}

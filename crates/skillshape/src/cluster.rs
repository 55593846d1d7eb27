//! Seeded pull of positioned nodes toward a few anchor points.

use crate::config::LayoutConfig;
use crate::geom::Point;
use crate::model::NodePosition;
use crate::rng::{self, SeededRandom};

/// Strength is clamped below 1 so nodes never collapse onto their center.
pub const MAX_STRENGTH: f64 = 0.99;

#[derive(Debug, Clone, PartialEq)]
pub struct ClusterOptions {
    pub count: usize,
    pub strength: f64,
    pub seed: String,
}

impl ClusterOptions {
    /// `cluster.count` (required, > 0), `cluster.strength` (default 0.5), `cluster.seed`
    /// (default `"default"`).
    pub fn from_config(cfg: &LayoutConfig) -> Option<Self> {
        let count = cfg.get_usize("cluster.count").filter(|c| *c > 0)?;
        let seed = match cfg.get("cluster.seed") {
            Some(serde_json::Value::String(s)) => s.clone(),
            Some(other) if !other.is_null() => other.to_string(),
            _ => "default".to_string(),
        };
        Some(Self {
            count,
            strength: cfg.get_f64("cluster.strength").unwrap_or(0.5),
            seed,
        })
    }
}

/// Picks `count` centers among the current positions, assigns every node to one of them, and moves
/// each node `strength` of the way toward its center. Region containment is not re-checked.
pub fn cluster(positions: &mut [NodePosition], opts: &ClusterOptions) {
    let n = positions.len();
    let count = opts.count.min(n);
    if count == 0 {
        return;
    }
    let strength = opts.strength.clamp(0.0, MAX_STRENGTH);
    let mut rng = SeededRandom::from_seed_str(&opts.seed);

    let centers: Vec<Point> = (0..count)
        .map(|_| {
            let p = &positions[rng::index(&mut rng, n)];
            Point::new(p.x, p.y)
        })
        .collect();
    tracing::debug!(count, strength, seed = %opts.seed, "clustering");

    for pos in positions.iter_mut() {
        let c = centers[rng::index(&mut rng, count)];
        pos.x += (c.x - pos.x) * strength;
        pos.y += (c.y - pos.y) * strength;
    }
}

use crate::config::LayoutConfig;
use crate::rng;
use rand::RngCore;
use serde::{Deserialize, Serialize};

/// Caller-supplied input node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillNode {
    pub id: String,
    /// 1 to 10.
    pub score: f64,
}

impl SkillNode {
    pub fn new(id: impl Into<String>, score: f64) -> Self {
        Self {
            id: id.into(),
            score,
        }
    }
}

/// Positioned output node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodePosition {
    pub id: String,
    pub x: f64,
    pub y: f64,
    pub brightness: f64,
    #[serde(default)]
    pub neighbors: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
}

impl NodePosition {
    pub fn at(node: &SkillNode, x: f64, y: f64, brightness: f64) -> Self {
        Self {
            id: node.id.clone(),
            x,
            y,
            brightness,
            neighbors: Vec::new(),
            score: Some(node.score),
            size: None,
            color: None,
        }
    }
}

/// Per-call drawing area and layout knobs.
#[derive(Debug, Clone, PartialEq)]
pub struct ShapeParams {
    pub width: f64,
    pub height: f64,
    /// Layer/offset spacing multiplier for multi-layer shapes. Defaults to 1.0.
    pub node_space: Option<f64>,
    /// Hub connections per interior node for hub-capped shapes. Defaults to 1.
    pub max_inside_connections: Option<u32>,
    pub knobs: LayoutConfig,
}

impl ShapeParams {
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width,
            height,
            node_space: None,
            max_inside_connections: None,
            knobs: LayoutConfig::empty_object(),
        }
    }

    pub fn with_node_space(mut self, node_space: f64) -> Self {
        self.node_space = Some(node_space);
        self
    }

    pub fn with_max_inside_connections(mut self, n: u32) -> Self {
        self.max_inside_connections = Some(n);
        self
    }

    pub fn with_knob(mut self, dotted_path: &str, value: serde_json::Value) -> Self {
        self.knobs.set_value(dotted_path, value);
        self
    }

    pub fn node_space(&self) -> f64 {
        self.node_space
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(1.0)
    }

    pub fn max_inside_connections(&self) -> usize {
        self.max_inside_connections.unwrap_or(1) as usize
    }

    pub fn has_valid_area(&self) -> bool {
        self.width.is_finite() && self.height.is_finite() && self.width > 0.0 && self.height > 0.0
    }
}

/// Score 1..=10 to brightness 0.3..=1.0.
pub fn score_to_brightness(score: f64) -> f64 {
    0.3 + 0.7 * (score - 1.0) / 9.0
}

/// Score 1..=10 to node radius 6..=18 px.
pub fn score_to_radius(score: f64) -> f64 {
    6.0 + 12.0 * (score - 1.0) / 9.0
}

/// Brightness for an intensity level 1..=10.
pub fn intensity_to_brightness(intensity: u8) -> f64 {
    0.4 + 0.6 * (intensity as f64 / 10.0)
}

/// Weighted intensity draw in 1..=10; high values are rare (10 has a 3% chance).
pub fn random_intensity(rng: &mut dyn RngCore) -> u8 {
    const THRESHOLDS: [(f64, u8); 9] = [
        (0.97, 10),
        (0.90, 9),
        (0.80, 8),
        (0.65, 7),
        (0.50, 6),
        (0.35, 5),
        (0.25, 4),
        (0.15, 3),
        (0.07, 2),
    ];
    let r = rng::unit(rng);
    THRESHOLDS
        .iter()
        .find(|(t, _)| r > *t)
        .map(|(_, level)| *level)
        .unwrap_or(1)
}

const DEFAULT_POOL: [(&str, f64); 12] = [
    ("guard-retention", 8.0),
    ("hip-escape", 9.0),
    ("armbar", 7.0),
    ("triangle", 6.0),
    ("kimura", 5.0),
    ("takedown", 4.0),
    ("back-take", 7.0),
    ("mount-escape", 6.0),
    ("sweep", 5.0),
    ("pressure-passing", 3.0),
    ("breathing", 2.0),
    ("grip-fighting", 8.0),
];

/// The built-in skill pool.
pub fn default_pool() -> Vec<SkillNode> {
    DEFAULT_POOL
        .iter()
        .map(|(id, score)| SkillNode::new(*id, *score))
        .collect()
}

/// Replicates (or truncates) `pool` to exactly `count` nodes with unique `-dyn<i>` ids.
pub fn replicate_pool(pool: &[SkillNode], count: usize) -> Vec<SkillNode> {
    if pool.is_empty() {
        return Vec::new();
    }
    (0..count)
        .map(|i| {
            let src = &pool[i % pool.len()];
            SkillNode::new(format!("{}-dyn{i}", src.id), src.score)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rng::XorShift64Star;

    #[test]
    fn score_mappings_hit_their_endpoints() {
        assert!((score_to_brightness(1.0) - 0.3).abs() < 1e-12);
        assert!((score_to_brightness(10.0) - 1.0).abs() < 1e-12);
        assert!((score_to_radius(1.0) - 6.0).abs() < 1e-12);
        assert!((score_to_radius(10.0) - 18.0).abs() < 1e-12);
        assert!((intensity_to_brightness(10) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn random_intensity_stays_in_range() {
        let mut rng = XorShift64Star::new(42);
        for _ in 0..500 {
            let v = random_intensity(&mut rng);
            assert!((1..=10).contains(&v));
        }
    }

    #[test]
    fn replicate_pool_produces_unique_ids() {
        let nodes = replicate_pool(&default_pool(), 30);
        assert_eq!(nodes.len(), 30);
        let mut ids: Vec<&str> = nodes.iter().map(|n| n.id.as_str()).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 30);
        assert_eq!(nodes[12].id, "guard-retention-dyn12");
        assert!(replicate_pool(&[], 5).is_empty());
    }

    #[test]
    fn node_position_serializes_camel_case_and_skips_missing_fields() {
        let node = SkillNode::new("a", 5.0);
        let pos = NodePosition::at(&node, 1.0, 2.0, 0.7);
        let v = serde_json::to_value(&pos).expect("serialize");
        assert_eq!(v["id"], "a");
        assert_eq!(v["neighbors"], serde_json::json!([]));
        assert!(v.get("color").is_none());
        assert!(v.get("size").is_none());
    }
}

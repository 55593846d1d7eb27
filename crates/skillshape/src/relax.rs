//! Fruchterman-Reingold style relaxation with per-body region containment.

use crate::config::LayoutConfig;
use crate::geom::{Point, Region};
use rand::RngCore;

#[derive(Debug, Clone, PartialEq)]
pub struct RelaxOptions {
    pub iterations: usize,
    /// Ideal distance is `sqrt(width * height / n) * ideal_distance_factor`.
    pub ideal_distance_factor: f64,
    pub repulsion_damping: f64,
    pub attraction_damping: f64,
    /// Added to every distance before dividing by it.
    pub distance_epsilon: f64,
    /// Fresh draws allowed when an escaped body must be re-placed.
    pub resample_attempts: usize,
}

impl Default for RelaxOptions {
    fn default() -> Self {
        Self {
            iterations: 100,
            ideal_distance_factor: 0.6,
            repulsion_damping: 0.002,
            attraction_damping: 0.0015,
            distance_epsilon: 0.01,
            resample_attempts: 100,
        }
    }
}

impl RelaxOptions {
    /// Defaults overridden by `relax.*` knobs.
    pub fn from_config(cfg: &LayoutConfig) -> Self {
        let d = Self::default();
        Self {
            iterations: cfg.get_usize("relax.iterations").unwrap_or(d.iterations),
            ideal_distance_factor: cfg
                .get_f64("relax.idealDistanceFactor")
                .filter(|v| *v > 0.0)
                .unwrap_or(d.ideal_distance_factor),
            repulsion_damping: cfg
                .get_f64("relax.repulsionDamping")
                .unwrap_or(d.repulsion_damping),
            attraction_damping: cfg
                .get_f64("relax.attractionDamping")
                .unwrap_or(d.attraction_damping),
            distance_epsilon: d.distance_epsilon,
            resample_attempts: cfg
                .get_usize("sampling.maxAttempts")
                .unwrap_or(d.resample_attempts),
        }
    }
}

/// A node being simulated. `region` indexes the region slice passed to [`relax`].
#[derive(Debug, Clone, PartialEq)]
pub struct Body {
    pub pos: Point,
    pub region: usize,
    pub neighbors: Vec<usize>,
    pub intensity: Option<u8>,
}

impl Body {
    /// Attraction multiplier term: intensity/10, with the top level boosted to 2.
    fn weight(&self) -> f64 {
        match self.intensity {
            Some(10) => 2.0,
            Some(i) => i as f64 / 10.0,
            None => 0.0,
        }
    }
}

/// Runs a fixed number of iterations. Each iteration applies same-region repulsion to all bodies,
/// then attraction along every directed neighbor edge, then pulls each body back into its region.
/// A body that cannot be re-placed keeps its last valid position.
pub fn relax(
    bodies: &mut [Body],
    regions: &[Region],
    width: f64,
    height: f64,
    opts: &RelaxOptions,
    rng: &mut dyn RngCore,
) {
    let n = bodies.len();
    if n < 2 || opts.iterations == 0 {
        return;
    }
    let k = (width * height / n as f64).sqrt() * opts.ideal_distance_factor;
    if !(k.is_finite() && k > 0.0) {
        tracing::warn!(width, height, "relaxation skipped: degenerate ideal distance");
        return;
    }
    tracing::debug!(bodies = n, iterations = opts.iterations, k, "relaxing");

    let eps = opts.distance_epsilon;
    let mut last_valid: Vec<Point> = bodies.iter().map(|b| b.pos).collect();
    let mut disp = vec![(0.0f64, 0.0f64); n];

    for _ in 0..opts.iterations {
        for d in disp.iter_mut() {
            *d = (0.0, 0.0);
        }
        for i in 0..n {
            for j in (i + 1)..n {
                if bodies[i].region != bodies[j].region {
                    continue;
                }
                let vx = bodies[i].pos.x - bodies[j].pos.x;
                let vy = bodies[i].pos.y - bodies[j].pos.y;
                let dist = vx.hypot(vy) + eps;
                let rep = k * k / dist;
                let (fx, fy) = (vx / dist * rep, vy / dist * rep);
                disp[i].0 += fx;
                disp[i].1 += fy;
                disp[j].0 -= fx;
                disp[j].1 -= fy;
            }
        }
        for (body, (dx, dy)) in bodies.iter_mut().zip(&disp) {
            body.pos.x += dx * opts.repulsion_damping;
            body.pos.y += dy * opts.repulsion_damping;
        }

        for d in disp.iter_mut() {
            *d = (0.0, 0.0);
        }
        for (i, body) in bodies.iter().enumerate() {
            let boost = 1.0 + 0.5 * body.weight();
            for &j in &body.neighbors {
                let Some(other) = bodies.get(j) else {
                    continue;
                };
                let vx = other.pos.x - body.pos.x;
                let vy = other.pos.y - body.pos.y;
                let dist = vx.hypot(vy) + eps;
                let attr = dist * dist / k * boost;
                disp[i].0 += vx / dist * attr;
                disp[i].1 += vy / dist * attr;
            }
        }
        for (i, body) in bodies.iter_mut().enumerate() {
            body.pos.x += disp[i].0 * opts.attraction_damping;
            body.pos.y += disp[i].1 * opts.attraction_damping;

            let recovered = regions
                .get(body.region)
                .and_then(|region| region.recover(body.pos, opts.resample_attempts, rng));
            match recovered {
                Some(p) => {
                    body.pos = p;
                    last_valid[i] = p;
                }
                None => body.pos = last_valid[i],
            }
        }
    }
}

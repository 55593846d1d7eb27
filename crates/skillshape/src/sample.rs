//! Rejection sampling of points inside regions.

use crate::geom::{Composite, Point, Region};
use rand::RngCore;

/// How many candidate draws a sampling call may spend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttemptCeiling {
    /// Up to `n` draws per requested point; a point whose draws run out is skipped.
    PerPoint(usize),
    /// Up to `n` draws for the whole call; sampling stops early when they run out.
    Total(usize),
}

impl Default for AttemptCeiling {
    fn default() -> Self {
        AttemptCeiling::PerPoint(100)
    }
}

/// Draws up to `count` points inside `region`.
pub fn sample_region(
    region: &Region,
    count: usize,
    ceiling: AttemptCeiling,
    rng: &mut dyn RngCore,
) -> Vec<Point> {
    let mut out = Vec::with_capacity(count);
    if count == 0 {
        return out;
    }
    match ceiling {
        AttemptCeiling::PerPoint(max_attempts) => {
            for _ in 0..count {
                let hit = (0..max_attempts)
                    .filter_map(|_| region.candidate(rng))
                    .find(|p| region.contains(*p));
                if let Some(p) = hit {
                    out.push(p);
                }
            }
        }
        AttemptCeiling::Total(max_attempts) => {
            let mut attempts = 0;
            while out.len() < count && attempts < max_attempts {
                attempts += 1;
                if let Some(p) = region.candidate(rng).filter(|p| region.contains(*p)) {
                    out.push(p);
                }
            }
        }
    }
    if out.len() < count {
        tracing::warn!(
            requested = count,
            placed = out.len(),
            ?ceiling,
            "sampling exhausted its attempt ceiling"
        );
    }
    out
}

/// Integer budgets for fractional `shares` of `count`.
///
/// Every part but `remainder` gets `round(share * count)`; `remainder` gets what is left. When
/// rounding over-allocates, the excess is taken back from the other parts in reverse order.
pub fn split_budget(shares: &[f64], count: usize, remainder: usize) -> Vec<usize> {
    let mut budgets: Vec<usize> = shares
        .iter()
        .enumerate()
        .map(|(i, share)| {
            if i == remainder {
                0
            } else {
                (share.max(0.0) * count as f64).round() as usize
            }
        })
        .collect();
    let assigned: usize = budgets.iter().sum();
    if remainder < budgets.len() {
        budgets[remainder] = count.saturating_sub(assigned);
    }
    let mut excess = assigned.saturating_sub(count);
    for b in budgets.iter_mut().rev() {
        if excess == 0 {
            break;
        }
        let take = excess.min(*b);
        *b -= take;
        excess -= take;
    }
    budgets
}

/// Samples every part of `composite` with its budget. Returns `(part index, point)` pairs in
/// part order.
pub fn sample_composite(
    composite: &Composite,
    count: usize,
    ceiling: AttemptCeiling,
    rng: &mut dyn RngCore,
) -> Vec<(usize, Point)> {
    let budgets = split_budget(&composite.shares(), count, composite.remainder);
    let mut out = Vec::with_capacity(count);
    for (i, (part, budget)) in composite.parts.iter().zip(budgets).enumerate() {
        tracing::debug!(part = part.name, budget, "sampling composite part");
        out.extend(
            sample_region(&part.region, budget, ceiling, rng)
                .into_iter()
                .map(|p| (i, p)),
        );
    }
    out
}

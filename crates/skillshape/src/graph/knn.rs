use super::Adjacency;
use crate::geom::Point;

/// k nearest neighbors of every point among points sharing its tag, self excluded.
///
/// Lists are directional: `j` in `i`'s list does not imply `i` in `j`'s. Ties keep earlier
/// input first.
pub fn per_region(points: &[Point], tags: &[usize], k: usize) -> Adjacency {
    points
        .iter()
        .enumerate()
        .map(|(i, &p)| {
            let tag = tags.get(i).copied();
            let mut others: Vec<(f64, usize)> = points
                .iter()
                .enumerate()
                .filter(|&(j, _)| j != i && tags.get(j).copied() == tag)
                .map(|(j, &q)| (p.distance(q), j))
                .collect();
            // Stable sort: equal distances stay in input order.
            others.sort_by(|a, b| a.0.total_cmp(&b.0));
            others.into_iter().take(k).map(|(_, j)| j).collect()
        })
        .collect()
}

/// [`per_region`] with every point in one region.
pub fn nearest(points: &[Point], k: usize) -> Adjacency {
    per_region(points, &vec![0; points.len()], k)
}

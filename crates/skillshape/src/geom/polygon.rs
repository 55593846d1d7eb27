use super::{Bounds, Point};
use crate::error::{Error, Result};
use serde::Deserialize;

/// Simple polygon with even-odd membership.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    vertices: Vec<Point>,
}

#[derive(Debug, Deserialize)]
struct NormalizedPoint {
    x: f64,
    y: f64,
}

impl Polygon {
    pub fn new(vertices: Vec<Point>) -> Self {
        Self { vertices }
    }

    /// Scales normalized `[0, 1]` coordinates into a `width x height` area.
    pub fn from_normalized(coords: &[(f64, f64)], width: f64, height: f64) -> Self {
        Self::new(
            coords
                .iter()
                .map(|&(x, y)| Point::new(x * width, y * height))
                .collect(),
        )
    }

    /// Parses the freehand drawing export: a JSON array of `{ "x": .., "y": .. }` in `[0, 1]`.
    pub fn from_normalized_json(json: &str, width: f64, height: f64) -> Result<Self> {
        let points: Vec<NormalizedPoint> =
            serde_json::from_str(json).map_err(|e| Error::InvalidOutline {
                message: e.to_string(),
            })?;
        Self::from_normalized_points(&points, width, height)
    }

    pub fn from_normalized_value(value: &serde_json::Value, width: f64, height: f64) -> Result<Self> {
        let points: Vec<NormalizedPoint> =
            serde_json::from_value(value.clone()).map_err(|e| Error::InvalidOutline {
                message: e.to_string(),
            })?;
        Self::from_normalized_points(&points, width, height)
    }

    fn from_normalized_points(points: &[NormalizedPoint], width: f64, height: f64) -> Result<Self> {
        if points.len() < 3 {
            return Err(Error::InvalidOutline {
                message: format!("need at least 3 points, got {}", points.len()),
            });
        }
        if let Some((i, p)) = points
            .iter()
            .enumerate()
            .find(|(_, p)| !(0.0..=1.0).contains(&p.x) || !(0.0..=1.0).contains(&p.y))
        {
            return Err(Error::InvalidOutline {
                message: format!("point {i} ({}, {}) is outside [0, 1]", p.x, p.y),
            });
        }
        let coords: Vec<(f64, f64)> = points.iter().map(|p| (p.x, p.y)).collect();
        Ok(Self::from_normalized(&coords, width, height))
    }

    pub fn vertices(&self) -> &[Point] {
        &self.vertices
    }

    pub fn bounds(&self) -> Option<Bounds> {
        Bounds::of_points(&self.vertices)
    }

    /// Ray casting: toggles on every edge with one endpoint strictly above `p.y` and the other
    /// at or below it, when `p` lies left of the crossing.
    pub fn contains(&self, p: Point) -> bool {
        let n = self.vertices.len();
        if n < 3 {
            return false;
        }
        let mut inside = false;
        let mut j = n - 1;
        for i in 0..n {
            let vi = self.vertices[i];
            let vj = self.vertices[j];
            if (vi.y > p.y) != (vj.y > p.y)
                && p.x < (vj.x - vi.x) * (p.y - vi.y) / (vj.y - vi.y + 1e-8) + vi.x
            {
                inside = !inside;
            }
            j = i;
        }
        inside
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square() -> Polygon {
        Polygon::from_normalized(&[(0.0, 0.0), (1.0, 0.0), (1.0, 1.0), (0.0, 1.0)], 1.0, 1.0)
    }

    #[test]
    fn unit_square_membership() {
        let sq = unit_square();
        assert!(sq.contains(Point::new(0.5, 0.5)));
        assert!(!sq.contains(Point::new(1.5, 0.5)));
        assert!(!sq.contains(Point::new(0.5, -0.1)));
    }

    #[test]
    fn unit_square_vertices_answer_consistently() {
        let sq = unit_square();
        let answers: Vec<bool> = sq
            .vertices()
            .iter()
            .map(|&v| {
                let first = sq.contains(v);
                assert_eq!(first, sq.contains(v), "unstable answer at {v:?}");
                first
            })
            .collect();
        // Only the lower-left corner lies left of a crossing edge on its own row.
        assert_eq!(answers, vec![true, false, false, false]);
    }

    #[test]
    fn concave_polygon_excludes_the_notch() {
        // U shape opening upward.
        let u = Polygon::new(vec![
            Point::new(0.0, 0.0),
            Point::new(1.0, 0.0),
            Point::new(1.0, 3.0),
            Point::new(2.0, 3.0),
            Point::new(2.0, 0.0),
            Point::new(3.0, 0.0),
            Point::new(3.0, 4.0),
            Point::new(0.0, 4.0),
        ]);
        assert!(u.contains(Point::new(0.5, 2.0)));
        assert!(u.contains(Point::new(2.5, 2.0)));
        assert!(!u.contains(Point::new(1.5, 1.0)));
        assert!(u.contains(Point::new(1.5, 3.5)));
    }

    #[test]
    fn degenerate_polygons_contain_nothing() {
        let line = Polygon::new(vec![Point::new(0.0, 0.0), Point::new(1.0, 1.0)]);
        assert!(!line.contains(Point::new(0.5, 0.5)));
    }

    #[test]
    fn normalized_json_scales_into_the_area() {
        let json = r#"[{"x":0,"y":0},{"x":1,"y":0},{"x":1,"y":1},{"x":0,"y":1}]"#;
        let poly = Polygon::from_normalized_json(json, 200.0, 100.0).expect("parse");
        assert_eq!(poly.vertices()[2], Point::new(200.0, 100.0));
        assert!(poly.contains(Point::new(150.0, 50.0)));
    }

    #[test]
    fn normalized_json_rejects_bad_input() {
        assert!(matches!(
            Polygon::from_normalized_json("not json", 1.0, 1.0),
            Err(Error::InvalidOutline { .. })
        ));
        assert!(matches!(
            Polygon::from_normalized_json(r#"[{"x":0,"y":0},{"x":1,"y":0}]"#, 1.0, 1.0),
            Err(Error::InvalidOutline { .. })
        ));
        assert!(matches!(
            Polygon::from_normalized_json(
                r#"[{"x":0,"y":0},{"x":1.5,"y":0},{"x":1,"y":1}]"#,
                1.0,
                1.0
            ),
            Err(Error::InvalidOutline { .. })
        ));
    }
}

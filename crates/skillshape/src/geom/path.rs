use super::{Bounds, Point};
use crate::error::{Error, Result};
use svgtypes::{SimplePathSegment, SimplifyingPathParser};
use tiny_skia::{FillRule, Mask, PathBuilder, Transform};

/// Region backed by a rasterized SVG path. Membership is pixel coverage of the filled mask.
pub struct PathRegion {
    mask: Mask,
    bounds: Option<Bounds>,
    outline: Vec<Point>,
}

impl std::fmt::Debug for PathRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PathRegion")
            .field("width", &self.mask.width())
            .field("height", &self.mask.height())
            .field("bounds", &self.bounds)
            .finish()
    }
}

impl PathRegion {
    /// Fills `data` (authored in a `view_width x view_height` box) into a `width x height` mask,
    /// scaled uniformly to fit and centered.
    pub fn from_svg(
        data: &str,
        view_width: f64,
        view_height: f64,
        width: f64,
        height: f64,
    ) -> Result<Self> {
        let mut pb = PathBuilder::new();
        let mut outline_src = Vec::new();
        let mut hull_src = Vec::new();
        for segment in SimplifyingPathParser::from(data) {
            let segment = segment.map_err(|e| Error::InvalidPath {
                message: e.to_string(),
            })?;
            match segment {
                SimplePathSegment::MoveTo { x, y } => {
                    pb.move_to(x as f32, y as f32);
                    outline_src.push(Point::new(x, y));
                    hull_src.push(Point::new(x, y));
                }
                SimplePathSegment::LineTo { x, y } => {
                    pb.line_to(x as f32, y as f32);
                    outline_src.push(Point::new(x, y));
                    hull_src.push(Point::new(x, y));
                }
                SimplePathSegment::Quadratic { x1, y1, x, y } => {
                    pb.quad_to(x1 as f32, y1 as f32, x as f32, y as f32);
                    outline_src.push(Point::new(x, y));
                    hull_src.extend([Point::new(x1, y1), Point::new(x, y)]);
                }
                SimplePathSegment::CurveTo {
                    x1,
                    y1,
                    x2,
                    y2,
                    x,
                    y,
                } => {
                    pb.cubic_to(
                        x1 as f32, y1 as f32, x2 as f32, y2 as f32, x as f32, y as f32,
                    );
                    outline_src.push(Point::new(x, y));
                    hull_src.extend([Point::new(x1, y1), Point::new(x2, y2), Point::new(x, y)]);
                }
                SimplePathSegment::ClosePath => pb.close(),
            }
        }
        let path = pb.finish().ok_or_else(|| Error::InvalidPath {
            message: "path has no drawable segments".to_string(),
        })?;

        let scale = (width / view_width).min(height / view_height);
        if !(scale.is_finite() && scale > 0.0) {
            return Err(Error::InvalidDimensions { width, height });
        }
        let tx = (width - view_width * scale) / 2.0;
        let ty = (height - view_height * scale) / 2.0;
        let place = |p: &Point| Point::new(p.x * scale + tx, p.y * scale + ty);

        let width_px = width.ceil().max(1.0) as u32;
        let height_px = height.ceil().max(1.0) as u32;
        let mut mask = Mask::new(width_px, height_px).ok_or(Error::InvalidDimensions { width, height })?;
        mask.fill_path(
            &path,
            FillRule::Winding,
            false,
            Transform::from_row(scale as f32, 0.0, 0.0, scale as f32, tx as f32, ty as f32),
        );

        // Control points bound each curve, so their box encloses the filled area.
        let hull: Vec<Point> = hull_src.iter().map(place).collect();
        let bounds = Bounds::of_points(&hull).map(|b| Bounds {
            min_x: b.min_x.max(0.0),
            min_y: b.min_y.max(0.0),
            max_x: b.max_x.min(width),
            max_y: b.max_y.min(height),
        });

        Ok(Self {
            mask,
            bounds,
            outline: outline_src.iter().map(place).collect(),
        })
    }

    pub fn contains(&self, x: f64, y: f64) -> bool {
        if x < 0.0 || y < 0.0 {
            return false;
        }
        let (px, py) = (x.floor() as usize, y.floor() as usize);
        let w = self.mask.width() as usize;
        if px >= w || py >= self.mask.height() as usize {
            return false;
        }
        self.mask.data().get(py * w + px).is_some_and(|&a| a > 0)
    }

    pub fn bounds(&self) -> Option<Bounds> {
        self.bounds
    }

    /// Segment end points in area coordinates.
    pub fn outline(&self) -> &[Point] {
        &self.outline
    }

    /// Share of mask pixels that are covered.
    pub fn coverage(&self) -> f64 {
        let data = self.mask.data();
        if data.is_empty() {
            return 0.0;
        }
        data.iter().filter(|&&a| a > 0).count() as f64 / data.len() as f64
    }
}

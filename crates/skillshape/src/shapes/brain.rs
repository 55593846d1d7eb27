//! Brain silhouettes: analytic lobes, polygon outlines and a rasterized vector outline.

use super::recipe::{Recipe, Shade, Wiring};
use crate::error::Result;
use crate::geom::{
    Composite, Ellipse, HalfPlane, Part, PathRegion, Point, Polygon, Rect, Region, Sector, Triangle,
};
use crate::sample::AttemptCeiling;
use std::f64::consts::PI;
use std::sync::Arc;

const LOBE_COLOR: &str = "#3bb0e0";
const LOBE_SIZE: f64 = 8.0;

/// Safe drawing area used by the semicircle and polygon variants.
struct Margins {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
}

impl Margins {
    const TOP: f64 = 80.0;
    const SIDE: f64 = 40.0;
    const BOTTOM: f64 = 40.0;

    fn of(width: f64, height: f64) -> Self {
        Self {
            x: Self::SIDE,
            y: Self::TOP,
            width: width - 2.0 * Self::SIDE,
            height: height - Self::TOP - Self::BOTTOM,
        }
    }
}

/// Two quarter-disk lobes, a horizontal band, a stem and a central oblong.
pub(crate) fn brain(width: f64, height: f64) -> Recipe {
    let left_c = Point::new(width * 0.36, height * 0.36);
    let left_r = width * 0.25;
    let right_c = Point::new(width * 0.64, height * 0.36);
    let right_r = width * 0.25 * 1.2;

    let left = Sector {
        center: left_c,
        radius: left_r,
        angle_start: PI / 2.0,
        angle_end: PI,
        clips: vec![
            HalfPlane::x_at_most(left_c.x + left_r * 0.25),
            HalfPlane::y_at_most(left_c.y + left_r * 0.9),
        ],
    };
    let right = Sector {
        center: right_c,
        radius: right_r,
        angle_start: PI / 2.0,
        angle_end: PI,
        clips: vec![
            HalfPlane::x_at_least(right_c.x - right_r * 0.25),
            HalfPlane::y_at_most(right_c.y + right_r * 0.9),
        ],
    };
    let band = Rect {
        left: width * 0.28,
        top: height * 0.41,
        right: width * 0.72,
        bottom: height * 0.58,
    };
    let stem = Triangle {
        a: Point::new(width * 0.52, height * 0.58),
        b: Point::new(width * 0.60, height * 0.58),
        c: Point::new(width * 0.56, height * 0.88),
    };
    let oblong = Ellipse::new(
        Point::new(width * 0.5, height * 0.48),
        width * 0.13,
        height * 0.09,
    );

    Recipe::new(Composite::new(
        vec![
            Part {
                name: "left",
                region: Region::Sector(left),
                share: 0.22,
            },
            Part {
                name: "right",
                region: Region::Sector(right),
                share: 0.25,
            },
            Part {
                name: "band",
                region: Region::Rect(band),
                share: 0.18,
            },
            Part {
                name: "stem",
                region: Region::Triangle(stem),
                share: 0.15,
            },
            Part {
                name: "oblong",
                region: Region::Ellipse(oblong),
                share: 0.20,
            },
        ],
        4,
    ))
    .relaxed()
    .shade(Shade::Intensity)
    .styled(LOBE_COLOR, LOBE_SIZE)
}

/// Upper half-ellipse with a stem triangle below it.
pub(crate) fn brain2(width: f64, height: f64) -> Recipe {
    let center = Point::new(width * 0.5, height * 0.38);
    let oblong = Ellipse::new(center, width * 0.32, height * 0.22)
        .clipped(HalfPlane::y_at_most(center.y));
    let stem = Triangle {
        a: Point::new(width * 0.62, height * 0.60),
        b: Point::new(width * 0.72, height * 0.88),
        c: Point::new(width * 0.52, height * 0.88),
    };
    Recipe::new(Composite::new(
        vec![
            Part {
                name: "oblong",
                region: Region::Ellipse(oblong),
                share: 0.8,
            },
            Part {
                name: "stem",
                region: Region::Triangle(stem),
                share: 0.2,
            },
        ],
        1,
    ))
    .wiring(Wiring::KnnAll)
}

/// Semicircle sized to the safe area, with a right-angled stem triangle hanging off its right end.
pub(crate) fn brain3(width: f64, height: f64) -> Recipe {
    let m = Margins::of(width, height);
    let r = 0.48 * m.width.min(m.height * 0.7);
    let center = Point::new(m.x + m.width / 2.0, m.y + r);
    let semicircle = Ellipse::circle(center, r).clipped(HalfPlane::y_at_most(center.y));
    let stem = Triangle {
        a: Point::new(center.x + r, center.y),
        b: Point::new(m.x + m.width * 0.92, m.y + m.height * 0.98),
        c: Point::new(center.x + r * 0.55, center.y + r * 0.65),
    };
    Recipe::new(Composite::new(
        vec![
            Part {
                name: "semicircle",
                region: Region::Ellipse(semicircle),
                share: 0.8,
            },
            Part {
                name: "triangle",
                region: Region::Triangle(stem),
                share: 0.2,
            },
        ],
        1,
    ))
    .wiring(Wiring::KnnAll)
}

const BRAIN4_OUTLINE: [(f64, f64); 15] = [
    (0.22, 0.28),
    (0.36, 0.13),
    (0.50, 0.08),
    (0.64, 0.13),
    (0.78, 0.28),
    (0.82, 0.70),
    (0.92, 0.70),
    (0.92, 0.90),
    (0.82, 0.90),
    (0.68, 0.70),
    (0.54, 0.70),
    // The stem runs past the bottom margin.
    (0.54, 1.08),
    (0.46, 1.08),
    (0.46, 0.70),
    (0.32, 0.70),
];

/// Lobes, cerebellum block and a long stem as one polygon inside the safe area.
pub(crate) fn brain4_polygon(width: f64, height: f64) -> Recipe {
    let m = Margins::of(width, height);
    let vertices = BRAIN4_OUTLINE
        .iter()
        .map(|&(nx, ny)| Point::new(m.x + nx * m.width, m.y + ny * m.height))
        .collect();
    Recipe::single("polygon", Region::Polygon(Polygon::new(vertices)))
        .ceiling(AttemptCeiling::Total(20_000))
        .wiring(Wiring::KnnAll)
}

/// Side-view brain outline, authored in a 931.843 unit square.
const BRAIN_SVG2_PATH: &str = "M926.932,305.137 c12.301,-38.3,1.4,-86.6,-32,-124 \
    c-14.5,-16.2,-31.4,-28.5,-49.199,-36.5 c-5.1,-8.4,-11.201,-16.6,-18.1,-24.4 \
    c-29.9,-33.5,-69.4,-51.5,-105.701,-51.7 c-25.4,-19.5,-59.699,-34.3,-98.699,-40.4 \
    c-30.7,-4.8,-60.3,-3.6,-86.2,2.4 c-22.5,-9.8,-49,-13.8,-76.8,-10.3 \
    c-28.899,3.7,-54.5,14.9,-74.1,31 c-31,-14,-70.9,-14.8,-108.9,0.9 \
    c-32.7,13.5,-57.8,36.5,-72,63 c-25.4,5.6,-51.1,19.1,-73,40.1 \
    c-31.1,29.8,-47.5,68,-47.4,102.8 c-37.8,21,-61.8,57.1,-60.1,95.6 \
    c-10.1,15.4,-17.7,33.5,-21.7,53.4 c-6.9,34.5,-1.7,67.899,12.3,94.3 \
    c-1,58.3,31.7,108.6,80.9,118.4 c3.2,0.6,6.4,1.1,9.6,1.399 \
    c-1.7,12.101,-1.5,24.4,1,36.7 c14.1,71.1,95.7,114.8,182.3,97.6 \
    c3.899,-0.8,7.8,-1.699,11.6,-2.699 l0,0 c12.9,20.699,39.7,11.8,39.7,11.8 v76.6 \
    c0,8.2,3.1,16,8.8,22 l42.4,44.7 c9.899,10.5,27.5,3.4,27.5,-11 v-86.6 \
    c2.6,-78.101,31.3,-116.7,55.8,-131.4 c33,-19.9,32.5,-61.3,32.3,-76.4 \
    c26,13.7,67.101,21.5,101.5,17.601 c155.199,-17.9,163.299,-122.3,168.4,-139.4 \
    c45.299,3.4,86.898,-15.8,104.898,-52.7 c2.5,-5.199,4.5,-10.6,5.9,-16 \
    c15,-8.899,27.301,-21.6,35.1,-37.6 C933.633,352.737,934.332,328.337,926.932,305.137z";
const BRAIN_SVG2_VIEW: f64 = 931.843;

pub(crate) fn brain_svg2(width: f64, height: f64) -> Result<Recipe> {
    let region = PathRegion::from_svg(BRAIN_SVG2_PATH, BRAIN_SVG2_VIEW, BRAIN_SVG2_VIEW, width, height)?;
    Ok(Recipe::single("outline", Region::Path(Arc::new(region)))
        .ceiling(AttemptCeiling::Total(20_000))
        .wiring(Wiring::KnnAll))
}

/// Two hemispheres seen from above, separated by a fixed gap.
pub(crate) fn top_down_brain(width: f64, height: f64) -> Recipe {
    let gap = width * 0.06;
    let lobe_width = (width - gap) / 2.0 * 0.96;
    let lobe_height = height * 0.92;
    let mid = width / 2.0;
    let cy = height / 2.0;
    let left = Ellipse::new(
        Point::new(mid - gap / 2.0 - lobe_width / 2.0, cy),
        lobe_width / 2.0,
        lobe_height / 2.0,
    )
    .clipped(HalfPlane::x_at_most(mid - gap / 2.0));
    let right = Ellipse::new(
        Point::new(mid + gap / 2.0 + lobe_width / 2.0, cy),
        lobe_width / 2.0,
        lobe_height / 2.0,
    )
    .clipped(HalfPlane::x_at_least(mid + gap / 2.0));
    Recipe::new(Composite::new(
        vec![
            Part {
                name: "left",
                region: Region::Ellipse(left),
                share: 0.5,
            },
            Part {
                name: "right",
                region: Region::Ellipse(right),
                share: 0.5,
            },
        ],
        0,
    ))
    .relaxed()
    .shade(Shade::Intensity)
    .styled(LOBE_COLOR, LOBE_SIZE)
}

const TOP_DOWN_BRAIN2_OUTLINE: &str = include_str!("../../data/top_down_brain2.json");

/// Freehand top-down outline. Nodes are scattered without connections.
pub(crate) fn top_down_brain2(width: f64, height: f64) -> Result<Recipe> {
    let polygon = Polygon::from_normalized_json(TOP_DOWN_BRAIN2_OUTLINE, width, height)?;
    Ok(Recipe::single("outline", Region::Polygon(polygon))
        .ceiling(AttemptCeiling::Total(20_000))
        .wiring(Wiring::None)
        .styled(LOBE_COLOR, LOBE_SIZE))
}

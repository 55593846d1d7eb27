//! Closed 2D regions: membership tests, candidate draws, and boundary polylines.
//!
//! Every constructor is a pure function of its inputs; shapes rebuild their regions from
//! `(width, height)` on each layout call.

use crate::rng;
use rand::RngCore;
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use std::sync::Arc;

mod path;
mod polygon;

pub use path::PathRegion;
pub use polygon::Polygon;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bounds {
    pub fn of_points(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        let mut b = Bounds {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        for p in &points[1..] {
            b.min_x = b.min_x.min(p.x);
            b.min_y = b.min_y.min(p.y);
            b.max_x = b.max_x.max(p.x);
            b.max_y = b.max_y.max(p.y);
        }
        Some(b)
    }

    fn draw(&self, rng: &mut dyn RngCore) -> Point {
        Point::new(
            rng::range(rng, self.min_x, self.max_x),
            rng::range(rng, self.min_y, self.max_y),
        )
    }
}

/// The half-plane `a*x + b*y <= c`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HalfPlane {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl HalfPlane {
    pub const fn x_at_most(x: f64) -> Self {
        Self { a: 1.0, b: 0.0, c: x }
    }

    pub const fn x_at_least(x: f64) -> Self {
        Self {
            a: -1.0,
            b: 0.0,
            c: -x,
        }
    }

    pub const fn y_at_most(y: f64) -> Self {
        Self { a: 0.0, b: 1.0, c: y }
    }

    pub const fn y_at_least(y: f64) -> Self {
        Self {
            a: 0.0,
            b: -1.0,
            c: -y,
        }
    }

    pub fn holds(&self, p: Point) -> bool {
        self.a * p.x + self.b * p.y <= self.c
    }
}

fn clips_hold(clips: &[HalfPlane], p: Point) -> bool {
    clips.iter().all(|h| h.holds(p))
}

/// Ellipse (a circle when `rx == ry`), optionally cut by half-planes.
#[derive(Debug, Clone, PartialEq)]
pub struct Ellipse {
    pub center: Point,
    pub rx: f64,
    pub ry: f64,
    pub clips: Vec<HalfPlane>,
}

impl Ellipse {
    pub fn new(center: Point, rx: f64, ry: f64) -> Self {
        Self {
            center,
            rx,
            ry,
            clips: Vec::new(),
        }
    }

    pub fn circle(center: Point, r: f64) -> Self {
        Self::new(center, r, r)
    }

    pub fn clipped(mut self, clip: HalfPlane) -> Self {
        self.clips.push(clip);
        self
    }

    fn norm_sq(&self, p: Point) -> f64 {
        let dx = (p.x - self.center.x) / self.rx;
        let dy = (p.y - self.center.y) / self.ry;
        dx * dx + dy * dy
    }

    pub fn contains(&self, p: Point) -> bool {
        self.rx > 0.0 && self.ry > 0.0 && self.norm_sq(p) <= 1.0 && clips_hold(&self.clips, p)
    }

    fn candidate(&self, rng: &mut dyn RngCore) -> Point {
        let t = 2.0 * PI * rng::unit(rng);
        let r = rng::unit(rng).sqrt();
        Point::new(
            self.center.x + r * self.rx * t.cos(),
            self.center.y + r * self.ry * t.sin(),
        )
    }

    /// Pulls an outside point back onto the boundary along its angle from the center.
    fn project(&self, p: Point) -> Point {
        if self.norm_sq(p) <= 1.0 {
            return p;
        }
        let angle = (p.y - self.center.y).atan2(p.x - self.center.x);
        // Slightly inside so the projected point passes the `<= 1` test despite rounding.
        let shrink = 1.0 - 1e-9;
        Point::new(
            self.center.x + self.rx * shrink * angle.cos(),
            self.center.y + self.ry * shrink * angle.sin(),
        )
    }
}

/// Disk wedge between two `atan2` angles, optionally cut by half-planes.
#[derive(Debug, Clone, PartialEq)]
pub struct Sector {
    pub center: Point,
    pub radius: f64,
    pub angle_start: f64,
    pub angle_end: f64,
    pub clips: Vec<HalfPlane>,
}

impl Sector {
    pub fn contains(&self, p: Point) -> bool {
        let dx = p.x - self.center.x;
        let dy = p.y - self.center.y;
        let angle = dy.atan2(dx);
        dx * dx + dy * dy <= self.radius * self.radius
            && angle >= self.angle_start
            && angle <= self.angle_end
            && clips_hold(&self.clips, p)
    }

    fn candidate(&self, rng: &mut dyn RngCore) -> Point {
        let r = self.radius * rng::unit(rng).sqrt();
        let a = rng::range(rng, self.angle_start, self.angle_end);
        Point::new(self.center.x + r * a.cos(), self.center.y + r * a.sin())
    }
}

/// Axis-aligned rectangle ("band").
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub right: f64,
    pub bottom: f64,
}

impl Rect {
    pub fn contains(&self, p: Point) -> bool {
        p.y >= self.top && p.y <= self.bottom && p.x >= self.left && p.x <= self.right
    }

    fn bounds(&self) -> Bounds {
        Bounds {
            min_x: self.left,
            min_y: self.top,
            max_x: self.right,
            max_y: self.bottom,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Triangle {
    pub a: Point,
    pub b: Point,
    pub c: Point,
}

impl Triangle {
    pub fn contains(&self, p: Point) -> bool {
        let Triangle { a, b, c } = *self;
        let area = (a.x * (b.y - c.y) + b.x * (c.y - a.y) + c.x * (a.y - b.y)) / 2.0;
        if area.abs() < f64::EPSILON {
            return false;
        }
        let s = (a.x * (b.y - p.y) + b.x * (p.y - a.y) + p.x * (a.y - b.y)) / (2.0 * area);
        let t = (a.x * (p.y - c.y) + p.x * (c.y - a.y) + c.x * (a.y - p.y)) / (2.0 * area);
        let u = 1.0 - s - t;
        s >= 0.0 && t >= 0.0 && u >= 0.0
    }

    fn candidate(&self, rng: &mut dyn RngCore) -> Point {
        let mut u = rng::unit(rng);
        let mut v = rng::unit(rng);
        if u + v > 1.0 {
            u = 1.0 - u;
            v = 1.0 - v;
        }
        let Triangle { a, b, c } = *self;
        Point::new(
            a.x + u * (b.x - a.x) + v * (c.x - a.x),
            a.y + u * (b.y - a.y) + v * (c.y - a.y),
        )
    }
}

/// One named part of a [`Composite`], holding `share` of the node budget.
#[derive(Debug, Clone)]
pub struct Part {
    pub name: &'static str,
    pub region: Region,
    pub share: f64,
}

/// Union of disjoint named parts. `remainder` indexes the part that absorbs rounding error.
#[derive(Debug, Clone)]
pub struct Composite {
    pub parts: Vec<Part>,
    pub remainder: usize,
}

impl Composite {
    pub fn new(parts: Vec<Part>, remainder: usize) -> Self {
        Self { parts, remainder }
    }

    pub fn shares(&self) -> Vec<f64> {
        self.parts.iter().map(|p| p.share).collect()
    }

    /// Index of the first part containing `p`.
    pub fn part_of(&self, p: Point) -> Option<usize> {
        self.parts.iter().position(|part| part.region.contains(p))
    }

    pub fn contains(&self, p: Point) -> bool {
        self.part_of(p).is_some()
    }

    fn candidate(&self, rng: &mut dyn RngCore) -> Option<Point> {
        let total: f64 = self.parts.iter().map(|p| p.share.max(0.0)).sum();
        if total <= 0.0 {
            return None;
        }
        let mut pick = rng::unit(rng) * total;
        for part in &self.parts {
            let share = part.share.max(0.0);
            if pick < share {
                return part.region.candidate(rng);
            }
            pick -= share;
        }
        self.parts.last()?.region.candidate(rng)
    }
}

#[derive(Debug, Clone)]
pub enum Region {
    Ellipse(Ellipse),
    Sector(Sector),
    Rect(Rect),
    Triangle(Triangle),
    Polygon(Polygon),
    Composite(Composite),
    Path(Arc<PathRegion>),
}

impl Region {
    pub fn contains(&self, p: Point) -> bool {
        if !(p.x.is_finite() && p.y.is_finite()) {
            return false;
        }
        match self {
            Region::Ellipse(e) => e.contains(p),
            Region::Sector(s) => s.contains(p),
            Region::Rect(r) => r.contains(p),
            Region::Triangle(t) => t.contains(p),
            Region::Polygon(poly) => poly.contains(p),
            Region::Composite(c) => c.contains(p),
            Region::Path(path) => path.contains(p.x, p.y),
        }
    }

    /// One draw from the region's enclosing parameterization. The draw may still fall outside
    /// (clipped ellipses, sector clips, polygon/path bounding boxes); callers test `contains`.
    pub fn candidate(&self, rng: &mut dyn RngCore) -> Option<Point> {
        match self {
            Region::Ellipse(e) => Some(e.candidate(rng)),
            Region::Sector(s) => Some(s.candidate(rng)),
            Region::Rect(r) => Some(r.bounds().draw(rng)),
            Region::Triangle(t) => Some(t.candidate(rng)),
            Region::Polygon(poly) => Some(poly.bounds()?.draw(rng)),
            Region::Composite(c) => c.candidate(rng),
            Region::Path(path) => Some(path.bounds()?.draw(rng)),
        }
    }

    /// Moves an escaped point back inside: ellipses project along the center angle, every other
    /// family re-draws up to `attempts` fresh candidates. `None` if nothing valid was found.
    pub fn recover(&self, p: Point, attempts: usize, rng: &mut dyn RngCore) -> Option<Point> {
        if self.contains(p) {
            return Some(p);
        }
        if let Region::Ellipse(e) = self {
            let projected = e.project(p);
            if self.contains(projected) {
                return Some(projected);
            }
        }
        (0..attempts)
            .filter_map(|_| self.candidate(rng))
            .find(|c| self.contains(*c))
    }

    /// Closed boundary polyline for display. Curved families use `samples` segments.
    pub fn outline(&self, samples: usize) -> Vec<Point> {
        let samples = samples.max(3);
        match self {
            Region::Ellipse(e) => {
                let mut pts: Vec<Point> = (0..=samples)
                    .map(|i| {
                        let t = 2.0 * PI * (i as f64) / (samples as f64);
                        Point::new(
                            e.center.x + e.rx * t.cos(),
                            e.center.y + e.ry * t.sin(),
                        )
                    })
                    .filter(|p| clips_hold(&e.clips, *p))
                    .collect();
                if !e.clips.is_empty() {
                    if let Some(first) = pts.first().copied() {
                        pts.push(first);
                    }
                }
                pts
            }
            Region::Sector(s) => {
                let mut pts = vec![s.center];
                pts.extend((0..=samples).map(|i| {
                    let t =
                        s.angle_start + (s.angle_end - s.angle_start) * (i as f64) / (samples as f64);
                    Point::new(
                        s.center.x + s.radius * t.cos(),
                        s.center.y + s.radius * t.sin(),
                    )
                }));
                pts.push(s.center);
                pts
            }
            Region::Rect(r) => vec![
                Point::new(r.left, r.top),
                Point::new(r.right, r.top),
                Point::new(r.right, r.bottom),
                Point::new(r.left, r.bottom),
                Point::new(r.left, r.top),
            ],
            Region::Triangle(t) => vec![t.a, t.b, t.c, t.a],
            Region::Polygon(poly) => {
                let mut pts = poly.vertices().to_vec();
                if let Some(first) = pts.first().copied() {
                    pts.push(first);
                }
                pts
            }
            Region::Composite(c) => c
                .parts
                .iter()
                .flat_map(|part| part.region.outline(samples))
                .collect(),
            Region::Path(path) => path.outline().to_vec(),
        }
    }
}

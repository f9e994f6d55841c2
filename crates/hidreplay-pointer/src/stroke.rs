//! Stroke data handed to renderers

use serde::{Deserialize, Serialize};

/// Accumulated pointer position relative to the session origin.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0, y: 0 };

    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }

    /// Move by one report's displacement.
    pub fn offset(self, dx: i8, dy: i8) -> Self {
        Self {
            x: self.x.saturating_add(i64::from(dx)),
            y: self.y.saturating_add(i64::from(dy)),
        }
    }
}

impl From<(i64, i64)> for Point {
    fn from((x, y): (i64, i64)) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned extent of a stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bounds {
    pub min: Point,
    pub max: Point,
}

impl Bounds {
    fn include(self, p: Point) -> Self {
        Self {
            min: Point::new(self.min.x.min(p.x), self.min.y.min(p.y)),
            max: Point::new(self.max.x.max(p.x), self.max.y.max(p.y)),
        }
    }

    /// Smallest bounds covering both.
    pub fn union(self, other: Bounds) -> Self {
        self.include(other.min).include(other.max)
    }
}

/// Positions sampled while the primary button was continuously held.
///
/// A stroke may hold a single point; the decoder keeps those.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Stroke {
    points: Vec<Point>,
}

impl Stroke {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, point: Point) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn first(&self) -> Option<Point> {
        self.points.first().copied()
    }

    pub fn last(&self) -> Option<Point> {
        self.points.last().copied()
    }

    /// Last point minus first point.
    pub fn displacement(&self) -> Option<(i64, i64)> {
        let (first, last) = (self.first()?, self.last()?);
        Some((last.x - first.x, last.y - first.y))
    }

    pub fn bounds(&self) -> Option<Bounds> {
        let first = self.first()?;
        let start = Bounds {
            min: first,
            max: first,
        };
        Some(self.points.iter().fold(start, |b, p| b.include(*p)))
    }
}

impl From<Vec<Point>> for Stroke {
    fn from(points: Vec<Point>) -> Self {
        Self { points }
    }
}

impl FromIterator<Point> for Stroke {
    fn from_iter<I: IntoIterator<Item = Point>>(iter: I) -> Self {
        Self {
            points: iter.into_iter().collect(),
        }
    }
}

/// Strokes a renderer should draw: those with at least `min_points` points.
pub fn render_filter(strokes: &[Stroke], min_points: usize) -> Vec<&Stroke> {
    strokes.iter().filter(|s| s.len() >= min_points).collect()
}

/// Extent of all strokes together.
pub fn drawing_bounds(strokes: &[Stroke]) -> Option<Bounds> {
    strokes
        .iter()
        .filter_map(Stroke::bounds)
        .reduce(Bounds::union)
}

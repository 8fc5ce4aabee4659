//! Coordinate assignments.

use nalgebra::{Point2, Vector2};

pub type Point = Point2<f64>;

/// One 2-D point per variable; the variable index is the position in the list.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Layout {
    points: Vec<Point>,
}

impl Layout {
    pub fn new(points: Vec<Point>) -> Self {
        Self { points }
    }

    pub fn from_coords<I>(coords: I) -> Self
    where
        I: IntoIterator<Item = (f64, f64)>,
    {
        Self {
            points: coords.into_iter().map(|(x, y)| Point::new(x, y)).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn point(&self, variable: usize) -> Option<&Point> {
        self.points.get(variable)
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    pub fn into_points(self) -> Vec<Point> {
        self.points
    }

    pub fn iter(&self) -> impl Iterator<Item = (usize, &Point)> + '_ {
        self.points.iter().enumerate()
    }

    pub fn to_coords(&self) -> Vec<(f64, f64)> {
        self.points.iter().map(|p| (p.x, p.y)).collect()
    }

    pub fn is_finite(&self) -> bool {
        self.points.iter().all(|p| p.x.is_finite() && p.y.is_finite())
    }

    /// Euclidean distance between two variables.
    ///
    /// Panics if either index is out of range.
    pub fn distance(&self, a: usize, b: usize) -> f64 {
        nalgebra::distance(&self.points[a], &self.points[b])
    }

    /// The closest pair as `(a, b, distance)` with `a < b`; ties keep the first pair in
    /// row-major order.
    pub fn min_pairwise_distance(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for a in 0..self.points.len() {
            for b in (a + 1)..self.points.len() {
                let d = self.distance(a, b);
                if best.is_none_or(|(_, _, bd)| d < bd) {
                    best = Some((a, b, d));
                }
            }
        }
        best
    }

    /// The farthest pair as `(a, b, distance)` with `a < b`.
    pub fn max_pairwise_distance(&self) -> Option<(usize, usize, f64)> {
        let mut best: Option<(usize, usize, f64)> = None;
        for a in 0..self.points.len() {
            for b in (a + 1)..self.points.len() {
                let d = self.distance(a, b);
                if best.is_none_or(|(_, _, bd)| d > bd) {
                    best = Some((a, b, d));
                }
            }
        }
        best
    }

    pub fn centroid(&self) -> Option<Point> {
        if self.points.is_empty() {
            return None;
        }
        let sum = self
            .points
            .iter()
            .fold(Vector2::zeros(), |acc, p| acc + p.coords);
        Some(Point::from(sum / self.points.len() as f64))
    }

    /// The point farthest from `center` as `(variable, distance)`.
    pub fn max_distance_from(&self, center: &Point) -> Option<(usize, f64)> {
        let mut best: Option<(usize, f64)> = None;
        for (ix, p) in self.points.iter().enumerate() {
            let d = nalgebra::distance(p, center);
            if best.is_none_or(|(_, bd)| d > bd) {
                best = Some((ix, d));
            }
        }
        best
    }

    pub fn translated(&self, offset: &Vector2<f64>) -> Layout {
        Layout {
            points: self.points.iter().map(|p| p + offset).collect(),
        }
    }

    /// Uniform scaling about `center`; pairwise distance order is unchanged.
    pub fn scaled_about(&self, center: &Point, factor: f64) -> Layout {
        Layout {
            points: self
                .points
                .iter()
                .map(|p| center + (p - center) * factor)
                .collect(),
        }
    }
}

impl From<Vec<Point>> for Layout {
    fn from(points: Vec<Point>) -> Self {
        Self::new(points)
    }
}

impl FromIterator<Point> for Layout {
    fn from_iter<T: IntoIterator<Item = Point>>(iter: T) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

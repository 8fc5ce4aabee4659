//! Candidate trap lattices.
//!
//! Sites are enumerated as integer combinations of two basis vectors and ordered by distance from
//! the origin, then by counter-clockwise angle from the positive x axis. Ordering is computed on
//! exact integer norms so equal inputs always give the same sequence; greedy placement breaks
//! ties on site index and depends on this.

use std::cmp::Ordering;
use std::f64::consts::TAU;
use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};
use crate::geometry::Point;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LatticeKind {
    #[default]
    Triangular,
    Square,
}

impl LatticeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LatticeKind::Triangular => "triangular",
            LatticeKind::Square => "square",
        }
    }

    fn site(self, a: i64, b: i64, spacing: f64) -> Point {
        match self {
            LatticeKind::Square => Point::new(a as f64 * spacing, b as f64 * spacing),
            LatticeKind::Triangular => Point::new(
                (a as f64 + b as f64 * 0.5) * spacing,
                b as f64 * (3f64.sqrt() / 2.0) * spacing,
            ),
        }
    }

    /// Squared norm in units of `spacing²`, times 4 for the triangular basis so it stays integral.
    fn norm_key(self, a: i64, b: i64) -> i64 {
        match self {
            LatticeKind::Square => a * a + b * b,
            LatticeKind::Triangular => 4 * (a * a + a * b + b * b),
        }
    }

    /// Largest `norm_key` guaranteed complete when `|a|, |b| <= reach`.
    fn complete_below(self, reach: i64) -> i64 {
        match self {
            LatticeKind::Square => reach * reach,
            // a² + ab + b² >= 3/4 · max(|a|, |b|)²
            LatticeKind::Triangular => 3 * reach * reach,
        }
    }
}

impl FromStr for LatticeKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "triangular" => Ok(LatticeKind::Triangular),
            "square" => Ok(LatticeKind::Square),
            other => Err(Error::config(format!("unknown lattice kind: {other}"))),
        }
    }
}

impl fmt::Display for LatticeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lattice {
    kind: LatticeKind,
    spacing: f64,
    sites: Vec<Point>,
}

impl Lattice {
    pub fn kind(&self) -> LatticeKind {
        self.kind
    }

    /// Nearest-neighbour distance between sites.
    pub fn spacing(&self) -> f64 {
        self.spacing
    }

    pub fn sites(&self) -> &[Point] {
        &self.sites
    }

    pub fn len(&self) -> usize {
        self.sites.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }

    pub fn into_sites(self) -> Vec<Point> {
        self.sites
    }
}

/// Generates the first `count` sites of a `kind` lattice with the given `spacing`.
pub fn generate(kind: LatticeKind, count: usize, spacing: f64) -> Result<Lattice> {
    if count == 0 {
        return Err(Error::config("lattice site count must be positive"));
    }
    if !spacing.is_finite() || spacing <= 0.0 {
        return Err(Error::config(format!(
            "lattice spacing must be finite and positive, got {spacing}"
        )));
    }

    let mut reach: i64 = 1;
    let mut candidates = loop {
        let limit = kind.complete_below(reach);
        let mut found: Vec<(i64, f64, Point)> = Vec::new();
        for a in -reach..=reach {
            for b in -reach..=reach {
                let key = kind.norm_key(a, b);
                if key > limit {
                    continue;
                }
                let p = kind.site(a, b, spacing);
                found.push((key, angle(&p), p));
            }
        }
        if found.len() >= count {
            break found;
        }
        reach *= 2;
    };

    candidates.sort_by(|x, y| match x.0.cmp(&y.0) {
        Ordering::Equal => x.1.total_cmp(&y.1),
        other => other,
    });

    let sites: Vec<Point> = candidates
        .into_iter()
        .take(count)
        .map(|(_, _, p)| p)
        .collect();

    tracing::trace!(kind = %kind, count, spacing, "generated candidate lattice");

    Ok(Lattice {
        kind,
        spacing,
        sites,
    })
}

fn angle(p: &Point) -> f64 {
    if p.x == 0.0 && p.y == 0.0 {
        return 0.0;
    }
    let a = p.y.atan2(p.x);
    if a < 0.0 { a + TAU } else { a }
}

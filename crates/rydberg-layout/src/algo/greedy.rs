//! Greedy lattice placement.
//!
//! Variables are placed one at a time on the free candidate site that best reproduces the
//! calibrated distances to their already-placed neighbours. The result only depends on the
//! graph, the device, the site sequence and the ordering policy.

use std::fmt;
use std::str::FromStr;

use rydberg_graph::WeightedGraph;

use crate::device::Device;
use crate::error::{Error, Result};
use crate::geometry::{Layout, Point};
use crate::observer::{GreedyFrame, LayoutObserver, NoopObserver};

/// Relative slack when comparing against the device limits.
const TOLERANCE: f64 = 1e-9;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlacementOrder {
    /// Variables in index order.
    Index,
    /// Start from the variable with the largest total incident weight, then always take the
    /// unplaced variable most strongly tied to the placed ones. Ties go to the lowest index.
    #[default]
    Connectivity,
}

impl PlacementOrder {
    pub fn as_str(self) -> &'static str {
        match self {
            PlacementOrder::Index => "index",
            PlacementOrder::Connectivity => "connectivity",
        }
    }
}

impl FromStr for PlacementOrder {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "index" => Ok(PlacementOrder::Index),
            "connectivity" => Ok(PlacementOrder::Connectivity),
            other => Err(Error::config(format!("unknown placement order: {other}"))),
        }
    }
}

impl fmt::Display for PlacementOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GreedyOptions {
    pub order: PlacementOrder,
    /// Number of candidate costs reported per frame to an observer.
    pub top_k: usize,
}

impl Default for GreedyOptions {
    fn default() -> Self {
        Self {
            order: PlacementOrder::default(),
            top_k: 5,
        }
    }
}

pub fn place(
    graph: &WeightedGraph,
    device: &Device,
    sites: &[Point],
    opts: &GreedyOptions,
) -> Result<Layout> {
    place_with_observer(graph, device, sites, opts, &mut NoopObserver)
}

pub fn place_with_observer(
    graph: &WeightedGraph,
    device: &Device,
    sites: &[Point],
    opts: &GreedyOptions,
    observer: &mut dyn LayoutObserver,
) -> Result<Layout> {
    let n = graph.node_count();
    if n == 0 {
        return Err(Error::degenerate("cannot place zero variables"));
    }
    if sites.len() < n {
        return Err(Error::config(format!(
            "{} candidate sites cannot host {n} variables",
            sites.len()
        )));
    }
    check_sites(sites, device)?;

    let neighbor_targets = neighbor_targets(graph, device)?;
    let max_radius = device.max_radius();

    let mut assignment: Vec<Option<usize>> = vec![None; n];
    let mut free = vec![true; sites.len()];
    let mut free_count = sites.len();
    // Total weight from each variable to the variables placed so far.
    let mut attachment = vec![0.0; n];

    tracing::debug!(
        variables = n,
        sites = sites.len(),
        order = ?opts.order,
        "greedy placement"
    );

    for step in 0..n {
        let variable = next_variable(graph, &assignment, &attachment, opts.order, step);
        let remaining = n - step;
        let mut discarded: Vec<usize> = Vec::new();

        let (site, cost, candidates) = loop {
            let mut costs: Vec<(usize, f64)> = Vec::with_capacity(free_count);
            for (site_ix, site) in sites.iter().enumerate() {
                if !free[site_ix] {
                    continue;
                }
                costs.push((
                    site_ix,
                    placement_cost(site, &neighbor_targets[variable], &assignment, sites),
                ));
            }

            // Strict `<` over ascending site indices keeps the lowest index on ties.
            let Some(&(best_site, best_cost)) = costs
                .iter()
                .fold(None, |best: Option<&(usize, f64)>, c| match best {
                    Some(b) if b.1 <= c.1 => Some(b),
                    _ => Some(c),
                })
            else {
                return Err(Error::config("ran out of candidate sites"));
            };

            // A site on the boundary circle is already out of reach.
            let radius = sites[best_site].coords.norm();
            if radius < max_radius * (1.0 - TOLERANCE) {
                break (best_site, best_cost, costs);
            }

            if free_count > remaining {
                tracing::trace!(
                    variable,
                    site = best_site,
                    radius,
                    "discarding site beyond max radial distance"
                );
                free[best_site] = false;
                free_count -= 1;
                discarded.push(best_site);
                continue;
            }

            return Err(Error::RadiusExceeded {
                variable,
                site: best_site,
                radius,
                max_radius,
            });
        };

        assignment[variable] = Some(site);
        free[site] = false;
        free_count -= 1;
        for (other, w) in graph.neighbors(variable) {
            attachment[other] += w;
        }

        tracing::trace!(step, variable, site, cost, "placed variable");

        let top = top_candidates(candidates, opts.top_k);
        observer.on_greedy_step(&GreedyFrame {
            step,
            variable,
            site,
            position: sites[site],
            cost,
            candidates: &top,
            discarded: &discarded,
            assignment: &assignment,
        });
    }

    let points = assignment
        .iter()
        .enumerate()
        .map(|(variable, site)| {
            site.map(|s| sites[s]).ok_or_else(|| {
                Error::config(format!("variable {variable} was never placed"))
            })
        })
        .collect::<Result<Vec<Point>>>()?;

    Ok(Layout::new(points))
}

/// Candidate sites must be finite and no closer to each other than the device allows.
fn check_sites(sites: &[Point], device: &Device) -> Result<()> {
    let min_distance = device.min_distance();
    for (a, pa) in sites.iter().enumerate() {
        if !pa.x.is_finite() || !pa.y.is_finite() {
            return Err(Error::config(format!("candidate site {a} is not finite")));
        }
        for (b, pb) in sites.iter().enumerate().skip(a + 1) {
            let d = nalgebra::distance(pa, pb);
            if d < min_distance * (1.0 - TOLERANCE) {
                return Err(Error::config(format!(
                    "candidate sites {a} and {b} are {d} apart, below the minimum distance {min_distance}"
                )));
            }
        }
    }
    Ok(())
}

fn neighbor_targets(graph: &WeightedGraph, device: &Device) -> Result<Vec<Vec<(usize, f64)>>> {
    graph
        .nodes()
        .map(|v| {
            graph
                .neighbors(v)
                .map(|(other, w)| device.target_distance(w).map(|t| (other, t)))
                .collect::<Result<Vec<_>>>()
        })
        .collect()
}

fn next_variable(
    graph: &WeightedGraph,
    assignment: &[Option<usize>],
    attachment: &[f64],
    order: PlacementOrder,
    step: usize,
) -> usize {
    let unplaced = assignment
        .iter()
        .enumerate()
        .filter(|(_, site)| site.is_none())
        .map(|(v, _)| v);

    let score = |v: usize| match order {
        PlacementOrder::Index => 0.0,
        PlacementOrder::Connectivity if step == 0 => graph.incident_weight(v),
        PlacementOrder::Connectivity => attachment[v],
    };

    let mut best: Option<(usize, f64)> = None;
    for v in unplaced {
        let s = score(v);
        if best.is_none_or(|(_, bs)| s > bs) {
            best = Some((v, s));
        }
    }
    best.map(|(v, _)| v).unwrap_or(0)
}

fn placement_cost(
    site: &Point,
    targets: &[(usize, f64)],
    assignment: &[Option<usize>],
    sites: &[Point],
) -> f64 {
    targets
        .iter()
        .filter_map(|&(other, target)| {
            assignment[other].map(|s| {
                let err = nalgebra::distance(site, &sites[s]) - target;
                err * err
            })
        })
        .sum()
}

fn top_candidates(mut costs: Vec<(usize, f64)>, k: usize) -> Vec<(usize, f64)> {
    costs.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
    costs.truncate(k);
    costs
}

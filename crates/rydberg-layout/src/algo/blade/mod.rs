//! Force-directed refinement ("blade").
//!
//! Every step pulls or pushes each interacting pair towards its calibrated target distance, with
//! the per-step movement of each atom bounded by a [`StepBudget`]. Corrections are computed from
//! the positions at the start of the step and accumulated in a displacement buffer before any
//! atom moves, so the order in which edges are visited never matters.

use nalgebra::Vector2;
use rydberg_graph::WeightedGraph;

use crate::device::Device;
use crate::error::{Error, Result};
use crate::geometry::{Layout, Point};
use crate::observer::{BladeFrame, LayoutObserver, NoopObserver};

mod normalize;

pub use normalize::{check_feasible, enforce_min_max_dist_ratio, spread_ratio};

/// Maximum distance one atom may walk in a single step for one pair correction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StepBudget {
    /// Same cap whether the pair grows or shrinks. `f64::INFINITY` lifts the limit.
    Scalar(f64),
    /// Independent caps for growing and shrinking a pair's separation. `reserved` is accepted
    /// for compatibility with existing schedules and has no effect.
    Directional { reserved: f64, grow: f64, shrink: f64 },
}

impl StepBudget {
    pub const UNBOUNDED: StepBudget = StepBudget::Scalar(f64::INFINITY);

    pub fn grow_cap(&self) -> f64 {
        match *self {
            StepBudget::Scalar(cap) => cap,
            StepBudget::Directional { grow, .. } => grow,
        }
    }

    pub fn shrink_cap(&self) -> f64 {
        match *self {
            StepBudget::Scalar(cap) => cap,
            StepBudget::Directional { shrink, .. } => shrink,
        }
    }

    /// Cap for a correction of signed size `delta` (positive means the pair moves apart).
    pub fn cap_for(&self, delta: f64) -> f64 {
        if delta > 0.0 {
            self.grow_cap()
        } else {
            self.shrink_cap()
        }
    }

    pub fn validate(&self) -> Result<()> {
        for (name, cap) in [("grow", self.grow_cap()), ("shrink", self.shrink_cap())] {
            if cap.is_nan() || cap < 0.0 {
                return Err(Error::config(format!(
                    "{name} step cap must be non-negative, got {cap}"
                )));
            }
        }
        Ok(())
    }
}

impl Default for StepBudget {
    fn default() -> Self {
        StepBudget::UNBOUNDED
    }
}

impl From<f64> for StepBudget {
    fn from(cap: f64) -> Self {
        StepBudget::Scalar(cap)
    }
}

impl From<(f64, f64, f64)> for StepBudget {
    fn from((reserved, grow, shrink): (f64, f64, f64)) -> Self {
        StepBudget::Directional {
            reserved,
            grow,
            shrink,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StepOptions {
    pub budget: StepBudget,
    /// Global floor on every target distance, on top of the device minimum.
    pub min_dist: Option<f64>,
    /// Global ceiling on every target distance. Applied last, so it wins over the floors.
    pub max_dist: Option<f64>,
    /// Also push apart pairs without an interaction that sit closer than the distance floor.
    pub separate_unlinked: bool,
}

/// Applies one refinement step to `positions` and returns the new layout.
pub fn update_positions(
    positions: &Layout,
    graph: &WeightedGraph,
    device: &Device,
    opts: &StepOptions,
) -> Result<Layout> {
    opts.budget.validate()?;
    check_layout(positions, graph)?;
    let plan = StepPlan::new(graph, device, opts.min_dist, opts.max_dist)?;
    let (next, _) = plan.apply(positions, opts.budget, opts.separate_unlinked);
    Ok(next)
}

/// Per-round step budgets for [`em_blade`]. The number of rounds is an upper bound; the driver
/// stops earlier once the layout no longer moves.
#[derive(Debug, Clone, PartialEq)]
pub enum RoundSchedule {
    Constant { rounds: usize, budget: StepBudget },
    PerRound(Vec<StepBudget>),
}

impl RoundSchedule {
    pub fn constant(rounds: usize, budget: impl Into<StepBudget>) -> Self {
        RoundSchedule::Constant {
            rounds,
            budget: budget.into(),
        }
    }

    pub fn rounds(&self) -> usize {
        match self {
            RoundSchedule::Constant { rounds, .. } => *rounds,
            RoundSchedule::PerRound(budgets) => budgets.len(),
        }
    }

    pub fn budget(&self, round: usize) -> Option<StepBudget> {
        match self {
            RoundSchedule::Constant { rounds, budget } => (round < *rounds).then_some(*budget),
            RoundSchedule::PerRound(budgets) => budgets.get(round).copied(),
        }
    }

    fn validate(&self) -> Result<()> {
        match self {
            RoundSchedule::Constant { budget, .. } => budget.validate(),
            RoundSchedule::PerRound(budgets) => budgets.iter().try_for_each(StepBudget::validate),
        }
    }
}

impl Default for RoundSchedule {
    fn default() -> Self {
        RoundSchedule::Constant {
            rounds: 100,
            budget: StepBudget::UNBOUNDED,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BladeOptions {
    pub schedule: RoundSchedule,
    pub min_dist: Option<f64>,
    pub max_dist: Option<f64>,
    /// Always on while `enforce_min_max_dist_ratio` is set.
    pub separate_unlinked: bool,
    /// A round whose largest displacement is below this value ends the run.
    pub convergence_epsilon: f64,
    /// Refine relative to the shortest calibrated distance and rescale the result so that its
    /// closest pair sits at the device minimum and its farthest pair at most `max_radius` apart.
    /// Unlinked pairs end up between `max_radius - min_distance` and `max_radius` apart.
    pub enforce_min_max_dist_ratio: bool,
    /// Return the final layout even if it breaks the device limits.
    pub allow_infeasible: bool,
}

impl Default for BladeOptions {
    fn default() -> Self {
        Self {
            schedule: RoundSchedule::default(),
            min_dist: None,
            max_dist: None,
            separate_unlinked: true,
            convergence_epsilon: 1e-9,
            enforce_min_max_dist_ratio: false,
            allow_infeasible: false,
        }
    }
}

pub fn em_blade(
    graph: &WeightedGraph,
    device: &Device,
    starting: Option<&Layout>,
    opts: &BladeOptions,
) -> Result<Layout> {
    em_blade_with_observer(graph, device, starting, opts, &mut NoopObserver)
}

pub fn em_blade_with_observer(
    graph: &WeightedGraph,
    device: &Device,
    starting: Option<&Layout>,
    opts: &BladeOptions,
    observer: &mut dyn LayoutObserver,
) -> Result<Layout> {
    if graph.is_empty() {
        return Err(Error::degenerate("cannot refine a layout of zero variables"));
    }
    if !graph.has_edges() {
        return Err(Error::degenerate(
            "interaction graph has no edges; nothing to refine",
        ));
    }
    if opts.convergence_epsilon.is_nan() || opts.convergence_epsilon < 0.0 {
        return Err(Error::config(format!(
            "convergence epsilon must be non-negative, got {}",
            opts.convergence_epsilon
        )));
    }
    opts.schedule.validate()?;

    let mut layout = match starting {
        Some(start) => start.clone(),
        None => circle_layout(graph.node_count(), device.min_distance()),
    };
    check_layout(&layout, graph)?;

    let plan = if opts.enforce_min_max_dist_ratio {
        StepPlan::ratio_band(graph, device, opts.min_dist, opts.max_dist)?
    } else {
        StepPlan::new(graph, device, opts.min_dist, opts.max_dist)?
    };
    let separate_unlinked = opts.separate_unlinked || opts.enforce_min_max_dist_ratio;

    tracing::debug!(
        variables = graph.node_count(),
        edges = graph.edge_count(),
        rounds = opts.schedule.rounds(),
        "blade refinement"
    );

    let mut round = 0;
    let mut converged = false;
    while let Some(budget) = opts.schedule.budget(round) {
        let (next, max_displacement) = plan.apply(&layout, budget, separate_unlinked);
        layout = next;

        tracing::trace!(round, max_displacement, "blade round");
        observer.on_blade_round(&BladeFrame {
            round,
            layout: &layout,
            max_displacement,
        });

        round += 1;
        if max_displacement <= opts.convergence_epsilon {
            converged = true;
            break;
        }
    }

    if opts.enforce_min_max_dist_ratio {
        layout = enforce_min_max_dist_ratio(&layout, device)?;
    }

    tracing::debug!(rounds_run = round, converged, "blade refinement finished");

    if !opts.allow_infeasible {
        check_feasible(&layout, device)?;
    }

    Ok(layout)
}

/// Atoms evenly spread on a circle about the origin, neighbours `min_distance` apart.
pub fn circle_layout(n: usize, min_distance: f64) -> Layout {
    if n <= 1 {
        return Layout::new(vec![Point::origin(); n]);
    }
    let radius = min_distance / (2.0 * (std::f64::consts::PI / n as f64).sin());
    (0..n)
        .map(|k| {
            let theta = std::f64::consts::TAU * k as f64 / n as f64;
            Point::new(radius * theta.cos(), radius * theta.sin())
        })
        .collect()
}

fn check_layout(layout: &Layout, graph: &WeightedGraph) -> Result<()> {
    if layout.len() != graph.node_count() {
        return Err(Error::config(format!(
            "layout has {} positions for {} variables",
            layout.len(),
            graph.node_count()
        )));
    }
    if !layout.is_finite() {
        return Err(Error::config("layout contains non-finite coordinates"));
    }
    Ok(())
}

/// Fraction of the ratio band's width by which a straggling unlinked pair is pulled inside the
/// nearest edge.
const BAND_INSET: f64 = 0.25;

/// How pairs without an interaction are corrected.
#[derive(Debug, Clone, Copy, PartialEq)]
enum UnlinkedRule {
    /// Push apart pairs closer than the floor.
    Floor(f64),
    /// Keep pairs strictly between `low` and `high`.
    Band { low: f64, high: f64 },
}

impl UnlinkedRule {
    /// Target for an unlinked pair currently `distance` apart, or `None` when it may stay.
    fn target(&self, distance: f64) -> Option<f64> {
        match *self {
            UnlinkedRule::Floor(floor) => (distance < floor).then_some(floor),
            UnlinkedRule::Band { low, high } => {
                let inset = (high - low) * BAND_INSET;
                if distance <= low {
                    Some(low + inset)
                } else if distance >= high {
                    Some(high - inset)
                } else {
                    None
                }
            }
        }
    }
}

/// Clamped target distances, computed once per run.
#[derive(Debug, Clone)]
struct StepPlan {
    n: usize,
    edges: Vec<(usize, usize, f64)>,
    /// Pairs without an interaction, as `(a, b)` with `a < b`.
    unlinked: Vec<(usize, usize)>,
    rule: UnlinkedRule,
}

impl StepPlan {
    /// Targets floored at the device minimum distance.
    fn new(
        graph: &WeightedGraph,
        device: &Device,
        min_dist: Option<f64>,
        max_dist: Option<f64>,
    ) -> Result<Self> {
        check_bounds(min_dist, max_dist)?;

        let floor = device.min_distance().max(min_dist.unwrap_or(0.0));
        let clamp = |t: f64| {
            let t = t.max(floor);
            match max_dist {
                Some(cap) => t.min(cap),
                None => t,
            }
        };

        let edges = calibrated_targets(graph, device)?
            .into_iter()
            .map(|(a, b, t)| (a, b, clamp(t)))
            .collect();

        Ok(Self {
            n: graph.node_count(),
            edges,
            unlinked: unlinked_pairs(graph),
            rule: UnlinkedRule::Floor(clamp(floor)),
        })
    }

    /// Targets scaled relative to the shortest one, for a layout that is rescaled afterwards.
    ///
    /// With `r = max_radius / min_distance` and `s` the shortest target, linked targets are capped
    /// at `r·s` and unlinked pairs are kept strictly between `(r - 1)·s` and `r·s`. The device
    /// minimum is not applied here since the final rescale restores it.
    fn ratio_band(
        graph: &WeightedGraph,
        device: &Device,
        min_dist: Option<f64>,
        max_dist: Option<f64>,
    ) -> Result<Self> {
        check_bounds(min_dist, max_dist)?;

        let clamp = |t: f64| {
            let t = t.max(min_dist.unwrap_or(0.0));
            match max_dist {
                Some(cap) => t.min(cap),
                None => t,
            }
        };

        let mut edges: Vec<(usize, usize, f64)> = calibrated_targets(graph, device)?
            .into_iter()
            .map(|(a, b, t)| (a, b, clamp(t)))
            .collect();

        let shortest = edges
            .iter()
            .map(|&(_, _, t)| t)
            .fold(f64::INFINITY, f64::min);
        if !shortest.is_finite() || shortest <= 0.0 {
            return Err(Error::degenerate(format!(
                "shortest target distance must be positive, got {shortest}"
            )));
        }

        let ratio = device.distance_ratio();
        let high = ratio * shortest;
        let low = (ratio - 1.0).max(1.0) * shortest;
        for edge in &mut edges {
            edge.2 = edge.2.min(high);
        }

        tracing::debug!(shortest, ratio, low, high, "unlinked distance band");

        Ok(Self {
            n: graph.node_count(),
            edges,
            unlinked: unlinked_pairs(graph),
            rule: UnlinkedRule::Band { low, high },
        })
    }

    /// One read/compute/write pass. Returns the new layout and the largest atom displacement.
    fn apply(&self, layout: &Layout, budget: StepBudget, separate_unlinked: bool) -> (Layout, f64) {
        let points = layout.points();
        let mut disps: Vec<Vector2<f64>> = vec![Vector2::zeros(); self.n];

        for &(a, b, target) in &self.edges {
            if let Some(shift) = pair_correction(&points[a], &points[b], target, budget) {
                disps[a] -= shift;
                disps[b] += shift;
            }
        }

        if separate_unlinked {
            for &(a, b) in &self.unlinked {
                let current = nalgebra::distance(&points[a], &points[b]);
                let Some(target) = self.rule.target(current) else {
                    continue;
                };
                if let Some(shift) = pair_correction(&points[a], &points[b], target, budget) {
                    disps[a] -= shift;
                    disps[b] += shift;
                }
            }
        }

        let max_displacement = disps.iter().map(|d| d.norm()).fold(0.0, f64::max);
        let next = points
            .iter()
            .zip(&disps)
            .map(|(p, d)| p + d)
            .collect::<Layout>();
        (next, max_displacement)
    }
}

fn check_bounds(min_dist: Option<f64>, max_dist: Option<f64>) -> Result<()> {
    for (name, bound) in [("min_dist", min_dist), ("max_dist", max_dist)] {
        match bound {
            Some(b) if !b.is_finite() || b < 0.0 => {
                return Err(Error::config(format!(
                    "{name} must be finite and non-negative, got {b}"
                )));
            }
            _ => {}
        }
    }
    Ok(())
}

/// Raw calibrated distance of every edge.
fn calibrated_targets(graph: &WeightedGraph, device: &Device) -> Result<Vec<(usize, usize, f64)>> {
    graph
        .edges()
        .iter()
        .map(|e| {
            let raw = device.strength_to_distance(e.weight);
            if raw.is_finite() {
                Ok((e.v(), e.w(), raw))
            } else {
                Err(Error::degenerate(format!(
                    "edge ({}, {}) with strength {} maps to non-finite distance {raw}",
                    e.v(),
                    e.w(),
                    e.weight
                )))
            }
        })
        .collect()
}

fn unlinked_pairs(graph: &WeightedGraph) -> Vec<(usize, usize)> {
    let n = graph.node_count();
    let mut unlinked = Vec::new();
    for a in 0..n {
        for b in (a + 1)..n {
            if !graph.has_edge(a, b) {
                unlinked.push((a, b));
            }
        }
    }
    unlinked
}

/// Displacement applied to `b` (and negated for `a`) to move the pair towards `target`.
///
/// Each endpoint walks `min(|delta| / 2, cap)`, so one step changes the distance by at most
/// twice the cap and the midpoint stays put. Coincident atoms separate along the x axis.
fn pair_correction(a: &Point, b: &Point, target: f64, budget: StepBudget) -> Option<Vector2<f64>> {
    let diff = b - a;
    let current = diff.norm();
    let delta = target - current;
    if delta == 0.0 {
        return None;
    }

    let walk = (delta.abs() / 2.0).min(budget.cap_for(delta));
    if walk <= 0.0 {
        return None;
    }

    let direction = if current > 0.0 {
        diff / current
    } else {
        Vector2::x()
    };
    Some(direction * (walk * delta.signum()))
}

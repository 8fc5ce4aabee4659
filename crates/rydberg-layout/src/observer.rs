//! Step recording hooks.
//!
//! The algorithms report intermediate state through a [`LayoutObserver`] passed in by the caller.
//! Observers only read; nothing they do can change the outcome of a run.

use crate::geometry::{Layout, Point};

/// One greedy placement decision.
#[derive(Debug, Clone, Copy)]
pub struct GreedyFrame<'a> {
    pub step: usize,
    pub variable: usize,
    pub site: usize,
    pub position: Point,
    pub cost: f64,
    /// Lowest-cost free sites considered for this variable, best first.
    pub candidates: &'a [(usize, f64)],
    /// Sites discarded for this variable because they lie beyond the radial limit.
    pub discarded: &'a [usize],
    /// Site assigned to each variable so far.
    pub assignment: &'a [Option<usize>],
}

/// State after one refinement round.
#[derive(Debug, Clone, Copy)]
pub struct BladeFrame<'a> {
    pub round: usize,
    pub layout: &'a Layout,
    /// Largest distance any atom moved during the round.
    pub max_displacement: f64,
}

pub trait LayoutObserver {
    fn on_greedy_step(&mut self, _frame: &GreedyFrame<'_>) {}

    fn on_blade_round(&mut self, _frame: &BladeFrame<'_>) {}
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl LayoutObserver for NoopObserver {}

#[derive(Debug, Clone, PartialEq)]
pub struct GreedyStep {
    pub step: usize,
    pub variable: usize,
    pub site: usize,
    pub position: Point,
    pub cost: f64,
    pub candidates: Vec<(usize, f64)>,
    pub discarded: Vec<usize>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BladeRound {
    pub round: usize,
    pub layout: Layout,
    pub max_displacement: f64,
}

/// Keeps an owned copy of every frame, e.g. for rendering an animation afterwards.
#[derive(Debug, Clone, Default)]
pub struct FrameRecorder {
    pub greedy: Vec<GreedyStep>,
    pub blade: Vec<BladeRound>,
}

impl FrameRecorder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.greedy.is_empty() && self.blade.is_empty()
    }
}

impl LayoutObserver for FrameRecorder {
    fn on_greedy_step(&mut self, frame: &GreedyFrame<'_>) {
        self.greedy.push(GreedyStep {
            step: frame.step,
            variable: frame.variable,
            site: frame.site,
            position: frame.position,
            cost: frame.cost,
            candidates: frame.candidates.to_vec(),
            discarded: frame.discarded.to_vec(),
        });
    }

    fn on_blade_round(&mut self, frame: &BladeFrame<'_>) {
        self.blade.push(BladeRound {
            round: frame.round,
            layout: frame.layout.clone(),
            max_displacement: frame.max_displacement,
        });
    }
}

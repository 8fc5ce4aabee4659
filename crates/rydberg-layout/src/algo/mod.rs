pub mod blade;
pub mod greedy;

use crate::geometry::Layout;
use crate::lattice::LatticeKind;

pub use blade::{BladeOptions, RoundSchedule, StepBudget, StepOptions};
pub use greedy::{GreedyOptions, PlacementOrder};

#[derive(Debug, Clone)]
pub enum Algorithm {
    /// Greedy placement on a generated candidate lattice.
    Greedy(GreedyPlacement),
    /// Force-directed refinement from `starting` (or a circle when absent).
    Blade {
        starting: Option<Layout>,
        options: BladeOptions,
    },
    /// Greedy placement, then refinement starting from the greedy layout.
    GreedyBlade {
        placement: GreedyPlacement,
        options: BladeOptions,
    },
}

#[derive(Debug, Clone, PartialEq)]
pub struct GreedyPlacement {
    pub lattice: LatticeKind,
    /// Number of candidate sites; more sites than variables widen the search.
    pub traps: usize,
    pub spacing: f64,
    pub options: GreedyOptions,
}

#![forbid(unsafe_code)]

//! Headless register layout algorithms for neutral-atom devices.
//!
//! Turns a weighted interaction graph into 2-D atom coordinates that respect a device's minimum
//! spacing and maximum radial distance:
//! - [`algo::greedy`] places variables one by one on a candidate lattice;
//! - [`algo::blade`] refines a layout by bounded pairwise corrections towards calibrated
//!   distances.

pub mod algo;
pub mod device;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod observer;

pub use algo::{
    Algorithm, BladeOptions, GreedyOptions, GreedyPlacement, PlacementOrder, RoundSchedule,
    StepBudget, StepOptions,
};
pub use device::{Calibration, Device, DeviceKind, RydbergCalibration};
pub use error::{Error, ErrorKind, Result};
pub use geometry::{Layout, Point};
pub use lattice::{Lattice, LatticeKind};
pub use observer::{FrameRecorder, LayoutObserver, NoopObserver};

use rydberg_graph::WeightedGraph;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Headless layout entry point.
pub fn layout(graph: &WeightedGraph, device: &Device, algorithm: &Algorithm) -> Result<Layout> {
    layout_with_observer(graph, device, algorithm, &mut NoopObserver)
}

pub fn layout_with_observer(
    graph: &WeightedGraph,
    device: &Device,
    algorithm: &Algorithm,
    observer: &mut dyn LayoutObserver,
) -> Result<Layout> {
    match algorithm {
        Algorithm::Greedy(placement) => greedy_layout(graph, device, placement, observer),
        Algorithm::Blade { starting, options } => {
            algo::blade::em_blade_with_observer(graph, device, starting.as_ref(), options, observer)
        }
        Algorithm::GreedyBlade { placement, options } => {
            let start = greedy_layout(graph, device, placement, observer)?;
            algo::blade::em_blade_with_observer(graph, device, Some(&start), options, observer)
        }
    }
}

fn greedy_layout(
    graph: &WeightedGraph,
    device: &Device,
    placement: &GreedyPlacement,
    observer: &mut dyn LayoutObserver,
) -> Result<Layout> {
    let lattice = lattice::generate(placement.lattice, placement.traps, placement.spacing)?;
    algo::greedy::place_with_observer(
        graph,
        device,
        lattice.sites(),
        &placement.options,
        observer,
    )
}

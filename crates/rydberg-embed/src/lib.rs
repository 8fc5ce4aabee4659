#![forbid(unsafe_code)]

//! `rydberg-embed` maps an interaction matrix onto a neutral-atom register.
//!
//! The matrix is validated into a [`WeightedGraph`], an [`Embedder`] (selected by
//! [`EmbeddingConfig::method`] or supplied by the caller) produces one position per variable,
//! and the positions are packaged as a [`Register`].

pub mod config;
pub mod embedder;
pub mod error;
pub mod register;

pub use config::{EmbeddingConfig, EmbeddingMethod, StepBudgetConfig};
pub use embedder::{
    BladeEmbedder, Embedder, Embedding, GreedyBladeEmbedder, GreedyEmbedder, get_embedder,
};
pub use error::{Error, ErrorKind, Result};
pub use register::Register;
pub use rydberg_graph::WeightedGraph;
pub use rydberg_layout::{
    Device, DeviceKind, FrameRecorder, Layout, LayoutObserver, NoopObserver, Point,
};

use nalgebra::DMatrix;
use rydberg_layout::algo::blade::check_feasible;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn embed(matrix: &DMatrix<f64>, device: &Device, embedding: &Embedding) -> Result<Register> {
    embed_with_observer(matrix, device, embedding, &mut NoopObserver)
}

/// Like [`embed`], forwarding intermediate frames to `observer` when `draw_steps` is set.
pub fn embed_with_observer(
    matrix: &DMatrix<f64>,
    device: &Device,
    embedding: &Embedding,
    observer: &mut dyn LayoutObserver,
) -> Result<Register> {
    let graph = rydberg_graph::from_interaction_matrix(matrix)?;
    let embedder = get_embedder(embedding);
    let config = &embedding.config;

    tracing::debug!(
        embedder = embedder.name(),
        variables = graph.node_count(),
        edges = graph.edge_count(),
        device = device.name(),
        "embedding"
    );

    let layout = if config.draw_steps {
        embedder.place(&graph, device, config, observer)?
    } else {
        embedder.place(&graph, device, config, &mut NoopObserver)?
    };

    if layout.len() != graph.node_count() {
        return Err(Error::PositionCount {
            embedder: embedder.name().to_string(),
            got: layout.len(),
            expected: graph.node_count(),
        });
    }
    if !layout.is_finite() {
        return Err(Error::NonFinitePositions {
            embedder: embedder.name().to_string(),
        });
    }
    if !config.allow_infeasible {
        check_feasible(&layout, device)?;
    }

    Ok(Register::from_layout(&layout, device))
}

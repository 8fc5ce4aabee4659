//! Embedding strategies.

use std::fmt;
use std::sync::Arc;

use rydberg_graph::WeightedGraph;
use rydberg_layout::{Algorithm, Device, Layout, LayoutObserver, layout_with_observer};

use crate::config::{EmbeddingConfig, EmbeddingMethod};
use crate::error::Result;

/// Turns an interaction graph into one position per variable.
///
/// Implementations must be deterministic for equal inputs and must not let the observer
/// influence the result.
pub trait Embedder: fmt::Debug + Send + Sync {
    fn name(&self) -> &str;

    fn place(
        &self,
        graph: &WeightedGraph,
        device: &Device,
        config: &EmbeddingConfig,
        observer: &mut dyn LayoutObserver,
    ) -> Result<Layout>;
}

/// Greedy placement on a candidate lattice.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyEmbedder;

impl Embedder for GreedyEmbedder {
    fn name(&self) -> &str {
        EmbeddingMethod::Greedy.as_str()
    }

    fn place(
        &self,
        graph: &WeightedGraph,
        device: &Device,
        config: &EmbeddingConfig,
        observer: &mut dyn LayoutObserver,
    ) -> Result<Layout> {
        let algorithm = Algorithm::Greedy(config.greedy_placement(device, graph.node_count()));
        Ok(layout_with_observer(graph, device, &algorithm, observer)?)
    }
}

/// Force-directed refinement from an evenly spaced circle.
#[derive(Debug, Clone, Copy, Default)]
pub struct BladeEmbedder;

impl Embedder for BladeEmbedder {
    fn name(&self) -> &str {
        EmbeddingMethod::Blade.as_str()
    }

    fn place(
        &self,
        graph: &WeightedGraph,
        device: &Device,
        config: &EmbeddingConfig,
        observer: &mut dyn LayoutObserver,
    ) -> Result<Layout> {
        let algorithm = Algorithm::Blade {
            starting: None,
            options: config.blade_options(),
        };
        Ok(layout_with_observer(graph, device, &algorithm, observer)?)
    }
}

/// Greedy placement refined by blade.
#[derive(Debug, Clone, Copy, Default)]
pub struct GreedyBladeEmbedder;

impl Embedder for GreedyBladeEmbedder {
    fn name(&self) -> &str {
        EmbeddingMethod::GreedyBlade.as_str()
    }

    fn place(
        &self,
        graph: &WeightedGraph,
        device: &Device,
        config: &EmbeddingConfig,
        observer: &mut dyn LayoutObserver,
    ) -> Result<Layout> {
        let algorithm = Algorithm::GreedyBlade {
            placement: config.greedy_placement(device, graph.node_count()),
            options: config.blade_options(),
        };
        Ok(layout_with_observer(graph, device, &algorithm, observer)?)
    }
}

/// A configuration plus an optional caller-supplied strategy that overrides `config.method`.
#[derive(Debug, Clone, Default)]
pub struct Embedding {
    pub config: EmbeddingConfig,
    pub custom: Option<Arc<dyn Embedder>>,
}

impl Embedding {
    pub fn new(config: EmbeddingConfig) -> Self {
        Self {
            config,
            custom: None,
        }
    }

    pub fn with_method(method: EmbeddingMethod) -> Self {
        Self::new(EmbeddingConfig {
            method,
            ..Default::default()
        })
    }

    pub fn with_embedder(mut self, embedder: impl Embedder + 'static) -> Self {
        self.custom = Some(Arc::new(embedder));
        self
    }
}

pub fn get_embedder(embedding: &Embedding) -> Arc<dyn Embedder> {
    if let Some(custom) = &embedding.custom {
        return Arc::clone(custom);
    }
    match embedding.config.method {
        EmbeddingMethod::Greedy => Arc::new(GreedyEmbedder),
        EmbeddingMethod::Blade => Arc::new(BladeEmbedder),
        EmbeddingMethod::GreedyBlade => Arc::new(GreedyBladeEmbedder),
    }
}

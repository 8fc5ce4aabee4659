//! Weighted interaction graph container.
//!
//! Nodes are the variable indices `0..n`. Edges are unordered pairs carrying a strictly positive
//! interaction strength; a zero coefficient means "no edge" and is never stored.

use rustc_hash::FxBuildHasher;

use crate::error::{Error, Result};

mod adj_cache;
mod edge_key;

use adj_cache::UndirectedAdjCache;
pub use edge_key::EdgeKey;

type HashMap<K, V> = hashbrown::HashMap<K, V, FxBuildHasher>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub key: EdgeKey,
    pub weight: f64,
}

impl Edge {
    pub fn v(&self) -> usize {
        self.key.v
    }

    pub fn w(&self) -> usize {
        self.key.w
    }
}

#[derive(Debug, Clone)]
pub struct WeightedGraph {
    node_count: usize,
    // Sorted by key so that iteration order is stable across builds.
    edges: Vec<Edge>,
    edge_index: HashMap<EdgeKey, usize>,
    adjacency: UndirectedAdjCache,
    incident_weight: Vec<f64>,
}

impl WeightedGraph {
    /// A graph with `node_count` isolated nodes.
    pub fn new(node_count: usize) -> Self {
        Self {
            node_count,
            edges: Vec::new(),
            edge_index: HashMap::default(),
            adjacency: UndirectedAdjCache::build(node_count, &[]),
            incident_weight: vec![0.0; node_count],
        }
    }

    /// Builds a graph from `(v, w, weight)` triples.
    ///
    /// Zero weights are dropped. Negative, NaN or infinite weights, self-loops, endpoints outside
    /// `0..node_count` and repeated pairs are rejected.
    pub fn from_edges<I>(node_count: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (usize, usize, f64)>,
    {
        let mut collected: Vec<Edge> = Vec::new();
        let mut edge_index: HashMap<EdgeKey, usize> = HashMap::default();

        for (v, w, weight) in edges {
            if v >= node_count || w >= node_count {
                return Err(Error::MissingEndpoint { v, w, node_count });
            }
            if v == w {
                return Err(Error::SelfLoop { node: v });
            }
            if !weight.is_finite() || weight < 0.0 {
                return Err(Error::InvalidWeight { v, w, weight });
            }
            if weight == 0.0 {
                continue;
            }
            let key = EdgeKey::new(v, w);
            if edge_index.insert(key, collected.len()).is_some() {
                return Err(Error::DuplicateEdge { v: key.v, w: key.w });
            }
            collected.push(Edge { key, weight });
        }

        collected.sort_by_key(|e| e.key);
        edge_index.clear();
        for (ix, e) in collected.iter().enumerate() {
            edge_index.insert(e.key, ix);
        }

        let endpoints: Vec<(usize, usize)> = collected.iter().map(|e| (e.v(), e.w())).collect();
        let adjacency = UndirectedAdjCache::build(node_count, &endpoints);

        let mut incident_weight = vec![0.0; node_count];
        for e in &collected {
            incident_weight[e.v()] += e.weight;
            incident_weight[e.w()] += e.weight;
        }

        tracing::trace!(
            nodes = node_count,
            edges = collected.len(),
            "built weighted graph"
        );

        Ok(Self {
            node_count,
            edges: collected,
            edge_index,
            adjacency,
            incident_weight,
        })
    }

    pub fn node_count(&self) -> usize {
        self.node_count
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_count == 0
    }

    pub fn has_edges(&self) -> bool {
        !self.edges.is_empty()
    }

    pub fn nodes(&self) -> std::ops::Range<usize> {
        0..self.node_count
    }

    /// All edges, ordered by `(v, w)` with `v < w`.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    pub fn has_edge(&self, a: usize, b: usize) -> bool {
        self.edge_index.contains_key(&EdgeKey::new(a, b))
    }

    pub fn weight(&self, a: usize, b: usize) -> Option<f64> {
        self.edge_index
            .get(&EdgeKey::new(a, b))
            .map(|&ix| self.edges[ix].weight)
    }

    /// Neighbours of `v` in ascending order, with the weight of the connecting edge.
    pub fn neighbors(&self, v: usize) -> impl Iterator<Item = (usize, f64)> + '_ {
        let entries: &[(usize, usize)] = if v < self.node_count {
            self.adjacency.entries(v)
        } else {
            &[]
        };
        entries
            .iter()
            .map(move |&(other, edge_ix)| (other, self.edges[edge_ix].weight))
    }

    pub fn degree(&self, v: usize) -> usize {
        if v < self.node_count {
            self.adjacency.entries(v).len()
        } else {
            0
        }
    }

    /// Sum of the weights of all edges incident to `v`.
    pub fn incident_weight(&self, v: usize) -> f64 {
        self.incident_weight.get(v).copied().unwrap_or(0.0)
    }

    pub fn is_isolated(&self, v: usize) -> bool {
        self.degree(v) == 0
    }
}

//! Compressed adjacency used by [`WeightedGraph`](super::WeightedGraph).
//!
//! Placement and refinement query the neighbours of every node many times, so the lists are
//! laid out once in CSR form when the graph is built.

#[derive(Debug, Clone, Default)]
pub(in crate::graph) struct UndirectedAdjCache {
    pub(in crate::graph) offsets: Vec<usize>,
    /// `(neighbour, edge index)` pairs, grouped by node.
    pub(in crate::graph) entries: Vec<(usize, usize)>,
}

impl UndirectedAdjCache {
    pub(in crate::graph) fn build(node_count: usize, endpoints: &[(usize, usize)]) -> Self {
        let mut degree = vec![0usize; node_count];
        for &(v, w) in endpoints {
            degree[v] += 1;
            degree[w] += 1;
        }

        let mut offsets = Vec::with_capacity(node_count + 1);
        offsets.push(0);
        for d in &degree {
            let last = offsets.last().copied().unwrap_or(0);
            offsets.push(last + d);
        }

        let mut cursor = offsets.clone();
        let mut entries = vec![(0usize, 0usize); endpoints.len() * 2];
        for (edge_ix, &(v, w)) in endpoints.iter().enumerate() {
            entries[cursor[v]] = (w, edge_ix);
            cursor[v] += 1;
            entries[cursor[w]] = (v, edge_ix);
            cursor[w] += 1;
        }

        Self { offsets, entries }
    }

    pub(in crate::graph) fn entries(&self, v_ix: usize) -> &[(usize, usize)] {
        let start = self.offsets[v_ix];
        let end = self.offsets[v_ix + 1];
        &self.entries[start..end]
    }
}

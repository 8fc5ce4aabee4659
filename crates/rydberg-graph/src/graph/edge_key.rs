//! Edge key types.
//!
//! Interaction graphs are undirected, so a key always stores its endpoints as `(min, max)`.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeKey {
    pub v: usize,
    pub w: usize,
}

impl EdgeKey {
    pub fn new(a: usize, b: usize) -> Self {
        if a <= b {
            Self { v: a, w: b }
        } else {
            Self { v: b, w: a }
        }
    }

    /// Returns the endpoint opposite to `node`, or `None` when `node` is not incident.
    pub fn other(&self, node: usize) -> Option<usize> {
        if node == self.v {
            Some(self.w)
        } else if node == self.w {
            Some(self.v)
        } else {
            None
        }
    }
}


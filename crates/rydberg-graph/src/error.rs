#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("interaction matrix must be square, got {rows}×{cols}")]
    NotSquare { rows: usize, cols: usize },

    #[error("QUBO size {size}×{size} exceeds the maximum supported size of {max}×{max}")]
    TooLarge { size: usize, max: usize },

    #[error("non-finite coefficient at ({row}, {col})")]
    NonFinite { row: usize, col: usize },

    #[error("negative off-diagonal coefficient detected at ({row}, {col}): {value}")]
    NegativeOffDiagonal { row: usize, col: usize, value: f64 },

    #[error("asymmetric interaction between {row} and {col}: {upper} vs {lower}")]
    Asymmetric {
        row: usize,
        col: usize,
        upper: f64,
        lower: f64,
    },

    #[error("edge ({v}, {w}) references a node outside 0..{node_count}")]
    MissingEndpoint {
        v: usize,
        w: usize,
        node_count: usize,
    },

    #[error("self-loop on node {node}; local biases are not graph edges")]
    SelfLoop { node: usize },

    #[error("edge ({v}, {w}) has invalid weight {weight}")]
    InvalidWeight { v: usize, w: usize, weight: f64 },

    #[error("edge ({v}, {w}) was given twice")]
    DuplicateEdge { v: usize, w: usize },
}

pub type Result<T> = std::result::Result<T, Error>;

pub use rydberg_layout::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error(transparent)]
    Graph(#[from] rydberg_graph::Error),

    #[error(transparent)]
    Layout(#[from] rydberg_layout::Error),

    #[error("unknown embedding method: {name}")]
    UnknownMethod { name: String },

    #[error("invalid embedding config: {0}")]
    InvalidConfig(#[from] serde_json::Error),

    #[error("embedder `{embedder}` returned {got} positions for {expected} variables")]
    PositionCount {
        embedder: String,
        got: usize,
        expected: usize,
    },

    #[error("embedder `{embedder}` returned non-finite coordinates")]
    NonFinitePositions { embedder: String },
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Layout(err) => err.kind(),
            Error::Graph(_)
            | Error::UnknownMethod { .. }
            | Error::InvalidConfig(_)
            | Error::PositionCount { .. }
            | Error::NonFinitePositions { .. } => ErrorKind::Configuration,
        }
    }
}

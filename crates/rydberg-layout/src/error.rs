#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum Error {
    #[error("invalid configuration: {message}")]
    Configuration { message: String },

    #[error("degenerate input: {message}")]
    DegenerateInput { message: String },

    #[error(
        "variable {variable} needs site {site}, which lies {radius} from the origin (max radial distance {max_radius})"
    )]
    RadiusExceeded {
        variable: usize,
        site: usize,
        radius: f64,
        max_radius: f64,
    },

    #[error("atoms {a} and {b} are {distance} apart, below the minimum distance {min_distance}")]
    MinDistanceViolated {
        a: usize,
        b: usize,
        distance: f64,
        min_distance: f64,
    },

    #[error("atom {variable} lies {radius} from the origin, beyond the max radial distance {max_radius}")]
    OutsideRadius {
        variable: usize,
        radius: f64,
        max_radius: f64,
    },
}

/// Coarse classification used by callers deciding whether a retry with relaxed parameters
/// (more sites, larger spacing, more rounds) can help.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Configuration,
    ConstraintInfeasible,
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration { .. } | Error::DegenerateInput { .. } => ErrorKind::Configuration,
            Error::RadiusExceeded { .. }
            | Error::MinDistanceViolated { .. }
            | Error::OutsideRadius { .. } => ErrorKind::ConstraintInfeasible,
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        Error::Configuration {
            message: message.into(),
        }
    }

    pub(crate) fn degenerate(message: impl Into<String>) -> Self {
        Error::DegenerateInput {
            message: message.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

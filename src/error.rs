use thiserror::Error;

use crate::network::link::Objective;

/// Errors raised by the graph model and the analysis engines.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RailError {
    /// A query referenced a city identifier that is not in the graph.
    #[error("unknown city: {0}")]
    UnknownNode(String),
    /// The destination cannot be reached from the source.
    #[error("no path from {from} to {to}")]
    NoPath { from: String, to: String },
    /// A link weight is negative, NaN or infinite.
    #[error("invalid {objective} weight {value} on link {from} - {to}")]
    InvalidWeight {
        from: String,
        to: String,
        objective: Objective,
        value: f64,
    },
    #[error("link from {0} to itself")]
    SelfLoop(String),
    #[error("city {0} defined more than once")]
    DuplicateCity(String),
    #[error("link {a} - {b} defined more than once")]
    DuplicateLink { a: String, b: String },
    #[error("link {from} - {to} references an unknown city")]
    DanglingLink { from: String, to: String },
}

pub type RailResult<T> = Result<T, RailError>;

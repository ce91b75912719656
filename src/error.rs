use thiserror::Error;

/// Failures of the random selection helpers
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SelectionError {
    #[error("weighted selection needs at least one entry with positive weight")]
    EmptyInput,

    #[error("cannot select from an empty collection")]
    EmptyCollection,

    #[error("weights must be finite and non-negative")]
    NegativeWeight,

    #[error("weights sum past the largest representable value")]
    WeightOverflow,

    #[error("requested {requested} distinct elements but only {available} are available")]
    InsufficientElements { requested: usize, available: usize },
}

/// Failures while building or reconfiguring a graph
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GraphError {
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),

    #[error(transparent)]
    Selection(#[from] SelectionError),
}

/// Failures while loading a layout configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error(transparent)]
    Invalid(#[from] GraphError),
}

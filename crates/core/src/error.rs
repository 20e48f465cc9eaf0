use thiserror::Error;

/// Errors shared across the QuorZero crates.
#[derive(Error, Debug)]
pub enum EngineError {
    /// An action outside the legal set was passed to `Environment::play`.
    #[error("illegal action (id {0})")]
    IllegalAction(usize),

    #[error("invalid policy: {0}")]
    InvalidPolicy(String),

    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// The external evaluator failed; fatal for the current search step.
    #[error("evaluator failure: {0}")]
    Evaluator(String),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EngineError>;

use thiserror::Error;

/// Error type that captures the recoverable reconciliation failures.
///
/// Each variant maps to a corrective action the caller can surface to the
/// user; none are fatal to the process. Date arithmetic never errors, the
/// month-end clamp resolves those cases deterministically.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("import mapping invalid: {0}")]
    Mapping(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("not found: {0}")]
    NotFound(String),
}

pub type LedgerResult<T> = Result<T, LedgerError>;

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    #[error("Invalid equity: {0}")]
    InvalidEquity(String),

    #[error("Invalid company handle: {0}")]
    InvalidHandle(String),
}

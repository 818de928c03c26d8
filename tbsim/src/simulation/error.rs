//! Errors raised by the simulation core

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SimError {
    /// Two bodies share a position and no minimum distance is configured
    #[error("bodies {a} and {b} occupy the same position")]
    DegenerateConfiguration { a: usize, b: usize },

    #[error("body {index} reached a non-finite position or velocity")]
    NonFiniteState { index: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

pub type SimResult<T> = Result<T, SimError>;

//! Shared error types for the services crate.

use thiserror::Error;

use pathfinder_core::catalog::CatalogError;
use pathfinder_core::model::LevelId;

/// Errors emitted by a `QueryEvaluator`.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum QueryError {
    #[error("query is empty")]
    Empty,
    #[error("invalid query: {0}")]
    Parse(String),
}

/// Errors emitted by `GameController`.
///
/// None of these are fatal: the controller's state is unchanged whenever one
/// is returned.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ControllerError {
    #[error("level {0} does not exist")]
    UnknownLevel(LevelId),
    #[error("level {0} is locked; complete the previous level first")]
    LevelLocked(LevelId),
    #[error("no hints left for this level")]
    HintsExhausted,
    #[error("this level has no solution to reveal")]
    NoSolution,
    #[error(transparent)]
    Query(#[from] QueryError),
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

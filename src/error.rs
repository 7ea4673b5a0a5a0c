use std::collections::TryReserveError;
use thiserror::Error;

/// Node storage could not be reserved. The operation that reported it left the list unmodified.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("failed to allocate storage for {requested} list node(s)")]
pub struct AllocationError {
    pub(crate) requested: usize,
    #[source]
    pub(crate) source: TryReserveError,
}

impl AllocationError {
    /// The number of nodes the failed reservation asked for
    pub fn requested(&self) -> usize {
        self.requested
    }
}

/// A precondition of a list operation was violated by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidOperation {
    #[error("the list has no comparator to search with")]
    MissingComparator,
    #[error("the handle belongs to a different list")]
    ForeignHandle,
    #[error("the handle refers to a node that was already removed")]
    StaleHandle,
}

/// Errors reported by `List` operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ListError {
    #[error(transparent)]
    Allocation(#[from] AllocationError),
    #[error("invalid list operation: {0}")]
    InvalidOperation(#[from] InvalidOperation),
}

/// Errors reported by the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DbError {
    #[error("a {kind} with id {id} already exists")]
    Duplicate { kind: &'static str, id: u32 },
    #[error("no {kind} with id {id}")]
    NotFound { kind: &'static str, id: u32 },
    #[error(transparent)]
    List(#[from] ListError),
}

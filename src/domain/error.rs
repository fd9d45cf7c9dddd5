//! Domain-level errors (no external dependencies)

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::arena::ChildSlot;

/// Domain errors represent violations of the river-network model.
/// Record-level variants are recoverable: the builder reports them and
/// continues with the next record.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("cannot read record source: {0}")]
    SourceUnavailable(PathBuf),

    #[error("failed to read from record source: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed {field}: {value:?}")]
    MalformedNumber { field: &'static str, value: String },

    #[error("parent not found: {0}")]
    OrphanRecord(String),

    #[error("parent already has two children: {0}")]
    CapacityExceeded(String),

    #[error("duplicate tributary name: {0}")]
    DuplicateName(String),

    #[error("root already defined, second root record: {0}")]
    DuplicateRoot(String),

    #[error("no root record found")]
    NoRoot,

    #[error("{0} child does not exist")]
    NoChild(ChildSlot),

    #[error("already at the root")]
    AtRoot,

    #[error("tree is empty, nothing to explore")]
    EmptyTree,
}

/// Result type for tree operations.
pub type TreeResult<T> = Result<T, DomainError>;

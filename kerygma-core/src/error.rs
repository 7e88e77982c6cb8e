//! Error types for kerygma-core

use thiserror::Error;

/// Top-level error type for kerygma-core
#[derive(Error, Debug)]
pub enum KerygmaError {
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("History error: {0}")]
    History(#[from] HistoryError),

    #[error("Repository error: {0}")]
    Repository(#[from] RepositoryError),

    #[error("Lookup error: {0}")]
    Lookup(#[from] LookupError),
}

/// Errors from the durable key-value substrate
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),
}

/// Errors from history store construction
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HistoryError {
    #[error("History capacity must be at least 1")]
    InvalidCapacity,
}

/// Errors from building repository records
#[derive(Error, Debug, PartialEq, Eq)]
pub enum RepositoryError {
    #[error("Invalid record: {0}")]
    InvalidRecord(String),
}

/// Failures reported by the external text-generation capability
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerateError {
    #[error("Generation request failed: {0}")]
    Request(String),

    #[error("Generated response was invalid: {0}")]
    InvalidResponse(String),
}

/// Errors from a feature lookup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum LookupError {
    #[error("Lookup query is empty")]
    EmptyQuery,

    #[error(transparent)]
    Generate(#[from] GenerateError),

    #[error("Lookup was cancelled before the response arrived")]
    Cancelled,
}

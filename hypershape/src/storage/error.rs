//! Storage error types
//!
//! Structured errors for record source operations. Anything a backing store
//! reports is funnelled into [`StorageError`] so the HTTP layer can map it to
//! a status code without knowing which store produced it.
//!
//! # Example
//!
//! ```rust
//! use hypershape::storage::{StorageError, StorageErrorKind};
//!
//! let error = StorageError::not_found("Habit", "h_123");
//! assert!(matches!(error.kind, StorageErrorKind::NotFound));
//! assert!(error.entity_id.is_some());
//! ```

use std::fmt;

/// Operation being performed when the storage error occurred
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageOperation {
    /// Counting records that match the filters
    Count,
    /// Fetching one ordered page of records
    Fetch,
    /// Looking up a single record by identity
    FindById,
}

impl fmt::Display for StorageOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Count => write!(f, "count"),
            Self::Fetch => write!(f, "fetch"),
            Self::FindById => write!(f, "find_by_id"),
        }
    }
}

/// Category of storage error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StorageErrorKind {
    /// Record was not found
    NotFound,
    /// The store could not be reached
    Unavailable,
    /// Operation timed out
    Timeout,
    /// The store rejected the query (unknown column, bad filter value)
    InvalidQuery,
    /// Stored data could not be projected into the output shape
    SerializationError,
    /// Other unclassified error
    Other,
}

impl fmt::Display for StorageErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "not_found"),
            Self::Unavailable => write!(f, "unavailable"),
            Self::Timeout => write!(f, "timeout"),
            Self::InvalidQuery => write!(f, "invalid_query"),
            Self::SerializationError => write!(f, "serialization_error"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// Structured storage error with operation context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StorageError {
    /// The operation being performed when the error occurred
    pub operation: StorageOperation,
    /// The category of error
    pub kind: StorageErrorKind,
    /// Human-readable error message
    pub message: String,
    /// The type of record involved (e.g., "Habit", "Tag")
    pub entity_type: Option<String>,
    /// The identity of the record involved
    pub entity_id: Option<String>,
}

impl StorageError {
    /// Create a new storage error
    pub fn new(
        operation: StorageOperation,
        kind: StorageErrorKind,
        message: impl Into<String>,
    ) -> Self {
        Self {
            operation,
            kind,
            message: message.into(),
            entity_type: None,
            entity_id: None,
        }
    }

    /// Create a "not found" error with entity context
    pub fn not_found(entity_type: impl Into<String>, entity_id: impl Into<String>) -> Self {
        Self {
            operation: StorageOperation::FindById,
            kind: StorageErrorKind::NotFound,
            message: "Record not found".to_string(),
            entity_type: Some(entity_type.into()),
            entity_id: Some(entity_id.into()),
        }
    }

    /// Create an "unavailable" error for a store that could not be reached
    pub fn unavailable(operation: StorageOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StorageErrorKind::Unavailable, message)
    }

    /// Create a timeout error
    pub fn timeout(operation: StorageOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StorageErrorKind::Timeout, message)
    }

    /// Create an error for a query the store refused to run
    pub fn invalid_query(operation: StorageOperation, message: impl Into<String>) -> Self {
        Self::new(operation, StorageErrorKind::InvalidQuery, message)
    }

    /// Add entity context to an existing error
    #[must_use]
    pub fn with_entity(
        mut self,
        entity_type: impl Into<String>,
        entity_id: impl Into<String>,
    ) -> Self {
        self.entity_type = Some(entity_type.into());
        self.entity_id = Some(entity_id.into());
        self
    }

    /// Check if this error is retriable (transient errors that may succeed on retry)
    pub fn is_retriable(&self) -> bool {
        matches!(
            self.kind,
            StorageErrorKind::Unavailable | StorageErrorKind::Timeout
        )
    }
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Storage {} error during {}: {}",
            self.kind, self.operation, self.message
        )?;
        match (&self.entity_type, &self.entity_id) {
            (Some(t), Some(id)) => write!(f, " [{}: {}]", t, id)?,
            (Some(t), None) => write!(f, " [{}]", t)?,
            _ => {}
        }
        Ok(())
    }
}

impl std::error::Error for StorageError {}

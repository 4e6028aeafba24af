use catalog_db::DbError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DomainError {
    #[error("Black hole not found: {id}")]
    NotFound { id: i32 },

    #[error("Validation failed: {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Database error: {message}")]
    Database { message: String },
}

impl DomainError {
    pub fn not_found(id: i32) -> Self {
        Self::NotFound { id }
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn storage_unavailable(message: impl Into<String>) -> Self {
        Self::StorageUnavailable {
            message: message.into(),
        }
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database {
            message: message.into(),
        }
    }

    /// Classify a repository failure. Connection failures surface as
    /// [`DbError::Unavailable`] somewhere in the chain.
    pub fn from_repo(err: anyhow::Error) -> Self {
        match err.downcast_ref::<DbError>() {
            Some(DbError::Unavailable(reason)) => Self::storage_unavailable(reason.clone()),
            _ => Self::database(format!("{err:#}")),
        }
    }
}

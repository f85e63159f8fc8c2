// src/error/types.rs
use crate::domain::DomainError;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    #[error("Pool error: {0}")]
    Pool(String),

    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Catalog returned status {0}")]
    HttpStatus(u16),

    #[error("No API key configured")]
    MissingApiKey,

    #[error("Unknown uri: {0}")]
    UnknownUri(String),

    #[error("Operation not supported on uri: {0}")]
    UnsupportedRoute(String),

    #[error("Failed to insert row into {0}")]
    InsertFailed(String),

    #[error("Unknown column: {0}")]
    UnknownColumn(String),

    #[error("Resource not found")]
    NotFound,

    #[error("Other error: {0}")]
    Other(String),
}

impl AppError {
    /// Transport-level failure (no connectivity, bad status, timeout)
    pub fn is_network(&self) -> bool {
        matches!(self, AppError::Http(_) | AppError::HttpStatus(_))
    }

    /// Persistence-side failure, including façade routing errors
    pub fn is_storage(&self) -> bool {
        matches!(
            self,
            AppError::Database(_)
                | AppError::Pool(_)
                | AppError::UnknownUri(_)
                | AppError::UnsupportedRoute(_)
                | AppError::InsertFailed(_)
                | AppError::UnknownColumn(_)
        )
    }
}

impl Serialize for AppError {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl From<r2d2::Error> for AppError {
    fn from(err: r2d2::Error) -> Self {
        AppError::Pool(err.to_string())
    }
}

impl From<chrono::ParseError> for AppError {
    fn from(err: chrono::ParseError) -> Self {
        AppError::Other(format!("Date parse error: {}", err))
    }
}

impl From<tokio::task::JoinError> for AppError {
    fn from(err: tokio::task::JoinError) -> Self {
        AppError::Other(format!("Background task failed: {}", err))
    }
}

pub type AppResult<T> = Result<T, AppError>;

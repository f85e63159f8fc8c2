// src/domain/mod.rs
//
// Domain root: movie records and favorites
//
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod content_values;
pub mod detail;
pub mod favorite;
pub mod movie;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

pub use content_values::ContentValues;
pub use detail::{MovieDetail, Review, Video, GENRE_SEPARATOR};
pub use favorite::{validate_favorite, Favorite};
pub use movie::{MovieSummary, SortOrder};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

use super::entity::Favorite;
use crate::domain::{DomainError, DomainResult};

/// Validates the rules a favorite must satisfy before it is written
pub fn validate_favorite(favorite: &Favorite) -> DomainResult<()> {
    validate_movie_id(favorite.movie.id)?;
    validate_title(&favorite.movie.title)?;
    Ok(())
}

fn validate_movie_id(movie_id: i64) -> DomainResult<()> {
    if movie_id <= 0 {
        return Err(DomainError::InvariantViolation(format!(
            "Movie id must be positive, got {}",
            movie_id
        )));
    }
    Ok(())
}

/// The store declares the title NOT NULL; an empty title is rejected earlier
fn validate_title(title: &str) -> DomainResult<()> {
    if title.trim().is_empty() {
        return Err(DomainError::InvariantViolation(
            "Favorite title cannot be empty".to_string(),
        ));
    }
    Ok(())
}

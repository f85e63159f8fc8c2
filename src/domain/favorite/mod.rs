pub mod entity;
pub mod invariants;

pub use entity::Favorite;
pub use invariants::validate_favorite;

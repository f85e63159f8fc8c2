pub mod entity;

pub use entity::{MovieSummary, SortOrder};

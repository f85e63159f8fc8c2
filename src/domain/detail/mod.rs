pub mod entity;

pub use entity::{MovieDetail, Review, Video, GENRE_SEPARATOR};

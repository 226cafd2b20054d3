pub mod config;
pub mod listing;
pub mod utils;

pub use listing::{FilmFilter, SortBy, SortOrder};

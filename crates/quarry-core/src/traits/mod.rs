//! Core traits for quarry collaborators.

mod converter;
mod searcher;

pub use converter::*;
pub use searcher::*;

//! Core types for quarry.

mod container;
mod content;
mod result;
mod visitable;

pub use container::*;
pub use content::*;
pub use result::*;
pub use visitable::*;

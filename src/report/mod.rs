//! Diagnostic report module
//!
//! The per-run report structure, the console summary block, and JSON
//! serialization to a timestamped file.

mod model;
mod summary;
mod writer;

pub use model::*;
pub use writer::*;

//! Diagnostic engine module

mod engine;

pub use engine::*;

//! System probing module
//!
//! Provides OS-counter collection, platform-specific hardware inventory
//! via external commands, and timed resource sampling.

mod inventory;
mod probes;
mod sampling;

pub use inventory::*;
pub use probes::*;
pub use sampling::*;

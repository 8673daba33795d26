//! CLI commands - thin wrappers over the core services

mod calculate;
mod leads;
mod listings;

pub use calculate::*;
pub use leads::*;
pub use listings::*;

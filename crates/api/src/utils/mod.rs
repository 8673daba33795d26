//! Utility helpers for the CLI layer

pub mod logging;
pub mod render;

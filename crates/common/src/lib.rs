//! Common utilities shared across Abacus crates.
//!
//! Currently this is the field validation framework used by the calculator's
//! contact step. It has no knowledge of the calculator domain: validators are
//! generic over the value they check and report errors keyed by field name.

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod validation;

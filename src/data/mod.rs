//! Test-problem construction.

pub mod problem;

pub use problem::*;

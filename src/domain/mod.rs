//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - run configuration (`CompareConfig`, `CheckConfig`)
//! - strategy and method enums with display names
//! - result records (`SolveOutcome`, `StrategyStats`, `FactorReport`, ...)

pub mod types;

pub use types::*;

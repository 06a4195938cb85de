//! Input/output helpers.
//!
//! - result exports (CSV/JSON) (`export`)

pub mod export;

pub use export::*;

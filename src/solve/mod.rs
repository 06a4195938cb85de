//! Least-squares solving and comparison.
//!
//! Responsibilities:
//!
//! - solve min ‖Ax − b‖ with each comparison strategy
//! - compute problem conditioning and factorization quality diagnostics
//! - fan independent noisy trials out (parallel) and aggregate accuracy

pub mod compare;
pub mod diagnostics;
pub mod strategies;

pub use compare::*;
pub use diagnostics::*;
pub use strategies::*;

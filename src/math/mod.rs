//! Mathematical core: QR factorizations of tall dense matrices.
//!
//! Matrices are `nalgebra::DMatrix<f64>` (column-major). Inputs are taken by
//! reference and never mutated; both routines work on internal copies and
//! return freshly allocated factors.

pub mod house;
pub mod mgs;
pub mod qr;

pub use house::*;
pub use mgs::*;
pub use qr::*;

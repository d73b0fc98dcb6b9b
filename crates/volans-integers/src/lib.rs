//! # volans-integers
//!
//! Small-value-optimised arbitrary precision integers for the Volans
//! sparse-polynomial kernel.
//!
//! The central type is [`SmallInt`], a signed integer that keeps its value
//! in two fixed-size machine limbs for as long as it fits and promotes
//! transparently to a heap-allocated `dashu` big integer once an operation
//! overflows the inline envelope. Coefficients and exponents of polynomial
//! terms are overwhelmingly small in practice, so the inline fast path
//! carries almost all of the arithmetic load.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod small_int;
mod static_int;

#[cfg(test)]
mod proptests;

pub use small_int::{Integer, SmallInt};

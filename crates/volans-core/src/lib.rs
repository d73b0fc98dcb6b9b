//! # volans-core
//!
//! Shared foundations for the Volans sparse-polynomial kernel.
//!
//! This crate provides:
//! - The kernel-wide [`Error`] type and [`Result`] alias
//! - Bit-level helpers used by the integer and table crates

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod bits;
pub mod error;

pub use error::{Error, Result};

//! # volans-table
//!
//! A hopscotch hash table, the primary container for polynomial terms in
//! the Volans kernel.
//!
//! [`HopTable`] stores unique keys in a flat bucket array. Every key lives
//! within a fixed-width window (the *virtual bucket*) of the bucket its hash
//! selects, so lookups scan at most a machine word's worth of offsets, gated
//! by a per-bucket bitmap. Insertions displace keys backwards to drag a free
//! slot into the window before giving up and resizing, which keeps lookup
//! cost flat at load factors where plain linear probing degrades.
//!
//! The table is not thread-safe; sharing across threads is the caller's
//! problem.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![deny(unsafe_op_in_unsafe_fn)]
#![warn(clippy::undocumented_unsafe_blocks)]

mod bucket;
pub mod hop_table;
mod sizes;

#[cfg(test)]
mod proptests;

pub use hop_table::{DefaultHashBuilder, HopTable, IntoIter, Iter};

//! # Volans
//!
//! A computer-algebra kernel for sparse multivariate polynomials.
//!
//! Two components carry the engineering weight:
//!
//! - **Hopscotch hash table** ([`HopTable`]): the primary container for
//!   polynomial terms, with near-O(1) lookup at high load factors over tens
//!   of millions of entries.
//! - **Small-value-optimised integers** ([`SmallInt`]): coefficients and
//!   exponents that stay in two machine limbs on the stack until an
//!   operation genuinely needs arbitrary precision.
//!
//! The polynomial layer in [`poly`] wires the two together: terms keyed by
//! monomial in a hopscotch table, coefficients folded in place through the
//! integer fused multiply-add.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub use volans_core as core;
pub use volans_integers as integers;
pub use volans_poly as poly;
pub use volans_table as table;

pub use volans_core::{Error, Result};
pub use volans_integers::{Integer, SmallInt};
pub use volans_table::HopTable;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use volans_core::{Error, Result};
    pub use volans_integers::{Integer, SmallInt};
    pub use volans_poly::{Monomial, Polynomial, Term};
    pub use volans_table::HopTable;
}

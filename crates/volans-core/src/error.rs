//! Kernel-wide error type.
//!
//! Every fallible operation in the kernel surfaces one of the variants
//! below; arithmetic overflow of the inline integer representation is
//! recovered internally by promotion and only escapes through the native
//! integer conversions.

use thiserror::Error;

/// Errors produced by the kernel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Error {
    /// A malformed or out-of-domain argument (non-finite float, bad decimal
    /// string, mismatched symbol-set sizes).
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    /// A result does not fit the requested representation.
    #[error("overflow: {0}")]
    Overflow(&'static str),

    /// Division by zero, or a bucket index request on a table with zero
    /// buckets.
    #[error("zero division: {0}")]
    ZeroDivision(&'static str),

    /// A container cannot grow any further.
    #[error("allocation failure: {0}")]
    AllocationFailure(&'static str),
}

/// Convenience alias used across the kernel crates.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = Error::ZeroDivision("integer division by zero");
        assert_eq!(err.to_string(), "zero division: integer division by zero");
    }
}

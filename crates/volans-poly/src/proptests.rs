//! Property-based tests for the polynomial adapters.

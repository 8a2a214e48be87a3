//! Unit tests for the record store boundary, cache, and collections.

mod instrumented_tests;
pub(crate) mod support;

//! Shared test fixtures.


pub(crate) use fixtures::*;

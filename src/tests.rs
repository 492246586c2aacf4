//! Shared helpers for unit and integration tests.

pub mod util;

//! Testing utilities
//!
//! Recorded upstream payloads for exercising the normalizers and mock
//! upstream servers without live network access.

pub mod fixtures;

pub use fixtures::*;

//! Consolidated test utilities for clearnav
//!
//! Integration tests run the real binary against a stub cleartool script,
//! so every test exercises the full pipeline from argument parsing through
//! subprocess handling to console output.

pub mod stub;

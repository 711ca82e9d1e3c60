//! Spatial bookkeeping outside the neural model.
//!
//! This module provides:
//! - Coverage map of visit counts used to bias exploration

mod coverage;

pub use coverage::CoverageMap;

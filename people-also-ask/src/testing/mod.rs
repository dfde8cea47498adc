//! Testing utilities.
//!
//! This module provides:
//! - Canonical result pages for every answer shape
//! - An in-memory fetch collaborator that records its calls

pub mod fixtures;
mod mocks;

pub use mocks::StaticFetcher;

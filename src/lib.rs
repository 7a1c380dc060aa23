//! Exhaustive build optimizer: enumerates every legal combination of
//! abilities, lines and modifiers and returns the highest-scoring build.

pub mod catalog;
pub mod cli;
pub mod combinatorics;
pub mod config;
pub mod data;
pub mod error;
pub mod optimizer;
pub mod parallel;
pub mod scoring;

pub use error::{OptimizerError, Result};
pub use optimizer::{Optimizer, SearchOptions};

//! Lazy combination generators and their closed-form counts.
//!
//! Everything here is pull-based: search spaces can reach billions of points, so
//! nothing in this module collects its output.

pub mod chunk;
pub mod combinations;
pub mod count;
pub mod grouped;

pub use chunk::chunks;
pub use combinations::{combinations, Combinations};
pub use count::{combination_count, grouped_combination_count};
pub use grouped::{grouped_combinations, GroupedCombinations};

pub mod damage;
pub mod passive;
pub mod stacking;

pub use damage::{score, score_with_stacking};
pub use passive::{passive_uplift, stat_to_damage, LineCounts};
pub use stacking::ModifierStacking;

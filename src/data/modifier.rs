use serde::{Deserialize, Serialize};

use crate::data::ability::TargetShape;

/// Damage category a modifier scales.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ModifierTarget {
    Critical,
    Aoe,
    Single,
    Direct,
    Dot,
    OffBalance,
}

impl ModifierTarget {
    pub const ALL: [ModifierTarget; 6] = [
        Self::Critical,
        Self::Aoe,
        Self::Single,
        Self::Direct,
        Self::Dot,
        Self::OffBalance,
    ];

    pub const fn index(self) -> usize {
        match self {
            Self::Critical => 0,
            Self::Aoe => 1,
            Self::Single => 2,
            Self::Direct => 3,
            Self::Dot => 4,
            Self::OffBalance => 5,
        }
    }
}

impl From<TargetShape> for ModifierTarget {
    fn from(shape: TargetShape) -> Self {
        match shape {
            TargetShape::Single => Self::Single,
            TargetShape::Aoe => Self::Aoe,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Modifier {
    pub name: String,
    /// Fractional bonus per stack (0.05 = +5%).
    pub value: f64,
    pub max_level: u32,
    pub affects: ModifierTarget,
}

impl Modifier {
    /// Contribution at full stacks.
    pub fn stacked_value(&self) -> f64 {
        self.value * f64::from(self.max_level)
    }
}

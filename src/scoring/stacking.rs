use crate::data::{Modifier, ModifierTarget};

/// Summed full-stack modifier value per damage category.
///
/// Built once per modifier set; a damage value composes as
/// `base * (1 + Σ totals over the matching categories)`.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ModifierStacking {
    totals: [f64; ModifierTarget::ALL.len()],
}

impl ModifierStacking {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_modifiers<'a, I>(modifiers: I) -> Self
    where
        I: IntoIterator<Item = &'a Modifier>,
    {
        let mut stacking = Self::new();
        stacking.add_many(modifiers);
        stacking
    }

    pub fn add(&mut self, modifier: &Modifier) {
        self.totals[modifier.affects.index()] += modifier.stacked_value();
    }

    pub fn add_many<'a, I>(&mut self, modifiers: I)
    where
        I: IntoIterator<Item = &'a Modifier>,
    {
        for modifier in modifiers {
            self.add(modifier);
        }
    }

    pub fn total_for(&self, target: ModifierTarget) -> f64 {
        self.totals[target.index()]
    }

    /// `1 + Σ` over `targets`. Pass each category once; duplicates count twice.
    pub fn multiplier(&self, targets: &[ModifierTarget]) -> f64 {
        1.0 + targets.iter().map(|&t| self.total_for(t)).sum::<f64>()
    }
}

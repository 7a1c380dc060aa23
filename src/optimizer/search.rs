//! Exhaustive enumeration of candidate builds.
//!
//! The nesting is fixed: modifier set, then line selection, then the slotted
//! abilities. Every level is pulled lazily, so at most one candidate is alive
//! besides the incumbent best.

use crate::catalog::AbilityCatalog;
use crate::combinatorics::grouped_combinations;
use crate::config::ScoringSettings;
use crate::data::{AbilityDefinition, BuildConstraints, Modifier};
use crate::error::BuildError;
use crate::optimizer::build::Build;
use crate::optimizer::space::LineSpace;
use crate::parallel::{CancellationToken, ProgressEvent, ProgressReporter};
use crate::scoring::ModifierStacking;

/// Caller-facing knobs of a search.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchOptions {
    /// Only category-line sets containing a line of this category are visited.
    pub required_category: Option<String>,
    /// Log progress through `tracing` when no other reporter is given.
    pub verbose: bool,
    /// Modifier names every candidate must carry.
    pub forced_modifiers: Vec<String>,
    /// Evaluations between progress events; 0 disables them.
    pub progress_interval: u64,
}

/// Where a search reports to and when it should stop.
#[derive(Clone, Copy)]
pub struct SearchContext<'r> {
    pub worker_id: usize,
    pub progress: &'r dyn ProgressReporter,
    pub progress_interval: u64,
    pub cancel: &'r CancellationToken,
}

impl<'r> SearchContext<'r> {
    pub fn new(progress: &'r dyn ProgressReporter, cancel: &'r CancellationToken) -> Self {
        Self {
            worker_id: 0,
            progress,
            progress_interval: 0,
            cancel,
        }
    }

    pub fn worker(mut self, worker_id: usize) -> Self {
        self.worker_id = worker_id;
        self
    }

    pub fn every(mut self, progress_interval: u64) -> Self {
        self.progress_interval = progress_interval;
        self
    }

    fn report(&self, evaluated_count: u64, best: Option<&Build<'_>>) {
        self.progress.report(&ProgressEvent {
            worker_id: self.worker_id,
            evaluated_count,
            current_best_score: best.map(Build::total_score),
        });
    }
}

impl std::fmt::Debug for SearchContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchContext")
            .field("worker_id", &self.worker_id)
            .field("progress_interval", &self.progress_interval)
            .field("cancelled", &self.cancel.is_cancelled())
            .finish()
    }
}

#[derive(Debug, Clone)]
pub struct SearchOutcome<'a> {
    pub best: Option<Build<'a>>,
    pub evaluated: u64,
    pub cancelled: bool,
}

/// Enumerates and scores candidates over a fixed catalog and line space.
#[derive(Debug, Clone, Copy)]
pub struct Searcher<'a> {
    pub catalog: &'a AbilityCatalog,
    pub lines: &'a LineSpace,
    pub constraints: &'a BuildConstraints,
    pub scoring: &'a ScoringSettings,
    pub required_category: Option<&'a str>,
}

fn base_key<'a>(ability: &&'a AbilityDefinition) -> &'a str {
    &ability.base_ability
}

impl<'a> Searcher<'a> {
    /// Score every candidate built from `modifier_sets`, keeping the first best.
    pub fn run<I>(&self, modifier_sets: I, context: SearchContext<'_>) -> Result<SearchOutcome<'a>, BuildError>
    where
        I: IntoIterator<Item = Vec<&'a Modifier>>,
    {
        let mut best: Option<Build<'a>> = None;
        let mut evaluated: u64 = 0;

        for modifiers in modifier_sets {
            let stacking = ModifierStacking::from_modifiers(modifiers.iter().copied());
            for selection in self.lines.selections(self.constraints, self.required_category) {
                let pool = selection.ability_pool(self.catalog);
                let passives = self.catalog.passives_for_lines(&selection.lines());
                tracing::debug!(
                    worker = context.worker_id,
                    category_lines = ?selection.category_lines,
                    weapon_lines = ?selection.weapon_lines,
                    pool = pool.len(),
                    "entering line selection"
                );

                for abilities in grouped_combinations(&pool, self.constraints.max_abilities, base_key) {
                    if context.cancel.is_cancelled() {
                        return Ok(SearchOutcome {
                            best,
                            evaluated,
                            cancelled: true,
                        });
                    }

                    let build = Build::with_stacking(
                        abilities,
                        modifiers.clone(),
                        &stacking,
                        &passives,
                        self.constraints,
                        self.scoring,
                    )?;
                    evaluated += 1;

                    if build.is_better_than(best.as_ref()) {
                        tracing::trace!(score = build.total_score(), evaluated, "new best build");
                        best = Some(build);
                    }
                    if context.progress_interval > 0 && evaluated % context.progress_interval == 0 {
                        context.report(evaluated, best.as_ref());
                    }
                }
            }
        }

        Ok(SearchOutcome {
            best,
            evaluated,
            cancelled: false,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{
        DamageElement, DamageProfile, Hit, ModifierTarget, Resource, TargetShape,
    };
    use crate::parallel::NoProgress;
    use std::sync::Mutex;

    fn best<'a, I>(searcher: &Searcher<'a>, modifier_sets: I) -> Option<Build<'a>>
    where
        I: IntoIterator<Item = Vec<&'a Modifier>>,
    {
        let cancel = CancellationToken::new();
        searcher
            .run(modifier_sets, SearchContext::new(&NoProgress, &cancel))
            .expect("search")
            .best
    }

    fn ability(name: &str, base: &str, category: &str, line: &str, hit: f64) -> AbilityDefinition {
        AbilityDefinition {
            name: name.to_string(),
            base_ability: base.to_string(),
            category: category.to_string(),
            line: line.to_string(),
            damage: DamageProfile {
                hits: vec![Hit { value: hit, delay: None }],
                dots: vec![],
            },
            element: DamageElement::Shock,
            target: TargetShape::Single,
            resource: Resource::Magicka,
            channel_time: None,
        }
    }

    fn catalog() -> AbilityCatalog {
        AbilityCatalog::new(
            vec![
                ability("Crystal Fragments", "Crystal Shard", "sorcerer", "dark-magic", 300.0),
                ability("Crystal Weapon", "Crystal Shard", "sorcerer", "dark-magic", 250.0),
                ability("Daedric Tomb", "Daedric Mines", "sorcerer", "daedric-summoning", 200.0),
                ability("Force Pulse", "Force Shock", "weapon", "destruction-staff", 150.0),
                ability("Mystic Orb", "Necrotic Orb", "weapon", "restoration-staff", 50.0),
            ],
            vec![],
        )
    }

    fn constraints() -> BuildConstraints {
        BuildConstraints {
            max_abilities: 2,
            max_modifiers: 1,
            max_category_lines: 1,
            max_weapon_lines: 1,
        }
    }

    #[derive(Default)]
    struct Recorder(Mutex<Vec<u64>>);

    impl ProgressReporter for Recorder {
        fn report(&self, event: &ProgressEvent) {
            if let Ok(mut seen) = self.0.lock() {
                seen.push(event.evaluated_count);
            }
        }
    }

    #[test]
    fn finds_highest_scoring_pair() {
        let catalog = catalog();
        let lines = LineSpace::from_catalog(&catalog);
        let constraints = constraints();
        let scoring = ScoringSettings::default();
        let searcher = Searcher {
            catalog: &catalog,
            lines: &lines,
            constraints: &constraints,
            scoring: &scoring,
            required_category: None,
        };
        let best = best(&searcher, [Vec::new()]).expect("a build");
        let names: Vec<&str> = best.abilities().iter().map(|a| a.name.as_str()).collect();
        assert_eq!(names, vec!["Crystal Fragments", "Force Pulse"]);
        assert_eq!(best.total_score(), 450.0);
    }

    #[test]
    fn counts_every_candidate_and_reports_on_interval() {
        let catalog = catalog();
        let lines = LineSpace::from_catalog(&catalog);
        let constraints = constraints();
        let scoring = ScoringSettings::default();
        let modifier = Modifier {
            name: "Minor Vulnerability".to_string(),
            value: 0.05,
            max_level: 1,
            affects: ModifierTarget::Single,
        };
        let searcher = Searcher {
            catalog: &catalog,
            lines: &lines,
            constraints: &constraints,
            scoring: &scoring,
            required_category: None,
        };
        let recorder = Recorder::default();
        let cancel = CancellationToken::new();
        let outcome = searcher
            .run(
                [vec![&modifier]],
                SearchContext::new(&recorder, &cancel).worker(4).every(2),
            )
            .expect("search");

        // dark-magic: 2 morphs x 2 staves = 4 pairs; daedric-summoning: 1 x 2 = 2.
        assert_eq!(outcome.evaluated, 6);
        assert!(!outcome.cancelled);
        let seen = recorder.0.lock().expect("lock").clone();
        assert_eq!(seen, vec![2, 4, 6]);
    }

    #[test]
    fn cancelled_token_stops_before_first_candidate() {
        let catalog = catalog();
        let lines = LineSpace::from_catalog(&catalog);
        let constraints = constraints();
        let scoring = ScoringSettings::default();
        let searcher = Searcher {
            catalog: &catalog,
            lines: &lines,
            constraints: &constraints,
            scoring: &scoring,
            required_category: None,
        };
        let cancel = CancellationToken::new();
        cancel.cancel();
        let outcome = searcher
            .run([Vec::new()], SearchContext::new(&NoProgress, &cancel))
            .expect("search");
        assert!(outcome.cancelled);
        assert_eq!(outcome.evaluated, 0);
        assert!(outcome.best.is_none());
    }

    #[test]
    fn no_modifier_sets_means_no_candidates() {
        let catalog = catalog();
        let lines = LineSpace::from_catalog(&catalog);
        let constraints = constraints();
        let scoring = ScoringSettings::default();
        let searcher = Searcher {
            catalog: &catalog,
            lines: &lines,
            constraints: &constraints,
            scoring: &scoring,
            required_category: None,
        };
        assert!(best(&searcher, std::iter::empty()).is_none());
    }
}

//! Search orchestration over a loaded catalog.
//!
//! [Optimizer] owns the catalog and runs either a single-threaded exhaustive
//! search or the same enumeration split across rayon workers. Both paths visit
//! candidates in the same order and agree on the winner.

pub mod build;
pub mod ranking;
pub mod search;
pub mod space;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use rayon::prelude::*;

use crate::catalog::{AbilityCatalog, AbilityFilter};
use crate::combinatorics::{chunks, combinations};
use crate::config::{ScoringSettings, Settings};
use crate::data::{AbilityDefinition, BuildConstraints, GameData, Modifier};
use crate::error::{DataError, OptimizerError, Result};
use crate::optimizer::build::{Build, BuildSummary};
use crate::optimizer::ranking::merge_worker_responses;
use crate::optimizer::search::{SearchContext, SearchOutcome, Searcher};
use crate::optimizer::space::LineSpace;
use crate::parallel::{
    auto_batch_size, evaluate_batch, CancellationToken, LogProgress, NoProgress,
    ProgressReporter, WorkerPool, WorkerRequest, WorkerResponse,
};

pub use search::SearchOptions;

/// The modifier dimension of one search: forced picks plus combinations of the rest.
#[derive(Debug, Clone)]
pub struct ModifierPlan<'a> {
    pub forced: Vec<&'a Modifier>,
    pub free: Vec<&'a Modifier>,
    pub open_slots: usize,
}

impl<'a> ModifierPlan<'a> {
    /// Every modifier set in enumeration order, forced modifiers first in each.
    pub fn sets<'p>(&'p self) -> impl Iterator<Item = Vec<&'a Modifier>> + 'p {
        combinations(&self.free, self.open_slots).map(move |picked| {
            let mut set = self.forced.clone();
            set.extend(picked);
            set
        })
    }
}

enum CategoryFilter<'a> {
    Any,
    Only(&'a str),
    Unknown,
}

#[derive(Debug, Clone)]
pub struct Optimizer {
    catalog: AbilityCatalog,
    modifiers: Vec<Modifier>,
    constraints: BuildConstraints,
    scoring: ScoringSettings,
    lines: LineSpace,
    /// Modifier sets per worker request; 0 spreads them evenly over the pool.
    batch_size: usize,
}

impl Optimizer {
    pub fn new(data: GameData, scoring: ScoringSettings) -> Self {
        let catalog = AbilityCatalog::new(data.abilities, data.passives);
        let lines = LineSpace::from_catalog(&catalog);
        Self {
            catalog,
            modifiers: data.modifiers,
            constraints: data.constraints,
            scoring,
            lines,
            batch_size: 0,
        }
    }

    pub fn from_settings(data: GameData, settings: &Settings) -> Self {
        Self::new(data, settings.scoring.clone()).with_batch_size(settings.batch_size)
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size;
        self
    }

    pub fn catalog(&self) -> &AbilityCatalog {
        &self.catalog
    }

    pub fn modifiers(&self) -> &[Modifier] {
        &self.modifiers
    }

    pub fn constraints(&self) -> &BuildConstraints {
        &self.constraints
    }

    pub fn scoring(&self) -> &ScoringSettings {
        &self.scoring
    }

    pub fn lines(&self) -> &LineSpace {
        &self.lines
    }

    /// Splits the modifier pool into forced and free picks.
    ///
    /// Unknown forced names are logged and skipped.
    pub fn modifier_plan(&self, options: &SearchOptions) -> Result<ModifierPlan<'_>> {
        let mut forced: Vec<&Modifier> = Vec::new();
        for name in &options.forced_modifiers {
            match self.modifiers.iter().find(|m| &m.name == name) {
                Some(modifier) if !forced.iter().any(|f| f.name == modifier.name) => forced.push(modifier),
                Some(_) => {}
                None => tracing::warn!(modifier = %name, "ignoring unknown forced modifier"),
            }
        }
        if forced.len() > self.constraints.max_modifiers {
            return Err(OptimizerError::TooManyForcedModifiers {
                count: forced.len(),
                max: self.constraints.max_modifiers,
            });
        }

        let free = self
            .modifiers
            .iter()
            .filter(|m| !forced.iter().any(|f| f.name == m.name))
            .collect();
        Ok(ModifierPlan {
            open_slots: self.constraints.max_modifiers - forced.len(),
            forced,
            free,
        })
    }

    fn category_filter<'a>(&'a self, options: &SearchOptions) -> CategoryFilter<'a> {
        let Some(required) = options.required_category.as_deref() else {
            return CategoryFilter::Any;
        };
        match self.lines.category_lines.iter().find(|c| c.category == required) {
            Some(line) => CategoryFilter::Only(&line.category),
            None => {
                tracing::warn!(category = %required, "no category lines for required category");
                CategoryFilter::Unknown
            }
        }
    }

    /// Total candidates a search with `options` would score.
    pub fn estimate_search_space(&self, options: &SearchOptions) -> Result<u128> {
        let plan = self.modifier_plan(options)?;
        let required = match self.category_filter(options) {
            CategoryFilter::Any => None,
            CategoryFilter::Only(category) => Some(category),
            CategoryFilter::Unknown => return Ok(0),
        };
        Ok(space::estimate_search_space(
            &self.catalog,
            &self.lines,
            &self.constraints,
            required,
            plan.free.len(),
            plan.open_slots,
        ))
    }

    fn reporter_for(&self, options: &SearchOptions) -> Result<Box<dyn ProgressReporter>> {
        if options.verbose {
            Ok(Box::new(LogProgress {
                total: Some(self.estimate_search_space(options)?),
            }))
        } else {
            Ok(Box::new(NoProgress))
        }
    }

    /// Best build by exhaustive single-threaded search, or `None` if no
    /// candidate scores above zero.
    pub fn find_optimal_build(&self, options: &SearchOptions) -> Result<Option<Build<'_>>> {
        let reporter = self.reporter_for(options)?;
        let outcome = self.search(options, &*reporter, &CancellationToken::new())?;
        Ok(outcome.best)
    }

    pub fn search(
        &self,
        options: &SearchOptions,
        progress: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome<'_>> {
        let plan = self.modifier_plan(options)?;
        let required_category = match self.category_filter(options) {
            CategoryFilter::Any => None,
            CategoryFilter::Only(category) => Some(category),
            CategoryFilter::Unknown => return Ok(empty_outcome(cancel)),
        };
        let searcher = Searcher {
            catalog: &self.catalog,
            lines: &self.lines,
            constraints: &self.constraints,
            scoring: &self.scoring,
            required_category,
        };

        tracing::info!(
            forced = plan.forced.len(),
            free = plan.free.len(),
            category = ?required_category,
            "starting exhaustive search"
        );
        let context = SearchContext::new(progress, cancel).every(options.progress_interval);
        let outcome = searcher.run(plan.sets(), context)?;
        tracing::info!(
            evaluated = outcome.evaluated,
            cancelled = outcome.cancelled,
            best = ?outcome.best.as_ref().map(Build::total_score),
            "search finished"
        );
        Ok(outcome)
    }

    /// Parallel counterpart of [Optimizer::find_optimal_build]; returns the same build.
    pub fn find_optimal_build_parallel(
        &self,
        options: &SearchOptions,
        pool: &WorkerPool,
    ) -> Result<Option<Build<'_>>> {
        let reporter = self.reporter_for(options)?;
        let outcome = self.search_parallel(options, pool, &*reporter, &CancellationToken::new())?;
        Ok(outcome.best)
    }

    pub fn search_parallel(
        &self,
        options: &SearchOptions,
        pool: &WorkerPool,
        progress: &dyn ProgressReporter,
        cancel: &CancellationToken,
    ) -> Result<SearchOutcome<'_>> {
        let plan = self.modifier_plan(options)?;
        if let CategoryFilter::Unknown = self.category_filter(options) {
            return Ok(empty_outcome(cancel));
        }
        let sets: Vec<Vec<&Modifier>> = plan.sets().collect();
        let batch_size = match self.batch_size {
            0 => auto_batch_size(sets.len(), pool.effective_workers()),
            size => size,
        };
        let batches = chunks(&sets, batch_size)?;
        let allowed_abilities: Vec<AbilityDefinition> = self
            .catalog
            .abilities()
            .iter()
            .filter(|ability| AbilityFilter::SEARCH.accepts(ability))
            .cloned()
            .collect();
        tracing::info!(
            requests = sets.len().div_ceil(batch_size),
            workers = pool.effective_workers(),
            "starting parallel search"
        );

        // Requests are built as workers pick up batches, so only in-flight ones are held.
        let results: Vec<Result<WorkerResponse>> = pool.install(|| {
            batches
                .enumerate()
                .par_bridge()
                .map(|(worker_id, batch)| {
                    let request = self.worker_request(worker_id, batch, &allowed_abilities, options);
                    run_worker(&request, progress, cancel)
                })
                .collect()
        })?;
        let responses = results.into_iter().collect::<Result<Vec<_>>>()?;
        let merged = merge_worker_responses(responses);

        let best = merged
            .best
            .as_ref()
            .map(|summary| self.rebuild(summary))
            .transpose()?;
        tracing::info!(
            evaluated = merged.evaluated_count,
            winner = ?merged.winner,
            best = ?best.as_ref().map(Build::total_score),
            "parallel search finished"
        );
        Ok(SearchOutcome {
            best,
            evaluated: merged.evaluated_count,
            cancelled: cancel.is_cancelled(),
        })
    }

    /// Owned request for one contiguous batch of modifier sets.
    pub fn worker_request(
        &self,
        worker_id: usize,
        batch: &[Vec<&Modifier>],
        allowed_abilities: &[AbilityDefinition],
        options: &SearchOptions,
    ) -> WorkerRequest {
        WorkerRequest {
            worker_id,
            modifier_batches: batch
                .iter()
                .map(|set| set.iter().map(|&modifier| modifier.clone()).collect())
                .collect(),
            allowed_abilities: allowed_abilities.to_vec(),
            passives: self.catalog.passives().to_vec(),
            lines: self.lines.clone(),
            constraints: self.constraints,
            scoring: self.scoring.clone(),
            required_category: options.required_category.clone(),
            progress_interval: options.progress_interval,
        }
    }

    /// Resolve a summary's ability keys and modifier names back into a scored build.
    pub fn rebuild(&self, summary: &BuildSummary) -> Result<Build<'_>> {
        let abilities = summary
            .ability_keys
            .iter()
            .map(|key| {
                self.catalog
                    .ability_by_key(key)
                    .ok_or_else(|| DataError::UnknownAbility(key.name.clone()))
            })
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let modifiers = self.lookup_modifiers(&summary.modifiers)?;
        let passives: Vec<_> = self
            .catalog
            .passives()
            .iter()
            .filter(|passive| summary.passives.contains(&passive.name))
            .collect();
        Ok(Build::new(abilities, modifiers, &passives, &self.constraints, &self.scoring)?)
    }

    /// Score a hand-picked build, with the passives of its lines.
    pub fn score_build(&self, ability_names: &[String], modifier_names: &[String]) -> Result<Build<'_>> {
        let abilities = ability_names
            .iter()
            .map(|name| self.catalog.ability_named(name))
            .collect::<std::result::Result<Vec<_>, _>>()?;
        let modifiers = self.lookup_modifiers(modifier_names)?;
        Ok(Build::with_implied_passives(
            abilities,
            modifiers,
            &self.catalog,
            &self.constraints,
            &self.scoring,
        )?)
    }

    fn lookup_modifiers(&self, names: &[String]) -> Result<Vec<&Modifier>> {
        names
            .iter()
            .map(|name| {
                self.modifiers
                    .iter()
                    .find(|m| &m.name == name)
                    .ok_or_else(|| OptimizerError::from(DataError::UnknownModifier(name.clone())))
            })
            .collect()
    }
}

fn empty_outcome<'a>(cancel: &CancellationToken) -> SearchOutcome<'a> {
    SearchOutcome {
        best: None,
        evaluated: 0,
        cancelled: cancel.is_cancelled(),
    }
}

fn run_worker(
    request: &WorkerRequest,
    progress: &dyn ProgressReporter,
    cancel: &CancellationToken,
) -> Result<WorkerResponse> {
    match panic::catch_unwind(AssertUnwindSafe(|| evaluate_batch(request, progress, cancel))) {
        Ok(response) => Ok(response?),
        Err(payload) => {
            let message = panic_message(payload.as_ref());
            tracing::error!(worker = request.worker_id, %message, "worker panicked");
            Err(OptimizerError::WorkerFailed {
                worker_id: request.worker_id,
                message,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "worker panicked".to_string()
    }
}

//! Self-contained worker contract for parallel search.
//!
//! A [WorkerRequest] carries owned copies of everything a batch needs, so it
//! can be handed to any thread (or serialized to another process) without
//! borrowing from the caller.

use serde::{Deserialize, Serialize};

use crate::catalog::AbilityCatalog;
use crate::config::ScoringSettings;
use crate::data::{AbilityDefinition, BuildConstraints, Modifier, PassiveDefinition};
use crate::error::BuildError;
use crate::optimizer::build::BuildSummary;
use crate::optimizer::search::{SearchContext, Searcher};
use crate::optimizer::space::LineSpace;
use crate::parallel::{CancellationToken, ProgressReporter};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRequest {
    pub worker_id: usize,
    /// Contiguous slice of the modifier dimension, in enumeration order.
    pub modifier_batches: Vec<Vec<Modifier>>,
    pub allowed_abilities: Vec<AbilityDefinition>,
    pub passives: Vec<PassiveDefinition>,
    pub lines: LineSpace,
    pub constraints: BuildConstraints,
    pub scoring: ScoringSettings,
    pub required_category: Option<String>,
    pub progress_interval: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerResponse {
    pub worker_id: usize,
    pub best: Option<BuildSummary>,
    pub evaluated_count: u64,
}

/// Search one request's share of the space and report its local best.
pub fn evaluate_batch(
    request: &WorkerRequest,
    progress: &dyn ProgressReporter,
    cancel: &CancellationToken,
) -> Result<WorkerResponse, BuildError> {
    let catalog = AbilityCatalog::new(request.allowed_abilities.clone(), request.passives.clone());
    let searcher = Searcher {
        catalog: &catalog,
        lines: &request.lines,
        constraints: &request.constraints,
        scoring: &request.scoring,
        required_category: request.required_category.as_deref(),
    };
    let modifier_sets = request
        .modifier_batches
        .iter()
        .map(|set| set.iter().collect::<Vec<&Modifier>>());
    let context = SearchContext::new(progress, cancel)
        .worker(request.worker_id)
        .every(request.progress_interval);

    let outcome = searcher.run(modifier_sets, context)?;
    tracing::debug!(
        worker = request.worker_id,
        evaluated = outcome.evaluated,
        cancelled = outcome.cancelled,
        best = ?outcome.best.as_ref().map(|b| b.total_score()),
        "worker finished"
    );

    Ok(WorkerResponse {
        worker_id: request.worker_id,
        best: outcome.best.as_ref().map(|build| build.summary()),
        evaluated_count: outcome.evaluated,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::{DamageElement, DamageProfile, Hit, ModifierTarget, Resource, TargetShape};
    use crate::parallel::{NoProgress, ProgressEvent};
    use tokio::sync::mpsc::unbounded_channel;

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
            element: DamageElement::Poison,
            target: TargetShape::Aoe,
            resource: Resource::Stamina,
            channel_time: None,
        }
    }

    fn modifier(name: &str, value: f64) -> Modifier {
        Modifier {
            name: name.to_string(),
            value,
            max_level: 1,
            affects: ModifierTarget::Aoe,
        }
    }

    fn request(worker_id: usize, modifier_batches: Vec<Vec<Modifier>>) -> WorkerRequest {
        let abilities = vec![
            ability("Venom Arrow", "Snipe", "weapon", "bow", 400.0),
            ability("Poison Injection", "Scatter Shot", "weapon", "bow", 300.0),
            ability("Deadly Cloak", "Blade Cloak", "weapon", "dual-wield", 200.0),
        ];
        let catalog = AbilityCatalog::new(abilities.clone(), vec![]);
        WorkerRequest {
            worker_id,
            modifier_batches,
            allowed_abilities: abilities,
            passives: vec![],
            lines: LineSpace::from_catalog(&catalog),
            constraints: BuildConstraints {
                max_abilities: 2,
                max_modifiers: 1,
                max_category_lines: 0,
                max_weapon_lines: 2,
            },
            scoring: ScoringSettings::default(),
            required_category: None,
            progress_interval: 1,
        }
    }

    #[test]
    fn evaluates_own_batch_and_returns_summary() {
        let request = request(2, vec![vec![modifier("Small", 0.1)], vec![modifier("Big", 0.5)]]);
        let response = evaluate_batch(&request, &NoProgress, &CancellationToken::new()).expect("batch");

        assert_eq!(response.worker_id, 2);
        // Both weapon lines: 3 abilities, all distinct bases -> 3 pairs per modifier set.
        assert_eq!(response.evaluated_count, 6);
        let best = response.best.expect("best");
        assert_eq!(best.abilities, vec!["Venom Arrow", "Poison Injection"]);
        assert_eq!(best.modifiers, vec!["Big"]);
        assert!((best.total_score - 700.0 * 1.5).abs() < 1e-9);
    }

    #[test]
    fn streams_progress_events_with_worker_id() {
        let request = request(7, vec![vec![modifier("Small", 0.1)]]);
        let (tx, mut rx) = unbounded_channel::<ProgressEvent>();
        evaluate_batch(&request, &tx, &CancellationToken::new()).expect("batch");
        let mut counts = Vec::new();
        while let Ok(event) = rx.try_recv() {
            assert_eq!(event.worker_id, 7);
            counts.push(event.evaluated_count);
        }
        assert_eq!(counts, vec![1, 2, 3]);
    }

    #[test]
    fn empty_batch_reports_zero_evaluations() {
        let response = evaluate_batch(&request(0, vec![]), &NoProgress, &CancellationToken::new())
            .expect("batch");
        assert_eq!(response.evaluated_count, 0);
        assert!(response.best.is_none());
    }

    #[test]
    fn request_survives_json_round_trip() {
        let request = request(1, vec![vec![modifier("Small", 0.1)]]);
        let json = serde_json::to_string(&request).expect("serialize");
        let back: WorkerRequest = serde_json::from_str(&json).expect("deserialize");
        assert_eq!(back, request);
    }
}

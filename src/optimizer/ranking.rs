use crate::optimizer::build::BuildSummary;
use crate::parallel::WorkerResponse;

/// Merged result of every worker in a parallel search.
#[derive(Debug, Clone, PartialEq)]
pub struct MergedResult {
    pub best: Option<BuildSummary>,
    /// Worker whose build won, if any.
    pub winner: Option<usize>,
    pub evaluated_count: u64,
}

/// Reduce worker responses to one best build.
///
/// Highest score wins; equal scores go to the lowest `worker_id`, which is the
/// batch that comes first in enumeration order.
pub fn merge_worker_responses<I>(responses: I) -> MergedResult
where
    I: IntoIterator<Item = WorkerResponse>,
{
    let mut merged = MergedResult {
        best: None,
        winner: None,
        evaluated_count: 0,
    };

    for response in responses {
        merged.evaluated_count += response.evaluated_count;
        let Some(candidate) = response.best else {
            continue;
        };
        let replace = match (&merged.best, merged.winner) {
            (Some(current), Some(winner)) => {
                candidate.total_score > current.total_score
                    || (candidate.total_score == current.total_score && response.worker_id < winner)
            }
            _ => true,
        };
        if replace {
            merged.best = Some(candidate);
            merged.winner = Some(response.worker_id);
        }
    }

    merged
}

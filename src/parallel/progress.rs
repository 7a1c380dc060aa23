//! Progress reporting for long searches.
//!
//! Reporters are passed in explicitly by whoever starts a search; nothing here
//! holds process-wide state. Events flow one way, from search to observer.

use serde::{Deserialize, Serialize};
use tokio::sync::mpsc::UnboundedSender;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub worker_id: usize,
    pub evaluated_count: u64,
    pub current_best_score: Option<f64>,
}

pub trait ProgressReporter: Send + Sync {
    fn report(&self, event: &ProgressEvent);
}

/// Discards every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn report(&self, _event: &ProgressEvent) {}
}

/// Logs each event at info level, with a percentage when the total is known.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogProgress {
    pub total: Option<u128>,
}

impl ProgressReporter for LogProgress {
    fn report(&self, event: &ProgressEvent) {
        match self.total.filter(|total| *total > 0) {
            Some(total) => tracing::info!(
                worker = event.worker_id,
                evaluated = event.evaluated_count,
                best = ?event.current_best_score,
                "{:.1}% of {total} candidates",
                event.evaluated_count as f64 * 100.0 / total as f64
            ),
            None => tracing::info!(
                worker = event.worker_id,
                evaluated = event.evaluated_count,
                best = ?event.current_best_score,
                "search progress"
            ),
        }
    }
}

/// Forwards events to a channel. A closed receiver just drops them.
impl ProgressReporter for UnboundedSender<ProgressEvent> {
    fn report(&self, event: &ProgressEvent) {
        let _ = self.send(*event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    #[test]
    fn channel_reporter_forwards_events_in_order() {
        let (tx, mut rx) = unbounded_channel();
        for evaluated_count in [10, 20] {
            tx.report(&ProgressEvent {
                worker_id: 3,
                evaluated_count,
                current_best_score: Some(1.5),
            });
        }
        assert_eq!(rx.try_recv().map(|e| e.evaluated_count).ok(), Some(10));
        assert_eq!(rx.try_recv().map(|e| e.evaluated_count).ok(), Some(20));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn channel_reporter_ignores_closed_receiver() {
        let (tx, rx) = unbounded_channel::<ProgressEvent>();
        drop(rx);
        tx.report(&ProgressEvent {
            worker_id: 0,
            evaluated_count: 1,
            current_best_score: None,
        });
    }
}

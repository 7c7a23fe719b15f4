use crate::attractors::Behaviour;
use crate::computation::{ComputationStatus, ResultsSummary};

impl ResultsSummary {
    /// True once the computation reached a terminal status.
    pub fn is_finished(&self) -> bool {
        matches!(
            self.status,
            ComputationStatus::Completed | ComputationStatus::Failed
        )
    }

    /// Progress as a human readable percentage, e.g. `42.17%`.
    pub fn progress_percent(&self) -> String {
        format!("{:.2}%", self.progress * 100.0)
    }

    pub fn elapsed_millis(&self) -> u128 {
        self.elapsed.as_millis()
    }

    /// Number of states and behaviour of every attractor found so far.
    pub fn rows(&self) -> Vec<(f64, Behaviour)> {
        self.attractors
            .iter()
            .map(|it| (it.cardinality(), it.behaviour()))
            .collect()
    }
}

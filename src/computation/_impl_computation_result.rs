use crate::attractors::{AttractorSearch, SearchStep};
use crate::computation::{
    AnalysisConfig, ComputationResult, ComputationStatus, Driver, ResultState, ResultsSummary,
    SharedState,
};
use crate::error::ComputationError;
use crate::symbolic::SymbolicTransitionSystem;
use crate::BooleanNetwork;
use std::sync::atomic::Ordering;
use std::sync::{Arc, MutexGuard};
use std::time::Instant;

impl ComputationResult {
    /// Start the attractor search for `network` on a background thread.
    ///
    /// The network is copied, so later changes to the caller's network do not affect the
    /// computation. Fails immediately (without spawning anything) if the network is not
    /// fully specified.
    pub fn start(
        network: &BooleanNetwork,
        config: AnalysisConfig,
    ) -> Result<ComputationResult, ComputationError> {
        let search = Self::prepare(network, config)?;
        let shared = Arc::new(SharedState::new(ComputationStatus::Running));
        let worker_state = shared.clone();
        let worker = std::thread::spawn(move || run_worker(search, &worker_state));
        Ok(ComputationResult {
            shared,
            driver: Driver::Worker(Some(worker)),
        })
    }

    /// Create a handle that does not spawn any thread. The search only advances when
    /// `poll` is called.
    pub fn start_cooperative(
        network: &BooleanNetwork,
        config: AnalysisConfig,
    ) -> Result<ComputationResult, ComputationError> {
        let search = Self::prepare(network, config)?;
        Ok(ComputationResult {
            shared: Arc::new(SharedState::new(ComputationStatus::NotStarted)),
            driver: Driver::Cooperative(Some(search)),
        })
    }

    fn prepare(
        network: &BooleanNetwork,
        config: AnalysisConfig,
    ) -> Result<AttractorSearch, ComputationError> {
        let system = SymbolicTransitionSystem::new(network, config.semantics)?;
        tracing::debug!(
            variables = network.num_vars(),
            semantics = ?config.semantics,
            "Symbolic encoder built."
        );
        Ok(AttractorSearch::new(system, &config))
    }

    /// Advance a cooperative computation by one bounded step and return the new status.
    ///
    /// For a computation running on a background thread, this only reports the status.
    pub fn poll(&mut self) -> ComputationStatus {
        if let Driver::Cooperative(slot) = &mut self.driver {
            if let Some(search) = slot.as_mut() {
                let shared = &self.shared;
                let outcome = search.step(|| shared.is_cancelled());
                let progress = search.progress();
                let finished = !matches!(outcome, Ok(SearchStep::Progress | SearchStep::Found(_)));
                shared.publish(outcome, progress);
                if finished {
                    *slot = None;
                }
            }
        }
        self.shared.lock().status
    }

    /// Non-blocking snapshot of the current results.
    pub fn get_results(&self) -> ResultsSummary {
        let state = self.shared.lock();
        let end = state.finished.unwrap_or_else(Instant::now);
        ResultsSummary {
            status: state.status,
            attractors: state.attractors.clone(),
            error: state.error.clone(),
            progress: state.progress,
            elapsed: end.duration_since(self.shared.started),
        }
    }

    pub fn status(&self) -> ComputationStatus {
        self.shared.lock().status
    }

    pub fn is_cancelled(&self) -> bool {
        self.shared.is_cancelled()
    }

    /// Stop the computation. An unfinished computation becomes `Failed` with
    /// `ComputationError::Cancelled`; a finished one keeps its results.
    pub fn cancel(&mut self) {
        if self.shared.cancelled.swap(true, Ordering::SeqCst) {
            return;
        }
        {
            let mut state = self.shared.lock();
            if !matches!(
                state.status,
                ComputationStatus::Completed | ComputationStatus::Failed
            ) {
                state.fail(ComputationError::Cancelled);
                tracing::debug!("Computation cancelled.");
            }
        }
        match &mut self.driver {
            Driver::Cooperative(search) => *search = None,
            // The worker is detached. It observes the flag during its next iteration.
            Driver::Worker(handle) => drop(handle.take()),
        }
    }

    /// Block until the background worker terminates and return the final results.
    ///
    /// A cooperative computation is polled to completion instead.
    pub fn wait(mut self) -> ResultsSummary {
        match &mut self.driver {
            Driver::Worker(handle) => {
                if let Some(handle) = handle.take() {
                    if handle.join().is_err() {
                        let mut state = self.shared.lock();
                        if state.status == ComputationStatus::Running {
                            state.fail(ComputationError::ResourceLimit(
                                "Computation worker terminated unexpectedly.".to_string(),
                            ));
                        }
                    }
                }
            }
            Driver::Cooperative(_) => {
                while matches!(
                    self.poll(),
                    ComputationStatus::NotStarted | ComputationStatus::Running
                ) {}
            }
        }
        self.get_results()
    }
}

impl Drop for ComputationResult {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// **(internal)** Body of the background thread.
fn run_worker(mut search: AttractorSearch, shared: &SharedState) {
    loop {
        let outcome = search.step(|| shared.is_cancelled());
        let finished = !matches!(outcome, Ok(SearchStep::Progress | SearchStep::Found(_)));
        shared.publish(outcome, search.progress());
        if finished || shared.is_cancelled() {
            return;
        }
    }
}

impl SharedState {
    fn new(status: ComputationStatus) -> SharedState {
        SharedState {
            started: Instant::now(),
            cancelled: Default::default(),
            results: std::sync::Mutex::new(ResultState {
                status,
                attractors: Vec::new(),
                error: None,
                progress: 0.0,
                finished: None,
            }),
        }
    }

    fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::SeqCst)
    }

    /// Lock the result state. A poisoned lock still holds consistent data, since every
    /// write happens in a single critical section.
    fn lock(&self) -> MutexGuard<ResultState> {
        self.results
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Make the outcome of one search step visible, unless the computation was cancelled.
    fn publish(&self, outcome: Result<SearchStep, ComputationError>, progress: f64) {
        let mut state = self.lock();
        // Checked under the lock, so nothing is written after `cancel` returns.
        if self.is_cancelled() {
            return;
        }
        if state.status == ComputationStatus::NotStarted {
            state.status = ComputationStatus::Running;
        }
        state.progress = progress;
        match outcome {
            Ok(SearchStep::Progress) => {}
            Ok(SearchStep::Found(attractor)) => state.attractors.push(attractor),
            Ok(SearchStep::Finished) => {
                state.status = ComputationStatus::Completed;
                state.progress = 1.0;
                state.finished = Some(Instant::now());
            }
            Err(error) => state.fail(error),
        }
    }
}

impl ResultState {
    fn fail(&mut self, error: ComputationError) {
        self.status = ComputationStatus::Failed;
        self.attractors.clear();
        self.error = Some(error);
        self.finished = Some(Instant::now());
    }
}

//! Long-running attractor analysis with a non-blocking, pollable result handle.
//!
//! A `ComputationResult` owns its own copy of the analysed network. The search either runs on
//! a background thread (`ComputationResult::start`) or advances one step per `poll`
//! (`ComputationResult::start_cooperative`). In both cases, `get_results` returns a consistent
//! snapshot: an attractor becomes visible only once it is fully confirmed.
//!
//! Dropping the handle cancels the computation. A cancelled worker never writes into the
//! shared result state again.

use crate::attractors::{Attractor, AttractorSearch};
use crate::error::ComputationError;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

pub use crate::symbolic::UpdateSemantics;

/// **(internal)** Configuration builder methods.
mod _impl_analysis_config;
/// **(internal)** The background and cooperative drivers of `ComputationResult`.
mod _impl_computation_result;
/// **(internal)** Utility methods of `ResultsSummary`.
mod _impl_results_summary;

/// Options of one attractor analysis.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalysisConfig {
    pub semantics: UpdateSemantics,
    /// Maximal number of BDD nodes of any intermediate state set. `None` means unlimited.
    pub node_limit: Option<usize>,
    /// Shrink the state space by forward images before decomposition.
    pub reduce: bool,
}

/// Lifecycle of a computation.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ComputationStatus {
    NotStarted,
    Running,
    Completed,
    Failed,
}

/// A snapshot of the state of a computation.
#[derive(Clone, Debug, PartialEq)]
pub struct ResultsSummary {
    pub status: ComputationStatus,
    /// Attractors confirmed so far (all of them once `Completed`, none if `Failed`).
    pub attractors: Vec<Attractor>,
    pub error: Option<ComputationError>,
    /// Fraction of the state space already resolved, between `0.0` and `1.0`.
    pub progress: f64,
    pub elapsed: Duration,
}

/// A handle to a started attractor analysis.
pub struct ComputationResult {
    shared: Arc<SharedState>,
    driver: Driver,
}

/// **(internal)** Data shared between the handle and its worker.
struct SharedState {
    started: Instant,
    cancelled: AtomicBool,
    results: Mutex<ResultState>,
}

/// **(internal)** The mutable part of `SharedState`.
struct ResultState {
    status: ComputationStatus,
    attractors: Vec<Attractor>,
    error: Option<ComputationError>,
    progress: f64,
    finished: Option<Instant>,
}

/// **(internal)** How the search makes progress.
enum Driver {
    Worker(Option<JoinHandle<()>>),
    Cooperative(Option<AttractorSearch>),
}

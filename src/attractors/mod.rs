//! Detection of network attractors.
//!
//! The search runs on a `SymbolicTransitionSystem` in two phases:
//!
//!  1. *Reduction*: starting with all states, the candidate set `U` is repeatedly replaced by
//!     its successors (plus states without successors) until it stops shrinking. Every
//!     attractor state survives this, because it always has a predecessor inside its attractor.
//!  2. *Decomposition*: pick a pivot `p` in `U`, compute its forward closure `F` and backward
//!     closure `B`. If `F` is a subset of `B`, then `F` is a terminal strongly connected
//!     component, i.e. an attractor. In either case, no state of `B` belongs to another
//!     attractor, so `B` is removed from `U`. Repeat until `U` is empty.
//!
//! `AttractorSearch` performs the search one bounded step at a time, so that it can be driven
//! from a background thread as well as cooperatively by polling.

use crate::symbolic::{StateSet, SymbolicTransitionSystem};
use std::fmt::{Display, Formatter};

/// **(internal)** Implementation of the step-wise attractor search.
mod _impl_attractor_search;
/// **(internal)** Classification of attractor `Behaviour`.
mod _impl_behaviour;

pub use _impl_attractor_search::find_attractors;

/// The type of long-term behaviour observed in an attractor.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub enum Behaviour {
    /// A single state (fixed point).
    Stability,
    /// Every state has exactly one successor: a simple cycle.
    Oscillation,
    /// At least one state has multiple successors inside the attractor.
    Disorder,
}

/// One attractor: a minimal non-empty set of states closed under the transition relation.
#[derive(Clone, Debug, PartialEq)]
pub struct Attractor {
    states: StateSet,
    behaviour: Behaviour,
    cardinality: f64,
}

/// The outcome of a single `AttractorSearch::step`.
#[derive(Clone, Debug, PartialEq)]
pub enum SearchStep {
    /// Some work was done, but no new attractor was confirmed.
    Progress,
    /// A new attractor was confirmed.
    Found(Attractor),
    /// The search is complete. Further steps do nothing.
    Finished,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum SearchPhase {
    Reduction,
    Decomposition,
    Done,
}

/// A resumable attractor search over a `SymbolicTransitionSystem`.
#[derive(Clone)]
pub struct AttractorSearch {
    system: SymbolicTransitionSystem,
    phase: SearchPhase,
    // Candidate states that still have to be resolved.
    universe: StateSet,
    // States without successors (only non-empty for asynchronous semantics).
    sinks: StateSet,
    node_limit: Option<usize>,
    total_states: f64,
    found: usize,
}

impl Attractor {
    pub fn states(&self) -> &StateSet {
        &self.states
    }

    pub fn behaviour(&self) -> Behaviour {
        self.behaviour
    }

    /// The number of states in this attractor.
    pub fn cardinality(&self) -> f64 {
        self.cardinality
    }
}

impl Display for Behaviour {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Behaviour::Stability => "stability",
            Behaviour::Oscillation => "oscillation",
            Behaviour::Disorder => "disorder",
        };
        write!(f, "{}", name)
    }
}

use crate::attractors::{Attractor, Behaviour};
use crate::symbolic::bdd_set::BddSet;
use crate::symbolic::{StateSet, SymbolicTransitionSystem};

impl Behaviour {
    /// Classify the behaviour of the given (terminal) set of states.
    ///
    /// A single state is a `Stability`. Otherwise the set is an `Oscillation` when it has as
    /// many inner transitions as states (every state has exactly one successor), and a
    /// `Disorder` when some state has more.
    pub fn classify(system: &SymbolicTransitionSystem, states: &StateSet) -> Behaviour {
        if states.is_singleton() {
            Behaviour::Stability
        } else if system.transition_count(states) == states.exact_cardinality() {
            Behaviour::Oscillation
        } else {
            Behaviour::Disorder
        }
    }
}

impl Attractor {
    /// Build an attractor from a set of states that is known to be terminal.
    pub(crate) fn new(system: &SymbolicTransitionSystem, states: StateSet) -> Attractor {
        Attractor {
            behaviour: Behaviour::classify(system, &states),
            cardinality: states.approx_cardinality(),
            states,
        }
    }
}

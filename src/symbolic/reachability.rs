use crate::biodivine_std::traits::{Set, TransitionSystem};
use crate::error::ComputationError;
use crate::symbolic::bdd_set::BddSet;
use crate::symbolic::{StateSet, SymbolicTransitionSystem, UpdateSemantics};
use crate::VariableId;

/// Symbolic forward/backward reachability.
///
/// Every iteration calls `check` with the current result, so that long explorations can be
/// interrupted (cancellation, resource limits). An error returned by `check` stops the
/// exploration and is propagated.
pub struct Reachability {
    _dummy: (),
}

impl Reachability {
    /// All states reachable from `initial`, including `initial`.
    pub fn reach_fwd<F>(
        system: &SymbolicTransitionSystem,
        initial: &StateSet,
        check: F,
    ) -> Result<StateSet, ComputationError>
    where
        F: FnMut(&StateSet) -> Result<(), ComputationError>,
    {
        match system.semantics() {
            UpdateSemantics::Synchronous => {
                Self::reach_basic(system, initial, check, |s, x| s.post(x))
            }
            UpdateSemantics::Asynchronous => {
                Self::reach_saturation(system, initial, check, |s, x, v| s.var_post(v, x))
            }
        }
    }

    /// All states that can reach `initial`, including `initial`.
    pub fn reach_bwd<F>(
        system: &SymbolicTransitionSystem,
        initial: &StateSet,
        check: F,
    ) -> Result<StateSet, ComputationError>
    where
        F: FnMut(&StateSet) -> Result<(), ComputationError>,
    {
        match system.semantics() {
            UpdateSemantics::Synchronous => {
                Self::reach_basic(system, initial, check, |s, x| s.pre(x))
            }
            UpdateSemantics::Asynchronous => {
                Self::reach_saturation(system, initial, check, |s, x, v| s.var_pre(v, x))
            }
        }
    }

    /// Breadth-first iteration of a whole-system step operator.
    fn reach_basic<F, S>(
        system: &SymbolicTransitionSystem,
        initial: &StateSet,
        mut check: F,
        step: S,
    ) -> Result<StateSet, ComputationError>
    where
        F: FnMut(&StateSet) -> Result<(), ComputationError>,
        S: Fn(&SymbolicTransitionSystem, &StateSet) -> StateSet,
    {
        let mut result = initial.clone();
        let mut frontier = initial.clone();
        while !frontier.is_empty() {
            check(&result)?;
            frontier = step(system, &frontier).minus(&result);
            result = result.union(&frontier);
            tracing::trace!(
                states = result.approx_cardinality(),
                nodes = result.symbolic_size(),
                "Reachability step."
            );
        }
        Ok(result)
    }

    /// Saturation: always apply the last variable that still adds new states.
    fn reach_saturation<F, S>(
        system: &SymbolicTransitionSystem,
        initial: &StateSet,
        mut check: F,
        step: S,
    ) -> Result<StateSet, ComputationError>
    where
        F: FnMut(&StateSet) -> Result<(), ComputationError>,
        S: Fn(&SymbolicTransitionSystem, &StateSet, VariableId) -> StateSet,
    {
        let variables: Vec<VariableId> = system.as_network().variables().collect();
        let mut result = initial.clone();
        'reach: loop {
            check(&result)?;
            for var in variables.iter().rev() {
                let successors = step(system, &result, *var).minus(&result);
                if !successors.is_empty() {
                    result = result.union(&successors);
                    tracing::trace!(
                        states = result.approx_cardinality(),
                        nodes = result.symbolic_size(),
                        "Reachability step."
                    );
                    continue 'reach;
                }
            }
            return Ok(result);
        }
    }
}

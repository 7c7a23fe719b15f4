use crate::attractors::{Attractor, AttractorSearch, SearchPhase, SearchStep};
use crate::biodivine_std::traits::{Set, TransitionSystem};
use crate::computation::AnalysisConfig;
use crate::error::ComputationError;
use crate::symbolic::bdd_set::BddSet;
use crate::symbolic::reachability::Reachability;
use crate::symbolic::{StateSet, SymbolicTransitionSystem};
use crate::BooleanNetwork;

impl AttractorSearch {
    /// Prepare a new search over the given `system`. No work is done until the first `step`.
    pub fn new(system: SymbolicTransitionSystem, config: &AnalysisConfig) -> AttractorSearch {
        let unit = system.unit();
        let sinks = unit.minus(&system.pre(&unit));
        let phase = if config.reduce {
            SearchPhase::Reduction
        } else {
            SearchPhase::Decomposition
        };
        AttractorSearch {
            total_states: unit.approx_cardinality(),
            universe: unit,
            sinks,
            phase,
            node_limit: config.node_limit,
            found: 0,
            system,
        }
    }

    pub fn as_system(&self) -> &SymbolicTransitionSystem {
        &self.system
    }

    pub fn is_finished(&self) -> bool {
        self.phase == SearchPhase::Done
    }

    /// Fraction of the state space that is already resolved, between `0.0` and `1.0`.
    pub fn progress(&self) -> f64 {
        if self.is_finished() || self.total_states == 0.0 {
            1.0
        } else {
            1.0 - (self.universe.approx_cardinality() / self.total_states)
        }
    }

    /// The number of attractors confirmed so far.
    pub fn found(&self) -> usize {
        self.found
    }

    /// Perform one bounded unit of work: one reduction iteration, or the processing of
    /// one pivot state.
    ///
    /// `is_cancelled` is checked during every reachability iteration. Once the search is
    /// cancelled or fails, the error is returned and the search should be discarded.
    pub fn step<C>(&mut self, is_cancelled: C) -> Result<SearchStep, ComputationError>
    where
        C: Fn() -> bool,
    {
        let node_limit = self.node_limit;
        let check = |set: &StateSet| -> Result<(), ComputationError> {
            if is_cancelled() {
                return Err(ComputationError::Cancelled);
            }
            check_node_limit(node_limit, set)
        };

        match self.phase {
            SearchPhase::Done => Ok(SearchStep::Finished),
            SearchPhase::Reduction => {
                check(&self.universe)?;
                let reduced = self
                    .system
                    .post(&self.universe)
                    .union(&self.sinks)
                    .intersect(&self.universe);
                if reduced == self.universe {
                    tracing::debug!(
                        candidates = self.universe.approx_cardinality(),
                        "Reduction finished."
                    );
                    self.phase = SearchPhase::Decomposition;
                } else {
                    self.universe = reduced;
                }
                Ok(SearchStep::Progress)
            }
            SearchPhase::Decomposition => {
                if self.universe.is_empty() {
                    tracing::debug!(attractors = self.found, "Attractor search finished.");
                    self.phase = SearchPhase::Done;
                    return Ok(SearchStep::Finished);
                }
                let pivot = self.universe.pick_singleton();
                let forward = Reachability::reach_fwd(&self.system, &pivot, check)?;
                let backward = Reachability::reach_bwd(&self.system, &pivot, check)?;
                self.universe = self.universe.minus(&backward);
                if forward.is_subset(&backward) {
                    let attractor = Attractor::new(&self.system, forward);
                    self.found += 1;
                    tracing::debug!(
                        states = attractor.cardinality(),
                        behaviour = %attractor.behaviour(),
                        "Attractor confirmed."
                    );
                    Ok(SearchStep::Found(attractor))
                } else {
                    Ok(SearchStep::Progress)
                }
            }
        }
    }

    /// Run the search to completion, collecting all attractors.
    pub fn run<C>(mut self, is_cancelled: C) -> Result<Vec<Attractor>, ComputationError>
    where
        C: Fn() -> bool,
    {
        let mut result = Vec::new();
        loop {
            match self.step(&is_cancelled)? {
                SearchStep::Progress => {}
                SearchStep::Found(attractor) => result.push(attractor),
                SearchStep::Finished => return Ok(result),
            }
        }
    }
}

/// Compute all attractors of a fully specified `network` (blocking).
pub fn find_attractors(
    network: &BooleanNetwork,
    config: &AnalysisConfig,
) -> Result<Vec<Attractor>, ComputationError> {
    let system = SymbolicTransitionSystem::new(network, config.semantics)?;
    AttractorSearch::new(system, config).run(|| false)
}

/// **(internal)** Fail if a symbolic set exceeds the configured node limit.
fn check_node_limit(limit: Option<usize>, set: &StateSet) -> Result<(), ComputationError> {
    match limit {
        Some(limit) if set.symbolic_size() > limit => Err(ComputationError::ResourceLimit(
            format!(
                "Symbolic set with {} nodes exceeds the limit of {} nodes.",
                set.symbolic_size(),
                limit
            ),
        )),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use crate::attractors::{find_attractors, Attractor, AttractorSearch, Behaviour, SearchStep};
    use crate::biodivine_std::traits::{Set, TransitionSystem};
    use crate::computation::AnalysisConfig;
    use crate::error::ComputationError;
    use crate::symbolic::{SymbolicTransitionSystem, UpdateSemantics};
    use crate::test_models::AEON_MODEL;
    use crate::BooleanNetwork;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeSet;
    use std::convert::TryFrom;

    /// All states of a network with `n` variables, indexed by `VariableId`.
    fn all_states(n: usize) -> Vec<Vec<bool>> {
        (0..(1usize << n))
            .map(|i| (0..n).map(|bit| (i >> (n - 1 - bit)) & 1 == 1).collect())
            .collect()
    }

    /// Explicit successors of a state. Free inputs are not supported.
    fn successors(
        network: &BooleanNetwork,
        semantics: UpdateSemantics,
        state: &[bool],
    ) -> Vec<Vec<bool>> {
        let next: Vec<bool> = network
            .variables()
            .map(|v| {
                network
                    .get_update_function(v)
                    .as_ref()
                    .unwrap()
                    .evaluate_in_state(state)
            })
            .collect();
        match semantics {
            UpdateSemantics::Synchronous => vec![next],
            UpdateSemantics::Asynchronous => (0..state.len())
                .filter(|i| next[*i] != state[*i])
                .map(|i| {
                    let mut successor = state.to_vec();
                    successor[i] = next[i];
                    successor
                })
                .collect(),
        }
    }

    /// Terminal SCCs of the explicit state transition graph.
    fn brute_force_attractors(
        network: &BooleanNetwork,
        semantics: UpdateSemantics,
    ) -> BTreeSet<Vec<Vec<bool>>> {
        let states = all_states(network.num_vars());
        let reachable = |start: &Vec<bool>| -> BTreeSet<Vec<bool>> {
            let mut visited = BTreeSet::new();
            let mut stack = vec![start.clone()];
            while let Some(state) = stack.pop() {
                if visited.insert(state.clone()) {
                    stack.extend(successors(network, semantics, &state));
                }
            }
            visited
        };
        let mut result = BTreeSet::new();
        for state in &states {
            let fwd = reachable(state);
            if fwd.iter().all(|other| reachable(other).contains(state)) {
                result.insert(fwd.into_iter().collect::<Vec<_>>());
            }
        }
        result
    }

    fn symbolic_attractors(attractors: &[Attractor]) -> BTreeSet<Vec<Vec<bool>>> {
        attractors.iter().map(|it| it.states().states()).collect()
    }

    #[test]
    fn attractors_match_brute_force() {
        let network = BooleanNetwork::try_from(AEON_MODEL).unwrap();
        for semantics in [UpdateSemantics::Synchronous, UpdateSemantics::Asynchronous] {
            let expected = brute_force_attractors(&network, semantics);
            for reduce in [true, false] {
                let config = AnalysisConfig::default()
                    .with_semantics(semantics)
                    .with_reduction(reduce);
                let attractors = find_attractors(&network, &config).unwrap();
                assert_eq!(expected.len(), attractors.len());
                assert_eq!(expected, symbolic_attractors(&attractors));
            }
        }
    }

    #[test]
    fn attractors_are_closed_and_disjoint() {
        let network = BooleanNetwork::try_from(AEON_MODEL).unwrap();
        let system =
            SymbolicTransitionSystem::new(&network, UpdateSemantics::Synchronous).unwrap();
        let attractors = find_attractors(&network, &AnalysisConfig::default()).unwrap();
        assert!(!attractors.is_empty());
        for (i, a) in attractors.iter().enumerate() {
            assert!(system.post(a.states()).is_subset(a.states()));
            for b in attractors.iter().skip(i + 1) {
                assert!(a.states().intersect(b.states()).is_empty());
            }
        }
    }

    #[test]
    fn behaviour_of_simple_networks() {
        let toggle = BooleanNetwork::try_from(
            r"
            a -| b
            b -| a
            $a: !b
            $b: !a
        ",
        )
        .unwrap();
        // Synchronous toggle switch: two fixed points and the `00 <-> 11` oscillation.
        let attractors = find_attractors(&toggle, &AnalysisConfig::default()).unwrap();
        let mut behaviours: Vec<Behaviour> = attractors.iter().map(|a| a.behaviour()).collect();
        behaviours.sort();
        assert_eq!(
            vec![Behaviour::Stability, Behaviour::Stability, Behaviour::Oscillation],
            behaviours
        );

        // Asynchronously, only the two fixed points remain.
        let config = AnalysisConfig::default().with_semantics(UpdateSemantics::Asynchronous);
        let attractors = find_attractors(&toggle, &config).unwrap();
        assert_eq!(2, attractors.len());
        assert!(attractors.iter().all(|a| a.cardinality() == 1.0));
    }

    #[test]
    fn step_wise_search_reports_progress() {
        let network = BooleanNetwork::try_from(AEON_MODEL).unwrap();
        let config = AnalysisConfig::default();
        let system = SymbolicTransitionSystem::new(&network, config.semantics).unwrap();
        let mut search = AttractorSearch::new(system, &config);
        assert_eq!(0.0, search.progress());
        let mut found = Vec::new();
        let mut last_progress = 0.0;
        loop {
            match search.step(|| false).unwrap() {
                SearchStep::Found(attractor) => found.push(attractor),
                SearchStep::Progress => {}
                SearchStep::Finished => break,
            }
            assert!(search.progress() >= last_progress);
            last_progress = search.progress();
        }
        assert!(search.is_finished());
        assert_eq!(1.0, search.progress());
        assert_eq!(found.len(), search.found());
        assert_eq!(SearchStep::Finished, search.step(|| false).unwrap());
        let fixed_point = found.iter().find(|a| a.behaviour() == Behaviour::Stability);
        if let Some(fixed_point) = fixed_point {
            let state = &fixed_point.states().states()[0];
            for v in network.variables() {
                let function = network.get_update_function(v).as_ref().unwrap();
                assert_eq!(state[v.to_index()], function.evaluate_in_state(state));
            }
        }
    }

    #[test]
    fn cancelled_and_limited_search() {
        let network = BooleanNetwork::try_from(AEON_MODEL).unwrap();
        let config = AnalysisConfig::default().with_reduction(false);
        let system = SymbolicTransitionSystem::new(&network, config.semantics).unwrap();
        let search = AttractorSearch::new(system, &config);
        assert_eq!(Err(ComputationError::Cancelled), search.run(|| true).map(|_| ()));

        let limited = AnalysisConfig::default().with_node_limit(Some(1));
        match find_attractors(&network, &limited) {
            Err(ComputationError::ResourceLimit(_)) => {}
            other => panic!("Unexpected result: {:?}", other.map(|it| it.len())),
        }
    }
}

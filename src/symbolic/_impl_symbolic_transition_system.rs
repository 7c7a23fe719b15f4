use crate::biodivine_std::traits::TransitionSystem;
use crate::error::ComputationError;
use crate::symbolic::bdd_set::BddSet;
use crate::symbolic::{StateSet, SymbolicContext, SymbolicTransitionSystem, UpdateSemantics};
use crate::{BooleanNetwork, VariableId};
use biodivine_lib_bdd::{bdd, op_function, Bdd};
use num_bigint::BigUint;
use std::convert::TryFrom;
use std::ops::Shr;

impl SymbolicTransitionSystem {
    /// Build the symbolic transition system of a fully specified `network`.
    ///
    /// Free inputs (no regulators, no function) are allowed: under synchronous semantics
    /// their next value is arbitrary, under asynchronous semantics they can always flip.
    pub fn new(
        network: &BooleanNetwork,
        semantics: UpdateSemantics,
    ) -> Result<SymbolicTransitionSystem, ComputationError> {
        let missing = network.missing_update_functions();
        if !missing.is_empty() {
            return Err(ComputationError::NotFullySpecified {
                variables: missing
                    .into_iter()
                    .map(|it| network.get_variable_name(it).clone())
                    .collect(),
            });
        }
        let context =
            SymbolicContext::new(network.as_graph()).map_err(ComputationError::ResourceLimit)?;

        let fn_update: Vec<Option<Bdd>> = network
            .variables()
            .map(|it| {
                network
                    .get_update_function(it)
                    .as_ref()
                    .map(|function| context.mk_fn_update_true(function))
            })
            .collect();

        let mut relation = context.mk_constant(true);
        let mut identity = context.mk_constant(true);
        let mut fn_transition = Vec::with_capacity(network.num_vars());
        for variable in network.variables() {
            let x = context.mk_state_variable_is_true(variable);
            let x_next = context.mk_next_state_variable_is_true(variable);
            identity = bdd!(identity & (x <=> x_next));
            match &fn_update[variable.to_index()] {
                Some(f) => {
                    relation = bdd!(relation & (x_next <=> f));
                    fn_transition.push(bdd!(x ^ f));
                }
                None => fn_transition.push(context.mk_constant(true)),
            }
        }

        tracing::debug!(
            variables = network.num_vars(),
            relation_size = relation.size(),
            ?semantics,
            "Symbolic transition system ready."
        );

        Ok(SymbolicTransitionSystem {
            network: network.clone(),
            unit_bdd: context.mk_constant(true),
            context,
            semantics,
            fn_transition,
            relation,
            identity,
        })
    }

    /// Make a `StateSet` from a `Bdd` of this system's context.
    pub fn mk_set(&self, bdd: Bdd) -> StateSet {
        StateSet::new(bdd, &self.context)
    }

    pub fn mk_empty(&self) -> StateSet {
        StateSet::mk_empty(&self.context)
    }

    /// The states of `set` in which `variable` can change its value in one asynchronous step.
    pub fn var_can_post(&self, variable: VariableId, set: &StateSet) -> StateSet {
        set.copy(set.as_bdd().and(&self.fn_transition[variable.to_index()]))
    }

    /// States reachable from `set` by updating only `variable`.
    pub fn var_post(&self, variable: VariableId, set: &StateSet) -> StateSet {
        // flip(set & can_change)
        let output = Bdd::fused_binary_flip_op(
            (set.as_bdd(), None),
            (&self.fn_transition[variable.to_index()], None),
            Some(self.context.get_state_variable(variable)),
            op_function::and,
        );
        set.copy(output)
    }

    /// States that reach `set` by updating only `variable`.
    pub fn var_pre(&self, variable: VariableId, set: &StateSet) -> StateSet {
        // flip(set) & can_change
        let output = Bdd::fused_binary_flip_op(
            (set.as_bdd(), Some(self.context.get_state_variable(variable))),
            (&self.fn_transition[variable.to_index()], None),
            None,
            op_function::and,
        );
        set.copy(output)
    }

    /// The set of `set` successors under the synchronous update.
    fn sync_post(&self, set: &StateSet) -> StateSet {
        let state = self.context.state_variables();
        let next = self.context.next_state_variables();
        // Successors expressed over the primed variables.
        let successors = set.as_bdd().and(&self.relation).exists(state);
        set.copy(successors.and(&self.identity).exists(next))
    }

    /// The set of `set` predecessors under the synchronous update.
    fn sync_pre(&self, set: &StateSet) -> StateSet {
        let state = self.context.state_variables();
        let next = self.context.next_state_variables();
        let primed = set.as_bdd().and(&self.identity).exists(state);
        set.copy(primed.and(&self.relation).exists(next))
    }

    /// The number of transitions that start and end inside `set`.
    ///
    /// Under synchronous semantics this includes self-loops of fixed points, under
    /// asynchronous semantics there are no self-loops.
    pub fn transition_count(&self, set: &StateSet) -> BigUint {
        match self.semantics {
            UpdateSemantics::Synchronous => {
                let state = self.context.state_variables();
                let primed = set.as_bdd().and(&self.identity).exists(state);
                let edges = set.as_bdd().and(&self.relation).and(&primed);
                let active = 2 * self.context.num_state_variables();
                let unused = usize::from(edges.num_vars()) - active;
                edges
                    .exact_cardinality()
                    .shr(u16::try_from(unused).unwrap_or(u16::MAX))
            }
            UpdateSemantics::Asynchronous => {
                let mut total = BigUint::from(0u32);
                for variable in self.network.variables() {
                    // States of `set` that can flip `variable` and stay inside `set`.
                    let can_post = self.var_can_post(variable, set);
                    let stays_inside = Bdd::fused_binary_flip_op(
                        (set.as_bdd(), Some(self.context.get_state_variable(variable))),
                        (can_post.as_bdd(), None),
                        None,
                        op_function::and,
                    );
                    total += set.copy(stays_inside).exact_cardinality();
                }
                total
            }
        }
    }
}

impl TransitionSystem for SymbolicTransitionSystem {
    type States = StateSet;

    fn unit(&self) -> StateSet {
        self.mk_set(self.unit_bdd.clone())
    }

    fn post(&self, set: &StateSet) -> StateSet {
        match self.semantics {
            UpdateSemantics::Synchronous => self.sync_post(set),
            UpdateSemantics::Asynchronous => {
                let mut result = self.context.mk_constant(false);
                for variable in self.network.variables() {
                    result = result.or(self.var_post(variable, set).as_bdd());
                }
                self.mk_set(result)
            }
        }
    }

    fn pre(&self, set: &StateSet) -> StateSet {
        match self.semantics {
            UpdateSemantics::Synchronous => self.sync_pre(set),
            UpdateSemantics::Asynchronous => {
                let mut result = self.context.mk_constant(false);
                for variable in self.network.variables() {
                    result = result.or(self.var_pre(variable, set).as_bdd());
                }
                self.mk_set(result)
            }
        }
    }
}

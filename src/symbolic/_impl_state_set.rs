use crate::symbolic::bdd_set::BddSet;
use crate::symbolic::{StateSet, SymbolicContext};
use biodivine_lib_bdd::{Bdd, BddValuation, BddVariable};
use num_bigint::BigUint;

impl StateSet {
    /// Make a new set of states from a `Bdd` that only depends on state variables
    /// of the given `context`.
    pub fn new(bdd: Bdd, context: &SymbolicContext) -> StateSet {
        StateSet {
            bdd,
            state_variables: context.state_variables().clone(),
        }
    }

    /// The set of all states of the given `context`.
    pub fn mk_unit(context: &SymbolicContext) -> StateSet {
        Self::new(context.mk_constant(true), context)
    }

    pub fn mk_empty(context: &SymbolicContext) -> StateSet {
        Self::new(context.mk_constant(false), context)
    }

    /// A singleton set with the given state, indexed by `VariableId`.
    pub fn mk_state(context: &SymbolicContext, state: &[bool]) -> StateSet {
        Self::new(context.mk_state(state), context)
    }

    /// Number of network variables of each state.
    pub fn num_state_variables(&self) -> usize {
        self.state_variables.len()
    }

    /// True if the given state (indexed by `VariableId`) belongs to this set.
    pub fn contains(&self, state: &[bool]) -> bool {
        let mut valuation = BddValuation::all_false(self.bdd.num_vars());
        for (var, value) in self.state_variables.iter().zip(state) {
            valuation.set_value(*var, *value);
        }
        self.bdd.eval_in(&valuation)
    }

    /// True if the set contains exactly one state.
    pub fn is_singleton(&self) -> bool {
        !self.bdd.is_false() && self.exact_cardinality() == BigUint::from(1u32)
    }

    /// Pick one state of this set, returning a singleton. Empty for an empty set.
    pub fn pick_singleton(&self) -> StateSet {
        self.copy(self.bdd.pick(&self.state_variables))
    }

    /// Enumerate all states of this set, in lexicographic order of their `VariableId`
    /// valuations.
    ///
    /// This is exponential in the number of variables that are not fixed by the set, so it
    /// should only be used for small sets.
    pub fn states(&self) -> Vec<Vec<bool>> {
        let mut result = Vec::new();
        for clause in self.bdd.sat_clauses() {
            let fixed: Vec<Option<bool>> =
                self.state_variables.iter().map(|var| clause[*var]).collect();
            expand_clause(&fixed, &mut Vec::new(), &mut result);
        }
        result.sort();
        result
    }
}

impl BddSet for StateSet {
    fn as_bdd(&self) -> &Bdd {
        &self.bdd
    }

    fn copy(&self, bdd: Bdd) -> Self {
        StateSet {
            bdd,
            state_variables: self.state_variables.clone(),
        }
    }

    fn encoded_variables(&self) -> &[BddVariable] {
        &self.state_variables
    }
}

/// **(internal)** Expand a partial state into all the full states that it covers.
fn expand_clause(fixed: &[Option<bool>], prefix: &mut Vec<bool>, result: &mut Vec<Vec<bool>>) {
    if prefix.len() == fixed.len() {
        result.push(prefix.clone());
        return;
    }
    let options: &[bool] = match fixed[prefix.len()] {
        Some(true) => &[true],
        Some(false) => &[false],
        None => &[false, true],
    };
    for value in options {
        prefix.push(*value);
        expand_clause(fixed, prefix, result);
        prefix.pop();
    }
}

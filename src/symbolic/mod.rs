//! Symbolic (BDD-based) encoding of Boolean network dynamics.
//!
//! Every network variable `x` is represented by two `BddVariable`s: the current-state variable
//! `x` and the next-state variable `x'`. The two are interleaved in the variable ordering, since
//! the synchronous transition relation mostly relates `x` with `x'`.
//!
//! Functions that are not fully known (placeholders of an expression, or variables that have
//! regulators but no update function) are encoded using `FunctionTable`s: one extra
//! `BddVariable` for every row of the function's truth table. These extra variables are called
//! *parameters*. A `Bdd` over state and parameter variables then describes a whole family of
//! concrete functions at once, which is what the regulation constraints rely on.
//!
//! To the end user, dynamics are available through `SymbolicTransitionSystem` and sets of states
//! through `StateSet`. Access to the `SymbolicContext` allows custom BDD operations, but it
//! should be used with caution.

use crate::BooleanNetwork;
use biodivine_lib_bdd::{Bdd, BddVariable, BddVariableSet, ValuationsOfClauseIterator};
use std::iter::Enumerate;

/// **(internal)** Implementation for `FunctionTable` and `FunctionTableIterator`.
mod _impl_function_table;
/// **(internal)** Utility methods for validation of static constraints on network regulations.
mod _impl_regulation_constraint;
/// **(internal)** Set operations and state enumeration for `StateSet`.
mod _impl_state_set;
/// **(internal)** Implementation of the `SymbolicContext`.
mod _impl_symbolic_context;
/// **(internal)** Synchronous and asynchronous `pre`/`post` operators.
mod _impl_symbolic_transition_system;

/// A trait implemented by symbolic sets represented using `Bdd` objects.
pub mod bdd_set;
/// Forward and backward reachability over a `SymbolicTransitionSystem`.
pub mod reachability;

/// How are the update functions applied in one step of the network.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub enum UpdateSemantics {
    /// All variables are updated at once. Every state has exactly one successor
    /// (unless the network has free inputs).
    #[default]
    Synchronous,
    /// One variable is updated at a time, non-deterministically.
    Asynchronous,
}

/// Symbolic context manages the mapping between entities of the Boolean network
/// (state variables, next-state variables, unknown functions) and `BddVariables`
/// used in `lib-bdd`.
///
/// It also provides utility methods for creating `Bdd` objects that match different conditions
/// imposed on the state space or the parameter space of the network.
#[derive(Clone)]
pub struct SymbolicContext {
    bdd: BddVariableSet,
    // One symbolic variable for each network variable.
    state_variables: Vec<BddVariable>,
    // A primed copy of every state variable.
    next_state_variables: Vec<BddVariable>,
    // All symbolic variables representing function table rows.
    parameter_variables: Vec<BddVariable>,
    // Tables of named placeholder functions.
    explicit_function_tables: Vec<FunctionTable>,
    // Tables of variables whose update function is unknown.
    implicit_function_tables: Vec<Option<FunctionTable>>,
}

/// Function table maps the table of an uninterpreted function to corresponding `Bdd` variables.
///
/// The main functionality of a `FunctionTable` is that it provides an iterator over
/// pairs of `Vec<bool>` (function input assignment) and `BddVariable`
/// (corresponding symbolic variable).
#[derive(Debug, Clone)]
pub struct FunctionTable {
    pub arity: u16,
    rows: Vec<BddVariable>,
    name: String,
}

/// Iterator over elements of the `FunctionTable`.
pub struct FunctionTableIterator<'a> {
    inner_iterator: Enumerate<ValuationsOfClauseIterator>,
    table: &'a FunctionTable,
}

/// A helper structure which provides a collection of static functions that can be used
/// to analyse static constraints of Boolean functions.
pub struct RegulationConstraint {
    _impossible: (), // Ensures `RegulationConstraint` cannot be instantiated.
}

/// Symbolic representation of a set of network states.
///
/// The underlying `Bdd` only depends on the current-state variables of its context.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
pub struct StateSet {
    bdd: Bdd,
    state_variables: Vec<BddVariable>,
}

/// A symbolic encoding of the state transition graph of a fully specified `BooleanNetwork`.
///
/// Provides the standard `pre`/`post` operations (through the `TransitionSystem` trait) for
/// exploring the graph symbolically.
#[derive(Clone)]
pub struct SymbolicTransitionSystem {
    network: BooleanNetwork,
    context: SymbolicContext,
    semantics: UpdateSemantics,
    // `true` over state variables.
    unit_bdd: Bdd,
    // For every variable, the states where `x_i` can change its value.
    fn_transition: Vec<Bdd>,
    // Synchronous relation `x_i' <=> f_i(x)` for all `i`.
    relation: Bdd,
    // Identity relation `x_i' <=> x_i` for all `i`.
    identity: Bdd,
}

impl SymbolicTransitionSystem {
    /// The network this system was built from.
    pub fn as_network(&self) -> &BooleanNetwork {
        &self.network
    }

    pub fn symbolic_context(&self) -> &SymbolicContext {
        &self.context
    }

    pub fn semantics(&self) -> UpdateSemantics {
        self.semantics
    }
}

//! A Boolean network engine: the `.aeon`, `.bnet` and SBML-qual formats, a validated
//! regulatory network model, and symbolic detection of network attractors.
//!
//! The canonical model is the `BooleanNetwork` (a `RegulatoryGraph` together with optional
//! `FnUpdate` update functions). All three formats are decoded into and encoded from this model,
//! so a conversion is always `decode -> BooleanNetwork -> encode`.
//!
//! Long-running attractor analysis is exposed through `computation::ComputationResult`, which
//! runs the search in the background (or step-wise when polled) and can be inspected at any time.

#[macro_use]
extern crate lazy_static;

use std::collections::HashMap;
use std::iter::Map;
use std::ops::Range;

pub mod attractors;
pub mod biodivine_std;
pub mod computation;
pub mod conversions;
pub mod error;
pub mod expression;
pub mod model;
pub mod sbml;
pub mod symbolic;
pub mod validation;

/// **(internal)** Implements `.aeon` parser for `BooleanNetwork` objects.
mod _aeon_parser;
/// **(internal)** Implements `.bnet` parser for `BooleanNetwork` objects.
mod _bnet_parser;
/// **(internal)** Utility methods for `BinaryOp`.
mod _impl_binary_op;
/// **(internal)** Utility methods for `BooleanNetwork`.
mod _impl_boolean_network;
/// **(internal)** `BooleanNetwork` to `.bnet` string.
mod _impl_boolean_network_to_bnet;
/// **(internal)** `BooleanNetwork` to `.aeon` string.
mod _impl_display_for_boolean_network;
/// **(internal)** Order-insensitive equality of `RegulatoryGraph` regulations.
mod _impl_eq_regulatory_graph;
/// **(internal)** Utility methods for `FnUpdate`.
mod _impl_fn_update;
/// **(internal)** Parsing and printing of `ModelFormat` identifiers.
mod _impl_model_format;
/// **(internal)** Utility methods for `Regulation`.
mod _impl_regulation;
/// **(internal)** Utility methods for `RegulatoryGraph`.
mod _impl_regulatory_graph;
/// **(internal)** Utility methods for `Variable`.
mod _impl_variable;
/// **(internal)** Utility methods for `VariableId`.
mod _impl_variable_id;

/// **(internal)** Shared models used by tests across the crate.
#[cfg(test)]
mod test_models;

lazy_static! {
    /// A regular expression that matches valid variable names: letters, digits and
    /// underscores, at least one of which is not a digit.
    static ref ID_REGEX: regex::Regex =
        regex::Regex::new(r"^[a-zA-Z0-9_]*[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

/// A type-safe index of a `Variable` inside a `BooleanNetwork` (or a `RegulatoryGraph`).
///
/// Ids are only valid for the graph that produced them. Removing a variable shifts the ids of
/// all variables that follow it.
#[derive(Clone, Copy, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct VariableId(usize);

/// Possible monotonous effects of a `Regulation` in a `BooleanNetwork`.
///
/// Activation means increasing monotonicity and inhibition means decreasing
/// monotonicity.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Monotonicity {
    Activation,
    Inhibition,
}

/// A variable of a `BooleanNetwork`.
///
/// Variable has a unique `name` (its identifier) and can carry an optional human-readable
/// `display_name`. Its value is always either true or false.
#[derive(Clone, Debug, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Variable {
    name: String,
    display_name: Option<String>,
}

/// Describes an interaction relationship between two `Variable`s in a `BooleanNetwork`
/// (or a `RegulatoryGraph`).
///
/// Every regulation can be monotonous and can be marked as `essential`.
/// Essentiality means that the regulation must manifest itself somewhere in the
/// corresponding update function (i.e. there is a context in which changing just
/// the value of `regulator` changes the value of `target`).
///
/// Regulations can be represented as strings in the
/// form `"regulator_name 'relationship' target_name"`. The 'relationship' is one of the arrows:
/// `->, ->?, -|, -|?, -?, -??`. Here,`>` means activation, `|` is inhibition and `?` is
/// not monotonous. The last question mark means the regulation is not necessarily essential.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub struct Regulation {
    regulator: VariableId,
    target: VariableId,
    essential: bool,
    monotonicity: Option<Monotonicity>,
}

/// A partial representation of a `BooleanNetwork`, `RegulatoryGraph` contains information
/// about the general structure of the network but lacks the concrete update functions
/// of individual variables.
///
/// Every ordered pair of variables has at most one regulation and both endpoints of
/// a regulation always reference existing variables.
///
/// Example of a `RegulatoryGraph` in the `.aeon` notation:
///
/// ```rg
///  # Regulators of a
///  a ->? a
///  b -|? a
///
///  # Regulators of b
///  a -> b
///  b -| b
/// ```
#[derive(Clone, Debug)]
pub struct RegulatoryGraph {
    variables: Vec<Variable>,
    regulations: Vec<Regulation>,
    variable_to_index: HashMap<String, VariableId>,
}

/// Possible binary boolean operators that can appear in `FnUpdate`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum BinaryOp {
    And,
    Or,
    Xor,
    Iff,
    Imp,
}

/// A fully resolved boolean formula which references `Variable`s of the associated
/// `BooleanNetwork`.
///
/// An update function specifies the evolution rules for one specific `Variable` of a
/// `BooleanNetwork`. Every variable it references must be a regulator of the updated variable.
/// Unlike `expression::Expression`, it cannot contain placeholder functions.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum FnUpdate {
    Const(bool),
    Var(VariableId),
    Not(Box<FnUpdate>),
    Binary(BinaryOp, Box<FnUpdate>, Box<FnUpdate>),
}

/// A Boolean network: a `RegulatoryGraph` together with the update functions of its variables.
///
/// A variable without an update function and without regulators is a free input. A variable
/// with regulators but without an update function is not fully specified and such a network
/// cannot be analysed.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BooleanNetwork {
    graph: RegulatoryGraph,
    update_functions: Vec<Option<FnUpdate>>,
}

/// The three supported textual representations of a `BooleanNetwork`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum ModelFormat {
    /// The native `.aeon` format (regulations and `$var: function` lines).
    Aeon,
    /// The tabular `.bnet` format (`targets,factors` header and `target, function` rows).
    Bnet,
    /// The SBML-qual XML format.
    Sbml,
}

/// A layout type for transferring information about node position between formats.
pub type Layout = HashMap<String, (f64, f64)>;

/// An iterator over all `VariableId`s of a `RegulatoryGraph`.
pub type VariableIdIterator = Map<Range<usize>, fn(usize) -> VariableId>;

/// An iterator over all `Regulation`s of a `RegulatoryGraph`.
pub type RegulationIterator<'a> = std::slice::Iter<'a, Regulation>;

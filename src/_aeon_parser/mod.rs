//! Reading of the `.aeon` format.
//!
//! A document consists of regulations (`a -> b`), update functions (`$b: a & !c`) and
//! comments (`# ...`). Comments of the form `#position:<var>:<x>,<y>` carry the node layout.
//! Lines can appear in any order and variables are ordered alphabetically.

use crate::expression::Expression;
use crate::Monotonicity;

/// **(internal)** `BooleanNetwork` parsing.
mod _from_string_for_boolean_network;
/// **(internal)** Reading and writing of `#position` comments.
mod _impl_layout;

pub(crate) use _impl_layout::{read_position, write_position};

/// **(internal)** A helper struct for representing a parsed `Regulation` that has not been
/// integrated into a `RegulatoryGraph` yet.
#[derive(Clone, Debug, PartialEq)]
struct RegulationTemp {
    regulator: String,
    target: String,
    essential: bool,
    monotonicity: Option<Monotonicity>,
}

/// **(internal)** A parsed update function that has not been attached to its variable yet.
#[derive(Clone, Debug, PartialEq)]
struct FunctionTemp {
    line: usize,
    variable: String,
    expression: Expression,
}

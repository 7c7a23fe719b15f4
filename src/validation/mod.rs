//! Validation of partially specified update functions.
//!
//! The input is a `.aeon` fragment: regulations and `$var: expression` lines, where expressions
//! may use placeholder functions such as `f(a, b)`. Variables without an update function are
//! treated as completely unknown functions of their regulators. The validator reports every
//! problem of the fragment at once and counts how many instantiations of the unknown functions
//! satisfy all regulations (the *cardinality* of the fragment).
//!
//! ```rust
//! use biodivine_aeon_core::validation::check_update_function;
//!
//! let report = check_update_function("a -> b\nc -|? b\n$b: a | f(c)");
//! assert!(report.is_valid());
//! assert_eq!(Some(8.0), report.cardinality);
//! ```

use crate::error::ModelError;
use thiserror::Error;

/// **(internal)** Reading of fragments from text or from an existing network.
mod _impl_fragment;
/// **(internal)** Symbolic analysis of a fragment.
mod _impl_validation_report;

pub use _impl_validation_report::{check_network_function, check_update_function};

/// Unknown functions with more inputs than this are not enumerated symbolically.
pub const MAX_PLACEHOLDER_ARITY: usize = 5;

/// One problem found by the validator.
#[derive(Clone, Debug, Error, PartialEq)]
pub enum ValidationIssue {
    /// The same problems `BooleanNetwork::set_update_function` reports: syntax errors,
    /// undeclared or unused regulators, essentiality and sign violations.
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error("Function `{placeholder}` is used with different numbers of arguments: {arities:?}.")]
    InconsistentArity {
        placeholder: String,
        arities: Vec<usize>,
    },
    #[error("Function too large for on-the-fly analysis.")]
    TooComplex { function: String, arity: usize },
    #[error("No instantiation of the unknown functions satisfies all regulations.")]
    Unsatisfiable,
}

/// The outcome of `check_update_function`.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ValidationReport {
    pub issues: Vec<ValidationIssue>,
    /// Number of admissible instantiations of all unknown functions. `None` when the fragment
    /// could not be analysed symbolically.
    pub cardinality: Option<f64>,
}

/// **(internal)** A fragment of a model in which update functions are still expressions.
#[derive(Clone, Debug, Default)]
struct Fragment {
    /// Variables that exist even if no regulation or function mentions them.
    variables: Vec<String>,
    /// Regulations as `(regulator, target, essential, monotonicity)`.
    regulations: Vec<(String, String, bool, Option<crate::Monotonicity>)>,
    /// Update functions as `(variable, expression)`.
    functions: Vec<(String, crate::expression::Expression)>,
    issues: Vec<ValidationIssue>,
}

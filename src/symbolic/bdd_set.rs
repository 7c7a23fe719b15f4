use crate::biodivine_std::traits::Set;
use biodivine_lib_bdd::{op_function, Bdd, BddVariable};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::ops::Shr;

/// A set of network states stored as a `Bdd` over a fixed subset of the context variables.
///
/// The context also contains the next-state variables, which never appear in the set. They are
/// discounted when counting its elements.
pub trait BddSet {
    fn as_bdd(&self) -> &Bdd;

    /// Wrap `bdd` into a set over the same variables as `self`. The `bdd` must not depend on
    /// any other variable.
    fn copy(&self, bdd: Bdd) -> Self;

    /// The BDD variables that encode the elements of this set.
    fn encoded_variables(&self) -> &[BddVariable];

    /// Number of BDD nodes of the set.
    fn symbolic_size(&self) -> usize {
        self.as_bdd().size()
    }

    fn exact_cardinality(&self) -> BigUint {
        self.as_bdd()
            .exact_cardinality()
            .shr(ignored_variables(self.as_bdd(), self.encoded_variables()))
    }

    /// Number of elements as `f64`. Falls back to `exact_cardinality` when the floating point
    /// count overflows.
    fn approx_cardinality(&self) -> f64 {
        let ignored = ignored_variables(self.as_bdd(), self.encoded_variables());
        let count = self.as_bdd().cardinality() / 2.0f64.powi(i32::from(ignored));
        if count.is_finite() {
            count
        } else {
            self.exact_cardinality().to_f64().unwrap_or(f64::INFINITY)
        }
    }
}

/// **(internal)** Number of BDD variables that the set does not use.
fn ignored_variables(bdd: &Bdd, encoded: &[BddVariable]) -> u16 {
    let encoded = u16::try_from(encoded.len()).unwrap_or(u16::MAX);
    bdd.num_vars().saturating_sub(encoded)
}

impl<T: BddSet + Clone> Set for T {
    fn union(&self, other: &Self) -> Self {
        self.copy(self.as_bdd().or(other.as_bdd()))
    }

    fn intersect(&self, other: &Self) -> Self {
        self.copy(self.as_bdd().and(other.as_bdd()))
    }

    fn minus(&self, other: &Self) -> Self {
        self.copy(self.as_bdd().and_not(other.as_bdd()))
    }

    fn is_empty(&self) -> bool {
        self.as_bdd().is_false()
    }

    fn is_subset(&self, other: &Self) -> bool {
        // `self & !other` must be empty; the node limit stops at the first state outside.
        Bdd::binary_op_with_limit(1, self.as_bdd(), other.as_bdd(), op_function::and_not)
            .is_some()
    }
}

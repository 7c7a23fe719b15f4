use crate::error::ModelError;
use crate::expression::Expression;
use crate::FnUpdate::*;
use crate::{BinaryOp, FnUpdate, RegulatoryGraph, VariableId};
use std::collections::{HashMap, HashSet};

/// Constructors that avoid explicit boxing.
impl FnUpdate {
    pub fn mk_var(id: VariableId) -> FnUpdate {
        Var(id)
    }

    pub fn mk_not(inner: FnUpdate) -> FnUpdate {
        Not(Box::new(inner))
    }

    pub fn mk_binary(op: BinaryOp, left: FnUpdate, right: FnUpdate) -> FnUpdate {
        Binary(op, Box::new(left), Box::new(right))
    }

    pub fn negation(self) -> FnUpdate {
        FnUpdate::mk_not(self)
    }

    pub fn and(self, other: FnUpdate) -> FnUpdate {
        FnUpdate::mk_binary(BinaryOp::And, self, other)
    }

    pub fn or(self, other: FnUpdate) -> FnUpdate {
        FnUpdate::mk_binary(BinaryOp::Or, self, other)
    }
}

/// Other utility methods.
impl FnUpdate {
    /// Try to parse an update function from a string expression using the provided `graph`
    /// as context.
    ///
    /// This only resolves names. Whether the function agrees with the regulations of its
    /// target is checked once it is attached to a `BooleanNetwork`.
    pub fn try_from_str(expression: &str, graph: &RegulatoryGraph) -> Result<FnUpdate, ModelError> {
        let expression = Expression::parse(expression)?;
        Ok(expression.to_fn_update(graph)?)
    }

    /// Return a sorted vector of all variables that are actually used as inputs in this function.
    pub fn collect_arguments(&self) -> Vec<VariableId> {
        let mut args = HashSet::new();
        self.walk_postorder(&mut |it: &FnUpdate| {
            if let Var(id) = it {
                args.insert(*id);
            }
        });
        let mut result: Vec<VariableId> = args.into_iter().collect();
        result.sort();
        result
    }

    /// Convert this update function to a string, taking names from the provided graph.
    pub fn to_string(&self, context: &RegulatoryGraph) -> String {
        match self {
            Const(value) => value.to_string(),
            Var(id) => context.get_variable_name(*id).to_string(),
            Not(inner) => format!("!{}", inner.to_string(context)),
            Binary(op, l, r) => {
                format!("({} {} {})", l.to_string(context), op, r.to_string(context))
            }
        }
    }

    /// If possible, evaluate this function using the given network variable valuation.
    ///
    /// Returns `None` if the valuation lacks a variable that the result depends on. Note that
    /// even a partial valuation can be sufficient: `A & B` is false whenever `A = false`,
    /// regardless of `B`.
    pub fn evaluate(&self, values: &HashMap<VariableId, bool>) -> Option<bool> {
        match self {
            Const(value) => Some(*value),
            Var(id) => values.get(id).cloned(),
            Not(inner) => inner.evaluate(values).map(|it| !it),
            Binary(op, left, right) => {
                let left = left.evaluate(values);
                let right = right.evaluate(values);
                match op {
                    BinaryOp::And => match (left, right) {
                        (Some(false), _) | (_, Some(false)) => Some(false),
                        (Some(true), Some(true)) => Some(true),
                        _ => None,
                    },
                    BinaryOp::Or => match (left, right) {
                        (Some(true), _) | (_, Some(true)) => Some(true),
                        (Some(false), Some(false)) => Some(false),
                        _ => None,
                    },
                    BinaryOp::Imp => match (left, right) {
                        (Some(false), _) | (_, Some(true)) => Some(true),
                        (Some(true), Some(false)) => Some(false),
                        _ => None,
                    },
                    BinaryOp::Iff | BinaryOp::Xor => match (left, right) {
                        (Some(left), Some(right)) => Some(op.eval(left, right)),
                        _ => None,
                    },
                }
            }
        }
    }

    /// Evaluate this function in a full network state, indexed by `VariableId`.
    pub fn evaluate_in_state(&self, state: &[bool]) -> bool {
        match self {
            Const(value) => *value,
            Var(id) => state[id.to_index()],
            Not(inner) => !inner.evaluate_in_state(state),
            Binary(op, left, right) => {
                op.eval(left.evaluate_in_state(state), right.evaluate_in_state(state))
            }
        }
    }

    /// Iterate through all nodes of the abstract syntax tree of this function in post-order.
    pub fn walk_postorder<F>(&self, action: &mut F)
    where
        F: FnMut(&FnUpdate),
    {
        match self {
            Const(_) | Var(_) => action(self),
            Not(inner) => {
                inner.walk_postorder(action);
                action(self);
            }
            Binary(_, left, right) => {
                left.walk_postorder(action);
                right.walk_postorder(action);
                action(self);
            }
        }
    }

    /// Rename all occurrences of the specified `variables` to new IDs.
    pub fn rename_all(&self, variables: &HashMap<VariableId, VariableId>) -> FnUpdate {
        match self {
            Const(_) => self.clone(),
            Var(id) => match variables.get(id) {
                Some(new_id) => Var(*new_id),
                None => self.clone(),
            },
            Not(inner) => inner.rename_all(variables).negation(),
            Binary(op, left, right) => {
                let left = left.rename_all(variables);
                let right = right.rename_all(variables);
                FnUpdate::mk_binary(*op, left, right)
            }
        }
    }

    /// Returns true if this update function uses the given variable.
    pub fn contains_variable(&self, variable: VariableId) -> bool {
        let mut result = false;
        let mut is_var = |it: &FnUpdate| {
            if let Var(id) = it {
                result = result || (*id == variable);
            }
        };
        self.walk_postorder(&mut is_var);
        result
    }
}

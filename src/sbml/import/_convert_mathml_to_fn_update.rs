use crate::error::{ModelError, ParseError, Position, SemanticError, SemanticErrorKind};
use crate::sbml::import::_read_mathml::MathMl;
use crate::sbml::import::_read_transitions::SbmlTransition;
use crate::{BinaryOp, FnUpdate, ModelFormat, RegulatoryGraph};
use fxhash::FxHashMap;

/// Convert a transition into an update function.
///
/// Returns `None` when the transition has no function terms, i.e. the function is unknown.
/// A transition with only a default term is a constant. Otherwise, there must be a single
/// function term whose level differs from the default level.
pub fn sbml_transition_to_update_function(
    graph: &RegulatoryGraph,
    transition: &SbmlTransition,
    id_to_var: &FxHashMap<String, String>,
) -> Result<Option<FnUpdate>, ModelError> {
    let default_term = match &transition.default_term {
        Some(term) => term,
        None => return Ok(None),
    };
    let default_level = boolean_level(transition, default_term.result_level)?;

    if transition.function_terms.is_empty() {
        return Ok(Some(FnUpdate::Const(default_level)));
    }
    if transition.function_terms.len() > 1 {
        return Err(transition_error(
            transition,
            "More than one function term is not supported in Boolean models.",
        ));
    }

    let term = &transition.function_terms[0];
    let term_level = boolean_level(transition, term.result_level)?;
    if term_level == default_level {
        return Err(transition_error(
            transition,
            "Function term has the same result level as the default term.",
        ));
    }
    let math = term
        .math
        .as_ref()
        .ok_or_else(|| transition_error(transition, "Function term has no math formula."))?;
    let function = math_to_update(math, graph, transition, id_to_var)?;
    if term_level {
        Ok(Some(function))
    } else {
        Ok(Some(FnUpdate::mk_not(function)))
    }
}

/// Recursive procedure to convert a MathML object to `FnUpdate`.
fn math_to_update(
    math: &MathMl,
    graph: &RegulatoryGraph,
    transition: &SbmlTransition,
    id_to_var: &FxHashMap<String, String>,
) -> Result<FnUpdate, ModelError> {
    let convert = |math: &MathMl| math_to_update(math, graph, transition, id_to_var);
    match math {
        MathMl::Boolean(value) => Ok(FnUpdate::Const(*value)),
        MathMl::Integer(0) => Ok(FnUpdate::Const(false)),
        MathMl::Integer(1) => Ok(FnUpdate::Const(true)),
        MathMl::Integer(i) => {
            let message = format!(
                "Cannot convert integer `{}` in transition `{}` to Boolean.",
                i, transition.id
            );
            let error = SemanticError::new(SemanticErrorKind::NonBooleanDomain, vec![], message);
            Err(error.into())
        }
        MathMl::Identifier(name) => {
            // Identifiers can reference transition inputs or species directly.
            let species = transition
                .inputs
                .iter()
                .find(|i| i.id.as_deref() == Some(name.as_str()))
                .map(|i| i.qual_species.as_str())
                .unwrap_or(name.as_str());
            id_to_var
                .get(species)
                .and_then(|name| graph.find_variable(name))
                .map(FnUpdate::Var)
                .ok_or_else(|| {
                    let message = format!(
                        "Identifier `{}` in transition `{}` is not an input nor a species.",
                        name, transition.id
                    );
                    SemanticError::new(SemanticErrorKind::UnknownVariable, vec![name.clone()], message)
                        .into()
                })
        }
        MathMl::Apply(op, args) => match op.as_str() {
            "not" => match args.as_slice() {
                [inner] => Ok(FnUpdate::mk_not(convert(inner)?)),
                _ => Err(transition_error(
                    transition,
                    format!("Negation needs exactly one argument, {} given.", args.len()),
                )),
            },
            "eq" | "neq" | "geq" | "leq" | "lt" | "gt" | "implies" | "xor" => {
                // These are strictly binary.
                match args.as_slice() {
                    [left, right] => {
                        let left = convert(left)?;
                        let right = convert(right)?;
                        Ok(match op.as_str() {
                            "implies" => FnUpdate::mk_binary(BinaryOp::Imp, left, right),
                            "xor" => FnUpdate::mk_binary(BinaryOp::Xor, left, right),
                            _ => transform_comparison(op, left, right),
                        })
                    }
                    _ => Err(transition_error(
                        transition,
                        format!(
                            "Operation `{}` requires exactly 2 arguments, {} given.",
                            op,
                            args.len()
                        ),
                    )),
                }
            }
            "and" | "or" => {
                // Some CNF/DNF editors output n-ary conjunctions and disjunctions.
                let is_and = op == "and";
                let op = if is_and { BinaryOp::And } else { BinaryOp::Or };
                let mut functions = Vec::with_capacity(args.len());
                for arg in args {
                    functions.push(convert(arg)?);
                }
                let mut functions = functions.into_iter();
                match functions.next() {
                    None => Ok(FnUpdate::Const(is_and)),
                    Some(first) => {
                        Ok(functions.fold(first, |l, r| FnUpdate::mk_binary(op, l, r)))
                    }
                }
            }
            _ => Err(transition_error(
                transition,
                format!("Unknown MathML operator `{}`.", op),
            )),
        },
    }
}

/// Utility function for turning comparisons into valid `FnUpdate` functions.
///
/// Allowed `op` values are `eq`, `neq`, `geq`, `leq`, `lt` and `gt`.
fn transform_comparison(op: &str, left: FnUpdate, right: FnUpdate) -> FnUpdate {
    match op {
        "gt" => transform_comparison("lt", right, left), // A > B === B < A
        "geq" => transform_comparison("leq", right, left), // A >= B === B <= A
        "neq" => match transform_comparison("eq", left, right) {
            // Add as little bloat as possible.
            FnUpdate::Not(inner) => *inner,
            FnUpdate::Const(b) => FnUpdate::Const(!b),
            eq => FnUpdate::mk_not(eq),
        },
        "lt" => match (left, right) {
            // A < B === !A & B
            (FnUpdate::Const(true), _) => FnUpdate::Const(false),
            (FnUpdate::Const(false), right) => right,
            (left, FnUpdate::Const(true)) => FnUpdate::mk_not(left),
            (_, FnUpdate::Const(false)) => FnUpdate::Const(false),
            (left, right) => FnUpdate::mk_binary(BinaryOp::And, FnUpdate::mk_not(left), right),
        },
        "leq" => match (left, right) {
            // A <= B === A => B
            (FnUpdate::Const(true), right) => right,
            (FnUpdate::Const(false), _) => FnUpdate::Const(true),
            (_, FnUpdate::Const(true)) => FnUpdate::Const(true),
            (left, FnUpdate::Const(false)) => FnUpdate::mk_not(left),
            (left, right) => FnUpdate::mk_binary(BinaryOp::Imp, left, right),
        },
        // Only `eq` remains.
        _ => match (left, right) {
            (left, right) if left == right => FnUpdate::Const(true),
            (FnUpdate::Const(true), other) | (other, FnUpdate::Const(true)) => other,
            (FnUpdate::Const(false), other) | (other, FnUpdate::Const(false)) => {
                FnUpdate::mk_not(other)
            }
            (left, right) => FnUpdate::mk_binary(BinaryOp::Iff, left, right),
        },
    }
}

fn boolean_level(transition: &SbmlTransition, level: u32) -> Result<bool, ModelError> {
    match level {
        0 => Ok(false),
        1 => Ok(true),
        _ => {
            let message = format!(
                "Cannot convert result level {} of transition `{}` to Boolean.",
                level, transition.id
            );
            let error = SemanticError::new(SemanticErrorKind::NonBooleanDomain, vec![], message);
            Err(error.into())
        }
    }
}

fn transition_error(transition: &SbmlTransition, message: impl Into<String>) -> ModelError {
    ParseError::new(ModelFormat::Sbml, Position::at_line(transition.line), message).into()
}

use crate::error::ConversionError;
use crate::{BinaryOp, BooleanNetwork, FnUpdate, ModelFormat};
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    /// A regex which only matches valid `.bnet` names.
    static ref BNET_NAME_REGEX: Regex = Regex::new(r"^[a-zA-Z_][a-zA-Z0-9_]*$").unwrap();
}

impl BooleanNetwork {
    /// Produce a `.bnet` string representation of this model.
    ///
    /// Returns an error if some variable has regulators but no update function, since such a
    /// network cannot be written as `.bnet`. Also returns an error if the network contains
    /// names which are not supported in `.bnet`, such as starting with numbers.
    ///
    /// However, you can override this behaviour using `rename_if_necessary`. If this flag is set,
    /// all invalid names will be prefixed with `_`.
    ///
    /// A variable without regulators, targets and update function is rejected too: `.bnet` can
    /// only declare variables through functions, so it would be lost. Regulation signs and
    /// essentiality are not written.
    pub fn to_bnet(&self, rename_if_necessary: bool) -> Result<String, ConversionError> {
        let mut names = Vec::with_capacity(self.num_vars());
        for var in self.variables() {
            let name = self.get_variable_name(var);
            if BNET_NAME_REGEX.is_match(name) {
                names.push(name.clone());
            } else if rename_if_necessary {
                names.push(format!("_{}", name));
            } else {
                return Err(ConversionError::encode(
                    ModelFormat::Bnet,
                    format!(
                        "Variable `{}` cannot be exported to .bnet. Please rename it first.",
                        name
                    ),
                ));
            }
        }
        let unique: HashSet<&String> = names.iter().collect();
        if unique.len() != names.len() {
            return Err(ConversionError::encode(
                ModelFormat::Bnet,
                "Renaming variables for .bnet export creates duplicate names.",
            ));
        }

        let mut model = "targets,factors\n".to_string();
        for var in self.variables() {
            match self.get_update_function(var) {
                Some(function) => {
                    let line = format!(
                        "{}, {}\n",
                        names[var.to_index()],
                        fn_update_to_bnet_string(function, &names)
                    );
                    model.push_str(line.as_str());
                }
                None if self.regulators(var).is_empty() && !self.targets(var).is_empty() => {
                    // Re-created from the functions it appears in.
                }
                None if self.regulators(var).is_empty() => {
                    return Err(ConversionError::encode(
                        ModelFormat::Bnet,
                        format!(
                            "Variable `{}` has no regulators, targets or update function and cannot be written to .bnet.",
                            self.get_variable_name(var)
                        ),
                    ));
                }
                None => {
                    return Err(ConversionError::encode(
                        ModelFormat::Bnet,
                        format!(
                            "Variable `{}` has no update function. Partially specified networks cannot be converted to .bnet.",
                            self.get_variable_name(var)
                        ),
                    ));
                }
            }
        }

        Ok(model)
    }
}

/// **(internal)** Write a function using only the `&`, `|` and `!` operators of `.bnet`.
fn fn_update_to_bnet_string(function: &FnUpdate, names: &[String]) -> String {
    match function {
        FnUpdate::Var(id) => names[id.to_index()].clone(),
        FnUpdate::Const(value) => if *value { "1" } else { "0" }.to_string(),
        FnUpdate::Not(inner) => format!("!{}", fn_update_to_bnet_string(inner, names)),
        FnUpdate::Binary(op, left, right) => match *op {
            BinaryOp::And => format!(
                "({} & {})",
                fn_update_to_bnet_string(left, names),
                fn_update_to_bnet_string(right, names)
            ),
            BinaryOp::Or => format!(
                "({} | {})",
                fn_update_to_bnet_string(left, names),
                fn_update_to_bnet_string(right, names)
            ),
            BinaryOp::Imp => format!(
                "(!{} | {})",
                fn_update_to_bnet_string(left, names),
                fn_update_to_bnet_string(right, names)
            ),
            BinaryOp::Xor | BinaryOp::Iff => {
                let mut operands = Vec::new();
                let negated = collect_parity(function, &mut operands);
                parity_to_bnet_string(&operands, negated, names)
            }
        },
    }
}

/// **(internal)** Flatten nested `^` and `<=>` into a list of operands. The function is the
/// xor of the operands, negated if the result is `true`.
fn collect_parity<'a>(function: &'a FnUpdate, operands: &mut Vec<&'a FnUpdate>) -> bool {
    match function {
        FnUpdate::Binary(BinaryOp::Xor, left, right) => {
            collect_parity(left, operands) ^ collect_parity(right, operands)
        }
        FnUpdate::Binary(BinaryOp::Iff, left, right) => {
            !(collect_parity(left, operands) ^ collect_parity(right, operands))
        }
        _ => {
            operands.push(function);
            false
        }
    }
}

/// **(internal)** Write the (possibly negated) xor of `operands` as a balanced tree.
///
/// Each half is written in both polarities, so a chain of `n` operands needs `n^2` of them.
fn parity_to_bnet_string(operands: &[&FnUpdate], negated: bool, names: &[String]) -> String {
    if let [operand] = operands {
        let operand = fn_update_to_bnet_string(operand, names);
        return if negated {
            format!("!{}", operand)
        } else {
            operand
        };
    }
    let (left, right) = operands.split_at(operands.len() / 2);
    let left_true = parity_to_bnet_string(left, false, names);
    let left_false = parity_to_bnet_string(left, true, names);
    let right_true = parity_to_bnet_string(right, negated, names);
    let right_false = parity_to_bnet_string(right, !negated, names);
    // `l ^ r` is `(l & !r) | (!l & r)`, the negation swaps the polarity of `r`.
    format!(
        "(({} & {}) | ({} & {}))",
        left_true, right_false, left_false, right_true
    )
}

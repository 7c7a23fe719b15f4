use crate::expression::Expression;
use crate::symbolic::{FunctionTable, SymbolicContext};
use crate::{BinaryOp, FnUpdate, RegulatoryGraph, VariableId};
use biodivine_lib_bdd::op_function::{and, and_not};
use biodivine_lib_bdd::{bdd, Bdd, BddVariable, BddVariableSet, BddVariableSetBuilder};
use num_bigint::BigUint;
use num_traits::ToPrimitive;
use std::convert::TryFrom;
use std::ops::Shr;

impl SymbolicContext {
    /// Create a new `SymbolicContext` with state and next-state variables for every
    /// variable of the given `graph`, but no unknown functions.
    pub fn new(graph: &RegulatoryGraph) -> Result<SymbolicContext, String> {
        Self::with_functions(graph, &[], &[])
    }

    /// Create a new `SymbolicContext` which additionally encodes the given named
    /// `placeholders` (name and arity) and an implicit function of its regulators for every
    /// variable in `implicit`.
    pub fn with_functions(
        graph: &RegulatoryGraph,
        placeholders: &[(String, u16)],
        implicit: &[VariableId],
    ) -> Result<SymbolicContext, String> {
        // First, check if the network can be encoded using u16::MAX symbolic variables:
        let mut symbolic_size: u32 = 2 * u32::try_from(graph.num_vars()).unwrap_or(u32::MAX);
        for (_, arity) in placeholders {
            symbolic_size = symbolic_size.saturating_add(arity_to_row_count(u32::from(*arity)));
        }
        for variable in implicit {
            let arity = u32::try_from(graph.regulators(*variable).len()).unwrap_or(u32::MAX);
            symbolic_size = symbolic_size.saturating_add(arity_to_row_count(arity));
        }
        if symbolic_size >= u32::from(u16::MAX) {
            return Err(format!(
                "The network is too large. {} symbolic variables needed, but {} available.",
                symbolic_size,
                u16::MAX
            ));
        }

        let mut builder = BddVariableSetBuilder::new();

        // Each state variable is directly followed by its primed copy and then by the table of
        // its implicit function (if any). This keeps related symbolic variables close together.
        let mut state_variables: Vec<BddVariable> = Vec::new();
        let mut next_state_variables: Vec<BddVariable> = Vec::new();
        let mut implicit_function_tables: Vec<Option<FunctionTable>> =
            vec![None; graph.num_vars()];
        for variable in graph.variables() {
            let name = graph.get_variable_name(variable);
            state_variables.push(builder.make_variable(name));
            next_state_variables.push(builder.make_variable(&format!("{}'", name)));
            if implicit.contains(&variable) {
                let arity = u16::try_from(graph.regulators(variable).len())
                    .map_err(|_| format!("Too many regulators of `{}`.", name))?;
                let table = FunctionTable::new(&format!("$f_{}", name), arity, &mut builder);
                implicit_function_tables[variable.to_index()] = Some(table);
            }
        }

        let explicit_function_tables: Vec<FunctionTable> = placeholders
            .iter()
            .map(|(name, arity)| FunctionTable::new(name, *arity, &mut builder))
            .collect();

        let mut parameter_variables: Vec<BddVariable> = Vec::new();
        for table in implicit_function_tables.iter().flatten() {
            parameter_variables.extend(table.rows.iter().cloned());
        }
        for table in &explicit_function_tables {
            parameter_variables.extend(table.rows.iter().cloned());
        }

        Ok(SymbolicContext {
            bdd: builder.build(),
            state_variables,
            next_state_variables,
            parameter_variables,
            explicit_function_tables,
            implicit_function_tables,
        })
    }

    /// Provides access to the raw `Bdd` context.
    pub fn bdd_variable_set(&self) -> &BddVariableSet {
        &self.bdd
    }

    pub fn num_state_variables(&self) -> usize {
        self.state_variables.len()
    }

    /// Getter for variables encoding the state variables of the network.
    pub fn state_variables(&self) -> &Vec<BddVariable> {
        &self.state_variables
    }

    /// Getter for the primed copies of state variables.
    pub fn next_state_variables(&self) -> &Vec<BddVariable> {
        &self.next_state_variables
    }

    /// Getter for variables encoding the rows of all unknown functions.
    pub fn parameter_variables(&self) -> &Vec<BddVariable> {
        &self.parameter_variables
    }

    /// Get the `BddVariable` representing the network variable with the given `VariableId`.
    pub fn get_state_variable(&self, variable: VariableId) -> BddVariable {
        self.state_variables[variable.to_index()]
    }

    pub fn get_next_state_variable(&self, variable: VariableId) -> BddVariable {
        self.next_state_variables[variable.to_index()]
    }

    /// Find the function table of a placeholder with the given `name`.
    pub fn find_explicit_function_table(&self, name: &str) -> Option<&FunctionTable> {
        self.explicit_function_tables
            .iter()
            .find(|table| table.name == name)
    }

    /// Getter for the entire function table of an implicit update function, if the variable
    /// has one.
    pub fn get_implicit_function_table(&self, variable: VariableId) -> Option<&FunctionTable> {
        self.implicit_function_tables[variable.to_index()].as_ref()
    }

    /// Create a constant true/false `Bdd`.
    pub fn mk_constant(&self, value: bool) -> Bdd {
        if value {
            self.bdd.mk_true()
        } else {
            self.bdd.mk_false()
        }
    }

    /// Create a `Bdd` that is true when given network variable is true.
    pub fn mk_state_variable_is_true(&self, variable: VariableId) -> Bdd {
        self.bdd.mk_var(self.state_variables[variable.to_index()])
    }

    /// Create a `Bdd` that is true when the primed copy of the network variable is true.
    pub fn mk_next_state_variable_is_true(&self, variable: VariableId) -> Bdd {
        self.bdd.mk_var(self.next_state_variables[variable.to_index()])
    }

    /// Create a `Bdd` representing exactly one network state, indexed by `VariableId`.
    pub fn mk_state(&self, state: &[bool]) -> Bdd {
        self.state_variables
            .iter()
            .zip(state)
            .fold(self.bdd.mk_true(), |result, (var, value)| {
                let literal = if *value {
                    self.bdd.mk_var(*var)
                } else {
                    self.bdd.mk_not_var(*var)
                };
                result.and(&literal)
            })
    }

    /// Create a `Bdd` that is true when given `FnUpdate` evaluates to true.
    pub fn mk_fn_update_true(&self, function: &FnUpdate) -> Bdd {
        match function {
            FnUpdate::Const(value) => self.mk_constant(*value),
            FnUpdate::Var(id) => self.mk_state_variable_is_true(*id),
            FnUpdate::Not(inner) => self.mk_fn_update_true(inner).not(),
            FnUpdate::Binary(op, left, right) => {
                let l = self.mk_fn_update_true(left);
                let r = self.mk_fn_update_true(right);
                apply_binary_op(*op, &l, &r)
            }
        }
    }

    /// Create a `Bdd` that is true when the given `Expression` evaluates to true.
    ///
    /// Variables are resolved by name and placeholders use the function tables created by
    /// `SymbolicContext::with_functions`. An unknown name or a placeholder with a different
    /// arity is an error.
    pub fn mk_expression_true(&self, expression: &Expression) -> Result<Bdd, String> {
        match expression {
            Expression::Const(value) => Ok(self.mk_constant(*value)),
            Expression::Var(name) => self
                .state_variables
                .iter()
                .find(|var| self.bdd.name_of(**var) == *name)
                .map(|var| self.bdd.mk_var(*var))
                .ok_or_else(|| format!("Unknown variable `{}`.", name)),
            Expression::Placeholder(name, args) => {
                let table = self
                    .find_explicit_function_table(name)
                    .ok_or_else(|| format!("Unknown function `{}`.", name))?;
                if usize::from(table.arity) != args.len() {
                    return Err(format!(
                        "Function `{}` expects {} argument(s), but {} were given.",
                        name,
                        table.arity,
                        args.len()
                    ));
                }
                let args = args
                    .iter()
                    .map(|arg| self.mk_expression_true(arg))
                    .collect::<Result<Vec<Bdd>, String>>()?;
                Ok(self.mk_function_table_true(table, &args))
            }
            Expression::Not(inner) => Ok(self.mk_expression_true(inner)?.not()),
            Expression::Binary(op, left, right) => {
                let l = self.mk_expression_true(left)?;
                let r = self.mk_expression_true(right)?;
                Ok(apply_binary_op(*op, &l, &r))
            }
        }
    }

    /// Create a `Bdd` that is true when the implicit function of `variable` is true for
    /// its (sorted) regulators.
    ///
    /// Panic: Variable must have an implicit function table.
    pub fn mk_implicit_function_is_true(&self, variable: VariableId, args: &[VariableId]) -> Bdd {
        let table = self.get_implicit_function_table(variable).unwrap_or_else(|| {
            panic!(
                "Variable {:?} does not have an implicit uninterpreted function.",
                variable
            );
        });
        let args: Vec<Bdd> = args
            .iter()
            .map(|v| self.mk_state_variable_is_true(*v))
            .collect();
        self.mk_function_table_true(table, &args)
    }

    /// Create a `Bdd` which is true exactly when the function described by `function_table`
    /// is true for the given (symbolic) arguments.
    pub fn mk_function_table_true(&self, function_table: &FunctionTable, args: &[Bdd]) -> Bdd {
        let mut result = self.bdd.mk_true();
        for (input_row, output) in function_table {
            let row_true = input_row
                .into_iter()
                .zip(args)
                .fold(self.bdd.mk_true(), |result, (i, arg)| {
                    Bdd::binary_op(&result, arg, if i { and } else { and_not })
                });
            let output_true = self.bdd.mk_var(output);
            result = bdd![result & (row_true => output_true)];
        }
        result
    }

    /// The number of valuations of parameter variables that satisfy `bdd`.
    ///
    /// The `bdd` is first projected to the parameter variables, so states are ignored.
    pub fn count_parameter_valuations(&self, bdd: &Bdd) -> f64 {
        let mut state = self.state_variables.clone();
        state.extend(self.next_state_variables.iter().cloned());
        let projected = bdd.exists(&state);
        let unused = usize::from(projected.num_vars()) - self.parameter_variables.len();
        let unused = u16::try_from(unused).unwrap_or(u16::MAX);
        let cardinality: BigUint = projected.exact_cardinality().shr(unused);
        cardinality.to_f64().unwrap_or(f64::INFINITY)
    }
}

/// **(internal)** Apply a `BinaryOp` to two `Bdd` objects.
fn apply_binary_op(op: BinaryOp, l: &Bdd, r: &Bdd) -> Bdd {
    match op {
        BinaryOp::And => l.and(r),
        BinaryOp::Or => l.or(r),
        BinaryOp::Xor => l.xor(r),
        BinaryOp::Imp => l.imp(r),
        BinaryOp::Iff => l.iff(r),
    }
}

/// **(internal)** Compute the number of rows necessary to represent a function with given arity.
fn arity_to_row_count(arity: u32) -> u32 {
    1u32.checked_shl(arity).unwrap_or(u32::MAX)
}

#[cfg(test)]
mod tests {
    use crate::expression::Expression;
    use crate::symbolic::SymbolicContext;
    use crate::{FnUpdate, RegulatoryGraph};
    use pretty_assertions::assert_eq;

    fn graph() -> RegulatoryGraph {
        let mut rg = RegulatoryGraph::new(vec!["a".to_string(), "b".to_string(), "c".to_string()]);
        rg.add_regulation("a", "c", true, None).unwrap();
        rg.add_regulation("b", "c", true, None).unwrap();
        rg
    }

    #[test]
    fn state_and_next_state_variables() {
        let rg = graph();
        let ctx = SymbolicContext::new(&rg).unwrap();
        assert_eq!(3, ctx.num_state_variables());
        assert_eq!(6, ctx.bdd_variable_set().num_vars());
        assert!(ctx.parameter_variables().is_empty());
        let a = rg.find_variable("a").unwrap();
        let next_a = ctx.get_next_state_variable(a);
        assert_eq!("a'", ctx.bdd_variable_set().name_of(next_a));
    }

    #[test]
    fn expressions_and_functions_agree() {
        let rg = graph();
        let ctx = SymbolicContext::new(&rg).unwrap();
        let function = FnUpdate::try_from_str("a & !(b => c)", &rg).unwrap();
        let expression = Expression::parse("a & !(b => c)").unwrap();
        assert_eq!(
            ctx.mk_fn_update_true(&function),
            ctx.mk_expression_true(&expression).unwrap()
        );
        assert!(ctx.mk_expression_true(&Expression::parse("x").unwrap()).is_err());
        assert!(ctx.mk_expression_true(&Expression::parse("f(a)").unwrap()).is_err());
    }

    #[test]
    fn placeholders_and_implicit_functions() {
        let rg = graph();
        let c = rg.find_variable("c").unwrap();
        let ctx = SymbolicContext::with_functions(&rg, &[("f".to_string(), 1)], &[c]).unwrap();
        // Two rows for `f`, four rows for the implicit function of `c`.
        assert_eq!(6, ctx.parameter_variables().len());
        assert!(ctx.find_explicit_function_table("f").is_some());
        assert!(ctx.get_implicit_function_table(c).is_some());

        let f_a = ctx.mk_expression_true(&Expression::parse("f(a)").unwrap()).unwrap();
        assert_eq!(64.0, ctx.count_parameter_valuations(&ctx.mk_constant(true)));
        assert!(!f_a.is_false() && !f_a.is_true());
        assert!(ctx
            .mk_expression_true(&Expression::parse("f(a, b)").unwrap())
            .is_err());

        let state = ctx.mk_state(&[true, false, true]);
        assert_eq!(1.0, state.cardinality() / 2f64.powi(9));
    }
}

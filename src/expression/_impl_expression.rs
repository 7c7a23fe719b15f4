use crate::error::{SemanticError, SemanticErrorKind};
use crate::expression::Expression;
use crate::expression::Expression::*;
use crate::{FnUpdate, RegulatoryGraph};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fmt::{Display, Error, Formatter};

impl Expression {
    /// Names of all variables that appear in this expression, including placeholder arguments.
    pub fn free_variables(&self) -> BTreeSet<String> {
        let mut result = BTreeSet::new();
        self.dump_variables(&mut result);
        result
    }

    /// Write all variables that appear in the expression to the given set.
    pub fn dump_variables(&self, result: &mut BTreeSet<String>) {
        match self {
            Const(_) => {}
            Var(name) => {
                result.insert(name.clone());
            }
            Placeholder(_, args) => {
                for arg in args {
                    arg.dump_variables(result);
                }
            }
            Not(inner) => inner.dump_variables(result),
            Binary(_, l, r) => {
                l.dump_variables(result);
                r.dump_variables(result);
            }
        }
    }

    /// Every placeholder name together with all the arities it is used with.
    ///
    /// A consistent expression uses each placeholder with exactly one arity.
    pub fn placeholders(&self) -> BTreeMap<String, BTreeSet<usize>> {
        fn collect(expression: &Expression, result: &mut BTreeMap<String, BTreeSet<usize>>) {
            match expression {
                Const(_) | Var(_) => {}
                Placeholder(name, args) => {
                    result.entry(name.clone()).or_default().insert(args.len());
                    for arg in args {
                        collect(arg, result);
                    }
                }
                Not(inner) => collect(inner, result),
                Binary(_, l, r) => {
                    collect(l, result);
                    collect(r, result);
                }
            }
        }
        let mut result = BTreeMap::new();
        collect(self, &mut result);
        result
    }

    /// True if the expression contains at least one placeholder.
    pub fn has_placeholders(&self) -> bool {
        match self {
            Const(_) | Var(_) => false,
            Placeholder(_, _) => true,
            Not(inner) => inner.has_placeholders(),
            Binary(_, l, r) => l.has_placeholders() || r.has_placeholders(),
        }
    }

    /// Evaluate the expression in the given assignment of variable names.
    ///
    /// Returns `None` when a free variable is missing from the assignment or when the result
    /// depends on a placeholder. For placeholder-free expressions, the result is always defined
    /// as long as the assignment covers `free_variables`.
    pub fn evaluate(&self, assignment: &HashMap<String, bool>) -> Option<bool> {
        match self {
            Const(value) => Some(*value),
            Var(name) => assignment.get(name).cloned(),
            Placeholder(_, _) => None,
            Not(inner) => inner.evaluate(assignment).map(|it| !it),
            Binary(op, l, r) => {
                let l = l.evaluate(assignment)?;
                let r = r.evaluate(assignment)?;
                Some(op.eval(l, r))
            }
        }
    }

    /// Resolve variable names using the given graph and build the equivalent `FnUpdate`.
    ///
    /// Fails with `UnknownVariable` listing every name that is not declared in `graph`, or with
    /// `UnresolvedPlaceholder` if the expression still contains placeholders.
    pub fn to_fn_update(&self, graph: &RegulatoryGraph) -> Result<FnUpdate, SemanticError> {
        let unknown: Vec<String> = self
            .free_variables()
            .into_iter()
            .filter(|name| graph.find_variable(name).is_none())
            .collect();
        if !unknown.is_empty() {
            let message = format!("Unknown variable(s): {}.", unknown.join(", "));
            return Err(SemanticError::new(
                SemanticErrorKind::UnknownVariable,
                unknown,
                message,
            ));
        }
        let placeholders: Vec<String> = self.placeholders().into_keys().collect();
        if !placeholders.is_empty() {
            let message = format!(
                "Placeholder function(s) {} cannot appear in a fully specified model.",
                placeholders.join(", ")
            );
            return Err(SemanticError::new(
                SemanticErrorKind::UnresolvedPlaceholder,
                placeholders,
                message,
            ));
        }
        Ok(self.resolve(graph))
    }

    /// **(internal)** Conversion once all names are known to be valid variables.
    fn resolve(&self, graph: &RegulatoryGraph) -> FnUpdate {
        match self {
            Const(value) => FnUpdate::Const(*value),
            Var(name) => match graph.find_variable(name) {
                Some(id) => FnUpdate::Var(id),
                None => unreachable!("Variable `{}` checked before resolving.", name),
            },
            Placeholder(name, _) => unreachable!("Placeholder `{}` checked before resolving.", name),
            Not(inner) => FnUpdate::mk_not(inner.resolve(graph)),
            Binary(op, l, r) => FnUpdate::mk_binary(*op, l.resolve(graph), r.resolve(graph)),
        }
    }

    /// Build an expression that refers to the variables of `function` by their names.
    pub fn from_fn_update(function: &FnUpdate, graph: &RegulatoryGraph) -> Expression {
        match function {
            FnUpdate::Const(value) => Const(*value),
            FnUpdate::Var(id) => Var(graph.get_variable_name(*id).clone()),
            FnUpdate::Not(inner) => Not(Box::new(Self::from_fn_update(inner, graph))),
            FnUpdate::Binary(op, l, r) => Binary(
                *op,
                Box::new(Self::from_fn_update(l, graph)),
                Box::new(Self::from_fn_update(r, graph)),
            ),
        }
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        match self {
            Const(value) => write!(f, "{value}")?,
            Var(name) => write!(f, "{name}")?,
            Not(inner) => write!(f, "!{inner}")?,
            Binary(op, l, r) => write!(f, "({l} {op} {r})")?,
            Placeholder(name, args) => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                write!(f, ")")?;
            }
        }
        Ok(())
    }
}

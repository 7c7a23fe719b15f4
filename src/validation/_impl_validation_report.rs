use crate::error::{ModelError, SemanticError, SemanticErrorKind};
use crate::expression::Expression;
use crate::symbolic::{RegulationConstraint, SymbolicContext};
use crate::validation::{Fragment, ValidationIssue, ValidationReport, MAX_PLACEHOLDER_ARITY};
use crate::{BooleanNetwork, RegulatoryGraph, VariableId};
use std::collections::{BTreeMap, BTreeSet};
use std::convert::TryFrom;

/// Validate a `.aeon` fragment whose update functions may contain placeholders.
///
/// Variables without an update function are unknown functions of their regulators. Every
/// problem is reported, and the number of admissible instantiations of all unknown functions
/// is computed whenever the fragment can be encoded symbolically.
pub fn check_update_function(fragment: &str) -> ValidationReport {
    analyse(Fragment::from_text(fragment))
}

/// Validate `expression` as the update function of `variable`, using the other regulations
/// and update functions of `network` as context. The network is not modified.
pub fn check_network_function(
    network: &BooleanNetwork,
    variable: VariableId,
    expression: &str,
) -> ValidationReport {
    analyse(Fragment::from_network(network, variable, expression))
}

impl ValidationIssue {
    /// Unused non-essential regulators are reported, but do not invalidate a fragment.
    pub fn is_warning(&self) -> bool {
        matches!(
            self,
            ValidationIssue::Model(ModelError::Semantic(error))
                if error.kind == SemanticErrorKind::UnusedRegulator
        )
    }
}

impl ValidationReport {
    /// True if the report contains no issues other than warnings.
    pub fn is_valid(&self) -> bool {
        self.issues.iter().all(ValidationIssue::is_warning)
    }

    pub fn errors(&self) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|it| !it.is_warning()).collect()
    }

    pub fn warnings(&self) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|it| it.is_warning()).collect()
    }
}

fn analyse(fragment: Fragment) -> ValidationReport {
    let Fragment {
        variables,
        regulations,
        functions,
        mut issues,
    } = fragment;

    let mut names: BTreeSet<String> = variables.into_iter().collect();
    for (regulator, target, _, _) in &regulations {
        names.insert(regulator.clone());
        names.insert(target.clone());
    }
    for (variable, expression) in &functions {
        names.insert(variable.clone());
        expression.dump_variables(&mut names);
    }

    let mut valid_names = Vec::new();
    for name in names {
        if RegulatoryGraph::is_valid_name(&name) {
            valid_names.push(name);
        } else {
            let message = format!("`{}` is not a valid variable name.", name);
            let error = SemanticError::new(SemanticErrorKind::InvalidIdentifier, vec![name], message);
            issues.push(ModelError::from(error).into());
        }
    }
    // Variables with few regulators first. This keeps the implicit function tables of small
    // functions at the top of the BDD variable ordering.
    valid_names.sort_by_cached_key(|name| regulations.iter().filter(|r| &r.1 == name).count());

    let mut graph = RegulatoryGraph::new(valid_names);
    for (regulator, target, essential, monotonicity) in &regulations {
        if graph.find_variable(regulator).is_none() || graph.find_variable(target).is_none() {
            continue;
        }
        if let Err(error) = graph.add_regulation(regulator, target, *essential, *monotonicity) {
            issues.push(ModelError::from(error).into());
        }
    }

    let mut explicit: Vec<Option<&Expression>> = vec![None; graph.num_vars()];
    for (variable, expression) in &functions {
        if let Some(id) = graph.find_variable(variable) {
            explicit[id.to_index()] = Some(expression);
        }
    }

    check_regulators(&graph, &explicit, &mut issues);

    // Unknown functions: placeholders with a consistent arity and variables without functions.
    let mut arities: BTreeMap<String, BTreeSet<usize>> = BTreeMap::new();
    for (_, expression) in &functions {
        for (name, used) in expression.placeholders() {
            arities.entry(name).or_default().extend(used);
        }
    }
    let mut encodable = true;
    let mut placeholders: Vec<(String, u16)> = Vec::new();
    for (name, used) in arities {
        let used: Vec<usize> = used.into_iter().collect();
        match used.as_slice() {
            [arity] if *arity <= MAX_PLACEHOLDER_ARITY => {
                let arity = u16::try_from(*arity).unwrap_or(u16::MAX);
                placeholders.push((name, arity));
            }
            [arity] => {
                encodable = false;
                issues.push(ValidationIssue::TooComplex {
                    function: name,
                    arity: *arity,
                });
            }
            _ => {
                encodable = false;
                issues.push(ValidationIssue::InconsistentArity {
                    placeholder: name,
                    arities: used,
                });
            }
        }
    }
    let implicit: Vec<VariableId> = graph
        .variables()
        .filter(|it| explicit[it.to_index()].is_none())
        .collect();
    for variable in &implicit {
        let arity = graph.regulators(*variable).len();
        if arity > MAX_PLACEHOLDER_ARITY {
            encodable = false;
            issues.push(ValidationIssue::TooComplex {
                function: graph.get_variable_name(*variable).clone(),
                arity,
            });
        }
    }

    let cardinality = if encodable {
        count_admissible(&graph, &explicit, &placeholders, &implicit, &mut issues)
    } else {
        None
    };

    if cardinality == Some(0.0) && issues.iter().all(ValidationIssue::is_warning) {
        issues.push(ValidationIssue::Unsatisfiable);
    }

    ValidationReport {
        issues,
        cardinality,
    }
}

/// **(internal)** Compare the regulators of every explicit function with the variables that
/// syntactically appear in it.
fn check_regulators(
    graph: &RegulatoryGraph,
    explicit: &[Option<&Expression>],
    issues: &mut Vec<ValidationIssue>,
) {
    for target in graph.variables() {
        let expression = match explicit[target.to_index()] {
            Some(expression) => expression,
            None => continue,
        };
        let target_name = graph.get_variable_name(target);
        let regulators = graph.regulators(target);
        let used = expression.free_variables();
        for name in &used {
            let declared = graph
                .find_variable(name)
                .map(|id| regulators.contains(&id))
                .unwrap_or(true);
            if !declared {
                let error = SemanticError::new(
                    SemanticErrorKind::UndeclaredRegulator,
                    vec![name.clone(), target_name.clone()],
                    format!(
                        "`{}` appears in the update function of `{}` but does not regulate it.",
                        name, target_name
                    ),
                );
                issues.push(ModelError::from(error).into());
            }
        }
        for regulator in regulators {
            let name = graph.get_variable_name(regulator);
            if used.contains(name) {
                continue;
            }
            let essential = graph
                .find_regulation(regulator, target)
                .map(|it| it.is_essential())
                .unwrap_or(false);
            let error = if essential {
                SemanticError::new(
                    SemanticErrorKind::ObservabilityViolation,
                    vec![name.clone(), target_name.clone()],
                    format!("`{}` has no effect in `{}`.", name, target_name),
                )
            } else {
                SemanticError::new(
                    SemanticErrorKind::UnusedRegulator,
                    vec![name.clone(), target_name.clone()],
                    format!(
                        "`{}` regulates `{}`, but does not appear in its update function.",
                        name, target_name
                    ),
                )
            };
            issues.push(ModelError::from(error).into());
        }
    }
}

/// **(internal)** Encode all unknown functions symbolically, check the regulations of every
/// variable and count the instantiations that satisfy all of them.
fn count_admissible(
    graph: &RegulatoryGraph,
    explicit: &[Option<&Expression>],
    placeholders: &[(String, u16)],
    implicit: &[VariableId],
    issues: &mut Vec<ValidationIssue>,
) -> Option<f64> {
    let context = match SymbolicContext::with_functions(graph, placeholders, implicit) {
        Ok(context) => context,
        Err(error) => {
            tracing::warn!(%error, "Fragment cannot be encoded symbolically.");
            let error = SemanticError::new(
                SemanticErrorKind::ResourceLimit,
                Vec::new(),
                format!("Regulations cannot be checked: {}", error),
            );
            issues.push(ModelError::from(error).into());
            return None;
        }
    };

    let mut admissible = context.mk_constant(true);
    for target in graph.variables() {
        let expression = explicit[target.to_index()];
        let fn_is_true = match expression {
            Some(expression) => match context.mk_expression_true(expression) {
                Ok(fn_is_true) => fn_is_true,
                Err(error) => {
                    // Only happens for names that were already reported as invalid.
                    tracing::debug!(%error, "Update function cannot be encoded symbolically.");
                    return None;
                }
            },
            None => context.mk_implicit_function_is_true(target, &graph.regulators(target)),
        };
        let used = expression.map(Expression::free_variables);
        for regulation in graph.regulations().filter(|it| it.get_target() == target) {
            let (constraint, errors) =
                RegulationConstraint::check_regulation(&context, graph, regulation, &fn_is_true);
            // Regulators missing from the expression were already reported.
            let regulator = graph.get_variable_name(regulation.get_regulator());
            if used.as_ref().map(|it| it.contains(regulator)).unwrap_or(true) {
                issues.extend(errors.into_iter().map(|e| ModelError::from(e).into()));
            }
            admissible = admissible.and(&constraint);
        }
    }
    Some(context.count_parameter_valuations(&admissible))
}

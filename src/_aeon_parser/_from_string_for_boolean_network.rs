use crate::_aeon_parser::{read_position, FunctionTemp, RegulationTemp};
use crate::error::{DecodeError, ModelError, ParseError, Position, SemanticError, SemanticErrorKind};
use crate::expression::Expression;
use crate::{BooleanNetwork, Layout, ModelFormat, Regulation, RegulatoryGraph};
use regex::Regex;
use std::collections::{BTreeSet, HashSet};
use std::convert::TryFrom;

lazy_static! {
    /// Regex that matches lines which define an update function.
    static ref FUNCTION_REGEX: Regex =
        Regex::new(r"^\$\s*(?P<name>[a-zA-Z0-9_]+)\s*:\s*(?P<function>.+)$").unwrap();
}

impl TryFrom<&str> for BooleanNetwork {
    type Error = DecodeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        BooleanNetwork::try_from_aeon(value).map(|(network, _)| network)
    }
}

impl BooleanNetwork {
    /// Read a `.aeon` document together with the layout stored in its `#position` comments.
    ///
    /// All problems of the document are collected: every malformed line, every inconsistent
    /// update function and every duplicate declaration is reported in the returned
    /// `DecodeError`.
    pub fn try_from_aeon(model: &str) -> Result<(BooleanNetwork, Layout), DecodeError> {
        let mut issues: Vec<ModelError> = Vec::new();
        let mut regulations = Vec::new();
        let mut functions = Vec::new();
        let mut layout = Layout::new();

        for (index, raw_line) in model.lines().enumerate() {
            let line_number = index + 1;
            let indent = raw_line.len() - raw_line.trim_start().len();
            let line = raw_line.trim();
            if line.is_empty() {
                continue;
            }
            if line.starts_with('#') {
                if let Some((variable, position)) = read_position(line) {
                    layout.insert(variable, position);
                }
                continue;
            }
            if let Some(captures) = FUNCTION_REGEX.captures(line) {
                let variable = captures["name"].to_string();
                if let Some(body) = captures.name("function") {
                    match Expression::parse(body.as_str()) {
                        Ok(expression) => functions.push(FunctionTemp {
                            line: line_number,
                            variable,
                            expression,
                        }),
                        Err(error) => {
                            let offset = indent + body.start();
                            issues.push(error.relocate(ModelFormat::Aeon, line_number, offset).into())
                        }
                    }
                }
            } else if let Some((regulator, monotonicity, essential, target)) =
                Regulation::try_from_string(line)
            {
                regulations.push(RegulationTemp {
                    regulator,
                    target,
                    essential,
                    monotonicity,
                });
            } else {
                let error = ParseError::new(
                    ModelFormat::Aeon,
                    Position::new(line_number, indent + 1),
                    format!("Expected a regulation or an update function, found `{}`.", line),
                );
                issues.push(error.into());
            }
        }

        // Every name that appears in a regulation, an update function or a position is a
        // variable.
        let mut names = BTreeSet::new();
        for regulation in &regulations {
            names.insert(regulation.regulator.clone());
            names.insert(regulation.target.clone());
        }
        for function in &functions {
            names.insert(function.variable.clone());
        }
        names.extend(layout.keys().cloned());

        let mut variables = Vec::new();
        for name in names {
            if RegulatoryGraph::is_valid_name(&name) {
                variables.push(name);
            } else {
                let error = SemanticError::new(
                    SemanticErrorKind::InvalidIdentifier,
                    vec![name.clone()],
                    format!("`{}` is not a valid variable name.", name),
                );
                issues.push(error.into());
            }
        }

        let mut graph = RegulatoryGraph::new(variables);
        for regulation in regulations {
            let endpoints_valid = graph.find_variable(&regulation.regulator).is_some()
                && graph.find_variable(&regulation.target).is_some();
            if !endpoints_valid {
                continue;
            }
            if let Err(error) = graph.add_regulation(
                &regulation.regulator,
                &regulation.target,
                regulation.essential,
                regulation.monotonicity,
            ) {
                issues.push(error.into());
            }
        }

        let mut network = BooleanNetwork::new(graph);
        let mut defined = HashSet::new();
        for function in functions {
            let variable = match network.find_variable(&function.variable) {
                Some(variable) => variable,
                None => continue,
            };
            if !defined.insert(variable) {
                let error = SemanticError::new(
                    SemanticErrorKind::DuplicateUpdateFunction,
                    vec![function.variable.clone()],
                    format!(
                        "Duplicate update function of `{}` on line {}.",
                        function.variable, function.line
                    ),
                );
                issues.push(error.into());
                continue;
            }
            match function.expression.to_fn_update(network.as_graph()) {
                Ok(fn_update) => {
                    if let Err(error) = network.set_update_function(variable, Some(fn_update)) {
                        issues.extend(error.issues);
                    }
                }
                Err(error) => issues.push(error.into()),
            }
        }

        if issues.is_empty() {
            tracing::debug!(
                variables = network.num_vars(),
                regulations = network.as_graph().num_regulations(),
                "Read `.aeon` model."
            );
            Ok((network, layout))
        } else {
            Err(DecodeError::new(ModelFormat::Aeon, issues))
        }
    }
}

use crate::error::{ModelError, ParseError, Position, SemanticError, SemanticErrorKind};
use crate::expression::Expression;
use crate::validation::{Fragment, ValidationIssue};
use crate::{BooleanNetwork, ModelFormat, Regulation, VariableId};
use regex::Regex;
use std::collections::HashSet;

lazy_static! {
    static ref FUNCTION_REGEX: Regex =
        Regex::new(r"^\$\s*(?P<name>[a-zA-Z0-9_]+)\s*:\s*(?P<function>.+)$").unwrap();
}

impl Fragment {
    /// Read a `.aeon` fragment. Malformed lines are recorded as issues and skipped.
    pub(super) fn from_text(text: &str) -> Fragment {
        let mut fragment = Fragment::default();
        let mut defined = HashSet::new();
        for (index, raw_line) in text.lines().enumerate() {
            let line_number = index + 1;
            let indent = raw_line.len() - raw_line.trim_start().len();
            let line = raw_line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            if let Some(captures) = FUNCTION_REGEX.captures(line) {
                let name = captures["name"].to_string();
                let body = match captures.name("function") {
                    Some(body) => body,
                    None => continue,
                };
                match Expression::parse(body.as_str()) {
                    Ok(expression) => {
                        if defined.insert(name.clone()) {
                            fragment.functions.push((name, expression));
                        } else {
                            fragment.push(SemanticError::new(
                                SemanticErrorKind::DuplicateUpdateFunction,
                                vec![name.clone()],
                                format!(
                                    "Duplicate update function of `{}` on line {}.",
                                    name, line_number
                                ),
                            ));
                        }
                    }
                    Err(error) => {
                        let offset = indent + body.start();
                        fragment.push(error.relocate(ModelFormat::Aeon, line_number, offset));
                    }
                }
            } else if let Some((regulator, monotonicity, essential, target)) =
                Regulation::try_from_string(line)
            {
                fragment
                    .regulations
                    .push((regulator, target, essential, monotonicity));
            } else {
                fragment.push(ParseError::new(
                    ModelFormat::Aeon,
                    Position::new(line_number, indent + 1),
                    format!("Expected a regulation or an update function, found `{}`.", line),
                ));
            }
        }
        fragment
    }

    /// Use the regulations and update functions of `network`, but replace the function of
    /// `variable` with `expression`.
    pub(super) fn from_network(
        network: &BooleanNetwork,
        variable: VariableId,
        expression: &str,
    ) -> Fragment {
        let graph = network.as_graph();
        let mut fragment = Fragment {
            variables: network
                .variables()
                .map(|it| network.get_variable_name(it).clone())
                .collect(),
            ..Fragment::default()
        };
        for regulation in graph.regulations() {
            fragment.regulations.push((
                graph.get_variable_name(regulation.get_regulator()).clone(),
                graph.get_variable_name(regulation.get_target()).clone(),
                regulation.is_essential(),
                regulation.get_monotonicity(),
            ));
        }
        for var in network.variables().filter(|it| *it != variable) {
            if let Some(function) = network.get_update_function(var) {
                let name = network.get_variable_name(var).clone();
                fragment
                    .functions
                    .push((name, Expression::from_fn_update(function, graph)));
            }
        }
        match Expression::parse(expression) {
            Ok(parsed) => {
                let name = network.get_variable_name(variable).clone();
                fragment.functions.push((name, parsed));
            }
            Err(error) => fragment.push(error),
        }
        fragment
    }

    fn push<E: Into<ModelError>>(&mut self, error: E) {
        self.issues.push(ValidationIssue::Model(error.into()));
    }
}

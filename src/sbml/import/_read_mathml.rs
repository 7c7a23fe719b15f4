use crate::error::ModelError;
use crate::sbml::import::sbml_error;
use crate::sbml::MATHML;
use roxmltree::{ExpandedName, Node};

const APPLY_TAG: (&str, &str) = (MATHML, "apply");
const NUMBER_TAG: (&str, &str) = (MATHML, "cn");
const IDENTIFIER_TAG: (&str, &str) = (MATHML, "ci");
const SYMBOL_TAG: (&str, &str) = (MATHML, "csymbol");
const TRUE_TAG: (&str, &str) = (MATHML, "true");
const FALSE_TAG: (&str, &str) = (MATHML, "false");

/// The subset of MathML content markup that can appear in a Boolean function term.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MathMl {
    Integer(i64),
    Boolean(bool),
    Identifier(String),
    Apply(String, Vec<MathMl>),
}

/// Read the single expression inside a `<math>` tag.
pub fn read_mathml(math: Node) -> Result<MathMl, ModelError> {
    let mut children = math.children().filter(|c| c.is_element());
    match (children.next(), children.next()) {
        (None, _) => Err(sbml_error(math, "Tag <math> has no children.")),
        (Some(_), Some(_)) => Err(sbml_error(math, "More than one child in a <math> tag.")),
        (Some(expression), None) => read_expression(expression),
    }
}

fn read_expression(math: Node) -> Result<MathMl, ModelError> {
    let tag = math.tag_name();
    if tag == ExpandedName::from(IDENTIFIER_TAG) {
        let id = math.text().map(|s| s.trim()).unwrap_or("");
        return if id.is_empty() {
            Err(sbml_error(math, "Empty math identifier."))
        } else {
            Ok(MathMl::Identifier(id.to_string()))
        };
    }

    if tag == ExpandedName::from(NUMBER_TAG) {
        let value = math.text().map(|s| s.trim()).unwrap_or("");
        if let Some(num_type) = math.attribute("type").filter(|it| *it != "integer") {
            let message = format!("Non-integer numeric types ({}) are not supported.", num_type);
            return Err(sbml_error(math, message));
        }
        return value.parse::<i64>().map(MathMl::Integer).map_err(|_| {
            sbml_error(math, format!("Invalid integer constant: `{}`.", value))
        });
    }

    if tag == ExpandedName::from(TRUE_TAG) || tag == ExpandedName::from(FALSE_TAG) {
        return Ok(MathMl::Boolean(tag.name() == "true"));
    }

    if tag == ExpandedName::from(APPLY_TAG) {
        let op_tag = math
            .first_element_child()
            .ok_or_else(|| sbml_error(math, "MathML <apply> with no child elements."))?;
        if op_tag.tag_name() == ExpandedName::from(SYMBOL_TAG) {
            return Err(sbml_error(
                op_tag,
                "Uninterpreted functions (<csymbol>) are not supported in update functions.",
            ));
        }
        let mut args = Vec::new();
        let mut arg = op_tag.next_sibling_element();
        while let Some(inner) = arg {
            args.push(read_expression(inner)?);
            arg = inner.next_sibling_element();
        }
        return Ok(MathMl::Apply(op_tag.tag_name().name().to_string(), args));
    }

    Err(sbml_error(
        math,
        format!("Unexpected MathML tag `{}`.", tag.name()),
    ))
}

/// Some utility methods for working with MathML trees.
impl MathMl {
    /// Returns true if the expression contains the given identifier.
    pub fn contains_identifier(&self, id: &str) -> bool {
        match self {
            MathMl::Integer(_) | MathMl::Boolean(_) => false,
            MathMl::Identifier(value) => value == id,
            MathMl::Apply(_, args) => args.iter().any(|a| a.contains_identifier(id)),
        }
    }
}

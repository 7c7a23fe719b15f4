use crate::error::ModelError;
use crate::sbml::import::_read_mathml::{read_mathml, MathMl};
use crate::sbml::import::{child_tags, node_position, read_unique_child, sbml_error};
use crate::sbml::{MATHML, SBML_QUAL};
use roxmltree::Node;

/// Maps almost directly to the SBML transition input tag.
pub struct SbmlTransitionInput {
    /// A missing ID is not allowed by SBML, but such files are used in practice.
    pub id: Option<String>,
    pub qual_species: String,
    pub sign: Option<String>,
    /// `None` when the file does not say.
    pub essential: Option<bool>,
}

/// Represents an SBML transition term (the default term has no math).
pub struct SbmlTransitionTerm {
    pub result_level: u32,
    pub math: Option<MathMl>,
}

pub struct SbmlTransition {
    pub id: String,
    /// Line of the transition tag, for error reporting.
    pub line: usize,
    pub inputs: Vec<SbmlTransitionInput>,
    pub outputs: Vec<String>,
    /// Is `None` if the whole function is unspecified.
    pub default_term: Option<SbmlTransitionTerm>,
    pub function_terms: Vec<SbmlTransitionTerm>,
}

/// Read all transitions of the model. A model without `listOfTransitions` has no
/// transitions. Transitions that cannot be read are reported in `issues` and skipped.
pub fn read_transitions(model: Node, issues: &mut Vec<ModelError>) -> Vec<SbmlTransition> {
    let list = match read_unique_child(model, (SBML_QUAL, "listOfTransitions")) {
        Ok(list) => list,
        Err(_) => return Vec::new(),
    };

    let mut result = Vec::new();
    for transition in child_tags(list, (SBML_QUAL, "transition")) {
        match read_transition(transition) {
            Ok(transition) => result.push(transition),
            Err(error) => issues.push(error),
        }
    }
    result
}

fn read_transition(transition: Node) -> Result<SbmlTransition, ModelError> {
    let id = transition
        .attribute((SBML_QUAL, "id"))
        .unwrap_or_default()
        .to_string();

    // Inputs and terms are optional when there aren't any.
    let inputs = read_unique_child(transition, (SBML_QUAL, "listOfInputs")).ok();
    let outputs = read_unique_child(transition, (SBML_QUAL, "listOfOutputs"))?;
    let terms = read_unique_child(transition, (SBML_QUAL, "listOfFunctionTerms")).ok();

    let mut result = SbmlTransition {
        line: node_position(transition).line,
        id,
        inputs: Vec::new(),
        outputs: Vec::new(),
        default_term: None,
        function_terms: Vec::new(),
    };

    if let Some(inputs) = inputs {
        for input in child_tags(inputs, (SBML_QUAL, "input")) {
            result.inputs.push(read_transition_input(input, &result.id)?);
        }
    }

    for output in child_tags(outputs, (SBML_QUAL, "output")) {
        let species = output
            .attribute((SBML_QUAL, "qualitativeSpecies"))
            .ok_or_else(|| {
                let message = format!("Output of transition `{}` has no species.", result.id);
                sbml_error(output, message)
            })?;
        result.outputs.push(species.to_string());
    }

    if let Some(terms) = terms {
        let default_term = read_unique_child(terms, (SBML_QUAL, "defaultTerm"))?;
        let default_term = read_transition_term(default_term, &result.id)?;
        if default_term.math.is_some() {
            let message = format!("Default term in transition `{}` has math.", result.id);
            return Err(sbml_error(terms, message));
        }
        result.default_term = Some(default_term);
        for term in child_tags(terms, (SBML_QUAL, "functionTerm")) {
            result
                .function_terms
                .push(read_transition_term(term, &result.id)?);
        }
    }

    Ok(result)
}

fn read_transition_input(
    input: Node,
    transition_id: &str,
) -> Result<SbmlTransitionInput, ModelError> {
    let species = input
        .attribute((SBML_QUAL, "qualitativeSpecies"))
        .ok_or_else(|| {
            let message = format!("Input of transition `{}` has no species.", transition_id);
            sbml_error(input, message)
        })?;
    // Some tools write `essential` without the qual prefix.
    let essential = input
        .attribute((SBML_QUAL, "essential"))
        .or_else(|| input.attribute("essential"));
    let essential = match essential.map(|it| it.trim()) {
        None => None,
        Some("true") => Some(true),
        Some("false") => Some(false),
        Some(other) => {
            let message = format!(
                "Invalid essential flag `{}` in transition `{}`.",
                other, transition_id
            );
            return Err(sbml_error(input, message));
        }
    };

    Ok(SbmlTransitionInput {
        id: input.attribute((SBML_QUAL, "id")).map(|s| s.to_string()),
        qual_species: species.to_string(),
        sign: input.attribute((SBML_QUAL, "sign")).map(|s| s.to_string()),
        essential,
    })
}

fn read_transition_term(term: Node, transition_id: &str) -> Result<SbmlTransitionTerm, ModelError> {
    let result_level = term.attribute((SBML_QUAL, "resultLevel")).ok_or_else(|| {
        let message = format!("Term result level not specified in `{}`.", transition_id);
        sbml_error(term, message)
    })?;
    let result_level = result_level.trim().parse::<u32>().map_err(|_| {
        let message = format!(
            "Term result level is not a number in `{}`. `{}` given.",
            transition_id, result_level
        );
        sbml_error(term, message)
    })?;

    let math = match read_unique_child(term, (MATHML, "math")) {
        Ok(math) => Some(read_mathml(math)?),
        Err(_) => None,
    };

    Ok(SbmlTransitionTerm { result_level, math })
}

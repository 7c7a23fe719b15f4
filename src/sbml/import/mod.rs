use crate::error::{
    DecodeError, ModelError, ParseError, Position, SemanticError, SemanticErrorKind,
};
use crate::sbml::import::_convert_mathml_to_fn_update::sbml_transition_to_update_function;
use crate::sbml::import::_read_layout::read_sbml_layout;
use crate::sbml::import::_read_species::{read_species, SbmlSpecie};
use crate::sbml::import::_read_transitions::{read_transitions, SbmlTransition};
use crate::sbml::{SBML, SBML_QUAL};
use crate::{BooleanNetwork, Layout, ModelFormat, Monotonicity, RegulatoryGraph, VariableId};
use fxhash::FxHashMap;
use regex::Regex;
use roxmltree::{ExpandedName, Node};
use std::collections::HashSet;

mod _convert_mathml_to_fn_update;
mod _read_layout;
mod _read_mathml;
mod _read_species;
mod _read_transitions;

lazy_static! {
    static ref INVALID_NAME_CHARACTER: Regex = Regex::new(r"[^a-zA-Z0-9_]").unwrap();
}

impl BooleanNetwork {
    /// Try to read a `BooleanNetwork` from an SBML-qual string.
    ///
    /// Also reads `Layout` information from the file. If there is no layout, an empty map is
    /// returned.
    ///
    /// Variables are named by the (normalised) ids of their species, the species `name` becomes
    /// the display name. A transition without function terms leaves the function of its output
    /// unknown. Recoverable oddities (renamed species, unknown layout glyphs) are only
    /// logged, everything else is collected into the returned `DecodeError`.
    pub fn try_from_sbml(model_file: &str) -> Result<(BooleanNetwork, Layout), DecodeError> {
        let fatal = |error: ModelError| DecodeError::new(ModelFormat::Sbml, vec![error]);
        let document = roxmltree::Document::parse(model_file)
            .map_err(|e| DecodeError::fatal(ModelFormat::Sbml, format!("XML error: {}", e)))?;

        let sbml = document.root_element();
        if sbml.tag_name().name() != "sbml" {
            return Err(fatal(sbml_error(sbml, "Root element is not <sbml>.")));
        }
        if sbml.tag_name().namespace() != Some(SBML) {
            let message = "The document does not use the SBML Level 3 namespace.";
            return Err(fatal(sbml_error(sbml, message)));
        }
        if sbml.attribute((SBML_QUAL, "required")) != Some("true") {
            tracing::warn!("This model does not declare SBML-qual as a requirement.");
        }

        let model = read_unique_child(sbml, (SBML, "model")).map_err(fatal)?;

        let mut issues: Vec<ModelError> = Vec::new();
        let species = read_species(model, &mut issues).map_err(fatal)?;
        let transitions = read_transitions(model, &mut issues);
        let specie_to_name = create_normalized_names(&species, &mut issues);

        let mut names: Vec<String> = specie_to_name.values().cloned().collect();
        names.sort();
        names.dedup();
        let mut graph = RegulatoryGraph::new(names);
        for specie in &species {
            let variable = specie_to_name
                .get(&specie.id)
                .and_then(|name| graph.find_variable(name));
            if let (Some(variable), Some(display_name)) = (variable, &specie.name) {
                if display_name != graph.get_variable_name(variable) {
                    graph.set_display_name(variable, Some(display_name.clone()));
                }
            }
        }

        let outputs = create_regulations(&mut graph, &transitions, &specie_to_name, &mut issues);

        let mut network = BooleanNetwork::new(graph);
        let mut defined: HashSet<VariableId> = HashSet::new();
        for (transition, output) in transitions.iter().zip(outputs) {
            let output = match output {
                Some(output) => output,
                None => continue,
            };
            if !defined.insert(output) {
                let name = network.get_variable_name(output).clone();
                let message = format!("Variable `{}` is the output of multiple transitions.", name);
                let error = SemanticError::new(
                    SemanticErrorKind::DuplicateUpdateFunction,
                    vec![name],
                    message,
                );
                issues.push(error.into());
                continue;
            }
            match sbml_transition_to_update_function(network.as_graph(), transition, &specie_to_name)
            {
                Ok(Some(function)) => {
                    if let Err(error) = network.set_update_function(output, Some(function)) {
                        issues.extend(error.issues);
                    }
                }
                Ok(None) => (),
                Err(error) => issues.push(error),
            }
        }

        let layout = read_layout(model, &specie_to_name);

        if issues.is_empty() {
            tracing::debug!(
                variables = network.num_vars(),
                regulations = network.as_graph().num_regulations(),
                "Read SBML model."
            );
            Ok((network, layout))
        } else {
            Err(DecodeError::new(ModelFormat::Sbml, issues))
        }
    }
}

/// **(internal)** The position of the start of `node` in its document.
fn node_position(node: Node) -> Position {
    let position = node.document().text_pos_at(node.range().start);
    Position::new(position.row as usize, position.col as usize)
}

/// **(internal)** A `ParseError` that points at the given XML `node`.
fn sbml_error(node: Node, reason: impl Into<String>) -> ModelError {
    ParseError::new(ModelFormat::Sbml, node_position(node), reason).into()
}

/// **(internal)** Find the given tag in a parent `Node`. Returns error if the tag does
/// not exist or is present in multiple instances.
fn read_unique_child<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    name: (&'static str, &'static str),
) -> Result<Node<'a, 'input>, ModelError> {
    let name = ExpandedName::from(name);
    let mut tags = parent.children().filter(|node| node.tag_name() == name);
    match (tags.next(), tags.next()) {
        (Some(tag), None) => Ok(tag),
        (Some(_), Some(duplicate)) => Err(sbml_error(
            duplicate,
            format!("Multiple <{}> found in <{}>.", name.name(), parent.tag_name().name()),
        )),
        (None, _) => Err(sbml_error(
            parent,
            format!("Could not find <{}> in <{}>.", name.name(), parent.tag_name().name()),
        )),
    }
}

/// **(internal)** Find all child `Nodes` that have a given name.
fn child_tags<'a, 'input: 'a>(
    parent: Node<'a, 'input>,
    name: (&'static str, &'static str),
) -> Vec<Node<'a, 'input>> {
    let name = ExpandedName::from(name);
    parent.children().filter(|n| n.tag_name() == name).collect()
}

/// **(internal)** Assigns every specie a valid variable name derived from its ID. Returns
/// a mapping between SBML IDs and variable names.
///
/// Invalid characters are replaced with `_` and purely numeric IDs are prefixed with `_`.
/// Species whose names clash after this normalisation are reported as duplicates.
fn create_normalized_names(
    species: &[SbmlSpecie],
    issues: &mut Vec<ModelError>,
) -> FxHashMap<String, String> {
    let mut id_to_name = FxHashMap::default();
    let mut name_to_id: FxHashMap<String, String> = FxHashMap::default();
    for specie in species {
        let mut normalized = INVALID_NAME_CHARACTER.replace_all(&specie.id, "_").to_string();
        if !RegulatoryGraph::is_valid_name(&normalized) {
            normalized = format!("_{}", normalized);
        }
        if normalized != specie.id {
            tracing::warn!(
                "Renamed specie `{}` to `{}`. The original ID is not a valid variable name.",
                specie.id,
                normalized
            );
        }
        if let Some(previous) = name_to_id.get(&normalized) {
            let message = if previous == &specie.id {
                format!("Duplicate specie ID `{}`.", specie.id)
            } else {
                format!(
                    "Species `{}` and `{}` both map to variable `{}`.",
                    previous, specie.id, normalized
                )
            };
            let error = SemanticError::new(
                SemanticErrorKind::DuplicateIdentifier,
                vec![normalized],
                message,
            );
            issues.push(error.into());
            continue;
        }
        name_to_id.insert(normalized.clone(), specie.id.clone());
        id_to_name.insert(specie.id.clone(), normalized);
    }
    id_to_name
}

/// **(internal)** Add regulations to a `RegulatoryGraph` based on the inputs of all
/// `SbmlTransition`s. Returns the output variable of every transition (`None` if the
/// transition is invalid).
///
/// Monotonicity is read from the `sign` of each input. When the essential flag is missing, a
/// regulation is considered essential if its input appears in a function term, or if the
/// transition has no function terms at all.
fn create_regulations(
    graph: &mut RegulatoryGraph,
    transitions: &[SbmlTransition],
    id_to_var: &FxHashMap<String, String>,
    issues: &mut Vec<ModelError>,
) -> Vec<Option<VariableId>> {
    let mut outputs = Vec::with_capacity(transitions.len());
    for transition in transitions {
        if transition.outputs.len() != 1 {
            let message = format!(
                "Every transition must have exactly one output. `{}` has {}.",
                transition.id,
                transition.outputs.len()
            );
            let position = Position::at_line(transition.line);
            issues.push(ParseError::new(ModelFormat::Sbml, position, message).into());
            outputs.push(None);
            continue;
        }

        let out_specie = &transition.outputs[0];
        let out_variable = match id_to_var.get(out_specie) {
            Some(variable) => variable,
            None => {
                issues.push(unknown_specie(out_specie, transition));
                outputs.push(None);
                continue;
            }
        };

        for input in &transition.inputs {
            let in_specie = &input.qual_species;
            let in_variable = match id_to_var.get(in_specie) {
                Some(variable) => variable,
                None => {
                    issues.push(unknown_specie(in_specie, transition));
                    continue;
                }
            };

            let essential = input.essential.unwrap_or_else(|| {
                transition.function_terms.is_empty()
                    || transition.function_terms.iter().any(|term| match &term.math {
                        Some(math) => {
                            math.contains_identifier(in_specie)
                                || input
                                    .id
                                    .as_ref()
                                    .map(|id| math.contains_identifier(id))
                                    .unwrap_or(false)
                        }
                        None => false,
                    })
            });
            let monotonicity = match input.sign.as_deref() {
                Some("positive") => Some(Monotonicity::Activation),
                Some("negative") => Some(Monotonicity::Inhibition),
                _ => None,
            };

            let (in_id, out_id) = match (
                graph.find_variable(in_variable),
                graph.find_variable(out_variable),
            ) {
                (Some(in_id), Some(out_id)) => (in_id, out_id),
                _ => continue,
            };

            // Some files declare a single variable as multiple inputs of the same transition.
            // This is fine as long as the declarations agree.
            if let Some(existing) = graph.find_regulation(in_id, out_id) {
                if existing.is_essential() != essential
                    || existing.get_monotonicity() != monotonicity
                {
                    let message = format!(
                        "Regulation of `{}` by `{}` is declared multiple times with different properties.",
                        out_variable, in_variable
                    );
                    let position = Position::at_line(transition.line);
                    issues.push(ParseError::new(ModelFormat::Sbml, position, message).into());
                }
                continue;
            }

            if let Err(error) = graph.add_regulation(in_variable, out_variable, essential, monotonicity)
            {
                issues.push(error.into());
            }
        }

        outputs.push(graph.find_variable(out_variable));
    }
    outputs
}

fn unknown_specie(specie: &str, transition: &SbmlTransition) -> ModelError {
    let message = format!(
        "Unknown specie `{}` used in transition `{}`.",
        specie, transition.id
    );
    SemanticError::new(
        SemanticErrorKind::UnknownVariable,
        vec![specie.to_string()],
        message,
    )
    .into()
}

/// **(internal)** Read the SBML layout and translate its specie references to variable names.
fn read_layout(model: Node, id_to_var: &FxHashMap<String, String>) -> Layout {
    let glyphs = match read_sbml_layout(model) {
        Ok(glyphs) => glyphs,
        Err(reason) => {
            tracing::warn!(%reason, "SBML layout is ignored.");
            return Layout::new();
        }
    };
    let mut layout = Layout::new();
    for (reference, position) in glyphs {
        match id_to_var.get(&reference) {
            Some(variable) => {
                layout.insert(variable.clone(), position);
            }
            None => tracing::warn!("Skipped layout glyph of unknown specie `{}`.", reference),
        }
    }
    layout
}

#[cfg(test)]
mod tests {
    use crate::error::{ModelError, SemanticErrorKind};
    use crate::test_models::{AEON_MODEL, SBML_MODEL};
    use crate::{BinaryOp, BooleanNetwork, FnUpdate, Monotonicity};
    use pretty_assertions::assert_eq;
    use std::convert::TryFrom;

    /// Wrap species and transitions into a minimal SBML-qual document.
    fn document(species: &str, transitions: &str, layout: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<sbml xmlns="http://www.sbml.org/sbml/level3/version1/core" level="3" version="1"
      xmlns:qual="http://www.sbml.org/sbml/level3/version1/qual/version1" qual:required="true"
      xmlns:layout="http://www.sbml.org/sbml/level3/version1/layout/version1">
<model>
{}
<qual:listOfQualitativeSpecies>{}</qual:listOfQualitativeSpecies>
<qual:listOfTransitions>{}</qual:listOfTransitions>
</model>
</sbml>"#,
            layout, species, transitions
        )
    }

    fn specie(id: &str, name: &str) -> String {
        format!(
            r#"<qual:qualitativeSpecies qual:id="{}" qual:name="{}" qual:maxLevel="1"/>"#,
            id, name
        )
    }

    #[test]
    fn read_cortical_network() {
        let (network, layout) = BooleanNetwork::try_from_sbml(SBML_MODEL).unwrap();
        let expected = BooleanNetwork::try_from(AEON_MODEL).unwrap();
        assert_eq!(expected, network);
        assert!(layout.is_empty());
    }

    #[test]
    fn transition_terms() {
        let species = [
            specie("a", "Alpha"),
            specie("b", "b"),
            specie("c", "c"),
            specie("d", "d"),
        ]
        .concat();
        let transitions = r#"
<qual:transition qual:id="tr_a">
  <qual:listOfInputs>
    <qual:input qual:id="in_b" qual:qualitativeSpecies="b" qual:sign="negative"/>
    <qual:input qual:qualitativeSpecies="c" qual:sign="dual"/>
  </qual:listOfInputs>
  <qual:listOfOutputs><qual:output qual:qualitativeSpecies="a"/></qual:listOfOutputs>
  <qual:listOfFunctionTerms>
    <qual:defaultTerm qual:resultLevel="1"/>
    <qual:functionTerm qual:resultLevel="0">
      <math xmlns="http://www.w3.org/1998/Math/MathML">
        <apply><and/><apply><eq/><ci>in_b</ci><cn type="integer">1</cn></apply></apply>
      </math>
    </qual:functionTerm>
  </qual:listOfFunctionTerms>
</qual:transition>
<qual:transition qual:id="tr_b">
  <qual:listOfOutputs><qual:output qual:qualitativeSpecies="b"/></qual:listOfOutputs>
  <qual:listOfFunctionTerms><qual:defaultTerm qual:resultLevel="1"/></qual:listOfFunctionTerms>
</qual:transition>
<qual:transition qual:id="tr_d">
  <qual:listOfInputs><qual:input qual:qualitativeSpecies="c" qual:sign="positive"/></qual:listOfInputs>
  <qual:listOfOutputs><qual:output qual:qualitativeSpecies="d"/></qual:listOfOutputs>
</qual:transition>"#;
        let layout = r#"
<layout:listOfLayouts><layout:layout layout:id="main">
<layout:listOfAdditionalGraphicalObjects>
  <layout:generalGlyph layout:id="_ly_a" layout:reference="a"><layout:boundingBox>
    <layout:position layout:x="1.5" layout:y="-2"/>
  </layout:boundingBox></layout:generalGlyph>
  <layout:generalGlyph layout:id="_ly_x" layout:reference="x"><layout:boundingBox>
    <layout:position layout:x="0" layout:y="0"/>
  </layout:boundingBox></layout:generalGlyph>
</layout:listOfAdditionalGraphicalObjects>
</layout:layout></layout:listOfLayouts>"#;

        let (network, layout) =
            BooleanNetwork::try_from_sbml(&document(&species, transitions, layout)).unwrap();
        let a = network.find_variable("a").unwrap();
        let b = network.find_variable("b").unwrap();
        let c = network.find_variable("c").unwrap();
        let d = network.find_variable("d").unwrap();

        assert_eq!("Alpha", network.get_variable(a).get_label());
        assert_eq!(None, network.get_variable(b).get_display_name());

        // Default level one with a zero term is a negation of the term.
        assert_eq!(
            &Some(FnUpdate::mk_not(FnUpdate::Var(b))),
            network.get_update_function(a)
        );
        assert_eq!(&Some(FnUpdate::Const(true)), network.get_update_function(b));
        assert_eq!(&None, network.get_update_function(c));
        assert_eq!(&None, network.get_update_function(d));

        let graph = network.as_graph();
        let ba = graph.find_regulation(b, a).unwrap();
        assert!(ba.is_essential());
        assert_eq!(Some(Monotonicity::Inhibition), ba.get_monotonicity());
        // `c` does not appear in the function term.
        let ca = graph.find_regulation(c, a).unwrap();
        assert!(!ca.is_essential());
        assert_eq!(None, ca.get_monotonicity());
        // Without function terms, inputs are essential.
        assert!(graph.find_regulation(c, d).unwrap().is_essential());

        assert_eq!(1, layout.len());
        assert_eq!(Some(&(1.5, -2.0)), layout.get("a"));
    }

    #[test]
    fn invalid_species_are_renamed() {
        let species = [specie("1", "one"), specie("x-y", "x-y")].concat();
        let transitions = r#"
<qual:transition qual:id="tr">
  <qual:listOfInputs><qual:input qual:qualitativeSpecies="1" essential="true"/></qual:listOfInputs>
  <qual:listOfOutputs><qual:output qual:qualitativeSpecies="x-y"/></qual:listOfOutputs>
  <qual:listOfFunctionTerms>
    <qual:defaultTerm qual:resultLevel="0"/>
    <qual:functionTerm qual:resultLevel="1">
      <math xmlns="http://www.w3.org/1998/Math/MathML">
        <apply><xor/><ci>1</ci><true/></apply>
      </math>
    </qual:functionTerm>
  </qual:listOfFunctionTerms>
</qual:transition>"#;
        let (network, _) =
            BooleanNetwork::try_from_sbml(&document(&species, transitions, "")).unwrap();
        let one = network.find_variable("_1").unwrap();
        let xy = network.find_variable("x_y").unwrap();
        assert_eq!("x-y", network.get_variable(xy).get_label());
        assert_eq!(
            &Some(FnUpdate::mk_binary(
                BinaryOp::Xor,
                FnUpdate::Var(one),
                FnUpdate::Const(true)
            )),
            network.get_update_function(xy)
        );
    }

    #[test]
    fn problems_are_collected() {
        let species = [
            specie("a", "a"),
            r#"<qual:qualitativeSpecies qual:id="m" qual:maxLevel="2"/>"#.to_string(),
        ]
        .concat();
        let transitions = r#"
<qual:transition qual:id="tr_a">
  <qual:listOfInputs><qual:input qual:qualitativeSpecies="unknown"/></qual:listOfInputs>
  <qual:listOfOutputs><qual:output qual:qualitativeSpecies="a"/></qual:listOfOutputs>
  <qual:listOfFunctionTerms>
    <qual:defaultTerm qual:resultLevel="0"/>
    <qual:functionTerm qual:resultLevel="1">
      <math xmlns="http://www.w3.org/1998/Math/MathML"><apply><plus/><ci>a</ci></apply></math>
    </qual:functionTerm>
  </qual:listOfFunctionTerms>
</qual:transition>"#;
        let error =
            BooleanNetwork::try_from_sbml(&document(&species, transitions, "")).unwrap_err();
        assert_eq!(3, error.issues.len());
        let kinds: Vec<Option<SemanticErrorKind>> = error
            .issues
            .iter()
            .map(|issue| match issue {
                ModelError::Semantic(e) => Some(e.kind),
                _ => None,
            })
            .collect();
        assert_eq!(
            vec![
                Some(SemanticErrorKind::NonBooleanDomain),
                Some(SemanticErrorKind::UnknownVariable),
                None,
            ],
            kinds
        );
    }

    #[test]
    fn invalid_documents() {
        assert!(BooleanNetwork::try_from_sbml("<sbml").is_err());
        assert!(BooleanNetwork::try_from_sbml("<model/>").is_err());
        let wrong_namespace = r#"<sbml xmlns="http://www.sbml.org/sbml/level2"><model/></sbml>"#;
        let error = BooleanNetwork::try_from_sbml(wrong_namespace).unwrap_err();
        assert_eq!(1, error.issues.len());
    }
}

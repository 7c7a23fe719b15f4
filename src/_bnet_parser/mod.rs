use crate::error::{DecodeError, ModelError, ParseError, Position, SemanticError, SemanticErrorKind};
use crate::expression::Expression;
use crate::symbolic::{RegulationConstraint, SymbolicContext};
use crate::{BooleanNetwork, ModelFormat, RegulatoryGraph};
use std::collections::{BTreeSet, HashMap};

impl BooleanNetwork {
    /// Try to load a Boolean network from a `.bnet` model.
    ///
    /// `.bnet` only lists update functions, so the regulations are inferred from them: a
    /// regulator is essential if it has an effect on the function, and is an activator or an
    /// inhibitor if the function is monotonous in it. Regulators that appear in a function
    /// without any effect become non-essential, unsigned regulations.
    ///
    /// Variables that only appear as regulators have no update function.
    pub fn try_from_bnet(model_string: &str) -> Result<BooleanNetwork, DecodeError> {
        let mut issues: Vec<ModelError> = Vec::new();
        let mut functions: Vec<(String, Expression)> = Vec::new();
        let mut defined: HashMap<String, usize> = HashMap::new();
        let mut variables = BTreeSet::new();
        for (index, line) in model_string.lines().enumerate() {
            let line_number = index + 1;
            let trimmed = line.trim();
            if trimmed.starts_with('#') || trimmed.is_empty() || trimmed.starts_with("targets,") {
                continue; // Skip comments, empty lines and header.
            }
            let segments = line.split(',').collect::<Vec<_>>();
            if segments.len() != 2 {
                issues.push(
                    ParseError::new(
                        ModelFormat::Bnet,
                        Position::at_line(line_number),
                        format!("Expected `target, function`, found `{}`.", trimmed),
                    )
                    .into(),
                );
                continue;
            }

            let variable_name = segments[0].trim().to_string();
            if let Some(first) = defined.get(&variable_name) {
                let error = SemanticError::new(
                    SemanticErrorKind::DuplicateUpdateFunction,
                    vec![variable_name.clone()],
                    format!(
                        "Duplicate function declaration for `{}` (first declared on line {}).",
                        variable_name, first
                    ),
                );
                issues.push(error.into());
                continue;
            }
            defined.insert(variable_name.clone(), line_number);
            variables.insert(variable_name.clone());

            // Also scan regulators for variable names, as inputs don't need to have a function.
            let function_string = segments[1];
            let offset = segments[0].len() + 1 + (function_string.len() - function_string.trim_start().len());
            match Expression::parse(function_string.trim()) {
                Ok(function) => {
                    function.dump_variables(&mut variables);
                    functions.push((variable_name, function));
                }
                Err(error) => {
                    issues.push(error.relocate(ModelFormat::Bnet, line_number, offset).into())
                }
            }
        }

        let mut names = Vec::new();
        for name in variables {
            if RegulatoryGraph::is_valid_name(&name) {
                names.push(name);
            } else {
                let message = format!("`{}` is not a valid variable name.", name);
                let error =
                    SemanticError::new(SemanticErrorKind::InvalidIdentifier, vec![name], message);
                issues.push(error.into());
            }
        }
        if !issues.is_empty() {
            return Err(DecodeError::new(ModelFormat::Bnet, issues));
        }

        let mut graph = RegulatoryGraph::new(names);
        let ctx = SymbolicContext::new(&graph)
            .map_err(|error| DecodeError::fatal(ModelFormat::Bnet, error))?;

        // First, build graph.
        let mut resolved = Vec::new();
        for (target_name, function) in functions {
            let fn_update = match function.to_fn_update(&graph) {
                Ok(fn_update) => fn_update,
                Err(error) => {
                    issues.push(error.into());
                    continue;
                }
            };
            let target = match graph.find_variable(&target_name) {
                Some(target) => target,
                None => continue,
            };
            let fn_is_true = ctx.mk_fn_update_true(&fn_update);
            for regulator in fn_update.collect_arguments() {
                let inferred = RegulationConstraint::infer_sufficient_regulation(
                    &ctx,
                    regulator,
                    target,
                    &fn_is_true,
                );
                let (essential, monotonicity) = inferred
                    .map(|it| (it.is_essential(), it.get_monotonicity()))
                    .unwrap_or((false, None));
                let regulator_name = graph.get_variable_name(regulator).clone();
                if let Err(error) =
                    graph.add_regulation(&regulator_name, &target_name, essential, monotonicity)
                {
                    issues.push(error.into());
                }
            }
            resolved.push((target, fn_update));
        }

        // Then add functions.
        let mut network = BooleanNetwork::new(graph);
        for (target, fn_update) in resolved {
            if let Err(error) = network.set_update_function(target, Some(fn_update)) {
                issues.extend(error.issues);
            }
        }

        if issues.is_empty() {
            Ok(network)
        } else {
            Err(DecodeError::new(ModelFormat::Bnet, issues))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ModelError, Position, SemanticErrorKind};
    use crate::test_models::BNET_MODEL;
    use crate::BooleanNetwork;
    use crate::Monotonicity::{Activation, Inhibition};
    use pretty_assertions::assert_eq;

    const MAPK_MODEL: &str = r"# model in BoolNet format
# the header targets, factors is mandatory to be importable in the R package BoolNet

targets, factors
Apoptosis,      !DNA_damage&!ERK&p38&JNK&!MDM2 | DNA_damage&!ERK&!p38&JNK&!MDM2 | DNA_damage&!ERK&p38&JNK
DNA_damage,     DNA_damage
EGFR_stimulus,  EGFR_stimulus
ERK,            !DNA_damage&!ERK&!p38&!JNK&!PLCG&RAS | !DNA_damage&!ERK&!p38&!JNK&PLCG&!PI3K | !DNA_damage&!ERK&!p38&!JNK&PLCG&PI3K&RAS | !DNA_damage&ERK&!p38&!JNK&RAS | DNA_damage&!ERK&!p38&!JNK&!PLCG&RAS | DNA_damage&!ERK&!p38&!JNK&PLCG&!PI3K | DNA_damage&!ERK&!p38&!JNK&PLCG&PI3K&!RAS&!MDM2 | DNA_damage&!ERK&!p38&!JNK&PLCG&PI3K&RAS | DNA_damage&ERK&!p38&!JNK&RAS
FGFR3_stimulus, FGFR3_stimulus
GADD45,         !TGFBR_stimulus&!DNA_damage&p38&!MDM2 | !TGFBR_stimulus&DNA_damage&!p38&!MDM2 | !TGFBR_stimulus&DNA_damage&p38 | TGFBR_stimulus
GRB2,           !EGFR_stimulus&!FGFR3_stimulus&!TGFBR_stimulus&ERK&!GRB2&!PLCG | !EGFR_stimulus&!FGFR3_stimulus&TGFBR_stimulus | !EGFR_stimulus&FGFR3_stimulus&!TGFBR_stimulus&!GRB2&!PLCG | !EGFR_stimulus&FGFR3_stimulus&TGFBR_stimulus | EGFR_stimulus&!TGFBR_stimulus&!GRB2&!PLCG | EGFR_stimulus&TGFBR_stimulus
Growth_Arrest,  !DNA_damage&p38&!MDM2 | DNA_damage&!p38&!MDM2 | DNA_damage&p38
MDM2,           !DNA_damage&!ERK&!p38&PI3K | DNA_damage&!ERK&!p38&!PI3K&!MDM2 | DNA_damage&!ERK&!p38&PI3K | DNA_damage&ERK&!p38&!MDM2
PI3K,           !GRB2&PI3K | GRB2
RAS,            !ERK&!GRB2&PLCG | !ERK&GRB2 | ERK&PLCG
TGFBR_stimulus, TGFBR_stimulus
";

    #[test]
    fn read_bnet() {
        let network = BooleanNetwork::try_from_bnet(MAPK_MODEL).unwrap();
        // `JNK`, `PLCG` and `p38` only appear as regulators in this excerpt, so they are
        // free inputs and the network is still fully specified.
        assert_eq!(15, network.num_vars());
        let inputs: Vec<_> = ["JNK", "PLCG", "p38"]
            .iter()
            .map(|name| network.find_variable(name).unwrap())
            .collect();
        for var in &inputs {
            assert!(network.get_update_function(*var).is_none());
        }
        assert_eq!(inputs, network.free_inputs());
        assert!(network.missing_update_functions().is_empty());
        assert!(network.is_fully_specified());
        let pi3k = network.find_variable("PI3K").unwrap();
        let grb2 = network.find_variable("GRB2").unwrap();
        let reg = network.as_graph().find_regulation(grb2, pi3k).unwrap();
        assert!(reg.is_essential());
        assert_eq!(Some(Activation), reg.get_monotonicity());
    }

    #[test]
    fn inferred_regulations() {
        let network = BooleanNetwork::try_from_bnet(BNET_MODEL).unwrap();
        assert_eq!(5, network.num_vars());
        assert!(network.is_fully_specified());
        let fgf8 = network.find_variable("v_Fgf8").unwrap();
        let sp8 = network.find_variable("v_Sp8").unwrap();
        let emx2 = network.find_variable("v_Emx2").unwrap();
        let sp8_fgf8 = network.as_graph().find_regulation(sp8, fgf8).unwrap();
        assert!(sp8_fgf8.is_essential());
        assert_eq!(Some(Activation), sp8_fgf8.get_monotonicity());
        let emx2_fgf8 = network.as_graph().find_regulation(emx2, fgf8).unwrap();
        assert_eq!(Some(Inhibition), emx2_fgf8.get_monotonicity());

        // `b` appears in the function of `a`, but has no effect on it.
        let network = BooleanNetwork::try_from_bnet("a, a | (b & !b)\nb, a ^ b\n").unwrap();
        let a = network.find_variable("a").unwrap();
        let b = network.find_variable("b").unwrap();
        let ba = network.as_graph().find_regulation(b, a).unwrap();
        assert!(!ba.is_essential());
        assert_eq!(None, ba.get_monotonicity());
        let ab = network.as_graph().find_regulation(a, b).unwrap();
        assert!(ab.is_essential());
        assert_eq!(None, ab.get_monotonicity());
    }

    #[test]
    fn bnet_errors_are_collected() {
        let error = BooleanNetwork::try_from_bnet("targets,factors\na, a &\nb\na, !a\n").unwrap_err();
        assert_eq!(3, error.issues.len());
        match &error.issues[0] {
            ModelError::Parse(e) => assert_eq!(2, e.position.line),
            other => panic!("Unexpected issue: {:?}", other),
        }
        match &error.issues[1] {
            ModelError::Parse(e) => assert_eq!(Position::at_line(3), e.position),
            other => panic!("Unexpected issue: {:?}", other),
        }
        match &error.issues[2] {
            ModelError::Semantic(e) => {
                assert_eq!(SemanticErrorKind::DuplicateUpdateFunction, e.kind)
            }
            other => panic!("Unexpected issue: {:?}", other),
        }
    }
}

use crate::error::{FunctionError, ModelError, SemanticError, SemanticErrorKind, StructuralError};
use crate::expression::Expression;
use crate::symbolic::{RegulationConstraint, SymbolicContext};
use crate::{
    BooleanNetwork, FnUpdate, Monotonicity, Regulation, RegulatoryGraph, Variable, VariableId,
    VariableIdIterator,
};
use std::collections::HashMap;
use std::ops::Index;

/// Basic methods for safely building `BooleanNetwork`s.
///
/// Every mutation either succeeds completely or leaves the network untouched.
impl BooleanNetwork {
    /// Construct a new `BooleanNetwork` from a `RegulatoryGraph` without any update functions.
    pub fn new(graph: RegulatoryGraph) -> BooleanNetwork {
        BooleanNetwork {
            update_functions: vec![None; graph.num_vars()],
            graph,
        }
    }

    /// Add a new variable with no regulations and no update function.
    pub fn add_variable(&mut self, name: &str) -> Result<VariableId, SemanticError> {
        let id = self.graph.add_variable(name)?;
        self.update_functions.push(None);
        Ok(id)
    }

    /// Remove a variable that is not referenced by any regulation or update function.
    ///
    /// The update function of the removed variable is dropped together with it. Ids of all
    /// variables that follow `variable` are shifted down by one.
    pub fn remove_variable(&mut self, variable: VariableId) -> Result<Variable, StructuralError> {
        let functions: Vec<String> = self
            .variables()
            .filter(|it| *it != variable)
            .filter(|it| match &self.update_functions[it.to_index()] {
                Some(function) => function.contains_variable(variable),
                None => false,
            })
            .map(|it| self.get_variable_name(it).clone())
            .collect();
        match self.graph.remove_variable(variable) {
            Err(StructuralError::VariableInUse {
                variable,
                regulations,
                ..
            }) => {
                return Err(StructuralError::VariableInUse {
                    variable,
                    regulations,
                    functions,
                })
            }
            Err(error) => return Err(error),
            Ok(removed) => {
                // A function can only use regulators, so `functions` is empty at this point.
                self.update_functions.remove(variable.to_index());
                let renaming: HashMap<VariableId, VariableId> = (variable.to_index() + 1
                    ..=self.graph.num_vars())
                    .map(|i| (VariableId(i), VariableId(i - 1)))
                    .collect();
                for function in self.update_functions.iter_mut().flatten() {
                    *function = function.rename_all(&renaming);
                }
                Ok(removed)
            }
        }
    }

    pub fn set_display_name(&mut self, variable: VariableId, display_name: Option<String>) {
        self.graph.set_display_name(variable, display_name);
    }

    /// Add a new regulation between two existing variables.
    ///
    /// If the `target` already has an update function, the function must be consistent
    /// with the new regulation, otherwise the regulation is rejected.
    pub fn add_regulation(
        &mut self,
        regulator: &str,
        target: &str,
        essential: bool,
        monotonicity: Option<Monotonicity>,
    ) -> Result<(), ModelError> {
        let mut graph = self.graph.clone();
        graph.add_regulation(regulator, target, essential, monotonicity)?;
        let target_id = graph
            .find_variable(target)
            .ok_or_else(|| StructuralError::UnknownVariable(target.to_string()))?;
        if let Some(function) = &self.update_functions[target_id.to_index()] {
            if let Some(issue) = check_update_function(&graph, target_id, function)
                .into_iter()
                .next()
            {
                return Err(issue.into());
            }
        }
        self.graph = graph;
        Ok(())
    }

    /// Remove the regulation between `regulator` and `target`.
    ///
    /// Fails if the regulator still appears in the update function of the target.
    pub fn remove_regulation(
        &mut self,
        regulator: &str,
        target: &str,
    ) -> Result<Regulation, StructuralError> {
        if let (Some(regulator_id), Some(target_id)) = (
            self.graph.find_variable(regulator),
            self.graph.find_variable(target),
        ) {
            if let Some(function) = &self.update_functions[target_id.to_index()] {
                if function.contains_variable(regulator_id) {
                    return Err(StructuralError::RegulationInUse {
                        regulator: regulator.to_string(),
                        target: target.to_string(),
                    });
                }
            }
        }
        self.graph.remove_regulation(regulator, target)
    }

    /// Replace (or remove) the update function of the given `variable`.
    ///
    /// The function can only use the regulators of `variable` and must agree with the
    /// declared monotonicity and essentiality of all its regulations. All violations are
    /// reported together.
    pub fn set_update_function(
        &mut self,
        variable: VariableId,
        function: Option<FnUpdate>,
    ) -> Result<(), FunctionError> {
        if let Some(function) = &function {
            let issues = self.check_update_function(variable, function);
            if !issues.is_empty() {
                return Err(FunctionError::new(
                    self.get_variable_name(variable),
                    issues.into_iter().map(ModelError::from).collect(),
                ));
            }
        }
        self.update_functions[variable.to_index()] = function;
        Ok(())
    }

    /// Parse the given `expression` and set it as the update function of `variable`.
    pub fn set_update_function_from_str(
        &mut self,
        variable: &str,
        expression: &str,
    ) -> Result<(), FunctionError> {
        let id = self.find_variable(variable).ok_or_else(|| {
            let error = StructuralError::UnknownVariable(variable.to_string());
            FunctionError::new(variable, vec![error.into()])
        })?;
        let expression = Expression::parse(expression)
            .map_err(|e| FunctionError::new(variable, vec![e.into()]))?;
        let function = expression
            .to_fn_update(&self.graph)
            .map_err(|e| FunctionError::new(variable, vec![e.into()]))?;
        self.set_update_function(id, Some(function))
    }

    /// Remove the update function of the given `variable`, returning it.
    pub fn clear_update_function(&mut self, variable: VariableId) -> Option<FnUpdate> {
        self.update_functions[variable.to_index()].take()
    }

    /// Compute every reason why `function` cannot be the update function of `variable`.
    ///
    /// The result is empty if the function is valid.
    pub fn check_update_function(
        &self,
        variable: VariableId,
        function: &FnUpdate,
    ) -> Vec<SemanticError> {
        check_update_function(&self.graph, variable, function)
    }
}

/// **(internal)** Validate a function against the regulations of `target` in `graph`.
fn check_update_function(
    graph: &RegulatoryGraph,
    target: VariableId,
    function: &FnUpdate,
) -> Vec<SemanticError> {
    let target_name = graph.get_variable_name(target);
    let regulators = graph.regulators(target);
    let mut issues: Vec<SemanticError> = function
        .collect_arguments()
        .into_iter()
        .filter(|arg| !regulators.contains(arg))
        .map(|arg| {
            let name = graph.get_variable_name(arg);
            SemanticError::new(
                SemanticErrorKind::UndeclaredRegulator,
                vec![name.clone(), target_name.clone()],
                format!(
                    "`{}` appears in the update function of `{}` but does not regulate it.",
                    name, target_name
                ),
            )
        })
        .collect();

    // Only the regulators of `target` matter, so the check never encodes the whole network.
    let (local, mapping) = graph.restrict_to_target(target, &function.collect_arguments());
    match SymbolicContext::new(&local) {
        Ok(context) => {
            let fn_is_true = context.mk_fn_update_true(&function.rename_all(&mapping));
            for regulation in local.regulations() {
                let (_, problems) =
                    RegulationConstraint::check_regulation(&context, &local, regulation, &fn_is_true);
                issues.extend(problems);
            }
        }
        Err(error) => issues.push(SemanticError::new(
            SemanticErrorKind::ResourceLimit,
            vec![target_name.clone()],
            format!("Regulations of `{}` cannot be checked: {}", target_name, error),
        )),
    }
    issues
}

/// Some utility methods for accessing the structure of a `BooleanNetwork`. Some of them are just
/// delegating to the internal `RegulatoryGraph`, but we have a copy here as well because they
/// are used very often.
impl BooleanNetwork {
    /// Obtain a reference to the underlying `RegulatoryGraph` of the `BooleanNetwork`.
    pub fn as_graph(&self) -> &RegulatoryGraph {
        &self.graph
    }

    /// The number of variables in this `BooleanNetwork`.
    pub fn num_vars(&self) -> usize {
        self.graph.num_vars()
    }

    /// Return an iterator over all variable ids of this network.
    pub fn variables(&self) -> VariableIdIterator {
        self.graph.variables()
    }

    /// Return the variable object based on the given `VariableId`.
    pub fn get_variable(&self, id: VariableId) -> &Variable {
        self.graph.get_variable(id)
    }

    /// Shorthand for `self.as_graph().get_variable(id).get_name()`.
    pub fn get_variable_name(&self, id: VariableId) -> &String {
        self.graph.get_variable_name(id)
    }

    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.graph.find_variable(name)
    }

    /// Return a sorted list of variables that regulate the given `target` variable.
    pub fn regulators(&self, target: VariableId) -> Vec<VariableId> {
        self.graph.regulators(target)
    }

    /// Return a sorted list of variables that are regulated by the given `regulator` variable.
    pub fn targets(&self, regulator: VariableId) -> Vec<VariableId> {
        self.graph.targets(regulator)
    }

    /// Get the current update function of the given `variable`.
    pub fn get_update_function(&self, variable: VariableId) -> &Option<FnUpdate> {
        &self.update_functions[variable.to_index()]
    }

    /// Variables with neither an update function nor regulators.
    ///
    /// These are free inputs of the network: their next value is not constrained.
    pub fn free_inputs(&self) -> Vec<VariableId> {
        self.variables()
            .filter(|it| self.get_update_function(*it).is_none())
            .filter(|it| self.regulators(*it).is_empty())
            .collect()
    }

    /// Variables that have regulators but no update function.
    pub fn missing_update_functions(&self) -> Vec<VariableId> {
        self.variables()
            .filter(|it| self.get_update_function(*it).is_none())
            .filter(|it| !self.regulators(*it).is_empty())
            .collect()
    }

    /// True if every variable is either a free input or has an update function.
    pub fn is_fully_specified(&self) -> bool {
        self.missing_update_functions().is_empty()
    }
}

/// Allow indexing `BooleanNetwork` using `VariableId` objects.
impl Index<VariableId> for BooleanNetwork {
    type Output = Variable;

    fn index(&self, index: VariableId) -> &Self::Output {
        self.graph.get_variable(index)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{ModelError, SemanticErrorKind, StructuralError};
    use crate::Monotonicity::Activation;
    use crate::{BooleanNetwork, FnUpdate, RegulatoryGraph};
    use pretty_assertions::assert_eq;
    use std::convert::TryFrom;

    fn network() -> BooleanNetwork {
        BooleanNetwork::try_from(
            r"
            a -> c
            b -| c
            c -? a
            $c: a & !b
        ",
        )
        .unwrap()
    }

    #[test]
    fn update_function_validation_reports_every_regulator() {
        let mut bn = network();
        let c = bn.find_variable("c").unwrap();
        let before = bn.clone();

        let error = bn.set_update_function_from_str("c", "!a & b").unwrap_err();
        assert_eq!("c", error.variable);
        assert_eq!(2, error.issues.len());
        for issue in &error.issues {
            match issue {
                ModelError::Semantic(e) => {
                    assert_eq!(SemanticErrorKind::MonotonicityViolation, e.kind)
                }
                other => panic!("Unexpected issue {:?}.", other),
            }
        }
        assert_eq!(before, bn);

        let error = bn.set_update_function_from_str("c", "a").unwrap_err();
        match &error.issues[..] {
            [ModelError::Semantic(e)] => {
                assert_eq!(SemanticErrorKind::ObservabilityViolation, e.kind);
                assert_eq!(vec!["b".to_string(), "c".to_string()], e.variables);
            }
            other => panic!("Unexpected issues {:?}.", other),
        }

        let a = bn.find_variable("a").unwrap();
        let error = bn
            .set_update_function(a, Some(FnUpdate::mk_var(c).and(FnUpdate::mk_var(a))))
            .unwrap_err();
        match &error.issues[..] {
            [ModelError::Semantic(e)] => {
                assert_eq!(SemanticErrorKind::UndeclaredRegulator, e.kind)
            }
            other => panic!("Unexpected issues {:?}.", other),
        }

        assert!(bn.set_update_function_from_str("c", "!(b | !a)").is_ok());
        assert!(bn.set_update_function_from_str("a", "!c").is_ok());
        assert!(bn.set_update_function_from_str("x", "true").is_err());
        assert!(bn.set_update_function_from_str("a", "(c").is_err());
    }

    #[test]
    fn large_networks_are_checked_locally() {
        // Too many variables to encode the whole network symbolically.
        let names = (0..32768).map(|i| format!("v{}", i)).collect();
        let mut rg = RegulatoryGraph::new(names);
        rg.add_regulation("v0", "v1", true, Some(Activation)).unwrap();
        let mut bn = BooleanNetwork::new(rg);

        let error = bn.set_update_function_from_str("v1", "!v0").unwrap_err();
        match &error.issues[..] {
            [ModelError::Semantic(e)] => {
                assert_eq!(SemanticErrorKind::MonotonicityViolation, e.kind);
                assert_eq!(vec!["v0".to_string(), "v1".to_string()], e.variables);
            }
            other => panic!("Unexpected issues {:?}.", other),
        }
        assert!(bn.set_update_function_from_str("v1", "v0").is_ok());
    }

    #[test]
    fn structural_mutations() {
        let mut bn = network();
        let a = bn.find_variable("a").unwrap();
        let before = bn.clone();

        assert!(matches!(
            bn.remove_variable(a),
            Err(StructuralError::VariableInUse { .. })
        ));
        assert_eq!(before, bn);

        assert_eq!(
            Err(StructuralError::RegulationInUse {
                regulator: "a".to_string(),
                target: "c".to_string()
            }),
            bn.remove_regulation("a", "c")
        );
        assert!(bn.remove_regulation("c", "a").is_ok());

        // `d -> c` is essential, but the function of `c` ignores `d`.
        bn.add_variable("d").unwrap();
        assert!(bn.add_regulation("d", "c", true, Some(Activation)).is_err());
        assert!(bn.add_regulation("d", "c", false, None).is_ok());
        assert_eq!(3, bn.regulators(bn.find_variable("c").unwrap()).len());

        // Removing `a` shifts the ids used by the update function of `c`.
        let c = bn.find_variable("c").unwrap();
        bn.clear_update_function(c);
        bn.remove_regulation("a", "c").unwrap();
        bn.remove_variable(a).unwrap();
        bn.set_update_function_from_str("c", "!b").unwrap();
        let c = bn.find_variable("c").unwrap();
        let b = bn.find_variable("b").unwrap();
        assert_eq!(
            &Some(FnUpdate::mk_not(FnUpdate::mk_var(b))),
            bn.get_update_function(c)
        );
        bn.remove_regulation("d", "c").unwrap();
        bn.remove_variable(bn.find_variable("d").unwrap()).unwrap();
        assert_eq!(
            "!b",
            bn.get_update_function(c).as_ref().unwrap().to_string(bn.as_graph())
        );
    }

    #[test]
    fn removal_shifts_function_ids() {
        let mut rg = RegulatoryGraph::new(vec!["x".to_string(), "y".to_string(), "z".to_string()]);
        rg.add_regulation("z", "y", true, None).unwrap();
        let mut bn = BooleanNetwork::new(rg);
        bn.set_update_function_from_str("y", "!z").unwrap();
        bn.remove_variable(bn.find_variable("x").unwrap()).unwrap();
        let y = bn.find_variable("y").unwrap();
        assert_eq!("!z", bn.get_update_function(y).as_ref().unwrap().to_string(bn.as_graph()));
    }

    #[test]
    fn fully_specified_networks() {
        let mut bn = network();
        let a = bn.find_variable("a").unwrap();
        assert_eq!(vec![a], bn.missing_update_functions());
        assert!(bn.free_inputs().contains(&bn.find_variable("b").unwrap()));
        assert!(!bn.is_fully_specified());
        bn.set_update_function_from_str("a", "c").unwrap();
        assert!(bn.is_fully_specified());
    }
}

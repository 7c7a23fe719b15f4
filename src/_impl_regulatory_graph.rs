use crate::biodivine_std::structs::build_index_map;
use crate::error::{SemanticError, SemanticErrorKind, StructuralError};
use crate::{
    Monotonicity, Regulation, RegulationIterator, RegulatoryGraph, Variable, VariableId,
    VariableIdIterator, ID_REGEX,
};
use std::collections::HashMap;
use std::ops::Index;

/// Methods for safely constructing new instances of `RegulatoryGraph`s.
impl RegulatoryGraph {
    /// Create a new `RegulatoryGraph` with variables using the given names
    /// and no regulations.
    ///
    /// The ordering of the variables is preserved. The names are expected to be unique
    /// and valid (see `RegulatoryGraph::is_valid_name`); use `RegulatoryGraph::add_variable`
    /// when this is not known in advance.
    pub fn new(variables: Vec<String>) -> RegulatoryGraph {
        RegulatoryGraph {
            regulations: Vec::new(),
            variable_to_index: build_index_map(&variables, |_, i| VariableId(i)),
            variables: variables
                .into_iter()
                .map(|name| Variable {
                    name,
                    display_name: None,
                })
                .collect(),
        }
    }

    /// Add a new variable with the given `name` to this graph.
    ///
    /// Fails if the name is not a valid identifier or is already used. The graph is
    /// unchanged on failure.
    pub fn add_variable(&mut self, name: &str) -> Result<VariableId, SemanticError> {
        if !Self::is_valid_name(name) {
            return Err(SemanticError::new(
                SemanticErrorKind::InvalidIdentifier,
                vec![name.to_string()],
                format!("`{}` is not a valid variable name.", name),
            ));
        }
        if self.variable_to_index.contains_key(name) {
            return Err(SemanticError::new(
                SemanticErrorKind::DuplicateIdentifier,
                vec![name.to_string()],
                format!("Variable `{}` already exists.", name),
            ));
        }
        let id = VariableId(self.variables.len());
        self.variables.push(Variable {
            name: name.to_string(),
            display_name: None,
        });
        self.variable_to_index.insert(name.to_string(), id);
        Ok(id)
    }

    /// Remove a variable that has no regulations.
    ///
    /// The ids of all variables that follow the removed variable are shifted down by one.
    pub(crate) fn remove_variable(&mut self, id: VariableId) -> Result<Variable, StructuralError> {
        let used_by: Vec<String> = self
            .regulations
            .iter()
            .filter(|r| r.regulator == id || r.target == id)
            .map(|r| self.regulation_to_string(r))
            .collect();
        if !used_by.is_empty() {
            return Err(StructuralError::VariableInUse {
                variable: self.get_variable_name(id).clone(),
                regulations: used_by,
                functions: Vec::new(),
            });
        }

        let removed = self.variables.remove(id.0);
        let shift = |v: VariableId| if v.0 > id.0 { VariableId(v.0 - 1) } else { v };
        for regulation in self.regulations.iter_mut() {
            regulation.regulator = shift(regulation.regulator);
            regulation.target = shift(regulation.target);
        }
        let names: Vec<String> = self.variables.iter().map(|v| v.name.clone()).collect();
        self.variable_to_index = build_index_map(&names, |_, i| VariableId(i));
        Ok(removed)
    }

    /// Set or clear the display name of the given variable.
    pub fn set_display_name(&mut self, id: VariableId, display_name: Option<String>) {
        self.variables[id.0].display_name = display_name;
    }

    /// Add a new `Regulation` to this `RegulatoryGraph`.
    ///
    /// Returns `Err` if `regulator` or `target` are not valid graph variables or when
    /// the regulation between the two variables already exists.
    pub fn add_regulation(
        &mut self,
        regulator: &str,
        target: &str,
        essential: bool,
        monotonicity: Option<Monotonicity>,
    ) -> Result<(), StructuralError> {
        let regulator = self.get_endpoint(regulator)?;
        let target = self.get_endpoint(target)?;
        self.assert_no_regulation(regulator, target)?;
        self.regulations.push(Regulation {
            regulator,
            target,
            essential,
            monotonicity,
        });
        Ok(())
    }

    /// Remove the regulation between the given variables, returning it.
    pub fn remove_regulation(
        &mut self,
        regulator: &str,
        target: &str,
    ) -> Result<Regulation, StructuralError> {
        let regulator_id = self.get_endpoint(regulator)?;
        let target_id = self.get_endpoint(target)?;
        let index = self
            .regulations
            .iter()
            .position(|r| r.regulator == regulator_id && r.target == target_id);
        if let Some(index) = index {
            Ok(self.regulations.remove(index))
        } else {
            Err(StructuralError::RegulationNotFound {
                regulator: regulator.to_string(),
                target: target.to_string(),
            })
        }
    }

    /// **(internal)** The subgraph of `target`, its regulators and the `extra` variables that
    /// only keeps the regulations of `target`. Also returns the ids of the kept variables in
    /// the subgraph.
    pub(crate) fn restrict_to_target(
        &self,
        target: VariableId,
        extra: &[VariableId],
    ) -> (RegulatoryGraph, HashMap<VariableId, VariableId>) {
        let mut kept = self.regulators(target);
        kept.push(target);
        kept.extend_from_slice(extra);
        kept.sort();
        kept.dedup();
        let mapping: HashMap<VariableId, VariableId> = kept
            .iter()
            .enumerate()
            .map(|(i, var)| (*var, VariableId(i)))
            .collect();
        let names = kept
            .iter()
            .map(|var| self.get_variable_name(*var).clone())
            .collect();
        let mut graph = RegulatoryGraph::new(names);
        graph.regulations = self
            .regulations
            .iter()
            .filter(|r| r.target == target)
            .map(|r| Regulation {
                regulator: mapping[&r.regulator],
                target: mapping[&r.target],
                essential: r.essential,
                monotonicity: r.monotonicity,
            })
            .collect();
        (graph, mapping)
    }

    /// **(internal)** Utility method to safely obtain a regulation endpoint.
    fn get_endpoint(&self, name: &str) -> Result<VariableId, StructuralError> {
        self.find_variable(name)
            .ok_or_else(|| StructuralError::UnknownVariable(name.to_string()))
    }

    /// **(internal)** Utility method to ensure there is no regulation between the two variables yet.
    fn assert_no_regulation(
        &self,
        regulator: VariableId,
        target: VariableId,
    ) -> Result<(), StructuralError> {
        if self.find_regulation(regulator, target).is_none() {
            Ok(())
        } else {
            Err(StructuralError::RegulationExists {
                regulator: self.get_variable_name(regulator).clone(),
                target: self.get_variable_name(target).clone(),
            })
        }
    }
}

/// Some basic utility methods for inspecting the `RegulatoryGraph`.
impl RegulatoryGraph {
    /// The number of variables in this `RegulatoryGraph`.
    pub fn num_vars(&self) -> usize {
        self.variables.len()
    }

    /// Find a `VariableId` for the given name, or `None` if the variable does not exist.
    pub fn find_variable(&self, name: &str) -> Option<VariableId> {
        self.variable_to_index.get(name).cloned()
    }

    /// Return a `Variable` corresponding to the given `VariableId`.
    pub fn get_variable(&self, id: VariableId) -> &Variable {
        &self.variables[id.0]
    }

    /// Shorthand for `self.get_variable(id).get_name()`.
    pub fn get_variable_name(&self, id: VariableId) -> &String {
        &self.variables[id.0].name
    }

    /// Find a `Regulation` between two variables if it exists, `None` otherwise.
    pub fn find_regulation(
        &self,
        regulator: VariableId,
        target: VariableId,
    ) -> Option<&Regulation> {
        self.regulations
            .iter()
            .find(|r| r.regulator == regulator && r.target == target)
    }

    /// Return a sorted list of variables that regulate the given `target` variable.
    pub fn regulators(&self, target: VariableId) -> Vec<VariableId> {
        let mut regulators: Vec<VariableId> = self
            .regulations
            .iter()
            .filter(|r| r.target == target)
            .map(|r| r.regulator)
            .collect();
        regulators.sort();
        regulators
    }

    /// Return a sorted list of variables that are regulated by the given `regulator` variable.
    pub fn targets(&self, regulator: VariableId) -> Vec<VariableId> {
        let mut targets: Vec<VariableId> = self
            .regulations
            .iter()
            .filter(|r| r.regulator == regulator)
            .map(|r| r.target)
            .collect();
        targets.sort();
        targets
    }

    /// Return an iterator over all variable ids of this graph.
    pub fn variables(&self) -> VariableIdIterator {
        (0..self.variables.len()).map(VariableId)
    }

    pub fn regulations(&self) -> RegulationIterator {
        self.regulations.iter()
    }

    /// The number of regulations in this graph.
    pub fn num_regulations(&self) -> usize {
        self.regulations.len()
    }

    /// Write a regulation using the `.aeon` arrow notation.
    pub fn regulation_to_string(&self, regulation: &Regulation) -> String {
        format!(
            "{} {} {}",
            self.get_variable_name(regulation.regulator),
            regulation.arrow(),
            self.get_variable_name(regulation.target)
        )
    }

    /// A static check that allows to verify validity of a variable name.
    ///
    /// Valid names are non-empty, consist of letters, digits and underscores and are
    /// not purely numeric.
    pub fn is_valid_name(name: &str) -> bool {
        ID_REGEX.is_match(name)
    }
}

/// Allow indexing `RegulatoryGraph` using `VariableId` objects.
impl Index<VariableId> for RegulatoryGraph {
    type Output = Variable;

    fn index(&self, index: VariableId) -> &Self::Output {
        self.get_variable(index)
    }
}

#[cfg(test)]
mod tests {
    use crate::error::{SemanticErrorKind, StructuralError};
    use crate::Monotonicity::{Activation, Inhibition};
    use crate::{RegulatoryGraph, VariableId};

    #[test]
    fn test_regulatory_graph() {
        let names = vec!["a", "b_1", "b_2", "c", "d_1", "d_2", "d_3", "e"];
        let mut rg = RegulatoryGraph::new(names.into_iter().map(|s| s.to_string()).collect());
        rg.add_regulation("a", "c", true, None).unwrap();
        rg.add_regulation("b_1", "b_2", true, None).unwrap();
        rg.add_regulation("b_2", "b_1", true, None).unwrap();
        rg.add_regulation("b_2", "c", true, Some(Activation)).unwrap();
        rg.add_regulation("c", "d_2", true, None).unwrap();
        rg.add_regulation("c", "e", false, Some(Inhibition)).unwrap();
        rg.add_regulation("e", "e", true, None).unwrap();

        assert_eq!(
            Err(StructuralError::RegulationExists {
                regulator: "a".to_string(),
                target: "c".to_string()
            }),
            rg.add_regulation("a", "c", false, None)
        );
        assert_eq!(
            Err(StructuralError::UnknownVariable("b".to_string())),
            rg.add_regulation("a", "b", true, None)
        );
        assert!(rg.add_regulation("b_1", "a_1", true, None).is_err());

        assert_eq!(rg.num_vars(), 8);
        assert_eq!(rg.num_regulations(), 7);
        assert_eq!(rg.find_variable("b_1").unwrap(), VariableId(1));
        assert_eq!(rg.get_variable_name(VariableId(2)), "b_2");
        assert!(rg.find_regulation(VariableId(0), VariableId(3)).is_some());
        assert_eq!(
            rg.regulators(VariableId(3)),
            vec![VariableId(0), VariableId(2)]
        );
        assert_eq!(
            rg.targets(VariableId(3)),
            vec![VariableId(5), VariableId(7)]
        );
        let c_e = rg.find_regulation(VariableId(3), VariableId(7)).unwrap();
        assert_eq!("c -|? e", rg.regulation_to_string(c_e));
    }

    #[test]
    fn test_variable_names() {
        assert!(RegulatoryGraph::is_valid_name("v_Fgf8"));
        assert!(RegulatoryGraph::is_valid_name("_1"));
        assert!(RegulatoryGraph::is_valid_name("3A"));
        assert!(!RegulatoryGraph::is_valid_name("123"));
        assert!(!RegulatoryGraph::is_valid_name(""));
        assert!(!RegulatoryGraph::is_valid_name("a-b"));
        assert!(!RegulatoryGraph::is_valid_name("a b"));

        let mut rg = RegulatoryGraph::new(Vec::new());
        assert_eq!(VariableId(0), rg.add_variable("a").unwrap());
        let duplicate = rg.add_variable("a").unwrap_err();
        assert_eq!(SemanticErrorKind::DuplicateIdentifier, duplicate.kind);
        let invalid = rg.add_variable("42").unwrap_err();
        assert_eq!(SemanticErrorKind::InvalidIdentifier, invalid.kind);
        assert_eq!(1, rg.num_vars());
    }

    #[test]
    fn test_restrict_to_target() {
        let names = vec!["a", "b", "c", "d"];
        let mut rg = RegulatoryGraph::new(names.into_iter().map(|s| s.to_string()).collect());
        rg.add_regulation("a", "c", true, Some(Activation)).unwrap();
        rg.add_regulation("c", "c", false, None).unwrap();
        rg.add_regulation("a", "b", true, None).unwrap();

        let c = rg.find_variable("c").unwrap();
        let d = rg.find_variable("d").unwrap();
        let (local, mapping) = rg.restrict_to_target(c, &[d]);
        assert_eq!(3, local.num_vars());
        assert_eq!(2, local.num_regulations());
        assert_eq!(VariableId(1), mapping[&c]);
        assert_eq!("d", local.get_variable_name(mapping[&d]));
        let a = local.find_variable("a").unwrap();
        let local_c = local.find_variable("c").unwrap();
        assert_eq!(
            "a -> c",
            local.regulation_to_string(local.find_regulation(a, local_c).unwrap())
        );
        assert!(local.find_regulation(local_c, local_c).is_some());
    }

    #[test]
    fn test_remove_variable_and_regulation() {
        let names = vec!["a", "b", "c"];
        let mut rg = RegulatoryGraph::new(names.into_iter().map(|s| s.to_string()).collect());
        rg.add_regulation("a", "c", true, Some(Activation)).unwrap();
        rg.add_regulation("c", "c", true, None).unwrap();

        let before = rg.clone();
        assert!(matches!(
            rg.remove_variable(VariableId(0)),
            Err(StructuralError::VariableInUse { .. })
        ));
        assert_eq!(before, rg);

        rg.remove_regulation("a", "c").unwrap();
        assert!(rg.remove_regulation("a", "c").is_err());
        rg.remove_variable(VariableId(0)).unwrap();
        assert_eq!(2, rg.num_vars());
        let c = rg.find_variable("c").unwrap();
        assert_eq!(VariableId(1), c);
        assert!(rg.find_regulation(c, c).is_some());
        assert_eq!(None, rg.find_variable("a"));
    }
}

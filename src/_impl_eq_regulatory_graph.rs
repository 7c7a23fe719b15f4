use crate::RegulatoryGraph;

/// Two regulatory graphs are equal when they declare the same variables in the same order
/// and the same set of regulations.
///
/// Variable order matters because `VariableId`s must be interchangeable between equal graphs.
/// Regulation order only reflects the order in which a format adapter happened to read
/// them, so it is ignored.
impl PartialEq for RegulatoryGraph {
    fn eq(&self, other: &Self) -> bool {
        self.variables == other.variables
            && self.regulations.len() == other.regulations.len()
            && self.regulations().all(|regulation| {
                other.find_regulation(regulation.regulator, regulation.target) == Some(regulation)
            })
    }
}

impl Eq for RegulatoryGraph {}

#[cfg(test)]
mod tests {
    use crate::{Monotonicity, RegulatoryGraph};

    fn graph(regulations: &[(&str, &str, Option<Monotonicity>)]) -> RegulatoryGraph {
        let mut graph = RegulatoryGraph::new(vec!["a".to_string(), "b".to_string()]);
        for (regulator, target, monotonicity) in regulations {
            graph
                .add_regulation(regulator, target, true, *monotonicity)
                .unwrap();
        }
        graph
    }

    #[test]
    fn regulation_order_is_ignored() {
        let activation = Some(Monotonicity::Activation);
        let inhibition = Some(Monotonicity::Inhibition);
        let a = graph(&[("a", "b", activation), ("b", "a", inhibition)]);
        let b = graph(&[("b", "a", inhibition), ("a", "b", activation)]);
        assert_eq!(a, b);

        let c = graph(&[("b", "a", activation), ("a", "b", activation)]);
        assert_ne!(a, c);
        let d = graph(&[("a", "b", activation)]);
        assert_ne!(a, d);
    }
}

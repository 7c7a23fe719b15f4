use crate::sbml::{MATHML, SBML, SBML_LAYOUT, SBML_QUAL};
use crate::{BinaryOp, BooleanNetwork, FnUpdate, Layout, Monotonicity, VariableId};
use std::fmt::{Error, Write};

impl BooleanNetwork {
    /// Write this network as an SBML-qual document.
    ///
    /// Positions from `layout` are written as `generalGlyph`s of a single SBML layout. Entries
    /// of `layout` that do not name a variable of this network are ignored.
    pub fn to_sbml(&self, layout: Option<&Layout>) -> String {
        let mut buffer = String::new();
        // Writing into a `String` cannot fail.
        let _ = self.write_as_sbml(&mut buffer, layout);
        buffer
    }

    /// The same as `to_sbml`, but writes the document into the given output.
    pub fn write_as_sbml(&self, out: &mut dyn Write, layout: Option<&Layout>) -> Result<(), Error> {
        write!(out, "<?xml version='1.0' encoding='UTF-8' standalone='no'?>")?;
        write!(out, "<sbml xmlns=\"{}\" layout:required=\"false\" level=\"3\" qual:required=\"true\" xmlns:layout=\"{}\" version=\"1\" xmlns:qual=\"{}\">", SBML, SBML_LAYOUT, SBML_QUAL)?;
        write!(out, "<model>")?;
        if let Some(layout) = layout.filter(|it| !it.is_empty()) {
            self.write_layout(out, layout)?;
        }
        self.write_species(out)?;
        self.write_transitions(out)?;
        write!(out, "</model>")?;
        write!(out, "</sbml>")?;
        Ok(())
    }

    fn write_species(&self, out: &mut dyn Write) -> Result<(), Error> {
        write!(out, "<qual:listOfQualitativeSpecies xmlns:qual=\"{}\">", SBML_QUAL)?;
        for var in self.variables() {
            let variable = self.get_variable(var);
            write!(
                out,
                "<qual:qualitativeSpecies qual:maxLevel=\"1\" qual:constant=\"false\" qual:name=\"{}\" qual:id=\"{}\"/>",
                escape_xml(variable.get_label()),
                variable.get_name()
            )?;
        }
        write!(out, "</qual:listOfQualitativeSpecies>")?;
        Ok(())
    }

    fn write_transitions(&self, out: &mut dyn Write) -> Result<(), Error> {
        write!(out, "<qual:listOfTransitions xmlns:qual=\"{}\">", SBML_QUAL)?;
        for id in self.variables() {
            let var_name = self.get_variable_name(id);
            write!(out, "<qual:transition qual:id=\"tr_{}\">", var_name)?;

            // Inputs are the regulators.
            let regulators = self.regulators(id);
            if !regulators.is_empty() {
                write!(out, "<qual:listOfInputs>")?;
                for regulator in regulators {
                    let r_var_name = self.get_variable_name(regulator);
                    let regulation = self.as_graph().find_regulation(regulator, id);
                    let sign = match regulation.and_then(|r| r.get_monotonicity()) {
                        None => "unknown",
                        Some(Monotonicity::Activation) => "positive",
                        Some(Monotonicity::Inhibition) => "negative",
                    };
                    let essential = regulation.map(|r| r.is_essential()).unwrap_or(false);
                    write!(out, "<qual:input qual:qualitativeSpecies=\"{}\" qual:transitionEffect=\"none\" qual:sign=\"{}\" qual:id=\"tr_{}_in_{}\" essential=\"{}\"/>", r_var_name, sign, var_name, r_var_name, essential)?;
                }
                write!(out, "</qual:listOfInputs>")?;
            }

            // The only output is the variable itself.
            write!(out, "<qual:listOfOutputs>")?;
            write!(out, "<qual:output qual:qualitativeSpecies=\"{}\" qual:transitionEffect=\"assignmentLevel\" qual:id=\"tr_{}_out\"/>", var_name, var_name)?;
            write!(out, "</qual:listOfOutputs>")?;

            match self.get_update_function(id) {
                Some(FnUpdate::Const(value)) => {
                    write!(out, "<qual:listOfFunctionTerms>")?;
                    write!(out, "<qual:defaultTerm qual:resultLevel=\"{}\"/>", u8::from(*value))?;
                    write!(out, "</qual:listOfFunctionTerms>")?;
                }
                Some(update_function) => {
                    write!(out, "<qual:listOfFunctionTerms>")?;
                    write!(out, "<qual:defaultTerm qual:resultLevel=\"0\"/>")?;
                    write!(out, "<qual:functionTerm qual:resultLevel=\"1\">")?;
                    write!(out, "<math xmlns=\"{}\">", MATHML)?;
                    self.write_update_function(out, update_function)?;
                    write!(out, "</math>")?;
                    write!(out, "</qual:functionTerm>")?;
                    write!(out, "</qual:listOfFunctionTerms>")?;
                }
                // Unknown functions have no terms at all.
                None => (),
            }
            write!(out, "</qual:transition>")?;
        }
        write!(out, "</qual:listOfTransitions>")?;
        Ok(())
    }

    fn write_update_function(&self, out: &mut dyn Write, function: &FnUpdate) -> Result<(), Error> {
        match function {
            FnUpdate::Const(true) => write!(out, "<true/>")?,
            FnUpdate::Const(false) => write!(out, "<false/>")?,
            FnUpdate::Var(id) => {
                write!(
                    out,
                    "<apply><eq/><ci>{}</ci><cn type=\"integer\">1</cn></apply>",
                    self.get_variable_name(*id)
                )?;
            }
            FnUpdate::Not(inner) => {
                write!(out, "<apply><not/>")?;
                self.write_update_function(out, inner)?;
                write!(out, "</apply>")?;
            }
            FnUpdate::Binary(op, l, r) => {
                let op = match op {
                    BinaryOp::Imp => "implies",
                    BinaryOp::And => "and",
                    BinaryOp::Or => "or",
                    BinaryOp::Xor => "xor",
                    BinaryOp::Iff => "eq",
                };
                write!(out, "<apply><{}/>", op)?;
                self.write_update_function(out, l)?;
                self.write_update_function(out, r)?;
                write!(out, "</apply>")?;
            }
        }
        Ok(())
    }

    fn write_layout(&self, out: &mut dyn Write, layout: &Layout) -> Result<(), Error> {
        write!(out, "<layout:listOfLayouts xmlns:layout=\"{}\" xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">", SBML_LAYOUT)?;
        write!(out, "<layout:layout layout:id=\"__layout__\">")?;
        write!(out, "<layout:listOfAdditionalGraphicalObjects>")?;
        let positions = self.variables().filter_map(|var: VariableId| {
            let name = self.get_variable_name(var);
            layout.get(name).map(|position| (name, position))
        });
        for (name, (x, y)) in positions {
            write!(out, "<layout:generalGlyph layout:id=\"_ly_{}\" layout:reference=\"{}\">", name, name)?;
            write!(out, "<layout:boundingBox>")?;
            write!(out, "<layout:position layout:x=\"{}\" layout:y=\"{}\"/>", x, y)?;
            write!(out, "<layout:dimensions layout:height=\"25\" layout:width=\"45\"/>")?;
            write!(out, "</layout:boundingBox>")?;
            write!(out, "</layout:generalGlyph>")?;
        }
        write!(out, "</layout:listOfAdditionalGraphicalObjects>")?;
        write!(out, "</layout:layout>")?;
        write!(out, "</layout:listOfLayouts>")?;
        Ok(())
    }
}

/// **(internal)** Escape a string for use in an XML attribute.
fn escape_xml(value: &str) -> String {
    let mut result = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&apos;"),
            c => result.push(c),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use crate::test_models::AEON_MODEL;
    use crate::{BooleanNetwork, Layout};
    use pretty_assertions::assert_eq;
    use std::convert::TryFrom;

    #[test]
    fn sbml_export_round_trip() {
        let mut model = BooleanNetwork::try_from(
            "
            a -?? a
            c -? a
            a -> b
            a -> c
            b -| c
            # Also some comments are allowed
            c -| d
            $a: c & (a | !a)
            $b: a ^ false
            $c: !(a => b)
            $e: true
        ",
        )
        .unwrap();
        let d = model.find_variable("d").unwrap();
        model.set_display_name(d, Some("Delta <d>".to_string()));

        let mut expected_layout = Layout::new();
        expected_layout.insert("a".to_string(), (1.0, 2.0));
        expected_layout.insert("b".to_string(), (1.5, 2.8));
        expected_layout.insert("c".to_string(), (1542.123, -4.333));
        expected_layout.insert("d".to_string(), (121.776, 2.0));
        let sbml = model.to_sbml(Some(&expected_layout));
        assert!(sbml.contains("qual:name=\"Delta &lt;d&gt;\""));

        let (actual, layout) = BooleanNetwork::try_from_sbml(&sbml).unwrap();
        assert_eq!(model, actual);
        assert_eq!(expected_layout, layout);
    }

    #[test]
    fn cortical_network_round_trip() {
        let model = BooleanNetwork::try_from(AEON_MODEL).unwrap();
        let (actual, layout) = BooleanNetwork::try_from_sbml(&model.to_sbml(None)).unwrap();
        assert_eq!(model, actual);
        assert!(layout.is_empty());
    }
}

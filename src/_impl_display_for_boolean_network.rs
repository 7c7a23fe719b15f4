use crate::_aeon_parser::write_position;
use crate::{BooleanNetwork, Layout};
use std::fmt::{Display, Error, Formatter};

/// Writes the network in the `.aeon` format: first all regulations, then all update functions.
impl Display for BooleanNetwork {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        for regulation in self.graph.regulations() {
            writeln!(f, "{}", self.graph.regulation_to_string(regulation))?;
        }
        for var in self.variables() {
            if let Some(function) = self.get_update_function(var) {
                writeln!(
                    f,
                    "${}: {}",
                    self.get_variable_name(var),
                    function.to_string(&self.graph)
                )?;
            }
        }
        Ok(())
    }
}

impl BooleanNetwork {
    /// Write the network in the `.aeon` format, preceded by the `#position` comments of every
    /// variable present in the `layout`.
    ///
    /// A variable without regulations and update function only survives the round-trip if it
    /// has a position.
    pub fn to_aeon_with_layout(&self, layout: &Layout) -> String {
        let mut result = String::new();
        for var in self.variables() {
            let name = self.get_variable_name(var);
            if let Some(position) = layout.get(name) {
                result.push_str(&write_position(name, *position));
                result.push('\n');
            }
        }
        result.push_str(&self.to_string());
        result
    }
}

use crate::Variable;
use std::fmt::{Display, Error, Formatter};

impl Display for Variable {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), Error> {
        write!(f, "{}", self.name)
    }
}

impl Variable {
    /// The identifier of this variable.
    pub fn get_name(&self) -> &String {
        &self.name
    }

    /// Optional human-readable name of this variable.
    pub fn get_display_name(&self) -> Option<&String> {
        self.display_name.as_ref()
    }

    /// The display name if set, otherwise the identifier.
    pub fn get_label(&self) -> &str {
        self.display_name.as_deref().unwrap_or(self.name.as_str())
    }
}

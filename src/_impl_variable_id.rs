use crate::VariableId;
use std::fmt::{Display, Error, Formatter};

impl VariableId {
    /// Convert a raw index into a `VariableId`. The index is not checked against any graph.
    pub fn from_index(index: usize) -> VariableId {
        VariableId(index)
    }

    pub fn to_index(self) -> usize {
        self.0
    }
}

impl From<VariableId> for usize {
    fn from(value: VariableId) -> Self {
        value.0
    }
}

impl Display for VariableId {
    fn fmt(&self, f: &mut Formatter) -> Result<(), Error> {
        write!(f, "BnVariable({})", self.0)
    }
}

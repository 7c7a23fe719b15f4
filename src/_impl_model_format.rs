use crate::ModelFormat;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

impl ModelFormat {
    /// All supported formats.
    pub fn all() -> [ModelFormat; 3] {
        [ModelFormat::Aeon, ModelFormat::Bnet, ModelFormat::Sbml]
    }

    /// The canonical identifier of this format (also its usual file extension).
    pub fn identifier(&self) -> &'static str {
        match self {
            ModelFormat::Aeon => "aeon",
            ModelFormat::Bnet => "bnet",
            ModelFormat::Sbml => "sbml",
        }
    }
}

impl Display for ModelFormat {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.identifier())
    }
}

impl FromStr for ModelFormat {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_lowercase().as_str() {
            "aeon" | "native" => Ok(ModelFormat::Aeon),
            "bnet" | "tabular" => Ok(ModelFormat::Bnet),
            "sbml" | "xml" | "sbml-qual" => Ok(ModelFormat::Sbml),
            other => Err(format!("Unknown model format `{}`.", other)),
        }
    }
}

use crate::Monotonicity::{Activation, Inhibition};
use crate::{Monotonicity, Regulation, VariableId};
use regex::Regex;

lazy_static! {
    /// Matches one regulation line: a regulator, an arrow and a target.
    static ref REGULATION_REGEX: Regex = Regex::new(
        r"^\s*(?P<regulator>[a-zA-Z0-9_]+)\s*-(?P<monotonicity>[|>?])(?P<optional>\??)\s*(?P<target>[a-zA-Z0-9_]+)\s*$"
    )
    .unwrap();
}

impl Regulation {
    pub fn is_essential(&self) -> bool {
        self.essential
    }

    pub fn get_monotonicity(&self) -> Option<Monotonicity> {
        self.monotonicity
    }

    /// True if the regulation has a declared sign.
    pub fn is_monotonic(&self) -> bool {
        self.monotonicity.is_some()
    }

    pub fn get_regulator(&self) -> VariableId {
        self.regulator
    }

    pub fn get_target(&self) -> VariableId {
        self.target
    }

    /// Try to read all available information about a regulation from a given string
    /// in the standard format.
    ///
    /// The returned data correspond to the items as they appear in the string, i.e. `regulator`,
    /// `monotonicity`, `essential` and `target`. If the string is not valid, returns `None`.
    pub fn try_from_string(
        regulation: &str,
    ) -> Option<(String, Option<Monotonicity>, bool, String)> {
        REGULATION_REGEX.captures(regulation).map(|captures| {
            let monotonicity = match &captures["monotonicity"] {
                ">" => Some(Activation),
                "|" => Some(Inhibition),
                _ => None,
            };
            let essential = captures["optional"].is_empty();
            (
                captures["regulator"].to_string(),
                monotonicity,
                essential,
                captures["target"].to_string(),
            )
        })
    }

    /// The arrow used to write this regulation in the `.aeon` format.
    pub fn arrow(&self) -> &'static str {
        match (self.monotonicity, self.essential) {
            (Some(Activation), true) => "->",
            (Some(Activation), false) => "->?",
            (Some(Inhibition), true) => "-|",
            (Some(Inhibition), false) => "-|?",
            (None, true) => "-?",
            (None, false) => "-??",
        }
    }
}

//! Error types shared by the whole crate.
//!
//! Format adapters collect as many problems as they can before giving up, so decoding returns
//! a `DecodeError` holding every individual `ModelError` that was found.

use crate::ModelFormat;
use std::fmt::{Display, Formatter};
use thiserror::Error;

/// A location in the input text. Lines and columns are 1-based; zero means "unknown".
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq)]
pub struct Position {
    pub line: usize,
    pub column: usize,
}

impl Position {
    pub fn new(line: usize, column: usize) -> Position {
        Position { line, column }
    }

    /// A position that only knows the line.
    pub fn at_line(line: usize) -> Position {
        Position { line, column: 0 }
    }
}

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.line, self.column) {
            (0, 0) => write!(f, "unknown position"),
            (0, column) => write!(f, "column {}", column),
            (line, 0) => write!(f, "line {}", line),
            (line, column) => write!(f, "line {}, column {}", line, column),
        }
    }
}

/// Malformed text in one of the supported formats.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("Invalid {format} input at {position}: {reason}")]
pub struct ParseError {
    pub format: ModelFormat,
    pub position: Position,
    pub reason: String,
}

impl ParseError {
    pub fn new(format: ModelFormat, position: Position, reason: impl Into<String>) -> ParseError {
        ParseError {
            format,
            position,
            reason: reason.into(),
        }
    }

    /// Re-anchor an error produced for a fragment of a larger document: the fragment
    /// starts on `line` and its first character is at `column_offset + 1`.
    pub(crate) fn relocate(mut self, format: ModelFormat, line: usize, column_offset: usize) -> Self {
        self.format = format;
        self.position.line = line;
        if self.position.column > 0 {
            self.position.column += column_offset;
        }
        self
    }
}

/// Categories of `SemanticError`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum SemanticErrorKind {
    InvalidIdentifier,
    DuplicateIdentifier,
    UnknownVariable,
    UndeclaredRegulator,
    UnusedRegulator,
    DuplicateUpdateFunction,
    ObservabilityViolation,
    MonotonicityViolation,
    UnresolvedPlaceholder,
    NonBooleanDomain,
    /// The check is too large to be performed symbolically.
    ResourceLimit,
}

impl Display for SemanticErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SemanticErrorKind::InvalidIdentifier => "invalid identifier",
            SemanticErrorKind::DuplicateIdentifier => "duplicate identifier",
            SemanticErrorKind::UnknownVariable => "unknown variable",
            SemanticErrorKind::UndeclaredRegulator => "undeclared regulator",
            SemanticErrorKind::UnusedRegulator => "unused regulator",
            SemanticErrorKind::DuplicateUpdateFunction => "duplicate update function",
            SemanticErrorKind::ObservabilityViolation => "essentiality violation",
            SemanticErrorKind::MonotonicityViolation => "sign violation",
            SemanticErrorKind::UnresolvedPlaceholder => "unresolved placeholder",
            SemanticErrorKind::NonBooleanDomain => "non-Boolean domain",
            SemanticErrorKind::ResourceLimit => "resource limit",
        };
        write!(f, "{}", name)
    }
}

/// Well-formed input that is inconsistent with the model it describes.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("({kind}) {message}")]
pub struct SemanticError {
    pub kind: SemanticErrorKind,
    pub variables: Vec<String>,
    pub message: String,
}

impl SemanticError {
    pub fn new(kind: SemanticErrorKind, variables: Vec<String>, message: impl Into<String>) -> Self {
        SemanticError {
            kind,
            variables,
            message: message.into(),
        }
    }
}

/// A mutation that would break an invariant of the `RegulatoryGraph`.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum StructuralError {
    #[error("Unknown variable `{0}`.")]
    UnknownVariable(String),
    #[error("Variable `{variable}` is still referenced by regulations {regulations:?} and update functions {functions:?}.")]
    VariableInUse {
        variable: String,
        regulations: Vec<String>,
        functions: Vec<String>,
    },
    #[error("`{regulator}` already regulates `{target}`.")]
    RegulationExists { regulator: String, target: String },
    #[error("`{regulator}` does not regulate `{target}`.")]
    RegulationNotFound { regulator: String, target: String },
    #[error("`{regulator}` is still used by the update function of `{target}`.")]
    RegulationInUse { regulator: String, target: String },
}

/// Any single problem found in a model or its textual representation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ModelError {
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
    #[error(transparent)]
    Structural(#[from] StructuralError),
}

/// Every reason why an update function cannot be attached to its variable.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("Invalid update function of `{variable}`:{}", render_issues(.issues))]
pub struct FunctionError {
    pub variable: String,
    pub issues: Vec<ModelError>,
}

impl FunctionError {
    pub fn new(variable: &str, issues: Vec<ModelError>) -> FunctionError {
        FunctionError {
            variable: variable.to_string(),
            issues,
        }
    }
}

/// All problems a format adapter collected while reading a document.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
#[error("Cannot read {format} model:{}", render_issues(.issues))]
pub struct DecodeError {
    pub format: ModelFormat,
    pub issues: Vec<ModelError>,
}

impl DecodeError {
    pub fn new(format: ModelFormat, issues: Vec<ModelError>) -> DecodeError {
        DecodeError { format, issues }
    }

    /// A document-level failure that prevents any further parsing.
    pub fn fatal(format: ModelFormat, reason: impl Into<String>) -> DecodeError {
        let error = ParseError::new(format, Position::default(), reason);
        DecodeError::new(format, vec![error.into()])
    }
}

fn render_issues(issues: &[ModelError]) -> String {
    issues.iter().map(|it| format!("\n - {}", it)).collect()
}

/// Failure of a `decode -> encode` conversion.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ConversionError {
    #[error(transparent)]
    Decode(#[from] DecodeError),
    #[error("Cannot write {format} model: {reason}")]
    Encode { format: ModelFormat, reason: String },
}

impl ConversionError {
    pub(crate) fn encode(format: ModelFormat, reason: impl Into<String>) -> ConversionError {
        ConversionError::Encode {
            format,
            reason: reason.into(),
        }
    }
}

/// Failure of an attractor computation.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum ComputationError {
    #[error("Model is not fully specified. Missing update functions: {}.", .variables.join(", "))]
    NotFullySpecified { variables: Vec<String> },
    #[error("Resource limit reached: {0}")]
    ResourceLimit(String),
    #[error("Computation was cancelled.")]
    Cancelled,
}

#[cfg(test)]
mod tests {
    use crate::error::{DecodeError, ParseError, Position, SemanticError, SemanticErrorKind};
    use crate::ModelFormat;

    #[test]
    fn position_display() {
        assert_eq!("unknown position", Position::default().to_string());
        assert_eq!("line 3", Position::at_line(3).to_string());
        assert_eq!("line 3, column 7", Position::new(3, 7).to_string());
    }

    #[test]
    fn parse_error_relocation() {
        let error = ParseError::new(ModelFormat::Aeon, Position::new(0, 4), "Unexpected ')'.");
        let error = error.relocate(ModelFormat::Bnet, 12, 10);
        assert_eq!(ModelFormat::Bnet, error.format);
        assert_eq!(Position::new(12, 14), error.position);
    }

    #[test]
    fn decode_error_lists_every_issue() {
        let issues = vec![
            ParseError::new(ModelFormat::Bnet, Position::at_line(2), "Unexpected line.").into(),
            SemanticError::new(
                SemanticErrorKind::DuplicateUpdateFunction,
                vec!["a".to_string()],
                "Duplicate function for `a`.",
            )
            .into(),
        ];
        let message = DecodeError::new(ModelFormat::Bnet, issues).to_string();
        assert!(message.contains("line 2"));
        assert!(message.contains("Duplicate function for `a`."));
        assert_eq!(2, message.matches("\n - ").count());
    }
}

use crate::error::{ParseError, Position};
use crate::expression::Expression;
use crate::expression::Expression::*;
use crate::BinaryOp::*;
use crate::ModelFormat;
use std::convert::TryFrom;
use std::iter::{Enumerate, Peekable};
use std::str::{Chars, FromStr};

impl Expression {
    /// Parse an expression from its textual form.
    ///
    /// Errors carry the 1-based column of the offending character on line 1; callers that parse
    /// expressions embedded in a larger document should relocate them.
    pub fn parse(value: &str) -> Result<Expression, ParseError> {
        let tokens = tokenize_group(&mut value.chars().enumerate().peekable(), None)?;
        if tokens.is_empty() {
            return Err(error_at(1, "Empty expression."));
        }
        Ok(*parse_expression(&tokens, 1)?)
    }
}

impl TryFrom<&str> for Expression {
    type Error = ParseError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Expression::parse(value)
    }
}

impl FromStr for Expression {
    type Err = ParseError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Expression::parse(value)
    }
}

/// **(internal)** A token together with the column where it starts.
#[derive(Debug, Eq, PartialEq)]
struct Token {
    kind: TokenKind,
    column: usize,
}

/// **(internal)** An enum of possible tokens occurring in a string representation of
/// an `Expression`.
#[derive(Debug, Eq, PartialEq)]
enum TokenKind {
    Not,                // '!'
    And,                // '&'
    Or,                 // '|'
    Xor,                // '^'
    Imp,                // '=>'
    Iff,                // '<=>'
    Comma,              // ','
    Name(String),       // 'name'
    Group(Vec<Token>),  // A block of tokens inside parentheses
}

type CharStream<'a> = Peekable<Enumerate<Chars<'a>>>;

fn error_at(column: usize, reason: impl Into<String>) -> ParseError {
    ParseError::new(ModelFormat::Aeon, Position::new(1, column), reason)
}

/// **(internal)** Process a stream of characters into a vector of `Token`s.
///
/// The caller consumes the opening parenthesis and the recursive call consumes the matching
/// closing parenthesis. `open` is the column of that opening parenthesis, or `None` at the
/// top level where no closing parenthesis is expected.
fn tokenize_group(data: &mut CharStream, open: Option<usize>) -> Result<Vec<Token>, ParseError> {
    let mut output = Vec::new();
    while let Some((index, c)) = data.next() {
        let column = index + 1;
        let mut push = |kind: TokenKind| output.push(Token { kind, column });
        match c {
            c if c.is_whitespace() => {}
            '!' => push(TokenKind::Not),
            ',' => push(TokenKind::Comma),
            '&' => push(TokenKind::And),
            '|' => push(TokenKind::Or),
            '^' => push(TokenKind::Xor),
            '=' => {
                if let Some((_, '>')) = data.next() {
                    push(TokenKind::Imp);
                } else {
                    return Err(error_at(column, "Unknown operator '=', expected '=>'."));
                }
            }
            '<' => match (data.next(), data.next()) {
                (Some((_, '=')), Some((_, '>'))) => push(TokenKind::Iff),
                _ => return Err(error_at(column, "Unknown operator '<', expected '<=>'.")),
            },
            ')' => {
                return if open.is_some() {
                    Ok(output)
                } else {
                    Err(error_at(column, "Unbalanced parentheses: unexpected ')'."))
                };
            }
            '(' => {
                let tokens = tokenize_group(data, Some(column))?;
                push(TokenKind::Group(tokens));
            }
            c if is_valid_in_name(c) => {
                let mut name = vec![c];
                while let Some((_, c)) = data.peek() {
                    if !is_valid_in_name(*c) {
                        break;
                    }
                    name.push(*c);
                    data.next();
                }
                push(TokenKind::Name(name.into_iter().collect()));
            }
            c => return Err(error_at(column, format!("Unknown operator '{}'.", c))),
        }
    }
    match open {
        None => Ok(output),
        Some(column) => Err(error_at(
            column,
            "Unbalanced parentheses: this '(' is never closed.",
        )),
    }
}

/// **(internal)** Check if given char can appear in a name.
fn is_valid_in_name(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// **(internal)** A human readable description of a token for error messages.
fn describe(token: &Token) -> String {
    match &token.kind {
        TokenKind::Not => "'!'".to_string(),
        TokenKind::And => "'&'".to_string(),
        TokenKind::Or => "'|'".to_string(),
        TokenKind::Xor => "'^'".to_string(),
        TokenKind::Imp => "'=>'".to_string(),
        TokenKind::Iff => "'<=>'".to_string(),
        TokenKind::Comma => "','".to_string(),
        TokenKind::Name(name) => format!("`{}`", name),
        TokenKind::Group(_) => "'('".to_string(),
    }
}

/// **(internal)** Parse an `Expression` using the recursive steps.
///
/// `anchor` is the column reported when `data` turns out to be empty (usually the operator
/// that was expecting an operand).
fn parse_expression(data: &[Token], anchor: usize) -> Result<Box<Expression>, ParseError> {
    iff(data, anchor)
}

/// **(internal)** Utility method to find first occurrence of a specific token in the token tree.
fn index_of_first(data: &[Token], kind: TokenKind) -> Option<usize> {
    data.iter().position(|t| t.kind == kind)
}

/// **(internal)** Recursive parsing step 1: extract `<=>` operators.
fn iff(data: &[Token], anchor: usize) -> Result<Box<Expression>, ParseError> {
    Ok(if let Some(i) = index_of_first(data, TokenKind::Iff) {
        let at = data[i].column;
        Box::new(Binary(Iff, imp(&data[..i], at)?, iff(&data[(i + 1)..], at)?))
    } else {
        imp(data, anchor)?
    })
}

/// **(internal)** Recursive parsing step 2: extract `=>` operators.
fn imp(data: &[Token], anchor: usize) -> Result<Box<Expression>, ParseError> {
    Ok(if let Some(i) = index_of_first(data, TokenKind::Imp) {
        let at = data[i].column;
        Box::new(Binary(Imp, or(&data[..i], at)?, imp(&data[(i + 1)..], at)?))
    } else {
        or(data, anchor)?
    })
}

/// **(internal)** Recursive parsing step 3: extract `|` operators.
fn or(data: &[Token], anchor: usize) -> Result<Box<Expression>, ParseError> {
    Ok(if let Some(i) = index_of_first(data, TokenKind::Or) {
        let at = data[i].column;
        Box::new(Binary(Or, and(&data[..i], at)?, or(&data[(i + 1)..], at)?))
    } else {
        and(data, anchor)?
    })
}

/// **(internal)** Recursive parsing step 4: extract `&` operators.
fn and(data: &[Token], anchor: usize) -> Result<Box<Expression>, ParseError> {
    Ok(if let Some(i) = index_of_first(data, TokenKind::And) {
        let at = data[i].column;
        Box::new(Binary(And, xor(&data[..i], at)?, and(&data[(i + 1)..], at)?))
    } else {
        xor(data, anchor)?
    })
}

/// **(internal)** Recursive parsing step 5: extract `^` operators.
fn xor(data: &[Token], anchor: usize) -> Result<Box<Expression>, ParseError> {
    Ok(if let Some(i) = index_of_first(data, TokenKind::Xor) {
        let at = data[i].column;
        Box::new(Binary(Xor, terminal(&data[..i], at)?, xor(&data[(i + 1)..], at)?))
    } else {
        terminal(data, anchor)?
    })
}

/// **(internal)** Recursive parsing step 6: extract terminals and negations.
fn terminal(data: &[Token], anchor: usize) -> Result<Box<Expression>, ParseError> {
    if data.is_empty() {
        return Err(error_at(anchor, "Expected an operand, found nothing."));
    }
    if data[0].kind == TokenKind::Not {
        return Ok(Box::new(Not(terminal(&data[1..], data[0].column)?)));
    }
    if data.len() == 1 {
        match &data[0].kind {
            TokenKind::Name(name) => {
                return Ok(Box::new(match name.as_str() {
                    "true" | "1" => Const(true),
                    "false" | "0" => Const(false),
                    _ => Var(name.clone()),
                }));
            }
            TokenKind::Group(inner) => return parse_expression(inner, data[0].column),
            _ => {}
        }
    } else if data.len() == 2 {
        // A name followed by a parenthesised group is a placeholder call.
        if let (TokenKind::Name(name), TokenKind::Group(args)) = (&data[0].kind, &data[1].kind) {
            let args = read_args(args, data[1].column)?;
            return Ok(Box::new(Placeholder(name.clone(), args)));
        }
    }
    let culprit = match &data[0].kind {
        TokenKind::Name(_) | TokenKind::Group(_) => &data[1],
        _ => &data[0],
    };
    Err(error_at(
        culprit.column,
        format!("Unexpected {}, expected an operator.", describe(culprit)),
    ))
}

/// **(internal)** Parse a list of placeholder arguments. All arguments must be expressions
/// separated by commas.
fn read_args(data: &[Token], open: usize) -> Result<Vec<Expression>, ParseError> {
    if data.is_empty() {
        return Ok(Vec::new());
    }
    let mut result = Vec::new();
    let mut anchor = open;
    for arg in data.split(|it| it.kind == TokenKind::Comma) {
        if arg.is_empty() {
            return Err(error_at(anchor, "Found empty function argument."));
        }
        result.push(*parse_expression(arg, anchor)?);
        anchor = arg[arg.len() - 1].column;
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use crate::error::Position;
    use crate::expression::Expression;
    use crate::BinaryOp;
    use pretty_assertions::assert_eq;

    #[test]
    fn parse_expression_basic() {
        let inputs = vec![
            "var",
            "var1(a, b, c)",
            "!foo(a)",
            "(var(a, b) | x)",
            "(xyz123 & abc)",
            "(a ^ b)",
            "(a => b)",
            "(a <=> b)",
            "(a <=> !(f(a, b) => (c ^ d)))",
            "f(a, f(b), c)",
            "f((a & c))",
            "g()",
        ];
        for str in inputs {
            assert_eq!(str, Expression::parse(str).unwrap().to_string())
        }
    }

    #[test]
    fn expression_constants() {
        assert_eq!(Expression::Const(false), Expression::parse("0").unwrap());
        assert_eq!(Expression::Const(true), Expression::parse("1").unwrap());
        assert_eq!(Expression::Const(false), Expression::parse("false").unwrap());
        assert_eq!(Expression::Const(true), Expression::parse("true").unwrap());
        assert_eq!(
            Expression::Binary(
                BinaryOp::Or,
                Box::new(Expression::Const(false)),
                Box::new(Expression::Placeholder(
                    "f".to_string(),
                    vec![Expression::Const(false), Expression::Const(true)]
                ))
            ),
            Expression::parse("0 | f(0,1)").unwrap()
        );
    }

    #[test]
    fn operator_priority() {
        let formula = "a & b | c => d ^ e <=> f";
        let expected = "((((a & b) | c) => (d ^ e)) <=> f)";
        assert_eq!(expected, Expression::parse(formula).unwrap().to_string());
        // Binary operators are right-associative.
        assert_eq!("(a & (b & c))", Expression::parse("a&b&c").unwrap().to_string());
    }

    #[test]
    fn unknown_operators() {
        for (input, column) in [("a = b", 3), ("a > b", 3), ("a <= b", 3), ("a ? b", 3)] {
            let error = Expression::parse(input).unwrap_err();
            assert_eq!(Position::new(1, column), error.position);
            assert!(error.reason.contains("Unknown operator"), "{}", error.reason);
        }
    }

    #[test]
    fn unbalanced_parentheses() {
        let error = Expression::parse("a & (b <=> c").unwrap_err();
        assert_eq!(Position::new(1, 5), error.position);
        assert!(error.reason.starts_with("Unbalanced parentheses"));

        let error = Expression::parse("(f => g))").unwrap_err();
        assert_eq!(Position::new(1, 9), error.position);
        assert!(error.reason.starts_with("Unbalanced parentheses"));

        assert!(Expression::parse("a <=> (f(a,b ^ g)").is_err());
        assert!(Expression::parse("a | (f(a,b)) ^ g)").is_err());
    }

    #[test]
    fn empty_expressions() {
        let error = Expression::parse("   ").unwrap_err();
        assert_eq!("Empty expression.", error.reason);
        let error = Expression::parse("a &").unwrap_err();
        assert_eq!(Position::new(1, 3), error.position);
        assert!(Expression::parse("()").is_err());
    }

    #[test]
    fn malformed_arguments() {
        assert!(Expression::parse("f(a b c)").is_err());
        assert!(Expression::parse("f(a, b, c,)").is_err());
        assert!(Expression::parse("f(a, & c)").is_err());
    }

    #[test]
    fn missing_operands() {
        let inputs = [
            "a & | g", "a & !", "a & a b c", "a & ^x", "a & x^", ",", ",hello", "hello,",
        ];
        for input in inputs {
            assert!(Expression::parse(input).is_err(), "{}", input);
        }
        let error = Expression::parse("a & a b").unwrap_err();
        assert_eq!(Position::new(1, 7), error.position);
        assert_eq!("Unexpected `b`, expected an operator.", error.reason);
    }
}

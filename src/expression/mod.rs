//! Propositional expressions as they appear in update functions, before they are attached to
//! a concrete network.
//!
//! An `Expression` references variables by name and may contain *placeholders*: calls like
//! `f(a, b)` that stand for a Boolean function which is not known yet. Placeholders are only
//! meaningful for validation of partially specified models (see `crate::validation`).
//! A `FnUpdate` is the fully resolved counterpart that is bound to a `RegulatoryGraph`.
//!
//! The grammar uses the usual `.aeon` operators, from the loosest to the tightest binding:
//! `<=>`, `=>`, `|`, `&`, `^`, and the prefix `!`. Binary operators associate to the right.
//! Constants are written as `true`/`1` and `false`/`0`.

use crate::BinaryOp;

/// **(internal)** Tokenizer and recursive descent parser.
mod _parser;
/// **(internal)** Inspection, evaluation and conversion of `Expression` trees.
mod _impl_expression;

/// An abstract syntax tree of a Boolean expression over named variables.
#[derive(Clone, Debug, Eq, Hash, PartialEq)]
pub enum Expression {
    Const(bool),
    Var(String),
    /// An uninterpreted function applied to argument expressions.
    Placeholder(String, Vec<Expression>),
    Not(Box<Expression>),
    Binary(BinaryOp, Box<Expression>, Box<Expression>),
}
